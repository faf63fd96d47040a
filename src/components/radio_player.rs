//! The desk radio widget: one fixed track, a play/pause toggle, a volume
//! slider, and a speaker cone that pulses while playing.

use dioxus::prelude::*;

use crate::components::audio_manager::{self, playback_handle};
use crate::components::Icon;
use crate::playback::WidgetState;

const TRACK_TITLE: &str = "Christmas List";
const TRACK_ARTIST: &str = "Anson Seabra";

#[component]
pub fn RadioPlayer() -> Element {
    let mut state = use_signal(WidgetState::default);

    // The playback resource follows the widget's lifecycle: created on
    // mount at the slider's starting volume, released on unmount.
    use_effect(move || {
        audio_manager::init_playback(state.peek().volume);
    });
    use_drop(audio_manager::release_playback);

    let on_toggle = move |_| {
        state.write().toggle(&playback_handle());
    };

    let on_volume_change = move |e: Event<FormData>| {
        if let Ok(val) = e.value().parse::<f64>() {
            state.write().set_volume(val, &playback_handle());
        }
    };

    let playing = state().is_playing;

    rsx! {
        div { class: "radio-shell absolute top-4 left-4 z-50 select-none font-sans",
            div { class: "radio-case relative flex items-center p-3 gap-3 overflow-hidden",
                div { class: "wood-texture absolute inset-0 pointer-events-none" }

                // Left section: paper note and controls
                div { class: "relative z-10 flex-1 flex flex-col justify-between h-full py-1",
                    div { class: "paper-note mb-2",
                        div { class: "truncate", "Track: {TRACK_TITLE}" }
                        div { class: "truncate mt-0.5", "Artist: {TRACK_ARTIST}" }
                    }

                    div { class: "flex items-center justify-between px-2",
                        div { class: "flex items-center gap-1.5",
                            span { class: "volume-label", "-" }
                            input {
                                r#type: "range",
                                min: "0",
                                max: "1",
                                step: "0.01",
                                value: "{state().volume}",
                                class: "volume-slider",
                                oninput: on_volume_change,
                            }
                            span { class: "volume-label", "+" }
                        }

                        button { class: "toggle-button", onclick: on_toggle,
                            if playing {
                                Icon { name: "pause".to_string(), class: "w-4 h-4".to_string() }
                            } else {
                                Icon { name: "play".to_string(), class: "w-4 h-4 ml-0.5".to_string() }
                            }
                        }
                    }
                }

                // Right section: speaker
                div { class: "speaker relative z-10 shrink-0 flex items-center justify-center overflow-hidden",
                    div { class: "speaker-grille absolute inset-0" }
                    div { class: if playing { "speaker-cone animate-speaker-pulse" } else { "speaker-cone" },
                        div { class: "speaker-cone-sheen" }
                    }
                }
            }
        }
    }
}

//! Platform bindings for the radio's one playback resource.
//!
//! The widget owns exactly one looping audio source. On the web target that
//! is a hidden `<audio>` element kept outside the component render cycle; on
//! desktop builds it is a rodio sink fed by the embedded track bytes.

use crate::playback::{PlaybackHandle, PlaybackStartError};

#[cfg(target_arch = "wasm32")]
use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::JsFuture;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

#[cfg(all(not(target_arch = "wasm32"), feature = "desktop"))]
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
#[cfg(all(not(target_arch = "wasm32"), feature = "desktop"))]
use std::cell::{Cell, RefCell};
#[cfg(all(not(target_arch = "wasm32"), feature = "desktop"))]
use std::io::Cursor;

#[cfg(target_arch = "wasm32")]
const AUDIO_ELEMENT_ID: &str = "deskradio-audio";

#[cfg(target_arch = "wasm32")]
const RADIO_TRACK: Asset = asset!("/assets/music/christmas_list.mp3");

#[cfg(all(not(target_arch = "wasm32"), feature = "desktop"))]
static RADIO_TRACK_BYTES: &[u8] = include_bytes!("../../assets/music/christmas_list.mp3");

/// Cheap accessor for the platform playback resource. The resource itself
/// lives outside the widget (DOM element / thread-local deck) so handlers
/// can grab a fresh handle on every event.
#[derive(Clone, Copy)]
pub struct AudioHandle;

pub fn playback_handle() -> AudioHandle {
    AudioHandle
}

/// Initialize the playback resource when the widget mounts and apply its
/// starting volume, so the audible level matches the slider from the first
/// paint.
pub fn init_playback(volume: f64) {
    #[cfg(target_arch = "wasm32")]
    if let Some(audio) = get_or_create_audio_element() {
        audio.set_volume(volume.clamp(0.0, 1.0));
    }

    #[cfg(all(not(target_arch = "wasm32"), feature = "desktop"))]
    DESIRED_VOLUME.set(volume.clamp(0.0, 1.0));

    #[cfg(all(not(target_arch = "wasm32"), not(feature = "desktop")))]
    let _ = volume;
}

/// Tear the playback resource down when the widget unmounts.
pub fn release_playback() {
    #[cfg(target_arch = "wasm32")]
    if let Some(audio) = find_audio_element() {
        let _ = audio.pause();
        audio.set_src("");
        let _ = audio.remove_attribute("src");
        audio.remove();
    }

    #[cfg(all(not(target_arch = "wasm32"), feature = "desktop"))]
    DECK.take();
}

/// Find or lazily create the app's single hidden `<audio>` element.
///
/// The element is configured once: fixed source, metadata-only preload, and
/// looping for its whole lifetime so the track restarts without any widget
/// involvement.
#[cfg(target_arch = "wasm32")]
fn get_or_create_audio_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(AUDIO_ELEMENT_ID) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(AUDIO_ELEMENT_ID);
    audio.set_attribute("preload", "metadata").ok()?;
    audio.set_src(&RADIO_TRACK.to_string());
    audio.set_loop(true);
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

#[cfg(target_arch = "wasm32")]
fn find_audio_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;
    let element = document.get_element_by_id(AUDIO_ELEMENT_ID)?;
    element.dyn_into::<HtmlAudioElement>().ok()
}

#[cfg(target_arch = "wasm32")]
fn js_reason(value: &wasm_bindgen::JsValue) -> String {
    js_sys::Reflect::get(value, &"message".into())
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(target_arch = "wasm32")]
impl PlaybackHandle for AudioHandle {
    fn play(&self) -> Result<(), PlaybackStartError> {
        let Some(audio) = get_or_create_audio_element() else {
            return Err(PlaybackStartError::new("audio element unavailable"));
        };

        // play() hands back a promise; a rejection (autoplay policy, bad
        // source) arrives after this call has already returned.
        match audio.play() {
            Ok(promise) => {
                spawn(async move {
                    if let Err(rejection) = JsFuture::from(promise).await {
                        crate::diagnostics::report_playback_failure(&PlaybackStartError::new(
                            js_reason(&rejection),
                        ));
                    }
                });
                Ok(())
            }
            Err(err) => Err(PlaybackStartError::new(js_reason(&err))),
        }
    }

    fn pause(&self) {
        if let Some(audio) = find_audio_element() {
            let _ = audio.pause();
        }
    }

    fn set_volume(&self, volume: f64) {
        if let Some(audio) = get_or_create_audio_element() {
            audio.set_volume(volume);
        }
    }
}

#[cfg(all(not(target_arch = "wasm32"), feature = "desktop"))]
thread_local! {
    static DECK: RefCell<Option<RadioDeck>> = const { RefCell::new(None) };
    static DESIRED_VOLUME: Cell<f64> = const { Cell::new(0.5) };
}

/// Desktop playback: one sink looping the embedded track. Opened on the
/// first start request so a missing output device or an undecodable asset
/// surfaces as a start failure rather than a mount crash.
#[cfg(all(not(target_arch = "wasm32"), feature = "desktop"))]
struct RadioDeck {
    // The stream must outlive the sink or playback goes silent.
    _output: (OutputStream, OutputStreamHandle),
    sink: Sink,
}

#[cfg(all(not(target_arch = "wasm32"), feature = "desktop"))]
impl RadioDeck {
    fn open() -> Result<Self, PlaybackStartError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|err| PlaybackStartError::new(format!("no audio output device: {err}")))?;
        let sink = Sink::try_new(&stream_handle)
            .map_err(|err| PlaybackStartError::new(format!("audio sink unavailable: {err}")))?;
        let source = Decoder::new(Cursor::new(RADIO_TRACK_BYTES))
            .map_err(|err| PlaybackStartError::new(format!("track failed to decode: {err}")))?
            .repeat_infinite();

        sink.append(source);
        sink.set_volume(DESIRED_VOLUME.get() as f32);

        Ok(Self {
            _output: (stream, stream_handle),
            sink,
        })
    }
}

#[cfg(all(not(target_arch = "wasm32"), feature = "desktop"))]
impl PlaybackHandle for AudioHandle {
    fn play(&self) -> Result<(), PlaybackStartError> {
        DECK.with(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.is_none() {
                *slot = Some(RadioDeck::open()?);
            }
            if let Some(deck) = slot.as_ref() {
                deck.sink.play();
            }
            Ok(())
        })
    }

    fn pause(&self) {
        DECK.with(|slot| {
            if let Some(deck) = slot.borrow().as_ref() {
                deck.sink.pause();
            }
        });
    }

    fn set_volume(&self, volume: f64) {
        DESIRED_VOLUME.set(volume);
        DECK.with(|slot| {
            if let Some(deck) = slot.borrow().as_ref() {
                deck.sink.set_volume(volume as f32);
            }
        });
    }
}

// Builds without a native audio backend (running the web bundle's tests on
// the host, for instance) still compile against the same handle; the start
// request fails into the diagnostic sink like any other start failure.
#[cfg(all(not(target_arch = "wasm32"), not(feature = "desktop")))]
impl PlaybackHandle for AudioHandle {
    fn play(&self) -> Result<(), PlaybackStartError> {
        Err(PlaybackStartError::new(
            "no audio backend enabled in this build",
        ))
    }

    fn pause(&self) {}

    fn set_volume(&self, _volume: f64) {}
}

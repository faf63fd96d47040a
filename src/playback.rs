//! Playback contract between the radio widget and the platform audio backend.

use thiserror::Error;

use crate::diagnostics;

/// Starting playback is the only audio operation that can fail (autoplay
/// policy, missing or corrupt asset, no output device).
#[derive(Debug, Error)]
#[error("playback start failed: {reason}")]
pub struct PlaybackStartError {
    reason: String,
}

impl PlaybackStartError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Controls for one loaded, looping audio source.
///
/// Implementations keep the source looping for the handle's whole lifetime.
/// `play` fires the start request; failures that only become observable
/// after the call returns (the web play promise) are reported straight to
/// the diagnostic sink by the implementation.
pub trait PlaybackHandle {
    fn play(&self) -> Result<(), PlaybackStartError>;

    /// Never fails on a valid handle.
    fn pause(&self);

    /// Never fails on a valid handle. Callers pass values in [0, 1].
    fn set_volume(&self, volume: f64);
}

/// What the widget believes about playback, plus the last selected volume.
///
/// `is_playing` follows user intent, not the backend's actual state: a start
/// request that later fails leaves the flag set and the failure in the log.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WidgetState {
    pub is_playing: bool,
    pub volume: f64,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            is_playing: false,
            volume: 0.5,
        }
    }
}

impl WidgetState {
    /// Flip between playing and paused, driving `handle` accordingly.
    ///
    /// The flag flips even when the start request errors; the error goes to
    /// the diagnostic sink and nothing escapes to the caller.
    pub fn toggle(&mut self, handle: &impl PlaybackHandle) {
        if self.is_playing {
            handle.pause();
        } else if let Err(err) = handle.play() {
            diagnostics::report_playback_failure(&err);
        }
        self.is_playing = !self.is_playing;
    }

    /// Store the selected volume and assign it to `handle`.
    ///
    /// The range input already constrains its value to [0, 1]; the clamp
    /// keeps the invariant when the value arrives from anywhere else.
    pub fn set_volume(&mut self, volume: f64, handle: &impl PlaybackHandle) {
        let volume = volume.clamp(0.0, 1.0);
        self.volume = volume;
        handle.set_volume(volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct RecordingHandle {
        play_calls: Cell<u32>,
        pause_calls: Cell<u32>,
        volumes: RefCell<Vec<f64>>,
        fail_play: bool,
    }

    impl RecordingHandle {
        fn failing() -> Self {
            Self {
                fail_play: true,
                ..Self::default()
            }
        }
    }

    impl PlaybackHandle for RecordingHandle {
        fn play(&self) -> Result<(), PlaybackStartError> {
            self.play_calls.set(self.play_calls.get() + 1);
            if self.fail_play {
                Err(PlaybackStartError::new("rejected by test handle"))
            } else {
                Ok(())
            }
        }

        fn pause(&self) {
            self.pause_calls.set(self.pause_calls.get() + 1);
        }

        fn set_volume(&self, volume: f64) {
            self.volumes.borrow_mut().push(volume);
        }
    }

    #[test]
    fn starts_paused_at_half_volume() {
        let state = WidgetState::default();
        assert!(!state.is_playing);
        assert_eq!(state.volume, 0.5);
    }

    #[test]
    fn first_toggle_requests_playback_once() {
        let handle = RecordingHandle::default();
        let mut state = WidgetState::default();

        state.toggle(&handle);

        assert!(state.is_playing);
        assert_eq!(handle.play_calls.get(), 1);
        assert_eq!(handle.pause_calls.get(), 0);
    }

    #[test]
    fn second_toggle_pauses_without_replaying() {
        let handle = RecordingHandle::default();
        let mut state = WidgetState::default();

        state.toggle(&handle);
        state.toggle(&handle);

        assert!(!state.is_playing);
        assert_eq!(handle.play_calls.get(), 1);
        assert_eq!(handle.pause_calls.get(), 1);
    }

    #[test]
    fn toggle_parity_holds_over_long_sequences() {
        let handle = RecordingHandle::default();
        let mut state = WidgetState::default();

        for n in 1..=7 {
            state.toggle(&handle);
            assert_eq!(state.is_playing, n % 2 == 1);
        }
    }

    #[test]
    fn failed_start_keeps_the_optimistic_flag_and_reports_once() {
        let handle = RecordingHandle::failing();
        let mut state = WidgetState::default();
        let reported_before = diagnostics::playback_failure_count();

        state.toggle(&handle);

        assert!(state.is_playing);
        assert_eq!(handle.play_calls.get(), 1);
        assert_eq!(
            diagnostics::playback_failure_count() - reported_before,
            1,
            "one start failure, one report"
        );

        // Pausing after a failed start is uneventful: no retry, no report.
        state.toggle(&handle);
        assert!(!state.is_playing);
        assert_eq!(handle.pause_calls.get(), 1);
        assert_eq!(diagnostics::playback_failure_count() - reported_before, 1);

        // Parity is unaffected by failures on every start.
        for n in 1..=5 {
            state.toggle(&handle);
            assert_eq!(state.is_playing, n % 2 == 1);
        }
    }

    #[test]
    fn volume_reaches_state_and_handle_in_order() {
        let handle = RecordingHandle::default();
        let mut state = WidgetState::default();

        state.set_volume(0.0, &handle);
        state.set_volume(1.0, &handle);

        assert_eq!(state.volume, 1.0);
        assert_eq!(*handle.volumes.borrow(), vec![0.0, 1.0]);
    }

    #[test]
    fn volume_is_clamped_to_unit_range() {
        let handle = RecordingHandle::default();
        let mut state = WidgetState::default();

        state.set_volume(-0.25, &handle);
        assert_eq!(state.volume, 0.0);

        state.set_volume(1.75, &handle);
        assert_eq!(state.volume, 1.0);

        assert_eq!(*handle.volumes.borrow(), vec![0.0, 1.0]);
    }

    #[test]
    fn repeated_volume_writes_stay_plain_assignments() {
        let handle = RecordingHandle::default();
        let mut state = WidgetState::default();

        for _ in 0..3 {
            state.set_volume(0.3, &handle);
        }

        assert_eq!(state.volume, 0.3);
        assert_eq!(*handle.volumes.borrow(), vec![0.3, 0.3, 0.3]);
        assert_eq!(handle.play_calls.get(), 0);
        assert_eq!(handle.pause_calls.get(), 0);
    }

    #[test]
    fn start_error_display_names_the_reason() {
        let err = PlaybackStartError::new("no output device");
        assert_eq!(format!("{err}"), "playback start failed: no output device");
    }
}

//! The components module contains all shared components for our app.

pub mod audio_manager;
mod icons;
mod radio_player;

pub use icons::*;
pub use radio_player::*;

//! Audio Manager - Owns the background music element outside of the component render cycle.
//! Element callbacks are turned into `MediaEvent`s and fed to the session state machine.

mod error;
mod playback;
mod session;

#[cfg(target_arch = "wasm32")]
mod controller_web;
#[cfg(not(target_arch = "wasm32"))]
mod controller_native;

pub use error::*;
pub use playback::race_playback;
pub use session::*;

#[cfg(target_arch = "wasm32")]
pub use controller_web::{reload_music, toggle_music, MusicController};
#[cfg(not(target_arch = "wasm32"))]
pub use controller_native::{reload_music, toggle_music, MusicController};

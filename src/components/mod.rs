//! The components module contains all shared components for the page.

mod app;
mod app_view;
pub mod audio_manager;
pub mod clipboard;
pub mod feedback;
mod icons;
mod landing;
mod music_toggle;
mod page_state;
mod server_address;
#[cfg(target_arch = "wasm32")]
mod web_helpers;
#[cfg(not(target_arch = "wasm32"))]
mod webview_helpers;

pub use app::*;
pub use app_view::*;
pub use audio_manager::MusicController;
pub use icons::*;
pub use landing::*;
pub use music_toggle::*;
pub use page_state::*;
pub use server_address::*;
#[cfg(target_arch = "wasm32")]
pub use web_helpers::*;
#[cfg(not(target_arch = "wasm32"))]
pub use webview_helpers::*;

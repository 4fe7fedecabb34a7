//! Draw data for the external renderer
//!
//! The core never touches a window or GPU. Each frame it produces plain
//! lists of circles and HUD values; circle instances are `Pod` so a
//! backend can upload them as-is.

pub mod frame;
pub mod instance;

pub use frame::{FrameDraw, Hud, MenuView, SettingsView};
pub use instance::{CircleInstance, colors};

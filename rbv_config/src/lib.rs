#![warn(clippy::unwrap_used)]

pub mod animation;
pub mod config;
pub mod error;
pub mod layout;
pub mod theme;

pub use animation::*;
pub use config::*;
pub use error::*;
pub use layout::*;
pub use theme::*;

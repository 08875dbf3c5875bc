pub mod error;
pub mod input;
pub mod plain;
pub mod recorder;
pub mod tui;

pub use error::*;
pub use input::*;
pub use plain::*;
pub use recorder::*;
pub use tui::*;

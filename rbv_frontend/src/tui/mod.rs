pub mod animation;
pub mod canvas;
pub mod layout;
pub mod theme;
pub mod visualizer;

pub use animation::*;
pub use canvas::*;
pub use layout::*;
pub use theme::*;
pub use visualizer::*;

pub mod components;
pub mod enums;
pub mod level;
pub mod plugins;
pub mod sprites;

pub use components::*;
pub use enums::*;

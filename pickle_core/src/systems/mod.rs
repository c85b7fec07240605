pub mod collision;
pub mod control;
pub mod input;
pub mod movement;
pub mod scoring;

pub use collision::*;
pub use control::*;
pub use input::*;
pub use movement::*;
pub use scoring::*;

pub mod flat;
pub mod hierarchy;

pub use flat::*;
pub use hierarchy::*;

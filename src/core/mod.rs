pub mod constants;
pub mod noise;
pub mod sim;

pub use sim::*;

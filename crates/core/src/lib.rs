#![forbid(unsafe_code)]

pub mod feedback;
pub mod model;
pub mod normalize;
pub mod quiz;
pub mod tabular;
pub mod time;

pub use time::Clock;

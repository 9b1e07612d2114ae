pub mod precipitation;
pub mod stations;
pub mod temperature_range;
pub mod tobs;

pub use precipitation::precipitation;
pub use stations::stations;
pub use temperature_range::{temperature_range, temperature_since};
pub use tobs::tobs;

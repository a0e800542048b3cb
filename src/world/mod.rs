// world/ - Scene geometry and wind field
//
// Pure queries over the scene plus the noise source that drives the wind.

mod layout;
mod noise;

pub use layout::*;
pub use noise::*;

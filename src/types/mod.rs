mod diagnosis;
mod order;

pub use diagnosis::*;
pub use order::*;

//! Utility modules

pub mod amounts;
pub mod dates;
pub mod similarity;
pub mod validation;

pub use amounts::*;
pub use dates::*;
pub use similarity::*;
pub use validation::*;

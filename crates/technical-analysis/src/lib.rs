pub mod fibonacci;
pub mod indicators;
pub mod momentum;
pub mod signals;
pub mod summary;

#[cfg(test)]
mod indicators_tests;

pub use fibonacci::*;
pub use indicators::*;
pub use momentum::*;
pub use signals::*;
pub use summary::*;

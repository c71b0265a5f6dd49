//! Utilities used for testing and benchmarking.

mod perft;
pub use perft::run_perft;
pub use perft::perft;

pub mod positions;
pub mod scan;

//! Command implementations

mod sync;

pub use sync::{run_loop, run_once};

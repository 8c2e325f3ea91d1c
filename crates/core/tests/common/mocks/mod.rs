//! Mock implementations of the simulator's injection points.


pub use finish::{Always, Never, Scripted};

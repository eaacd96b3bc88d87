pub mod classifier;
pub mod state_machine;

pub use classifier::{classify, Side};
pub use state_machine::{AlertEvent, TouchState};

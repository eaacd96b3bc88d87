pub mod loader;
pub mod refresher;
pub mod store;

pub use loader::BaselineLoader;
pub use store::{Baseline, BaselineStore};

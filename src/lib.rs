pub mod alert;
pub mod baseline;
pub mod binance;
pub mod config;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod model;
pub mod notifier;
pub mod universe;

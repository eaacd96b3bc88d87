pub mod ema;

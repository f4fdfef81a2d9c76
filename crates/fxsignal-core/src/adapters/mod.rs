//! Rate provider adapters.

mod frankfurter;

pub use frankfurter::{history_window, FrankfurterAdapter};

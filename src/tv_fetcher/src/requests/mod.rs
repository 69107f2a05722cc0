//! Single-request operations, from session acquisition to a typed result.

mod historical;
pub use historical::{fetch_bars, run_bars};

mod last_price;
pub use last_price::{fetch_last_price, run_last_price};

//! Services, clock access and filesystem helpers layered over the ledger model.

pub mod services;
pub mod time;
pub mod utils;

pub use time::{Clock, ManualClock, SystemClock};

//! Accumulator record model and the rollover state machine.

pub mod record;
pub mod rollover;

pub use record::{AccumulatorRecord, RecordSnapshot, Totals, Window};
pub use rollover::{Rollover, RolloverEngine};

//! Analytics modules.
//!
//! Derived statistics over the employee directory. All computations are
//! pure functions of an input snapshot.

pub mod aggregator;

pub use aggregator::*;

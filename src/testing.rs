//! Testing utilities for code built on timeslice.
//!
//! - **Fixtures**: timestamped item names and ready-made lists
//! - **Scripted query**: a [`Query`](crate::Query) whose per-call counts are fixed up front
//! - **Log capture**: a `log` backend that records what the current thread emitted
//! - **Assertions**: checks for window overlap and batch contiguity
//!
//! # Quick Start
//!
//! ```
//! use timeslice::testing::*;
//! use timeslice::{Interval, Order, Period, Query};
//!
//! # fn main() -> anyhow::Result<()> {
//! let logger = RecordingLogger::install();
//! let start = timestamp(2022, 1, 1, 0);
//! let outer = Period::new(start, timestamp(2022, 1, 3, 0));
//!
//! let query = ScriptedQuery::new([5, 3]);
//! let counts: Vec<usize> = query
//!     .run_in_batches(&outer, Interval::days(1), Order::Ascending, Some(10))?
//!     .map(|r| r.map(|(_, n)| n))
//!     .collect::<anyhow::Result<_>>()?;
//!
//! assert_eq!(counts, vec![5, 3]);
//! assert_eq!(logger.warnings().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod logger;
pub mod scripted;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;
pub use logger::*;
pub use scripted::*;

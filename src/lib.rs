//! # Timeslice
//!
//! A **time-indexed windowing and query engine** for ordered collections of
//! timestamped items, such as satellite product ids or file names that carry
//! an acquisition time.
//!
//! ## Key Features
//!
//! - **Lazy range generation** - timestamps and sub-periods over a span, in either direction
//! - **Indexed lists** - items paired with timestamps extracted once at construction
//! - **Period filtering** - open-ended, forward and reversed periods
//! - **Windows and chunks** - overlapping sliding windows and non-overlapping partitions
//! - **Paginated querying** - cut a long span into batches, query each, verify the total
//! - **Parsers** - regex, chrono-format and product-id timestamp extraction
//! - **Parallel extraction** - rayon-backed list construction (feature `parallel`)
//!
//! ## Quick Start
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use timeslice::*;
//! use timeslice::parser::FileNameParser;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let names = vec![
//!     "seviri_20220101_00_12.nc",
//!     "seviri_20220101_06_27.nc",
//!     "seviri_20220102_00_12.nc",
//! ];
//! let list = IndexedList::with_parser(names, &FileNameParser)?;
//!
//! // Everything before noon on the first day
//! let noon = Utc.with_ymd_and_hms(2022, 1, 1, 12, 0, 0).unwrap();
//! assert_eq!(list.filter(&Period::ending_at(noon)).len(), 2);
//!
//! // Overlapping pairs of consecutive items
//! let windows: Vec<_> = list.sliding_windows(2, 0, -1)?.collect();
//! assert_eq!(windows.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Period and Interval
//!
//! A [`Period`] is a span with optional bounds; an [`Interval`] is a signed
//! duration. The sign of an interval decides the direction of travel
//! wherever no explicit [`Order`] is given.
//!
//! ### Ranges and batches
//!
//! - [`datetime_range`] - equally spaced timestamps, end exclusive
//! - [`generate_batches`] - `(start, end)` pairs covering a span, end inclusive
//! - [`BatchedPeriod`] - the signed variant, yielding [`Period`]s
//!
//! ### IndexedList
//!
//! An [`IndexedList<T>`] stores opaque items next to their timestamps. It is
//! immutable after construction and answers:
//! - [`filter`](IndexedList::filter) - items inside a period
//! - [`sliding_windows`](IndexedList::sliding_windows) - windows of `k` adjacent items
//! - [`chunked_partition`](IndexedList::chunked_partition) - chunks of at most `k` items
//!
//! ### Query
//!
//! The [`Query`] trait abstracts over anything that can be asked for the
//! items of a period. [`Query::run_in_batches`] walks a long span one batch
//! at a time and logs a warning when the total disagrees with what was
//! expected. [`IndexedList`] implements it; so does the
//! [`SnapshotAligned`](catalog::SnapshotAligned) adaptor.
//!
//! ## Logging
//!
//! Log records go through the [`log`] facade. Installing a logger is left to
//! the application.
//!
//! ## Feature Flags
//!
//! - `parallel` (default) - [`IndexedList::new_par`] on the rayon thread pool

pub mod catalog;
pub mod config;
pub mod error;
pub mod helpers;
pub mod indexed;
pub mod interval;
pub mod parser;
pub mod period;
pub mod query;
pub mod range;
pub mod testing;
pub mod utils;

// Re-export commonly used items
pub use catalog::{Collection, SnapshotAligned};
pub use config::BatchQueryConfig;
pub use error::{ParseError, Result, TimesliceError};
pub use helpers::{Chunks, SlidingWindows};
pub use indexed::{IndexedList, ListBatch};
pub use interval::{Interval, IntervalSpec};
pub use parser::DateTimeParser;
pub use period::{Period, Timestamp};
pub use query::{CheckedQueryError, Query, QueryBatches};
pub use range::{
    BatchedPeriod, DateTimeBatches, DateTimeRange, Order, PeriodBatches, datetime_range,
    generate_batches,
};

//! Paginated querying over a time span.
//!
//! A [`Query`] is anything that can answer "which items fall in this period?"
//! and count what it returned: a remote catalog client, an in-memory
//! [`IndexedList`], a scripted stand-in under test. Long spans are cut into
//! sub-periods with [`generate_batches`] and queried one at a time through
//! [`Query::run_in_batches`], which keeps a running tally and compares it to
//! an expected total once the walk completes.
//!
//! A mismatch between the expected and the retrieved total is logged at
//! `warn` level and never turned into an error: the data source may
//! legitimately change between calls.
//!
//! ```
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use timeslice::{IndexedList, Interval, Order, Period, Query};
//!
//! let t0 = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
//! let list = IndexedList::new((0..48).collect::<Vec<i64>>(), |h| Ok(t0 + TimeDelta::hours(*h)))?;
//!
//! let outer = Period::new(t0, t0 + TimeDelta::days(2));
//! let counts: Vec<usize> = list
//!     .run_in_batches(&outer, Interval::days(1), Order::Ascending, Some(48))?
//!     .map(|batch| batch.map(|(_, count)| count))
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(counts, vec![24, 24]);
//! # Ok::<(), timeslice::TimesliceError>(())
//! ```

use std::fmt;

use thiserror::Error;

use crate::error::TimesliceError;
use crate::range::{DateTimeBatches, Order, generate_batches};
use crate::utils::assert_start_precedes_end;
use crate::{IndexedList, Interval, Period};

/// A source of items that can be queried by period.
pub trait Query {
    type Output;
    type Error;

    /// Number of items in a query result.
    fn size_of(&self, output: &Self::Output) -> usize;

    /// Items whose timestamps fall in `period` (start inclusive, end exclusive).
    fn query(&self, period: &Period) -> Result<Self::Output, Self::Error>;

    /// Prefix for every log record emitted on behalf of this query.
    fn log_context(&self) -> &str {
        ""
    }

    /// Query `outer` one batch at a time.
    ///
    /// Sub-periods come from [`generate_batches`] with `batch_interval` and
    /// `order`, so `outer` must be bounded with `start <= end` and the
    /// interval must be positive; those errors are returned here, before any
    /// query runs. Everything else happens lazily as the returned iterator is
    /// pulled, including the opening log record.
    ///
    /// When `expected_total` is given it is compared with the grand total once
    /// the iterator is exhausted, and a disagreement is logged as a warning.
    fn run_in_batches(
        &self,
        outer: &Period,
        batch_interval: Interval,
        order: Order,
        expected_total: Option<usize>,
    ) -> crate::Result<QueryBatches<'_, Self>> {
        let (start, end) = outer.bounds()?;
        let batches = generate_batches(start, end, batch_interval, order)?;
        Ok(QueryBatches {
            query: self,
            outer: *outer,
            batch_interval,
            batches,
            expected_total,
            total: 0,
            state: RunState::Pending,
            mismatch: None,
            context: None,
        })
    }

    /// Like [`run_in_batches`](Query::run_in_batches), with the expected total
    /// taken from a single query over the whole of `outer`.
    ///
    /// Arguments are validated before the outer query is issued.
    fn run_in_batches_checked(
        &self,
        outer: &Period,
        batch_interval: Interval,
        order: Order,
    ) -> Result<QueryBatches<'_, Self>, CheckedQueryError<Self::Error>> {
        let mut batches = self.run_in_batches(outer, batch_interval, order, None)?;
        let whole = self.query(outer).map_err(CheckedQueryError::Query)?;
        batches.expected_total = Some(self.size_of(&whole));
        Ok(batches)
    }
}

fn log_period(context: &str, period: &Period, other: fmt::Arguments<'_>) {
    let other = other.to_string();
    let space = if other.is_empty() { "" } else { " " };
    let msg = format!("{context} -- Fetch period={period}{space}{other}");
    log::info!("{}", msg.trim());
}

/// Failure of [`Query::run_in_batches_checked`].
#[derive(Debug, Error)]
pub enum CheckedQueryError<E> {
    #[error(transparent)]
    Batching(#[from] TimesliceError),
    #[error("querying the outer period failed: {0}")]
    Query(E),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum RunState {
    Pending,
    Running,
    Finished,
    Failed,
}

/// Iterator returned by [`Query::run_in_batches`].
///
/// Yields `Ok((output, count))` per sub-period. The first collaborator error
/// is yielded as `Err` and ends the iteration; no total check happens then.
pub struct QueryBatches<'a, Q: Query + ?Sized> {
    query: &'a Q,
    outer: Period,
    batch_interval: Interval,
    batches: DateTimeBatches,
    expected_total: Option<usize>,
    total: usize,
    state: RunState,
    mismatch: Option<(usize, usize)>,
    context: Option<String>,
}

impl<Q: Query + ?Sized> QueryBatches<'_, Q> {
    /// Items retrieved so far.
    #[inline]
    pub fn total_retrieved(&self) -> usize {
        self.total
    }

    #[inline]
    pub fn expected_total(&self) -> Option<usize> {
        self.expected_total
    }

    /// `true` once every batch has been queried successfully.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state == RunState::Finished
    }

    /// `Some((expected, retrieved))` after a completed run whose total disagreed.
    #[inline]
    pub fn mismatch(&self) -> Option<(usize, usize)> {
        self.mismatch
    }

    /// Use `context` instead of the query's own in every log record of this run.
    #[must_use]
    pub fn with_log_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    fn context(&self) -> &str {
        match &self.context {
            Some(c) => c,
            None => self.query.log_context(),
        }
    }

    fn finish(&mut self) {
        self.state = RunState::Finished;
        log_period(
            self.context(),
            &self.outer,
            format_args!(": retrieved {} items in total.", self.total),
        );
        match self.expected_total {
            Some(expected) if expected != self.total => {
                log::warn!("Expected {expected} item but retrieved {}!", self.total);
                self.mismatch = Some((expected, self.total));
            }
            _ => {}
        }
    }
}

impl<Q: Query + ?Sized> Iterator for QueryBatches<'_, Q> {
    type Item = Result<(Q::Output, usize), Q::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            RunState::Pending => {
                log_period(
                    self.context(),
                    &self.outer,
                    format_args!("and batch_interval='{}'.", self.batch_interval),
                );
                self.state = RunState::Running;
            }
            RunState::Running => {}
            RunState::Finished | RunState::Failed => return None,
        }
        let Some((start, end)) = self.batches.next() else {
            self.finish();
            return None;
        };
        let period = Period::new(start, end);
        log_period(self.context(), &period, format_args!(""));
        match self.query.query(&period) {
            Ok(output) => {
                let count = self.query.size_of(&output);
                self.total += count;
                log_period(self.context(), &period, format_args!(": retrieved {count} items."));
                Some(Ok((output, count)))
            }
            Err(e) => {
                self.state = RunState::Failed;
                Some(Err(e))
            }
        }
    }
}

impl<Q: Query + ?Sized> std::iter::FusedIterator for QueryBatches<'_, Q> {}

impl<Q: Query + ?Sized> fmt::Debug for QueryBatches<'_, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBatches")
            .field("context", &self.context())
            .field("outer", &self.outer)
            .field("expected_total", &self.expected_total)
            .field("total", &self.total)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<T: Clone> Query for IndexedList<T> {
    type Output = Vec<T>;
    type Error = TimesliceError;

    fn size_of(&self, output: &Vec<T>) -> usize {
        output.len()
    }

    /// Cloned items in `[start, end)`.
    ///
    /// # Errors
    /// The period is missing a bound, or its start is after its end.
    fn query(&self, period: &Period) -> Result<Vec<T>, TimesliceError> {
        let (start, end) = period.bounds()?;
        assert_start_precedes_end(start, end)?;
        Ok(self.filter(period).into_iter().cloned().collect())
    }

    fn log_context(&self) -> &str {
        "List"
    }
}

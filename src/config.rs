//! Serde-backed description of a batched query run.
//!
//! ```
//! use timeslice::config::BatchQueryConfig;
//! use timeslice::Order;
//!
//! let cfg = BatchQueryConfig::from_json_str(r#"{
//!     "start": "2022-01-01T00:00:00Z",
//!     "end": "2023-01-01T00:00:00Z",
//!     "batch_interval": {"days": 30},
//!     "expected_total": 35040
//! }"#)?;
//! assert_eq!(cfg.order, Order::Descending);
//! assert_eq!(cfg.interval()?.as_time_delta().num_days(), 30);
//! # Ok::<(), timeslice::TimesliceError>(())
//! ```

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimesliceError};
use crate::query::{Query, QueryBatches};
use crate::range::Order;
use crate::utils::assert_start_precedes_end;
use crate::{Interval, IntervalSpec, Period, Timestamp};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchQueryConfig {
    pub start: Timestamp,
    pub end: Timestamp,
    pub batch_interval: IntervalSpec,
    #[serde(default)]
    pub order: Order,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_total: Option<usize>,
    /// Replaces the query's own log context when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_context: Option<String>,
}

impl BatchQueryConfig {
    /// Parse and [`validate`](Self::validate) a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Like [`from_json_str`](Self::from_json_str), reading from `reader`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let cfg: Self = serde_json::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the fields against each other: `start <= end` and a positive
    /// batch interval.
    pub fn validate(&self) -> Result<()> {
        assert_start_precedes_end(self.start, self.end)?;
        let interval = self.interval()?;
        if interval.is_zero() || interval.is_negative() {
            return Err(TimesliceError::Config(format!(
                "batch_interval must be positive, got {interval}"
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn period(&self) -> Period {
        Period::new(self.start, self.end)
    }

    pub fn interval(&self) -> Result<Interval> {
        self.batch_interval.to_interval()
    }

    /// Drive [`Query::run_in_batches`] with these settings.
    pub fn run<'q, Q>(&self, query: &'q Q) -> Result<QueryBatches<'q, Q>>
    where
        Q: Query + ?Sized,
    {
        let batches = query.run_in_batches(&self.period(), self.interval()?, self.order, self.expected_total)?;
        Ok(match &self.log_context {
            Some(context) => batches.with_log_context(context.clone()),
            None => batches,
        })
    }
}

//! A [`Query`] with canned answers.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use anyhow::anyhow;

use crate::{Period, Query};

/// What a [`ScriptedQuery`] returns for one call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScriptedBatch {
    pub period: Period,
    pub count: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Step {
    Count(usize),
    Fail,
}

/// Answers each call to [`Query::query`] with the next scripted count.
///
/// Every period it is asked about is recorded. Running out of script, or
/// reaching a step added with [`then_fail`](Self::then_fail), is an error.
///
/// # Example
///
/// ```
/// use timeslice::testing::{ScriptedQuery, timestamp};
/// use timeslice::{Period, Query};
///
/// let q = ScriptedQuery::new([7]);
/// let p = Period::new(timestamp(2022, 1, 1, 0), timestamp(2022, 1, 2, 0));
/// assert_eq!(q.query(&p).unwrap().count, 7);
/// assert!(q.query(&p).is_err());
/// assert_eq!(q.calls(), vec![p, p]);
/// ```
#[derive(Debug)]
pub struct ScriptedQuery {
    steps: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<Period>>,
    context: String,
}

impl ScriptedQuery {
    pub fn new(counts: impl IntoIterator<Item = usize>) -> Self {
        Self {
            steps: Mutex::new(counts.into_iter().map(Step::Count).collect()),
            calls: Mutex::new(Vec::new()),
            context: "Scripted".to_string(),
        }
    }

    /// Append a failing step after the counts given so far.
    #[must_use]
    pub fn then_fail(self) -> Self {
        self.steps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Step::Fail);
        self
    }

    #[must_use]
    pub fn with_log_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Periods queried so far, in call order.
    pub fn calls(&self) -> Vec<Period> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Scripted steps not yet consumed.
    pub fn remaining(&self) -> usize {
        self.steps.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Query for ScriptedQuery {
    type Output = ScriptedBatch;
    type Error = anyhow::Error;

    fn size_of(&self, output: &ScriptedBatch) -> usize {
        output.count
    }

    fn query(&self, period: &Period) -> anyhow::Result<ScriptedBatch> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*period);
        let step = self
            .steps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match step {
            Some(Step::Count(count)) => Ok(ScriptedBatch {
                period: *period,
                count,
            }),
            Some(Step::Fail) => Err(anyhow!("scripted failure for {period}")),
            None => Err(anyhow!("no scripted response left for {period}")),
        }
    }

    fn log_context(&self) -> &str {
        &self.context
    }
}

//! Known satellite data collections and a query adaptor aligned to their
//! snapshot cadence.
//!
//! Some collections publish one product per fixed set of minutes past the
//! hour (SEVIRI: 12, 27, 42 and 57). Querying up to an arbitrary end time
//! would then pick up a partial snapshot, so [`SnapshotAligned`] floors every
//! sub-period end to the latest published snapshot before delegating.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimesliceError;
use crate::query::Query;
use crate::utils::{assert_start_precedes_end, floor_to_snapshot_minutes};
use crate::Period;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Amsu,
    Avhrr,
    Mhs,
    Seviri,
}

impl Collection {
    pub const ALL: [Collection; 4] = [Self::Amsu, Self::Avhrr, Self::Mhs, Self::Seviri];

    /// Identifier of the collection in the remote data store.
    pub fn query_string(&self) -> &'static str {
        match self {
            Self::Amsu => "EO:EUM:DAT:METOP:AMSUL1",
            Self::Avhrr => "EO:EUM:DAT:METOP:AVHRRL1",
            Self::Mhs => "EO:EUM:DAT:METOP:MHSL1",
            Self::Seviri => "EO:EUM:DAT:MSG:HRSEVIRI",
        }
    }

    /// Minutes past the hour at which a snapshot is published.
    ///
    /// Empty for collections without a fixed cadence.
    pub fn snapshot_minutes(&self) -> &'static [u32] {
        match self {
            Self::Seviri => &[12, 27, 42, 57],
            Self::Amsu | Self::Avhrr | Self::Mhs => &[],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Amsu => "amsu",
            Self::Avhrr => "avhrr",
            Self::Mhs => "mhs",
            Self::Seviri => "seviri",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = TimesliceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TimesliceError::Config(format!("unknown collection '{s}'")))
    }
}

/// Wraps a [`Query`] so that every period's end is floored to the
/// collection's snapshot minutes first.
///
/// Periods must be bounded with `start <= end`; the ordering check runs on
/// the period as given, before flooring. An end that floors to before the
/// start collapses the period to `[start, start)`.
#[derive(Clone, Debug)]
pub struct SnapshotAligned<Q> {
    inner: Q,
    collection: Collection,
}

impl<Q> SnapshotAligned<Q> {
    pub fn new(inner: Q, collection: Collection) -> Self {
        Self { inner, collection }
    }

    #[inline]
    pub fn collection(&self) -> Collection {
        self.collection
    }

    #[inline]
    pub fn inner(&self) -> &Q {
        &self.inner
    }

    pub fn into_inner(self) -> Q {
        self.inner
    }

    /// `period` with its end floored to the next-earlier snapshot.
    pub fn align(&self, period: &Period) -> crate::Result<Period> {
        let (start, end) = period.bounds()?;
        assert_start_precedes_end(start, end)?;
        let floored = floor_to_snapshot_minutes(end, self.collection.snapshot_minutes())?.max(start);
        if floored != end {
            log::debug!("{} -- end '{end}' floored to '{floored}'", self.collection);
        }
        Ok(period.with_end(floored))
    }
}

impl<Q> Query for SnapshotAligned<Q>
where
    Q: Query,
    Q::Error: From<TimesliceError>,
{
    type Output = Q::Output;
    type Error = Q::Error;

    fn size_of(&self, output: &Self::Output) -> usize {
        self.inner.size_of(output)
    }

    fn query(&self, period: &Period) -> Result<Self::Output, Self::Error> {
        let aligned = self.align(period)?;
        self.inner.query(&aligned)
    }

    fn log_context(&self) -> &str {
        self.inner.log_context()
    }
}

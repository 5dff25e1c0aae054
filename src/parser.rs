//! Turning textual items (product ids, file names) into timestamps.
//!
//! Any [`DateTimeParser`] can be handed to
//! [`IndexedList::with_parser`](crate::IndexedList::with_parser). Plain closures
//! of type `Fn(&str) -> Result<Timestamp, ParseError>` implement the trait too.
//!
//! ```
//! use timeslice::parser::{DateTimeParser, FileNameParser};
//!
//! let ts = FileNameParser.parse("/data/seviri_20150731_22_12.nc")?;
//! assert_eq!(ts.to_rfc3339(), "2015-07-31T22:12:00+00:00");
//! # Ok::<(), timeslice::ParseError>(())
//! ```

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

use crate::error::{ParseError, Result, TimesliceError};
use crate::Timestamp;

pub trait DateTimeParser {
    fn parse(&self, item: &str) -> std::result::Result<Timestamp, ParseError>;

    /// Parse every item, stopping at the first failure.
    fn parse_all<I, S>(&self, items: I) -> std::result::Result<Vec<Timestamp>, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        items
            .into_iter()
            .enumerate()
            .map(|(i, s)| self.parse(s.as_ref()).map_err(|e| e.at(i)))
            .collect()
    }
}

impl<F> DateTimeParser for F
where
    F: Fn(&str) -> std::result::Result<Timestamp, ParseError>,
{
    fn parse(&self, item: &str) -> std::result::Result<Timestamp, ParseError> {
        self(item)
    }
}

/// Regex with capture groups `year, month, day[, hour[, minute[, second]]]`.
#[derive(Clone, Debug)]
pub struct RegexParser {
    regex: Regex,
}

impl RegexParser {
    /// # Errors
    /// The pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| TimesliceError::construction(format!("invalid regex '{pattern}': {e}")))?;
        Ok(Self { regex })
    }

    pub fn from_regex(regex: Regex) -> Self {
        Self { regex }
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl DateTimeParser for RegexParser {
    fn parse(&self, item: &str) -> std::result::Result<Timestamp, ParseError> {
        parse_by_regex(&self.regex, item)
    }
}

fn parse_by_regex(regex: &Regex, item: &str) -> std::result::Result<Timestamp, ParseError> {
    let caps = regex
        .captures(item)
        .ok_or_else(|| ParseError::new(item, format!("no match for /{}/", regex.as_str())))?;

    let mut fields = [0u32; 6];
    let mut year = 0i32;
    let groups = caps.len() - 1;
    if !(3..=6).contains(&groups) {
        return Err(ParseError::new(
            item,
            format!("expected 3 to 6 capture groups, found {groups}"),
        ));
    }
    for (slot, m) in caps.iter().skip(1).enumerate() {
        let text = m.map(|m| m.as_str()).unwrap_or("0");
        if slot == 0 {
            year = text
                .parse()
                .map_err(|_| ParseError::new(item, format!("'{text}' is not a year")))?;
        } else {
            fields[slot] = text
                .parse()
                .map_err(|_| ParseError::new(item, format!("'{text}' is not a number")))?;
        }
    }

    let [_, month, day, hour, minute, second] = fields;
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
        .ok_or_else(|| ParseError::new(item, "fields do not form a valid datetime"))
}

/// chrono `strftime`-style format, e.g. `"%Y%m%d_%H_%M"`.
///
/// Date-only formats resolve to midnight UTC.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatParser {
    format: String,
}

impl FormatParser {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl DateTimeParser for FormatParser {
    fn parse(&self, item: &str) -> std::result::Result<Timestamp, ParseError> {
        if let Ok(dt) = NaiveDateTime::parse_from_str(item, &self.format) {
            return Ok(dt.and_utc());
        }
        NaiveDate::parse_from_str(item, &self.format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .ok_or_else(|| ParseError::new(item, format!("does not match format '{}'", self.format)))
    }
}

static PRODUCT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[0-9A-Za-z]+-SEVI-[0-9A-Za-z]+-[0-9]+-NA-([0-9]{4})([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{2})[0-9]{2}\.[0-9]+Z-NA",
    )
    .expect("product id pattern compiles")
});

static FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9A-Za-z]+_([0-9]{4})([0-9]{2})([0-9]{2})_([0-9]{2})_([0-9]{2})")
        .expect("file name pattern compiles")
});

/// SEVIRI product ids such as `MSG3-SEVI-MSG15-0100-NA-20150731221240.036000000Z-NA`.
///
/// Seconds in the id are dropped; the result is minute-aligned.
#[derive(Copy, Clone, Debug, Default)]
pub struct ProductIdParser;

impl DateTimeParser for ProductIdParser {
    fn parse(&self, item: &str) -> std::result::Result<Timestamp, ParseError> {
        parse_by_regex(&PRODUCT_ID, item)
    }
}

/// Paths whose file name contains `<prefix>_<YYYYmmdd>_<HH>_<MM>`.
#[derive(Copy, Clone, Debug, Default)]
pub struct FileNameParser;

impl DateTimeParser for FileNameParser {
    fn parse(&self, item: &str) -> std::result::Result<Timestamp, ParseError> {
        parse_by_regex(&FILE_NAME, item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_drops_seconds() {
        let ts = ProductIdParser
            .parse("MSG3-SEVI-MSG15-0100-NA-20150731221240.036000000Z-NA")
            .unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2015, 7, 31, 22, 12, 0).unwrap());
    }

    #[test]
    fn regex_needs_three_groups() {
        let p = RegexParser::new(r"(\d{4})(\d{2})").unwrap();
        let err = p.parse("202001").unwrap_err();
        assert!(err.reason.contains("capture groups"));
    }

    #[test]
    fn invalid_calendar_date_is_a_parse_error() {
        let p = RegexParser::new(r"(\d{4})(\d{2})(\d{2})").unwrap();
        let err = p.parse("20230231").unwrap_err();
        assert_eq!(err.item, "20230231");
    }
}

// tests/config.rs
use std::fs::File;
use std::io::Write;

use anyhow::Result;
use chrono::TimeDelta;
use tempfile::NamedTempFile;
use timeslice::testing::{RecordingLogger, hourly_list, timestamp};
use timeslice::*;

const FULL: &str = r#"{
    "start": "2020-01-01T00:00:00Z",
    "end": "2020-01-04T00:00:00Z",
    "batch_interval": {"days": 1},
    "order": "ascending",
    "expected_total": 72,
    "log_context": "Nightly"
}"#;

#[test]
fn full_document() -> Result<()> {
    let cfg = BatchQueryConfig::from_json_str(FULL)?;
    assert_eq!(cfg.start, timestamp(2020, 1, 1, 0));
    assert_eq!(cfg.period(), Period::new(timestamp(2020, 1, 1, 0), timestamp(2020, 1, 4, 0)));
    assert_eq!(cfg.interval()?, Interval::days(1));
    assert_eq!(cfg.order, Order::Ascending);
    assert_eq!(cfg.expected_total, Some(72));
    assert_eq!(cfg.log_context.as_deref(), Some("Nightly"));
    Ok(())
}

#[test]
fn defaults_for_optional_fields() -> Result<()> {
    let cfg = BatchQueryConfig::from_json_str(
        r#"{"start": "2020-01-01T00:00:00Z", "end": "2020-01-02T00:00:00Z", "batch_interval": {"hours": 6}}"#,
    )?;
    assert_eq!(cfg.order, Order::Descending);
    assert_eq!(cfg.expected_total, None);
    assert_eq!(cfg.log_context, None);
    Ok(())
}

#[test]
fn interval_spec_combines_and_rounds() -> Result<()> {
    let spec: IntervalSpec = serde_json::from_str(r#"{"days": 1, "hours": 12}"#)?;
    assert_eq!(spec.to_interval()?, Interval::hours(36));

    let spec: IntervalSpec = serde_json::from_str(r#"{"hours": 1.5}"#)?;
    assert_eq!(Interval::try_from(&spec)?, Interval::minutes(90));

    let spec: IntervalSpec = serde_json::from_str(r#"{"seconds": 0.0004}"#)?;
    assert!(spec.to_interval()?.is_zero());
    Ok(())
}

#[test]
fn interval_spec_rejects_empty_and_unknown_keys() {
    let empty: IntervalSpec = serde_json::from_str("{}").unwrap();
    assert!(matches!(empty.to_interval(), Err(TimesliceError::Config(_))));

    assert!(serde_json::from_str::<IntervalSpec>(r#"{"months": 1}"#).is_err());
}

#[test]
fn invalid_documents() {
    let unknown = r#"{"start": "2020-01-01T00:00:00Z", "end": "2020-01-02T00:00:00Z", "batch_interval": {"days": 1}, "colour": "red"}"#;
    assert!(matches!(BatchQueryConfig::from_json_str(unknown), Err(TimesliceError::Json(_))));

    let reversed = r#"{"start": "2020-01-02T00:00:00Z", "end": "2020-01-01T00:00:00Z", "batch_interval": {"days": 1}}"#;
    assert!(matches!(
        BatchQueryConfig::from_json_str(reversed),
        Err(TimesliceError::Ordering { .. })
    ));

    let negative = r#"{"start": "2020-01-01T00:00:00Z", "end": "2020-01-02T00:00:00Z", "batch_interval": {"hours": -2}}"#;
    assert!(matches!(BatchQueryConfig::from_json_str(negative), Err(TimesliceError::Config(_))));

    let empty_interval = r#"{"start": "2020-01-01T00:00:00Z", "end": "2020-01-02T00:00:00Z", "batch_interval": {}}"#;
    assert!(matches!(
        BatchQueryConfig::from_json_str(empty_interval),
        Err(TimesliceError::Config(_))
    ));

    assert!(matches!(BatchQueryConfig::from_json_str("not json"), Err(TimesliceError::Json(_))));
}

#[test]
fn read_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(FULL.as_bytes())?;
    file.flush()?;

    let cfg = BatchQueryConfig::from_reader(File::open(file.path())?)?;
    assert_eq!(cfg, BatchQueryConfig::from_json_str(FULL)?);
    Ok(())
}

#[test]
fn run_drives_the_query() -> Result<()> {
    let logger = RecordingLogger::install();
    logger.clear();

    let cfg = BatchQueryConfig::from_json_str(FULL)?;
    let list = hourly_list(72);
    let mut run = cfg.run(&list)?;
    let batches: Vec<(Vec<String>, usize)> = run.by_ref().collect::<timeslice::Result<_>>()?;

    assert_eq!(batches.iter().map(|(_, n)| *n).collect::<Vec<_>>(), vec![24, 24, 24]);
    assert_eq!(batches[0].0[0], "seviri_20200101_00_00.nc");
    assert!(run.is_finished());
    assert_eq!(run.mismatch(), None);
    assert!(logger.warnings().is_empty());
    let infos: Vec<_> = logger
        .records()
        .into_iter()
        .filter(|r| r.level == log::Level::Info)
        .collect();
    assert_eq!(infos.len(), 1 + 2 * 3 + 1);
    assert!(infos.iter().all(|r| r.message.starts_with("Nightly -- ")));
    Ok(())
}

#[test]
fn run_reports_a_short_list() -> Result<()> {
    let logger = RecordingLogger::install();
    logger.clear();

    let cfg = BatchQueryConfig::from_json_str(FULL)?;
    // one hour missing at the tail
    let list = IndexedList::new((0..71).collect::<Vec<i64>>(), |h| Ok(timestamp(2020, 1, 1, 0) + TimeDelta::hours(*h)))?;
    let mut run = cfg.run(&list)?;
    run.by_ref().for_each(drop);

    assert_eq!(run.mismatch(), Some((72, 71)));
    assert_eq!(logger.warnings(), vec!["Expected 72 item but retrieved 71!".to_string()]);
    Ok(())
}

// tests/query.rs
use anyhow::Result;
use chrono::TimeDelta;
use timeslice::testing::*;
use timeslice::*;

fn two_days() -> Period {
    Period::new(timestamp(2022, 1, 1, 0), timestamp(2022, 1, 3, 0))
}

#[test]
fn mismatched_total_warns_but_yields_every_batch() -> Result<()> {
    let logger = RecordingLogger::install();
    logger.clear();

    let query = ScriptedQuery::new([5, 3]);
    let mut run = query.run_in_batches(&two_days(), Interval::days(1), Order::Descending, Some(10))?;
    let counts: Vec<usize> = run.by_ref().map(|r| r.map(|(_, n)| n)).collect::<Result<_>>()?;

    assert_eq!(counts, vec![5, 3]);
    assert!(run.is_finished());
    assert_eq!(run.total_retrieved(), 8);
    assert_eq!(run.mismatch(), Some((10, 8)));
    assert_eq!(logger.warnings(), vec!["Expected 10 item but retrieved 8!".to_string()]);
    Ok(())
}

#[test]
fn matching_total_does_not_warn() -> Result<()> {
    let logger = RecordingLogger::install();
    logger.clear();

    let query = ScriptedQuery::new([5, 3]);
    let mut run = query.run_in_batches(&two_days(), Interval::days(1), Order::Ascending, Some(8))?;
    for batch in run.by_ref() {
        batch?;
    }
    assert_eq!(run.mismatch(), None);
    assert!(logger.warnings().is_empty());
    Ok(())
}

#[test]
fn batches_are_queried_lazily_in_order() -> Result<()> {
    let query = ScriptedQuery::new([1, 1, 1]);
    let outer = Period::new(timestamp(2022, 1, 1, 0), timestamp(2022, 1, 1, 3));
    let mut run = query.run_in_batches(&outer, Interval::hours(1), Order::Descending, None)?;
    assert!(query.calls().is_empty());

    let (first, count) = run.next().unwrap()?;
    assert_eq!(count, 1);
    assert_eq!(first.period, Period::new(timestamp(2022, 1, 1, 2), timestamp(2022, 1, 1, 3)));
    assert_eq!(query.calls().len(), 1);

    assert_eq!(run.count(), 2);
    assert_eq!(
        query.calls(),
        vec![
            Period::new(timestamp(2022, 1, 1, 2), timestamp(2022, 1, 1, 3)),
            Period::new(timestamp(2022, 1, 1, 1), timestamp(2022, 1, 1, 2)),
            Period::new(timestamp(2022, 1, 1, 0), timestamp(2022, 1, 1, 1)),
        ]
    );
    Ok(())
}

#[test]
fn collaborator_error_ends_the_run() -> Result<()> {
    let logger = RecordingLogger::install();
    logger.clear();

    let query = ScriptedQuery::new([4]).then_fail();
    let outer = Period::new(timestamp(2022, 1, 1, 0), timestamp(2022, 1, 4, 0));
    let mut run = query.run_in_batches(&outer, Interval::days(1), Order::Ascending, Some(100))?;

    assert_eq!(run.next().unwrap()?.1, 4);
    let err = run.next().unwrap().unwrap_err();
    assert!(err.to_string().contains("scripted failure"));
    assert!(run.next().is_none());
    assert!(run.next().is_none());

    assert!(!run.is_finished());
    assert_eq!(run.total_retrieved(), 4);
    assert_eq!(query.calls().len(), 2);
    // no total check after a failure
    assert!(logger.warnings().is_empty());
    Ok(())
}

#[test]
fn invalid_outer_period_fails_before_querying() {
    let query = ScriptedQuery::new([1]);

    let reversed = Period::new(timestamp(2022, 1, 3, 0), timestamp(2022, 1, 1, 0));
    let err = query
        .run_in_batches(&reversed, Interval::days(1), Order::Descending, None)
        .unwrap_err();
    assert!(matches!(err, TimesliceError::Ordering { .. }));

    let open = Period::starting_at(timestamp(2022, 1, 1, 0));
    let err = query
        .run_in_batches(&open, Interval::days(1), Order::Descending, None)
        .unwrap_err();
    assert!(matches!(err, TimesliceError::Construction(_)));

    let err = query
        .run_in_batches(&two_days(), Interval::days(-1), Order::Descending, None)
        .unwrap_err();
    assert!(matches!(err, TimesliceError::Construction(_)));

    assert!(query.calls().is_empty());
}

#[test]
fn pagination_total_matches_a_single_query() -> Result<()> {
    let list = hourly_list(24 * 9 + 5);
    let outer = Period::new(list.first_timestamp(), list.last_timestamp() + TimeDelta::hours(1));
    let whole = list.size_of(&list.query(&outer)?);
    assert_eq!(whole, list.len());

    for width in [Interval::hours(1), Interval::hours(7), Interval::days(1), Interval::days(4), Interval::weeks(3)] {
        for order in [Order::Ascending, Order::Descending] {
            let sum: usize = list
                .run_in_batches(&outer, width, order, Some(whole))?
                .map(|r| r.map(|(_, n)| n))
                .sum::<timeslice::Result<usize>>()?;
            assert_eq!(sum, whole, "width={width} order={order:?}");
        }
    }
    Ok(())
}

#[test]
fn checked_run_takes_expected_total_from_the_outer_query() -> Result<()> {
    let logger = RecordingLogger::install();
    logger.clear();

    let query = ScriptedQuery::new([9, 5, 3]);
    let mut run = query.run_in_batches_checked(&two_days(), Interval::days(1), Order::Descending)?;
    assert_eq!(run.expected_total(), Some(9));
    assert_eq!(query.calls(), vec![two_days()]);

    for batch in run.by_ref() {
        batch?;
    }
    assert_eq!(run.mismatch(), Some((9, 8)));
    assert_eq!(logger.warnings().len(), 1);
    Ok(())
}

#[test]
fn checked_run_validates_before_the_outer_query() {
    let query = ScriptedQuery::new([9]);
    let reversed = Period::new(timestamp(2022, 1, 3, 0), timestamp(2022, 1, 1, 0));
    let err = query
        .run_in_batches_checked(&reversed, Interval::days(1), Order::Descending)
        .unwrap_err();
    assert!(matches!(err, CheckedQueryError::Batching(TimesliceError::Ordering { .. })));
    assert!(query.calls().is_empty());

    let failing = ScriptedQuery::new(Vec::<usize>::new()).then_fail();
    let err = failing
        .run_in_batches_checked(&two_days(), Interval::days(1), Order::Descending)
        .unwrap_err();
    assert!(matches!(err, CheckedQueryError::Query(_)));
}

#[test]
fn progress_is_logged_with_the_query_context() -> Result<()> {
    let logger = RecordingLogger::install();
    logger.clear();

    let query = ScriptedQuery::new([2, 1]).with_log_context("Archive");
    let run = query.run_in_batches(&two_days(), Interval::days(1), Order::Ascending, None)?;
    assert_eq!(run.count(), 2);

    let infos: Vec<String> = logger
        .records()
        .into_iter()
        .filter(|r| r.level == log::Level::Info)
        .map(|r| r.message)
        .collect();
    assert!(infos[0].starts_with(
        "Archive -- Fetch period=['2022-01-01T00:00:00+00:00', '2022-01-03T00:00:00+00:00') and batch_interval="
    ));
    assert!(infos.contains(
        &"Archive -- Fetch period=['2022-01-01T00:00:00+00:00', '2022-01-02T00:00:00+00:00') : retrieved 2 items.".to_string()
    ));
    assert_eq!(
        infos.last().map(String::as_str),
        Some("Archive -- Fetch period=['2022-01-01T00:00:00+00:00', '2022-01-03T00:00:00+00:00') : retrieved 3 items in total.")
    );
    Ok(())
}

#[test]
fn run_context_can_be_overridden() -> Result<()> {
    let logger = RecordingLogger::install();
    logger.clear();

    let query = ScriptedQuery::new([1, 1]);
    let run = query
        .run_in_batches(&two_days(), Interval::days(1), Order::Ascending, None)?
        .with_log_context("Override");
    assert_eq!(run.count(), 2);

    let messages: Vec<_> = logger.records().into_iter().map(|r| r.message).collect();
    assert_eq!(messages.len(), 6);
    assert!(messages.iter().all(|m| m.starts_with("Override -- ")));
    Ok(())
}

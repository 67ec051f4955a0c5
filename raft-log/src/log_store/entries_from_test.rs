use pretty_assertions::assert_eq;

use crate::log_store::LogStore;
use crate::testing::blank;
use crate::testing::RecordingHost;

fn log_123() -> LogStore {
    let mut log = LogStore::new();
    log.append(blank(0, 1));
    log.append(blank(0, 2));
    log.append(blank(0, 3));
    log
}

#[test]
fn test_entries_from_returns_suffix() -> anyhow::Result<()> {
    let log = log_123();

    assert_eq!(vec![blank(0, 1), blank(0, 2), blank(0, 3)], log.entries_from(1));
    assert_eq!(vec![blank(0, 2), blank(0, 3)], log.entries_from(2));
    assert_eq!(vec![blank(0, 3)], log.entries_from(3));

    Ok(())
}

#[test]
fn test_entries_from_out_of_range_is_empty() -> anyhow::Result<()> {
    let log = log_123();

    assert!(log.entries_from(0).is_empty());
    assert!(log.entries_from(4).is_empty());

    Ok(())
}

#[test]
fn test_entries_from_below_base_is_empty() -> anyhow::Result<()> {
    let mut log = log_123();
    let mut host = RecordingHost::new();

    log.poll_head(&mut host);

    assert!(log.entries_from(1).is_empty());
    assert_eq!(vec![blank(0, 2), blank(0, 3)], log.entries_from(2));

    Ok(())
}

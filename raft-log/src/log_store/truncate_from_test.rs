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
fn test_truncate_from_middle_pops_tail_first() -> anyhow::Result<()> {
    let mut log = log_123();
    let mut host = RecordingHost::new();

    log.truncate_from(&mut host, 2);

    assert_eq!(1, log.count());
    assert_eq!(1, log.entry_at(1).unwrap().id);
    assert_eq!(None, log.entry_at(2));
    assert_eq!(None, log.entry_at(3));
    assert_eq!(vec![(3, 3), (2, 2)], host.popped);

    Ok(())
}

#[test]
fn test_truncate_from_out_of_range_is_noop() -> anyhow::Result<()> {
    let mut log = log_123();
    let mut host = RecordingHost::new();

    log.truncate_from(&mut host, 0);
    log.truncate_from(&mut host, 4);

    assert_eq!(3, log.count());
    assert!(host.popped.is_empty());

    Ok(())
}

#[test]
fn test_truncate_from_first_idx_empties_log() -> anyhow::Result<()> {
    let mut log = log_123();
    let mut host = RecordingHost::new();

    log.truncate_from(&mut host, 1);

    assert_eq!(0, log.count());
    assert_eq!(0, log.current_idx());
    assert_eq!(vec![(3, 3), (2, 2), (1, 1)], host.popped);

    Ok(())
}

#[test]
fn test_truncate_from_below_base_is_noop() -> anyhow::Result<()> {
    let mut log = log_123();
    let mut host = RecordingHost::new();

    log.poll_head(&mut host);

    log.truncate_from(&mut host, 1);

    assert_eq!(2, log.count());
    assert!(host.popped.is_empty());

    Ok(())
}

use crate::log_store::LogStore;
use crate::testing::blank;
use crate::testing::RecordingHost;

#[test]
fn test_pop_tail_removes_youngest_first() -> anyhow::Result<()> {
    let mut log = LogStore::new();
    let mut host = RecordingHost::new();

    log.append(blank(0, 1));
    log.append(blank(0, 2));
    log.append(blank(0, 3));

    assert_eq!(3, log.pop_tail(&mut host).unwrap().id);
    assert_eq!(2, log.count());
    assert_eq!(None, log.entry_at(3));

    assert_eq!(2, log.pop_tail(&mut host).unwrap().id);
    assert_eq!(1, log.count());
    assert_eq!(None, log.entry_at(2));

    assert_eq!(1, log.pop_tail(&mut host).unwrap().id);
    assert_eq!(0, log.count());
    assert_eq!(None, log.entry_at(1));

    assert_eq!(vec![(3, 3), (2, 2), (1, 1)], host.popped);

    Ok(())
}

#[test]
fn test_pop_tail_on_empty_log() -> anyhow::Result<()> {
    let mut log = LogStore::new();
    let mut host = RecordingHost::new();

    assert_eq!(None, log.pop_tail(&mut host));
    assert!(host.popped.is_empty());

    Ok(())
}

#[test]
fn test_pop_tail_exposes_previous_term() -> anyhow::Result<()> {
    let mut log = LogStore::new();
    let mut host = RecordingHost::new();

    log.append(blank(1, 1));
    log.append(blank(2, 2));

    log.pop_tail(&mut host);

    assert_eq!(Some(1), log.last_term());

    Ok(())
}

#[test]
fn test_append_then_pop_restores_log() -> anyhow::Result<()> {
    let mut log = LogStore::new();
    let mut host = RecordingHost::new();

    log.append(blank(0, 1));
    log.append(blank(0, 2));

    let before = log.clone();

    log.append(blank(1, 3));
    let popped = log.pop_tail(&mut host).unwrap();

    assert_eq!(before, log);
    assert_eq!(3, popped.id);
    assert_eq!(vec![(3, 3)], host.popped);

    Ok(())
}

use crate::log_store::LogStore;
use crate::testing::blank;

#[test]
fn test_new_log_is_empty() -> anyhow::Result<()> {
    let log = LogStore::new();

    assert_eq!(0, log.count());
    assert!(log.is_empty());
    assert_eq!(0, log.current_idx());
    assert_eq!(1, log.first_idx());
    assert_eq!(None, log.last_term());
    assert_eq!(None, log.peek_tail());

    Ok(())
}

#[test]
fn test_append_assigns_next_index() -> anyhow::Result<()> {
    let mut log = LogStore::new();

    log.append(blank(0, 1));
    assert_eq!(1, log.count());
    assert_eq!(1, log.current_idx());

    log.append(blank(0, 2));
    log.append(blank(0, 3));

    assert_eq!(3, log.count());
    assert_eq!(3, log.current_idx());
    assert_eq!(1, log.first_idx());
    assert_eq!(3, log.peek_tail().unwrap().id);

    Ok(())
}

#[test]
fn test_last_term_reads_tail_entry() -> anyhow::Result<()> {
    let mut log = LogStore::new();

    log.append(blank(1, 1));
    assert_eq!(Some(1), log.last_term());

    log.append(blank(3, 2));
    assert_eq!(Some(3), log.last_term());

    Ok(())
}

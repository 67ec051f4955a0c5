use validit::Valid;
use validit::Validate;

use crate::committer::LogCommitter;
use crate::testing::blank;
use crate::testing::RecordingHost;

#[test]
fn test_validate_accepts_consistent_state() -> anyhow::Result<()> {
    let mut lc = LogCommitter::new();
    let mut host = RecordingHost::new();

    assert!(lc.validate().is_ok());

    lc.append_entry(&mut host, blank(0, 1))?;
    lc.append_entry(&mut host, blank(1, 2))?;
    lc.advance_commit(1);

    assert!(lc.validate().is_ok());

    Ok(())
}

#[test]
fn test_validate_rejects_commit_beyond_log() -> anyhow::Result<()> {
    let mut lc = LogCommitter::new();
    lc.commit_idx = 3;

    assert!(lc.validate().is_err());

    Ok(())
}

#[test]
fn test_validate_rejects_applied_beyond_commit() -> anyhow::Result<()> {
    let mut lc = LogCommitter::new();
    let mut host = RecordingHost::new();

    lc.append_entry(&mut host, blank(0, 1))?;
    lc.advance_commit(1);
    lc.last_applied_idx = 2;

    assert!(lc.validate().is_err());

    Ok(())
}

#[test]
fn test_valid_wrapper_panics_on_invalid_state() -> anyhow::Result<()> {
    let res = std::panic::catch_unwind(|| {
        let mut lc = Valid::new(LogCommitter::new());
        lc.commit_idx = 3;
        // The next access trips the validation.
        let _ = lc.commit_idx();
    });

    assert!(res.is_err());

    Ok(())
}

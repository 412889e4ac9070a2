use anyhow::{bail, Result};
use bbscope_types::{ChangeType, ScopeChange};

/// Assert that `changes` contains exactly one row of `change_type` for
/// `target`, and return it for further inspection.
pub fn assert_single_change<'a>(
    changes: &'a [ScopeChange],
    target: &str,
    change_type: ChangeType,
) -> Result<&'a ScopeChange> {
    let matches: Vec<&ScopeChange> = changes
        .iter()
        .filter(|c| c.target_normalized == target && c.change_type == change_type)
        .collect();

    match matches.len() {
        1 => Ok(matches[0]),
        0 => bail!("no {change_type:?} change found for target {target}"),
        n => bail!("expected exactly one {change_type:?} change for {target}, found {n}"),
    }
}

/// Assert that no change row exists for `target`.
pub fn assert_no_change(changes: &[ScopeChange], target: &str) -> Result<()> {
    if changes.iter().any(|c| c.target_normalized == target) {
        bail!("expected no change for target {target}, but found one");
    }
    Ok(())
}

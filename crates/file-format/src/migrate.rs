use crate::errors::LoadError;
use crate::save::WingRecord;

/// Apply format migrations from `from_version` to `to_version`.
///
/// Migrations are applied sequentially: v1→v2, v2→v3, etc.
/// Version 1 is the only version so far.
pub fn migrate(
    wings: Vec<WingRecord>,
    from_version: u32,
    to_version: u32,
) -> Result<Vec<WingRecord>, LoadError> {
    if from_version != to_version {
        return Err(LoadError::MigrationFailed {
            from: from_version,
            to: to_version,
            reason: format!(
                "no migration path from v{} to v{}",
                from_version, to_version
            ),
        });
    }
    Ok(wings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_version_is_identity() {
        assert!(migrate(Vec::new(), 1, 1).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_path_fails() {
        let err = migrate(Vec::new(), 0, 1).unwrap_err();
        assert_eq!(
            err,
            LoadError::MigrationFailed {
                from: 0,
                to: 1,
                reason: "no migration path from v0 to v1".into(),
            }
        );
    }
}

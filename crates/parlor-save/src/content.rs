//! Reconciliation between what a save contains and what the loaded game
//! defines. Counts may legitimately differ after a game update; the caller
//! decides through [`RestoreFlags`] how much divergence to accept.

use crate::error::{Result, SaveError};
use crate::flags::RestoreFlags;

/// Applies the mismatch policy to an already-detected divergence.
///
/// Divergences the policy does not allow become [`SaveError::GameContentMismatch`].
/// Allowed ones are logged and recorded in the outcome bits of `flags`; a
/// save with less content than the game additionally requires
/// [`RestoreFlags::CLEAR_DATA`], since applying it over live data would leave
/// stale leftovers behind.
fn handle_content_mismatch(
    save_count: u32,
    game_count: u32,
    text: String,
    flags: &mut RestoreFlags,
) -> Result<()> {
    if (save_count > game_count && !flags.contains(RestoreFlags::ALLOW_MISMATCH_EXTRA))
        || (save_count < game_count && !flags.contains(RestoreFlags::ALLOW_MISMATCH_LESS))
    {
        return Err(SaveError::GameContentMismatch(text));
    }

    tracing::warn!("restored save mismatches the game: {text}");

    if save_count > game_count {
        flags.insert(RestoreFlags::EXTRA_DATA_IN_SAVE);
    } else {
        flags.insert(RestoreFlags::MISSING_DATA_IN_SAVE);
        if !flags.contains(RestoreFlags::CLEAR_DATA) {
            return Err(SaveError::RequireClearReload);
        }
    }
    Ok(())
}

/// Compares an object count found in the save against the game's and applies
/// the mismatch policy. Returns the save's count, which is what the reader
/// must consume regardless of the game's shape.
pub fn assert_game_content(
    save_count: u32,
    game_count: u32,
    content: &str,
    flags: &mut RestoreFlags,
) -> Result<u32> {
    if save_count == game_count {
        return Ok(save_count);
    }
    let text =
        format!("Mismatching number of {content} (game: {game_count}, save: {save_count}).");
    handle_content_mismatch(save_count, game_count, text, flags)?;
    Ok(save_count)
}

/// [`assert_game_content`] for counts nested under one game object, so the
/// report can say which object diverged.
pub fn assert_game_object_content(
    save_count: u32,
    game_count: u32,
    content: &str,
    obj_type: &str,
    obj_id: usize,
    flags: &mut RestoreFlags,
) -> Result<u32> {
    if save_count == game_count {
        return Ok(save_count);
    }
    let text = format!(
        "Mismatching number of {content}, {obj_type} #{obj_id} (game: {game_count}, save: {save_count})."
    );
    handle_content_mismatch(save_count, game_count, text, flags)?;
    Ok(save_count)
}

/// [`assert_game_object_content`] two levels deep.
#[allow(clippy::too_many_arguments)]
pub fn assert_game_object_content2(
    save_count: u32,
    game_count: u32,
    content: &str,
    obj1_type: &str,
    obj1_id: usize,
    obj2_type: &str,
    obj2_id: usize,
    flags: &mut RestoreFlags,
) -> Result<u32> {
    if save_count == game_count {
        return Ok(save_count);
    }
    let text = format!(
        "Mismatching number of {content}, {obj1_type} #{obj1_id}, {obj2_type} #{obj2_id} (game: {game_count}, save: {save_count})."
    );
    handle_content_mismatch(save_count, game_count, text, flags)?;
    Ok(save_count)
}

/// Count comparison where no divergence is ever acceptable, whatever the
/// restore flags say.
pub fn assert_game_content_strict(save_count: u32, game_count: u32, content: &str) -> Result<()> {
    if save_count == game_count {
        return Ok(());
    }
    Err(SaveError::GameContentMismatch(format!(
        "Mismatching number of {content} (game: {game_count}, save: {save_count})."
    )))
}

/// The save refers to a named object the game does not define.
pub fn extra_content_error(kind: &str, name: &str) -> SaveError {
    SaveError::GameContentMismatch(format!(
        "Extra {kind} found in save that does not exist in the game: {name}."
    ))
}

/// The game defines a named object the save has no data for.
pub fn missing_content_error(kind: &str, name: &str) -> SaveError {
    SaveError::GameContentMismatch(format!(
        "Save is missing a {kind} that exists in the game: {name}."
    ))
}

/// Rejects counts above a fixed engine capacity. Not subject to the
/// mismatch policy: exceeding a hard limit means the save cannot be loaded
/// by this engine at all.
pub fn assert_compat_limit(count: i64, max: i64, content: &str) -> Result<()> {
    if count <= max {
        return Ok(());
    }
    Err(SaveError::IncompatibleEngine(format!(
        "Incompatible number of {content} (count: {count}, max: {max})."
    )))
}

/// Rejects identifiers outside a fixed engine range. Like
/// [`assert_compat_limit`], never bypassed by restore flags.
pub fn assert_compat_range(value: i64, min: i64, max: i64, content: &str) -> Result<()> {
    if value >= min && value <= max {
        return Ok(());
    }
    Err(SaveError::IncompatibleEngine(format!(
        "Incompatible {content} (id: {value}, range: {min} - {max})."
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_counts_succeed_and_leave_flags_untouched() {
        let mut flags = RestoreFlags::empty();
        assert_eq!(assert_game_content(4, 4, "Characters", &mut flags).unwrap(), 4);
        assert_eq!(flags, RestoreFlags::empty());
    }

    #[test]
    fn extra_content_is_rejected_by_default() {
        let mut flags = RestoreFlags::empty();
        let err = assert_game_content(5, 3, "Characters", &mut flags).unwrap_err();
        match err {
            SaveError::GameContentMismatch(text) => {
                assert_eq!(text, "Mismatching number of Characters (game: 3, save: 5).");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn allowed_extra_content_records_the_outcome() {
        let mut flags = RestoreFlags::ALLOW_MISMATCH_EXTRA;
        assert_eq!(assert_game_content(5, 3, "Characters", &mut flags).unwrap(), 5);
        assert!(flags.contains(RestoreFlags::EXTRA_DATA_IN_SAVE));
        assert!(!flags.contains(RestoreFlags::MISSING_DATA_IN_SAVE));
    }

    #[test]
    fn allowed_missing_content_still_requires_clear_data() {
        let mut flags = RestoreFlags::ALLOW_MISMATCH_LESS;
        let err = assert_game_content(3, 5, "Characters", &mut flags).unwrap_err();
        assert!(matches!(err, SaveError::RequireClearReload));
        // The outcome bit is recorded even though the restore then fails.
        assert!(flags.contains(RestoreFlags::MISSING_DATA_IN_SAVE));
    }

    #[test]
    fn allowed_missing_content_with_clear_data_succeeds() {
        let mut flags = RestoreFlags::ALLOW_MISMATCH_LESS | RestoreFlags::CLEAR_DATA;
        assert_eq!(assert_game_content(3, 5, "Characters", &mut flags).unwrap(), 3);
        assert!(flags.contains(RestoreFlags::MISSING_DATA_IN_SAVE));
    }

    /// Every policy combination against every count relation.
    #[test]
    fn mismatch_decision_table() {
        let policies = [
            RestoreFlags::empty(),
            RestoreFlags::ALLOW_MISMATCH_EXTRA,
            RestoreFlags::ALLOW_MISMATCH_LESS,
            RestoreFlags::CLEAR_DATA,
            RestoreFlags::ALLOW_MISMATCH_EXTRA | RestoreFlags::ALLOW_MISMATCH_LESS,
            RestoreFlags::ALLOW_MISMATCH_EXTRA | RestoreFlags::CLEAR_DATA,
            RestoreFlags::ALLOW_MISMATCH_LESS | RestoreFlags::CLEAR_DATA,
            RestoreFlags::ALLOW_MISMATCH_EXTRA
                | RestoreFlags::ALLOW_MISMATCH_LESS
                | RestoreFlags::CLEAR_DATA,
        ];
        let relations = [(3u32, 3u32), (5, 3), (2, 3)];

        for policy in policies {
            for (save, game) in relations {
                let mut flags = policy;
                let result = assert_game_content(save, game, "Widgets", &mut flags);

                if save == game {
                    assert_eq!(result.unwrap(), save);
                    assert_eq!(flags, policy);
                } else if save > game {
                    if policy.contains(RestoreFlags::ALLOW_MISMATCH_EXTRA) {
                        assert_eq!(result.unwrap(), save);
                        assert!(flags.contains(RestoreFlags::EXTRA_DATA_IN_SAVE));
                    } else {
                        assert!(
                            matches!(result, Err(SaveError::GameContentMismatch(_))),
                            "policy {policy:?}"
                        );
                    }
                } else if !policy.contains(RestoreFlags::ALLOW_MISMATCH_LESS) {
                    assert!(
                        matches!(result, Err(SaveError::GameContentMismatch(_))),
                        "policy {policy:?}"
                    );
                } else if policy.contains(RestoreFlags::CLEAR_DATA) {
                    assert_eq!(result.unwrap(), save);
                    assert!(flags.contains(RestoreFlags::MISSING_DATA_IN_SAVE));
                } else {
                    assert!(
                        matches!(result, Err(SaveError::RequireClearReload)),
                        "policy {policy:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn object_mismatch_names_the_object() {
        let mut flags = RestoreFlags::empty();
        let err = assert_game_object_content(2, 4, "Loops", "View", 3, &mut flags).unwrap_err();
        match err {
            SaveError::GameContentMismatch(text) => {
                assert_eq!(text, "Mismatching number of Loops, View #3 (game: 4, save: 2).");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err =
            assert_game_object_content2(1, 2, "Frame", "View", 0, "Loop", 5, &mut flags).unwrap_err();
        match err {
            SaveError::GameContentMismatch(text) => {
                assert_eq!(
                    text,
                    "Mismatching number of Frame, View #0, Loop #5 (game: 2, save: 1)."
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn strict_assert_never_consults_flags() {
        assert!(assert_game_content_strict(2, 2, "GUIs").is_ok());
        let err = assert_game_content_strict(3, 2, "GUIs").unwrap_err();
        assert!(matches!(err, SaveError::GameContentMismatch(_)));
    }

    #[test]
    fn capacity_checks_have_no_policy_escape() {
        assert!(assert_compat_limit(20, 20, "Dynamic Surfaces").is_ok());
        let err = assert_compat_limit(25, 20, "Dynamic Surfaces").unwrap_err();
        match err {
            SaveError::IncompatibleEngine(text) => {
                assert_eq!(text, "Incompatible number of Dynamic Surfaces (count: 25, max: 20).");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(assert_compat_range(299, 0, 299, "room index").is_ok());
        let err = assert_compat_range(300, 0, 299, "room index").unwrap_err();
        assert!(matches!(err, SaveError::IncompatibleEngine(_)));
    }

    #[test]
    fn named_content_errors_carry_the_name() {
        let err = extra_content_error("script module", "RoomLogic");
        assert_eq!(
            err.to_string(),
            "restored save does not match the game: Extra script module found in save that does not exist in the game: RoomLogic."
        );
        let err = missing_content_error("script module", "RoomLogic");
        assert!(matches!(err, SaveError::GameContentMismatch(_)));
    }
}

//! Container framing tests against hand-built byte streams: skipping,
//! truncation, version gating and size verification, independent of any
//! component codec's own format.

use std::io::Cursor;

use parlor_game::GameWorld;
use parlor_save::{
    read_all, ComponentRegistry, ComponentSelection, NullHeap, PreservedParams, RestoreContext,
    RestoreFlags, RestoredData, SaveError, SavePlugin, SaveVersion,
};

fn push_i32(buf: &mut Vec<u8>, value: i32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn push_i64(buf: &mut Vec<u8>, value: i64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn open_tag(buf: &mut Vec<u8>, name: &str) {
    buf.extend_from_slice(format!("<{name}>").as_bytes());
}

fn close_tag(buf: &mut Vec<u8>, name: &str) {
    buf.extend_from_slice(format!("</{name}>").as_bytes());
}

/// One component in the current (64-bit size) framing.
fn push_component(buf: &mut Vec<u8>, name: &str, version: i32, payload: &[u8]) {
    push_component_sized(buf, name, version, payload.len() as i64, payload);
}

/// Like [`push_component`] but with the declared size chosen by the test.
fn push_component_sized(
    buf: &mut Vec<u8>,
    name: &str,
    version: i32,
    declared_size: i64,
    payload: &[u8],
) {
    open_tag(buf, name);
    push_i32(buf, version);
    push_i64(buf, declared_size);
    buf.extend_from_slice(payload);
    close_tag(buf, name);
}

fn read_stream(
    bytes: &[u8],
    svg_version: SaveVersion,
    select: ComponentSelection,
    game: &mut GameWorld,
) -> (parlor_save::Result<()>, RestoredData) {
    read_stream_with_flags(bytes, svg_version, select, game, RestoreFlags::empty())
}

fn read_stream_with_flags(
    bytes: &[u8],
    svg_version: SaveVersion,
    select: ComponentSelection,
    game: &mut GameWorld,
    flags: RestoreFlags,
) -> (parlor_save::Result<()>, RestoredData) {
    let params = PreservedParams::from_game(game);
    let mut restored = RestoredData::with_flags(flags);
    let mut heap = NullHeap;
    let mut plugins: Vec<Box<dyn SavePlugin>> = Vec::new();
    let result = {
        let mut ctx = RestoreContext {
            game,
            params: &params,
            restored: &mut restored,
            heap: &mut heap,
            plugins: &mut plugins,
        };
        read_all(
            &mut Cursor::new(bytes),
            svg_version,
            select,
            &ComponentRegistry::new(),
            &mut ctx,
        )
    };
    (result, restored)
}

/// A "Dialogs" payload for a game with no dialogs: just the zero count.
fn empty_dialogs_payload() -> Vec<u8> {
    0i32.to_le_bytes().to_vec()
}

#[test]
fn empty_component_list_reads_clean() {
    let mut buf = Vec::new();
    open_tag(&mut buf, "Components");
    close_tag(&mut buf, "Components");

    let mut game = GameWorld::new();
    let (result, restored) = read_stream(
        &buf,
        SaveVersion::CURRENT,
        ComponentSelection::ALL,
        &mut game,
    );
    result.unwrap();
    assert_eq!(restored.restore_flags, RestoreFlags::empty());
}

#[test]
fn unknown_component_is_skipped_by_declared_size() {
    let mut buf = Vec::new();
    open_tag(&mut buf, "Components");
    // A component from some future engine; its payload would mean nothing
    // to this build.
    push_component(&mut buf, "Weather", 3, &[0xab; 23]);
    push_component(&mut buf, "Dialogs", 0, &empty_dialogs_payload());
    close_tag(&mut buf, "Components");

    let mut game = GameWorld::new();
    let (result, _) = read_stream(
        &buf,
        SaveVersion::CURRENT,
        ComponentSelection::ALL,
        &mut game,
    );
    result.unwrap();
}

#[test]
fn unselected_component_is_skipped_not_decoded() {
    // Payload bytes that would blow up the Dialogs codec if it ran.
    let mut buf = Vec::new();
    open_tag(&mut buf, "Components");
    push_component(&mut buf, "Dialogs", 0, &[0xff; 4]);
    close_tag(&mut buf, "Components");

    let mut game = GameWorld::new();
    let (result, _) = read_stream(
        &buf,
        SaveVersion::CURRENT,
        ComponentSelection::GAME_STATE,
        &mut game,
    );
    result.unwrap();

    let (result, _) = read_stream(
        &buf,
        SaveVersion::CURRENT,
        ComponentSelection::DIALOGS,
        &mut game,
    );
    assert!(result.is_err());
}

#[test]
fn missing_list_open_tag_is_rejected() {
    let mut game = GameWorld::new();
    let (result, _) = read_stream(
        b"not a component list",
        SaveVersion::CURRENT,
        ComponentSelection::ALL,
        &mut game,
    );
    assert!(matches!(result.unwrap_err(), SaveError::ListOpeningTagFormat));
}

#[test]
fn stream_ending_before_list_close_is_detected() {
    let mut buf = Vec::new();
    open_tag(&mut buf, "Components");
    push_component(&mut buf, "Dialogs", 0, &empty_dialogs_payload());
    // No </Components>.

    let mut game = GameWorld::new();
    let (result, _) = read_stream(
        &buf,
        SaveVersion::CURRENT,
        ComponentSelection::ALL,
        &mut game,
    );
    assert!(matches!(
        result.unwrap_err(),
        SaveError::ListClosingTagMissing
    ));
}

#[test]
fn component_version_above_supported_is_rejected() {
    let mut buf = Vec::new();
    open_tag(&mut buf, "Components");
    push_component(&mut buf, "Dialogs", 1, &empty_dialogs_payload());
    close_tag(&mut buf, "Components");

    let mut game = GameWorld::new();
    let (result, _) = read_stream(
        &buf,
        SaveVersion::CURRENT,
        ComponentSelection::ALL,
        &mut game,
    );
    match result.unwrap_err() {
        SaveError::Component {
            index,
            name,
            version,
            source,
            ..
        } => {
            assert_eq!(index, 0);
            assert_eq!(name, "Dialogs");
            assert_eq!(version, 1);
            assert!(matches!(
                *source,
                SaveError::UnsupportedComponentVersion {
                    saved: 1,
                    lowest: 0,
                    highest: 0,
                }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn component_version_below_lowest_is_rejected() {
    let mut buf = Vec::new();
    open_tag(&mut buf, "Components");
    push_component(&mut buf, "Characters", -1, &[0; 4]);
    close_tag(&mut buf, "Components");

    let mut game = GameWorld::new();
    let (result, _) = read_stream(
        &buf,
        SaveVersion::CURRENT,
        ComponentSelection::ALL,
        &mut game,
    );
    match result.unwrap_err() {
        SaveError::Component { source, .. } => assert!(matches!(
            *source,
            SaveError::UnsupportedComponentVersion { saved: -1, .. }
        )),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn oldest_supported_component_version_still_reads() {
    // A version 0 "Characters" payload for a characterless game is just the
    // zero count; the codec must take the legacy decode path without error.
    let mut buf = Vec::new();
    open_tag(&mut buf, "Components");
    push_component(&mut buf, "Characters", 0, &0i32.to_le_bytes());
    close_tag(&mut buf, "Components");

    let mut game = GameWorld::new();
    let (result, _) = read_stream(
        &buf,
        SaveVersion::CURRENT,
        ComponentSelection::ALL,
        &mut game,
    );
    result.unwrap();
}

#[test]
fn declared_size_must_match_bytes_consumed() {
    // Four meaningful payload bytes, four of padding: the codec stops early
    // and the framing check must notice.
    let mut payload = empty_dialogs_payload();
    payload.extend_from_slice(&[0; 4]);
    let mut buf = Vec::new();
    open_tag(&mut buf, "Components");
    push_component(&mut buf, "Dialogs", 0, &payload);
    close_tag(&mut buf, "Components");

    let mut game = GameWorld::new();
    let (result, _) = read_stream(
        &buf,
        SaveVersion::CURRENT,
        ComponentSelection::ALL,
        &mut game,
    );
    match result.unwrap_err() {
        SaveError::Component { source, .. } => assert!(matches!(
            *source,
            SaveError::ComponentSizeMismatch {
                expected: 8,
                actual: 4,
            }
        )),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn negative_size_cannot_be_skipped_or_decoded() {
    let mut buf = Vec::new();
    open_tag(&mut buf, "Components");
    push_component_sized(&mut buf, "Weather", 0, -1, &[]);
    close_tag(&mut buf, "Components");

    let mut game = GameWorld::new();
    let (result, _) = read_stream(
        &buf,
        SaveVersion::CURRENT,
        ComponentSelection::ALL,
        &mut game,
    );
    match result.unwrap_err() {
        SaveError::Component { source, .. } => {
            assert!(matches!(*source, SaveError::UnsupportedComponent(ref name) if name == "Weather"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let mut buf = Vec::new();
    open_tag(&mut buf, "Components");
    push_component_sized(&mut buf, "Dialogs", 0, -1, &[]);
    close_tag(&mut buf, "Components");

    let (result, _) = read_stream(
        &buf,
        SaveVersion::CURRENT,
        ComponentSelection::ALL,
        &mut game,
    );
    match result.unwrap_err() {
        SaveError::Component { source, .. } => {
            assert!(matches!(*source, SaveError::Corrupt(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn old_container_revision_uses_32bit_sizes() {
    let payload = empty_dialogs_payload();
    let mut buf = Vec::new();
    open_tag(&mut buf, "Components");
    open_tag(&mut buf, "Dialogs");
    push_i32(&mut buf, 0); // component version
    push_i32(&mut buf, payload.len() as i32);
    buf.extend_from_slice(&payload);
    close_tag(&mut buf, "Dialogs");
    close_tag(&mut buf, "Components");

    let mut game = GameWorld::new();
    let (result, _) = read_stream(
        &buf,
        SaveVersion::INITIAL,
        ComponentSelection::ALL,
        &mut game,
    );
    result.unwrap();

    // The same bytes under the current revision misparse the size field.
    let (result, _) = read_stream(
        &buf,
        SaveVersion::CURRENT,
        ComponentSelection::ALL,
        &mut game,
    );
    assert!(result.is_err());
}

#[test]
fn huge_view_count_errs_without_exhausting_memory() {
    // A corrupt count of -1 reads as four billion views. With extra content
    // allowed the count survives the mismatch check, so the codec must not
    // size anything from it; decoding has to fail on the missing records
    // instead.
    let mut buf = Vec::new();
    open_tag(&mut buf, "Components");
    push_component(&mut buf, "Views", 0, &(-1i32).to_le_bytes());
    close_tag(&mut buf, "Components");

    let mut game = GameWorld::new();
    let (result, _) = read_stream_with_flags(
        &buf,
        SaveVersion::CURRENT,
        ComponentSelection::ALL,
        &mut game,
        RestoreFlags::ALLOW_MISMATCH_EXTRA,
    );
    assert!(matches!(
        result.unwrap_err(),
        SaveError::Component { ref name, .. } if name == "Views"
    ));
}

#[test]
fn huge_script_module_count_errs_without_exhausting_memory() {
    let mut payload = Vec::new();
    payload.extend_from_slice(&0u32.to_le_bytes()); // global data length
    payload.extend_from_slice(&(-1i32).to_le_bytes()); // module count
    let mut buf = Vec::new();
    open_tag(&mut buf, "Components");
    push_component(&mut buf, "Script Modules", 1, &payload);
    close_tag(&mut buf, "Components");

    let mut game = GameWorld::new();
    let (result, _) = read_stream_with_flags(
        &buf,
        SaveVersion::CURRENT,
        ComponentSelection::ALL,
        &mut game,
        RestoreFlags::ALLOW_MISMATCH_EXTRA,
    );
    assert!(matches!(
        result.unwrap_err(),
        SaveError::Component { ref name, .. } if name == "Script Modules"
    ));
}

#[test]
fn component_errors_carry_position_in_the_list() {
    let mut buf = Vec::new();
    open_tag(&mut buf, "Components");
    push_component(&mut buf, "Dialogs", 0, &empty_dialogs_payload());
    push_component(&mut buf, "Views", 5, &[]);
    close_tag(&mut buf, "Components");
    // The second component starts right after the first one ends.
    let second_offset = "<Components>".len() as u64
        + ("<Dialogs>".len() + 4 + 8 + 4 + "</Dialogs>".len()) as u64;

    let mut game = GameWorld::new();
    let (result, _) = read_stream(
        &buf,
        SaveVersion::CURRENT,
        ComponentSelection::ALL,
        &mut game,
    );
    match result.unwrap_err() {
        SaveError::Component {
            index,
            name,
            offset,
            ..
        } => {
            assert_eq!(index, 1);
            assert_eq!(name, "Views");
            assert_eq!(offset, second_offset);
        }
        other => panic!("unexpected error: {other}"),
    }
}

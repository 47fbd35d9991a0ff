//! "Room States" and "Loaded Room State" components. Both embed the same
//! room-state record; the former covers every room the player has visited,
//! the latter the room they were in when the save was made, plus the
//! transient pieces (modified backgrounds, region overrides) that only make
//! sense for a loaded room.

use std::io::{Read, Seek, Write};

use parlor_game::{
    ObjectFlags, RoomObject, RoomState, CHAR_MOVELIST_OFFSET, MAX_ROOMS, MAX_ROOM_BG_FRAMES,
    MAX_ROOM_HOTSPOTS, MAX_ROOM_OBJECTS, MAX_ROOM_REGIONS, MAX_WALK_AREAS, MAX_WALK_BEHINDS,
};

use crate::content::{assert_compat_limit, assert_compat_range};
use crate::error::Result;
use crate::io::{ReadLeExt, WriteLeExt};
use crate::restore::{RestoreContext, SaveContext};
use crate::tag;

use super::{bitmap, move_lists, properties};

pub(crate) const VER_INITIAL: i32 = 0;
/// Object move lists no longer embedded; they travel in "Move Lists".
pub(crate) const VER_SPLIT_MOVELISTS: i32 = 1;
pub(crate) const VERSION: i32 = VER_SPLIT_MOVELISTS;
pub(crate) const LOWEST_VERSION: i32 = VER_INITIAL;

pub(crate) fn write_states<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    w.write_i32_le(MAX_ROOMS as i32)?;
    for (id, state) in ctx.game.room_states.iter().enumerate() {
        match state {
            Some(state) if state.been_here => {
                w.write_i32_le(id as i32)?;
                tag::write_tag(w, "RoomState", true)?;
                write_room_state(w, state)?;
                tag::write_tag(w, "RoomState", false)?;
            }
            _ => w.write_i32_le(-1)?,
        }
    }
    Ok(())
}

pub(crate) fn read_states<R: Read + Seek>(
    r: &mut R,
    version: i32,
    ctx: &mut RestoreContext<'_>,
) -> Result<()> {
    let count = r.read_i32_le()?;
    for _ in 0..count {
        let id = r.read_i32_le()?;
        // -1 marks a room never visited (or reset).
        if id == -1 {
            continue;
        }
        assert_compat_range(id as i64, 0, MAX_ROOMS as i64 - 1, "room index")?;
        tag::expect_tag(r, "RoomState", true)?;
        let state = read_room_state(r, version)?;
        tag::expect_tag(r, "RoomState", false)?;
        ctx.game.room_states[id as usize] = Some(state);
    }
    Ok(())
}

pub(crate) fn write_loaded<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    let game = ctx.game;
    w.write_i32_le(game.displayed_room)?;
    if game.displayed_room < 0 {
        return Ok(());
    }

    for (modified, frame) in game.play.raw_modified.iter().zip(&game.current_room_bg) {
        match frame {
            Some(image) if *modified => {
                w.write_bool(true)?;
                bitmap::write_bitmap(w, image)?;
            }
            _ => w.write_bool(false)?,
        }
    }
    match &game.raw_saved_screen {
        Some(image) => {
            w.write_bool(true)?;
            bitmap::write_bitmap(w, image)?;
        }
        None => w.write_bool(false)?,
    }

    for region in &game.current_room_regions {
        w.write_i32_le(region.light)?;
        w.write_i32_le(region.tint)?;
    }
    for area in &game.current_room_walk_areas {
        w.write_i32_le(area.scaling_far)?;
        w.write_i32_le(area.scaling_near)?;
    }

    w.write_i32_le(game.current_room_volume)?;

    // Temporary rooms have no slot in the room-state store, so their state
    // rides along with the save.
    let persistent = game.displayed_room < MAX_ROOMS as i32;
    w.write_bool(persistent)?;
    if !persistent {
        write_room_state(w, &game.temp_room)?;
    }
    Ok(())
}

pub(crate) fn read_loaded<R: Read + Seek>(
    r: &mut R,
    version: i32,
    ctx: &mut RestoreContext<'_>,
) -> Result<()> {
    ctx.restored.displayed_room = r.read_i32_le()?;
    if ctx.restored.displayed_room < 0 {
        return Ok(());
    }

    for i in 0..MAX_ROOM_BG_FRAMES {
        let modified = r.read_bool()?;
        ctx.game.play.raw_modified[i] = modified;
        ctx.restored.room_bg_frames[i] = if modified {
            Some(bitmap::read_bitmap(r)?)
        } else {
            None
        };
    }
    ctx.restored.raw_screen = if r.read_bool()? {
        Some(bitmap::read_bitmap(r)?)
    } else {
        None
    };

    for i in 0..MAX_ROOM_REGIONS {
        ctx.restored.room_light_levels[i] = r.read_i32_le()?;
        ctx.restored.room_tint_levels[i] = r.read_i32_le()?;
    }
    for i in 0..MAX_WALK_AREAS {
        ctx.restored.room_zoom_far[i] = r.read_i32_le()?;
        ctx.restored.room_zoom_near[i] = r.read_i32_le()?;
    }

    if version < VER_SPLIT_MOVELISTS {
        let count = r.read_i32_le()?;
        assert_compat_limit(count as i64, CHAR_MOVELIST_OFFSET as i64, "room object move lists")?;
        for i in 0..count.max(0) as usize {
            let move_list = move_lists::read_move_list(r, 0)?;
            if let Some(slot) = ctx.game.move_lists.get_mut(i) {
                *slot = move_list;
            }
        }
    }

    ctx.restored.room_volume = r.read_i32_le()?;

    if !r.read_bool()? {
        ctx.restored.temp_room = Some(read_room_state(r, version)?);
    }
    Ok(())
}

fn write_room_state<W: Write>(w: &mut W, state: &RoomState) -> Result<()> {
    w.write_i32_le(state.objects.len() as i32)?;
    for object in &state.objects {
        w.write_i32_le(object.x)?;
        w.write_i32_le(object.y)?;
        w.write_i32_le(object.sprite)?;
        w.write_i32_le(object.baseline)?;
        w.write_i32_le(object.view)?;
        w.write_i32_le(object.anim_loop)?;
        w.write_i32_le(object.frame)?;
        w.write_i32_le(object.cycling)?;
        w.write_i32_le(object.anim_speed)?;
        w.write_bool(object.visible)?;
        w.write_i32_le(object.moving)?;
        w.write_u32_le(object.flags.bits())?;
        w.write_i32_le(object.transparency)?;
    }

    w.write_i32_le(state.hotspots_enabled.len() as i32)?;
    for enabled in &state.hotspots_enabled {
        w.write_bool(*enabled)?;
    }
    w.write_i32_le(state.regions_enabled.len() as i32)?;
    for enabled in &state.regions_enabled {
        w.write_bool(*enabled)?;
    }
    w.write_i32_le(state.walk_behind_baselines.len() as i32)?;
    for baseline in &state.walk_behind_baselines {
        w.write_i32_le(*baseline)?;
    }
    properties::write_properties(w, &state.properties)
}

fn read_room_state<R: Read>(r: &mut R, _version: i32) -> Result<RoomState> {
    let mut state = RoomState {
        been_here: true,
        ..RoomState::default()
    };

    let object_count = r.read_i32_le()?;
    assert_compat_limit(object_count as i64, MAX_ROOM_OBJECTS as i64, "room objects")?;
    for _ in 0..object_count {
        state.objects.push(RoomObject {
            x: r.read_i32_le()?,
            y: r.read_i32_le()?,
            sprite: r.read_i32_le()?,
            baseline: r.read_i32_le()?,
            view: r.read_i32_le()?,
            anim_loop: r.read_i32_le()?,
            frame: r.read_i32_le()?,
            cycling: r.read_i32_le()?,
            anim_speed: r.read_i32_le()?,
            visible: r.read_bool()?,
            moving: r.read_i32_le()?,
            flags: ObjectFlags::from_bits_retain(r.read_u32_le()?),
            transparency: r.read_i32_le()?,
        });
    }

    let hotspot_count = r.read_i32_le()?;
    assert_compat_limit(hotspot_count as i64, MAX_ROOM_HOTSPOTS as i64, "room hotspots")?;
    for _ in 0..hotspot_count {
        state.hotspots_enabled.push(r.read_bool()?);
    }
    let region_count = r.read_i32_le()?;
    assert_compat_limit(region_count as i64, MAX_ROOM_REGIONS as i64, "room regions")?;
    for _ in 0..region_count {
        state.regions_enabled.push(r.read_bool()?);
    }
    let walk_behind_count = r.read_i32_le()?;
    assert_compat_limit(walk_behind_count as i64, MAX_WALK_BEHINDS as i64, "walk-behinds")?;
    for _ in 0..walk_behind_count {
        state.walk_behind_baselines.push(r.read_i32_le()?);
    }
    state.properties = properties::read_properties(r)?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SaveError;
    use std::io::Cursor;

    fn sample_room() -> RoomState {
        let mut state = RoomState {
            been_here: true,
            objects: vec![
                RoomObject {
                    x: 100,
                    y: 80,
                    sprite: 12,
                    visible: true,
                    flags: ObjectFlags::SOLID,
                    ..RoomObject::default()
                },
                RoomObject::default(),
            ],
            hotspots_enabled: vec![true, false, true],
            regions_enabled: vec![false, true],
            walk_behind_baselines: vec![40, 0, 120],
            ..RoomState::default()
        };
        state
            .properties
            .insert("lit".to_string(), "yes".to_string());
        state
    }

    #[test]
    fn room_state_round_trip() {
        let mut buf = Vec::new();
        write_room_state(&mut buf, &sample_room()).unwrap();
        let read = read_room_state(&mut Cursor::new(buf), VERSION).unwrap();
        assert_eq!(read, sample_room());
    }

    #[test]
    fn object_count_is_capacity_checked() {
        let mut buf = Vec::new();
        buf.write_i32_le(MAX_ROOM_OBJECTS as i32 + 1).unwrap();
        let err = read_room_state(&mut Cursor::new(buf), VERSION).unwrap_err();
        assert!(matches!(err, SaveError::IncompatibleEngine(_)));
    }
}

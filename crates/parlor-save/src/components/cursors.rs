//! "Mouse Cursors" component.

use std::io::{Read, Seek, Write};

use parlor_game::{CursorFlags, MouseCursor};

use crate::content::assert_game_content;
use crate::error::Result;
use crate::io::{ReadLeExt, WriteLeExt};
use crate::restore::{RestoreContext, SaveContext};

pub(crate) const VER_INITIAL: i32 = 0;
/// Per-cursor animation delay appended.
pub(crate) const VER_ANIM_DELAY: i32 = 1;
pub(crate) const VERSION: i32 = VER_ANIM_DELAY;
pub(crate) const LOWEST_VERSION: i32 = VER_INITIAL;

pub(crate) fn write<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    w.write_i32_le(ctx.game.cursors.len() as i32)?;
    for cursor in &ctx.game.cursors {
        w.write_i32_le(cursor.sprite)?;
        w.write_i32_le(cursor.hotspot_x)?;
        w.write_i32_le(cursor.hotspot_y)?;
        w.write_i32_le(cursor.view)?;
        w.write_u32_le(cursor.flags.bits())?;
        w.write_i32_le(cursor.animation_delay)?;
    }
    Ok(())
}

pub(crate) fn read<R: Read + Seek>(
    r: &mut R,
    version: i32,
    ctx: &mut RestoreContext<'_>,
) -> Result<()> {
    let count = assert_game_content(
        r.read_i32_le()? as u32,
        ctx.game.cursors.len() as u32,
        "Mouse Cursors",
        &mut ctx.restored.restore_flags,
    )?;
    ctx.restored.counts.cursors = count;

    for i in 0..count as usize {
        let mut cursor = MouseCursor {
            sprite: r.read_i32_le()?,
            hotspot_x: r.read_i32_le()?,
            hotspot_y: r.read_i32_le()?,
            view: r.read_i32_le()?,
            flags: CursorFlags::from_bits_retain(r.read_u32_le()?),
            animation_delay: 5,
        };
        if version >= VER_ANIM_DELAY {
            cursor.animation_delay = r.read_i32_le()?;
        }
        if let Some(slot) = ctx.game.cursors.get_mut(i) {
            *slot = cursor;
        }
    }
    Ok(())
}

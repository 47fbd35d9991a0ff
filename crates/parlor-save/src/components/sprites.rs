//! "Dynamic Sprites" and "Dynamic Surfaces" components. Sprite slots are
//! written sparsely (slot index + flags + image); the count and the highest
//! used slot go into a header that is only known once the table has been
//! walked, so the header is patched in afterwards.

use std::io::{Read, Seek, Write};

use parlor_game::{SpriteFlags, MAX_DYNAMIC_SURFACES};

use crate::content::assert_compat_limit;
use crate::error::Result;
use crate::io::{ReadLeExt, WriteLeExt};
use crate::restore::{RestoreContext, RestoredSprite, SaveContext};

use super::{bitmap, patch_back};

pub(crate) fn write_dynamic<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    write_sprites(w, ctx, SpriteFlags::DYNAMIC)
}

pub(crate) fn write_object_owned<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    write_sprites(w, ctx, SpriteFlags::DYNAMIC | SpriteFlags::OBJECT_OWNED)
}

pub(crate) fn read_dynamic<R: Read + Seek>(r: &mut R, ctx: &mut RestoreContext<'_>) -> Result<()> {
    read_sprites(r, ctx, SpriteFlags::DYNAMIC)
}

pub(crate) fn read_object_owned<R: Read + Seek>(
    r: &mut R,
    ctx: &mut RestoreContext<'_>,
) -> Result<()> {
    read_sprites(r, ctx, SpriteFlags::DYNAMIC | SpriteFlags::OBJECT_OWNED)
}

/// Writes every sprite slot carrying all of `match_flags`. Slot 0 is the
/// engine's reserved sprite and never serialized.
fn write_sprites<W: Write + Seek>(
    w: &mut W,
    ctx: &SaveContext<'_>,
    match_flags: SpriteFlags,
) -> Result<()> {
    let header_pos = w.stream_position()?;
    w.write_i32_le(0)?; // count, patched below
    w.write_i32_le(0)?; // top index, patched below

    let mut count = 0i32;
    let mut top_index = 1i32;
    for (slot, sprite) in ctx.game.sprites.slots.iter().enumerate().skip(1) {
        if !sprite.flags.contains(match_flags) {
            continue;
        }
        let Some(image) = &sprite.image else {
            continue;
        };
        count += 1;
        top_index = slot as i32;
        w.write_i32_le(slot as i32)?;
        w.write_u32_le(sprite.flags.bits())?;
        bitmap::write_bitmap(w, image)?;
    }

    patch_back(w, header_pos, |w| {
        w.write_i32_le(count)?;
        w.write_i32_le(top_index)
    })
}

/// Stages sprites carrying `match_flags`; records whose flags do not match
/// the requested subset are skipped image and all.
fn read_sprites<R: Read + Seek>(
    r: &mut R,
    ctx: &mut RestoreContext<'_>,
    match_flags: SpriteFlags,
) -> Result<()> {
    let count = r.read_i32_le()?;
    ctx.restored.sprite_top_index = r.read_i32_le()?;

    for _ in 0..count {
        let slot = r.read_i32_le()?;
        let flags = SpriteFlags::from_bits_retain(r.read_u32_le()?);
        if flags.contains(match_flags) {
            let image = bitmap::read_bitmap(r)?;
            ctx.restored.dynamic_sprites.push(RestoredSprite { slot, flags, image });
        } else {
            bitmap::skip_bitmap(r)?;
        }
    }
    Ok(())
}

pub(crate) fn write_surfaces<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    w.write_i32_le(MAX_DYNAMIC_SURFACES as i32)?;
    for surface in &ctx.game.surfaces {
        match surface {
            Some(image) => {
                w.write_bool(true)?;
                bitmap::write_bitmap(w, image)?;
            }
            None => w.write_bool(false)?,
        }
    }
    Ok(())
}

pub(crate) fn read_surfaces<R: Read + Seek>(r: &mut R, ctx: &mut RestoreContext<'_>) -> Result<()> {
    let count = r.read_i32_le()?;
    assert_compat_limit(count as i64, MAX_DYNAMIC_SURFACES as i64, "Dynamic Surfaces")?;
    for i in 0..count.max(0) as usize {
        if r.read_bool()? {
            ctx.restored.dynamic_surfaces[i] = Some(bitmap::read_bitmap(r)?);
        } else {
            ctx.restored.dynamic_surfaces[i] = None;
        }
    }
    Ok(())
}

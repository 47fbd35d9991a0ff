//! "Overlays" component. Only live overlays are written, so the record
//! count is patched in after the table walk; overlay ids are sparse and act
//! as the slot index on restore.

use std::io::{Read, Seek, Write};

use parlor_game::Overlay;

use crate::error::Result;
use crate::io::{ReadLeExt, WriteLeExt};
use crate::restore::{RestoreContext, SaveContext};

use super::{bitmap, patch_back};

pub(crate) const VER_INITIAL: i32 = 0;
/// Z-order and transparency appended to each record.
pub(crate) const VER_TRANSFORM: i32 = 1;
pub(crate) const VERSION: i32 = VER_TRANSFORM;
pub(crate) const LOWEST_VERSION: i32 = VER_INITIAL;

pub(crate) fn write<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    let count_pos = w.stream_position()?;
    w.write_i32_le(0)?; // valid count, patched below

    let mut count = 0i32;
    for overlay in &ctx.game.overlays {
        if overlay.id < 0 {
            continue;
        }
        count += 1;
        w.write_i32_le(overlay.id)?;
        w.write_i32_le(overlay.x)?;
        w.write_i32_le(overlay.y)?;
        w.write_i32_le(overlay.timeout)?;
        w.write_i32_le(overlay.speech_for_char)?;
        w.write_bool(overlay.image.is_some())?;
        w.write_i32_le(overlay.z_order)?;
        w.write_i32_le(overlay.transparency)?;
        if let Some(image) = &overlay.image {
            bitmap::write_bitmap(w, image)?;
        }
    }

    patch_back(w, count_pos, |w| w.write_i32_le(count))
}

pub(crate) fn read<R: Read + Seek>(
    r: &mut R,
    version: i32,
    ctx: &mut RestoreContext<'_>,
) -> Result<()> {
    let count = r.read_i32_le()?;
    for _ in 0..count {
        let mut overlay = Overlay {
            id: r.read_i32_le()?,
            x: r.read_i32_le()?,
            y: r.read_i32_le()?,
            timeout: r.read_i32_le()?,
            speech_for_char: r.read_i32_le()?,
            ..Overlay::default()
        };
        let has_image = r.read_bool()?;
        if version >= VER_TRANSFORM {
            overlay.z_order = r.read_i32_le()?;
            overlay.transparency = r.read_i32_le()?;
        }
        if has_image {
            overlay.image = Some(bitmap::read_bitmap(r)?);
        }
        // Negative ids never leave the writer; a record with one is dropped
        // rather than trusted.
        if overlay.id >= 0 {
            ctx.restored.overlays.push(overlay);
        }
    }
    Ok(())
}

//! "Inventory Items" component.

use std::io::{Read, Seek, Write};

use parlor_game::{InventoryFlags, InventoryItem};

use crate::content::assert_game_content;
use crate::error::Result;
use crate::io::{ReadLeExt, WriteLeExt, MAX_STRING_LEN};
use crate::restore::{RestoreContext, SaveContext};

use super::properties;

pub(crate) fn write<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    w.write_i32_le(ctx.game.inventory.len() as i32)?;
    for item in &ctx.game.inventory {
        w.write_string_u32(&item.name)?;
        w.write_i32_le(item.sprite)?;
        w.write_i32_le(item.cursor_sprite)?;
        w.write_u32_le(item.flags.bits())?;
        properties::write_properties(w, &item.properties)?;
    }
    Ok(())
}

pub(crate) fn read<R: Read + Seek>(r: &mut R, ctx: &mut RestoreContext<'_>) -> Result<()> {
    let count = assert_game_content(
        r.read_i32_le()? as u32,
        ctx.game.inventory.len() as u32,
        "Inventory Items",
        &mut ctx.restored.restore_flags,
    )?;
    ctx.restored.counts.inventory_items = count;

    for i in 0..count as usize {
        let item = InventoryItem {
            name: r.read_string_u32(MAX_STRING_LEN)?,
            sprite: r.read_i32_le()?,
            cursor_sprite: r.read_i32_le()?,
            flags: InventoryFlags::from_bits_retain(r.read_u32_le()?),
            properties: properties::read_properties(r)?,
        };
        if let Some(slot) = ctx.game.inventory.get_mut(i) {
            *slot = item;
        }
    }
    Ok(())
}

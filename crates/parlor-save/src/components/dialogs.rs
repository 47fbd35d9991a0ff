//! "Dialogs" component: per-option toggle flags for every dialog topic.

use std::io::{Read, Seek, Write};

use parlor_game::{DialogOptionFlags, MAX_DIALOG_OPTIONS};

use crate::content::{assert_compat_limit, assert_game_content};
use crate::error::Result;
use crate::io::{ReadLeExt, WriteLeExt};
use crate::restore::{RestoreContext, SaveContext};

pub(crate) fn write<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    w.write_i32_le(ctx.game.dialogs.len() as i32)?;
    for dialog in &ctx.game.dialogs {
        w.write_i32_le(dialog.option_flags.len() as i32)?;
        for flags in &dialog.option_flags {
            w.write_u32_le(flags.bits())?;
        }
    }
    Ok(())
}

pub(crate) fn read<R: Read + Seek>(r: &mut R, ctx: &mut RestoreContext<'_>) -> Result<()> {
    let count = assert_game_content(
        r.read_i32_le()? as u32,
        ctx.game.dialogs.len() as u32,
        "Dialogs",
        &mut ctx.restored.restore_flags,
    )?;
    ctx.restored.counts.dialogs = count;

    for i in 0..count as usize {
        let option_count = r.read_i32_le()?;
        assert_compat_limit(option_count as i64, MAX_DIALOG_OPTIONS as i64, "Dialog Options")?;
        let mut option_flags = Vec::with_capacity(option_count.max(0) as usize);
        for _ in 0..option_count {
            option_flags.push(DialogOptionFlags::from_bits_retain(r.read_u32_le()?));
        }
        if let Some(slot) = ctx.game.dialogs.get_mut(i) {
            slot.option_flags = option_flags;
        }
    }
    Ok(())
}

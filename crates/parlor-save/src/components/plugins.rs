//! "Plugin Data" component: one opaque chunk per engine plugin. Chunks are
//! size-prefixed so a chunk from a plugin this build does not have can be
//! skipped, the same way the component loop skips unknown components.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::{Result, SaveError};
use crate::io::{ReadLeExt, WriteLeExt, MAX_STRING_LEN};
use crate::restore::{RestoreContext, SaveContext};

use super::patch_back;

pub(crate) const VER_INITIAL: i32 = 0;
/// Chunks carry the owning plugin's name instead of relying on load order.
pub(crate) const VER_NAMED_CHUNKS: i32 = 1;
pub(crate) const VERSION: i32 = VER_NAMED_CHUNKS;
pub(crate) const LOWEST_VERSION: i32 = VER_INITIAL;

pub(crate) fn write<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    w.write_i32_le(ctx.plugins.len() as i32)?;
    for plugin in ctx.plugins {
        w.write_string_u32(plugin.name())?;
        let size_pos = w.stream_position()?;
        w.write_i32_le(0)?; // chunk size, patched below
        plugin.save(w)?;
        let end_pos = w.stream_position()?;
        patch_back(w, size_pos, |w| {
            w.write_i32_le((end_pos - size_pos - 4) as i32)
        })?;
    }
    Ok(())
}

pub(crate) fn read<R: Read + Seek>(
    r: &mut R,
    version: i32,
    ctx: &mut RestoreContext<'_>,
) -> Result<()> {
    let count = r.read_i32_le()?;
    for i in 0..count.max(0) as usize {
        if version >= VER_NAMED_CHUNKS {
            read_named_chunk(r, ctx)?;
        } else {
            read_positional_chunk(r, ctx, i)?;
        }
    }
    Ok(())
}

fn read_named_chunk<R: Read + Seek>(r: &mut R, ctx: &mut RestoreContext<'_>) -> Result<()> {
    let name = r.read_string_u32(MAX_STRING_LEN)?;
    let size = r.read_i32_le()?;
    if size < 0 {
        return Err(SaveError::Corrupt("negative plugin chunk size"));
    }
    match ctx.plugins.iter_mut().find(|plugin| plugin.name() == name) {
        Some(plugin) => {
            let data = r.read_exact_vec(size as usize)?;
            plugin.restore(&data)?;
        }
        None => {
            // A chunk from a plugin that is not loaded; skippable like an
            // unknown component.
            tracing::warn!("skipping save data for unknown plugin: {name}");
            r.seek(SeekFrom::Current(size as i64))?;
        }
    }
    Ok(())
}

/// Old saves identify chunks by position; extra trailing chunks are skipped.
fn read_positional_chunk<R: Read + Seek>(
    r: &mut R,
    ctx: &mut RestoreContext<'_>,
    index: usize,
) -> Result<()> {
    let size = r.read_i32_le()?;
    if size < 0 {
        return Err(SaveError::Corrupt("negative plugin chunk size"));
    }
    match ctx.plugins.get_mut(index) {
        Some(plugin) => {
            let data = r.read_exact_vec(size as usize)?;
            plugin.restore(&data)?;
        }
        None => {
            r.seek(SeekFrom::Current(size as i64))?;
        }
    }
    Ok(())
}

//! "Script Modules" and "Managed Pool" components: the script VM's mutable
//! global data plus its managed object heap.
//!
//! Module data blocks are staged, not applied; the pool deserializer
//! resolves object references against those staged buffers, which is why
//! "Managed Pool" is registered after "Script Modules".

use std::io::{Read, Seek, Write};

use crate::content::{
    assert_game_content, assert_game_object_content, extra_content_error, missing_content_error,
};
use crate::error::{Result, SaveError};
use crate::io::{ReadLeExt, WriteLeExt, MAX_STRING_LEN};
use crate::restore::{RestoreContext, SaveContext};

pub(crate) const VER_INITIAL: i32 = 0;
/// Modules are identified by name instead of by save position.
pub(crate) const VER_NAMED_MODULES: i32 = 1;
pub(crate) const VERSION: i32 = VER_NAMED_MODULES;
pub(crate) const LOWEST_VERSION: i32 = VER_INITIAL;

pub(crate) fn write_modules<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    let script = &ctx.game.script;

    w.write_u32_le(script.global_data.len() as u32)?;
    w.write_bytes(&script.global_data)?;

    w.write_i32_le(script.modules.len() as i32)?;
    for module in &script.modules {
        w.write_string_u32(&module.name)?;
        w.write_u32_le(module.data.len() as u32)?;
        w.write_bytes(&module.data)?;
    }
    Ok(())
}

pub(crate) fn read_modules<R: Read + Seek>(
    r: &mut R,
    version: i32,
    ctx: &mut RestoreContext<'_>,
) -> Result<()> {
    let data_len = assert_game_content(
        r.read_u32_le()?,
        ctx.params.global_script_data_size,
        "global script data",
        &mut ctx.restored.restore_flags,
    )?;
    ctx.restored.counts.global_script_data_size = data_len;
    ctx.restored.global_script_data = r.read_exact_vec(data_len as usize)?;

    let modules_read = assert_game_content(
        r.read_i32_le()? as u32,
        ctx.params.script_module_names.len() as u32,
        "Script Modules",
        &mut ctx.restored.restore_flags,
    )?;
    ctx.restored.counts.script_modules = modules_read;
    // Untrusted count; the size table grows as modules actually decode.
    ctx.restored.counts.script_module_data_sizes = Vec::new();

    let mut modules_matched = vec![false; ctx.params.script_module_names.len()];
    for i in 0..modules_read as usize {
        // Old saves carry no names; module order was assumed to match the
        // game's.
        let name = if version >= VER_NAMED_MODULES {
            r.read_string_u32(MAX_STRING_LEN)?
        } else {
            match ctx.params.script_module_names.get(i) {
                Some(name) => name.clone(),
                None => return Err(extra_content_error("script module", &format!("#{i}"))),
            }
        };
        let data_len = r.read_u32_le()?;

        match ctx
            .params
            .script_module_names
            .iter()
            .position(|game_name| *game_name == name)
        {
            Some(game_index) => {
                assert_game_object_content(
                    data_len,
                    ctx.params.script_module_data_sizes[game_index],
                    "script module data",
                    "module",
                    game_index,
                    &mut ctx.restored.restore_flags,
                )?;
                modules_matched[game_index] = true;
            }
            None => return Err(extra_content_error("script module", &name)),
        }

        ctx.restored.counts.script_module_data_sizes.push(data_len);
        let data = r.read_exact_vec(data_len as usize)?;
        ctx.restored.script_modules.insert(name, data);
    }

    for (game_index, matched) in modules_matched.iter().enumerate() {
        if !matched {
            return Err(missing_content_error(
                "script module",
                &ctx.params.script_module_names[game_index],
            ));
        }
    }
    Ok(())
}

pub(crate) fn write_pool<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    ctx.heap.serialize_all(w)?;
    Ok(())
}

/// The pool deserializer gets a reader capped at the component's declared
/// size, so a runaway heap implementation cannot consume past its payload.
pub(crate) fn read_pool<R: Read + Seek>(
    r: &mut R,
    size: i64,
    ctx: &mut RestoreContext<'_>,
) -> Result<()> {
    let mut limited = r.by_ref().take(size.max(0) as u64);
    ctx.heap
        .unserialize_all(&mut limited)
        .map_err(SaveError::ObjectPoolInit)?;
    Ok(())
}

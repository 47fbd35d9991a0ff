//! "Views" component: the sound and sprite of every animation frame. Frame
//! sounds and sprites change at runtime (scripts can swap them), which is
//! why views are in saves at all.

use std::io::{Read, Seek, Write};

use crate::content::{assert_game_object_content, assert_game_object_content2, assert_game_content};
use crate::error::Result;
use crate::io::{ReadLeExt, WriteLeExt};
use crate::restore::{RestoreContext, SaveContext};

pub(crate) fn write<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    w.write_i32_le(ctx.game.views.len() as i32)?;
    for view in &ctx.game.views {
        w.write_i32_le(view.loops.len() as i32)?;
        for view_loop in &view.loops {
            w.write_i32_le(view_loop.frames.len() as i32)?;
            for frame in &view_loop.frames {
                w.write_i32_le(frame.sound)?;
                w.write_i32_le(frame.sprite)?;
            }
        }
    }
    Ok(())
}

pub(crate) fn read<R: Read + Seek>(r: &mut R, ctx: &mut RestoreContext<'_>) -> Result<()> {
    let views_read = assert_game_content(
        r.read_i32_le()? as u32,
        ctx.game.views.len() as u32,
        "Views",
        &mut ctx.restored.restore_flags,
    )?;
    ctx.restored.counts.views = views_read;
    // The save's count is untrusted until the records behind it have been
    // read, so the per-view tables grow as views decode instead of being
    // sized up front.
    ctx.restored.counts.view_loops = Vec::new();
    ctx.restored.counts.view_frames = Vec::new();

    for view in 0..views_read as usize {
        let game_loops = ctx.game.views.get(view).map_or(0, |v| v.loops.len());
        let loops_read = assert_game_object_content(
            r.read_i32_le()? as u32,
            game_loops as u32,
            "Loops",
            "View",
            view,
            &mut ctx.restored.restore_flags,
        )?;
        ctx.restored.counts.view_loops.push(loops_read);
        ctx.restored.counts.view_frames.push(0);

        for view_loop in 0..loops_read as usize {
            let game_frames = ctx
                .game
                .views
                .get(view)
                .and_then(|v| v.loops.get(view_loop))
                .map_or(0, |l| l.frames.len());
            let frames_read = assert_game_object_content2(
                r.read_i32_le()? as u32,
                game_frames as u32,
                "Frame",
                "View",
                view,
                "Loop",
                view_loop,
                &mut ctx.restored.restore_flags,
            )?;
            ctx.restored.counts.view_frames[view] += frames_read;

            for frame in 0..frames_read as usize {
                let sound = r.read_i32_le()?;
                let sprite = r.read_i32_le()?;
                if let Some(slot) = ctx
                    .game
                    .views
                    .get_mut(view)
                    .and_then(|v| v.loops.get_mut(view_loop))
                    .and_then(|l| l.frames.get_mut(frame))
                {
                    slot.sound = sound;
                    slot.sprite = sprite;
                }
            }
        }
    }
    Ok(())
}

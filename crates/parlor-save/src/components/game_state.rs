//! "Game State" component: play state variables, the palette, engine loop
//! state, and the camera/viewport arrangement.

use std::io::{Read, Seek, Write};

use crate::error::Result;
use crate::io::{ReadLeExt, WriteLeExt};
use crate::restore::{CameraData, RestoreContext, SaveContext, ViewportData};

pub(crate) const VER_INITIAL: i32 = 0;
/// Explicit camera and viewport lists replace the single legacy pair.
pub(crate) const VER_VIEW_CAMERAS: i32 = 1;
pub(crate) const VERSION: i32 = VER_VIEW_CAMERAS;
pub(crate) const LOWEST_VERSION: i32 = VER_INITIAL;

pub(crate) const CAMERA_FLAG_LOCKED: i32 = 0x1;
pub(crate) const VIEWPORT_FLAG_VISIBLE: i32 = 0x1;
const GAME_FLAG_AUTO_ROOM_VIEWPORT: i32 = 0x1;

pub(crate) fn write<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    let game = ctx.game;
    let play = &game.play;

    w.write_i32_le(play.score)?;
    w.write_i32_le(play.text_speed)?;
    w.write_i32_le(play.speech_skip_style)?;
    w.write_i32_le(play.music_master_volume)?;
    w.write_i32_le(play.speech_volume)?;
    w.write_i32_le(play.current_music_index)?;

    for color in &game.palette {
        w.write_u8(color.r)?;
        w.write_u8(color.g)?;
        w.write_u8(color.b)?;
    }

    w.write_i32_le(game.frame_rate)?;
    w.write_i32_le(game.loop_counter)?;
    w.write_i32_le(game.game_paused as i32)?;

    w.write_i32_le(play.cursor_mode)?;
    w.write_i32_le(play.cursor_id)?;
    w.write_i32_le(play.mouse_over_gui)?;

    let mut flags = 0;
    if play.auto_room_viewport {
        flags |= GAME_FLAG_AUTO_ROOM_VIEWPORT;
    }
    w.write_i32_le(flags)?;

    w.write_i32_le(play.cameras.len() as i32)?;
    for camera in &play.cameras {
        let mut flags = 0;
        if camera.locked {
            flags |= CAMERA_FLAG_LOCKED;
        }
        w.write_i32_le(flags)?;
        w.write_i32_le(camera.left)?;
        w.write_i32_le(camera.top)?;
        w.write_i32_le(camera.width)?;
        w.write_i32_le(camera.height)?;
    }

    w.write_i32_le(play.viewports.len() as i32)?;
    for viewport in &play.viewports {
        let mut flags = 0;
        if viewport.visible {
            flags |= VIEWPORT_FLAG_VISIBLE;
        }
        w.write_i32_le(flags)?;
        w.write_i32_le(viewport.left)?;
        w.write_i32_le(viewport.top)?;
        w.write_i32_le(viewport.width)?;
        w.write_i32_le(viewport.height)?;
        w.write_i32_le(viewport.z_order)?;
        w.write_i32_le(viewport.camera.map_or(-1, |camera| camera as i32))?;
    }
    Ok(())
}

pub(crate) fn read<R: Read + Seek>(
    r: &mut R,
    version: i32,
    ctx: &mut RestoreContext<'_>,
) -> Result<()> {
    ctx.game.play.score = r.read_i32_le()?;
    ctx.game.play.text_speed = r.read_i32_le()?;
    ctx.game.play.speech_skip_style = r.read_i32_le()?;
    ctx.game.play.music_master_volume = r.read_i32_le()?;
    ctx.game.play.speech_volume = r.read_i32_le()?;
    ctx.game.play.current_music_index = r.read_i32_le()?;

    for color in ctx.game.palette.iter_mut() {
        color.r = r.read_u8()?;
        color.g = r.read_u8()?;
        color.b = r.read_u8()?;
    }

    // The frame rate and cursor shape need the display and mouse set up, so
    // they are staged; the loop counter and pause state apply directly.
    ctx.restored.fps = r.read_i32_le()?;
    ctx.game.loop_counter = r.read_i32_le()?;
    ctx.game.game_paused = r.read_i32_le()? != 0;

    ctx.restored.cursor_mode = r.read_i32_le()?;
    ctx.restored.cursor_id = r.read_i32_le()?;
    ctx.game.play.mouse_over_gui = r.read_i32_le()?;

    if version < VER_VIEW_CAMERAS {
        read_legacy_camera(r, ctx)
    } else {
        read_cameras_and_viewports(r, ctx)
    }
}

/// Saves made before explicit cameras store just the room view offset; that
/// becomes one locked-free camera with a matching full-screen viewport.
fn read_legacy_camera<R: Read>(r: &mut R, ctx: &mut RestoreContext<'_>) -> Result<()> {
    let cam_x = r.read_i32_le()?;
    let cam_y = r.read_i32_le()?;

    ctx.game.play.create_room_camera();
    ctx.game.play.create_room_viewport();
    ctx.restored.legacy_view_camera = true;
    ctx.restored.cameras.push(CameraData {
        flags: 0,
        left: cam_x,
        top: cam_y,
        width: 0,
        height: 0,
    });
    ctx.restored.viewports.push(ViewportData {
        flags: VIEWPORT_FLAG_VISIBLE,
        camera_id: 0,
        ..ViewportData::default()
    });
    Ok(())
}

fn read_cameras_and_viewports<R: Read>(r: &mut R, ctx: &mut RestoreContext<'_>) -> Result<()> {
    let flags = r.read_i32_le()?;
    ctx.game.play.auto_room_viewport = flags & GAME_FLAG_AUTO_ROOM_VIEWPORT != 0;

    // Live cameras are created now so later components (and the managed
    // pool) can refer to them; their geometry stays staged until the room
    // is in place.
    let camera_count = r.read_i32_le()?;
    for _ in 0..camera_count {
        ctx.game.play.create_room_camera();
        ctx.restored.cameras.push(CameraData {
            flags: r.read_i32_le()?,
            left: r.read_i32_le()?,
            top: r.read_i32_le()?,
            width: r.read_i32_le()?,
            height: r.read_i32_le()?,
        });
    }

    let viewport_count = r.read_i32_le()?;
    for _ in 0..viewport_count {
        ctx.game.play.create_room_viewport();
        ctx.restored.viewports.push(ViewportData {
            flags: r.read_i32_le()?,
            left: r.read_i32_le()?,
            top: r.read_i32_le()?,
            width: r.read_i32_le()?,
            height: r.read_i32_le()?,
            z_order: r.read_i32_le()?,
            camera_id: r.read_i32_le()?,
        });
    }
    Ok(())
}

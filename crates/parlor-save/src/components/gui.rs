//! "GUI" component: surface state, every control family, and button
//! animations in flight. Each family sits behind its own format tag so a
//! framing slip is caught at the family boundary instead of corrupting the
//! rest of the component.

use std::io::{Read, Seek, Write};

use parlor_game::{
    AnimatingButton, ControlRef, GuiControlFlags, GuiControlState, GuiSurface,
};

use crate::content::assert_game_content;
use crate::error::{Result, SaveError};
use crate::io::{ReadLeExt, WriteLeExt, MAX_STRING_LEN};
use crate::restore::{RestoreContext, SaveContext};
use crate::tag;

pub(crate) const VER_INITIAL: i32 = 0;
/// Surfaces gain blend mode and rotation; animating buttons gain a volume.
pub(crate) const VER_TRANSFORM: i32 = 1;
pub(crate) const VERSION: i32 = VER_TRANSFORM;
pub(crate) const LOWEST_VERSION: i32 = VER_INITIAL;

const SURFACE_FLAG_VISIBLE: u32 = 0x1;
const SURFACE_FLAG_CLICKABLE: u32 = 0x2;

/// List-box item strings across all list boxes combined.
const MAX_LISTBOX_ITEMS_BYTES: usize = 1 << 20;

pub(crate) fn write<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    let guis = &ctx.game.guis;

    tag::write_tag(w, "GUIs", true)?;
    w.write_i32_le(guis.surfaces.len() as i32)?;
    for surface in &guis.surfaces {
        write_surface(w, surface)?;
    }

    tag::write_tag(w, "GUIButtons", true)?;
    w.write_i32_le(guis.buttons.len() as i32)?;
    for button in &guis.buttons {
        write_control_state(w, &button.state)?;
        w.write_i32_le(button.sprite)?;
        w.write_i32_le(button.sprite_over)?;
        w.write_i32_le(button.sprite_pushed)?;
        w.write_string_u32(&button.text)?;
        w.write_i32_le(button.font)?;
        w.write_i32_le(button.text_color)?;
    }

    tag::write_tag(w, "GUILabels", true)?;
    w.write_i32_le(guis.labels.len() as i32)?;
    for label in &guis.labels {
        write_control_state(w, &label.state)?;
        w.write_string_u32(&label.text)?;
        w.write_i32_le(label.font)?;
        w.write_i32_le(label.text_color)?;
    }

    tag::write_tag(w, "GUIInvWindows", true)?;
    w.write_i32_le(guis.inv_windows.len() as i32)?;
    for inv_window in &guis.inv_windows {
        write_control_state(w, &inv_window.state)?;
        w.write_i32_le(inv_window.character_id)?;
        w.write_i32_le(inv_window.item_width)?;
        w.write_i32_le(inv_window.item_height)?;
        w.write_i32_le(inv_window.top_item)?;
    }

    tag::write_tag(w, "GUISliders", true)?;
    w.write_i32_le(guis.sliders.len() as i32)?;
    for slider in &guis.sliders {
        write_control_state(w, &slider.state)?;
        w.write_i32_le(slider.min)?;
        w.write_i32_le(slider.max)?;
        w.write_i32_le(slider.value)?;
    }

    tag::write_tag(w, "GUITextBoxes", true)?;
    w.write_i32_le(guis.text_boxes.len() as i32)?;
    for text_box in &guis.text_boxes {
        write_control_state(w, &text_box.state)?;
        w.write_string_u32(&text_box.text)?;
        w.write_i32_le(text_box.font)?;
        w.write_i32_le(text_box.text_color)?;
        w.write_bool(text_box.show_border)?;
    }

    tag::write_tag(w, "GUIListBoxes", true)?;
    w.write_i32_le(guis.list_boxes.len() as i32)?;
    for list_box in &guis.list_boxes {
        write_control_state(w, &list_box.state)?;
        w.write_u32_le(list_box.items.len() as u32)?;
        for item in &list_box.items {
            w.write_string_u32(item)?;
        }
        w.write_i32_le(list_box.selected)?;
        w.write_i32_le(list_box.top_item)?;
        w.write_i32_le(list_box.font)?;
        w.write_i32_le(list_box.text_color)?;
    }

    tag::write_tag(w, "AnimatedButtons", true)?;
    w.write_i32_le(guis.animating.len() as i32)?;
    for anim in &guis.animating {
        w.write_i32_le(anim.gui)?;
        w.write_i32_le(anim.control)?;
        w.write_i32_le(anim.view)?;
        w.write_i32_le(anim.anim_loop)?;
        w.write_i32_le(anim.frame)?;
        w.write_i32_le(anim.speed)?;
        w.write_i32_le(anim.repeat)?;
        w.write_i32_le(anim.wait)?;
        w.write_i32_le(anim.volume)?;
    }
    Ok(())
}

pub(crate) fn read<R: Read + Seek>(
    r: &mut R,
    version: i32,
    ctx: &mut RestoreContext<'_>,
) -> Result<()> {
    tag::expect_tag(r, "GUIs", true)?;
    let count = assert_game_content(
        r.read_i32_le()? as u32,
        ctx.game.guis.surfaces.len() as u32,
        "GUIs",
        &mut ctx.restored.restore_flags,
    )?;
    ctx.restored.counts.guis = count;
    for i in 0..count as usize {
        let mut surface = read_surface(r, version)?;
        if let Some(slot) = ctx.game.guis.surfaces.get_mut(i) {
            // The game's own control layout survives the overwrite.
            surface.ctrl_refs = std::mem::take(&mut slot.ctrl_refs);
            *slot = surface;
        }
    }

    tag::expect_tag(r, "GUIButtons", true)?;
    let count = assert_game_content(
        r.read_i32_le()? as u32,
        ctx.game.guis.buttons.len() as u32,
        "GUI Buttons",
        &mut ctx.restored.restore_flags,
    )?;
    for i in 0..count as usize {
        let state = read_control_state(r)?;
        let sprite = r.read_i32_le()?;
        let sprite_over = r.read_i32_le()?;
        let sprite_pushed = r.read_i32_le()?;
        let text = r.read_string_u32(MAX_STRING_LEN)?;
        let font = r.read_i32_le()?;
        let text_color = r.read_i32_le()?;
        if let Some(button) = ctx.game.guis.buttons.get_mut(i) {
            button.state = state;
            button.sprite = sprite;
            button.sprite_over = sprite_over;
            button.sprite_pushed = sprite_pushed;
            button.text = text;
            button.font = font;
            button.text_color = text_color;
        }
    }

    tag::expect_tag(r, "GUILabels", true)?;
    let count = assert_game_content(
        r.read_i32_le()? as u32,
        ctx.game.guis.labels.len() as u32,
        "GUI Labels",
        &mut ctx.restored.restore_flags,
    )?;
    for i in 0..count as usize {
        let state = read_control_state(r)?;
        let text = r.read_string_u32(MAX_STRING_LEN)?;
        let font = r.read_i32_le()?;
        let text_color = r.read_i32_le()?;
        if let Some(label) = ctx.game.guis.labels.get_mut(i) {
            label.state = state;
            label.text = text;
            label.font = font;
            label.text_color = text_color;
        }
    }

    tag::expect_tag(r, "GUIInvWindows", true)?;
    let count = assert_game_content(
        r.read_i32_le()? as u32,
        ctx.game.guis.inv_windows.len() as u32,
        "GUI InvWindows",
        &mut ctx.restored.restore_flags,
    )?;
    for i in 0..count as usize {
        let state = read_control_state(r)?;
        let character_id = r.read_i32_le()?;
        let item_width = r.read_i32_le()?;
        let item_height = r.read_i32_le()?;
        let top_item = r.read_i32_le()?;
        if let Some(inv_window) = ctx.game.guis.inv_windows.get_mut(i) {
            inv_window.state = state;
            inv_window.character_id = character_id;
            inv_window.item_width = item_width;
            inv_window.item_height = item_height;
            inv_window.top_item = top_item;
        }
    }

    tag::expect_tag(r, "GUISliders", true)?;
    let count = assert_game_content(
        r.read_i32_le()? as u32,
        ctx.game.guis.sliders.len() as u32,
        "GUI Sliders",
        &mut ctx.restored.restore_flags,
    )?;
    for i in 0..count as usize {
        let state = read_control_state(r)?;
        let min = r.read_i32_le()?;
        let max = r.read_i32_le()?;
        let value = r.read_i32_le()?;
        if let Some(slider) = ctx.game.guis.sliders.get_mut(i) {
            slider.state = state;
            slider.min = min;
            slider.max = max;
            slider.value = value;
        }
    }

    tag::expect_tag(r, "GUITextBoxes", true)?;
    let count = assert_game_content(
        r.read_i32_le()? as u32,
        ctx.game.guis.text_boxes.len() as u32,
        "GUI TextBoxes",
        &mut ctx.restored.restore_flags,
    )?;
    for i in 0..count as usize {
        let state = read_control_state(r)?;
        let text = r.read_string_u32(MAX_STRING_LEN)?;
        let font = r.read_i32_le()?;
        let text_color = r.read_i32_le()?;
        let show_border = r.read_bool()?;
        if let Some(text_box) = ctx.game.guis.text_boxes.get_mut(i) {
            text_box.state = state;
            text_box.text = text;
            text_box.font = font;
            text_box.text_color = text_color;
            text_box.show_border = show_border;
        }
    }

    tag::expect_tag(r, "GUIListBoxes", true)?;
    let count = assert_game_content(
        r.read_i32_le()? as u32,
        ctx.game.guis.list_boxes.len() as u32,
        "GUI ListBoxes",
        &mut ctx.restored.restore_flags,
    )?;
    let mut item_bytes = 0usize;
    for i in 0..count as usize {
        let state = read_control_state(r)?;
        let item_count = r.read_u32_le()?;
        let mut items = Vec::new();
        for _ in 0..item_count {
            let item = r.read_string_u32(MAX_STRING_LEN)?;
            item_bytes += item.len();
            if item_bytes > MAX_LISTBOX_ITEMS_BYTES {
                return Err(SaveError::Corrupt("list-box items exceed limit"));
            }
            items.push(item);
        }
        let selected = r.read_i32_le()?;
        let top_item = r.read_i32_le()?;
        let font = r.read_i32_le()?;
        let text_color = r.read_i32_le()?;
        if let Some(list_box) = ctx.game.guis.list_boxes.get_mut(i) {
            list_box.state = state;
            list_box.items = items;
            list_box.selected = selected;
            list_box.top_item = top_item;
            list_box.font = font;
            list_box.text_color = text_color;
        }
    }

    // Animations in flight belong to the save alone; no game count to
    // compare against.
    tag::expect_tag(r, "AnimatedButtons", true)?;
    let anim_count = r.read_i32_le()?;
    ctx.game.guis.animating.clear();
    for _ in 0..anim_count {
        let mut anim = AnimatingButton {
            gui: r.read_i32_le()?,
            control: r.read_i32_le()?,
            view: r.read_i32_le()?,
            anim_loop: r.read_i32_le()?,
            frame: r.read_i32_le()?,
            speed: r.read_i32_le()?,
            repeat: r.read_i32_le()?,
            wait: r.read_i32_le()?,
            volume: 100,
        };
        if version >= VER_TRANSFORM {
            anim.volume = r.read_i32_le()?;
        }
        ctx.game.guis.animating.push(anim);
    }
    Ok(())
}

fn write_surface<W: Write>(w: &mut W, surface: &GuiSurface) -> Result<()> {
    w.write_i32_le(surface.x)?;
    w.write_i32_le(surface.y)?;
    w.write_i32_le(surface.width)?;
    w.write_i32_le(surface.height)?;
    w.write_i32_le(surface.z_order)?;
    w.write_i32_le(surface.transparency)?;
    let mut flags = 0;
    if surface.visible {
        flags |= SURFACE_FLAG_VISIBLE;
    }
    if surface.clickable {
        flags |= SURFACE_FLAG_CLICKABLE;
    }
    w.write_u32_le(flags)?;
    w.write_i32_le(surface.focus_ctrl)?;
    w.write_i32_le(surface.mouse_over_ctrl)?;
    w.write_i32_le(surface.highlight_ctrl)?;
    w.write_i32_le(surface.ctrl_refs.len() as i32)?;
    for ctrl_ref in &surface.ctrl_refs {
        w.write_i32_le(ctrl_ref.control_type)?;
        w.write_i32_le(ctrl_ref.id)?;
    }
    w.write_i32_le(surface.blend_mode)?;
    w.write_f32_le(surface.rotation)?;
    Ok(())
}

fn read_surface<R: Read>(r: &mut R, version: i32) -> Result<GuiSurface> {
    let mut surface = GuiSurface {
        x: r.read_i32_le()?,
        y: r.read_i32_le()?,
        width: r.read_i32_le()?,
        height: r.read_i32_le()?,
        z_order: r.read_i32_le()?,
        transparency: r.read_i32_le()?,
        ..GuiSurface::default()
    };
    let flags = r.read_u32_le()?;
    surface.visible = flags & SURFACE_FLAG_VISIBLE != 0;
    surface.clickable = flags & SURFACE_FLAG_CLICKABLE != 0;
    surface.focus_ctrl = r.read_i32_le()?;
    surface.mouse_over_ctrl = r.read_i32_le()?;
    surface.highlight_ctrl = r.read_i32_le()?;

    // Control references are design-time data; the copy in the save is
    // read past and dropped, the game's own layout stays.
    let ref_count = r.read_i32_le()?;
    for _ in 0..ref_count {
        let _ref = ControlRef {
            control_type: r.read_i32_le()?,
            id: r.read_i32_le()?,
        };
    }

    if version >= VER_TRANSFORM {
        surface.blend_mode = r.read_i32_le()?;
        surface.rotation = r.read_f32_le()?;
    }
    Ok(surface)
}

fn write_control_state<W: Write>(w: &mut W, state: &GuiControlState) -> Result<()> {
    w.write_u32_le(state.flags.bits())?;
    w.write_i32_le(state.x)?;
    w.write_i32_le(state.y)
}

fn read_control_state<R: Read>(r: &mut R) -> Result<GuiControlState> {
    Ok(GuiControlState {
        flags: GuiControlFlags::from_bits_retain(r.read_u32_le()?),
        x: r.read_i32_le()?,
        y: r.read_i32_le()?,
    })
}

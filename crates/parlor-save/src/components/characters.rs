//! "Characters" component. Early revisions embedded each character's move
//! list right after its record; those now travel in the separate
//! "Move Lists" component.

use std::io::{Read, Seek, Write};

use parlor_game::{CharacterFlags, CharacterState, CHAR_MOVELIST_OFFSET};

use crate::content::assert_game_content;
use crate::error::Result;
use crate::io::{ReadLeExt, WriteLeExt, MAX_STRING_LEN};
use crate::restore::{RestoreContext, SaveContext};

use super::{move_lists, properties};

pub(crate) const VER_INITIAL: i32 = 0;
/// Move lists split out into their own component.
pub(crate) const VER_SPLIT_MOVELISTS: i32 = 1;
/// Animation volume, blend mode and rotation appended.
pub(crate) const VER_EXTRAS: i32 = 2;
pub(crate) const VERSION: i32 = VER_EXTRAS;
pub(crate) const LOWEST_VERSION: i32 = VER_INITIAL;

pub(crate) fn write<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    w.write_i32_le(ctx.game.characters.len() as i32)?;
    for character in &ctx.game.characters {
        write_character(w, character)?;
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
        ctx.game.characters.len() as u32,
        "Characters",
        &mut ctx.restored.restore_flags,
    )?;
    ctx.restored.counts.characters = count;

    for i in 0..count as usize {
        let character = read_character(r, version)?;
        if let Some(slot) = ctx.game.characters.get_mut(i) {
            *slot = character;
        }
        if version < VER_SPLIT_MOVELISTS {
            let move_list = move_lists::read_move_list(r, 0)?;
            if let Some(slot) = ctx.game.move_lists.get_mut(CHAR_MOVELIST_OFFSET + i) {
                *slot = move_list;
            }
        }
    }
    Ok(())
}

fn write_character<W: Write>(w: &mut W, character: &CharacterState) -> Result<()> {
    w.write_i32_le(character.x)?;
    w.write_i32_le(character.y)?;
    w.write_i32_le(character.room)?;
    w.write_i32_le(character.prev_room)?;
    w.write_i32_le(character.view)?;
    w.write_i32_le(character.anim_loop)?;
    w.write_i32_le(character.frame)?;
    w.write_i32_le(character.walking)?;
    w.write_i32_le(character.animating)?;
    w.write_i32_le(character.walk_speed)?;
    w.write_i32_le(character.anim_speed)?;
    w.write_i32_le(character.baseline)?;
    w.write_i32_le(character.transparency)?;
    w.write_u32_le(character.flags.bits())?;
    w.write_i32_le(character.active_inv)?;
    w.write_string_u32(&character.name)?;
    properties::write_properties(w, &character.properties)?;
    w.write_i32_le(character.anim_volume)?;
    w.write_i32_le(character.blend_mode)?;
    w.write_f32_le(character.rotation)?;
    Ok(())
}

fn read_character<R: Read>(r: &mut R, version: i32) -> Result<CharacterState> {
    let mut character = CharacterState {
        x: r.read_i32_le()?,
        y: r.read_i32_le()?,
        room: r.read_i32_le()?,
        prev_room: r.read_i32_le()?,
        view: r.read_i32_le()?,
        anim_loop: r.read_i32_le()?,
        frame: r.read_i32_le()?,
        walking: r.read_i32_le()?,
        animating: r.read_i32_le()?,
        walk_speed: r.read_i32_le()?,
        anim_speed: r.read_i32_le()?,
        baseline: r.read_i32_le()?,
        transparency: r.read_i32_le()?,
        flags: CharacterFlags::from_bits_retain(r.read_u32_le()?),
        active_inv: r.read_i32_le()?,
        name: r.read_string_u32(MAX_STRING_LEN)?,
        ..CharacterState::default()
    };
    character.properties = properties::read_properties(r)?;
    if version >= VER_EXTRAS {
        character.anim_volume = r.read_i32_le()?;
        character.blend_mode = r.read_i32_le()?;
        character.rotation = r.read_f32_le()?;
    }
    Ok(character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn old_records_default_the_appended_fields() {
        let mut full = Vec::new();
        let mut character = CharacterState {
            x: 44,
            y: 120,
            name: "Roger".to_string(),
            anim_volume: 80,
            rotation: 90.0,
            ..CharacterState::default()
        };
        character
            .properties
            .insert("mood".to_string(), "wry".to_string());
        write_character(&mut full, &character).unwrap();

        // A record written before the extras existed is the same bytes minus
        // the trailing three fields.
        let old = full[..full.len() - 12].to_vec();
        let read = read_character(&mut Cursor::new(old), VER_SPLIT_MOVELISTS).unwrap();
        assert_eq!(read.x, 44);
        assert_eq!(read.name, "Roger");
        assert_eq!(read.properties.get("mood").map(String::as_str), Some("wry"));
        assert_eq!(read.anim_volume, 0);
        assert_eq!(read.rotation, 0.0);

        let read = read_character(&mut Cursor::new(full), VER_EXTRAS).unwrap();
        assert_eq!(read.anim_volume, 80);
        assert_eq!(read.rotation, 90.0);
    }
}

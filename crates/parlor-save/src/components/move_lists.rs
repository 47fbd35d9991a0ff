//! "Move Lists" component: the shared walking-path table for room objects
//! and characters. The table is fixed-index (objects first, characters
//! after), which is why its length is asserted against the game rather than
//! resized to fit the save.

use std::io::{Read, Seek, Write};

use parlor_game::{MoveList, MoveStage, MAX_MOVE_STAGES};

use crate::content::{assert_compat_limit, assert_game_content};
use crate::error::Result;
use crate::io::{ReadLeExt, WriteLeExt};
use crate::restore::{RestoreContext, SaveContext};

pub(crate) const VER_INITIAL: i32 = 0;
/// Per-stage movement speeds appended to each stage record.
pub(crate) const VER_STAGE_SPEEDS: i32 = 1;
pub(crate) const VERSION: i32 = VER_STAGE_SPEEDS;
pub(crate) const LOWEST_VERSION: i32 = VER_INITIAL;

pub(crate) fn write<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    w.write_i32_le(ctx.game.move_lists.len() as i32)?;
    for move_list in &ctx.game.move_lists {
        write_move_list(w, move_list)?;
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
        ctx.game.move_lists.len() as u32,
        "Move Lists",
        &mut ctx.restored.restore_flags,
    )?;
    ctx.restored.counts.move_lists = count;

    for i in 0..count as usize {
        let move_list = read_move_list(r, version)?;
        if let Some(slot) = ctx.game.move_lists.get_mut(i) {
            *slot = move_list;
        }
    }
    Ok(())
}

pub(crate) fn write_move_list<W: Write>(w: &mut W, move_list: &MoveList) -> Result<()> {
    w.write_i32_le(move_list.stages.len() as i32)?;
    for stage in &move_list.stages {
        w.write_i32_le(stage.x)?;
        w.write_i32_le(stage.y)?;
        w.write_f32_le(stage.x_per_move)?;
        w.write_f32_le(stage.y_per_move)?;
    }
    w.write_i32_le(move_list.cur_stage)?;
    w.write_f32_le(move_list.cur_part)?;
    w.write_i32_le(move_list.from_x)?;
    w.write_i32_le(move_list.from_y)?;
    w.write_bool(move_list.done)?;
    w.write_bool(move_list.direct)
}

/// Decodes one move list record. Also used by the "Characters" and "Loaded
/// Room State" codecs for old saves that embedded move lists inline.
pub(crate) fn read_move_list<R: Read>(r: &mut R, version: i32) -> Result<MoveList> {
    let stage_count = r.read_i32_le()?;
    assert_compat_limit(stage_count as i64, MAX_MOVE_STAGES as i64, "move stages")?;

    let mut stages = Vec::with_capacity(stage_count.max(0) as usize);
    for _ in 0..stage_count {
        let mut stage = MoveStage {
            x: r.read_i32_le()?,
            y: r.read_i32_le()?,
            ..MoveStage::default()
        };
        if version >= VER_STAGE_SPEEDS {
            stage.x_per_move = r.read_f32_le()?;
            stage.y_per_move = r.read_f32_le()?;
        }
        stages.push(stage);
    }

    Ok(MoveList {
        stages,
        cur_stage: r.read_i32_le()?,
        cur_part: r.read_f32_le()?,
        from_x: r.read_i32_le()?,
        from_y: r.read_i32_le()?,
        done: r.read_bool()?,
        direct: r.read_bool()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SaveError;
    use std::io::Cursor;

    fn sample_list() -> MoveList {
        MoveList {
            stages: vec![
                MoveStage {
                    x: 10,
                    y: 20,
                    x_per_move: 1.5,
                    y_per_move: -0.5,
                },
                MoveStage {
                    x: 40,
                    y: 25,
                    x_per_move: 2.0,
                    y_per_move: 0.0,
                },
            ],
            from_x: 5,
            from_y: 5,
            cur_stage: 1,
            cur_part: 0.25,
            done: false,
            direct: true,
        }
    }

    #[test]
    fn move_list_round_trip() {
        let mut buf = Vec::new();
        write_move_list(&mut buf, &sample_list()).unwrap();
        let read = read_move_list(&mut Cursor::new(buf), VERSION).unwrap();
        assert_eq!(read, sample_list());
    }

    #[test]
    fn old_records_have_no_stage_speeds() {
        // A version 0 stage is just the two coordinates.
        let mut buf = Vec::new();
        buf.write_i32_le(1).unwrap();
        buf.write_i32_le(7).unwrap();
        buf.write_i32_le(9).unwrap();
        buf.write_i32_le(0).unwrap();
        buf.write_f32_le(0.0).unwrap();
        buf.write_i32_le(7).unwrap();
        buf.write_i32_le(9).unwrap();
        buf.write_bool(true).unwrap();
        buf.write_bool(false).unwrap();

        let read = read_move_list(&mut Cursor::new(buf), VER_INITIAL).unwrap();
        assert_eq!(read.stages.len(), 1);
        assert_eq!(read.stages[0].x, 7);
        assert_eq!(read.stages[0].x_per_move, 0.0);
        assert!(read.done);
    }

    #[test]
    fn stage_count_is_capacity_checked() {
        let mut buf = Vec::new();
        buf.write_i32_le(MAX_MOVE_STAGES as i32 + 1).unwrap();
        let err = read_move_list(&mut Cursor::new(buf), VERSION).unwrap_err();
        assert!(matches!(err, SaveError::IncompatibleEngine(_)));
    }
}

/// One leg of a computed walking path.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveStage {
    pub x: i32,
    pub y: i32,
    pub x_per_move: f32,
    pub y_per_move: f32,
}

/// A pathfinder result being walked by a character or room object. The table
/// of these is shared: room objects first, then characters (see
/// [`CHAR_MOVELIST_OFFSET`](crate::CHAR_MOVELIST_OFFSET)).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MoveList {
    pub stages: Vec<MoveStage>,
    pub from_x: i32,
    pub from_y: i32,
    pub cur_stage: i32,
    /// Fractional progress along the current stage.
    pub cur_part: f32,
    pub done: bool,
    pub direct: bool,
}

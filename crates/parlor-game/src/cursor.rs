use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct CursorFlags: u32 {
        const ANIMATES_WHEN_MOVING = 1 << 0;
        const ANIMATES_OVER_HOTSPOT = 1 << 1;
        const PROCESS_CLICK = 1 << 2;
        const ENABLED = 1 << 3;
    }
}

impl Default for CursorFlags {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseCursor {
    pub sprite: i32,
    pub hotspot_x: i32,
    pub hotspot_y: i32,
    /// Animation view, or -1 for a static cursor.
    pub view: i32,
    pub flags: CursorFlags,
    pub animation_delay: i32,
}

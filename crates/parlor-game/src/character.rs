use std::collections::BTreeMap;

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct CharacterFlags: u32 {
        const NO_INTERACTION = 1 << 0;
        const NO_WALK_BEHINDS = 1 << 1;
        const HAS_TINT = 1 << 2;
        const USE_REGION_TINTS = 1 << 3;
        const USE_ROOM_SCALING = 1 << 4;
        const SOLID = 1 << 5;
        const TURNS_BEFORE_WALKING = 1 << 6;
        const HAS_LIGHT = 1 << 7;
    }
}

impl Default for CharacterFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Mutable, per-playthrough state of one character. Immutable definition data
/// (views available, speech color and so on) lives with the loaded game and
/// is not part of this struct.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharacterState {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub room: i32,
    pub prev_room: i32,
    pub view: i32,
    pub anim_loop: i32,
    pub frame: i32,
    pub walking: i32,
    pub animating: i32,
    pub walk_speed: i32,
    pub anim_speed: i32,
    pub baseline: i32,
    pub transparency: i32,
    pub flags: CharacterFlags,
    /// Selected inventory item, or -1.
    pub active_inv: i32,
    pub anim_volume: i32,
    pub blend_mode: i32,
    /// Sprite rotation in degrees.
    pub rotation: f32,
    pub properties: BTreeMap<String, String>,
}

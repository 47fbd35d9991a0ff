use std::collections::BTreeMap;

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u32 {
        const NO_INTERACTION = 1 << 0;
        const NO_WALK_BEHINDS = 1 << 1;
        const HAS_TINT = 1 << 2;
        const USE_REGION_TINTS = 1 << 3;
        const USE_ROOM_SCALING = 1 << 4;
        const SOLID = 1 << 5;
        const HAS_LIGHT = 1 << 7;
    }
}

impl Default for ObjectFlags {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoomObject {
    pub x: i32,
    pub y: i32,
    pub sprite: i32,
    pub baseline: i32,
    pub view: i32,
    pub anim_loop: i32,
    pub frame: i32,
    pub cycling: i32,
    pub anim_speed: i32,
    /// Index into the shared move-list table while walking, or 0.
    pub moving: i32,
    pub visible: bool,
    pub flags: ObjectFlags,
    pub transparency: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionState {
    pub light: i32,
    pub tint: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkAreaScaling {
    pub scaling_far: i32,
    pub scaling_near: i32,
}

/// Persistent state of one room, kept for every room the player has visited
/// so it looks the same on return.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoomState {
    pub been_here: bool,
    pub objects: Vec<RoomObject>,
    pub hotspots_enabled: Vec<bool>,
    pub regions_enabled: Vec<bool>,
    pub walk_behind_baselines: Vec<i32>,
    pub properties: BTreeMap<String, String>,
}

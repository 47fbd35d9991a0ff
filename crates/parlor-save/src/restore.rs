//! Restore plumbing: what is captured before a restore starts, and where
//! decoded data waits until the engine can apply it.
//!
//! Not everything in a save can be poked into [`GameWorld`] as it is read.
//! Audio playback needs the mixer, sprites need the texture cache, the
//! current room needs to finish loading first. Such data is parked in
//! [`RestoredData`] and applied by the engine once its subsystems are ready;
//! the rest is written into the world directly by the component codecs.

use std::collections::HashMap;
use std::io::{Read, Write};

use parlor_game::{
    BitmapData, GameWorld, Overlay, RoomState, SpriteFlags, MAX_DYNAMIC_SURFACES,
    MAX_GAME_CHANNELS, MAX_ROOM_BG_FRAMES, MAX_ROOM_REGIONS, MAX_WALK_AREAS,
    TOTAL_AUDIO_CHANNELS,
};

use crate::flags::RestoreFlags;

/// Shape of the loaded game captured before any component is read, so codecs
/// can compare against it even after earlier components have overwritten the
/// live tables.
#[derive(Debug, Clone, Default)]
pub struct PreservedParams {
    pub global_script_data_size: u32,
    pub script_module_names: Vec<String>,
    pub script_module_data_sizes: Vec<u32>,
}

impl PreservedParams {
    pub fn from_game(game: &GameWorld) -> Self {
        Self {
            global_script_data_size: game.script.global_data.len() as u32,
            script_module_names: game
                .script
                .modules
                .iter()
                .map(|module| module.name.clone())
                .collect(),
            script_module_data_sizes: game
                .script
                .modules
                .iter()
                .map(|module| module.data.len() as u32)
                .collect(),
        }
    }
}

/// Counts of objects actually present in the save, recorded while reading.
/// When the mismatch policy lets counts diverge, the engine needs these to
/// know how much restored data it really has.
#[derive(Debug, Clone, Default)]
pub struct ContentCounts {
    pub characters: u32,
    pub dialogs: u32,
    pub guis: u32,
    pub audio_clip_types: u32,
    pub inventory_items: u32,
    pub cursors: u32,
    pub views: u32,
    /// Loop count per view, indexed by view.
    pub view_loops: Vec<u32>,
    /// Total frame count per view, indexed by view.
    pub view_frames: Vec<u32>,
    pub global_script_data_size: u32,
    pub script_modules: u32,
    /// Data size per module, in save order.
    pub script_module_data_sizes: Vec<u32>,
    pub move_lists: u32,
}

/// Camera state staged from the save; raw fields, not yet bound to a live
/// camera.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraData {
    pub flags: i32,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportData {
    pub flags: i32,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub z_order: i32,
    pub camera_id: i32,
}

/// One mixer channel's playback as stored in the save. `clip_id` of -1
/// means the channel was idle.
#[derive(Debug, Clone, Copy)]
pub struct ChannelInfo {
    pub clip_id: i32,
    pub position: i32,
    pub priority: i32,
    pub repeat: i32,
    pub volume: i32,
    pub volume_percent: i32,
    pub pan: i32,
    pub speed: i32,
    pub source_x: i32,
    pub source_y: i32,
    pub max_dist: i32,
}

impl Default for ChannelInfo {
    fn default() -> Self {
        Self {
            clip_id: -1,
            position: 0,
            priority: 0,
            repeat: 0,
            volume: 0,
            volume_percent: 0,
            pan: 0,
            speed: 0,
            source_x: 0,
            source_y: 0,
            max_dist: 0,
        }
    }
}

/// A dynamic sprite staged for reinsertion into the sprite table.
#[derive(Debug, Clone)]
pub struct RestoredSprite {
    pub slot: i32,
    pub flags: SpriteFlags,
    pub image: BitmapData,
}

/// Decoded save data awaiting application by the engine.
#[derive(Debug)]
pub struct RestoredData {
    /// Policy bits the caller passed in, plus outcome bits recorded while
    /// reading.
    pub restore_flags: RestoreFlags,
    pub counts: ContentCounts,

    pub fps: i32,
    pub cursor_mode: i32,
    pub cursor_id: i32,

    pub cameras: Vec<CameraData>,
    pub viewports: Vec<ViewportData>,
    /// Set when the save predates explicit cameras and the single legacy
    /// pair was synthesized from the room view offset.
    pub legacy_view_camera: bool,

    /// One slot per mixer channel.
    pub audio_channels: Vec<ChannelInfo>,
    /// Ambient clip to retrigger per game channel, 0 for none.
    pub ambient_retrigger: Vec<i32>,

    pub global_script_data: Vec<u8>,
    /// Module data blocks keyed by module name.
    pub script_modules: HashMap<String, Vec<u8>>,

    /// Room the save was made in, or -1.
    pub displayed_room: i32,
    pub room_bg_frames: Vec<Option<BitmapData>>,
    pub raw_screen: Option<BitmapData>,
    pub room_light_levels: Vec<i32>,
    pub room_tint_levels: Vec<i32>,
    pub room_zoom_far: Vec<i32>,
    pub room_zoom_near: Vec<i32>,
    pub room_volume: i32,
    /// The current room's state when it is a non-persistent room.
    pub temp_room: Option<RoomState>,

    pub sprite_top_index: i32,
    pub dynamic_sprites: Vec<RestoredSprite>,
    pub dynamic_surfaces: Vec<Option<BitmapData>>,
    pub overlays: Vec<Overlay>,
}

impl Default for RestoredData {
    fn default() -> Self {
        Self {
            restore_flags: RestoreFlags::empty(),
            counts: ContentCounts::default(),
            fps: 0,
            cursor_mode: 0,
            cursor_id: 0,
            cameras: Vec::new(),
            viewports: Vec::new(),
            legacy_view_camera: false,
            audio_channels: vec![ChannelInfo::default(); TOTAL_AUDIO_CHANNELS],
            ambient_retrigger: vec![0; MAX_GAME_CHANNELS],
            global_script_data: Vec::new(),
            script_modules: HashMap::new(),
            displayed_room: -1,
            room_bg_frames: vec![None; MAX_ROOM_BG_FRAMES],
            raw_screen: None,
            room_light_levels: vec![0; MAX_ROOM_REGIONS],
            room_tint_levels: vec![0; MAX_ROOM_REGIONS],
            room_zoom_far: vec![0; MAX_WALK_AREAS],
            room_zoom_near: vec![0; MAX_WALK_AREAS],
            room_volume: 0,
            temp_room: None,
            sprite_top_index: 0,
            dynamic_sprites: Vec::new(),
            dynamic_surfaces: vec![None; MAX_DYNAMIC_SURFACES],
            overlays: Vec::new(),
        }
    }
}

impl RestoredData {
    /// Fresh staging area carrying the caller's restore policy.
    pub fn with_flags(flags: RestoreFlags) -> Self {
        Self {
            restore_flags: flags,
            ..Self::default()
        }
    }
}

/// The script VM's managed object pool. Its wire format is opaque to the
/// save layer; the pool serializes itself as one blob.
pub trait ManagedHeap {
    fn serialize_all(&self, w: &mut dyn Write) -> std::io::Result<()>;
    /// Errors are reported as strings; the pool's failure detail does not
    /// map onto io errors.
    fn unserialize_all(&mut self, r: &mut dyn Read) -> std::result::Result<(), String>;
}

/// A heap with no objects. Stands in for the real pool in tools and tests.
#[derive(Debug, Default)]
pub struct NullHeap;

impl ManagedHeap for NullHeap {
    fn serialize_all(&self, _w: &mut dyn Write) -> std::io::Result<()> {
        Ok(())
    }

    fn unserialize_all(&mut self, _r: &mut dyn Read) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// An engine plugin that persists private state into saves. Each plugin's
/// data travels as one opaque chunk keyed by the plugin's name.
pub trait SavePlugin {
    fn name(&self) -> &str;
    fn save(&self, w: &mut dyn Write) -> std::io::Result<()>;
    fn restore(&mut self, data: &[u8]) -> std::io::Result<()>;
}

/// Everything the component writers read from.
pub struct SaveContext<'a> {
    pub game: &'a GameWorld,
    pub heap: &'a dyn ManagedHeap,
    pub plugins: &'a [Box<dyn SavePlugin>],
}

/// Everything the component readers write into.
pub struct RestoreContext<'a> {
    pub game: &'a mut GameWorld,
    pub params: &'a PreservedParams,
    pub restored: &'a mut RestoredData,
    pub heap: &'a mut dyn ManagedHeap,
    pub plugins: &'a mut [Box<dyn SavePlugin>],
}

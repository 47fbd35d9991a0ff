//! Fixed engine capacities. These bound what a game (and therefore a save)
//! may contain; loaders reject data that exceeds them.

pub const MAX_ROOMS: usize = 300;
pub const MAX_ROOM_OBJECTS: usize = 64;
pub const MAX_ROOM_HOTSPOTS: usize = 50;
pub const MAX_ROOM_REGIONS: usize = 16;
pub const MAX_WALK_AREAS: usize = 16;
pub const MAX_WALK_BEHINDS: usize = 16;
pub const MAX_ROOM_BG_FRAMES: usize = 5;

pub const MAX_DYNAMIC_SURFACES: usize = 20;

/// Mixer slots available to the engine overall, and the subset a game may
/// schedule clips on. Earlier engine revisions had these hardcoded.
pub const TOTAL_AUDIO_CHANNELS: usize = 16;
pub const MAX_GAME_CHANNELS: usize = 8;
pub const LEGACY_TOTAL_CHANNELS: usize = 8;
pub const LEGACY_GAME_CHANNELS: usize = 6;
/// Channels below this index are reserved for speech.
pub const SPEECH_CHANNELS: usize = 1;

pub const MAX_MOVE_STAGES: usize = 256;
pub const MAX_DIALOG_OPTIONS: usize = 30;

/// Index of the first character entry in the shared move-list table; slots
/// `0..=MAX_ROOM_OBJECTS` belong to the current room's objects.
pub const CHAR_MOVELIST_OFFSET: usize = MAX_ROOM_OBJECTS + 1;

use crate::audio::AudioRuntime;
use crate::bitmap::BitmapData;
use crate::character::CharacterState;
use crate::cursor::MouseCursor;
use crate::defines::{
    CHAR_MOVELIST_OFFSET, MAX_DYNAMIC_SURFACES, MAX_ROOMS, MAX_ROOM_BG_FRAMES, MAX_ROOM_REGIONS,
    MAX_WALK_AREAS,
};
use crate::dialog::DialogState;
use crate::gui::GuiCollection;
use crate::inventory::InventoryItem;
use crate::movelist::MoveList;
use crate::overlay::Overlay;
use crate::play::PlayState;
use crate::room::{RegionState, RoomState, WalkAreaScaling};
use crate::script::ScriptRuntime;
use crate::sprite::SpriteStore;
use crate::view::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PalColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Everything about a running game that save/restore touches: the loaded
/// game's object tables plus all runtime state.
///
/// Sized collections keep their invariants from construction: `surfaces`,
/// `room_states`, `current_room_bg`, `current_room_regions` and
/// `current_room_walk_areas` always hold their full fixed capacity, and
/// `play.default_audio_type_volumes` tracks `audio.clip_types` one to one.
#[derive(Debug, Clone, PartialEq)]
pub struct GameWorld {
    pub play: PlayState,
    pub palette: [PalColor; 256],

    pub characters: Vec<CharacterState>,
    pub dialogs: Vec<DialogState>,
    pub guis: GuiCollection,
    pub inventory: Vec<InventoryItem>,
    pub cursors: Vec<MouseCursor>,
    pub views: Vec<View>,
    pub sprites: SpriteStore,
    pub overlays: Vec<Overlay>,
    pub surfaces: Vec<Option<BitmapData>>,
    pub script: ScriptRuntime,
    pub audio: AudioRuntime,

    pub room_states: Vec<Option<RoomState>>,
    /// Room the player is in, or -1 before the first room loads. Values of
    /// `MAX_ROOMS` and above denote non-persistent (temporary) rooms.
    pub displayed_room: i32,
    /// State of the current room when it is a non-persistent one.
    pub temp_room: RoomState,
    pub current_room_bg: Vec<Option<BitmapData>>,
    pub raw_saved_screen: Option<BitmapData>,
    pub current_room_regions: Vec<RegionState>,
    pub current_room_walk_areas: Vec<WalkAreaScaling>,
    pub current_room_volume: i32,

    /// Shared move-list table: room objects first, then characters.
    pub move_lists: Vec<MoveList>,

    pub frame_rate: i32,
    pub loop_counter: i32,
    pub game_paused: bool,
}

impl Default for GameWorld {
    fn default() -> Self {
        Self {
            play: PlayState::default(),
            palette: [PalColor::default(); 256],
            characters: Vec::new(),
            dialogs: Vec::new(),
            guis: GuiCollection::default(),
            inventory: Vec::new(),
            cursors: Vec::new(),
            views: Vec::new(),
            sprites: SpriteStore::default(),
            overlays: Vec::new(),
            surfaces: vec![None; MAX_DYNAMIC_SURFACES],
            script: ScriptRuntime::default(),
            audio: AudioRuntime::default(),
            room_states: vec![None; MAX_ROOMS],
            displayed_room: -1,
            temp_room: RoomState::default(),
            current_room_bg: vec![None; MAX_ROOM_BG_FRAMES],
            raw_saved_screen: None,
            current_room_regions: vec![RegionState::default(); MAX_ROOM_REGIONS],
            current_room_walk_areas: vec![WalkAreaScaling::default(); MAX_WALK_AREAS],
            current_room_volume: 0,
            move_lists: vec![MoveList::default(); CHAR_MOVELIST_OFFSET],
            frame_rate: 40,
            loop_counter: 0,
            game_paused: false,
        }
    }
}

impl GameWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resizes the move-list table to cover the current room's objects plus
    /// one slot per character. Call after the character roster changes.
    pub fn sync_move_lists(&mut self) {
        self.move_lists
            .resize(CHAR_MOVELIST_OFFSET + self.characters.len(), MoveList::default());
    }

    /// Move-list slot for character `index`.
    pub fn char_move_list(&self, index: usize) -> Option<&MoveList> {
        self.move_lists.get(CHAR_MOVELIST_OFFSET + index)
    }
}

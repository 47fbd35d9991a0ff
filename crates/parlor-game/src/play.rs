use crate::defines::MAX_ROOM_BG_FRAMES;

/// A camera over the room, defined in room coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Camera {
    /// Locked cameras do not auto-track the player character.
    pub locked: bool,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// A screen viewport a camera renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub visible: bool,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub z_order: i32,
    pub camera: Option<usize>,
}

/// Global gameplay state: the variables scripts read and write through the
/// `game.*` interface plus the camera/viewport arrangement.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayState {
    pub score: i32,
    pub text_speed: i32,
    pub speech_skip_style: i32,
    pub music_master_volume: i32,
    pub speech_volume: i32,
    pub current_music_index: i32,
    pub cursor_mode: i32,
    pub cursor_id: i32,
    /// GUI the mouse pointer is over, or -1.
    pub mouse_over_gui: i32,
    /// Whether the room viewport auto-sizes to the room background.
    pub auto_room_viewport: bool,
    /// Per audio clip type volume override set by script, or -1 for none.
    pub default_audio_type_volumes: Vec<i32>,
    /// Which room background frames have been painted over by script.
    pub raw_modified: [bool; MAX_ROOM_BG_FRAMES],
    pub cameras: Vec<Camera>,
    pub viewports: Vec<Viewport>,
}

impl Default for PlayState {
    fn default() -> Self {
        Self {
            score: 0,
            text_speed: 15,
            speech_skip_style: 0,
            music_master_volume: 100,
            speech_volume: 255,
            current_music_index: -1,
            cursor_mode: 0,
            cursor_id: 0,
            mouse_over_gui: -1,
            auto_room_viewport: true,
            default_audio_type_volumes: Vec::new(),
            raw_modified: [false; MAX_ROOM_BG_FRAMES],
            cameras: Vec::new(),
            viewports: Vec::new(),
        }
    }
}

impl PlayState {
    /// Appends a default room camera and returns its index.
    pub fn create_room_camera(&mut self) -> usize {
        self.cameras.push(Camera::default());
        self.cameras.len() - 1
    }

    /// Appends a default room viewport and returns its index.
    pub fn create_room_viewport(&mut self) -> usize {
        self.viewports.push(Viewport::default());
        self.viewports.len() - 1
    }
}

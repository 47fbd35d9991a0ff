use crate::bitmap::BitmapData;

/// A screen overlay: speech text, a portrait, or a script-created image
/// floating above the room.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Script-visible overlay id; negative means the slot is unused.
    pub id: i32,
    pub x: i32,
    pub y: i32,
    pub timeout: i32,
    /// Character this overlay is speech for, or -1.
    pub speech_for_char: i32,
    pub z_order: i32,
    pub transparency: i32,
    pub image: Option<BitmapData>,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            id: -1,
            x: 0,
            y: 0,
            timeout: 0,
            speech_for_char: -1,
            z_order: 0,
            transparency: 0,
            image: None,
        }
    }
}

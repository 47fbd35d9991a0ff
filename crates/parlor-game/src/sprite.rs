use bitflags::bitflags;

use crate::bitmap::BitmapData;

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct SpriteFlags: u32 {
        /// Created at runtime rather than loaded from game data.
        const DYNAMIC = 1 << 0;
        /// Owned by a room object or character rather than by script.
        const OBJECT_OWNED = 1 << 1;
        const ALPHA_CHANNEL = 1 << 2;
    }
}

impl Default for SpriteFlags {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpriteSlot {
    pub flags: SpriteFlags,
    /// Pixel data; `None` for static sprites streamed from game files.
    pub image: Option<BitmapData>,
}

/// The sprite table. Slot 0 is reserved for the built-in blue cup and is
/// never treated as dynamic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpriteStore {
    pub slots: Vec<SpriteSlot>,
}

impl SpriteStore {
    /// Grows the table so that `index` is addressable.
    pub fn enlarge_to(&mut self, index: usize) {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, SpriteSlot::default());
        }
    }

    /// Installs a sprite at `index`, growing the table as needed.
    pub fn set(&mut self, index: usize, flags: SpriteFlags, image: BitmapData) {
        self.enlarge_to(index);
        self.slots[index] = SpriteSlot {
            flags,
            image: Some(image),
        };
    }
}

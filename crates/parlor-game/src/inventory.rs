use std::collections::BTreeMap;

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct InventoryFlags: u32 {
        const START_WITH = 1 << 0;
    }
}

impl Default for InventoryFlags {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryItem {
    pub name: String,
    pub sprite: i32,
    pub cursor_sprite: i32,
    pub flags: InventoryFlags,
    pub properties: BTreeMap<String, String>,
}

use bitflags::bitflags;

bitflags! {
    /// Which groups of game state a save or restore operation covers. Most
    /// callers use [`ComponentSelection::ALL`]; partial selections exist for
    /// tools that inspect or rewrite a subset of a save.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ComponentSelection: u32 {
        const GAME_STATE = 1 << 0;
        const AUDIO = 1 << 1;
        const CHARACTERS = 1 << 2;
        const DIALOGS = 1 << 3;
        const GUI = 1 << 4;
        const INV_ITEMS = 1 << 5;
        const CURSORS = 1 << 6;
        const VIEWS = 1 << 7;
        const DYNAMIC_SPRITES = 1 << 8;
        /// The subset of dynamic sprites owned by room objects and
        /// characters, serialized in place of the full sprite set.
        const OBJECT_SPRITES = 1 << 9;
        const OVERLAYS = 1 << 10;
        const SCRIPTS = 1 << 11;
        const ROOM_STATES = 1 << 12;
        const THIS_ROOM = 1 << 13;
        const PLUGINS = 1 << 14;

        /// Everything a regular save contains. `OBJECT_SPRITES` is excluded
        /// because it is an alternative to `DYNAMIC_SPRITES`, not an
        /// addition.
        const ALL = Self::GAME_STATE.bits()
            | Self::AUDIO.bits()
            | Self::CHARACTERS.bits()
            | Self::DIALOGS.bits()
            | Self::GUI.bits()
            | Self::INV_ITEMS.bits()
            | Self::CURSORS.bits()
            | Self::VIEWS.bits()
            | Self::DYNAMIC_SPRITES.bits()
            | Self::OVERLAYS.bits()
            | Self::SCRIPTS.bits()
            | Self::ROOM_STATES.bits()
            | Self::THIS_ROOM.bits()
            | Self::PLUGINS.bits();
    }
}

bitflags! {
    /// Restore policy going in, restore outcome coming back out.
    ///
    /// The low bits are set by the caller to say which divergences between
    /// save and game are tolerable; the high bits are set by the loader to
    /// report which divergences were actually seen.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct RestoreFlags: u32 {
        /// Accept saves that contain content the game does not have.
        const ALLOW_MISMATCH_EXTRA = 1 << 0;
        /// Accept saves that are missing content the game has.
        const ALLOW_MISMATCH_LESS = 1 << 1;
        /// The caller will clear game data before applying the restored
        /// state, so missing content cannot leave stale leftovers.
        const CLEAR_DATA = 1 << 2;

        const EXTRA_DATA_IN_SAVE = 1 << 8;
        const MISSING_DATA_IN_SAVE = 1 << 9;
    }
}

impl Default for RestoreFlags {
    fn default() -> Self {
        Self::empty()
    }
}

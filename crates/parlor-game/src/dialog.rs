use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct DialogOptionFlags: u32 {
        const ON = 1 << 0;
        const OFF_FOREVER = 1 << 1;
        const SAID = 1 << 2;
    }
}

impl Default for DialogOptionFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Per-dialog option toggles; the option scripts themselves are static data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogState {
    pub option_flags: Vec<DialogOptionFlags>,
}

/// Revision of the save container format as a whole. Individual components
/// carry their own version numbers; this one governs the framing around
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SaveVersion(pub u32);

impl SaveVersion {
    pub const INITIAL: SaveVersion = SaveVersion(1);
    /// Component data sizes widen from 32 to 64 bits starting here.
    pub const CMP_64BIT: SaveVersion = SaveVersion(2);
    pub const CURRENT: SaveVersion = Self::CMP_64BIT;

    /// Whether component data sizes are stored as 64-bit values.
    pub fn has_64bit_sizes(self) -> bool {
        self >= Self::CMP_64BIT
    }
}

impl core::fmt::Display for SaveVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

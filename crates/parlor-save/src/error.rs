use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SaveError>;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("out of memory allocating {len} bytes")]
    OutOfMemory { len: usize },

    #[error("utf-8 decoding failed: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("corrupt save: {0}")]
    Corrupt(&'static str),

    #[error("component list opening tag is malformed")]
    ListOpeningTagFormat,

    #[error("component list closing tag is missing")]
    ListClosingTagMissing,

    #[error("component opening tag is malformed")]
    OpeningTagFormat,

    #[error("component closing tag is malformed")]
    ClosingTagFormat,

    #[error("mismatching tag: {0}")]
    MismatchingTag(&'static str),

    #[error("save contains an unsupported component that cannot be skipped: {0}")]
    UnsupportedComponent(String),

    #[error("unsupported component version (saved: {saved}, supported: {lowest} - {highest})")]
    UnsupportedComponentVersion {
        saved: i32,
        lowest: i32,
        highest: i32,
    },

    #[error("component declared size does not match data (expected: {expected}, actual: {actual})")]
    ComponentSizeMismatch { expected: i64, actual: i64 },

    /// The save's content diverges from the loaded game in a way the caller
    /// did not allow.
    #[error("restored save does not match the game: {0}")]
    GameContentMismatch(String),

    /// The save has less content than the game and the caller allowed that
    /// without also allowing game data to be cleared before applying.
    #[error("restoring this save requires clearing game data first")]
    RequireClearReload,

    /// The save exceeds a fixed engine capacity; no restore flags can make
    /// it loadable.
    #[error("save is incompatible with this engine: {0}")]
    IncompatibleEngine(String),

    #[error("managed pool deserialization failed: {0}")]
    ObjectPoolInit(String),

    #[error("failed to read component (#{index}) {name}, version {version}, at offset {offset}")]
    Component {
        index: usize,
        name: String,
        version: i32,
        offset: u64,
        #[source]
        source: Box<SaveError>,
    },

    #[error("failed to write component (#{index}) {name}")]
    ComponentWrite {
        index: usize,
        name: &'static str,
        #[source]
        source: Box<SaveError>,
    },
}

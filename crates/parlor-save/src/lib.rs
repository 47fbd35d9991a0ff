//! Versioned component serialization for savegames.
//!
//! A save's game-state section is a list of named, versioned,
//! length-prefixed components, one per engine subsystem. The declared
//! length lets a reader skip components it does not recognize, and each
//! component's version lets its codec keep decoding formats written by
//! older builds. Restoring checks the save against the loaded game and
//! either applies decoded state to the [`parlor_game::GameWorld`] or stages
//! it in [`RestoredData`] for the engine to apply once dependent subsystems
//! are up.
//!
//! The entry points are [`write_all_common`] and [`read_all`], both driven
//! by a [`ComponentRegistry`] the caller constructs and passes in.

mod components;
mod content;
mod error;
mod flags;
mod io;
mod restore;
mod tag;
mod version;

pub use crate::components::{
    built_in_handlers, read_all, write_all_common, Codec, ComponentHandler, ComponentInfo,
    ComponentRegistry,
};
pub use crate::content::{
    assert_compat_limit, assert_compat_range, assert_game_content, assert_game_content_strict,
    assert_game_object_content, assert_game_object_content2, extra_content_error,
    missing_content_error,
};
pub use crate::error::{Result, SaveError};
pub use crate::flags::{ComponentSelection, RestoreFlags};
pub use crate::restore::{
    CameraData, ChannelInfo, ContentCounts, ManagedHeap, NullHeap, PreservedParams,
    RestoreContext, RestoredData, RestoredSprite, SaveContext, SavePlugin, ViewportData,
};
pub use crate::version::SaveVersion;

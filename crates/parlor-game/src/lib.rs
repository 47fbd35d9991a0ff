mod audio;
mod bitmap;
mod character;
mod cursor;
mod defines;
mod dialog;
mod game;
mod gui;
mod inventory;
mod movelist;
mod overlay;
mod play;
mod room;
mod script;
mod sprite;
mod view;

pub use crate::audio::{
    AmbientSound, AudioClipType, AudioRuntime, ChannelPlayback, CrossfadeState,
};
pub use crate::bitmap::BitmapData;
pub use crate::character::{CharacterFlags, CharacterState};
pub use crate::cursor::{CursorFlags, MouseCursor};
pub use crate::defines::*;
pub use crate::dialog::{DialogOptionFlags, DialogState};
pub use crate::game::{GameWorld, PalColor};
pub use crate::gui::{
    AnimatingButton, ControlRef, GuiButton, GuiCollection, GuiControlFlags, GuiControlState,
    GuiInvWindow, GuiLabel, GuiListBox, GuiSlider, GuiSurface, GuiTextBox,
};
pub use crate::inventory::{InventoryFlags, InventoryItem};
pub use crate::movelist::{MoveList, MoveStage};
pub use crate::overlay::Overlay;
pub use crate::play::{Camera, PlayState, Viewport};
pub use crate::room::{ObjectFlags, RegionState, RoomObject, RoomState, WalkAreaScaling};
pub use crate::script::{ScriptModule, ScriptRuntime};
pub use crate::sprite::{SpriteFlags, SpriteSlot, SpriteStore};
pub use crate::view::{View, ViewFrame, ViewLoop};

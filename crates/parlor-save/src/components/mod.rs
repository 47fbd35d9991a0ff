//! The component layer of the save format. A save's game-state section is a
//! flat list of self-describing components:
//!
//! ```text
//! <Components>
//!   <Name> version:i32 size:i32|i64 payload </Name>
//!   ...
//! </Components>
//! ```
//!
//! Each component owns one slice of game state and is read and written by a
//! codec registered in [`ComponentRegistry`]. The declared size lets readers
//! skip components they do not recognize and verify the ones they do.

mod audio;
mod bitmap;
mod characters;
mod cursors;
mod dialogs;
mod game_state;
mod gui;
mod inventory;
mod move_lists;
mod overlays;
mod plugins;
mod properties;
mod rooms;
mod scripts;
mod sprites;
mod views;

use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::{Result, SaveError};
use crate::flags::ComponentSelection;
use crate::io::{ReadLeExt, WriteLeExt};
use crate::restore::{RestoreContext, SaveContext};
use crate::tag::{self, COMPONENT_LIST_TAG};
use crate::version::SaveVersion;

/// Serialization routine for one component, dispatched by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    GameState,
    Audio,
    Characters,
    Dialogs,
    Gui,
    Inventory,
    Cursors,
    Views,
    DynamicSprites,
    ObjectSprites,
    Overlays,
    DynamicSurfaces,
    ScriptModules,
    RoomStates,
    LoadedRoom,
    MoveLists,
    ManagedPool,
    PluginData,
}

impl Codec {
    fn write<W: Write + Seek>(self, w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
        match self {
            Codec::GameState => game_state::write(w, ctx),
            Codec::Audio => audio::write(w, ctx),
            Codec::Characters => characters::write(w, ctx),
            Codec::Dialogs => dialogs::write(w, ctx),
            Codec::Gui => gui::write(w, ctx),
            Codec::Inventory => inventory::write(w, ctx),
            Codec::Cursors => cursors::write(w, ctx),
            Codec::Views => views::write(w, ctx),
            Codec::DynamicSprites => sprites::write_dynamic(w, ctx),
            Codec::ObjectSprites => sprites::write_object_owned(w, ctx),
            Codec::Overlays => overlays::write(w, ctx),
            Codec::DynamicSurfaces => sprites::write_surfaces(w, ctx),
            Codec::ScriptModules => scripts::write_modules(w, ctx),
            Codec::RoomStates => rooms::write_states(w, ctx),
            Codec::LoadedRoom => rooms::write_loaded(w, ctx),
            Codec::MoveLists => move_lists::write(w, ctx),
            Codec::ManagedPool => scripts::write_pool(w, ctx),
            Codec::PluginData => plugins::write(w, ctx),
        }
    }

    fn read<R: Read + Seek>(
        self,
        r: &mut R,
        version: i32,
        size: i64,
        ctx: &mut RestoreContext<'_>,
    ) -> Result<()> {
        match self {
            Codec::GameState => game_state::read(r, version, ctx),
            Codec::Audio => audio::read(r, version, ctx),
            Codec::Characters => characters::read(r, version, ctx),
            Codec::Dialogs => dialogs::read(r, ctx),
            Codec::Gui => gui::read(r, version, ctx),
            Codec::Inventory => inventory::read(r, ctx),
            Codec::Cursors => cursors::read(r, version, ctx),
            Codec::Views => views::read(r, ctx),
            Codec::DynamicSprites => sprites::read_dynamic(r, ctx),
            Codec::ObjectSprites => sprites::read_object_owned(r, ctx),
            Codec::Overlays => overlays::read(r, version, ctx),
            Codec::DynamicSurfaces => sprites::read_surfaces(r, ctx),
            Codec::ScriptModules => scripts::read_modules(r, version, ctx),
            Codec::RoomStates => rooms::read_states(r, version, ctx),
            Codec::LoadedRoom => rooms::read_loaded(r, version, ctx),
            Codec::MoveLists => move_lists::read(r, version, ctx),
            Codec::ManagedPool => scripts::read_pool(r, size, ctx),
            Codec::PluginData => plugins::read(r, version, ctx),
        }
    }
}

/// One registered component: its wire name, the version range this build can
/// read, the selection bits that enable it, and its codec.
#[derive(Debug, Clone)]
pub struct ComponentHandler {
    pub name: &'static str,
    /// Version written by this build, and the highest it can read.
    pub version: i32,
    /// Oldest component version this build can still read.
    pub lowest_version: i32,
    pub selection: ComponentSelection,
    pub codec: Codec,
}

/// The standard component set, in write order.
///
/// "Dynamic Sprites" appears twice: the full set and the object-owned
/// subset share a wire name, and the selection decides which codec runs.
pub fn built_in_handlers() -> Vec<ComponentHandler> {
    vec![
        ComponentHandler {
            name: "Game State",
            version: game_state::VERSION,
            lowest_version: game_state::LOWEST_VERSION,
            selection: ComponentSelection::GAME_STATE,
            codec: Codec::GameState,
        },
        ComponentHandler {
            name: "Audio",
            version: audio::VERSION,
            lowest_version: audio::LOWEST_VERSION,
            selection: ComponentSelection::AUDIO,
            codec: Codec::Audio,
        },
        ComponentHandler {
            name: "Characters",
            version: characters::VERSION,
            lowest_version: characters::LOWEST_VERSION,
            selection: ComponentSelection::CHARACTERS,
            codec: Codec::Characters,
        },
        ComponentHandler {
            name: "Dialogs",
            version: 0,
            lowest_version: 0,
            selection: ComponentSelection::DIALOGS,
            codec: Codec::Dialogs,
        },
        ComponentHandler {
            name: "GUI",
            version: gui::VERSION,
            lowest_version: gui::LOWEST_VERSION,
            selection: ComponentSelection::GUI,
            codec: Codec::Gui,
        },
        ComponentHandler {
            name: "Inventory Items",
            version: 0,
            lowest_version: 0,
            selection: ComponentSelection::INV_ITEMS,
            codec: Codec::Inventory,
        },
        ComponentHandler {
            name: "Mouse Cursors",
            version: cursors::VERSION,
            lowest_version: cursors::LOWEST_VERSION,
            selection: ComponentSelection::CURSORS,
            codec: Codec::Cursors,
        },
        ComponentHandler {
            name: "Views",
            version: 0,
            lowest_version: 0,
            selection: ComponentSelection::VIEWS,
            codec: Codec::Views,
        },
        ComponentHandler {
            name: "Dynamic Sprites",
            version: 0,
            lowest_version: 0,
            selection: ComponentSelection::DYNAMIC_SPRITES,
            codec: Codec::DynamicSprites,
        },
        ComponentHandler {
            name: "Dynamic Sprites",
            version: 0,
            lowest_version: 0,
            selection: ComponentSelection::OBJECT_SPRITES,
            codec: Codec::ObjectSprites,
        },
        ComponentHandler {
            name: "Overlays",
            version: overlays::VERSION,
            lowest_version: overlays::LOWEST_VERSION,
            selection: ComponentSelection::OVERLAYS,
            codec: Codec::Overlays,
        },
        ComponentHandler {
            // Surfaces live and die with dynamic sprites, so they share the
            // sprite selection bit.
            name: "Dynamic Surfaces",
            version: 0,
            lowest_version: 0,
            selection: ComponentSelection::DYNAMIC_SPRITES,
            codec: Codec::DynamicSurfaces,
        },
        ComponentHandler {
            name: "Script Modules",
            version: scripts::VERSION,
            lowest_version: scripts::LOWEST_VERSION,
            selection: ComponentSelection::SCRIPTS,
            codec: Codec::ScriptModules,
        },
        ComponentHandler {
            name: "Room States",
            version: rooms::VERSION,
            lowest_version: rooms::LOWEST_VERSION,
            selection: ComponentSelection::ROOM_STATES,
            codec: Codec::RoomStates,
        },
        ComponentHandler {
            // Same version scheme as "Room States"; the payloads embed the
            // same room-state records.
            name: "Loaded Room State",
            version: rooms::VERSION,
            lowest_version: rooms::LOWEST_VERSION,
            selection: ComponentSelection::THIS_ROOM,
            codec: Codec::LoadedRoom,
        },
        ComponentHandler {
            name: "Move Lists",
            version: move_lists::VERSION,
            lowest_version: move_lists::LOWEST_VERSION,
            selection: ComponentSelection::CHARACTERS.union(ComponentSelection::THIS_ROOM),
            codec: Codec::MoveLists,
        },
        ComponentHandler {
            name: "Managed Pool",
            version: 0,
            lowest_version: 0,
            selection: ComponentSelection::SCRIPTS,
            codec: Codec::ManagedPool,
        },
        ComponentHandler {
            name: "Plugin Data",
            version: plugins::VERSION,
            lowest_version: plugins::LOWEST_VERSION,
            selection: ComponentSelection::PLUGINS,
            codec: Codec::PluginData,
        },
    ]
}

/// Component lookup by wire name. Several handlers may share a name; the
/// active selection picks between them.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    handlers: Vec<ComponentHandler>,
    by_name: HashMap<&'static str, Vec<usize>>,
}

impl ComponentRegistry {
    /// Registry over [`built_in_handlers`].
    pub fn new() -> Self {
        Self::with_handlers(built_in_handlers())
    }

    pub fn with_handlers(handlers: Vec<ComponentHandler>) -> Self {
        let mut by_name: HashMap<&'static str, Vec<usize>> = HashMap::new();
        for (index, handler) in handlers.iter().enumerate() {
            by_name.entry(handler.name).or_default().push(index);
        }
        Self { handlers, by_name }
    }

    /// Handlers in registration (and therefore write) order.
    pub fn handlers(&self) -> &[ComponentHandler] {
        &self.handlers
    }

    /// First handler with this name that the selection enables.
    fn find(&self, name: &str, select: ComponentSelection) -> Option<&ComponentHandler> {
        self.by_name.get(name)?.iter().map(|&index| &self.handlers[index]).find(|handler| {
            handler.selection.intersects(select)
        })
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Framing of one component as encountered while reading, kept for error
/// reports.
#[derive(Debug, Clone)]
pub struct ComponentInfo {
    pub name: String,
    pub version: i32,
    /// Offset of the component's opening tag.
    pub offset: u64,
    /// Offset of the payload.
    pub data_offset: u64,
    /// Payload size as declared in the stream.
    pub data_size: i64,
}

impl Default for ComponentInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: -1,
            offset: 0,
            data_offset: 0,
            data_size: 0,
        }
    }
}

/// Reads one component at the cursor: framing, codec or skip, then framing
/// verification. `info` is filled in as far as parsing got, so the caller
/// can report where a failure happened.
fn read_component<R: Read + Seek>(
    r: &mut R,
    svg_version: SaveVersion,
    select: ComponentSelection,
    registry: &ComponentRegistry,
    ctx: &mut RestoreContext<'_>,
    info: &mut ComponentInfo,
) -> Result<()> {
    info.offset = r.stream_position()?;
    info.name = match tag::read_tag(r, true)? {
        Some(name) => name,
        None => return Err(SaveError::OpeningTagFormat),
    };
    info.version = r.read_i32_le()?;
    info.data_size = if svg_version.has_64bit_sizes() {
        r.read_i64_le()?
    } else {
        r.read_i32_le()? as i64
    };
    info.data_offset = r.stream_position()?;

    match registry.find(&info.name, select) {
        Some(handler) => {
            if info.version > handler.version || info.version < handler.lowest_version {
                return Err(SaveError::UnsupportedComponentVersion {
                    saved: info.version,
                    lowest: handler.lowest_version,
                    highest: handler.version,
                });
            }
            if info.data_size < 0 {
                return Err(SaveError::Corrupt("negative component size"));
            }
            handler.codec.read(r, info.version, info.data_size, ctx)?;
        }
        None => {
            // Unknown or unselected components are skipped over wholesale.
            // That only works if the declared size can be trusted.
            if info.data_size < 0 {
                return Err(SaveError::UnsupportedComponent(info.name.clone()));
            }
            r.seek(SeekFrom::Current(info.data_size))?;
        }
    }

    let consumed = r.stream_position()?.saturating_sub(info.data_offset) as i64;
    if consumed != info.data_size {
        return Err(SaveError::ComponentSizeMismatch {
            expected: info.data_size,
            actual: consumed,
        });
    }
    if !tag::match_tag(r, &info.name, false)? {
        return Err(SaveError::ClosingTagFormat);
    }
    Ok(())
}

/// Reads the component list at the cursor, dispatching each component to
/// its registered codec (or skipping it) until the list's closing tag.
///
/// Component failures come back as [`SaveError::Component`], wrapping the
/// cause together with the component's name, index and offset.
pub fn read_all<R: Read + Seek>(
    r: &mut R,
    svg_version: SaveVersion,
    select: ComponentSelection,
    registry: &ComponentRegistry,
    ctx: &mut RestoreContext<'_>,
) -> Result<()> {
    if !tag::match_tag(r, COMPONENT_LIST_TAG, true)? {
        return Err(SaveError::ListOpeningTagFormat);
    }

    let stream_end = stream_len(r)?;
    let mut index = 0usize;
    loop {
        // The list's closing tag is the only successful way out.
        let probe_pos = r.stream_position()?;
        if tag::match_tag(r, COMPONENT_LIST_TAG, false)? {
            return Ok(());
        }
        r.seek(SeekFrom::Start(probe_pos))?;

        let mut info = ComponentInfo::default();
        if let Err(source) = read_component(r, svg_version, select, registry, ctx, &mut info) {
            let name = if info.name.is_empty() {
                "unknown".to_string()
            } else {
                info.name
            };
            return Err(SaveError::Component {
                index,
                name,
                version: info.version,
                offset: info.offset,
                source: Box::new(source),
            });
        }
        index += 1;

        if r.stream_position()? >= stream_end {
            return Err(SaveError::ListClosingTagMissing);
        }
    }
}

fn stream_len<R: Seek>(r: &mut R) -> Result<u64> {
    let pos = r.stream_position()?;
    let end = r.seek(SeekFrom::End(0))?;
    r.seek(SeekFrom::Start(pos))?;
    Ok(end)
}

/// Runs `body` inside a length-prefixed block: reserves a 64-bit size field,
/// writes the payload, then patches the true size in. The cursor ends after
/// the payload.
pub(crate) fn write_sized<W, F>(w: &mut W, body: F) -> Result<()>
where
    W: Write + Seek,
    F: FnOnce(&mut W) -> Result<()>,
{
    let size_pos = w.stream_position()?;
    w.write_i64_le(0)?;
    body(w)?;
    let end_pos = w.stream_position()?;
    w.seek(SeekFrom::Start(size_pos))?;
    w.write_i64_le((end_pos - size_pos - 8) as i64)?;
    w.seek(SeekFrom::Start(end_pos))?;
    Ok(())
}

/// Runs `body` with the cursor moved to `at`, then restores the cursor.
/// For patching reserved fields inside an already-written block.
pub(crate) fn patch_back<W, F>(w: &mut W, at: u64, body: F) -> Result<()>
where
    W: Write + Seek,
    F: FnOnce(&mut W) -> Result<()>,
{
    let pos = w.stream_position()?;
    w.seek(SeekFrom::Start(at))?;
    body(w)?;
    w.seek(SeekFrom::Start(pos))?;
    Ok(())
}

fn write_component<W: Write + Seek>(
    w: &mut W,
    handler: &ComponentHandler,
    ctx: &SaveContext<'_>,
) -> Result<()> {
    tag::write_tag(w, handler.name, true)?;
    w.write_i32_le(handler.version)?;
    write_sized(w, |w| handler.codec.write(w, ctx))?;
    tag::write_tag(w, handler.name, false)
}

/// Writes the component list for every registered component the selection
/// enables, in registration order. Always writes the current container
/// format, 64-bit sizes included.
pub fn write_all_common<W: Write + Seek>(
    w: &mut W,
    select: ComponentSelection,
    registry: &ComponentRegistry,
    ctx: &SaveContext<'_>,
) -> Result<()> {
    tag::write_tag(w, COMPONENT_LIST_TAG, true)?;
    for (index, handler) in registry.handlers().iter().enumerate() {
        if !handler.selection.intersects(select) {
            continue;
        }
        write_component(w, handler, ctx).map_err(|source| SaveError::ComponentWrite {
            index,
            name: handler.name,
            source: Box::new(source),
        })?;
    }
    tag::write_tag(w, COMPONENT_LIST_TAG, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restore::{NullHeap, PreservedParams, RestoredData, SavePlugin};
    use parlor_game::GameWorld;
    use proptest::prelude::*;
    use std::io::Cursor;

    #[test]
    fn write_sized_patches_length_and_restores_cursor() {
        let mut cursor = Cursor::new(Vec::new());
        cursor.write_i32_le(7).unwrap();
        write_sized(&mut cursor, |w| w.write_bytes(&[1, 2, 3, 4, 5])).unwrap();
        cursor.write_u8(0xaa).unwrap();

        let buf = cursor.into_inner();
        // marker + size field + payload + trailing byte
        assert_eq!(buf.len(), 4 + 8 + 5 + 1);
        assert_eq!(&buf[4..12], &5i64.to_le_bytes());
        assert_eq!(buf[17], 0xaa);
    }

    #[test]
    fn patch_back_leaves_cursor_at_end() {
        let mut cursor = Cursor::new(Vec::new());
        cursor.write_i32_le(0).unwrap();
        cursor.write_bytes(b"abcd").unwrap();
        patch_back(&mut cursor, 0, |w| w.write_i32_le(99)).unwrap();
        assert_eq!(cursor.stream_position().unwrap(), 8);
        let buf = cursor.into_inner();
        assert_eq!(&buf[0..4], &99i32.to_le_bytes());
        assert_eq!(&buf[4..], b"abcd");
    }

    #[test]
    fn registry_resolves_shared_names_by_selection() {
        let registry = ComponentRegistry::new();

        let full = registry
            .find("Dynamic Sprites", ComponentSelection::DYNAMIC_SPRITES)
            .unwrap();
        assert_eq!(full.codec, Codec::DynamicSprites);

        let subset = registry
            .find("Dynamic Sprites", ComponentSelection::OBJECT_SPRITES)
            .unwrap();
        assert_eq!(subset.codec, Codec::ObjectSprites);

        assert!(registry.find("Dynamic Sprites", ComponentSelection::AUDIO).is_none());
        assert!(registry.find("No Such Component", ComponentSelection::ALL).is_none());
    }

    #[test]
    fn move_lists_enable_from_either_selection_bit() {
        let registry = ComponentRegistry::new();
        assert!(registry.find("Move Lists", ComponentSelection::CHARACTERS).is_some());
        assert!(registry.find("Move Lists", ComponentSelection::THIS_ROOM).is_some());
        assert!(registry.find("Move Lists", ComponentSelection::GUI).is_none());
    }

    proptest! {
        /// Arbitrary bytes must never panic the reader, only error.
        #[test]
        fn reader_never_panics(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
            let registry = ComponentRegistry::new();
            let mut game = GameWorld::default();
            let params = PreservedParams::from_game(&game);
            let mut restored = RestoredData::default();
            let mut heap = NullHeap;
            let mut plugins: Vec<Box<dyn SavePlugin>> = Vec::new();
            let mut ctx = RestoreContext {
                game: &mut game,
                params: &params,
                restored: &mut restored,
                heap: &mut heap,
                plugins: &mut plugins,
            };
            let mut cursor = Cursor::new(data);
            let _ = read_all(
                &mut cursor,
                SaveVersion::CURRENT,
                ComponentSelection::ALL,
                &registry,
                &mut ctx,
            );
        }
    }
}

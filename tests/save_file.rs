//! A full save written to and restored from an actual file, the way the
//! engine uses the component layer in production.

use std::io::{Seek, SeekFrom};

use anyhow::Result;
use parlor_game::{CharacterState, DialogOptionFlags, DialogState, GameWorld};
use parlor_save::{
    read_all, write_all_common, ComponentRegistry, ComponentSelection, NullHeap, PreservedParams,
    RestoreContext, RestoreFlags, RestoredData, SaveContext, SavePlugin, SaveVersion,
};

fn sample_world() -> GameWorld {
    let mut game = GameWorld::new();
    game.characters.push(CharacterState {
        name: "Ego".to_string(),
        room: 3,
        x: 160,
        y: 120,
        ..CharacterState::default()
    });
    game.dialogs.push(DialogState {
        option_flags: vec![DialogOptionFlags::ON, DialogOptionFlags::empty()],
    });
    game.script.global_data = vec![1, 2, 3, 4];
    game.sync_move_lists();
    game
}

#[test]
fn file_backed_save_round_trips() -> Result<()> {
    let mut saved = sample_world();
    saved.play.score = 42;
    saved.characters[0].x = 17;
    saved.dialogs[0].option_flags[1] = DialogOptionFlags::ON | DialogOptionFlags::SAID;

    let mut file = tempfile::tempfile()?;
    {
        let heap = NullHeap;
        let plugins: Vec<Box<dyn SavePlugin>> = Vec::new();
        let ctx = SaveContext {
            game: &saved,
            heap: &heap,
            plugins: &plugins,
        };
        write_all_common(&mut file, ComponentSelection::ALL, &ComponentRegistry::new(), &ctx)?;
    }

    file.seek(SeekFrom::Start(0))?;
    let mut game = sample_world();
    let params = PreservedParams::from_game(&game);
    let mut restored = RestoredData::default();
    let mut heap = NullHeap;
    let mut plugins: Vec<Box<dyn SavePlugin>> = Vec::new();
    {
        let mut ctx = RestoreContext {
            game: &mut game,
            params: &params,
            restored: &mut restored,
            heap: &mut heap,
            plugins: &mut plugins,
        };
        read_all(
            &mut file,
            SaveVersion::CURRENT,
            ComponentSelection::ALL,
            &ComponentRegistry::new(),
            &mut ctx,
        )?;
    }

    assert_eq!(restored.restore_flags, RestoreFlags::empty());
    assert_eq!(game.play.score, 42);
    assert_eq!(game.characters, saved.characters);
    assert_eq!(game.dialogs, saved.dialogs);
    assert_eq!(restored.global_script_data, vec![1, 2, 3, 4]);
    Ok(())
}

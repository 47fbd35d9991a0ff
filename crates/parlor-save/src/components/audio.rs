//! "Audio" component: clip type runtime settings, what every mixer channel
//! was playing, the crossfade, and ambient sounds.

use std::io::{Read, Seek, Write};

use parlor_game::{
    AmbientSound, AudioClipType, LEGACY_GAME_CHANNELS, LEGACY_TOTAL_CHANNELS, MAX_GAME_CHANNELS,
    SPEECH_CHANNELS, TOTAL_AUDIO_CHANNELS,
};

use crate::content::{assert_compat_limit, assert_game_content};
use crate::error::Result;
use crate::io::{ReadLeExt, WriteLeExt};
use crate::restore::{RestoreContext, SaveContext};

pub(crate) const VER_INITIAL: i32 = 0;
/// Channels gain a room position (x, y, max distance).
pub(crate) const VER_SOURCE_POS: i32 = 1;
/// Channel counts are stored instead of assumed from engine constants.
pub(crate) const VER_DYN_CHANNELS: i32 = 2;
pub(crate) const VERSION: i32 = VER_DYN_CHANNELS;
pub(crate) const LOWEST_VERSION: i32 = VER_INITIAL;

pub(crate) fn write<W: Write + Seek>(w: &mut W, ctx: &SaveContext<'_>) -> Result<()> {
    let audio = &ctx.game.audio;
    let play = &ctx.game.play;

    w.write_i32_le(audio.clip_types.len() as i32)?;
    w.write_u8(TOTAL_AUDIO_CHANNELS as u8)?;
    w.write_u8(audio.game_channels as u8)?;
    w.write_i16_le(0)?; // reserved

    for (i, clip_type) in audio.clip_types.iter().enumerate() {
        write_clip_type(w, clip_type)?;
        w.write_i32_le(play.default_audio_type_volumes[i])?;
    }

    for slot in 0..TOTAL_AUDIO_CHANNELS {
        match audio.channels.get(slot).and_then(Option::as_ref) {
            Some(channel) if channel.clip_id >= 0 => {
                w.write_i32_le(channel.clip_id)?;
                w.write_i32_le(channel.position)?;
                w.write_i32_le(channel.priority)?;
                w.write_i32_le(channel.repeat)?;
                w.write_i32_le(channel.volume)?;
                w.write_i32_le(0)?; // reserved
                w.write_i32_le(channel.volume_percent)?;
                w.write_i32_le(channel.pan)?;
                w.write_i32_le(channel.speed)?;
                w.write_i32_le(channel.source_x)?;
                w.write_i32_le(channel.source_y)?;
                w.write_i32_le(channel.max_dist)?;
            }
            _ => w.write_i32_le(-1)?,
        }
    }

    w.write_i32_le(audio.crossfade.fading_channel)?;
    w.write_i32_le(audio.crossfade.volume_per_step)?;
    w.write_i32_le(audio.crossfade.step)?;
    w.write_i32_le(audio.crossfade.volume_at_start)?;
    w.write_i32_le(audio.current_music_type)?;

    for ambient in audio.ambients.iter().take(audio.game_channels) {
        write_ambient(w, ambient)?;
    }
    Ok(())
}

pub(crate) fn read<R: Read + Seek>(
    r: &mut R,
    version: i32,
    ctx: &mut RestoreContext<'_>,
) -> Result<()> {
    let clip_types_read = assert_game_content(
        r.read_i32_le()? as u32,
        ctx.game.audio.clip_types.len() as u32,
        "Audio Clip Types",
        &mut ctx.restored.restore_flags,
    )?;
    ctx.restored.counts.audio_clip_types = clip_types_read;

    let (total_channels, game_channels) = if version >= VER_DYN_CHANNELS {
        let total = r.read_u8()? as usize;
        let game = r.read_u8()? as usize;
        let _reserved = r.read_i16_le()?;
        assert_compat_limit(total as i64, TOTAL_AUDIO_CHANNELS as i64, "System Audio Channels")?;
        assert_compat_limit(game as i64, MAX_GAME_CHANNELS as i64, "Game Audio Channels")?;
        (total, game)
    } else {
        let _unused = r.read_i32_le()?;
        (LEGACY_TOTAL_CHANNELS, LEGACY_GAME_CHANNELS)
    };

    for i in 0..clip_types_read as usize {
        let clip_type = read_clip_type(r)?;
        let default_volume = r.read_i32_le()?;
        // Entries past the game's own table are consumed but dropped.
        if let Some(slot) = ctx.game.audio.clip_types.get_mut(i) {
            *slot = clip_type;
        }
        if let Some(slot) = ctx.game.play.default_audio_type_volumes.get_mut(i) {
            *slot = default_volume;
        }
    }

    for i in 0..total_channels {
        let channel = &mut ctx.restored.audio_channels[i];
        channel.clip_id = r.read_i32_le()?;
        if channel.clip_id < 0 {
            continue;
        }
        channel.position = r.read_i32_le()?.max(0);
        channel.priority = r.read_i32_le()?;
        channel.repeat = r.read_i32_le()?;
        channel.volume = r.read_i32_le()?;
        let _reserved = r.read_i32_le()?;
        channel.volume_percent = r.read_i32_le()?;
        channel.pan = r.read_i32_le()?;
        channel.speed = r.read_i32_le()?;
        if version >= VER_SOURCE_POS {
            channel.source_x = r.read_i32_le()?;
            channel.source_y = r.read_i32_le()?;
            channel.max_dist = r.read_i32_le()?;
        }
    }

    ctx.game.audio.crossfade.fading_channel = r.read_i32_le()?;
    ctx.game.audio.crossfade.volume_per_step = r.read_i32_le()?;
    ctx.game.audio.crossfade.step = r.read_i32_le()?;
    ctx.game.audio.crossfade.volume_at_start = r.read_i32_le()?;
    ctx.game.audio.current_music_type = r.read_i32_le()?;

    for i in 0..game_channels {
        let ambient = read_ambient(r)?;
        if let Some(slot) = ctx.game.audio.ambients.get_mut(i) {
            *slot = ambient;
        }
    }

    // Ambients cannot resume until the mixer is running again; remember
    // which clip each channel should retrigger and mark them stopped.
    for i in SPEECH_CHANNELS..game_channels {
        let Some(ambient) = ctx.game.audio.ambients.get_mut(i) else {
            break;
        };
        if ambient.channel == 0 {
            ctx.restored.ambient_retrigger[i] = 0;
        } else {
            ctx.restored.ambient_retrigger[i] = ambient.clip;
            ambient.channel = 0;
        }
    }
    Ok(())
}

fn write_clip_type<W: Write>(w: &mut W, clip_type: &AudioClipType) -> Result<()> {
    w.write_i32_le(clip_type.id)?;
    w.write_i32_le(clip_type.reserved_channels)?;
    w.write_i32_le(clip_type.volume_reduction_while_speech)?;
    w.write_i32_le(clip_type.crossfade_speed)
}

fn read_clip_type<R: Read>(r: &mut R) -> Result<AudioClipType> {
    Ok(AudioClipType {
        id: r.read_i32_le()?,
        reserved_channels: r.read_i32_le()?,
        volume_reduction_while_speech: r.read_i32_le()?,
        crossfade_speed: r.read_i32_le()?,
    })
}

fn write_ambient<W: Write>(w: &mut W, ambient: &AmbientSound) -> Result<()> {
    w.write_i32_le(ambient.channel)?;
    w.write_i32_le(ambient.x)?;
    w.write_i32_le(ambient.y)?;
    w.write_i32_le(ambient.volume)?;
    w.write_i32_le(ambient.clip)?;
    w.write_i32_le(ambient.max_dist)
}

fn read_ambient<R: Read>(r: &mut R) -> Result<AmbientSound> {
    Ok(AmbientSound {
        channel: r.read_i32_le()?,
        x: r.read_i32_le()?,
        y: r.read_i32_le()?,
        volume: r.read_i32_le()?,
        clip: r.read_i32_le()?,
        max_dist: r.read_i32_le()?,
    })
}

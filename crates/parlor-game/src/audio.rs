use crate::defines::{MAX_GAME_CHANNELS, TOTAL_AUDIO_CHANNELS};

/// A category of audio clips (music, sound, ambient, voice) with shared
/// playback rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AudioClipType {
    pub id: i32,
    pub reserved_channels: i32,
    pub volume_reduction_while_speech: i32,
    pub crossfade_speed: i32,
}

/// A repeating ambient sound bound to a channel, optionally positioned in
/// the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmbientSound {
    /// Channel the sound occupies; 0 means not playing.
    pub channel: i32,
    pub x: i32,
    pub y: i32,
    pub volume: i32,
    pub clip: i32,
    pub max_dist: i32,
}

/// What one mixer channel is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelPlayback {
    pub clip_id: i32,
    pub position: i32,
    pub priority: i32,
    pub repeat: i32,
    pub volume: i32,
    pub volume_percent: i32,
    pub pan: i32,
    pub speed: i32,
    pub source_x: i32,
    pub source_y: i32,
    pub max_dist: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CrossfadeState {
    /// Channel a crossfade is running on, or 0.
    pub fading_channel: i32,
    pub volume_per_step: i32,
    pub step: i32,
    pub volume_at_start: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioRuntime {
    pub clip_types: Vec<AudioClipType>,
    /// How many of the mixer channels this game schedules clips on.
    pub game_channels: usize,
    /// One slot per game channel.
    pub ambients: Vec<AmbientSound>,
    /// One slot per mixer channel; `None` when idle.
    pub channels: Vec<Option<ChannelPlayback>>,
    pub crossfade: CrossfadeState,
    pub current_music_type: i32,
}

impl Default for AudioRuntime {
    fn default() -> Self {
        Self {
            clip_types: Vec::new(),
            game_channels: MAX_GAME_CHANNELS,
            ambients: vec![AmbientSound::default(); MAX_GAME_CHANNELS],
            channels: vec![None; TOTAL_AUDIO_CHANNELS],
            crossfade: CrossfadeState::default(),
            current_music_type: 0,
        }
    }
}

//! Sound cue routing
//!
//! The simulation only names cues. Decoding and playback belong to an
//! `AudioBackend` supplied by the host; `AudioManager` applies volume and mute.

/// Sound cues the game can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Title screen tapped
    GameStart,
    /// Lead-in finished, round timer started
    TimeStart,
    /// Bullet released
    Shoot,
    /// Enemy fell into the water
    Splash,
    /// Bullet hit an enemy
    Hit,
    /// Round timer ran out
    GameOver,
    /// Leaderboard revealed
    Ranking,
    /// Rewind and start the background music
    BgmStart,
    /// Pause the background music
    BgmStop,
}

impl SoundCue {
    /// Background music cues are governed by the music volume
    pub fn is_music(self) -> bool {
        matches!(self, SoundCue::BgmStart | SoundCue::BgmStop)
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Fire-and-forget playback at the given volume (0.0 - 1.0)
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Backend that only logs cues (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioBackend for LogAudio {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::trace!("Sound {:?} at volume {:.2}", cue, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogAudio))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective volume for a cue
    fn effective_volume(&self, cue: SoundCue) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if cue.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    /// Play a sound cue
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume(cue);
        // Stopping music must go through even when silent
        if vol <= 0.0 && cue != SoundCue::BgmStop {
            return;
        }
        self.backend.play(cue, vol);
    }
}

//! Sound effects
//!
//! Four short clips loaded at startup and played through rodio. Builds
//! without the default `audio` feature only log the effects.

use std::sync::Arc;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    Blip,
    /// Goal scored
    Blam,
    /// Paddle pushed back from a wall
    Blap,
    /// Ball bounces off top/bottom wall
    Blop,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Blip,
        SoundEffect::Blam,
        SoundEffect::Blap,
        SoundEffect::Blop,
    ];

    /// File name inside the asset directory
    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::Blip => "blip.wav",
            SoundEffect::Blam => "blam.wav",
            SoundEffect::Blap => "blap.wav",
            SoundEffect::Blop => "blop.wav",
        }
    }

    /// Sound for a simulation event
    pub fn for_event(event: GameEvent) -> Self {
        match event {
            GameEvent::PaddleHit(_) => SoundEffect::Blip,
            GameEvent::Goal(_) => SoundEffect::Blam,
            GameEvent::PaddleBump(_) => SoundEffect::Blap,
            GameEvent::WallBounce => SoundEffect::Blop,
        }
    }

    fn index(self) -> usize {
        match self {
            SoundEffect::Blip => 0,
            SoundEffect::Blam => 1,
            SoundEffect::Blap => 2,
            SoundEffect::Blop => 3,
        }
    }
}

/// Encoded clip bytes for every effect
#[derive(Debug, Clone)]
pub struct SoundBank {
    clips: [Arc<[u8]>; 4],
}

impl SoundBank {
    /// Build from clips given in `SoundEffect::ALL` order
    pub fn new(clips: [Arc<[u8]>; 4]) -> Self {
        Self { clips }
    }

    pub fn clip(&self, effect: SoundEffect) -> &Arc<[u8]> {
        &self.clips[effect.index()]
    }
}

/// Audio manager for the game
pub struct AudioManager {
    bank: SoundBank,
    #[cfg(feature = "audio")]
    output: Option<(rodio::OutputStream, rodio::OutputStreamHandle)>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(bank: SoundBank, settings: &Settings) -> Self {
        #[cfg(feature = "audio")]
        let output = match rodio::OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(e) => {
                log::warn!("Failed to open audio output ({e}) - audio disabled");
                None
            }
        };
        #[cfg(not(feature = "audio"))]
        log::info!("Built without the `audio` feature - sound effects are silent");
        log::info!("Effect volume {:.2}", settings.effective_volume());

        Self {
            bank,
            #[cfg(feature = "audio")]
            output,
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            muted: settings.muted,
        }
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect without waiting for it to finish
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let clip = self.bank.clip(effect);
        log::trace!("play {:?} ({} bytes) at {:.2}", effect, clip.len(), vol);

        #[cfg(feature = "audio")]
        self.play_clip(clip.clone(), vol);
    }

    #[cfg(feature = "audio")]
    fn play_clip(&self, clip: Arc<[u8]>, vol: f32) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        let Ok(sink) = rodio::Sink::try_new(handle) else {
            return;
        };
        let Ok(source) = rodio::Decoder::new(std::io::Cursor::new(clip)) else {
            return;
        };
        sink.set_volume(vol);
        sink.append(source);
        sink.detach();
    }
}

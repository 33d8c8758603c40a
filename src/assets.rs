//! Asset loading
//!
//! The font and the four sound clips are read once at startup from the
//! configured asset directory. Any failure here is fatal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusttype::Font;

use crate::audio::{SoundBank, SoundEffect};
use crate::error::AssetError;

/// Font used for every label
pub const FONT_FILE: &str = "stocky.ttf";

/// Everything loaded from disk
pub struct Assets {
    pub font: Font<'static>,
    pub sounds: SoundBank,
}

impl Assets {
    /// Load the font and all sound effects from `dir`
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        log::info!("Loading assets from {}", dir.display());
        let font = load_font(&dir.join(FONT_FILE))?;
        let sounds = SoundBank::load(dir)?;
        Ok(Self { font, sounds })
    }
}

impl SoundBank {
    /// Read every clip in `SoundEffect::ALL` order
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let clip = |effect: SoundEffect| load_sound(&dir.join(effect.file_name()));
        let [blip, blam, blap, blop] = SoundEffect::ALL;
        Ok(SoundBank::new([
            clip(blip)?,
            clip(blam)?,
            clip(blap)?,
            clip(blop)?,
        ]))
    }
}

fn read(path: &Path) -> Result<Vec<u8>, AssetError> {
    fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => AssetError::Missing {
            path: path.to_path_buf(),
        },
        _ => AssetError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn load_font(path: &Path) -> Result<Font<'static>, AssetError> {
    let bytes = read(path)?;
    let font = Font::try_from_vec(bytes).ok_or_else(|| AssetError::InvalidFont {
        path: path.to_path_buf(),
    })?;
    log::debug!("Loaded font {}", path.display());
    Ok(font)
}

fn load_sound(path: &Path) -> Result<Arc<[u8]>, AssetError> {
    let bytes = read(path)?;
    if bytes.is_empty() {
        return Err(invalid_sound(path));
    }
    let clip: Arc<[u8]> = Arc::from(bytes);

    #[cfg(feature = "audio")]
    if rodio::Decoder::new(io::Cursor::new(clip.clone())).is_err() {
        return Err(invalid_sound(path));
    }

    log::debug!("Loaded sound {} ({} bytes)", path.display(), clip.len());
    Ok(clip)
}

fn invalid_sound(path: &Path) -> AssetError {
    AssetError::InvalidSound {
        path: PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "ping-pong-assets-{}-{}",
            std::process::id(),
            name
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_font_is_reported() {
        let dir = temp_dir("empty");
        let err = Assets::load(&dir).err().unwrap();
        assert!(matches!(err, AssetError::Missing { .. }));
        assert_eq!(err.path(), &dir.join(FONT_FILE));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_garbage_font_is_rejected() {
        let dir = temp_dir("bad-font");
        fs::write(dir.join(FONT_FILE), b"definitely not a font").unwrap();
        let err = Assets::load(&dir).err().unwrap();
        assert!(matches!(err, AssetError::InvalidFont { .. }));
        let _ = fs::remove_dir_all(&dir);
    }

    #[cfg(not(feature = "audio"))]
    #[test]
    fn test_missing_sound_names_the_file() {
        let dir = temp_dir("one-sound");
        fs::write(dir.join("blip.wav"), b"RIFF").unwrap();
        let err = SoundBank::load(&dir).err().unwrap();
        assert!(matches!(err, AssetError::Missing { .. }));
        assert_eq!(err.path(), &dir.join("blam.wav"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_empty_sound_is_rejected() {
        let dir = temp_dir("empty-sound");
        fs::write(dir.join("blip.wav"), b"").unwrap();
        let err = SoundBank::load(&dir).err().unwrap();
        assert!(matches!(err, AssetError::InvalidSound { .. }));
        let _ = fs::remove_dir_all(&dir);
    }

    /// Two samples of 16-bit mono PCM
    #[cfg(feature = "audio")]
    fn tiny_wav() -> Vec<u8> {
        let mut wav = Vec::new();
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&40u32.to_le_bytes());
        wav.extend_from_slice(b"WAVEfmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes());
        wav.extend_from_slice(&8000u32.to_le_bytes());
        wav.extend_from_slice(&16000u32.to_le_bytes());
        wav.extend_from_slice(&2u16.to_le_bytes());
        wav.extend_from_slice(&16u16.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&4u32.to_le_bytes());
        wav.extend_from_slice(&[0, 0, 0, 0]);
        wav
    }

    #[cfg(feature = "audio")]
    #[test]
    fn test_undecodable_sounds_are_rejected() {
        let dir = temp_dir("not-audio");
        for effect in SoundEffect::ALL {
            fs::write(dir.join(effect.file_name()), b"not audio").unwrap();
        }
        let err = SoundBank::load(&dir).err().unwrap();
        assert!(matches!(err, AssetError::InvalidSound { .. }));
        assert_eq!(err.path(), &dir.join("blip.wav"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[cfg(feature = "audio")]
    #[test]
    fn test_wav_clips_load() {
        let dir = temp_dir("wavs");
        for effect in SoundEffect::ALL {
            fs::write(dir.join(effect.file_name()), tiny_wav()).unwrap();
        }
        let bank = SoundBank::load(&dir).unwrap();
        assert_eq!(bank.clip(SoundEffect::Blop).len(), tiny_wav().len());
        let _ = fs::remove_dir_all(&dir);
    }

    #[cfg(not(feature = "audio"))]
    #[test]
    fn test_sound_bank_keeps_clip_bytes() {
        let dir = temp_dir("all-sounds");
        for effect in SoundEffect::ALL {
            fs::write(dir.join(effect.file_name()), effect.file_name()).unwrap();
        }
        let bank = SoundBank::load(&dir).unwrap();
        assert_eq!(bank.clip(SoundEffect::Blop).as_ref(), b"blop.wav");
        assert_eq!(bank.clip(SoundEffect::Blam).as_ref(), b"blam.wav");
        let _ = fs::remove_dir_all(&dir);
    }
}

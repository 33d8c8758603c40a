//! Startup errors
//!
//! Nothing can fail once the loop is running; everything here is fatal and
//! reported before the window appears.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// A font or sound file could not be loaded
#[derive(Debug)]
pub enum AssetError {
    /// File does not exist
    Missing { path: PathBuf },
    /// File exists but could not be read
    Unreadable { path: PathBuf, source: io::Error },
    /// File is not a usable TrueType/OpenType font
    InvalidFont { path: PathBuf },
    /// File is empty or not a decodable sound
    InvalidSound { path: PathBuf },
}

impl AssetError {
    pub fn path(&self) -> &PathBuf {
        match self {
            AssetError::Missing { path }
            | AssetError::Unreadable { path, .. }
            | AssetError::InvalidFont { path }
            | AssetError::InvalidSound { path } => path,
        }
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Missing { path } => write!(f, "asset not found: {}", path.display()),
            AssetError::Unreadable { path, source } => {
                write!(f, "failed to read asset {}: {}", path.display(), source)
            }
            AssetError::InvalidFont { path } => write!(f, "not a valid font: {}", path.display()),
            AssetError::InvalidSound { path } => {
                write!(f, "not a valid sound: {}", path.display())
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Unreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Anything that stops the game from starting
#[derive(Debug)]
pub enum StartupError {
    Asset(AssetError),
    /// Window, surface, adapter or device creation failed
    Graphics(String),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Asset(e) => write!(f, "{e}"),
            StartupError::Graphics(msg) => write!(f, "graphics initialization failed: {msg}"),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartupError::Asset(e) => Some(e),
            StartupError::Graphics(_) => None,
        }
    }
}

impl From<AssetError> for StartupError {
    fn from(e: AssetError) -> Self {
        StartupError::Asset(e)
    }
}

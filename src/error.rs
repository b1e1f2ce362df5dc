//! Crate-level error types.

use std::fmt;

/// Errors produced by the noclip crate.
#[derive(Debug)]
pub enum NoclipError {
    /// A location path did not match the `/{webType}/{orgId}.{assetId}`
    /// prefix. Carries the offending path.
    InvalidLocationFormat(String),
    /// A host primitive (pointer lock, history) is not available.
    UnsupportedCapability(String),
    /// The map manifest reported the asset as not ready.
    MapNotReady(String),
    /// No position in the location and no spawn point in the manifest.
    NoSpawn,
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Malformed replay script.
    Script(String),
    /// A browser API call failed.
    Host(String),
}

impl fmt::Display for NoclipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocationFormat(path) => {
                write!(f, "could not determine asset from location {path:?}")
            }
            Self::UnsupportedCapability(msg) => f.write_str(msg),
            Self::MapNotReady(msg) => write!(f, "map not ready: {msg}"),
            Self::NoSpawn => f.write_str("map has no spawn points"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Script(msg) => write!(f, "replay script error: {msg}"),
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for NoclipError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NoclipError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

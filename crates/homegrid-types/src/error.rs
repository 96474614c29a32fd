//! Error types for homegrid.

use std::io;

/// Errors produced by the launcher engine and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum LauncherError {
    #[error("index {index} out of range for sequence of length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("unknown sequence: {0}")]
    UnknownSequence(String),

    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("launch error: {0}")]
    Launch(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LauncherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_display() {
        let e = LauncherError::OutOfRange { index: 7, len: 4 };
        assert_eq!(
            format!("{e}"),
            "index 7 out of range for sequence of length 4"
        );
    }

    #[test]
    fn invalid_layout_display() {
        let e = LauncherError::InvalidLayout("duplicate id: a.b".into());
        assert_eq!(format!("{e}"), "invalid layout: duplicate id: a.b");
    }

    #[test]
    fn unknown_sequence_display() {
        let e = LauncherError::UnknownSequence("catalog".into());
        assert_eq!(format!("{e}"), "unknown sequence: catalog");
    }

    #[test]
    fn catalog_unavailable_display() {
        let e = LauncherError::CatalogUnavailable("package manager gone".into());
        assert_eq!(format!("{e}"), "catalog unavailable: package manager gone");
    }

    #[test]
    fn persistence_display() {
        let e = LauncherError::Persistence("disk full".into());
        assert_eq!(format!("{e}"), "persistence error: disk full");
    }

    #[test]
    fn launch_display() {
        let e = LauncherError::Launch("no launch intent".into());
        assert_eq!(format!("{e}"), "launch error: no launch intent");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: LauncherError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: LauncherError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: LauncherError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<()> = Err(LauncherError::Config("oops".into()));
        assert!(r.is_err());
    }
}

//! Player configuration from the environment.
//!
//! | Variable                  | Default | Meaning                              |
//! |---------------------------|---------|--------------------------------------|
//! | `FOLIO_FRAME_INTERVAL_MS` | `16`    | Delay between rendered frames        |
//! | `FOLIO_PACING_FILE`       | unset   | YAML file overriding pacing defaults |
//! | `FOLIO_AUTOSTART`         | `false` | Enter without waiting for the user   |
//! | `FOLIO_ASSET_ROOT`        | `.`     | Directory the asset URIs resolve in  |

use std::path::{Path, PathBuf};
use std::time::Duration;

use folio_sequence::domain::config::PacingConfig;

use crate::error::AppError;

/// Environment variable for the frame interval in milliseconds.
pub const FRAME_INTERVAL_VAR: &str = "FOLIO_FRAME_INTERVAL_MS";
/// Environment variable for the pacing file path.
pub const PACING_FILE_VAR: &str = "FOLIO_PACING_FILE";
/// Environment variable for autostart.
pub const AUTOSTART_VAR: &str = "FOLIO_AUTOSTART";
/// Environment variable for the asset root directory.
pub const ASSET_ROOT_VAR: &str = "FOLIO_ASSET_ROOT";

const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Runtime configuration for the player.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Delay between rendered frames.
    pub frame_interval: Duration,
    /// Whether to enter without waiting for the user.
    pub autostart: bool,
    /// Directory the track and scene URIs resolve against.
    pub asset_root: PathBuf,
    /// Presentation pacing.
    pub pacing: PacingConfig,
}

impl PlayerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if a variable is malformed or the pacing file
    /// cannot be read or fails validation.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if a variable is malformed or the pacing file
    /// cannot be read or fails validation.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let frame_interval_ms = match lookup(FRAME_INTERVAL_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::Config(format!("{FRAME_INTERVAL_VAR} must be a valid u64: {e}"))
            })?,
            None => DEFAULT_FRAME_INTERVAL_MS,
        };
        if frame_interval_ms == 0 {
            return Err(AppError::Config(format!(
                "{FRAME_INTERVAL_VAR} must be greater than zero"
            )));
        }

        let autostart = match lookup(AUTOSTART_VAR) {
            Some(raw) => parse_flag(AUTOSTART_VAR, &raw)?,
            None => false,
        };

        let asset_root = lookup(ASSET_ROOT_VAR).map_or_else(|| PathBuf::from("."), PathBuf::from);

        let pacing = match lookup(PACING_FILE_VAR) {
            Some(path) => load_pacing_file(Path::new(&path))?,
            None => PacingConfig::default(),
        };

        Ok(Self {
            frame_interval: Duration::from_millis(frame_interval_ms),
            autostart,
            asset_root,
            pacing,
        })
    }
}

/// Loads and validates a YAML pacing file. Keys left out keep their
/// defaults.
///
/// # Errors
///
/// Returns `AppError::Io` if the file cannot be read,
/// `AppError::PacingFile` if it is not valid YAML for the pacing schema, and
/// `AppError::Domain` if the values fail validation.
pub fn load_pacing_file(path: &Path) -> Result<PacingConfig, AppError> {
    let text = std::fs::read_to_string(path)?;
    let pacing: PacingConfig = serde_yaml::from_str(&text)?;
    pacing.validate()?;
    Ok(pacing)
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(AppError::Config(format!(
            "{name} must be a boolean, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        // Act
        let config = PlayerConfig::from_lookup(lookup_from(&[])).unwrap();

        // Assert
        assert_eq!(config.frame_interval, Duration::from_millis(16));
        assert!(!config.autostart);
        assert_eq!(config.asset_root, PathBuf::from("."));
        assert_eq!(config.pacing, PacingConfig::default());
    }

    #[test]
    fn test_reads_frame_interval_and_autostart() {
        let config = PlayerConfig::from_lookup(lookup_from(&[
            (FRAME_INTERVAL_VAR, "33"),
            (AUTOSTART_VAR, "Yes"),
            (ASSET_ROOT_VAR, "/srv/folio"),
        ]))
        .unwrap();

        assert_eq!(config.frame_interval, Duration::from_millis(33));
        assert!(config.autostart);
        assert_eq!(config.asset_root, PathBuf::from("/srv/folio"));
    }

    #[test]
    fn test_rejects_zero_frame_interval() {
        let result = PlayerConfig::from_lookup(lookup_from(&[(FRAME_INTERVAL_VAR, "0")]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_rejects_malformed_autostart() {
        let result = PlayerConfig::from_lookup(lookup_from(&[(AUTOSTART_VAR, "sometimes")]));

        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains(AUTOSTART_VAR)),
            other => panic!("expected Config, got {other:?}"),
        }
    }

    #[test]
    fn test_pacing_file_overrides_defaults() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "caption_one_ms: 400\nzoom_duration_ms: 2500").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        // Act
        let config = PlayerConfig::from_lookup(lookup_from(&[(PACING_FILE_VAR, path.as_str())])).unwrap();

        // Assert
        assert_eq!(config.pacing.caption_one_ms, 400);
        assert_eq!(config.pacing.zoom_duration_ms, 2500);
        assert_eq!(config.pacing.finish_ms, 5200);
    }

    #[test]
    fn test_pacing_file_with_out_of_order_cues_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fade_ms: 6000").unwrap();

        let result = load_pacing_file(file.path());

        assert!(matches!(result, Err(AppError::Domain(_))));
    }

    #[test]
    fn test_pacing_file_with_overflowing_mount_delay_is_rejected() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "intro_mount_delay_ms: {}", u64::MAX).unwrap();

        // Act
        let result = load_pacing_file(file.path());

        // Assert
        match result {
            Err(AppError::Domain(err)) => assert!(err.to_string().contains("overflows")),
            other => panic!("expected Domain, got {other:?}"),
        }
    }

    #[test]
    fn test_pacing_file_with_unknown_easing_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "zoom_easing: bounce").unwrap();

        let result = load_pacing_file(file.path());

        assert!(matches!(result, Err(AppError::PacingFile(_))));
    }

    #[test]
    fn test_missing_pacing_file_is_an_io_error() {
        let result = load_pacing_file(Path::new("/nonexistent/folio-pacing.yaml"));

        assert!(matches!(result, Err(AppError::Io(_))));
    }
}

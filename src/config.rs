//! Runtime settings.
//!
//! Settings come from an optional JSON file; anything the file omits falls
//! back to the defaults below. Command-line flags are applied on top by the
//! binary before [`Settings::validate`] runs.

use anyhow::{Context as _, Result, bail};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";

pub const DEFAULT_MAX_STUDENTS_PER_COURSE: usize = 20;

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

fn default_max_students_per_course() -> usize {
    DEFAULT_MAX_STUDENTS_PER_COURSE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,
    /// Upper bound on students enrolled in a single course.
    #[serde(default = "default_max_students_per_course")]
    pub max_students_per_course: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            max_students_per_course: default_max_students_per_course(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_students_per_course == 0 {
            bail!("max_students_per_course must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let s = Settings::load(None).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.bind_address.to_string(), DEFAULT_BIND_ADDRESS);
        assert_eq!(s.max_students_per_course, 20);
        s.validate().unwrap();
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"max_students_per_course": 5}}"#).unwrap();
        let s = Settings::load(Some(f.path())).unwrap();
        assert_eq!(s.max_students_per_course, 5);
        assert_eq!(s.bind_address, default_bind_address());
    }

    #[test]
    fn test_unknown_field_and_bad_json_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"max_students": 5}}"#).unwrap();
        assert!(Settings::load(Some(f.path())).is_err());

        let mut g = tempfile::NamedTempFile::new().unwrap();
        write!(g, "not json").unwrap();
        let err = Settings::load(Some(g.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/course-api.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_zero_capacity_is_invalid() {
        let s = Settings {
            max_students_per_course: 0,
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use csvforge_core::IndexMode;

use super::{WorkspaceError, WorkspaceResult};

/// Settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "csvforge.toml";

/// `index` setting as written in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IndexSetting {
    #[default]
    Auto,
    Custom,
    None,
}

impl IndexSetting {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexSetting::Auto => "auto",
            IndexSetting::Custom => "custom",
            IndexSetting::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rows: usize,
    pub index: IndexSetting,
    /// `MIN-MAX` bounds used when `index = "custom"`.
    pub index_range: Option<String>,
    pub seed: Option<u64>,
    /// Name lexicon; the bundled one when unset.
    pub lexicon_path: Option<PathBuf>,
    pub store_path: PathBuf,
    pub run_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: 10,
            index: IndexSetting::Auto,
            index_range: None,
            seed: None,
            lexicon_path: None,
            store_path: PathBuf::from(".csvforge").join("dataset.csv"),
            run_dir: PathBuf::from("runs"),
        }
    }
}

impl Settings {
    /// Index mode with command-line overrides applied over the settings.
    pub fn index_mode(
        &self,
        index: Option<IndexSetting>,
        index_range: Option<&str>,
    ) -> WorkspaceResult<IndexMode> {
        let index = index.unwrap_or(self.index);
        let range = index_range.or(self.index_range.as_deref());
        IndexMode::parse(index.as_str(), range).map_err(WorkspaceError::Invalid)
    }
}

/// Read settings from `path`; a missing file yields the defaults.
pub fn load_settings(path: &Path) -> WorkspaceResult<Settings> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join(format!("csvforge_{}.toml", uuid::Uuid::new_v4()));
        let settings = load_settings(&path).expect("defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings: Settings = toml::from_str(
            r#"
rows = 250
index = "custom"
index_range = "100-199"
"#,
        )
        .expect("parse settings");

        assert_eq!(settings.rows, 250);
        assert_eq!(settings.run_dir, PathBuf::from("runs"));
        assert_eq!(
            settings.index_mode(None, None).expect("index mode"),
            IndexMode::Custom { min: 100, max: 199 }
        );
        assert_eq!(
            settings.index_mode(None, Some("5-9")).expect("index mode"),
            IndexMode::Custom { min: 5, max: 9 }
        );
        assert_eq!(
            settings
                .index_mode(Some(IndexSetting::None), None)
                .expect("index mode"),
            IndexMode::None
        );
    }

    #[test]
    fn custom_index_needs_a_range() {
        let settings = Settings {
            index: IndexSetting::Custom,
            ..Settings::default()
        };
        assert!(matches!(
            settings.index_mode(None, None),
            Err(WorkspaceError::Invalid(_))
        ));
    }
}

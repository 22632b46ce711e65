use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Bundled lexicon, relative to the crate's `assets` directory.
pub const DEFAULT_LEXICON: &str = "names.json";

/// First/last name corpus split by gender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lexicon {
    #[serde(default)]
    pub male_first_names: Vec<String>,
    #[serde(default)]
    pub female_first_names: Vec<String>,
    #[serde(default)]
    pub male_last_names: Vec<String>,
    #[serde(default)]
    pub female_last_names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl Lexicon {
    pub fn from_json_str(contents: &str) -> Result<Self, GenerationError> {
        let lexicon: Lexicon = serde_json::from_str(contents)
            .map_err(|err| GenerationError::Asset(format!("invalid lexicon json: {err}")))?;
        Ok(lexicon.trimmed())
    }

    /// True when both genders have first and last names.
    pub fn is_complete(&self) -> bool {
        !self.male_first_names.is_empty()
            && !self.female_first_names.is_empty()
            && !self.male_last_names.is_empty()
            && !self.female_last_names.is_empty()
    }

    /// `(first names, last names)` for `gender`.
    pub fn names_for(&self, gender: Gender) -> (&[String], &[String]) {
        match gender {
            Gender::Male => (&self.male_first_names, &self.male_last_names),
            Gender::Female => (&self.female_first_names, &self.female_last_names),
        }
    }

    fn trimmed(self) -> Self {
        fn clean(values: Vec<String>) -> Vec<String> {
            values
                .into_iter()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .collect()
        }
        Self {
            male_first_names: clean(self.male_first_names),
            female_first_names: clean(self.female_first_names),
            male_last_names: clean(self.male_last_names),
            female_last_names: clean(self.female_last_names),
        }
    }
}

#[derive(Debug, Clone)]
enum LexiconState {
    Pending,
    Ready(Arc<Lexicon>),
    Unavailable(String),
}

/// Shared slot for the lexicon, filled once by an asynchronous load.
///
/// Generation never waits on the slot: callers check [`LexiconHandle::is_ready`]
/// or let validation report the column as unavailable.
#[derive(Debug)]
pub struct LexiconHandle {
    state: RwLock<LexiconState>,
}

impl LexiconHandle {
    pub fn pending() -> Self {
        Self {
            state: RwLock::new(LexiconState::Pending),
        }
    }

    pub fn ready(lexicon: Lexicon) -> Self {
        Self {
            state: RwLock::new(LexiconState::Ready(Arc::new(lexicon))),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(LexiconState::Unavailable(reason.into())),
        }
    }

    /// Publish the outcome of a load. Later calls are ignored once resolved.
    pub fn resolve(&self, outcome: Result<Lexicon, GenerationError>) {
        let Ok(mut state) = self.state.write() else {
            return;
        };
        if !matches!(*state, LexiconState::Pending) {
            return;
        }
        *state = match outcome {
            Ok(lexicon) => LexiconState::Ready(Arc::new(lexicon)),
            Err(err) => LexiconState::Unavailable(err.to_string()),
        };
    }

    pub fn is_ready(&self) -> bool {
        self.state
            .read()
            .map(|state| matches!(*state, LexiconState::Ready(_)))
            .unwrap_or(false)
    }

    pub fn is_pending(&self) -> bool {
        self.state
            .read()
            .map(|state| matches!(*state, LexiconState::Pending))
            .unwrap_or(false)
    }

    /// The loaded lexicon, or the reason it cannot be used.
    pub fn get(&self) -> Result<Arc<Lexicon>, String> {
        let state = self
            .state
            .read()
            .map_err(|_| "lexicon state poisoned".to_string())?;
        match &*state {
            LexiconState::Ready(lexicon) => Ok(Arc::clone(lexicon)),
            LexiconState::Pending => Err("name lexicon is still loading".to_string()),
            LexiconState::Unavailable(reason) => {
                Err(format!("name lexicon unavailable: {reason}"))
            }
        }
    }
}

impl Default for LexiconHandle {
    fn default() -> Self {
        Self::pending()
    }
}

/// Load a lexicon file without blocking the runtime.
pub async fn load_lexicon(path: &Path) -> Result<Lexicon, GenerationError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| read_error(path, err))?;
    Lexicon::from_json_str(&contents)
}

/// Synchronous variant of [`load_lexicon`].
pub fn load_lexicon_blocking(path: &Path) -> Result<Lexicon, GenerationError> {
    let contents = std::fs::read_to_string(path).map_err(|err| read_error(path, err))?;
    Lexicon::from_json_str(&contents)
}

/// Path of the lexicon bundled with this crate.
pub fn default_lexicon_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join(DEFAULT_LEXICON)
}

fn read_error(path: &Path, err: std::io::Error) -> GenerationError {
    if err.kind() == ErrorKind::NotFound {
        GenerationError::Asset(format!("lexicon not found at {}", path.display()))
    } else {
        GenerationError::Asset(format!(
            "failed to read lexicon {}: {}",
            path.display(),
            err
        ))
    }
}

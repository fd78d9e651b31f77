//! Language preference. Lives in the model and is persisted through the
//! shell's key-value store under `settings:language`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capabilities::{KeyNamespace, KvError, KvOperation, KvOutput, KvResult, TypedKvStore};
use crate::LANGUAGE_STORAGE_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ne,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::En, Self::Ne];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::En => 0,
            Self::Ne => 1,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ne => "नेपाली",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("language storage failed: {0}")]
    Storage(#[from] KvError),
    #[error("unexpected storage reply: {0}")]
    UnexpectedReply(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub language: Language,
    /// Set once the stored preference has been read (or found missing).
    pub restored: bool,
}

fn language_store() -> TypedKvStore<Language> {
    TypedKvStore::new(KeyNamespace::Settings)
}

pub fn load_language_op() -> Result<KvOperation, SettingsError> {
    Ok(language_store().get_op(LANGUAGE_STORAGE_KEY)?)
}

pub fn save_language_op(language: Language) -> Result<KvOperation, SettingsError> {
    Ok(language_store().set_op(LANGUAGE_STORAGE_KEY, &language)?)
}

/// `Ok(None)` means nothing has been stored yet.
pub fn decode_language(result: KvResult) -> Result<Option<Language>, SettingsError> {
    Ok(language_store().parse_value(result?)?)
}

pub fn confirm_write(result: KvResult) -> Result<(), SettingsError> {
    match result? {
        KvOutput::Written => Ok(()),
        KvOutput::Value(_) => Err(SettingsError::UnexpectedReply("value returned for a write")),
    }
}

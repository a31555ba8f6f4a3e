//! Sort key codec: a note with id `i` is stored under the sort key `note#i`.

use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use thiserror::Error;

use crate::data::NoteId;
use crate::lib_constants::NOTE_SORT_KEY_PREFIX;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum NoteKeyError {
    #[error("sort key \"{0}\" is missing the note prefix")]
    MissingPrefix(String),

    #[error("sort key \"{0}\" contains no note id")]
    EmptyId(String),
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NoteSortKey(String);

impl NoteSortKey {
    pub fn encode(id: &NoteId) -> NoteSortKey {
        NoteSortKey(format!("{NOTE_SORT_KEY_PREFIX}{id}"))
    }

    pub fn decode(sort_key: &str) -> Result<NoteId, NoteKeyError> {
        let id = sort_key.strip_prefix(NOTE_SORT_KEY_PREFIX)
            .ok_or_else(|| NoteKeyError::MissingPrefix(sort_key.to_owned()))?;
        NoteId::try_from(id.to_owned())
            .map_err(|_| NoteKeyError::EmptyId(sort_key.to_owned()))
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for NoteSortKey {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0[..]
    }
}

impl Display for NoteSortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NoteSortKey> for String {
    fn from(value: NoteSortKey) -> Self {
        value.0
    }
}

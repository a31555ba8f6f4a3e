use thiserror::Error;
use crate::note_key::NoteKeyError;
use crate::table::TableError;

#[derive(Debug, Error)]
pub enum NoteStoreError {
    #[error(transparent)]
    Table(TableError),

    #[error("note not found")]
    NotFound,

    #[error("note update has no fields to change")]
    EmptyPatch,

    #[error("malformed note record: {0}")]
    MalformedRecord(#[from] NoteKeyError),
}

impl From<TableError> for NoteStoreError {
    fn from(e: TableError) -> Self {
        match e {
            TableError::ConditionalCheckFailed => NoteStoreError::NotFound,
            _ => NoteStoreError::Table(e),
        }
    }
}

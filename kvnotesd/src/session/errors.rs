use kvnotes::data::IdParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("malformed user id: {0}")]
    MalformedUserId(#[from] IdParseError),
}

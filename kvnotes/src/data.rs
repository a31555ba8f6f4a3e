use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;
use rocket::request::FromParam;
use thiserror::Error;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UserId(String);

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NoteId(String);

#[derive(Debug, Error, Eq, PartialEq)]
pub enum IdParseError {
    #[error("identifier is empty")]
    Empty,
}

macro_rules! string_id {
    ($name:ident) => {
        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.is_empty() {
                    Err(IdParseError::Empty)
                } else {
                    Ok($name(s.to_owned()))
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                if value.is_empty() {
                    Err(IdParseError::Empty)
                } else {
                    Ok($name(value))
                }
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0[..]
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

string_id!(UserId);
string_id!(NoteId);

impl<'a> FromParam<'a> for NoteId {
    type Error = IdParseError;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        NoteId::from_str(param)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Note {
    pub id: NoteId,
    pub user_id: UserId,
    pub title: String,
    pub body: String,
}

/// What a note list shows: the body is never loaded for it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NoteListItem {
    pub id: NoteId,
    pub title: String,
}

/// Partial note update, `None` fields are left as they are.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl NotePatch {
    pub fn title(title: impl Into<String>) -> Self {
        NotePatch {
            title: Some(title.into()),
            body: None,
        }
    }

    pub fn body(body: impl Into<String>) -> Self {
        NotePatch {
            title: None,
            body: Some(body.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }
}

//! Who is asking: the user id comes from an external session collaborator.

mod errors;

use async_trait::async_trait;
use kvnotes::data::UserId;
use log::trace;
use rocket::Request;
use std::str::FromStr;

pub use errors::SessionError;

#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// The user id of the request's session, `None` if there is none.
    async fn current_user(
        &self,
        request: &Request<'_>,
    ) -> Result<Option<UserId>, SessionError>;
}

/// Takes the user id from a header set by an authenticating reverse proxy.
///
/// The daemon must not be reachable other than through that proxy.
pub struct TrustedHeaderSessionResolver {
    header_name: String,
}

impl TrustedHeaderSessionResolver {
    pub fn new(header_name: impl Into<String>) -> Self {
        TrustedHeaderSessionResolver {
            header_name: header_name.into(),
        }
    }
}

#[async_trait]
impl SessionResolver for TrustedHeaderSessionResolver {
    async fn current_user(
        &self,
        request: &Request<'_>,
    ) -> Result<Option<UserId>, SessionError> {
        let value = match request.headers().get_one(&self.header_name) {
            Some(value) => value,
            None => {
                trace!("no \"{}\" header, anonymous request", self.header_name);
                return Ok(None);
            },
        };
        Ok(Some(UserId::from_str(value.trim())?))
    }
}

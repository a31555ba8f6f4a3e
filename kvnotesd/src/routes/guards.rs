use async_trait::async_trait;
use kvnotes::data::UserId;
use log::{error, warn};
use rocket::{Request, State};
use rocket::http::Status;
use rocket::outcome::try_outcome;
use rocket::request::{FromRequest, Outcome};
use crate::session::{SessionError, SessionResolver};

/// The current user if the request has a session.
#[derive(Debug)]
pub struct MaybeUser(pub Option<UserId>);

/// The current user; requests without a session fail with 401, which the
/// catcher turns into a redirect to the login page.
#[derive(Debug)]
pub struct RequireUser(pub UserId);

#[async_trait]
impl<'r> FromRequest<'r> for MaybeUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let resolver = match request.guard::<&State<Box<dyn SessionResolver>>>().await {
            Outcome::Success(resolver) => resolver,
            _ => {
                error!("no session resolver is installed");
                return Outcome::Error((Status::InternalServerError, ()));
            },
        };
        match resolver.current_user(request).await {
            Ok(user) => Outcome::Success(MaybeUser(user)),
            Err(e @ SessionError::MalformedUserId(_)) => {
                warn!("treating request as anonymous: {e}");
                Outcome::Success(MaybeUser(None))
            },
        }
    }
}

#[async_trait]
impl<'r> FromRequest<'r> for RequireUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match try_outcome!(request.guard::<MaybeUser>().await) {
            MaybeUser(Some(user)) => Outcome::Success(RequireUser(user)),
            MaybeUser(None) => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}

use kvnotes::config::app_config::AppConfig;
use kvnotes::lib_constants::DEFAULT_LOGIN_URL;
use kvnotes::storage::NoteStoreError;
use log::{error, warn};
use rocket::http::{RawStr, Status};
use rocket::response::content::RawHtml;
use rocket::response::{Redirect, Responder};
use rocket::{catch, catchers, Catcher, Request};
use thiserror::Error;
use crate::html::{escape, page};

#[derive(Debug, Error)]
pub enum WebError {
    #[error("not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(NoteStoreError),
}

impl From<NoteStoreError> for WebError {
    fn from(e: NoteStoreError) -> Self {
        match e {
            NoteStoreError::NotFound => WebError::NotFound,
            NoteStoreError::EmptyPatch => WebError::BadRequest(e.to_string()),
            _ => WebError::Store(e),
        }
    }
}

impl<'r> Responder<'r, 'static> for WebError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        match self {
            WebError::NotFound => Err(Status::NotFound),
            WebError::BadRequest(message) => {
                warn!("bad request to {}: {message}", request.uri());
                Err(Status::BadRequest)
            },
            WebError::Store(e) => {
                error!("note store failure serving {}: {e}", request.uri());
                Err(Status::InternalServerError)
            },
        }
    }
}

#[catch(401)]
fn unauthorized(request: &Request<'_>) -> Redirect {
    let login_url = request.rocket()
        .state::<AppConfig>()
        .map(|config| config.session.login_url.as_str())
        .unwrap_or(DEFAULT_LOGIN_URL);
    Redirect::to(login_redirect(login_url, &request.uri().to_string()))
}

/// `login_url` with the page to come back to in its `redirectTo` parameter.
fn login_redirect(login_url: &str, origin: &str) -> String {
    let separator = if login_url.contains('?') { '&' } else { '?' };
    format!(
        "{login_url}{separator}redirectTo={}",
        RawStr::new(origin).percent_encode(),
    )
}

#[catch(400)]
fn bad_request() -> RawHtml<String> {
    error_page("Bad request", "The submitted data could not be used.")
}

#[catch(404)]
fn not_found(request: &Request<'_>) -> RawHtml<String> {
    if request.uri().path().as_str().starts_with("/notes/") {
        error_page("Not found", "Note not found")
    } else {
        error_page("Not found", "Page not found")
    }
}

#[catch(default)]
fn default_catcher(status: Status, _request: &Request<'_>) -> RawHtml<String> {
    error_page(
        status.reason().unwrap_or("Error"),
        &format!("An unexpected error occurred: {status}"),
    )
}

fn error_page(title: &str, message: &str) -> RawHtml<String> {
    page(
        title,
        &format!(
            "<main><p>{}</p><p><a href=\"/notes\">Back to notes</a></p></main>",
            escape(message),
        ),
    )
}

pub fn catchers() -> Vec<Catcher> {
    catchers![
        unauthorized,
        bad_request,
        not_found,
        default_catcher,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_keeps_the_query() {
        assert_eq!(
            login_redirect("/login", "/notes/abc?x=1"),
            "/login?redirectTo=%2Fnotes%2Fabc%3Fx%3D1",
        );
    }

    #[test]
    fn redirect_extends_an_existing_query() {
        assert_eq!(
            login_redirect("https://sso.example.com/auth?app=kvnotes", "/notes"),
            "https://sso.example.com/auth?app=kvnotes&redirectTo=%2Fnotes",
        );
    }
}

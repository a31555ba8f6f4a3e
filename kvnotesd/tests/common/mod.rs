use kvnotes::config::app_config::AppConfig;
use kvnotes::lib_constants::DEFAULT_USER_HEADER;
use kvnotesd::{base_figment, build_rocket};
use rocket::figment::Figment;
use rocket::figment::providers::Serialized;
use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::{Client, LocalRequest};

pub const USER_1: &str = "u1";
pub const USER_2: &str = "u2";

/// Configuration of a quiet debug instance on an in-memory table.
pub fn test_figment() -> Figment {
    base_figment(rocket::Config::debug_default())
        .merge(("log_level", "off"))
        .merge(Serialized::defaults(AppConfig::default()))
}

/// The full app on an in-memory table.
pub async fn client() -> Client {
    Client::tracked(build_rocket(test_figment()))
        .await
        .expect("rocket failed to ignite")
}

pub fn as_user<'c>(request: LocalRequest<'c>, user: &str) -> LocalRequest<'c> {
    request.header(Header::new(DEFAULT_USER_HEADER, user.to_owned()))
}

pub fn form<'c>(request: LocalRequest<'c>, body: &str) -> LocalRequest<'c> {
    request
        .header(ContentType::Form)
        .body(body.to_owned())
}

pub fn location(response: &rocket::local::asynchronous::LocalResponse<'_>) -> String {
    response.headers()
        .get_one("Location")
        .expect("no Location header")
        .to_owned()
}

/// Creates a note through the form and returns its page path.
pub async fn create_note(client: &Client, user: &str, body: &str) -> String {
    let response = form(as_user(client.post("/notes/new"), user), body)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::SeeOther);
    let path = location(&response);
    assert!(path.starts_with("/notes/"), "unexpected redirect: {path}");
    path
}

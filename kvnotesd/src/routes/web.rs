use kvnotes::config::app_config::AppConfig;
use rocket::response::content::RawHtml;
use rocket::{get, routes, Route, State};
use crate::html::{escape, page};
use crate::routes::MaybeUser;

#[get("/")]
fn index(user: MaybeUser, config: &State<AppConfig>) -> RawHtml<String> {
    let call_to_action = match user.0 {
        Some(user) => format!(
            "<a href=\"/notes\">View notes for {}</a>",
            escape(&user),
        ),
        None => format!(
            "<a href=\"{}\">Log in</a>",
            escape(&config.session.login_url),
        ),
    };
    page(
        "kvnotes",
        &format!(
            "<main>\
            <h1>kvnotes</h1>\
            <p>A simple note taking app</p>\
            <div>{call_to_action}</div>\
            </main>"
        ),
    )
}

pub fn web_routes() -> Vec<Route> {
    routes![
        index,
    ]
}

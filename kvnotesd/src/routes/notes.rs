use std::str::FromStr;
use kvnotes::data::{Note, NoteId, NoteListItem, NotePatch};
use kvnotes::storage::NoteStore;
use log::{debug, info};
use rocket::form::Form;
use rocket::http::{RawStr, Status};
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::{get, post, routes, FromForm, Responder, Route, State};
use crate::html::{escape, page};
use crate::routes::{RequireUser, WebError};

const EDIT_INTENT_SUFFIX: &str = "-edit";

#[derive(Debug, FromForm)]
struct NewNoteForm {
    title: Option<String>,
    body: Option<String>,
}

/// Submitted by the per-field edit forms and the delete form of a note.
#[derive(Debug, FromForm)]
struct NoteActionForm {
    intent: Option<String>,
    title: Option<String>,
    body: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum NoteField {
    Title,
    Body,
}

impl FromStr for NoteField {
    type Err = WebError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(NoteField::Title),
            "body" => Ok(NoteField::Body),
            _ => Err(WebError::BadRequest(format!("unknown note field \"{s}\""))),
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
enum NoteIntent {
    Edit(NoteField),
    Delete,
}

/// `"<field>-edit"` edits that field, anything else deletes the note.
fn parse_intent(intent: Option<&str>) -> Result<NoteIntent, WebError> {
    match intent.and_then(|i| i.strip_suffix(EDIT_INTENT_SUFFIX)) {
        Some(field) => Ok(NoteIntent::Edit(field.parse()?)),
        None => Ok(NoteIntent::Delete),
    }
}

#[derive(Responder)]
enum CreateNoteResponse {
    Created(Redirect),
    Invalid((Status, RawHtml<String>)),
}

fn note_path(id: &NoteId) -> String {
    format!("/notes/{}", RawStr::new(id).percent_encode())
}

#[get("/notes")]
async fn notes_index(
    user: RequireUser,
    store: &State<NoteStore>,
) -> Result<RawHtml<String>, WebError> {
    let notes = store.list_notes(&user.0).await?;
    Ok(page("Notes", &render_notes_index(&notes)))
}

#[get("/notes/new")]
fn new_note(_user: RequireUser) -> RawHtml<String> {
    page("New note", &render_new_note_form("", "", None, None))
}

#[post("/notes/new", data = "<form>")]
async fn create_note(
    user: RequireUser,
    store: &State<NoteStore>,
    form: Form<NewNoteForm>,
) -> Result<CreateNoteResponse, WebError> {
    let NewNoteForm { title, body } = form.into_inner();
    let title = title.unwrap_or_default();
    let body = body.unwrap_or_default();
    let title_error = title.trim().is_empty().then_some("Title is required");
    let body_error = body.trim().is_empty().then_some("Body is required");
    if title_error.is_some() || body_error.is_some() {
        debug!("rejecting incomplete new note of user \"{}\"", user.0);
        return Ok(
            CreateNoteResponse::Invalid((
                Status::BadRequest,
                page(
                    "New note",
                    &render_new_note_form(&title, &body, title_error, body_error),
                ),
            ))
        );
    }
    let note = store.create_note(&user.0, title, body).await?;
    info!("user \"{}\" created note {}", user.0, note.id);
    Ok(CreateNoteResponse::Created(Redirect::to(note_path(&note.id))))
}

#[get("/notes/<id>")]
async fn note_details(
    id: NoteId,
    user: RequireUser,
    store: &State<NoteStore>,
) -> Result<RawHtml<String>, WebError> {
    let note = store.get_note(&user.0, &id)
        .await?
        .ok_or(WebError::NotFound)?;
    Ok(page(&note.title, &render_note(&note)))
}

#[post("/notes/<id>", data = "<form>")]
async fn note_action(
    id: NoteId,
    user: RequireUser,
    store: &State<NoteStore>,
    form: Form<NoteActionForm>,
) -> Result<Redirect, WebError> {
    let NoteActionForm { intent, title, body } = form.into_inner();
    match parse_intent(intent.as_deref())? {
        NoteIntent::Edit(field) => {
            // an empty value means "not supplied"
            let patch = match field {
                NoteField::Title => NotePatch {
                    title: title.filter(|v| !v.is_empty()),
                    body: None,
                },
                NoteField::Body => NotePatch {
                    title: None,
                    body: body.filter(|v| !v.is_empty()),
                },
            };
            store.update_note(&user.0, &id, patch).await?;
            Ok(Redirect::to(note_path(&id)))
        },
        NoteIntent::Delete => {
            store.delete_note(&user.0, &id).await?;
            info!("user \"{}\" deleted note {id}", user.0);
            Ok(Redirect::to("/notes"))
        },
    }
}

fn render_notes_index(notes: &[NoteListItem]) -> String {
    let list = if notes.is_empty() {
        "<p>No notes yet</p>".to_owned()
    } else {
        let items: String = notes
            .iter()
            .map(|note| format!(
                "<li><a href=\"{}\">{}</a></li>",
                escape(&note_path(&note.id)),
                escape(&note.title),
            ))
            .collect();
        format!("<ol>{items}</ol>")
    };
    format!(
        "<main>\
        <nav><a href=\"/notes/new\">+ New note</a></nav>\
        {list}\
        <p>No note selected. Select a note, or <a href=\"/notes/new\">create a new note.</a></p>\
        </main>"
    )
}

fn render_new_note_form(
    title: &str,
    body: &str,
    title_error: Option<&str>,
    body_error: Option<&str>,
) -> String {
    let error = |e: Option<&str>| e
        .map(|e| format!("<p role=\"alert\">{}</p>", escape(e)))
        .unwrap_or_default();
    format!(
        "<main>\
        <form method=\"post\" action=\"/notes/new\">\
        <label>Title: <input type=\"text\" name=\"title\" value=\"{}\"></label>{}\
        <label>Body: <textarea name=\"body\" rows=\"8\">{}</textarea></label>{}\
        <button type=\"submit\">Save</button>\
        </form>\
        </main>",
        escape(title),
        error(title_error),
        escape(body),
        error(body_error),
    )
}

fn render_note(note: &Note) -> String {
    let action = escape(&note_path(&note.id));
    format!(
        "<main>\
        <p><a href=\"/notes\">All notes</a></p>\
        <form method=\"post\" action=\"{action}\">\
        <input type=\"hidden\" name=\"intent\" value=\"title-edit\">\
        <input type=\"text\" name=\"title\" aria-label=\"titleInput\" value=\"{title}\">\
        <button type=\"submit\" aria-label=\"titleButton\">Save title</button>\
        </form>\
        <form method=\"post\" action=\"{action}\">\
        <input type=\"hidden\" name=\"intent\" value=\"body-edit\">\
        <textarea name=\"body\" rows=\"8\" aria-label=\"bodyInput\">{body}</textarea>\
        <button type=\"submit\" aria-label=\"bodyButton\">Save body</button>\
        </form>\
        <hr>\
        <form method=\"post\" action=\"{action}\">\
        <input type=\"hidden\" name=\"intent\" value=\"delete\">\
        <button type=\"submit\">Delete</button>\
        </form>\
        </main>",
        title = escape(&note.title),
        body = escape(&note.body),
    )
}

pub fn notes_routes() -> Vec<Route> {
    routes![
        notes_index,
        new_note,
        create_note,
        note_details,
        note_action,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_intents() {
        assert_eq!(parse_intent(Some("title-edit")).unwrap(), NoteIntent::Edit(NoteField::Title));
        assert_eq!(parse_intent(Some("body-edit")).unwrap(), NoteIntent::Edit(NoteField::Body));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = parse_intent(Some("color-edit")).expect_err("should fail");
        assert!(matches!(err, WebError::BadRequest(_)), "wrong error type: {err:#?}");
    }

    #[test]
    fn other_intents_delete() {
        assert_eq!(parse_intent(Some("delete")).unwrap(), NoteIntent::Delete);
        assert_eq!(parse_intent(None).unwrap(), NoteIntent::Delete);
    }

    #[test]
    fn note_list_is_escaped() {
        let html = render_notes_index(&[
            NoteListItem {
                id: "a".parse().unwrap(),
                title: "<b>bold</b>".into(),
            },
        ]);
        assert!(html.contains("<a href=\"/notes/a\">&lt;b&gt;bold&lt;/b&gt;</a>"));
    }

    #[test]
    fn note_list_keeps_order() {
        let html = render_notes_index(&[
            NoteListItem {
                id: "a".parse().unwrap(),
                title: "first".into(),
            },
            NoteListItem {
                id: "b".parse().unwrap(),
                title: "second".into(),
            },
        ]);
        assert!(html.contains(
            "<ol><li><a href=\"/notes/a\">first</a></li><li><a href=\"/notes/b\">second</a></li></ol>"
        ));
        assert!(!html.contains("No notes yet"));
    }
}

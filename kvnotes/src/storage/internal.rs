use log::{debug, trace, warn};

use crate::data::{Note, NoteId, NoteListItem, NotePatch, UserId};
use crate::lib_constants::{BODY_ATTRIBUTE, NOTE_SORT_KEY_PREFIX, TITLE_ATTRIBUTE};
use crate::note_key::NoteSortKey;
use crate::rng::{NoteIdSource, RandomNoteIdSource};
use crate::storage::errors::NoteStoreError;
use crate::table::{Attributes, Item, KeyValueTable, TableError, TableKey};


/// Notes of every user, kept in one key-value table.
///
/// A note lives in its owner's partition under the sort key `note#<id>`,
/// so every operation is scoped by the user id the caller passes in and a
/// note of another user is simply not found. Each operation is exactly one
/// table call and table errors are passed through as they are.
pub struct NoteStore {
    table: Box<dyn KeyValueTable>,
    ids: Box<dyn NoteIdSource>,
}

impl NoteStore {
    pub fn new(table: Box<dyn KeyValueTable>) -> Self {
        Self::with_id_source(table, Box::new(RandomNoteIdSource))
    }

    pub fn with_id_source(
        table: Box<dyn KeyValueTable>,
        ids: Box<dyn NoteIdSource>,
    ) -> Self {
        NoteStore { table, ids }
    }

    pub async fn get_note(
        &self,
        user_id: &UserId,
        id: &NoteId,
    ) -> Result<Option<Note>, NoteStoreError> {
        debug!("reading note {id} for user \"{user_id}\"");
        self.table
            .get_item(&note_key(user_id, id))
            .await?
            .map(note_from_item)
            .transpose()
    }

    /// Ids and titles of all the notes of a user.
    ///
    /// The order is the table's query order, which is by sort key and so
    /// by id, not by creation time.
    pub async fn list_notes(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<NoteListItem>, NoteStoreError> {
        debug!("listing notes for user \"{user_id}\"");
        let items = self.table
            .query(user_id, NOTE_SORT_KEY_PREFIX)
            .await?;
        trace!("user \"{user_id}\" has {} notes", items.len());
        items
            .into_iter()
            .map(|mut item| -> Result<NoteListItem, NoteStoreError> {
                Ok(
                    NoteListItem {
                        id: NoteSortKey::decode(&item.key.sk)?,
                        title: take_attribute(&mut item, TITLE_ATTRIBUTE),
                    }
                )
            })
            .collect()
    }

    pub async fn create_note(
        &self,
        user_id: &UserId,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Note, NoteStoreError> {
        let note = Note {
            id: self.ids.generate(),
            user_id: user_id.clone(),
            title: title.into(),
            body: body.into(),
        };
        debug!("creating note {} for user \"{user_id}\"", note.id);
        self.table
            .put_item(
                Item {
                    key: note_key(user_id, &note.id),
                    attributes: Attributes::from([
                        (TITLE_ATTRIBUTE.to_owned(), note.title.clone()),
                        (BODY_ATTRIBUTE.to_owned(), note.body.clone()),
                    ]),
                }
            )
            .await?;
        Ok(note)
    }

    /// Changes the fields present in `patch` and leaves the rest alone.
    pub async fn update_note(
        &self,
        user_id: &UserId,
        id: &NoteId,
        patch: NotePatch,
    ) -> Result<Note, NoteStoreError> {
        debug!("updating note {id} for user \"{user_id}\"");
        if patch.is_empty() {
            return Err(NoteStoreError::EmptyPatch);
        }
        let item = self.table
            .update_item(&note_key(user_id, id), patch_attributes(patch))
            .await?;
        note_from_item(item)
    }

    /// Deleting a note that does not exist is not an error.
    pub async fn delete_note(
        &self,
        user_id: &UserId,
        id: &NoteId,
    ) -> Result<(), NoteStoreError> {
        debug!("deleting note {id} for user \"{user_id}\"");
        Ok(self.table.delete_item(&note_key(user_id, id)).await?)
    }
}

fn note_key(user_id: &UserId, id: &NoteId) -> TableKey {
    TableKey {
        pk: user_id.to_string(),
        sk: NoteSortKey::encode(id).into_string(),
    }
}

fn patch_attributes(patch: NotePatch) -> Attributes {
    [
        (TITLE_ATTRIBUTE, patch.title),
        (BODY_ATTRIBUTE, patch.body),
    ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_owned(), v)))
        .collect()
}

fn note_from_item(mut item: Item) -> Result<Note, NoteStoreError> {
    let id = NoteSortKey::decode(&item.key.sk)?;
    let title = take_attribute(&mut item, TITLE_ATTRIBUTE);
    let body = take_attribute(&mut item, BODY_ATTRIBUTE);
    let user_id = UserId::try_from(item.key.pk)
        .map_err(|_| TableError::MalformedItem {
            reason: format!("note record {} has an empty partition key", item.key.sk),
        })?;
    Ok(Note { id, user_id, title, body })
}

fn take_attribute(item: &mut Item, name: &str) -> String {
    item.attributes
        .remove(name)
        .unwrap_or_else(|| {
            warn!("note record {:?} has no \"{name}\" attribute", item.key);
            String::new()
        })
}

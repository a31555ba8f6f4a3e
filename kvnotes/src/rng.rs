#[cfg(test)] pub mod testing;

use rand::Rng;
use uuid::{Uuid, Variant, Version};

use crate::data::NoteId;

pub fn make_uuid<R: Rng>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.random())
        .with_variant(Variant::RFC4122)
        .with_version(Version::Random)
        .into_uuid()
}

pub trait NoteIdSource: Send + Sync {
    fn generate(&self) -> NoteId;
}

pub struct RandomNoteIdSource;

impl NoteIdSource for RandomNoteIdSource {
    fn generate(&self) -> NoteId {
        uuid_note_id(make_uuid(&mut rand::rng()))
    }
}

pub(crate) fn uuid_note_id(uuid: Uuid) -> NoteId {
    NoteId::try_from(uuid.hyphenated().to_string())
        .unwrap_or_else(|_| unreachable!("a formatted uuid is never empty"))
}

use std::sync::Mutex;
use rand::RngCore;

use crate::data::NoteId;
use crate::rng::{make_uuid, uuid_note_id, NoteIdSource};

/// Deterministic note ids from a seeded rng.
pub struct SeededNoteIds<R: RngCore + Send> {
    rng: Mutex<R>,
}

impl<R: RngCore + Send> SeededNoteIds<R> {
    pub fn new(rng: R) -> Self {
        SeededNoteIds {
            rng: Mutex::new(rng),
        }
    }
}

impl<R: RngCore + Send> NoteIdSource for SeededNoteIds<R> {
    fn generate(&self) -> NoteId {
        let mut rng = self.rng.lock().unwrap();
        uuid_note_id(make_uuid(&mut *rng))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use super::*;

    #[test]
    fn same_seed_same_ids() {
        let a = SeededNoteIds::new(StdRng::seed_from_u64(7));
        let b = SeededNoteIds::new(StdRng::seed_from_u64(7));
        assert_eq!(a.generate(), b.generate());
        assert_ne!(a.generate(), a.generate());
    }
}

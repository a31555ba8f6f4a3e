mod errors;
mod internal;

pub use errors::NoteStoreError;
pub use internal::NoteStore;

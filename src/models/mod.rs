mod identity;
mod note;
mod todo;

pub use identity::{Identity, GUEST_EMAIL};
pub use note::{generate_id, Note, DEFAULT_TITLE, PREVIEW_CHARS};
pub use todo::Todo;

pub mod cli;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod notes;
pub mod session;
pub mod summarize;

pub use db::Database;
pub use error::{NotesError, NotesResult};
pub use session::Session;

//! Note collection management: the collection itself, the edit buffer, and
//! the derived display order.

mod buffer;
mod collection;
mod view;

pub use buffer::EditBuffer;
pub use collection::{NoteCollection, SummaryTicket};
pub use view::{display_order, sorted_view};

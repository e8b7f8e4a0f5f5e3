use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::book::{Book, BookId};

/// Every change to a booklist produces an Event.
/// The presentation layer drains them to decide what to re-render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Books appended, ids in insertion order.
    BooksAdded {
        ids: Vec<BookId>,
        at: DateTime<Utc>,
    },
    /// The current book was marked read.
    BookFinished {
        book: Book,
        index: usize,
        at: DateTime<Utc>,
    },
    /// A book left the list; `index` is where it used to be.
    BookRemoved {
        book: Book,
        index: usize,
        at: DateTime<Utc>,
    },
}

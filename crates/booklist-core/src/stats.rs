//! Reading statistics snapshot.
//!
//! A [`ReadingStats`] is computed from a [`Booklist`] in one call so a
//! renderer can print the summary lines (or emit JSON) without touching the
//! list again.

use serde::{Deserialize, Serialize};

use crate::book::{Book, BookId};
use crate::booklist::Booklist;

/// Minimal reference to a book for summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: Option<BookId>,
    pub title: String,
    pub author: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id(),
            title: book.title.clone(),
            author: book.author.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingStats {
    pub total: usize,
    pub read: usize,
    pub unread: usize,
    pub current: Option<BookSummary>,
    pub current_index: Option<usize>,
    pub next: Option<BookSummary>,
    pub last_finished: Option<BookSummary>,
}

impl ReadingStats {
    /// Fraction of the list already read (0.0 to 1.0). Empty list is 0.0.
    pub fn completion_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.read as f64 / self.total as f64
        }
    }
}

impl Booklist {
    pub fn stats(&self) -> ReadingStats {
        ReadingStats {
            total: self.total_count(),
            read: self.read_count(),
            unread: self.unread_count(),
            current: self.current_book().map(BookSummary::from),
            current_index: self.current_book_index(),
            next: self.next_book().map(BookSummary::from),
            last_finished: self.last_finished().map(BookSummary::from),
        }
    }
}

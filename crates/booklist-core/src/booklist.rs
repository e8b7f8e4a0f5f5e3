//! Booklist aggregate.
//!
//! Owns the ordered collection of books and hands out ids. The "current"
//! and "next" books and all counters are derived by scanning the collection
//! on every query; nothing positional is cached across mutations.
//!
//! ## Reading order
//!
//! ```text
//! [ read, read, UNREAD(current), read, UNREAD(next), UNREAD ]
//! ```
//!
//! Finishing the current book marks it read, so the old `next` becomes
//! the new `current` with no extra bookkeeping.
//!
//! ## Usage
//!
//! ```ignore
//! let mut list = Booklist::new();
//! list.add([Book::new("Foundation", "Sci-Fi", "Isaac Asimov")]);
//! let finished = list.finish_current_book();
//! for event in list.drain_events() { /* re-render */ }
//! ```

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::book::{Book, BookId};
use crate::events::Event;

/// Ordered reading list.
///
/// Mutations queue [`Event`]s until [`drain_events`](Self::drain_events) is
/// called; callers that never render can ignore them, but a long-lived list
/// should be drained after each command or the queue keeps growing. Cloning
/// a list clones its undrained events too.
#[derive(Debug, Clone, Default)]
pub struct Booklist {
    books: Vec<Book>,
    /// Weak reference: lookup by id, cleared when that book is removed.
    last_finished: Option<BookId>,
    next_id: u64,
    pending: Vec<Event>,
}

impl Booklist {
    /// Create an empty booklist whose first id will be 0.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// All books in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == Some(id))
    }

    /// Position of the book currently being read.
    pub fn current_book_index(&self) -> Option<usize> {
        self.books.iter().position(|b| !b.read)
    }

    /// Earliest unread book by insertion order.
    pub fn current_book(&self) -> Option<&Book> {
        self.current_book_index().map(|i| &self.books[i])
    }

    /// Position of the first unread book after the current one.
    pub fn next_book_index(&self) -> Option<usize> {
        let start = self.current_book_index()? + 1;
        self.books[start..]
            .iter()
            .position(|b| !b.read)
            .map(|offset| start + offset)
    }

    /// Second-earliest unread book. Located by position, so two books with
    /// identical fields are still told apart.
    pub fn next_book(&self) -> Option<&Book> {
        self.next_book_index().map(|i| &self.books[i])
    }

    pub fn read_count(&self) -> usize {
        self.books.iter().filter(|b| b.read).count()
    }

    pub fn unread_count(&self) -> usize {
        self.books.iter().filter(|b| !b.read).count()
    }

    pub fn total_count(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Most recently finished book, if it is still on the list.
    pub fn last_finished(&self) -> Option<&Book> {
        self.last_finished.and_then(|id| self.get(id))
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Assign sequential ids and append, preserving the given order.
    ///
    /// Any id already present on an incoming book is overwritten.
    pub fn add<I>(&mut self, books: I)
    where
        I: IntoIterator<Item = Book>,
    {
        let mut ids = Vec::new();
        for mut book in books {
            let id = BookId::new(self.next_id);
            self.next_id += 1;
            book.id = Some(id);
            debug!(id = %id, title = %book.title, read = book.read, "book added");
            ids.push(id);
            self.books.push(book);
        }
        if ids.is_empty() {
            return;
        }
        self.pending.push(Event::BooksAdded { ids, at: Utc::now() });
    }

    /// Finish the current book, stamping it with the current time.
    ///
    /// Returns `None` and changes nothing when every book is read.
    pub fn finish_current_book(&mut self) -> Option<&Book> {
        self.finish_current_book_at(Utc::now())
    }

    /// Same as [`finish_current_book`](Self::finish_current_book) with an
    /// explicit completion timestamp.
    pub fn finish_current_book_at(&mut self, at: DateTime<Utc>) -> Option<&Book> {
        let index = self.current_book_index()?;
        let book = &mut self.books[index];
        book.mark_read(at);
        self.last_finished = book.id;
        debug!(index, title = %book.title, "book finished");
        self.pending.push(Event::BookFinished {
            book: book.clone(),
            index,
            at,
        });
        Some(&self.books[index])
    }

    /// Remove the book with this id. `false` if there is none.
    pub fn remove_book_by_id(&mut self, id: BookId) -> bool {
        match self.books.iter().position(|b| b.id == Some(id)) {
            Some(index) => {
                self.remove_at(index);
                true
            }
            None => false,
        }
    }

    /// Remove the first book whose title, genre and author all match.
    ///
    /// Legacy lookup for callers without an id. With duplicate field sets
    /// the earliest entry goes.
    pub fn remove_book_by_fields(&mut self, title: &str, genre: &str, author: &str) -> bool {
        match self
            .books
            .iter()
            .position(|b| b.matches_fields(title, genre, author))
        {
            Some(index) => {
                self.remove_at(index);
                true
            }
            None => false,
        }
    }

    /// Take the change notifications produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending)
    }

    fn remove_at(&mut self, index: usize) {
        let book = self.books.remove(index);
        if book.id.is_some() && self.last_finished == book.id {
            self.last_finished = None;
        }
        debug!(index, title = %book.title, "book removed");
        self.pending.push(Event::BookRemoved {
            book,
            index,
            at: Utc::now(),
        });
    }
}

impl FromIterator<Book> for Booklist {
    fn from_iter<T: IntoIterator<Item = Book>>(iter: T) -> Self {
        let mut list = Booklist::new();
        list.add(iter);
        // A freshly built list starts with no history.
        list.pending.clear();
        list
    }
}

//! Book entity.
//!
//! A book is a plain record. Its identity is handed out by the
//! [`Booklist`](crate::Booklist) it is added to; before that the id is unset.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Identity of a book within one booklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u64);

impl BookId {
    /// Wrap a raw id, e.g. one typed by the user to select a row.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(BookId)
            .map_err(|_| ValidationError::InvalidId { value: s.to_string() })
    }
}

/// A book on the reading list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Assigned by the booklist on insertion; never taken from input.
    #[serde(default, skip_deserializing)]
    pub(crate) id: Option<BookId>,
    pub title: String,
    pub genre: String,
    pub author: String,
    /// Whether the book has been read
    #[serde(default)]
    pub read: bool,
    /// When the book was finished (null while unread)
    #[serde(default)]
    pub read_date: Option<DateTime<Utc>>,
}

impl Book {
    /// Create an unread book with no id.
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Book {
            id: None,
            title: title.into(),
            genre: genre.into(),
            author: author.into(),
            read: false,
            read_date: None,
        }
    }

    /// Mark the book as already read on `date`, for imported entries.
    pub fn with_read_date(mut self, date: DateTime<Utc>) -> Self {
        self.read = true;
        self.read_date = Some(date);
        self
    }

    /// Shorthand for `Book::new(..).with_read_date(date)`.
    pub fn read_on(
        title: impl Into<String>,
        genre: impl Into<String>,
        author: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self::new(title, genre, author).with_read_date(date)
    }

    /// Id assigned by the owning booklist, `None` before insertion.
    pub fn id(&self) -> Option<BookId> {
        self.id
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    /// Exact match on all three descriptive fields.
    pub fn matches_fields(&self, title: &str, genre: &str, author: &str) -> bool {
        self.title == title && self.genre == genre && self.author == author
    }

    pub(crate) fn mark_read(&mut self, at: DateTime<Utc>) {
        self.read_date = Some(at);
        self.read = true;
    }
}

/// Parse a read date as typed by a user or found in a seed file.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_read_date(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ValidationError::InvalidDate {
            value: value.to_string(),
        })
}

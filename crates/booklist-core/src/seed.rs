//! Seed import.
//!
//! Reads books that already exist somewhere else (a previous spreadsheet, a
//! hand-written file) into a fresh [`Booklist`]. Import only: nothing is
//! ever written back.
//!
//! TOML:
//!
//! ```toml
//! [[books]]
//! title = "Foundation"
//! genre = "Sci-Fi"
//! author = "Isaac Asimov"
//! read = true
//! read_date = "2021-03-14"
//! ```
//!
//! JSON accepts either `{ "books": [...] }` or a bare array.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::book::{parse_read_date, Book};
use crate::booklist::Booklist;
use crate::error::ImportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    Toml,
    Json,
}

impl SeedFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(SeedFormat::Toml),
            "json" => Some(SeedFormat::Json),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            SeedFormat::Toml => "TOML",
            SeedFormat::Json => "JSON",
        }
    }
}

#[derive(Debug, Deserialize)]
struct SeedEntry {
    title: String,
    #[serde(default)]
    genre: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    read: bool,
    #[serde(default)]
    read_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    books: Vec<SeedEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonSeed {
    Wrapped(SeedFile),
    Bare(Vec<SeedEntry>),
}

impl SeedEntry {
    fn into_book(self, index: usize) -> Result<Book, ImportError> {
        let mut book = Book::new(self.title, self.genre, self.author);
        // Taken as given: the model does not enforce read <=> read_date here.
        book.read = self.read;
        book.read_date = match self.read_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                parse_read_date(raw)
                    .map_err(|source| ImportError::InvalidEntry { index, source })?,
            ),
        };
        Ok(book)
    }
}

/// Parse seed content into books, in file order, without ids.
pub fn parse_seed(content: &str, format: SeedFormat) -> Result<Vec<Book>, ImportError> {
    let parse_failed = |message: String| ImportError::ParseFailed {
        format: format.name(),
        message,
    };
    let entries = match format {
        SeedFormat::Toml => {
            toml::from_str::<SeedFile>(content)
                .map_err(|e| parse_failed(e.to_string()))?
                .books
        }
        SeedFormat::Json => match serde_json::from_str::<JsonSeed>(content)
            .map_err(|e| parse_failed(e.to_string()))?
        {
            JsonSeed::Wrapped(file) => file.books,
            JsonSeed::Bare(entries) => entries,
        },
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| entry.into_book(index))
        .collect()
}

/// Read and parse a seed file; the format follows the extension.
pub fn load_seed(path: &Path) -> Result<Vec<Book>, ImportError> {
    let format = SeedFormat::from_path(path).ok_or_else(|| ImportError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let content = std::fs::read_to_string(path).map_err(|source| ImportError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let books = parse_seed(&content, format)?;
    debug!(path = %path.display(), count = books.len(), "seed loaded");
    Ok(books)
}

impl Booklist {
    /// Fresh booklist holding the books of a seed file, ids from 0.
    pub fn from_seed(path: &Path) -> Result<Self, ImportError> {
        Ok(load_seed(path)?.into_iter().collect())
    }
}

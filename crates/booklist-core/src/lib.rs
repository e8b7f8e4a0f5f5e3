//! # Booklist Core Library
//!
//! This library provides the core logic for a personal reading list. The
//! `booklist` CLI is a thin presentation layer over it: it owns one
//! [`Booklist`], drives it from user commands and re-renders from its state.
//!
//! ## Architecture
//!
//! - **Model**: [`Book`] records and the [`Booklist`] aggregate, which
//!   assigns ids and derives the current/next book and counters on demand
//! - **Events**: every mutation queues an [`Event`] for the renderer
//! - **Seed**: one-way import of existing books from TOML or JSON
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Booklist`]: ordered collection and the "finish current book" transition
//! - [`ReadingStats`]: serializable snapshot of the derived values
//! - [`Config`]: application configuration management

pub mod book;
pub mod booklist;
pub mod error;
pub mod events;
pub mod seed;
pub mod stats;
pub mod storage;

pub use book::{parse_read_date, Book, BookId};
pub use booklist::Booklist;
pub use error::{ConfigError, CoreError, ImportError, ValidationError};
pub use events::Event;
pub use seed::{load_seed, parse_seed, SeedFormat};
pub use stats::{BookSummary, ReadingStats};
pub use storage::Config;

//! One-shot rendering of a (seeded) booklist.

use booklist_core::error::Result;
use booklist_core::{Book, Booklist, Config, ReadingStats};
use serde::Serialize;

use crate::render::{render_summary, render_table};

#[derive(Serialize)]
struct Snapshot<'a> {
    books: &'a [Book],
    stats: ReadingStats,
}

pub fn print_booklist(list: &Booklist, config: &Config, json: bool) -> Result<()> {
    if json {
        let snapshot = Snapshot {
            books: list.books(),
            stats: list.stats(),
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", render_table(list, &config.display));
        println!();
        println!("{}", render_summary(list));
    }
    Ok(())
}

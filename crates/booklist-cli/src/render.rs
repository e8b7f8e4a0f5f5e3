//! Plain-text rendering of a booklist.

use booklist_core::storage::DisplayConfig;
use booklist_core::{Book, Booklist, Event};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

const HEADERS: [&str; 5] = ["Title", "Genre", "Author", "Has been read?", "Read date"];
const FALLBACK_DATE_FORMAT: &str = "%d/%m/%Y";

fn date_format(display: &DisplayConfig) -> &str {
    let pattern = display.date_format.as_str();
    let invalid = StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
    if invalid {
        tracing::warn!(format = %pattern, "invalid date format, using default");
        FALLBACK_DATE_FORMAT
    } else {
        pattern
    }
}

pub fn format_date(date: Option<DateTime<Utc>>, display: &DisplayConfig) -> String {
    match date {
        Some(date) => date.format(date_format(display)).to_string(),
        None => "-".to_string(),
    }
}

fn row(book: &Book, display: &DisplayConfig) -> Vec<String> {
    let mut cells = Vec::with_capacity(HEADERS.len() + 1);
    if display.show_ids {
        cells.push(book.id().map(|id| id.to_string()).unwrap_or_default());
    }
    cells.push(book.title.clone());
    cells.push(book.genre.clone());
    cells.push(book.author.clone());
    cells.push(if book.read { "Yes" } else { "No" }.to_string());
    cells.push(format_date(book.read_date, display));
    cells
}

/// Table of all books; the current book's row is marked with `>`.
pub fn render_table(list: &Booklist, display: &DisplayConfig) -> String {
    let mut header: Vec<String> = Vec::new();
    if display.show_ids {
        header.push("#".to_string());
    }
    header.extend(HEADERS.iter().map(|h| h.to_string()));

    let rows: Vec<Vec<String>> = list.books().iter().map(|b| row(b, display)).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |marker: &str, cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        format!("{marker}{}", padded.join("  ")).trim_end().to_string()
    };

    let current = if display.highlight_current {
        list.current_book_index()
    } else {
        None
    };

    let mut lines = vec![format_line("  ", &header)];
    for (index, cells) in rows.iter().enumerate() {
        let marker = if Some(index) == current { "> " } else { "  " };
        lines.push(format_line(marker, cells));
    }
    lines.join("\n")
}

/// The two status lines shown under the table.
pub fn render_summary(list: &Booklist) -> String {
    let current = match list.current_book() {
        Some(book) => format!("You are now reading {} by {}.", book.title, book.author),
        None => "You are not reading anything right now.".to_string(),
    };
    format!(
        "{current}\nYou have read {} out of {} books.",
        list.read_count(),
        list.total_count()
    )
}

/// One-line description of a change, for the session log.
pub fn describe_event(event: &Event, display: &DisplayConfig) -> String {
    match event {
        Event::BooksAdded { ids, .. } => {
            let ids: Vec<String> = ids.iter().map(|id| format!("#{id}")).collect();
            format!("Added {}", ids.join(", "))
        }
        Event::BookFinished { book, .. } => format!(
            "Finished {} on {}",
            book.title,
            format_date(book.read_date, display)
        ),
        Event::BookRemoved { book, .. } => format!("Removed {}", book.title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Booklist {
        let date = Utc.with_ymd_and_hms(2021, 3, 14, 0, 0, 0).unwrap();
        let mut list = Booklist::new();
        list.add([
            Book::read_on("Foundation", "Sci-Fi", "Isaac Asimov", date),
            Book::new("Hyperion", "Sci-Fi", "Dan Simmons"),
            Book::new("Dune", "Sci-Fi", "Frank Herbert"),
        ]);
        list
    }

    #[test]
    fn table_marks_current_row() {
        let table = render_table(&sample(), &DisplayConfig::default());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Has been read?"));
        assert!(lines[1].starts_with("  0"));
        assert!(lines[1].contains("14/03/2021"));
        assert!(lines[2].starts_with("> 1"));
        assert!(lines[2].contains("Hyperion"));
        assert!(lines[3].ends_with('-'));
    }

    #[test]
    fn table_without_ids_or_highlight() {
        let display = DisplayConfig {
            show_ids: false,
            highlight_current: false,
            ..DisplayConfig::default()
        };
        let table = render_table(&sample(), &display);
        assert!(!table.contains('>'));
        assert!(table.lines().next().unwrap().trim_start().starts_with("Title"));
    }

    #[test]
    fn summary_lines() {
        assert_eq!(
            render_summary(&sample()),
            "You are now reading Hyperion by Dan Simmons.\nYou have read 1 out of 3 books."
        );
        assert_eq!(
            render_summary(&Booklist::new()),
            "You are not reading anything right now.\nYou have read 0 out of 0 books."
        );
    }

    #[test]
    fn invalid_date_format_falls_back() {
        let display = DisplayConfig {
            date_format: "%Q".to_string(),
            ..DisplayConfig::default()
        };
        let date = Utc.with_ymd_and_hms(2021, 3, 14, 0, 0, 0).unwrap();
        assert_eq!(format_date(Some(date), &display), "14/03/2021");
    }

    #[test]
    fn describe_finish_event() {
        let mut list = sample();
        let at = Utc.with_ymd_and_hms(2022, 1, 2, 0, 0, 0).unwrap();
        list.finish_current_book_at(at);
        let events = list.drain_events();
        let last = events.last().unwrap();
        assert_eq!(
            describe_event(last, &DisplayConfig::default()),
            "Finished Hyperion on 02/01/2022"
        );
    }
}

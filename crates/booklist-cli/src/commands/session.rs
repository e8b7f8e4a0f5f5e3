//! Interactive session.
//!
//! The session owns the booklist for the lifetime of the process. Each input
//! line is parsed as one command, applied to the list, and the table is
//! re-rendered from the list's state whenever it changed.

use std::io::{BufRead, Write};

use booklist_core::error::Result;
use booklist_core::storage::DisplayConfig;
use booklist_core::{parse_read_date, Book, BookId, Booklist, CoreError, ValidationError};
use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::render::{describe_event, format_date, render_summary, render_table};

#[derive(Parser)]
#[command(name = "booklist", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Add a book to the end of the list
    Add {
        /// Book title (must not be empty)
        title: String,
        genre: Option<String>,
        author: Option<String>,
        /// Mark as already read, optionally on DATE (YYYY-MM-DD)
        #[arg(long, value_name = "DATE", num_args = 0..=1, default_missing_value = "today")]
        read: Option<String>,
    },
    /// Finish the book currently being read
    Finish,
    /// Delete a book by id
    Delete {
        id: String,
    },
    /// Delete the first book matching title, genre and author
    DeleteMatch {
        title: String,
        genre: String,
        author: String,
    },
    /// Show the table
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show reading statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Leave the session
    #[command(visible_alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

/// Split a command line on whitespace, keeping double-quoted runs together.
/// Apostrophes are ordinary characters so titles like `Ender's Game` work.
fn split_line(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut in_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            _ if quoted => current.push(c),
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            _ => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err(CoreError::Custom("unterminated \" quote".to_string()));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

pub struct Session<W> {
    list: Booklist,
    display: DisplayConfig,
    out: W,
}

impl<W: Write> Session<W> {
    /// Changes made before the session started are not replayed.
    pub fn new(mut list: Booklist, display: DisplayConfig, out: W) -> Self {
        list.drain_events();
        Self { list, display, out }
    }

    pub fn booklist(&self) -> &Booklist {
        &self.list
    }

    /// Read commands until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> std::io::Result<()> {
        self.render()?;
        for line in input.lines() {
            let line = line?;
            match self.handle_line(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => {
                    tracing::debug!(line = %line, error = %e, "command rejected");
                    writeln!(self.out, "error: {e}")?;
                }
            }
        }
        self.out.flush()
    }

    fn render(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "{}", render_table(&self.list, &self.display))?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", render_summary(&self.list))
    }

    /// Report queued changes and redraw if there were any.
    fn flush_events(&mut self) -> std::io::Result<()> {
        let events = self.list.drain_events();
        if events.is_empty() {
            return Ok(());
        }
        for event in &events {
            writeln!(self.out, "{}", describe_event(event, &self.display))?;
        }
        self.render()
    }

    fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let tokens = split_line(trimmed)?;
        let command = match SessionLine::try_parse_from(tokens) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                // Help output and usage errors are both rendered by clap.
                write!(self.out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            SessionCommand::Add {
                title,
                genre,
                author,
                read,
            } => {
                if title.trim().is_empty() {
                    return Err(ValidationError::EmptyTitle.into());
                }
                let mut book = Book::new(title, genre.unwrap_or_default(), author.unwrap_or_default());
                if let Some(date) = read {
                    let date = if date == "today" {
                        Utc::now()
                    } else {
                        parse_read_date(&date)?
                    };
                    book = book.with_read_date(date);
                }
                self.list.add([book]);
            }
            SessionCommand::Finish => {
                if self.list.finish_current_book().is_none() {
                    writeln!(self.out, "Nothing to finish: you are not reading anything right now.")?;
                }
            }
            SessionCommand::Delete { id } => {
                let id: BookId = id.parse()?;
                if !self.list.remove_book_by_id(id) {
                    writeln!(self.out, "No book with id {id}.")?;
                }
            }
            SessionCommand::DeleteMatch {
                title,
                genre,
                author,
            } => {
                if !self.list.remove_book_by_fields(&title, &genre, &author) {
                    writeln!(self.out, "No book matches {title} / {genre} / {author}.")?;
                }
            }
            SessionCommand::List { json } => {
                if json {
                    writeln!(self.out, "{}", serde_json::to_string_pretty(self.list.books())?)?;
                } else {
                    self.render()?;
                }
            }
            SessionCommand::Stats { json } => self.write_stats(json)?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        self.flush_events()?;
        Ok(Flow::Continue)
    }

    fn write_stats(&mut self, json: bool) -> Result<()> {
        let stats = self.list.stats();
        if json {
            writeln!(self.out, "{}", serde_json::to_string_pretty(&stats)?)?;
            return Ok(());
        }

        writeln!(
            self.out,
            "Read: {}  Unread: {}  Total: {}  ({:.0}%)",
            stats.read,
            stats.unread,
            stats.total,
            stats.completion_ratio() * 100.0
        )?;
        let title = |summary: &Option<booklist_core::BookSummary>| {
            summary
                .as_ref()
                .map(|b| format!("{} by {}", b.title, b.author))
                .unwrap_or_else(|| "-".to_string())
        };
        writeln!(self.out, "Current: {}", title(&stats.current))?;
        writeln!(self.out, "Next: {}", title(&stats.next))?;
        let finished_on = self
            .list
            .last_finished()
            .map(|b| format_date(b.read_date, &self.display))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            self.out,
            "Last finished: {} ({finished_on})",
            title(&stats.last_finished)
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_session(list: Booklist, script: &str) -> (Booklist, String) {
        let mut out = Vec::new();
        let list = {
            let mut session = Session::new(list, DisplayConfig::default(), &mut out);
            session.run(script.as_bytes()).unwrap();
            session.booklist().clone()
        };
        (list, String::from_utf8(out).unwrap())
    }

    #[test]
    fn split_line_handles_quotes() {
        assert_eq!(
            split_line(r#"add "The Left Hand of Darkness" Sci-Fi "Ursula K. Le Guin""#).unwrap(),
            vec!["add", "The Left Hand of Darkness", "Sci-Fi", "Ursula K. Le Guin"]
        );
        assert_eq!(split_line(r#"add "" x"#).unwrap(), vec!["add", "", "x"]);
        assert!(split_line(r#"add "oops"#).is_err());
    }

    #[test]
    fn split_line_keeps_apostrophes() {
        assert_eq!(
            split_line(r#"add Ender's Game "Orson Scott Card""#).unwrap(),
            vec!["add", "Ender's", "Game", "Orson Scott Card"]
        );
        assert_eq!(
            split_line(r#"add "Ender's Game" Sci-Fi "Orson Scott Card""#).unwrap(),
            vec!["add", "Ender's Game", "Sci-Fi", "Orson Scott Card"]
        );
    }

    #[test]
    fn add_title_with_apostrophe() {
        let (list, out) = run_session(
            Booklist::new(),
            "add \"Ender's Game\" Sci-Fi \"Orson Scott Card\"\n",
        );
        assert_eq!(list.books()[0].title, "Ender's Game");
        assert!(!out.contains("error:"));
        assert!(out.contains("You are now reading Ender's Game by Orson Scott Card."));
    }

    #[test]
    fn seeded_books_are_not_announced() {
        let seeded: Booklist = vec![
            Book::new("Foundation", "Sci-Fi", "Isaac Asimov"),
            Book::new("Hyperion", "Sci-Fi", "Dan Simmons"),
        ]
        .into_iter()
        .collect();
        let mut unseen = seeded.clone();
        unseen.add([Book::new("Dune", "Sci-Fi", "Frank Herbert")]);

        let (_, out) = run_session(seeded, "stats\n");
        assert!(!out.contains("Added"));
        assert_eq!(out.matches("Has been read?").count(), 1);
        assert!(out.contains("Read: 0  Unread: 2  Total: 2"));

        // Undrained changes made before the session are dropped too.
        let (list, out) = run_session(unseen, "stats\n");
        assert_eq!(list.total_count(), 3);
        assert!(!out.contains("Added #2"));
        assert_eq!(out.matches("Has been read?").count(), 1);
    }

    #[test]
    fn add_and_finish_flow() {
        let script = "add Foundation Sci-Fi \"Isaac Asimov\"\n\
                      add Hyperion Sci-Fi \"Dan Simmons\"\n\
                      finish\n";
        let (list, out) = run_session(Booklist::new(), script);
        assert_eq!(list.read_count(), 1);
        assert_eq!(list.current_book().map(|b| b.title.as_str()), Some("Hyperion"));
        assert!(out.contains("Added #0"));
        assert!(out.contains("Finished Foundation on"));
        assert!(out.contains("You are now reading Hyperion by Dan Simmons."));
        assert!(out.contains("You have read 1 out of 2 books."));
    }

    #[test]
    fn empty_title_is_rejected() {
        let (list, out) = run_session(Booklist::new(), "add \"\" Essay Someone\n");
        assert!(list.is_empty());
        assert!(out.contains("error: book title must not be empty"));
    }

    #[test]
    fn add_pre_read_book_with_date() {
        let (list, out) = run_session(Booklist::new(), "add Beloved Novel \"Toni Morrison\" --read 2019-08-05\n");
        let book = &list.books()[0];
        assert!(book.read);
        assert!(out.contains("05/08/2019"));
        assert!(out.contains("You are not reading anything right now."));
    }

    #[test]
    fn bad_date_is_rejected() {
        let (list, out) = run_session(Booklist::new(), "add Beloved Novel X --read someday\n");
        assert!(list.is_empty());
        assert!(out.contains("error: Invalid date 'someday'"));
    }

    #[test]
    fn delete_by_id_and_missing_id() {
        let script = "add A\nadd B\nadd C\ndelete 1\ndelete 1\ndelete x\n";
        let (list, out) = run_session(Booklist::new(), script);
        let titles: Vec<_> = list.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert!(out.contains("Removed B"));
        assert!(out.contains("No book with id 1."));
        assert!(out.contains("error: Invalid book id 'x'"));
    }

    #[test]
    fn delete_match_removes_first_duplicate() {
        let script = "add Twin G A\nadd Twin G A\ndelete-match Twin G A\n";
        let (list, _) = run_session(Booklist::new(), script);
        assert_eq!(list.books().len(), 1);
        assert_eq!(list.books()[0].id().map(BookId::value), Some(1));
    }

    #[test]
    fn finish_on_empty_list_reports_nothing() {
        let (list, out) = run_session(Booklist::new(), "finish\n");
        assert!(list.is_empty());
        assert!(out.contains("Nothing to finish"));
    }

    #[test]
    fn quit_stops_reading() {
        let (list, _) = run_session(Booklist::new(), "add A\nquit\nadd B\n");
        assert_eq!(list.total_count(), 1);
    }

    #[test]
    fn unknown_command_keeps_session_alive() {
        let (list, out) = run_session(Booklist::new(), "frobnicate\nadd A\n");
        assert!(out.contains("frobnicate"));
        assert_eq!(list.total_count(), 1);
    }

    #[test]
    fn stats_json_output() {
        let (_, out) = run_session(Booklist::new(), "add A\nadd B\nstats --json\n");
        assert!(out.contains("\"unread\": 2"));
        assert!(out.contains("\"current_index\": 0"));
    }
}

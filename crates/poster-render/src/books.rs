//! Book manifest loading and selection
//!
//! The manifest is a CSV file with one row per book:
//! `id,title,author,read_at,cover,user_rating,average_rating,num_pages`.
//! Read dates are `YYYY-MM-DD` or empty, cover paths are relative to the
//! manifest's directory.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::options::RenderOptions;
use crate::types::{RenderError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Sort date of books without a read date
pub fn missing_read_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Deserialize)]
struct ManifestRow {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    read_at: String,
    cover: PathBuf,
    #[serde(default)]
    user_rating: Option<u8>,
    #[serde(default)]
    average_rating: Option<f32>,
    #[serde(default)]
    num_pages: Option<u32>,
}

/// One read book
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    pub read_at: Option<NaiveDate>,
    pub cover: PathBuf,
    /// 0 when the reader did not rate the book
    pub user_rating: u8,
    pub average_rating: f32,
    pub num_pages: Option<u32>,
}

impl BookRecord {
    pub fn sort_date(&self) -> NaiveDate {
        self.read_at.unwrap_or_else(missing_read_date)
    }

    /// Shading group of the book
    pub fn year(&self) -> i32 {
        self.sort_date().year()
    }
}

/// Parse a manifest, resolving relative cover paths against `base_dir`
pub fn parse_books(reader: impl Read, base_dir: &Path) -> Result<Vec<BookRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut books = Vec::new();

    for (index, row) in reader.deserialize::<ManifestRow>().enumerate() {
        let row = row?;
        let read_at = if row.read_at.is_empty() {
            None
        } else {
            let date = NaiveDate::parse_from_str(&row.read_at, DATE_FORMAT).map_err(|e| {
                RenderError::Manifest(format!(
                    "book {} (record {}): invalid read date '{}': {}",
                    row.id,
                    index + 1,
                    row.read_at,
                    e
                ))
            })?;
            Some(date)
        };
        let cover = if row.cover.is_absolute() {
            row.cover
        } else {
            base_dir.join(row.cover)
        };

        books.push(BookRecord {
            id: row.id,
            title: row.title,
            author: row.author,
            read_at,
            cover,
            user_rating: row.user_rating.unwrap_or(0),
            average_rating: row.average_rating.unwrap_or(0.0),
            num_pages: row.num_pages.filter(|&n| n > 0),
        });
    }

    Ok(books)
}

/// Load a book manifest from a CSV file
pub async fn load_books(path: impl AsRef<Path>) -> Result<Vec<BookRecord>> {
    let path = path.as_ref().to_owned();
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let contents = tokio::fs::read(&path).await?;

    let books =
        tokio::task::spawn_blocking(move || parse_books(contents.as_slice(), &base_dir)).await??;

    log::info!("Loaded {} books from {}", books.len(), path.display());
    Ok(books)
}

/// Oldest first; books without a read date come first, ties keep their order
pub fn sort_by_read_date(books: &mut [BookRecord]) {
    books.sort_by_key(BookRecord::sort_date);
}

/// Keep books read within the inclusive range
pub fn filter_by_date(
    mut books: Vec<BookRecord>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<BookRecord> {
    books.retain(|book| {
        let date = book.sort_date();
        from.is_none_or(|from| from <= date) && to.is_none_or(|to| date <= to)
    });
    books
}

/// Drop repeated ids. The last record wins but keeps the first one's place.
pub fn dedup_by_id(books: Vec<BookRecord>) -> Vec<BookRecord> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<BookRecord> = Vec::with_capacity(books.len());

    for book in books {
        match seen.get(&book.id).copied() {
            Some(index) => unique[index] = book,
            None => {
                seen.insert(book.id.clone(), unique.len());
                unique.push(book);
            }
        }
    }
    unique
}

/// Keep the last `capacity` books of a sorted list
pub fn fit_to_grid(mut books: Vec<BookRecord>, capacity: usize) -> Vec<BookRecord> {
    if books.len() > capacity {
        let dropped = books.len() - capacity;
        log::warn!(
            "The poster grid only holds {} books, {} books are not included",
            capacity,
            dropped
        );
        books.drain(..dropped);
    }
    books
}

/// Read years of sorted books, used to group the year shading
pub fn year_keys(books: &[BookRecord]) -> Vec<i32> {
    books.iter().map(BookRecord::year).collect()
}

/// Caption lines printed beneath a cover, at most `max_lines`
pub fn book_text_lines(book: &BookRecord, print_rating: bool, max_lines: usize) -> Vec<String> {
    let read = match book.read_at {
        Some(date) => format!("Read {}", date.format(DATE_FORMAT)),
        None => String::new(),
    };

    let mut details = Vec::new();
    if let Some(pages) = book.num_pages {
        details.push(format!("{} pages", pages));
    }
    if print_rating {
        details.push(format!("{:.1}\u{2606}", book.average_rating));
        if book.user_rating > 0 {
            details.push(format!("{}\u{2605}", book.user_rating));
        }
    }

    [read, details.join(" ")]
        .into_iter()
        .take(max_lines)
        .collect()
}

/// Books chosen for a poster and the reading period they cover
#[derive(Debug, Clone, PartialEq)]
pub struct BookSelection {
    /// Oldest first
    pub books: Vec<BookRecord>,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl BookSelection {
    /// Selection spanning the read dates of already sorted books
    pub fn new(books: Vec<BookRecord>) -> Self {
        let from = books.first().map_or_else(missing_read_date, BookRecord::sort_date);
        let to = books.last().map_or_else(missing_read_date, BookRecord::sort_date);
        Self { books, from, to }
    }

    pub fn title(&self) -> String {
        format!(
            "Books read between {} and {}",
            self.from.format(DATE_FORMAT),
            self.to.format(DATE_FORMAT)
        )
    }

    pub fn year_keys(&self) -> Vec<i32> {
        year_keys(&self.books)
    }
}

/// Dedup, sort, filter by the options' date range and fit to the grid.
///
/// When books had to be dropped the period starts at the oldest book kept.
pub fn select_books(
    books: Vec<BookRecord>,
    options: &RenderOptions,
    capacity: usize,
) -> Result<BookSelection> {
    let mut books = dedup_by_id(books);
    sort_by_read_date(&mut books);
    let books = filter_by_date(books, options.from, options.to);

    if books.is_empty() {
        let bound = |date: Option<NaiveDate>| {
            date.map_or_else(|| "any date".to_string(), |d| d.format(DATE_FORMAT).to_string())
        };
        return Err(RenderError::NoBooks(format!(
            "no books read between {} and {}",
            bound(options.from),
            bound(options.to)
        )));
    }

    let truncated = books.len() > capacity;
    let mut selection = BookSelection::new(fit_to_grid(books, capacity));
    if let Some(from) = options.from.filter(|_| !truncated) {
        selection.from = from;
    }
    if let Some(to) = options.to {
        selection.to = to;
    }
    Ok(selection)
}

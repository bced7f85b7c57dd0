#![forbid(unsafe_code)]

//! Grid template parsing.
//!
//! A template is an ordered list of row strings. Each row is split on
//! whitespace into one token per column:
//!
//! ```text
//! "check  data_gen  info"
//! "tree   tree      data"
//! "tree   tree      plot"
//! ```
//!
//! Tokens made only of periods (`.`, `..`, ...) are fill tokens and mark an
//! unassigned cell. Everything else names an area.
//!
//! # Invariants
//!
//! 1. A parsed template has at least one row and at least one column.
//! 2. Every row has exactly [`GridTemplate::column_count`] tokens.

use crate::error::{LayoutError, Result};

/// Classification of a single template token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Unassigned cell (`.`, `..`, ...).
    Fill,
    /// Cell belonging to the named area.
    Name(&'a str),
}

impl<'a> Token<'a> {
    /// Classify a whitespace-free token.
    #[inline]
    #[must_use]
    pub fn classify(token: &'a str) -> Self {
        if is_fill(token) {
            Self::Fill
        } else {
            Self::Name(token)
        }
    }

    #[inline]
    #[must_use]
    pub fn name(self) -> Option<&'a str> {
        match self {
            Self::Fill => None,
            Self::Name(name) => Some(name),
        }
    }
}

/// Whether `token` consists solely of one or more `.` characters.
#[inline]
#[must_use]
pub fn is_fill(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b == b'.')
}

/// Whether `name` can stand as a single area token: non-empty, free of
/// whitespace and not a fill token.
#[inline]
#[must_use]
pub fn is_area_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(char::is_whitespace) && !is_fill(name)
}

/// A validated grid template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTemplate {
    /// Rows as supplied by the caller.
    source: Vec<String>,
    /// Tokenized rows; all of length `column_count`.
    cells: Vec<Vec<String>>,
    column_count: usize,
}

impl GridTemplate {
    /// Parse and validate a template.
    ///
    /// Fails with [`LayoutError::EmptyTemplate`] when there are no rows or
    /// row 0 has no tokens, and with [`LayoutError::RaggedRow`] for the first
    /// row whose token count differs from row 0's.
    pub fn parse<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let source: Vec<String> = rows.into_iter().map(|r| r.as_ref().to_owned()).collect();
        let cells: Vec<Vec<String>> = source
            .iter()
            .map(|row| row.split_whitespace().map(str::to_owned).collect())
            .collect();

        let column_count = match cells.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(LayoutError::EmptyTemplate),
        };

        if let Some((row, tokens)) = cells
            .iter()
            .enumerate()
            .find(|(_, tokens)| tokens.len() != column_count)
        {
            return Err(LayoutError::RaggedRow {
                row,
                expected: column_count,
                actual: tokens.len(),
                text: source[row].clone(),
            });
        }

        Ok(Self {
            source,
            cells,
            column_count,
        })
    }

    /// Parse a template written one row per line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::parse(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Rows exactly as they were supplied.
    #[inline]
    pub fn source_rows(&self) -> &[String] {
        &self.source
    }

    /// Token at `(row, col)`, if in range.
    pub fn token(&self, row: usize, col: usize) -> Option<Token<'_>> {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .map(|t| Token::classify(t))
    }

    /// Tokens of one row.
    pub fn row(&self, row: usize) -> Option<impl Iterator<Item = Token<'_>> + '_> {
        self.cells
            .get(row)
            .map(|r| r.iter().map(|t| Token::classify(t)))
    }

    /// Iterate over all rows as token vectors.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Row string that fills every column with `name`.
    ///
    /// For a template with no columns yet (see [`crate::resolver`]) callers
    /// use the bare name instead.
    #[must_use]
    pub fn full_width_row(&self, name: &str) -> String {
        vec![name; self.column_count].join(" ")
    }
}

#![forbid(unsafe_code)]

//! Errors raised while configuring or consulting a grid template.

use std::fmt;

/// Result alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// A `(row, column)` cell coordinate.
pub type Cell = (usize, usize);

/// Errors from template configuration and area lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The template had no rows, or its first row had no tokens.
    EmptyTemplate,
    /// A row's token count differs from the first row's.
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Column count of row 0.
        expected: usize,
        /// Column count of the offending row.
        actual: usize,
        /// The offending row as written.
        text: String,
    },
    /// An area's cells do not fill its bounding rectangle (strict policy only).
    NonRectangularArea {
        name: String,
        /// Cells inside the bounding box that carry a different token.
        missing: Vec<Cell>,
        /// Cells carrying the name that fall outside the bounding box.
        outside: Vec<Cell>,
    },
    /// A caller asked for an area that the template does not define.
    AreaNotFound(String),
    /// A name meant to become an area is empty, contains whitespace or is
    /// a fill token.
    InvalidAreaName(String),
    /// No free fallback name could be derived from `base`.
    FallbackExhausted { base: String, limit: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTemplate => write!(f, "grid template is empty"),
            Self::RaggedRow {
                row,
                expected,
                actual,
                text,
            } => write!(
                f,
                "row {row} has {actual} column(s), expected {expected}: {text:?}"
            ),
            Self::NonRectangularArea {
                name,
                missing,
                outside,
            } => {
                write!(f, "area '{name}' is not rectangular")?;
                if !missing.is_empty() {
                    write!(f, "; missing cells")?;
                    for (row, col) in missing {
                        write!(f, " ({row},{col})")?;
                    }
                }
                if !outside.is_empty() {
                    write!(f, "; stray cells")?;
                    for (row, col) in outside {
                        write!(f, " ({row},{col})")?;
                    }
                }
                Ok(())
            }
            Self::AreaNotFound(name) => write!(f, "area '{name}' not found in grid areas"),
            Self::InvalidAreaName(name) => {
                write!(f, "invalid area name {name:?}: expected a single non-fill token")
            }
            Self::FallbackExhausted { base, limit } => {
                write!(f, "no free area name for '{base}' (tried suffixes 1..={limit})")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

#![forbid(unsafe_code)]

//! Toolkit-style placement records.

use serde::{Deserialize, Serialize};

use crate::area::NamedArea;

/// Origin and spans of an area, as a grid geometry manager expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub rowspan: usize,
    pub columnspan: usize,
}

impl Placement {
    #[inline]
    #[must_use]
    pub fn from_area(area: &NamedArea) -> Self {
        Self {
            row: area.first_row,
            column: area.first_column,
            rowspan: area.rowspan(),
            columnspan: area.columnspan(),
        }
    }
}

impl From<NamedArea> for Placement {
    fn from(area: NamedArea) -> Self {
        Self::from_area(&area)
    }
}

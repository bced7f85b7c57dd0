#![forbid(unsafe_code)]

//! CSS grid-template-areas for containers.
//!
//! # Role in gridarea
//! A container describes its layout as rows of area names:
//!
//! ```
//! use gridarea_layout::{GridAreaResolver, NamedArea};
//!
//! let mut resolver = GridAreaResolver::new();
//! resolver.configure([
//!     "check   data_gen   info",
//!     "tree    tree       data",
//!     "tree    tree       plot",
//! ])?;
//!
//! assert_eq!(resolver.area("tree"), Some(&NamedArea::new(1, 2, 0, 1)));
//! # Ok::<(), gridarea_layout::LayoutError>(())
//! ```
//!
//! # Primary responsibilities
//! - **[`template`]**: tokenizing and validating the row strings.
//! - **[`resolver`]**: deriving named areas, limits and expand weights.
//! - **[`section`]**: placing children, with new-row fallback for unknown areas.
//! - **[`grid`]**: solving row/column sizes into rectangles.
//! - **[`config`]**: tunables, read from `GRIDAREA_*` environment variables.

pub mod area;
pub mod config;
pub mod error;
pub mod grid;
pub mod placement;
pub mod resolver;
pub mod section;
pub mod template;

pub use area::{ExpandWeights, GridAreas, GridLimits, NamedArea, RectangularityIssue};
pub use config::{AreaPolicy, ConfigError, LayoutConfig, LayoutConfigParse};
pub use error::{LayoutError, Result};
pub use grid::{AreaGrid, AreaLayout, Track, solve_tracks};
pub use placement::Placement;
pub use resolver::{GridAreaResolver, ResolverState};
pub use section::{ChildId, ChildPlacement, Section};
pub use template::{GridTemplate, Token};

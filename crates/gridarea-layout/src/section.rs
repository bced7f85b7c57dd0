#![forbid(unsafe_code)]

//! Section planner: assigns children to grid areas.
//!
//! A [`Section`] is a container with its own [`GridAreaResolver`] and an
//! ordered list of children, each optionally asking for a named area.
//! Changes only mark the section dirty; [`Section::relayout`] recomputes
//! every placement in insertion order.
//!
//! # Fallback
//!
//! - Requested area exists: the child takes it.
//! - Requested area is missing: a full-width row is appended under that name.
//! - No area requested: a full-width row is appended under the child's kind,
//!   suffixed `1`, `2`, ... when the kind is already taken.
//!
//! A blank or fill-token request (`"."`) counts as no request. A request that
//! cannot name a row (it contains whitespace) falls back to the kind. A kind
//! that cannot name a row fails the relayout with
//! [`LayoutError::InvalidAreaName`].
//!
//! A name assigned by fallback sticks to its child, so a second relayout with
//! no intervening change produces the same placements and adds no rows.
//!
//! # Invariants
//!
//! 1. A failed relayout leaves grid and placements untouched.
//! 2. No two fallback children share an area.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::area::GridAreas;
use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::placement::Placement;
use crate::resolver::GridAreaResolver;
use crate::template::{is_area_name, is_fill};

#[cfg(feature = "tracing")]
use gridarea_core::logging::{debug, info};

/// Index of a child within its section.
pub type ChildId = usize;

#[derive(Debug, Clone)]
struct Child {
    kind: String,
    requested: Option<String>,
    /// Area handed out by a previous fallback.
    assigned: Option<String>,
}

/// Where a child ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildPlacement {
    pub id: ChildId,
    pub kind: String,
    pub area: String,
    pub placement: Placement,
    /// The child got a fresh row instead of the area it asked for.
    pub fallback: bool,
}

/// A container of children laid out on a grid template.
#[derive(Debug, Clone, Default)]
pub struct Section {
    resolver: GridAreaResolver,
    children: Vec<Child>,
    placements: Vec<ChildPlacement>,
    dirty: bool,
}

impl Section {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            resolver: GridAreaResolver::with_config(config),
            ..Self::default()
        }
    }

    /// Replace the grid template.
    pub fn configure_grid<I, S>(&mut self, rows: I) -> Result<&GridAreas>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.resolver.configure(rows)?;
        self.dirty = true;
        Ok(self.resolver.areas())
    }

    /// Append a full-width row to the grid.
    pub fn add_grid_row(&mut self, name: &str) -> Result<&GridAreas> {
        self.resolver.add_row(name)?;
        self.dirty = true;
        Ok(self.resolver.areas())
    }

    /// Register a child. `kind` names the fallback row when no area fits.
    pub fn add_child(&mut self, kind: impl Into<String>, area: Option<&str>) -> ChildId {
        let requested = area
            .map(str::trim)
            .filter(|name| !name.is_empty() && !is_fill(name));
        self.children.push(Child {
            kind: kind.into(),
            requested: requested.map(str::to_owned),
            assigned: None,
        });
        self.dirty = true;
        self.children.len() - 1
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn resolver(&self) -> &GridAreaResolver {
        &self.resolver
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Placements from the last relayout.
    #[inline]
    pub fn placements(&self) -> &[ChildPlacement] {
        &self.placements
    }

    pub fn placement_of(&self, id: ChildId) -> Option<&ChildPlacement> {
        self.placements.iter().find(|p| p.id == id)
    }

    /// Recompute placements if anything changed since the last call.
    pub fn relayout(&mut self) -> Result<&[ChildPlacement]> {
        if !self.dirty {
            return Ok(&self.placements);
        }

        let mut resolver = self.resolver.clone();
        let mut children = self.children.clone();
        let mut placements = Vec::with_capacity(children.len());
        let mut claimed: FxHashSet<String> = FxHashSet::default();
        let limit = resolver.config().fallback_limit;

        for (id, child) in children.iter_mut().enumerate() {
            let hit = child
                .requested
                .as_deref()
                .and_then(|name| resolver.area(name).map(|a| (name, Placement::from_area(a))));
            if let Some((name, placement)) = hit {
                placements.push(ChildPlacement {
                    id,
                    kind: child.kind.clone(),
                    area: name.to_owned(),
                    placement,
                    fallback: false,
                });
                continue;
            }

            let reusable = child
                .assigned
                .as_ref()
                .filter(|name| resolver.areas().contains(name) && !claimed.contains(*name))
                .cloned();
            let name = match reusable {
                Some(name) => name,
                None => {
                    let base = child
                        .requested
                        .as_deref()
                        .filter(|name| is_area_name(name))
                        .unwrap_or(&child.kind);
                    let name = unique_area_name(resolver.areas(), &claimed, base, limit)?;
                    #[cfg(feature = "tracing")]
                    info!(
                        kind = %child.kind,
                        requested = ?child.requested,
                        area = %name,
                        "area not found; allocating new row"
                    );
                    resolver.add_row(&name)?;
                    name
                }
            };

            let placement = resolver.placement(&name)?;
            claimed.insert(name.clone());
            child.assigned = Some(name.clone());
            placements.push(ChildPlacement {
                id,
                kind: child.kind.clone(),
                area: name,
                placement,
                fallback: true,
            });
        }

        #[cfg(feature = "tracing")]
        debug!(
            children = placements.len(),
            rows = resolver.row_count(),
            "section relayout"
        );

        self.resolver = resolver;
        self.children = children;
        self.placements = placements;
        self.dirty = false;
        Ok(&self.placements)
    }
}

/// First of `base`, `base1`, ..., `base{limit}` not present in `areas` or `claimed`.
pub fn unique_area_name(
    areas: &GridAreas,
    claimed: &FxHashSet<String>,
    base: &str,
    limit: usize,
) -> Result<String> {
    let free = |name: &str| !areas.contains(name) && !claimed.contains(name);
    if free(base) {
        return Ok(base.to_owned());
    }
    (1..=limit)
        .map(|i| format!("{base}{i}"))
        .find(|name| free(name))
        .ok_or_else(|| LayoutError::FallbackExhausted {
            base: base.to_owned(),
            limit,
        })
}

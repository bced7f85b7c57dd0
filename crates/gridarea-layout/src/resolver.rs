#![forbid(unsafe_code)]

//! Grid-area resolver.
//!
//! Owns the current template and the [`GridAreas`] derived from it.
//!
//! # Invariants
//!
//! 1. **No partial update**: a failed [`GridAreaResolver::configure`] leaves
//!    template, areas and limits exactly as they were.
//! 2. **Full replacement**: a successful configure rebuilds the areas from
//!    scratch; nothing carries over from the previous template.
//! 3. **Determinism**: configuring the same rows twice yields equal areas.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Empty template | No rows, or row 0 has no tokens | `EmptyTemplate`, state kept |
//! | Ragged rows | Token count differs from row 0 | `RaggedRow`, state kept |
//! | Non-rectangular area | Strict policy only | `NonRectangularArea`, state kept |
//! | Unknown name | Lookup of undefined area | `None` (or `AreaNotFound` via `require_area`) |

use crate::area::{AreaScan, ExpandWeights, GridAreas, GridLimits, NamedArea, RectangularityIssue};
use crate::config::{AreaPolicy, LayoutConfig};
use crate::error::{LayoutError, Result};
use crate::placement::Placement;
use crate::template::{GridTemplate, is_area_name};

#[cfg(feature = "tracing")]
use gridarea_core::logging::{debug, warn};

/// Lifecycle of a resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    Unconfigured,
    Configured,
}

/// Resolves a textual grid template into named areas.
#[derive(Debug, Clone, Default)]
pub struct GridAreaResolver {
    config: LayoutConfig,
    template: Option<GridTemplate>,
    scan: AreaScan,
    limits: Option<GridLimits>,
}

impl GridAreaResolver {
    /// Create an unconfigured resolver with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unconfigured resolver with `config`.
    ///
    /// `expand_weight` and `fallback_limit` are raised to at least 1.
    #[must_use]
    pub fn with_config(mut config: LayoutConfig) -> Self {
        if config.expand_weight == 0 || config.fallback_limit == 0 {
            #[cfg(feature = "tracing")]
            warn!(
                expand_weight = config.expand_weight,
                fallback_limit = config.fallback_limit,
                "zero layout tunable raised to 1"
            );
            config.expand_weight = config.expand_weight.max(1);
            config.fallback_limit = config.fallback_limit.max(1);
        }
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Parse `rows` and replace the current areas.
    ///
    /// On error nothing changes; see the module docs.
    pub fn configure<I, S>(&mut self, rows: I) -> Result<&GridAreas>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let template = GridTemplate::parse(rows).inspect_err(|_err| {
            #[cfg(feature = "tracing")]
            warn!(error = %_err, "grid configure aborted");
        })?;
        let scan = AreaScan::scan(&template);

        let issue = match self.config.policy {
            AreaPolicy::Strict => scan.rectangularity().into_iter().next(),
            AreaPolicy::Permissive => None,
        };
        if let Some(issue) = issue {
            let err = LayoutError::NonRectangularArea {
                name: issue.name,
                missing: issue.missing,
                outside: issue.outside,
            };
            #[cfg(feature = "tracing")]
            warn!(error = %err, "grid configure aborted");
            return Err(err);
        }

        self.limits = scan.areas.limits();
        self.scan = scan;
        self.template = Some(template);

        #[cfg(feature = "tracing")]
        debug!(
            rows = self.row_count(),
            columns = self.column_count(),
            areas = self.scan.areas.len(),
            "grid configured"
        );

        Ok(&self.scan.areas)
    }

    /// Append a full-width row named `name` and reconfigure.
    ///
    /// On an unconfigured resolver the new row is the single token `name`.
    /// Fails with [`LayoutError::InvalidAreaName`] unless `name` is a single
    /// non-fill token; the grid is left untouched.
    pub fn add_row(&mut self, name: &str) -> Result<&GridAreas> {
        if !is_area_name(name) {
            #[cfg(feature = "tracing")]
            warn!(name, "grid add_row rejected");
            return Err(LayoutError::InvalidAreaName(name.to_owned()));
        }
        let mut rows: Vec<String> = self
            .template
            .as_ref()
            .map(|t| t.source_rows().to_vec())
            .unwrap_or_default();
        let row = match &self.template {
            Some(template) => template.full_width_row(name),
            None => name.to_owned(),
        };

        #[cfg(feature = "tracing")]
        debug!(name, row = rows.len(), "grid add_row");

        rows.push(row);
        self.configure(rows)
    }

    #[inline]
    pub fn state(&self) -> ResolverState {
        if self.template.is_some() {
            ResolverState::Configured
        } else {
            ResolverState::Unconfigured
        }
    }

    #[inline]
    pub fn template(&self) -> Option<&GridTemplate> {
        self.template.as_ref()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.template.as_ref().map_or(0, GridTemplate::row_count)
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.template.as_ref().map_or(0, GridTemplate::column_count)
    }

    #[inline]
    pub fn areas(&self) -> &GridAreas {
        &self.scan.areas
    }

    #[inline]
    pub fn area(&self, name: &str) -> Option<&NamedArea> {
        self.scan.areas.get(name)
    }

    /// Like [`Self::area`] but reports absence as [`LayoutError::AreaNotFound`].
    pub fn require_area(&self, name: &str) -> Result<&NamedArea> {
        self.area(name)
            .ok_or_else(|| LayoutError::AreaNotFound(name.to_owned()))
    }

    pub fn placement(&self, name: &str) -> Result<Placement> {
        self.require_area(name).map(Placement::from_area)
    }

    #[inline]
    pub fn limits(&self) -> Option<GridLimits> {
        self.limits
    }

    /// Resize weights for every row and column of the current template.
    pub fn expand_weights(&self) -> ExpandWeights {
        ExpandWeights::from_limits(
            self.limits,
            self.row_count(),
            self.column_count(),
            self.config.expand_weight,
        )
    }

    /// Areas whose cells do not exactly fill their bounds.
    ///
    /// Runs regardless of policy and never changes state.
    pub fn check_rectangular(&self) -> Vec<RectangularityIssue> {
        self.scan.rectangularity()
    }
}

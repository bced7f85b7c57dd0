#![forbid(unsafe_code)]

//! Resolve a template file into a printable report.

use std::collections::BTreeMap;
use std::fmt;

use gridarea_core::debug;
use gridarea_core::geometry::{Rect, Size};
use gridarea_layout::{
    AreaGrid, AreaPolicy, ExpandWeights, GridAreaResolver, GridAreas, GridLimits, GridTemplate,
    LayoutConfig, LayoutError, Placement, RectangularityIssue,
};
use serde::Serialize;

use crate::cli::Opts;

/// Everything the binary prints about a resolved template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub policy: AreaPolicy,
    pub rows: usize,
    pub columns: usize,
    pub template: Vec<String>,
    pub areas: GridAreas,
    pub limits: Option<GridLimits>,
    pub expand: ExpandWeights,
    pub placements: BTreeMap<String, Placement>,
    pub issues: Vec<RectangularityIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rects: Option<BTreeMap<String, Rect>>,
}

/// Parse `input`, append `--add-row` rows and build the report.
///
/// `--strict` overrides the policy in `config`.
pub fn run(opts: &Opts, mut config: LayoutConfig, input: &str) -> Result<Report, LayoutError> {
    if opts.strict {
        config = config.strict();
    }
    let template = GridTemplate::from_text(input)?;

    let mut resolver = GridAreaResolver::with_config(config);
    resolver.configure(template.source_rows())?;
    for name in &opts.add_rows {
        resolver.add_row(name)?;
    }

    debug!(
        rows = resolver.row_count(),
        columns = resolver.column_count(),
        extra_rows = opts.add_rows.len(),
        "template resolved"
    );

    Ok(build_report(&resolver, opts.size))
}

/// Snapshot a configured resolver; `size` adds solved rectangles.
#[must_use]
pub fn build_report(resolver: &GridAreaResolver, size: Option<Size>) -> Report {
    let areas = resolver.areas().clone();
    let placements = areas
        .iter()
        .map(|(name, area)| (name.to_owned(), Placement::from_area(area)))
        .collect();
    let rects = size.map(|size| {
        let layout = AreaGrid::from_resolver(resolver).split(Rect::from_size(size));
        layout
            .iter_areas()
            .map(|(name, rect)| (name.to_owned(), rect))
            .collect()
    });

    Report {
        policy: resolver.config().policy,
        rows: resolver.row_count(),
        columns: resolver.column_count(),
        template: resolver
            .template()
            .map(|t| t.source_rows().to_vec())
            .unwrap_or_default(),
        areas,
        limits: resolver.limits(),
        expand: resolver.expand_weights(),
        placements,
        issues: resolver.check_rectangular(),
        rects,
    }
}

/// Human-readable form of [`Report`].
#[must_use]
pub fn render_text(report: &Report) -> String {
    report.to_string()
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "grid: {} row(s) x {} column(s), policy {}",
            self.rows, self.columns, self.policy
        )?;
        match self.limits {
            Some(l) => writeln!(
                f,
                "limits: rows {}..={}, columns {}..={}",
                l.min_row, l.max_row, l.min_column, l.max_column
            )?,
            None => writeln!(f, "limits: none (no named areas)")?,
        }
        writeln!(
            f,
            "expand: rows {:?}, columns {:?}",
            self.expand.rows, self.expand.columns
        )?;

        let width = self.placements.keys().map(String::len).max().unwrap_or(0);
        if !self.placements.is_empty() {
            writeln!(f, "areas:")?;
        }
        for (name, p) in &self.placements {
            write!(
                f,
                "  {name:<width$}  row {} column {} rowspan {} columnspan {}",
                p.row, p.column, p.rowspan, p.columnspan
            )?;
            if let Some(rect) = self.rects.as_ref().and_then(|rects| rects.get(name)) {
                write!(
                    f,
                    "  at {},{} size {}x{}",
                    rect.x, rect.y, rect.width, rect.height
                )?;
            }
            writeln!(f)?;
        }

        for issue in &self.issues {
            write!(f, "warning: area '{}' is not rectangular", issue.name)?;
            if !issue.missing.is_empty() {
                write!(f, "; missing {:?}", issue.missing)?;
            }
            if !issue.outside.is_empty() {
                write!(f, "; stray {:?}", issue.outside)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DASHBOARD: &str = "\
# dashboard
check   data_gen   info

tree   tree   data
tree   tree   plot
";

    #[test]
    fn report_from_text_skips_comments_and_blanks() {
        let report = run(&Opts::default(), LayoutConfig::default(), DASHBOARD).unwrap();
        assert_eq!(report.rows, 3);
        assert_eq!(report.columns, 3);
        assert_eq!(report.areas.len(), 6);
        assert_eq!(
            report.placements["tree"],
            Placement {
                row: 1,
                column: 0,
                rowspan: 2,
                columnspan: 2,
            }
        );
        assert!(report.issues.is_empty());
        assert!(report.rects.is_none());
    }

    #[test]
    fn add_rows_are_applied_in_order() {
        let opts = Opts {
            add_rows: vec!["footer".into(), "status".into()],
            ..Opts::default()
        };
        let report = run(&opts, LayoutConfig::default(), "a b").unwrap();
        assert_eq!(report.template, vec!["a b", "footer footer", "status status"]);
        assert_eq!(report.placements["status"].row, 2);
        assert_eq!(report.placements["footer"].columnspan, 2);
    }

    #[test]
    fn size_adds_rects() {
        let opts = Opts {
            size: Some(Size::new(40, 20)),
            ..Opts::default()
        };
        let report = run(&opts, LayoutConfig::default(), "a b\nc c").unwrap();
        let rects = report.rects.unwrap();
        assert_eq!(rects["a"], Rect::new(0, 0, 20, 10));
        assert_eq!(rects["c"], Rect::new(0, 10, 40, 10));
    }

    #[test]
    fn strict_flag_rejects_split_area() {
        let opts = Opts {
            strict: true,
            ..Opts::default()
        };
        let input = "a b\nb a";
        assert!(run(&Opts::default(), LayoutConfig::default(), input).is_ok());
        assert!(matches!(
            run(&opts, LayoutConfig::default(), input),
            Err(LayoutError::NonRectangularArea { .. })
        ));
    }

    #[test]
    fn errors_propagate() {
        assert_eq!(
            run(&Opts::default(), LayoutConfig::default(), "# only a comment\n"),
            Err(LayoutError::EmptyTemplate)
        );
        assert!(matches!(
            run(&Opts::default(), LayoutConfig::default(), "a b\nc"),
            Err(LayoutError::RaggedRow { row: 1, .. })
        ));
    }

    #[test]
    fn text_output_lists_areas_and_warnings() {
        let report = run(&Opts::default(), LayoutConfig::default(), "a b\nb a").unwrap();
        let text = render_text(&report);
        assert!(text.starts_with("grid: 2 row(s) x 2 column(s), policy permissive\n"));
        assert!(text.contains("  a  row 0 column 0 rowspan 2 columnspan 1\n"));
        assert!(text.contains(
            "warning: area 'a' is not rectangular; missing [(1, 0)]; stray [(1, 1)]\n"
        ));
    }

    #[test]
    fn json_output_shape() {
        let opts = Opts {
            size: Some(Size::new(4, 2)),
            ..Opts::default()
        };
        let report = run(&opts, LayoutConfig::default(), "x .").unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["policy"], "permissive");
        assert_eq!(json["expand"]["columns"], serde_json::json!([1, 0]));
        assert_eq!(
            json["placements"]["x"],
            serde_json::json!({"row": 0, "column": 0, "rowspan": 1, "columnspan": 1})
        );
        assert_eq!(json["areas"]["x"]["last_column"], 0);
        assert!(json["rects"]["x"].is_object());
    }
}

//! Fidelity report generation.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use minijinja::{Environment, context};

use crate::domain::UnsupportedFeature;
use crate::infra::write_atomic;

/// File name of the report written into the export root.
pub const REPORT_FILENAME: &str = "export_report.md";

/// How many block ids each detailed group lists before eliding.
const DETAIL_LIMIT: usize = 5;

/// Template for the report when fidelity-loss records exist.
const REPORT_TEMPLATE: &str = r##"# Unsupported Features Report

This report lists source features that could not be fully exported to Markdown.

**Total unsupported features:** {{ total }}

---

## Summary by Feature Type

{% for group in groups %}- **{{ group.key }}**: {{ group.count }} occurrence(s)
{% endfor %}
---

## Detailed Breakdown

{% for group in groups %}### {{ group.key }}

**Occurrences:** {{ group.count }}

{% for id in group.block_ids %}- Block ID: `{{ id }}`
{% endfor %}{% if group.overflow > 0 %}- ... and {{ group.overflow }} more
{% endif %}
{% endfor %}---

## Recommendations

The source format has many rich features without direct Markdown equivalents:

- **Databases**: board, calendar, gallery, and timeline views cannot be
  represented in Markdown; only a flat table export is possible.
- **Embedded content**: videos, maps, and other embeds appear as links.
  Download anything critical manually.
- **Equations**: LaTeX is preserved with `$...$` and `$$...$$` delimiters.
  Make sure your Markdown renderer supports it.
- **Colors and highlights**: text colors and background highlights are lost.
- **Mentions**: user mentions become `@username`; page and date mentions
  become plain text.

Review the blocks listed above in the original workspace and copy anything
critical by hand.
"##;

/// Template for the report when nothing was lost.
const SUCCESS_TEMPLATE: &str = r##"# Export Report

All pages were exported successfully!

No unsupported features were encountered during the export process.
"##;

/// Renders and saves the fidelity report for one export run.
pub struct ExportReport {
    unsupported: Vec<UnsupportedFeature>,
}

impl ExportReport {
    pub fn new(unsupported: Vec<UnsupportedFeature>) -> Self {
        Self { unsupported }
    }

    /// Renders the report body.
    ///
    /// Records are grouped by `{block_type}.{feature}`; groups are listed
    /// in sorted key order, block ids in discovery order within a group.
    pub fn render(&self) -> Result<String> {
        if self.unsupported.is_empty() {
            return Ok(SUCCESS_TEMPLATE.to_string());
        }

        let mut by_key: BTreeMap<String, Vec<&UnsupportedFeature>> = BTreeMap::new();
        for feature in &self.unsupported {
            by_key.entry(feature.key()).or_default().push(feature);
        }

        let groups: Vec<_> = by_key
            .iter()
            .map(|(key, features)| {
                let block_ids: Vec<&str> = features
                    .iter()
                    .take(DETAIL_LIMIT)
                    .map(|f| f.block_id.as_str())
                    .collect();
                minijinja::context! {
                    key => key,
                    count => features.len(),
                    block_ids => block_ids,
                    overflow => features.len().saturating_sub(DETAIL_LIMIT),
                }
            })
            .collect();

        let mut env = Environment::new();
        env.add_template("report", REPORT_TEMPLATE)?;
        let template = env.get_template("report")?;
        let rendered = template.render(context! {
            total => self.unsupported.len(),
            groups => groups,
        })?;

        Ok(rendered)
    }

    /// Renders the report and writes it to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let report = self.render()?;
        write_atomic(path, &report)?;
        Ok(())
    }
}

//! Plain-text summary printed at the end of a run

use anyhow::{Context, Result};
use flowforge_core::domain::result::RunResult;

use crate::report::views;

const TEMPLATE: &str = r#"
=======================================================
                Pipeline Summary Report
=======================================================

{% for run in runs -%}
App Name: {{ run.app_name }}
- Pipeline ID: {{ run.pipeline_id }}
- Start Time: {{ run.started }}
- End Time: {{ run.finished }}
- Status: {{ run.status }}
- Injected Variables: {{ run.variables_inline }}
- Build Time: {{ run.build_time }}

{% endfor -%}
=======================================================
"#;

/// Renders the text summary for `results`
pub fn render(results: &[RunResult]) -> Result<String> {
    let mut tera = tera::Tera::default();
    tera.add_raw_template("summary.txt", TEMPLATE)
        .context("Failed to load text report template")?;

    let mut context = tera::Context::new();
    context.insert("runs", &views(results));

    tera.render("summary.txt", &context)
        .context("Failed to render text report")
}

//! Static HTML report with a Chart.js build-time chart

use anyhow::{Context, Result};
use flowforge_core::domain::result::RunResult;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::report::{RunView, views};

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Flow Forge Execution Report</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 20px; line-height: 1.6; }
        h1 { color: #2e86de; text-align: center; margin-bottom: 30px; }
        .report-container { max-width: 900px; margin: 0 auto; }
        .pipeline-card { background-color: #f5f6fa; border-radius: 8px; padding: 20px; margin-bottom: 20px; box-shadow: 0 2px 5px rgba(0,0,0,0.1); }
        .pipeline-header { display: flex; justify-content: space-between; margin-bottom: 15px; }
        .pipeline-title { font-size: 1.4em; font-weight: bold; color: #2d3436; margin: 0; }
        .pipeline-id { color: #636e72; font-size: 1em; }
        .pipeline-detail { display: flex; margin-bottom: 8px; }
        .detail-label { font-weight: bold; min-width: 140px; color: #636e72; }
        .detail-value { flex-grow: 1; }
        .status-success { color: #27ae60; font-weight: bold; }
        .status-failed { color: #e74c3c; font-weight: bold; }
        .status-pending { color: #f39c12; font-weight: bold; }
        .status-other { color: #7f8c8d; font-weight: bold; }
        .variables-container { background-color: #ecf0f1; border-radius: 4px; padding: 10px; margin-top: 10px; }
        .variable-item { margin-bottom: 5px; }
        .build-time { font-weight: bold; margin-top: 15px; text-align: right; color: #2c3e50; }
        .timestamp { color: #7f8c8d; font-size: 0.9em; }
        .chart-container { margin-top: 40px; text-align: center; }
    </style>
</head>
<body>
    <div class="report-container">
        <h1>Flow Forge Execution Report</h1>
{% for run in runs %}
        <div class="pipeline-card">
            <div class="pipeline-header">
                <h2 class="pipeline-title">{{ run.app_name }}</h2>
                <span class="pipeline-id">Pipeline ID: {{ run.pipeline_id }}</span>
            </div>
            <div class="pipeline-detail">
                <div class="detail-label">Status:</div>
                <div class="detail-value {{ run.status_class }}">{{ run.status }}</div>
            </div>
            <div class="pipeline-detail">
                <div class="detail-label">Start Time:</div>
                <div class="detail-value timestamp">{{ run.started }}</div>
            </div>
            <div class="pipeline-detail">
                <div class="detail-label">End Time:</div>
                <div class="detail-value timestamp">{{ run.finished }}</div>
            </div>
            <div class="pipeline-detail">
                <div class="detail-label">Injected Variables:</div>
                <div class="detail-value">
                    <div class="variables-container">
{%- for var in run.variables %}
                        <div class="variable-item">{{ var.key }} = {{ var.value }}</div>
{%- endfor %}
                    </div>
                </div>
            </div>
            <div class="build-time">Build Time: {{ run.build_time }}</div>
        </div>
{% endfor %}
        <div class="chart-container">
            <h2>Pipeline Status Summary</h2>
            <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
            <canvas id="pipelineChart" width="400" height="200"></canvas>
            <script>
                const ctx = document.getElementById('pipelineChart').getContext('2d');
                const chartData = {{ chart | safe }};
                const pipelineChart = new Chart(ctx, {
                    type: 'bar',
                    data: {
                        labels: chartData.labels,
                        datasets: [{
                            label: 'Build Time (seconds)',
                            data: chartData.buildTimes,
                            backgroundColor: chartData.colors,
                            borderColor: chartData.colors,
                            borderWidth: 1
                        }]
                    },
                    options: {
                        responsive: true,
                        scales: {
                            y: {
                                beginAtZero: true,
                                title: { display: true, text: 'Build Time (seconds)' }
                            },
                            x: {
                                title: { display: true, text: 'Pipelines' }
                            }
                        },
                        plugins: {
                            title: { display: true, text: 'Pipeline Build Times' },
                            tooltip: {
                                callbacks: {
                                    afterLabel: function(context) {
                                        return 'Status: ' + chartData.statuses[context.dataIndex];
                                    }
                                }
                            }
                        }
                    }
                });
            </script>
        </div>
    </div>
</body>
</html>
"#;

/// Series fed to Chart.js, one entry per run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartData<'a> {
    labels: Vec<&'a str>,
    build_times: Vec<u64>,
    colors: Vec<&'static str>,
    statuses: Vec<&'a str>,
}

impl<'a> ChartData<'a> {
    fn new(runs: &'a [RunView]) -> Self {
        Self {
            labels: runs.iter().map(|r| r.app_name.as_str()).collect(),
            build_times: runs.iter().map(|r| r.build_seconds).collect(),
            colors: runs.iter().map(|r| r.color).collect(),
            statuses: runs.iter().map(|r| r.status.as_str()).collect(),
        }
    }

    /// JSON safe to embed inside a `<script>` element
    fn to_script_literal(&self) -> Result<String> {
        let json = serde_json::to_string(self).context("Failed to encode chart data")?;
        Ok(json.replace("</", "<\\/"))
    }
}

/// Renders the HTML report for `results`
pub fn render(results: &[RunResult]) -> Result<String> {
    let runs = views(results);
    let chart = ChartData::new(&runs).to_script_literal()?;

    let mut tera = tera::Tera::default();
    tera.add_raw_template("report.html", TEMPLATE)
        .context("Failed to load HTML report template")?;

    let mut context = tera::Context::new();
    context.insert("runs", &runs);
    context.insert("chart", &chart);

    tera.render("report.html", &context)
        .context("Failed to render HTML report")
}

/// Renders the HTML report and writes it to `path`
pub fn write(results: &[RunResult], path: &Path) -> Result<()> {
    info!("Generating HTML pipeline execution report...");

    let html = render(results)?;
    fs::write(path, html)
        .with_context(|| format!("Failed to write HTML report to {}", path.display()))?;

    info!("HTML report generated successfully: {}", path.display());
    Ok(())
}

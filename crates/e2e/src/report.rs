//! Suite reports
//!
//! Writes an HTML summary and a JSON document per run under
//! `<output>/reports/`, named after the suite and its start time.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::info;

use crate::error::E2eResult;
use crate::runner::{TestResult, TestStatus, TestSuiteResult};

/// Write the HTML and JSON reports for a finished suite. Returns the
/// paths of the two files.
pub fn write_reports(output_dir: &Path, suite: &TestSuiteResult) -> E2eResult<(PathBuf, PathBuf)> {
    let reports_dir = output_dir.join("reports");
    std::fs::create_dir_all(&reports_dir)?;

    let generated_at = Utc::now();
    let stem = report_stem(&suite.suite_name, generated_at);

    let html_path = reports_dir.join(format!("{}.html", stem));
    std::fs::write(&html_path, render_html(suite, generated_at))?;

    let json_path = reports_dir.join(format!("{}.json", stem));
    std::fs::write(&json_path, render_json(suite, generated_at)?)?;

    info!("Reporte HTML: {}", html_path.display());
    info!("Reporte JSON: {}", json_path.display());

    Ok((html_path, json_path))
}

/// File stem: suite name with spaces collapsed to underscores plus a
/// filesystem-safe timestamp.
fn report_stem(suite_name: &str, generated_at: DateTime<Utc>) -> String {
    format!(
        "{}_{}",
        suite_name.replace(' ', "_"),
        generated_at.format("%Y-%m-%dT%H-%M-%S")
    )
}

fn render_json(suite: &TestSuiteResult, generated_at: DateTime<Utc>) -> E2eResult<String> {
    let doc = json!({
        "suiteName": suite.suite_name,
        "generatedAt": generated_at.to_rfc3339(),
        "durationMs": suite.duration_ms,
        "stats": {
            "total": suite.total,
            "passed": suite.passed,
            "failed": suite.failed,
            "warnings": suite.warnings,
        },
        "passRate": suite.pass_rate(),
        "tests": suite.results.iter().map(|r| json!({
            "name": r.name,
            "status": r.status,
            "message": r.message,
            "screenshots": r.screenshots,
            "timestamp": r.timestamp.to_rfc3339(),
        })).collect::<Vec<_>>(),
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}

fn render_html(suite: &TestSuiteResult, generated_at: DateTime<Utc>) -> String {
    let items: String = suite.results.iter().map(render_test_item).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="utf-8">
  <title>Reporte de Pruebas - {suite_name}</title>
  <style>
    body {{ font-family: 'Segoe UI', Arial, sans-serif; margin: 0; background: #f4f6f8; color: #212529; }}
    .header {{ background: #212529; color: #fff; padding: 24px 32px; }}
    .header h1 {{ margin: 0 0 4px; font-size: 1.5rem; }}
    .header p {{ margin: 0; color: #adb5bd; }}
    .stats {{ display: flex; gap: 16px; padding: 24px 32px; flex-wrap: wrap; }}
    .stat-card {{ background: #fff; border-radius: 8px; padding: 16px 24px; min-width: 140px;
                  box-shadow: 0 1px 3px rgba(0,0,0,0.1); text-align: center; }}
    .stat-card .value {{ font-size: 2rem; font-weight: bold; }}
    .stat-card .label {{ color: #6c757d; font-size: 0.85rem; }}
    .progress {{ margin: 0 32px; background: #dee2e6; border-radius: 8px; overflow: hidden; height: 28px; }}
    .progress-fill {{ background: #28a745; color: #fff; height: 100%; display: flex;
                      align-items: center; justify-content: center; font-size: 0.85rem; }}
    .tests {{ padding: 24px 32px; }}
    .test-item {{ background: #fff; border-radius: 6px; padding: 12px 16px; margin-bottom: 10px;
                  box-shadow: 0 1px 2px rgba(0,0,0,0.08); border-left: 5px solid #6c757d; }}
    .test-item.passed {{ border-left-color: #28a745; }}
    .test-item.failed {{ border-left-color: #dc3545; }}
    .test-item.warning {{ border-left-color: #ffc107; }}
    .test-status {{ display: inline-block; padding: 2px 10px; border-radius: 12px;
                    font-size: 0.75rem; font-weight: bold; color: #fff; }}
    .test-status.passed {{ background: #28a745; }}
    .test-status.failed {{ background: #dc3545; }}
    .test-status.warning {{ background: #ffc107; color: #212529; }}
    .test-name {{ font-weight: bold; margin-right: 8px; }}
    .test-message {{ color: #495057; margin-top: 6px; font-size: 0.9rem; }}
    .test-timestamp {{ color: #adb5bd; font-size: 0.8rem; margin-top: 4px; }}
    .footer {{ padding: 16px 32px 32px; color: #6c757d; font-size: 0.85rem; }}
  </style>
</head>
<body>
  <div class="header">
    <h1>Reporte de Pruebas Automatizadas</h1>
    <p>{suite_name}</p>
  </div>
  <div class="stats">
    <div class="stat-card"><div class="value">{total}</div><div class="label">Total Pruebas</div></div>
    <div class="stat-card"><div class="value">{passed}</div><div class="label">Pasadas</div></div>
    <div class="stat-card"><div class="value">{failed}</div><div class="label">Fallidas</div></div>
    <div class="stat-card"><div class="value">{warnings}</div><div class="label">Advertencias</div></div>
  </div>
  <div class="progress">
    <div class="progress-fill" style="width: {pass_rate:.1}%">{pass_rate:.1}% &Eacute;xito</div>
  </div>
  <div class="tests">
{items}  </div>
  <div class="footer">
    <p>Duraci&oacute;n Total: {duration:.2} segundos</p>
    <p>Fecha de Ejecuci&oacute;n: {generated_at}</p>
    <p>Proyecto: Gestor de Cine - Pruebas con Playwright</p>
  </div>
</body>
</html>
"#,
        suite_name = escape(&suite.suite_name),
        total = suite.total,
        passed = suite.passed,
        failed = suite.failed,
        warnings = suite.warnings,
        pass_rate = suite.pass_rate(),
        items = items,
        duration = suite.duration_ms as f64 / 1000.0,
        generated_at = generated_at.format("%d/%m/%Y %H:%M:%S UTC"),
    )
}

fn render_test_item(result: &TestResult) -> String {
    let (class, label) = match result.status {
        TestStatus::Passed => ("passed", "PASADA"),
        TestStatus::Failed => ("failed", "FALLIDA"),
        TestStatus::Warning => ("warning", "ADVERTENCIA"),
    };

    let message = result
        .message
        .as_deref()
        .map(|m| format!("      <div class=\"test-message\">{}</div>\n", escape(m)))
        .unwrap_or_default();

    format!(
        r#"    <div class="test-item {class}">
      <span class="test-name">{name}</span>
      <span class="test-status {class}">{label}</span>
{message}      <div class="test-timestamp">{timestamp} ({duration} ms)</div>
    </div>
"#,
        class = class,
        name = escape(&result.name),
        label = label,
        message = message,
        timestamp = result.timestamp.format("%d/%m/%Y %H:%M:%S"),
        duration = result.duration_ms,
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

//! Admin 页面处理器

use axum::{
    extract::State,
    response::{Html, Json},
};

use crate::visit_log::stats;

use super::middleware::AdminState;

/// GET /admin
///
/// 全量扫描当前日志，渲染聚合卡片 + 访问记录表格。
pub async fn admin_dashboard(State(state): State<AdminState>) -> Html<String> {
    let records = state.log.snapshot();
    let summary = stats::summary(&records);
    let charts = stats::chart_data(&records);

    let mut rows = String::new();
    for record in records.iter().rev() {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            record.seq,
            escape_html(&record.ip),
            escape_html(&record.location_display()),
            escape_html(&record.device),
            escape_html(&record.timestamp),
            escape_html(&record.user_agent),
        ));
    }

    let mut timeline = String::new();
    for (day, count) in &charts.timeline_data {
        timeline.push_str(&format!("<li>{}: {}</li>\n", escape_html(day), count));
    }

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Visit Dashboard</title>
  <style>
    body {{ font-family: sans-serif; margin: 2em; }}
    .cards {{ display: flex; gap: 1em; margin-bottom: 1.5em; }}
    .card {{ border: 1px solid #ccc; border-radius: 6px; padding: 1em; min-width: 10em; }}
    .card b {{ display: block; font-size: 1.5em; }}
    table {{ border-collapse: collapse; width: 100%; }}
    th, td {{ border: 1px solid #ccc; padding: 0.4em 0.6em; text-align: left; }}
  </style>
</head>
<body>
  <h1>Visit Dashboard</h1>
  <div class="cards">
    <div class="card">Total visits<b>{total}</b></div>
    <div class="card">Unique IPs<b>{unique}</b></div>
    <div class="card">Top country<b>{country}</b></div>
    <div class="card">Top device<b>{device}</b></div>
  </div>
  <h2>Visits per day</h2>
  <ul>
{timeline}  </ul>
  <h2>Visits</h2>
  <table>
    <tr><th>#</th><th>IP</th><th>Location</th><th>Device</th><th>Time</th><th>User Agent</th></tr>
{rows}  </table>
</body>
</html>
"#,
        total = summary.total_visits,
        unique = summary.unique_ips,
        country = escape_html(&summary.top_country),
        device = escape_html(&summary.top_device),
    ))
}

/// GET /admin/data
///
/// 返回前端图表刷新用的 JSON 数据。
pub async fn admin_chart_data(State(state): State<AdminState>) -> Json<stats::ChartData> {
    let records = state.log.snapshot();
    Json(stats::chart_data(&records))
}

/// HTML 转义（User-Agent 等字段来自客户端，不可直接嵌入页面）
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>"a & b"</script>"#),
            "&lt;script&gt;&quot;a &amp; b&quot;&lt;/script&gt;"
        );
        assert_eq!(escape_html("Mozilla/5.0"), "Mozilla/5.0");
    }
}

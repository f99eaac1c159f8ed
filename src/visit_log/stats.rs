//! 访问日志聚合统计
//!
//! 每次请求全量扫描计算，不做增量聚合和缓存（日志规模下 O(n) 可接受）。

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::model::visit::VisitRecord;

/// 图表数据：标签到计数的映射
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// 国家 -> 访问次数
    pub country_count: BTreeMap<String, u64>,
    /// 设备类型 -> 访问次数
    pub device_count: BTreeMap<String, u64>,
    /// 日期（YYYY-MM-DD）-> 访问次数
    pub timeline_data: BTreeMap<String, u64>,
}

/// 仪表盘聚合卡片数据
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSummary {
    /// 总访问次数
    pub total_visits: usize,
    /// 去重后的 IP 数
    pub unique_ips: usize,
    /// 出现最多的国家
    pub top_country: String,
    /// 出现最多的设备类型
    pub top_device: String,
}

/// 计算图表数据
pub fn chart_data(records: &[VisitRecord]) -> ChartData {
    let mut country_count: BTreeMap<String, u64> = BTreeMap::new();
    let mut device_count: BTreeMap<String, u64> = BTreeMap::new();
    let mut timeline_data: BTreeMap<String, u64> = BTreeMap::new();

    for record in records {
        *country_count.entry(record.country.clone()).or_default() += 1;
        *device_count.entry(record.device.clone()).or_default() += 1;
        *timeline_data.entry(record.day().to_string()).or_default() += 1;
    }

    ChartData {
        country_count,
        device_count,
        timeline_data,
    }
}

/// 计算聚合卡片数据
pub fn summary(records: &[VisitRecord]) -> LogSummary {
    let unique_ips = records
        .iter()
        .map(|r| r.ip.as_str())
        .collect::<HashSet<_>>()
        .len();

    let charts = chart_data(records);

    LogSummary {
        total_visits: records.len(),
        unique_ips,
        top_country: most_frequent(&charts.country_count),
        top_device: most_frequent(&charts.device_count),
    }
}

/// 取计数最大的标签；空日志返回 "N/A"，计数相同时取字典序靠前的
fn most_frequent(counts: &BTreeMap<String, u64>) -> String {
    counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
        .map(|(label, _)| label.clone())
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seq: u64, ip: &str, country: &str, device: &str, day: &str) -> VisitRecord {
        VisitRecord {
            seq,
            ip: ip.to_string(),
            city: "Unknown".to_string(),
            region_name: "Unknown".to_string(),
            country: country.to_string(),
            lat: None,
            lon: None,
            user_agent: "ua".to_string(),
            device: device.to_string(),
            timestamp: format!("{}T10:00:00+00:00", day),
        }
    }

    #[test]
    fn test_chart_data_counts() {
        let records = vec![
            record(1, "1.1.1.1", "France", "Desktop", "2025-06-01"),
            record(2, "2.2.2.2", "Unknown", "Mobile", "2025-06-01"),
            record(3, "1.1.1.1", "France", "Desktop", "2025-06-02"),
        ];

        let charts = chart_data(&records);
        assert_eq!(charts.country_count.get("France"), Some(&2));
        assert_eq!(charts.country_count.get("Unknown"), Some(&1));
        assert_eq!(charts.device_count.get("Desktop"), Some(&2));
        assert_eq!(charts.timeline_data.get("2025-06-01"), Some(&2));
        assert_eq!(charts.timeline_data.get("2025-06-02"), Some(&1));
    }

    #[test]
    fn test_summary_aggregates() {
        let records = vec![
            record(1, "1.1.1.1", "France", "Desktop", "2025-06-01"),
            record(2, "2.2.2.2", "Unknown", "Mobile", "2025-06-01"),
            record(3, "1.1.1.1", "France", "Desktop", "2025-06-02"),
        ];

        let summary = summary(&records);
        assert_eq!(summary.total_visits, 3);
        assert_eq!(summary.unique_ips, 2);
        assert_eq!(summary.top_country, "France");
        assert_eq!(summary.top_device, "Desktop");
    }

    #[test]
    fn test_summary_empty_log() {
        let summary = summary(&[]);
        assert_eq!(summary.total_visits, 0);
        assert_eq!(summary.unique_ips, 0);
        assert_eq!(summary.top_country, "N/A");
        assert_eq!(summary.top_device, "N/A");
    }

    #[test]
    fn test_chart_data_serializes_camel_case() {
        let json = serde_json::to_value(chart_data(&[])).unwrap();
        assert!(json.get("countryCount").is_some());
        assert!(json.get("deviceCount").is_some());
        assert!(json.get("timelineData").is_some());
    }
}

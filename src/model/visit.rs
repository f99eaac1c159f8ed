//! 访问记录数据模型

use serde::{Deserialize, Serialize};

/// 位置未知时的默认值
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// 单次访问记录
///
/// 追加后不再修改；`seq` 从 1 开始单调递增。
/// 位置信息以结构化字段存储，展示用的 "city, region, country"
/// 字符串由 [`VisitRecord::location_display`] 派生，不作为数据来源。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    /// 序号（1 起始，单调递增）
    pub seq: u64,
    /// 客户端 IP
    pub ip: String,
    /// 城市（查询失败时为 "Unknown"）
    pub city: String,
    /// 地区（查询失败时为 "Unknown"）
    pub region_name: String,
    /// 国家（查询失败时为 "Unknown"）
    pub country: String,
    /// 纬度（查询失败时缺省）
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// 经度（查询失败时缺省）
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    /// User-Agent 原始字符串
    pub user_agent: String,
    /// 设备类型（由 User-Agent 推断，默认 "Desktop"）
    pub device: String,
    /// 记录时间（RFC3339）
    pub timestamp: String,
}

impl VisitRecord {
    /// 展示用的位置字符串
    pub fn location_display(&self) -> String {
        format!("{}, {}, {}", self.city, self.region_name, self.country)
    }

    /// 记录日期（时间戳的 `YYYY-MM-DD` 前缀），用于按天聚合
    pub fn day(&self) -> &str {
        self.timestamp.get(..10).unwrap_or(&self.timestamp)
    }
}

/// 根据 User-Agent 推断设备类型
///
/// 简单的子串匹配：先识别平板，再识别手机，其余归为桌面端。
pub fn classify_device(user_agent: &str) -> &'static str {
    let ua = user_agent.to_ascii_lowercase();
    if ua.contains("ipad") || ua.contains("tablet") {
        "Tablet"
    } else if ua.contains("mobile") || ua.contains("iphone") || ua.contains("android") {
        "Mobile"
    } else {
        "Desktop"
    }
}

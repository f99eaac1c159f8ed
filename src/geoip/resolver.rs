//! IP 地理位置解析器
//!
//! 封装对外部查询服务（ip-api.com 格式）的一次 HTTP 调用。
//! 任何失败（网络错误、非 2xx、`status: fail`）都降级为默认的
//! Unknown 结果，不向调用方传播错误。

use serde_json::Value;

use crate::model::visit::UNKNOWN_LOCATION;

/// 地理位置查询结果
#[derive(Debug, Clone, PartialEq)]
pub struct GeoInfo {
    pub city: String,
    pub region_name: String,
    pub country: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Default for GeoInfo {
    fn default() -> Self {
        Self {
            city: UNKNOWN_LOCATION.to_string(),
            region_name: UNKNOWN_LOCATION.to_string(),
            country: UNKNOWN_LOCATION.to_string(),
            lat: None,
            lon: None,
        }
    }
}

/// 地理位置解析器
pub struct GeoResolver {
    client: reqwest::Client,
    /// 查询地址模板，`{ip}` 为占位符
    api_url_template: String,
}

impl GeoResolver {
    pub fn new(client: reqwest::Client, api_url_template: impl Into<String>) -> Self {
        Self {
            client,
            api_url_template: api_url_template.into(),
        }
    }

    /// 查询 IP 地理位置
    ///
    /// 不重试、不抛错：失败时记录 warn 日志并返回 Unknown 默认值。
    pub async fn lookup(&self, ip: &str) -> GeoInfo {
        let url = self.api_url_template.replace("{ip}", ip);

        let resp = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("地理位置查询请求失败: {} ({})", e, ip);
                return GeoInfo::default();
            }
        };

        if !resp.status().is_success() {
            tracing::warn!("地理位置查询返回 HTTP {} ({})", resp.status(), ip);
            return GeoInfo::default();
        }

        let json: Value = match resp.json().await {
            Ok(j) => j,
            Err(e) => {
                tracing::warn!("地理位置响应解析失败: {} ({})", e, ip);
                return GeoInfo::default();
            }
        };

        parse_geo_response(&json)
    }
}

/// 解析 ip-api.com 格式的响应
///
/// 成功: `{"status": "success", "country": ..., "regionName": ..., "city": ..., "lat": ..., "lon": ...}`
/// 失败: `{"status": "fail", "message": ...}`
fn parse_geo_response(json: &Value) -> GeoInfo {
    if json["status"].as_str() != Some("success") {
        tracing::warn!(
            "地理位置服务返回失败状态: {}",
            json["message"].as_str().unwrap_or("unknown")
        );
        return GeoInfo::default();
    }

    let field = |name: &str| {
        json[name]
            .as_str()
            .filter(|v| !v.is_empty())
            .unwrap_or(UNKNOWN_LOCATION)
            .to_string()
    };

    GeoInfo {
        city: field("city"),
        region_name: field("regionName"),
        country: field("country"),
        lat: json["lat"].as_f64(),
        lon: json["lon"].as_f64(),
    }
}

//! 访问端点处理器

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    response::Html,
};

use crate::common::client_ip;
use crate::geoip::GeoResolver;
use crate::visit_log::VisitLog;

use super::page::render_prank_page;

/// 访问端点共享状态
#[derive(Clone)]
pub struct TrackerState {
    pub log: Arc<VisitLog>,
    pub resolver: Arc<GeoResolver>,
    /// 恶搞页面图片地址
    pub prank_image_url: String,
    /// 恶搞页面文案
    pub prank_text: String,
}

/// GET /meet（别名 /creepy）
///
/// 提取客户端 IP 和 User-Agent，查询地理位置（失败降级为 Unknown），
/// 追加一条访问记录后返回恶搞页面。对访问者永远返回 200。
pub async fn track_visit(
    State(state): State<TrackerState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Html<String> {
    let ip = client_ip(&headers, remote);
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let geo = state.resolver.lookup(&ip).await;
    let record = state.log.append(ip, geo, user_agent);

    tracing::info!(
        "新访问 #{}: {} @ {} [{}]",
        record.seq,
        record.ip,
        record.location_display(),
        record.device
    );

    Html(render_prank_page(&state.prank_image_url, &state.prank_text))
}

//! 访问端点路由

use axum::{Router, routing::get};

use super::handlers::{TrackerState, track_visit};

/// 创建访问端点路由
///
/// `/meet` 和 `/creepy` 是同一个处理器的两个入口（历史变体）。
pub fn create_tracker_router(state: TrackerState) -> Router {
    Router::new()
        .route("/meet", get(track_visit))
        .route("/creepy", get(track_visit))
        .with_state(state)
}

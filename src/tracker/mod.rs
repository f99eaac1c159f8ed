//! 访问端点模块
//!
//! 被追踪链接的入口：记录访问并返回恶搞页面

mod handlers;
mod page;
mod router;

pub use handlers::TrackerState;
pub use router::create_tracker_router;

//! Admin 模块
//!
//! Basic Auth 保护的日志仪表盘和图表数据接口

pub mod auth;
mod handlers;
mod middleware;
mod router;

pub use middleware::AdminState;
pub use router::create_admin_router;

//! 访问日志模块
//!
//! 追加式内存日志、去抖落盘和聚合统计

pub mod stats;
mod store;

pub use store::VisitLog;

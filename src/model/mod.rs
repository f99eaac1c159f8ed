//! 数据模型

pub mod config;
pub mod visit;

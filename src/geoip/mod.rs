//! IP 地理位置查询模块

mod resolver;

pub use resolver::{GeoInfo, GeoResolver};

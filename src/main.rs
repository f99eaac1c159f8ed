//! baitlink — 恶搞链接访问追踪服务
//!
//! 访问者点开被追踪链接后，服务记录其 IP / User-Agent / 大致地理位置，
//! 返回一个恶搞页面；Basic Auth 保护的 /admin 页面展示完整访问日志。

mod admin;
mod common;
mod geoip;
mod http_client;
mod model;
mod tracker;
mod visit_log;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use admin::{AdminState, create_admin_router};
use admin::auth::BasicCredentials;
use geoip::GeoResolver;
use model::config::Config;
use tracker::{TrackerState, create_tracker_router};
use visit_log::VisitLog;

/// 出站地理位置查询的超时时间（秒）
const GEO_HTTP_TIMEOUT_SECS: u64 = 5;

#[derive(Parser)]
#[command(name = "baitlink", about = "恶搞链接访问追踪服务")]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value_t = Config::default_config_path().to_string())]
    config: String,

    /// 监听端口（覆盖配置文件和 PORT 环境变量）
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "baitlink=info".into()),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::load(&args.config)?;
    config.apply_env_overrides();
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(path) = config.config_path() {
        tracing::debug!("配置文件: {}", path.display());
    }
    if config.staging {
        tracing::info!("staging 模式已启用，日志文件: {}", config.effective_log_file());
    }

    let client = http_client::build_client(GEO_HTTP_TIMEOUT_SECS)?;
    let resolver = Arc::new(GeoResolver::new(client, config.geo_api_url.clone()));
    let log = Arc::new(VisitLog::open(config.effective_log_file()));

    let tracker_state = TrackerState {
        log: log.clone(),
        resolver,
        prank_image_url: config.effective_prank_image_url().to_string(),
        prank_text: config.effective_prank_text().to_string(),
    };
    let admin_state = AdminState::new(
        BasicCredentials::new(config.admin_username.clone(), config.admin_password.clone()),
        log,
    );

    let app = Router::new()
        .merge(create_tracker_router(tracker_state))
        .merge(create_admin_router(admin_state));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("监听地址失败: {}", addr))?;
    tracing::info!("baitlink 已启动: http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("服务运行失败")?;

    Ok(())
}

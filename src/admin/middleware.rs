//! Admin 认证中间件

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::visit_log::VisitLog;

use super::auth::{CredentialVerifier, parse_basic_header};

/// Basic Auth 质询头的值
const CHALLENGE: &str = r#"Basic realm="Admin Area""#;

/// Admin 共享状态
#[derive(Clone)]
pub struct AdminState {
    /// 凭据校验器
    pub verifier: Arc<dyn CredentialVerifier>,
    /// 访问日志
    pub log: Arc<VisitLog>,
}

impl AdminState {
    pub fn new(verifier: impl CredentialVerifier + 'static, log: Arc<VisitLog>) -> Self {
        Self {
            verifier: Arc::new(verifier),
            log,
        }
    }
}

/// Admin Basic Auth 中间件
///
/// 缺失或无效凭据时返回 401，并带 `WWW-Authenticate` 质询头
/// 触发浏览器的登录弹窗。
pub async fn admin_auth_middleware(
    State(state): State<AdminState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let credentials = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_basic_header);

    match credentials {
        Some((username, password)) if state.verifier.verify(&username, &password) => {
            next.run(request).await
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, CHALLENGE)],
            "Unauthorized",
        )
            .into_response(),
    }
}

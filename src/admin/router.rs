//! Admin 路由配置

use axum::{Router, middleware, routing::get};

use super::handlers::{admin_chart_data, admin_dashboard};
use super::middleware::{AdminState, admin_auth_middleware};

/// 创建 Admin 路由
///
/// # 端点
/// - `GET /admin` - 日志表格 + 聚合卡片
/// - `GET /admin/data` - 图表 JSON 数据
///
/// # 认证
/// 全部端点经过 Basic Auth 中间件，401 时返回 `WWW-Authenticate` 质询。
pub fn create_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/admin", get(admin_dashboard))
        .route("/admin/data", get(admin_chart_data))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::admin::auth::BasicCredentials;
    use crate::geoip::GeoInfo;
    use crate::visit_log::VisitLog;

    use super::*;

    fn paris_geo() -> GeoInfo {
        GeoInfo {
            city: "Paris".to_string(),
            region_name: "Ile-de-France".to_string(),
            country: "France".to_string(),
            lat: Some(48.8566),
            lon: Some(2.3522),
        }
    }

    /// §8 场景：A(Paris) / B(失败) / A(Paris)
    fn seeded_log(dir: &std::path::Path) -> Arc<VisitLog> {
        let log = Arc::new(VisitLog::with_debounce(
            dir.join("visits.json"),
            Duration::from_millis(10),
        ));
        log.append("198.51.100.1".to_string(), paris_geo(), "ua-a".to_string());
        log.append("198.51.100.2".to_string(), GeoInfo::default(), "ua-b".to_string());
        log.append("198.51.100.1".to_string(), paris_geo(), "ua-a".to_string());
        log
    }

    fn test_app(log: Arc<VisitLog>) -> Router {
        create_admin_router(AdminState::new(BasicCredentials::new("admin", "s3cret"), log))
    }

    fn get(path: &str, authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(path);
        if let Some(auth) = authorization {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder.body(Body::empty()).unwrap()
    }

    // base64("admin:s3cret")
    const GOOD_AUTH: &str = "Basic YWRtaW46czNjcmV0";
    // base64("admin:wrong")
    const BAD_AUTH: &str = "Basic YWRtaW46d3Jvbmc=";

    #[tokio::test]
    async fn test_dashboard_requires_auth() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(seeded_log(dir.path()));

        let response = app.oneshot(get("/admin", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some(r#"Basic realm="Admin Area""#)
        );
    }

    #[tokio::test]
    async fn test_dashboard_rejects_wrong_password() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(seeded_log(dir.path()));

        let response = app.oneshot(get("/admin", Some(BAD_AUTH))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_dashboard_lists_every_recorded_ip() {
        let dir = tempfile::tempdir().unwrap();
        let log = seeded_log(dir.path());
        let app = test_app(log.clone());

        let response = app.oneshot(get("/admin", Some(GOOD_AUTH))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();
        for record in log.snapshot() {
            assert!(html.contains(&record.ip));
        }
        assert!(html.contains("Paris, Ile-de-France, France"));
        // 聚合卡片
        assert!(html.contains("Unique IPs"));
        assert!(html.contains("France"));
    }

    #[tokio::test]
    async fn test_chart_data_scenario_counts() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(seeded_log(dir.path()));

        let response = app.oneshot(get("/admin/data", Some(GOOD_AUTH))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["countryCount"]["France"], 2);
        assert_eq!(json["countryCount"]["Unknown"], 1);
        assert_eq!(json["deviceCount"]["Desktop"], 3);
    }

    #[tokio::test]
    async fn test_chart_data_requires_auth() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(seeded_log(dir.path()));

        let response = app.oneshot(get("/admin/data", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

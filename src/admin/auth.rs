//! Admin 凭据校验
//!
//! 校验能力抽象为 trait，路由逻辑不感知具体方案，
//! 后续可替换为更强的认证方式。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use subtle::ConstantTimeEq;

/// 凭据校验能力
pub trait CredentialVerifier: Send + Sync {
    /// 校验一对用户名/密码，返回是否放行
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// 静态用户名/密码校验（常量时间比较）
pub struct BasicCredentials {
    username: String,
    password: String,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialVerifier for BasicCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        bool::from(user_ok & pass_ok)
    }
}

/// 解析 `Authorization: Basic base64(user:pass)` 头
///
/// 格式不对、base64 无效或缺少冒号时返回 None。
pub fn parse_basic_header(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

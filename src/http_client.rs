//! HTTP Client 构建模块

use reqwest::Client;
use std::time::Duration;

/// 构建出站 HTTP Client
///
/// # Arguments
/// * `timeout_secs` - 超时时间（秒）
pub fn build_client(timeout_secs: u64) -> anyhow::Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client() {
        let client = build_client(5);
        assert!(client.is_ok());
    }
}

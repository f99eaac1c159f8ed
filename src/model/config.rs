use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// baitlink 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Admin 页面 Basic Auth 用户名
    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    /// Admin 页面 Basic Auth 密码（明文存储在 config.json 中，请确保文件权限安全）
    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// 访问日志持久化文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// staging 模式下的日志文件路径
    #[serde(default = "default_staging_log_file")]
    pub staging_log_file: String,

    /// IP 地理位置查询 API 地址，`{ip}` 为占位符
    #[serde(default = "default_geo_api_url")]
    pub geo_api_url: String,

    /// 恶搞页面的图片地址
    #[serde(default = "default_prank_image_url")]
    pub prank_image_url: String,

    /// 恶搞页面的文案
    #[serde(default = "default_prank_text")]
    pub prank_text: String,

    /// staging 模式下的图片地址
    #[serde(default = "default_staging_prank_image_url")]
    pub staging_prank_image_url: String,

    /// staging 模式下的文案
    #[serde(default = "default_staging_prank_text")]
    pub staging_prank_text: String,

    /// staging 模式：切换日志文件路径和恶搞页面内容
    #[serde(default)]
    pub staging: bool,

    /// 配置文件路径（运行时元数据，不写入 JSON）
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10000
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin".to_string()
}

fn default_log_file() -> String {
    "visits.json".to_string()
}

fn default_staging_log_file() -> String {
    "visits.staging.json".to_string()
}

fn default_geo_api_url() -> String {
    "http://ip-api.com/json/{ip}".to_string()
}

fn default_prank_image_url() -> String {
    "https://i.imgur.com/3V2ZKpL.jpeg".to_string()
}

fn default_prank_text() -> String {
    "You just got tracked. Say hi to the admin!".to_string()
}

fn default_staging_prank_image_url() -> String {
    "https://i.imgur.com/8nLFCVP.png".to_string()
}

fn default_staging_prank_text() -> String {
    "[staging] You just got tracked.".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
            log_file: default_log_file(),
            staging_log_file: default_staging_log_file(),
            geo_api_url: default_geo_api_url(),
            prank_image_url: default_prank_image_url(),
            prank_text: default_prank_text(),
            staging_prank_image_url: default_staging_prank_image_url(),
            staging_prank_text: default_staging_prank_text(),
            staging: false,
            config_path: None,
        }
    }
}

impl Config {
    /// 获取默认配置文件路径
    pub fn default_config_path() -> &'static str {
        "config.json"
    }

    /// 从文件加载配置
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            // 配置文件不存在，返回默认配置
            let mut config = Self::default();
            config.config_path = Some(path.to_path_buf());
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// 应用环境变量覆盖（PORT、STAGING）
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            match port.parse::<u16>() {
                Ok(p) => self.port = p,
                Err(_) => tracing::warn!("无效的 PORT 环境变量，忽略: {}", port),
            }
        }
        if let Ok(staging) = std::env::var("STAGING") {
            self.staging = matches!(staging.as_str(), "1" | "true" | "TRUE");
        }
    }

    /// 当前生效的日志文件路径（staging 模式下切换）
    pub fn effective_log_file(&self) -> &str {
        if self.staging {
            &self.staging_log_file
        } else {
            &self.log_file
        }
    }

    /// 当前生效的恶搞图片地址
    pub fn effective_prank_image_url(&self) -> &str {
        if self.staging {
            &self.staging_prank_image_url
        } else {
            &self.prank_image_url
        }
    }

    /// 当前生效的恶搞文案
    pub fn effective_prank_text(&self) -> &str {
        if self.staging {
            &self.staging_prank_text
        } else {
            &self.prank_text
        }
    }

    /// 获取配置文件路径（如果有）
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

use crate::error::{Result, SauceError};
use serde::{Deserialize, Serialize};

/// 公開的 SauceNAO API 位址
pub const DEFAULT_ENDPOINT: &str = "https://saucenao.com/search.php";
/// 服務端預設的結果數量
pub const DEFAULT_MAX_RESULTS: i64 = 6;

/// 建立 client 時可選的設定，所有欄位皆可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 最多回傳幾筆結果（0 代表使用預設值）
    pub max_results: Option<i64>,
    /// API key，空字串代表匿名
    pub api_key: Option<String>,
    /// API 位址
    pub api_endpoint: Option<String>,
}

/// Client 設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_endpoint: String,
    api_key: String,
    max_results: i64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl ClientConfig {
    /// 從設定建立，未指定的欄位使用預設值
    pub fn new(settings: Option<Settings>) -> Result<Self> {
        let settings = settings.unwrap_or_default();
        let mut config = Self::default();

        if let Some(max_results) = settings.max_results {
            config.set_max_results(max_results)?;
        }

        if let Some(api_key) = settings.api_key {
            config.api_key = api_key;
        }

        // 空字串也視為未設定
        if let Some(endpoint) = settings.api_endpoint.filter(|e| !e.is_empty()) {
            config.api_endpoint = endpoint;
        }

        Ok(config)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.api_endpoint = url.into();
        self
    }

    /// 更新 API key
    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.api_key = key.into();
    }

    /// 更新 API 位址
    pub fn set_endpoint(&mut self, url: impl Into<String>) {
        self.api_endpoint = url.into();
    }

    /// 更新最大結果數量：0 重設為預設值，負數回傳錯誤且不修改原值
    pub fn set_max_results(&mut self, max_results: i64) -> Result<()> {
        if max_results < 0 {
            return Err(SauceError::InvalidConfiguration(format!(
                "max_results 必須大於 0，收到 {}",
                max_results
            )));
        }

        self.max_results = if max_results == 0 {
            DEFAULT_MAX_RESULTS
        } else {
            max_results
        };

        Ok(())
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.api_endpoint
    }

    pub fn max_results(&self) -> i64 {
        self.max_results
    }
}

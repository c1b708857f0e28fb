use std::path::PathBuf;
use thiserror::Error;

/// SauceNAO client 的錯誤類型
#[derive(Debug, Error)]
pub enum SauceError {
    /// 設定值不合法（例如 max_results 為負數）
    #[error("設定錯誤: {0}")]
    InvalidConfiguration(String),

    /// 無法開啟或讀取檔案資訊
    #[error("無法存取檔案 {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 讀取內容時發生 I/O 錯誤
    #[error("I/O 錯誤: {0}")]
    Io(#[from] std::io::Error),

    /// 回應不是合法的 JSON，或結構不符
    #[error("無法解析回應: {0}")]
    Decode(#[from] serde_json::Error),

    /// 服務端在回應中夾帶的錯誤訊息（配額用盡、API key 錯誤等）
    #[error("API 錯誤: {0}")]
    Service(String),

    /// 型別不固定的欄位無法轉成整數
    #[error("無法轉換欄位: {0}")]
    Parse(String),

    /// 網路層錯誤
    #[error("請求失敗: {0}")]
    Transport(#[from] reqwest::Error),

    /// 回應無法解析且 HTTP 狀態碼不是 2xx
    #[error("HTTP 錯誤: {status}")]
    HttpStatus { status: u16 },
}

pub type Result<T> = std::result::Result<T, SauceError>;

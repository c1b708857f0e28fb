//! SauceNAO 反向圖片搜尋 API client
//!
//! 支援三種輸入方式：圖片 URL、本機檔案、資料流。
//!
//! ```no_run
//! use saucenao_client::{SauceClient, Settings};
//!
//! # async fn run() -> saucenao_client::Result<()> {
//! let mut client = SauceClient::new(Some(Settings {
//!     api_key: Some("your API key".to_string()),
//!     max_results: Some(4),
//!     ..Default::default()
//! }))?;
//! client.set_max_results(12)?;
//!
//! let response = client.from_url("https://i.imgur.com/v6EiHyj.png").await?;
//! let first = response.first();
//! println!("{:?}", first.data.external_urls);
//! println!("作者: {}", first.creator_string());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod detect;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;

// 重新導出常用項目
pub use client::SauceClient;
pub use config::{ClientConfig, Settings, DEFAULT_ENDPOINT, DEFAULT_MAX_RESULTS};
pub use error::{Result, SauceError};
pub use request::{FormPart, InputMode, SearchRequest};
pub use response::{
    decode, FlexibleValue, ResponseHeader, SearchIndex, SearchResponse, SearchResult,
    SearchResultData, SearchResultHeader,
};
pub use transport::{HttpTransport, RawResponse, Transport};

// 宣告子模組
pub mod flexible;
pub mod types;

pub use flexible::FlexibleValue;
pub use types::{
    ResponseHeader, SearchIndex, SearchResponse, SearchResult, SearchResultData,
    SearchResultHeader,
};

use crate::error::{Result, SauceError};
use serde_json::{Map, Value};
use tracing::trace;

/// 解碼 API 回應
///
/// SauceNAO 在配額用盡、API key 錯誤時仍會回傳 200，錯誤訊息放在
/// `header.message`，這種情況一律視為失敗。
pub fn decode(body: &[u8]) -> Result<SearchResponse> {
    // 最外層也必須是 object
    let root: Map<String, Value> = serde_json::from_slice(body)?;
    let response: SearchResponse = types::from_object(root)?;

    if let Some(message) = response.header.message.as_deref() {
        if !message.is_empty() {
            return Err(SauceError::Service(message.to_string()));
        }
    }

    trace!(
        results_returned = response.header.results_returned,
        results = response.results.len(),
        long_remaining = response.header.long_remaining,
        "已解碼回應"
    );

    Ok(response)
}

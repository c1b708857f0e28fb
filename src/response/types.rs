use super::flexible::FlexibleValue;
use crate::error::Result;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// 單一搜尋索引的資訊
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchIndex {
    #[serde(deserialize_with = "nullable")]
    pub status: i64,
    #[serde(deserialize_with = "nullable")]
    pub parent_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    /// 此索引的結果數
    #[serde(deserialize_with = "nullable")]
    pub results: i64,
}

/// 回應的 meta 資訊（配額、狀態）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseHeader {
    pub user_id: FlexibleValue,
    pub account_type: FlexibleValue,
    #[serde(deserialize_with = "nullable")]
    pub short_limit: String,
    #[serde(deserialize_with = "nullable")]
    pub long_limit: String,
    /// 30 秒內剩餘次數
    #[serde(deserialize_with = "nullable")]
    pub short_remaining: i64,
    /// 24 小時內剩餘次數
    #[serde(deserialize_with = "nullable")]
    pub long_remaining: i64,
    #[serde(deserialize_with = "nullable")]
    pub status: i64,
    pub results_requested: FlexibleValue,
    /// 索引 ID -> 索引資訊
    #[serde(deserialize_with = "object_map")]
    pub index: BTreeMap<String, SearchIndex>,
    #[serde(deserialize_with = "nullable")]
    pub search_depth: String,
    #[serde(deserialize_with = "nullable")]
    pub minimum_similarity: f64,
    #[serde(deserialize_with = "nullable")]
    pub query_image_display: String,
    #[serde(deserialize_with = "nullable")]
    pub query_image: String,
    #[serde(deserialize_with = "nullable")]
    pub results_returned: i64,
    /// 只有錯誤時才會出現
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 單筆結果的 header：相似度、縮圖、來源索引
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResultHeader {
    /// 百分比字串，例如 "93.41"
    #[serde(deserialize_with = "nullable")]
    pub similarity: String,
    #[serde(deserialize_with = "nullable")]
    pub thumbnail: String,
    #[serde(deserialize_with = "nullable")]
    pub index_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub index_name: String,
}

/// 單筆結果的來源資料，欄位依來源平台而定，不適用的欄位為零值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResultData {
    #[serde(rename = "ext_urls", deserialize_with = "nullable")]
    pub external_urls: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub pixiv_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub member_name: String,
    #[serde(deserialize_with = "nullable")]
    pub member_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub source: String,
    #[serde(deserialize_with = "nullable")]
    pub imdb_id: String,
    #[serde(deserialize_with = "nullable")]
    pub part: String,
    #[serde(deserialize_with = "nullable")]
    pub year: String,
    #[serde(rename = "est_time", deserialize_with = "nullable")]
    pub estimated_time: String,
    #[serde(rename = "da_id", deserialize_with = "nullable")]
    pub deviantart_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub author_name: String,
    #[serde(deserialize_with = "nullable")]
    pub author_url: String,
    #[serde(deserialize_with = "nullable")]
    pub bcy_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub member_link_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub bcy_type: String,
    #[serde(rename = "anidb_aid", deserialize_with = "nullable")]
    pub anidb_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub pawoo_id: i64,
    #[serde(rename = "pawoo_user_acct", deserialize_with = "nullable")]
    pub pawoo_user_account: String,
    #[serde(deserialize_with = "nullable")]
    pub pawoo_user_username: String,
    #[serde(deserialize_with = "nullable")]
    pub pawoo_user_display_name: String,
    #[serde(deserialize_with = "nullable")]
    pub seiga_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub sankaku_id: i64,
    pub creator: FlexibleValue,
    #[serde(deserialize_with = "nullable")]
    pub material: String,
    #[serde(deserialize_with = "nullable")]
    pub characters: String,
    #[serde(deserialize_with = "nullable")]
    pub danbooru_id: i64,
}

/// null 視同欄位不存在
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// serde derive 的 struct 也接受 JSON array（依欄位順序填值），
// 以下 helper 先讀成 Map 再轉型，只接受 object，null 一樣視為零值

pub(super) fn from_object<T: DeserializeOwned>(map: Map<String, Value>) -> serde_json::Result<T> {
    serde_json::from_value(Value::Object(map))
}

fn from_nullable_object<T: DeserializeOwned + Default>(
    map: Option<Map<String, Value>>,
) -> serde_json::Result<T> {
    map.map_or_else(|| Ok(T::default()), from_object)
}

fn object<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let map = Option::<Map<String, Value>>::deserialize(deserializer)?;
    from_nullable_object(map).map_err(D::Error::custom)
}

fn object_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Option::<Vec<Option<Map<String, Value>>>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(from_nullable_object)
        .collect::<serde_json::Result<Vec<T>>>()
        .map_err(D::Error::custom)
}

fn object_map<'de, D, T>(deserializer: D) -> std::result::Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Option::<BTreeMap<String, Option<Map<String, Value>>>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(|(key, map)| from_nullable_object(map).map(|value| (key, value)))
        .collect::<serde_json::Result<BTreeMap<String, T>>>()
        .map_err(D::Error::custom)
}

/// 單筆相似結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    #[serde(deserialize_with = "object")]
    pub header: SearchResultHeader,
    #[serde(deserialize_with = "object")]
    pub data: SearchResultData,
}

impl SearchResult {
    /// 來源是否為 Pixiv
    pub fn is_pixiv(&self) -> bool {
        self.data.pixiv_id != 0
    }

    pub fn is_imdb(&self) -> bool {
        !self.data.imdb_id.is_empty()
    }

    pub fn is_deviantart(&self) -> bool {
        self.data.deviantart_id != 0
    }

    pub fn is_bcy(&self) -> bool {
        self.data.bcy_id != 0
    }

    pub fn is_anidb(&self) -> bool {
        self.data.anidb_id != 0
    }

    pub fn is_pawoo(&self) -> bool {
        self.data.pawoo_id != 0
    }

    pub fn is_seiga(&self) -> bool {
        self.data.seiga_id != 0
    }

    pub fn is_sankaku(&self) -> bool {
        self.data.sankaku_id != 0
    }

    pub fn is_danbooru(&self) -> bool {
        self.data.danbooru_id != 0
    }

    /// 作者名稱（數字 ID 會轉成字串）
    pub fn creator_string(&self) -> String {
        self.data.creator.as_string()
    }

    /// 相似度數值，格式不對時回傳 None
    pub fn similarity(&self) -> Option<f32> {
        self.header.similarity.trim().parse().ok()
    }
}

/// 一次 API 呼叫的解碼結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(deserialize_with = "object")]
    pub header: ResponseHeader,
    /// 依相似度排序，最相似的在前
    #[serde(default, deserialize_with = "object_list")]
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    /// 服務端回報的結果數（不重新計算）
    pub fn count(&self) -> i64 {
        self.header.results_returned
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// 第一筆（最相似的）結果，沒有結果時回傳零值
    pub fn first(&self) -> SearchResult {
        self.results.first().cloned().unwrap_or_default()
    }

    /// 使用者 ID，未登入時為 0
    pub fn user_id(&self) -> Result<i64> {
        self.header.user_id.as_int()
    }

    pub fn account_type(&self) -> Result<i64> {
        self.header.account_type.as_int()
    }
}

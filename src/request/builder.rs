use super::types::{FormPart, InputMode, SearchRequest};
use crate::config::{ClientConfig, DEFAULT_MAX_RESULTS};
use crate::detect;
use crate::error::{Result, SauceError};
use reqwest::Url;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// 資料流上傳時使用的檔名
pub const UPLOAD_FILE_NAME: &str = "upload";
/// output_type=2 代表 JSON
const OUTPUT_TYPE_JSON: &str = "2";

/// 依目前設定產生請求 URL
pub fn request_url(config: &ClientConfig) -> Result<String> {
    let mut url = Url::parse(config.endpoint()).map_err(|e| {
        SauceError::InvalidConfiguration(format!("無效的 API 位址 {}: {}", config.endpoint(), e))
    })?;

    // 保留原本就帶的參數
    let mut query: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    if !config.api_key().is_empty() {
        query.push(("api_key".to_string(), config.api_key().to_string()));
    }

    if config.max_results() != DEFAULT_MAX_RESULTS {
        query.push(("numres".to_string(), config.max_results().to_string()));
    }

    query.push(("output_type".to_string(), OUTPUT_TYPE_JSON.to_string()));

    url.set_query(Some(&encode_query(query)));

    Ok(url.to_string())
}

/// 依 key 排序（同 key 保持原順序）後編碼
fn encode_query(mut pairs: Vec<(String, String)>) -> String {
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// 組出完整請求
pub fn build(config: &ClientConfig, mode: InputMode) -> Result<SearchRequest> {
    let url = request_url(config)?;
    let mode_name = mode.name();

    let part = match mode {
        InputMode::Url(image_url) => FormPart::Field {
            name: "url".to_string(),
            value: image_url,
        },
        InputMode::File(path) => file_part(&path)?,
        InputMode::Reader(reader) => reader_part(reader)?,
    };

    debug!(
        mode = mode_name,
        endpoint = %config.endpoint(),
        numres = config.max_results(),
        "已組成搜尋請求"
    );

    Ok(SearchRequest { url, part })
}

fn file_part(path: &Path) -> Result<FormPart> {
    let access_error = |source: io::Error| SauceError::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(access_error)?;
    let info = file.metadata().map_err(access_error)?;

    if !info.is_file() {
        return Err(access_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "不是一般檔案",
        )));
    }

    // 偵測完會 seek 回開頭
    let content_type = detect::detect_reader(&mut file)?;

    let mut bytes = Vec::with_capacity(info.len() as usize);
    file.read_to_end(&mut bytes)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| UPLOAD_FILE_NAME.to_string());

    Ok(FormPart::File {
        name: "file".to_string(),
        file_name,
        content_type,
        bytes,
    })
}

/// 資料流無法 seek，偵測類型會吃掉開頭的 bytes，
/// 所以只能先整個讀進記憶體再偵測、再上傳
fn reader_part(mut reader: Box<dyn Read + Send>) -> Result<FormPart> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let content_type = detect::detect(&bytes);

    Ok(FormPart::File {
        name: "file".to_string(),
        file_name: UPLOAD_FILE_NAME.to_string(),
        content_type,
        bytes,
    })
}

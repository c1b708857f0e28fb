use std::fmt;
use std::io::Read;
use std::path::PathBuf;

/// 搜尋的輸入方式，一次請求只能擇一
pub enum InputMode {
    /// 遠端圖片 URL
    Url(String),
    /// 本機檔案路徑
    File(PathBuf),
    /// 只能讀一次的資料流，送出前會整個讀進記憶體
    Reader(Box<dyn Read + Send>),
}

impl InputMode {
    pub fn reader(reader: impl Read + Send + 'static) -> Self {
        InputMode::Reader(Box::new(reader))
    }

    /// 模式名稱（log 用）
    pub fn name(&self) -> &'static str {
        match self {
            InputMode::Url(_) => "url",
            InputMode::File(_) => "file",
            InputMode::Reader(_) => "reader",
        }
    }
}

impl fmt::Debug for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Url(url) => f.debug_tuple("Url").field(url).finish(),
            InputMode::File(path) => f.debug_tuple("File").field(path).finish(),
            InputMode::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

/// multipart body 裡唯一的一個 part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// 一般欄位
    Field { name: String, value: String },
    /// 檔案欄位
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Field { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// 組好、可直接送出的請求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// 含 query string 的完整 URL
    pub url: String,
    pub part: FormPart,
}

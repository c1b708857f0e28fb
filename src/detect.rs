//! 內容類型偵測
//!
//! 只看檔案開頭的 magic bytes，無法判斷時退回 `application/octet-stream`。

use std::io::{self, Read, Seek, SeekFrom};

/// 偵測時最多讀取的位元組數
pub const HEAD_LIMIT: u64 = 3072;

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// 從 byte buffer 猜測 MIME 類型
pub fn detect(bytes: &[u8]) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }

    if looks_like_text(bytes) {
        PLAIN_TEXT.to_string()
    } else {
        OCTET_STREAM.to_string()
    }
}

/// 從可 seek 的來源偵測，讀完後把位置還原到呼叫前的地方
pub fn detect_reader<R: Read + Seek>(source: &mut R) -> io::Result<String> {
    let start = source.stream_position()?;

    let mut head = Vec::with_capacity(HEAD_LIMIT as usize);
    source.by_ref().take(HEAD_LIMIT).read_to_end(&mut head)?;

    source.seek(SeekFrom::Start(start))?;

    Ok(detect(&head))
}

fn looks_like_text(bytes: &[u8]) -> bool {
    if bytes.is_empty() || bytes.contains(&0) {
        return false;
    }

    match std::str::from_utf8(bytes) {
        Ok(_) => true,
        // 截斷在多位元組字元中間也算文字
        Err(e) => e.error_len().is_none(),
    }
}

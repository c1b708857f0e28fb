// 子模組
pub mod types;
pub mod builder;

// 重新導出
pub use types::{FormPart, InputMode, SearchRequest};
pub use builder::{build, request_url, UPLOAD_FILE_NAME};

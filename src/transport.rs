use crate::error::Result;
use crate::request::{FormPart, SearchRequest};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// 預設請求超時（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 原始 HTTP 回應
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 送出請求的抽象介面，測試時可替換
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: SearchRequest) -> Result<RawResponse>;
}

/// reqwest 實作
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// 建立新的 HTTP transport
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("saucenao-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// 使用外部建好的 client（自訂 proxy、TLS 等）
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: SearchRequest) -> Result<RawResponse> {
        let form = into_form(request.part)?;

        let response = self.client.post(&request.url).multipart(form).send().await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        debug!(status, bytes = body.len(), "收到回應");

        Ok(RawResponse { status, body })
    }
}

/// 轉成只有一個 part 的 multipart form
fn into_form(part: FormPart) -> Result<Form> {
    let form = match part {
        FormPart::Field { name, value } => Form::new().text(name, value),
        FormPart::File {
            name,
            file_name,
            content_type,
            bytes,
        } => {
            let part = Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(&content_type)?;
            Form::new().part(name, part)
        }
    };

    Ok(form)
}

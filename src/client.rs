use crate::config::{ClientConfig, Settings};
use crate::error::{Result, SauceError};
use crate::request::{self, InputMode};
use crate::response::{self, SearchResponse};
use crate::transport::{HttpTransport, Transport, DEFAULT_TIMEOUT_SECS};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

/// SauceNAO API client
///
/// 每次搜尋都是獨立的一次請求，沒有重試也沒有快取。修改設定需要
/// `&mut self`，所以不會和進行中的請求互相干擾。
#[derive(Clone)]
pub struct SauceClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl SauceClient {
    /// 建立使用 reqwest 的 client
    pub fn new(settings: Option<Settings>) -> Result<Self> {
        let config = ClientConfig::new(settings)?;
        let transport = HttpTransport::new(DEFAULT_TIMEOUT_SECS)?;

        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.config.set_api_key(key);
    }

    pub fn set_endpoint(&mut self, url: impl Into<String>) {
        self.config.set_endpoint(url);
    }

    pub fn set_max_results(&mut self, max_results: i64) -> Result<()> {
        self.config.set_max_results(max_results)
    }

    /// 以圖片 URL 搜尋
    pub async fn from_url(&self, url: &str) -> Result<SearchResponse> {
        self.search(InputMode::Url(url.to_string())).await
    }

    /// 以本機檔案搜尋
    pub async fn from_file(&self, path: impl AsRef<Path>) -> Result<SearchResponse> {
        self.search(InputMode::File(path.as_ref().to_path_buf()))
            .await
    }

    /// 以資料流搜尋，內容會先全部讀進記憶體
    pub async fn from_reader(&self, reader: impl Read + Send + 'static) -> Result<SearchResponse> {
        self.search(InputMode::reader(reader)).await
    }

    #[instrument(skip(self, mode), fields(mode = mode.name()))]
    pub async fn search(&self, mode: InputMode) -> Result<SearchResponse> {
        let request = request::build(&self.config, mode)?;
        let raw = self.transport.execute(request).await?;

        match response::decode(&raw.body) {
            // 非 2xx 且內容不是 JSON，回報狀態碼比較有意義
            Err(SauceError::Decode(_)) if !raw.is_success() => {
                debug!(status = raw.status, "回應無法解析");
                Err(SauceError::HttpStatus { status: raw.status })
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{FormPart, SearchRequest};
    use crate::transport::RawResponse;
    use bytes::Bytes;
    use std::io::Cursor;
    use std::sync::Mutex;

    const OK_BODY: &str = r#"{
        "header": { "user_id": 0, "account_type": "0", "results_returned": 1 },
        "results": [ { "header": { "similarity": "88.1" }, "data": { "seiga_id": 9 } } ]
    }"#;

    struct MockTransport {
        status: u16,
        body: &'static str,
        requests: Mutex<Vec<SearchRequest>>,
    }

    impl MockTransport {
        fn new(status: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn last_request(&self) -> SearchRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait::async_trait]
    impl Transport for MockTransport {
        async fn execute(&self, request: SearchRequest) -> Result<RawResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(RawResponse {
                status: self.status,
                body: Bytes::from_static(self.body.as_bytes()),
            })
        }
    }

    #[tokio::test]
    async fn test_from_url() {
        let transport = MockTransport::new(200, OK_BODY);
        let config = ClientConfig::default().with_api_key("key");
        let client = SauceClient::with_transport(config, transport.clone());

        let response = client.from_url("https://example.com/a.png").await.unwrap();
        assert_eq!(response.count(), 1);
        assert!(response.first().is_seiga());
        assert_eq!(response.user_id().unwrap(), 0);

        let request = transport.last_request();
        assert_eq!(
            request.url,
            "https://saucenao.com/search.php?api_key=key&output_type=2"
        );
        assert_eq!(request.part.name(), "url");
    }

    #[tokio::test]
    async fn test_from_reader() {
        let transport = MockTransport::new(200, OK_BODY);
        let client = SauceClient::with_transport(ClientConfig::default(), transport.clone());

        client
            .from_reader(Cursor::new(vec![0xFF, 0xD8, 0xFF, 0xDB, 0x00]))
            .await
            .unwrap();

        match transport.last_request().part {
            FormPart::File {
                file_name,
                content_type,
                ..
            } => {
                assert_eq!(file_name, "upload");
                assert_eq!(content_type, "image/jpeg");
            }
            other => panic!("預期檔案 part，收到 {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_file_sends_nothing() {
        let transport = MockTransport::new(200, OK_BODY);
        let client = SauceClient::with_transport(ClientConfig::default(), transport.clone());

        let err = client.from_file("./no/such/image.png").await.unwrap_err();
        assert!(matches!(err, SauceError::FileAccess { .. }));
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_service_error_on_success_status() {
        let transport = MockTransport::new(
            200,
            r#"{ "header": { "status": -1, "message": "Invalid API key." } }"#,
        );
        let client = SauceClient::with_transport(ClientConfig::default(), transport);

        match client.from_url("https://example.com/a.png").await {
            Err(SauceError::Service(message)) => assert_eq!(message, "Invalid API key."),
            other => panic!("預期 Service 錯誤，收到 {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_service_error_wins_over_status() {
        let transport = MockTransport::new(
            429,
            r#"{ "header": { "status": -2, "message": "Daily Search Limit Exceeded." } }"#,
        );
        let client = SauceClient::with_transport(ClientConfig::default(), transport);

        let err = client.from_url("https://example.com/a.png").await.unwrap_err();
        assert!(matches!(err, SauceError::Service(_)));
    }

    #[tokio::test]
    async fn test_non_json_error_status() {
        let transport = MockTransport::new(503, "<html>Service Unavailable</html>");
        let client = SauceClient::with_transport(ClientConfig::default(), transport);

        let err = client.from_url("https://example.com/a.png").await.unwrap_err();
        assert!(matches!(err, SauceError::HttpStatus { status: 503 }));
    }

    #[tokio::test]
    async fn test_non_json_success_status() {
        let transport = MockTransport::new(200, "not json");
        let client = SauceClient::with_transport(ClientConfig::default(), transport);

        let err = client.from_url("https://example.com/a.png").await.unwrap_err();
        assert!(matches!(err, SauceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_config_mutation_affects_next_request() {
        let transport = MockTransport::new(200, OK_BODY);
        let mut client = SauceClient::with_transport(ClientConfig::default(), transport.clone());

        client.set_max_results(12).unwrap();
        client.set_endpoint("https://my-saucenao.com/api");
        client.from_url("https://example.com/a.png").await.unwrap();

        assert_eq!(
            transport.last_request().url,
            "https://my-saucenao.com/api?numres=12&output_type=2"
        );
        assert!(client.set_max_results(-1).is_err());
        assert_eq!(client.config().max_results(), 12);
    }
}

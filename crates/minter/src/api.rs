//! # ミントAPIクライアント
//!
//! cNFTミントAPIに部分署名済みトランザクションの構築を依頼する。
//! HTTPトランスポートは `MintApi` トレイトで抽象化し、テストでは差し替える。
//!
//! ## リクエスト
//! ```text
//! POST <endpoint>
//! x-api-key: <api_key>
//! Content-Type: application/json
//! ```
//!
//! リトライ・タイムアウト設定は行わない（単発のベストエフォート）。

use cnft_types::{MintApiResponse, MintApiResult, MintRequest};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::error::MintError;

/// APIキーを送るヘッダー名
const API_KEY_HEADER: &str = "x-api-key";

/// cNFTミントAPIの抽象インターフェース。
#[async_trait::async_trait]
pub trait MintApi: Send + Sync {
    /// ミントトランザクションの構築を依頼し、成功時の結果を返す。
    ///
    /// `success: false` のレスポンスは `MintError::Api` として返す。
    async fn request_mint(&self, request: &MintRequest) -> Result<MintApiResult, MintError>;
}

/// Shyft cNFTミントAPIクライアント。
pub struct ShyftMintApi {
    /// ミントエンドポイントURL
    endpoint: String,
    /// `x-api-key` ヘッダーに載せるAPIキー
    api_key: String,
    /// HTTPクライアント
    http_client: reqwest::Client,
}

impl ShyftMintApi {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(endpoint, api_key, reqwest::Client::new())
    }

    /// 既存のHTTPクライアントを使って構築する。
    pub fn with_client(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            http_client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl MintApi for ShyftMintApi {
    async fn request_mint(&self, request: &MintRequest) -> Result<MintApiResult, MintError> {
        let body = serde_json::to_vec(request)
            .map_err(|e| MintError::Encoding(format!("リクエストのシリアライズに失敗: {e}")))?;

        tracing::debug!(
            endpoint = %self.endpoint,
            body = %String::from_utf8_lossy(&body),
            "cNFTミントをリクエスト"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| MintError::Transport(format!("HTTP送信失敗: {e}")))?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|e| MintError::Transport(format!("レスポンス読み取り失敗: {e}")))?;

        tracing::debug!(%status, body = %response_body, "ミントAPIレスポンス");

        parse_mint_response(status, &response_body)
    }
}

/// ミントAPIのレスポンスボディを解釈する。
///
/// - 非2xx: エンベロープが読めればその `message`、読めなければボディ全体で `Api`
/// - 2xxでエンベロープとして読めない: `Encoding`
/// - `success: false` または `result` 欠落: `Api`
pub(crate) fn parse_mint_response(
    status: StatusCode,
    body: &str,
) -> Result<MintApiResult, MintError> {
    let parsed = serde_json::from_str::<MintApiResponse>(body);

    if !status.is_success() {
        return Err(match parsed {
            Ok(envelope) if !envelope.message.is_empty() => {
                MintError::Api(format!("HTTP {status} - {}", envelope.message))
            }
            _ => MintError::Api(format!("HTTP {status} - {body}")),
        });
    }

    let envelope = parsed
        .map_err(|e| MintError::Encoding(format!("レスポンスのパースに失敗: {e}")))?;

    if !envelope.success {
        return Err(MintError::Api(envelope.message));
    }

    envelope
        .result
        .ok_or_else(|| MintError::Api("レスポンスにresultがありません".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;
    use axum::Json;
    use cnft_types::Network;

    use crate::test_helpers::start_mock_server;

    fn test_request() -> MintRequest {
        MintRequest::new(Network::MainnetBeta, "C1", "ipfs://x", "M1")
    }

    /// モックAPIでヘッダー・ボディが正しく送られ、resultが返ることを確認
    #[tokio::test]
    async fn test_request_mint_success() {
        let app = axum::Router::new().route(
            "/mint",
            axum::routing::post(
                |headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
                    assert_eq!(headers.get("x-api-key").unwrap(), "test-key");
                    assert_eq!(body["network"], "mainnet-beta");
                    assert_eq!(body["creator_wallet"], "C1");
                    assert_eq!(body["metadata_uri"], "ipfs://x");
                    assert_eq!(body["merkle_tree"], "M1");
                    assert!(body.get("receiver").is_none());

                    Json(serde_json::json!({
                        "success": true,
                        "message": "ok",
                        "result": {
                            "encoded_transaction": "AQID",
                            "mint": "MintAddr",
                            "signers": ["C1"]
                        }
                    }))
                },
            ),
        );
        let port = start_mock_server(app).await;

        let api = ShyftMintApi::new(format!("http://127.0.0.1:{port}/mint"), "test-key");
        let result = api.request_mint(&test_request()).await;

        assert!(result.is_ok(), "request_mint failed: {:?}", result.err());
        let result = result.unwrap();
        assert_eq!(result.encoded_transaction, "AQID");
        assert_eq!(result.mint, "MintAddr");
        assert_eq!(result.signers, vec!["C1"]);
    }

    /// success:false はApiエラーになる
    #[tokio::test]
    async fn test_request_mint_api_failure() {
        let app = axum::Router::new().route(
            "/mint",
            axum::routing::post(|| async {
                Json(serde_json::json!({
                    "success": false,
                    "message": "merkle tree not found"
                }))
            }),
        );
        let port = start_mock_server(app).await;

        let api = ShyftMintApi::new(format!("http://127.0.0.1:{port}/mint"), "test-key");
        let result = api.request_mint(&test_request()).await;

        match result {
            Err(MintError::Api(message)) => assert_eq!(message, "merkle tree not found"),
            other => panic!("Apiエラーを期待: {other:?}"),
        }
    }

    /// 非2xxかつJSONでないボディはステータス付きのApiエラーになる
    #[tokio::test]
    async fn test_request_mint_http_error() {
        let app = axum::Router::new().route(
            "/mint",
            axum::routing::post(|| async {
                (axum::http::StatusCode::UNAUTHORIZED, "invalid api key")
            }),
        );
        let port = start_mock_server(app).await;

        let api = ShyftMintApi::new(format!("http://127.0.0.1:{port}/mint"), "bad-key");
        let result = api.request_mint(&test_request()).await;

        match result {
            Err(MintError::Api(message)) => {
                assert!(message.contains("401"), "message={message}");
                assert!(message.contains("invalid api key"), "message={message}");
            }
            other => panic!("Apiエラーを期待: {other:?}"),
        }
    }

    /// 接続できない場合はTransportエラーになる
    #[tokio::test]
    async fn test_request_mint_transport_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let api = ShyftMintApi::new(format!("http://127.0.0.1:{port}/mint"), "test-key");
        let result = api.request_mint(&test_request()).await;

        assert!(matches!(result, Err(MintError::Transport(_))), "{result:?}");
    }

    #[test]
    fn test_parse_garbage_body_is_encoding_error() {
        let result = parse_mint_response(StatusCode::OK, "<html>oops</html>");
        assert!(matches!(result, Err(MintError::Encoding(_))));
    }

    #[test]
    fn test_parse_success_without_result() {
        let result = parse_mint_response(StatusCode::OK, r#"{"success": true, "message": "?"}"#);
        assert!(matches!(result, Err(MintError::Api(_))));
    }

    #[test]
    fn test_parse_http_error_prefers_envelope_message() {
        let result = parse_mint_response(
            StatusCode::BAD_REQUEST,
            r#"{"success": false, "message": "creator_wallet is invalid"}"#,
        );
        match result {
            Err(MintError::Api(message)) => {
                assert!(message.contains("creator_wallet is invalid"), "message={message}")
            }
            other => panic!("Apiエラーを期待: {other:?}"),
        }
    }
}

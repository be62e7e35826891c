//! # トランザクション送信
//!
//! 署名済みトランザクションをSolana RPCノードにブロードキャストする。
//! 送信は1回のみ。確認（confirmation）のポーリングや再送は行わない。

use solana_sdk::transaction::VersionedTransaction;

use crate::error::MintError;
use crate::signer::{encode_transaction, ensure_first_signature};

/// トランザクション送信の抽象インターフェース。
#[async_trait::async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// トランザクションを送信し、ネットワークが割り当てた署名文字列を返す。
    async fn send_transaction(&self, tx: &VersionedTransaction) -> Result<String, MintError>;
}

/// JSON-RPC `sendTransaction` による送信。
pub struct RpcSubmitter {
    /// Solana RPC URL
    rpc_url: String,
    /// HTTPクライアント
    http_client: reqwest::Client,
    /// プリフライト（シミュレーション）を省略するか
    skip_preflight: bool,
}

impl RpcSubmitter {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            http_client: reqwest::Client::new(),
            skip_preflight: false,
        }
    }

    pub fn with_skip_preflight(mut self, skip_preflight: bool) -> Self {
        self.skip_preflight = skip_preflight;
        self
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

#[async_trait::async_trait]
impl TransactionSubmitter for RpcSubmitter {
    async fn send_transaction(&self, tx: &VersionedTransaction) -> Result<String, MintError> {
        ensure_first_signature(tx)?;
        let tx_b64 = encode_transaction(tx)?;

        let rpc_request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "sendTransaction",
            "params": [
                tx_b64,
                {"encoding": "base64", "skipPreflight": self.skip_preflight}
            ]
        });

        let rpc_response = self
            .http_client
            .post(&self.rpc_url)
            .json(&rpc_request)
            .send()
            .await
            .map_err(|e| MintError::Submission(format!("RPC送信失敗: {e}")))?;

        let status = rpc_response.status();
        let rpc_body = rpc_response
            .text()
            .await
            .map_err(|e| MintError::Submission(format!("RPCレスポンス読み取り失敗: {e}")))?;

        if !status.is_success() {
            return Err(MintError::Submission(format!(
                "RPCノードがエラーを返しました: HTTP {status} - {rpc_body}"
            )));
        }

        let rpc_body: serde_json::Value = serde_json::from_str(&rpc_body)
            .map_err(|e| MintError::Submission(format!("RPCレスポンスのパースに失敗: {e}")))?;

        if let Some(error) = rpc_body.get("error") {
            return Err(MintError::Submission(error.to_string()));
        }

        rpc_body
            .get("result")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| MintError::Submission("RPCレスポンスにresultがありません".to_string()))
    }
}

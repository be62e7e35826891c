//! # cNFTミント 共有型定義
//!
//! ミントAPI（Shyft）とのやり取り、およびミント結果のデータ構造を
//! Rust構造体として提供する。
//!
//! ## エンコーディング規則
//! - Base58: Solanaアドレス、トランザクション署名
//! - Base64: シリアライズ済みトランザクション

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Shyft cNFTミントAPIのデフォルトエンドポイント。
pub const SHYFT_CNFT_ENDPOINT: &str = "https://api.shyft.to/sol/v1/nft/compressed/mint";

// ---------------------------------------------------------------------------
// ネットワーク識別子
// ---------------------------------------------------------------------------

/// Solanaクラスタの識別子。
/// JSON上は `"mainnet-beta"` / `"devnet"` / `"testnet"` で表現される。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    #[default]
    MainnetBeta,
    Devnet,
    Testnet,
}

impl Network {
    /// ワイヤ上の識別子文字列を返す。
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::MainnetBeta => "mainnet-beta",
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
        }
    }

    /// クラスタの公開RPCエンドポイント。
    pub fn default_rpc_url(&self) -> String {
        format!("https://api.{}.solana.com", self.as_str())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet-beta" | "mainnet" => Ok(Network::MainnetBeta),
            "devnet" => Ok(Network::Devnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(format!("未知のネットワーク: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// ミントAPI リクエスト
// ---------------------------------------------------------------------------

/// cNFTミントAPIへのリクエストボディ。
///
/// アドレスの妥当性は検証しない（不正な値はミントAPI側で拒否される）。
/// 未指定のOptionalフィールドはJSONに出力されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRequest {
    /// ミント先のSolanaクラスタ
    pub network: Network,
    /// Base58エンコードされたクリエイターのウォレットアドレス
    pub creator_wallet: String,
    /// オフチェーンメタデータJSONのURI
    pub metadata_uri: String,
    /// Base58エンコードされたMerkle Treeアドレス
    pub merkle_tree: String,
    /// コレクションのミントアドレス
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_address: Option<String>,
    /// cNFTの受取人アドレス（未指定時はクリエイター）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    /// 優先手数料（lamports相当）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_fee: Option<u64>,
}

impl MintRequest {
    /// 必須フィールドのみでリクエストを構築する。
    pub fn new(
        network: Network,
        creator_wallet: impl Into<String>,
        metadata_uri: impl Into<String>,
        merkle_tree: impl Into<String>,
    ) -> Self {
        Self {
            network,
            creator_wallet: creator_wallet.into(),
            metadata_uri: metadata_uri.into(),
            merkle_tree: merkle_tree.into(),
            collection_address: None,
            receiver: None,
            priority_fee: None,
        }
    }

    pub fn with_collection(mut self, collection_address: impl Into<String>) -> Self {
        self.collection_address = Some(collection_address.into());
        self
    }

    pub fn with_receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    /// 優先手数料を設定する。0は未指定として扱う。
    pub fn with_priority_fee(mut self, priority_fee: u64) -> Self {
        self.priority_fee = (priority_fee > 0).then_some(priority_fee);
        self
    }
}

// ---------------------------------------------------------------------------
// ミントAPI レスポンス
// ---------------------------------------------------------------------------

/// cNFTミントAPIのレスポンスエンベロープ。
/// 失敗時は `result` が省略されることがある。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintApiResponse {
    /// 処理成否
    pub success: bool,
    /// 人間可読なメッセージ
    #[serde(default)]
    pub message: String,
    /// 成功時の結果
    #[serde(default)]
    pub result: Option<MintApiResult>,
}

/// ミントAPIが返す部分署名済みトランザクションとミント情報。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintApiResult {
    /// Base64エンコードされた未署名（部分署名）トランザクション
    pub encoded_transaction: String,
    /// Base58エンコードされたミントアドレス
    pub mint: String,
    /// トランザクションに署名が必要なアドレス一覧
    #[serde(default)]
    pub signers: Vec<String>,
}

// ---------------------------------------------------------------------------
// ミント結果
// ---------------------------------------------------------------------------

/// ミント処理全体の出力。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintResult {
    /// Base58エンコードされたトランザクション署名
    pub signature: String,
    /// Base58エンコードされたミントアドレス
    pub mint: String,
}

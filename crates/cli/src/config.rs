//! # CLI設定
//!
//! コマンドライン引数と環境変数から実行設定を解決する。
//! 環境変数の参照は注入された関数経由で行い、テストではプロセス環境に触れない。

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail};
use clap::Parser;
use cnft_minter::KeypairSource;
use cnft_types::{MintRequest, Network, SHYFT_CNFT_ENDPOINT};

/// APIキーの環境変数名
pub const API_KEY_ENV: &str = "SHYFT_API_KEY";
/// 署名鍵の環境変数名
pub const MINT_ACCOUNT_ENV: &str = "CNFT_MINT_ACCOUNT";

/// `CNFT_MINT_ACCOUNT` の鍵素材フォーマット。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretFormat {
    /// `[12,34,...]` 形式のJSONバイト配列
    JsonBytes,
    /// Base58文字列
    Base58,
}

impl FromStr for SecretFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json-bytes" => Ok(SecretFormat::JsonBytes),
            "base58" => Ok(SecretFormat::Base58),
            other => Err(format!("未知の鍵フォーマット: {other}（json-bytes | base58）")),
        }
    }
}

/// 圧縮NFTをミントし、署名してブロードキャストする。
#[derive(Debug, Parser)]
#[command(name = "cnft-mint", version, about)]
pub struct Args {
    /// クリエイターのウォレットアドレス
    #[arg(long)]
    pub creator: String,
    /// メタデータJSONのURI
    #[arg(long)]
    pub metadata_uri: String,
    /// Merkle Treeアドレス
    #[arg(long)]
    pub merkle_tree: String,
    /// Solanaクラスタ（mainnet-beta | devnet | testnet）
    #[arg(long, default_value = "mainnet-beta")]
    pub network: Network,
    /// コレクションのミントアドレス
    #[arg(long)]
    pub collection: Option<String>,
    /// cNFTの受取人アドレス
    #[arg(long)]
    pub receiver: Option<String>,
    /// 優先手数料（lamports）
    #[arg(long)]
    pub priority_fee: Option<u64>,
    /// ミントAPIのエンドポイント
    #[arg(long, default_value = SHYFT_CNFT_ENDPOINT)]
    pub endpoint: String,
    /// Solana RPC URL（未指定時はクラスタの公開RPC）
    #[arg(long)]
    pub rpc_url: Option<String>,
    /// ミントAPIキー（未指定時は環境変数 SHYFT_API_KEY）
    #[arg(long)]
    pub api_key: Option<String>,
    /// Solana CLI形式のキーペアファイル（未指定時は環境変数 CNFT_MINT_ACCOUNT）
    #[arg(long)]
    pub keypair: Option<PathBuf>,
    /// CNFT_MINT_ACCOUNT のフォーマット（json-bytes | base58）
    #[arg(long, default_value = "json-bytes")]
    pub secret_format: SecretFormat,
    /// プリフライトを省略して送信する
    #[arg(long)]
    pub skip_preflight: bool,
}

/// 解決済みの実行設定。APIキーを含むためDebugは実装しない。
pub struct CliConfig {
    pub request: MintRequest,
    pub endpoint: String,
    pub api_key: String,
    pub rpc_url: String,
    pub secret: KeypairSource,
    pub skip_preflight: bool,
}

impl CliConfig {
    /// 引数と環境変数から設定を解決する。
    /// APIキー・署名鍵が見つからなければネットワーク通信前にエラーを返す。
    pub fn resolve(args: Args, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_key = args
            .api_key
            .or_else(|| env(API_KEY_ENV))
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow!("APIキーが未設定です（--api-key または {API_KEY_ENV}）"))?;

        let secret = match args.keypair {
            Some(path) => KeypairSource::File(path),
            None => {
                let Some(value) = env(MINT_ACCOUNT_ENV) else {
                    bail!("署名鍵が未設定です（--keypair または {MINT_ACCOUNT_ENV}）");
                };
                match args.secret_format {
                    SecretFormat::JsonBytes => KeypairSource::JsonBytes(value),
                    SecretFormat::Base58 => KeypairSource::Base58(value),
                }
            }
        };

        let rpc_url = args
            .rpc_url
            .unwrap_or_else(|| args.network.default_rpc_url());

        let mut request =
            MintRequest::new(args.network, args.creator, args.metadata_uri, args.merkle_tree);
        if let Some(collection) = args.collection {
            request = request.with_collection(collection);
        }
        if let Some(receiver) = args.receiver {
            request = request.with_receiver(receiver);
        }
        if let Some(priority_fee) = args.priority_fee {
            request = request.with_priority_fee(priority_fee);
        }

        Ok(Self {
            request,
            endpoint: args.endpoint,
            api_key,
            rpc_url,
            secret,
            skip_preflight: args.skip_preflight,
        })
    }
}

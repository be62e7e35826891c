//! # cNFTミントCLI
//!
//! 引数・環境変数から設定を解決し、cNFTを1件ミントする。
//! 結果（`{"signature", "mint"}`）はJSONで標準出力に、ログは標準エラー出力に書き出す。
//!
//! ## 環境変数
//! - `SHYFT_API_KEY` — ミントAPIキー（`--api-key` 未指定時）
//! - `CNFT_MINT_ACCOUNT` — 署名鍵（`--keypair` 未指定時）

mod config;

use clap::Parser;
use cnft_minter::{CnftMinter, RpcSubmitter, ShyftMintApi};

use crate::config::{Args, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::resolve(Args::parse(), |key| std::env::var(key).ok())?;

    let api = ShyftMintApi::new(config.endpoint, config.api_key);
    let submitter = RpcSubmitter::new(config.rpc_url).with_skip_preflight(config.skip_preflight);

    tracing::info!(
        network = %config.request.network,
        endpoint = %api.endpoint(),
        rpc_url = %submitter.rpc_url(),
        secret = ?config.secret,
        "cNFTミントを開始します"
    );

    let minter = CnftMinter::new(api, config.secret, submitter);

    let result = minter.mint(&config.request).await?;
    println!("{}", serde_json::to_string(&result)?);

    Ok(())
}

//! # cNFTミントリレー
//!
//! ミントAPIから部分署名済みのcNFTミントトランザクションを取得し、
//! ローカルの署名鍵で署名してSolana RPCノードにブロードキャストする。
//!
//! ## 処理の流れ
//! 1. `MintApi` — ミントリクエストを送信し、Base64トランザクションとミントアドレスを受け取る
//! 2. `signer` — デコード・デシリアライズし、スロット0に署名する
//! 3. `TransactionSubmitter` — 署名済みトランザクションをブロードキャストする
//!
//! HTTPトランスポート・署名鍵・送信先はいずれもトレイトとして注入する（`CnftMinter`）。

pub mod api;
pub mod error;
pub mod mint;
pub mod secret;
pub mod signer;
pub mod submitter;

#[cfg(test)]
mod test_helpers;

pub use api::{MintApi, ShyftMintApi};
pub use error::MintError;
pub use mint::CnftMinter;
pub use secret::{KeypairSource, SecretProvider};
pub use submitter::{RpcSubmitter, TransactionSubmitter};

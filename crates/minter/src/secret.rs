//! # 署名鍵プロバイダー
//!
//! 署名用キーペアの取得を抽象化する。ライブラリはプロセス環境変数を直接読まず、
//! 呼び出し元が鍵素材を明示的に渡す。
//!
//! 対応フォーマット:
//! - JSONバイト配列（`[12,34,...]`、Solana CLIのキーペアファイルと同形式）
//! - Base58文字列（ウォレットのエクスポート形式）
//! - Solana CLIキーペアファイルのパス

use std::fmt;
use std::path::PathBuf;

use base58::FromBase58;
use solana_sdk::signature::Keypair;

use crate::error::MintError;

/// Ed25519キーペアのバイト長（秘密鍵32B + 公開鍵32B）
const KEYPAIR_LENGTH: usize = 64;

/// 署名鍵の抽象インターフェース。
pub trait SecretProvider: Send + Sync {
    /// 署名用キーペアを読み込む。未設定・形式不正は `MintError::Config`。
    fn keypair(&self) -> Result<Keypair, MintError>;
}

/// メモリ上のキーペアをそのまま使う（テスト・組み込み用途）。
impl SecretProvider for Keypair {
    fn keypair(&self) -> Result<Keypair, MintError> {
        Ok(self.insecure_clone())
    }
}

/// 外部から渡された鍵素材。
pub enum KeypairSource {
    /// JSONエンコードされたバイト配列
    JsonBytes(String),
    /// Base58エンコードされた64バイト
    Base58(String),
    /// Solana CLI形式のキーペアファイル
    File(PathBuf),
}

// 鍵素材をログに出さない
impl fmt::Debug for KeypairSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeypairSource::JsonBytes(_) => f.write_str("JsonBytes(<redacted>)"),
            KeypairSource::Base58(_) => f.write_str("Base58(<redacted>)"),
            KeypairSource::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

impl SecretProvider for KeypairSource {
    fn keypair(&self) -> Result<Keypair, MintError> {
        match self {
            KeypairSource::JsonBytes(json) => keypair_from_json(json),
            KeypairSource::Base58(encoded) => keypair_from_base58(encoded),
            KeypairSource::File(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    MintError::Config(format!(
                        "キーペアファイルの読み込みに失敗: {}: {e}",
                        path.display()
                    ))
                })?;
                keypair_from_json(&json)
            }
        }
    }
}

fn keypair_from_json(json: &str) -> Result<Keypair, MintError> {
    if json.trim().is_empty() {
        return Err(MintError::Config("鍵素材が空です".to_string()));
    }
    let bytes: Vec<u8> = serde_json::from_str(json)
        .map_err(|e| MintError::Config(format!("JSONバイト配列のパースに失敗: {e}")))?;
    keypair_from_bytes(&bytes)
}

fn keypair_from_base58(encoded: &str) -> Result<Keypair, MintError> {
    let encoded = encoded.trim();
    if encoded.is_empty() {
        return Err(MintError::Config("鍵素材が空です".to_string()));
    }
    let bytes = encoded
        .from_base58()
        .map_err(|e| MintError::Config(format!("Base58デコードに失敗: {e:?}")))?;
    keypair_from_bytes(&bytes)
}

#[allow(deprecated)] // solana-sdk 2.x のKeypair::from_bytes非推奨警告を抑制
fn keypair_from_bytes(bytes: &[u8]) -> Result<Keypair, MintError> {
    if bytes.len() != KEYPAIR_LENGTH {
        return Err(MintError::Config(format!(
            "キーペアは{KEYPAIR_LENGTH}バイトである必要があります（{}バイト）",
            bytes.len()
        )));
    }
    Keypair::from_bytes(bytes)
        .map_err(|e| MintError::Config(format!("キーペアの復元に失敗: {e}")))
}

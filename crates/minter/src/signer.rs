//! # トランザクション署名
//!
//! ミントAPIが返したBase64トランザクションをデコードし、
//! ローカルの署名鍵で先頭の署名スロットに署名する。
//! レガシー・v0いずれのメッセージも `VersionedTransaction` として扱う。
//!
//! ローカル鍵は常に先頭の必須署名者（fee payer）である前提。
//! 他の共同署名者のスロットには触れない。

use base64::Engine;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::VersionedTransaction;

use crate::error::MintError;

/// Base64エンジン（Standard）
pub(crate) fn b64() -> base64::engine::GeneralPurpose {
    base64::engine::general_purpose::STANDARD
}

/// Base64エンコードされたトランザクションをバイト列に戻す。
pub fn decode_transaction_bytes(encoded: &str) -> Result<Vec<u8>, MintError> {
    b64()
        .decode(encoded.trim())
        .map_err(|e| MintError::Decode(format!("Base64デコードに失敗: {e}")))
}

/// バイト列をトランザクションとしてデシリアライズする。
/// メッセージのバージョンプレフィックスを見てレガシー/v0を判別する。
pub fn deserialize_transaction(bytes: &[u8]) -> Result<VersionedTransaction, MintError> {
    bincode::deserialize(bytes).map_err(|e| MintError::Deserialize(e.to_string()))
}

/// トランザクションをブロードキャスト用にBase64エンコードする。
pub fn encode_transaction(tx: &VersionedTransaction) -> Result<String, MintError> {
    let bytes = bincode::serialize(tx)
        .map_err(|e| MintError::Encoding(format!("トランザクションのシリアライズに失敗: {e}")))?;
    Ok(b64().encode(bytes))
}

/// メッセージをシリアライズし、そのバイト列への署名をスロット0に書き込む。
///
/// fee payerとローカル鍵の不一致はネットワーク側で拒否されるため、ここでは警告のみ。
pub fn sign_first_slot(
    tx: &mut VersionedTransaction,
    keypair: &Keypair,
) -> Result<Signature, MintError> {
    if tx.signatures.is_empty() {
        return Err(MintError::Deserialize(
            "トランザクションに署名スロットがありません".to_string(),
        ));
    }

    let signer_pubkey = keypair.pubkey();
    let fee_payer = tx.message.static_account_keys().first();
    if fee_payer != Some(&signer_pubkey) {
        tracing::warn!(
            signer = %signer_pubkey,
            fee_payer = ?fee_payer,
            "署名鍵がトランザクションの先頭署名者と一致しません"
        );
    }

    let message_bytes = tx.message.serialize();
    let signature = keypair.sign_message(&message_bytes);
    tx.signatures[0] = signature;

    Ok(signature)
}

/// 先頭の署名スロットが埋まっていることを確認する。
pub fn ensure_first_signature(tx: &VersionedTransaction) -> Result<(), MintError> {
    match tx.signatures.first() {
        Some(signature) if *signature != Signature::default() => Ok(()),
        _ => Err(MintError::Submission(
            "先頭の署名スロットが未署名です".to_string(),
        )),
    }
}

//! # テスト用共通ヘルパー
//!
//! api, signer, submitter, mintテストで共有するトランザクション生成とモックサーバー。

use base64::Engine;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::message::{v0, Message, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::{Transaction, VersionedTransaction};

/// `payer` のみを必須署名者とする命令。
fn test_instruction(payer: &Pubkey) -> Instruction {
    Instruction::new_with_bytes(
        Pubkey::new_unique(),
        &[1, 2, 3],
        vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(Pubkey::new_unique(), false),
        ],
    )
}

/// `payer` のみを必須署名者とする未署名のレガシートランザクションを構築する。
/// ミントAPIが返す部分署名済みトランザクションの代わりに使う。
pub fn build_unsigned_tx(payer: &Pubkey) -> VersionedTransaction {
    let message =
        Message::new_with_blockhash(&[test_instruction(payer)], Some(payer), &Hash::new_unique());
    VersionedTransaction::from(Transaction::new_unsigned(message))
}

/// v0メッセージ版の未署名トランザクション。
pub fn build_unsigned_v0_tx(payer: &Pubkey) -> VersionedTransaction {
    let message =
        v0::Message::try_compile(payer, &[test_instruction(payer)], &[], Hash::new_unique())
            .unwrap();
    let num_signers = message.header.num_required_signatures as usize;
    VersionedTransaction {
        signatures: vec![Signature::default(); num_signers],
        message: VersionedMessage::V0(message),
    }
}

/// トランザクションをミントAPIと同じBase64形式にエンコードする。
pub fn encode_unsigned_tx(tx: &VersionedTransaction) -> String {
    base64::engine::general_purpose::STANDARD.encode(bincode::serialize(tx).unwrap())
}

/// テスト用モックHTTPサーバーを起動し、ポート番号を返す。
pub async fn start_mock_server(app: axum::Router) -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    port
}

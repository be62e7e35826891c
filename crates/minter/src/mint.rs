//! # cNFTミント
//!
//! リクエスト → デコード → 署名 → 送信 を順に実行する。
//! いずれかのステップで失敗した時点で中断し、エラーをそのまま返す。
//! ミントAPI側はセッション状態を持たないため、途中までの処理の巻き戻しは行わない。

use cnft_types::{MintRequest, MintResult};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signer::Signer;
use solana_sdk::transaction::VersionedTransaction;

use crate::api::MintApi;
use crate::error::MintError;
use crate::secret::SecretProvider;
use crate::signer::{
    decode_transaction_bytes, deserialize_transaction, ensure_first_signature, sign_first_slot,
};
use crate::submitter::TransactionSubmitter;

/// ミント処理の依存をまとめた構造体。
/// HTTPトランスポート・署名鍵・送信先はトレイトで注入する。
pub struct CnftMinter {
    /// ミントAPIクライアント
    api: Box<dyn MintApi>,
    /// 署名鍵プロバイダー
    secret: Box<dyn SecretProvider>,
    /// トランザクション送信先
    submitter: Box<dyn TransactionSubmitter>,
}

impl CnftMinter {
    pub fn new(
        api: impl MintApi + 'static,
        secret: impl SecretProvider + 'static,
        submitter: impl TransactionSubmitter + 'static,
    ) -> Self {
        Self {
            api: Box::new(api),
            secret: Box::new(secret),
            submitter: Box::new(submitter),
        }
    }

    /// cNFTをミントし、トランザクション署名とミントアドレスを返す。
    pub async fn mint(&self, request: &MintRequest) -> Result<MintResult, MintError> {
        // Step 1: ミントAPIにトランザクション構築を依頼
        let api_result = self.api.request_mint(request).await?;

        // Step 2: デコード・デシリアライズ（鍵の読み込みより先に行う）
        let tx_bytes = decode_transaction_bytes(&api_result.encoded_transaction)?;
        let mut tx = deserialize_transaction(&tx_bytes)?;

        // Step 3: 署名鍵の読み込みとスロット0への署名
        let keypair = self.secret.keypair()?;
        let signer_pubkey = keypair.pubkey();

        let co_signers = unhandled_co_signers(&tx, &api_result.signers, &signer_pubkey);
        if !co_signers.is_empty() {
            tracing::warn!(
                signer = %signer_pubkey,
                co_signers = ?co_signers,
                "ローカル鍵以外の署名者は署名されません。ネットワークに拒否される可能性があります"
            );
        }

        sign_first_slot(&mut tx, &keypair)?;
        ensure_first_signature(&tx)?;

        // Step 4: ブロードキャスト
        let signature = self
            .submitter
            .send_transaction(&tx)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "トランザクションの送信に失敗"))?;

        tracing::info!(%signature, mint = %api_result.mint, "cNFTをミントしました");

        Ok(MintResult {
            signature,
            mint: api_result.mint,
        })
    }
}

/// ローカル鍵では埋められない署名者を列挙する。
///
/// トランザクションの必須署名者（スロット1以降）と、ミントAPIが返した
/// `signers` のうちローカル鍵以外のものを重複なく返す。
pub fn unhandled_co_signers(
    tx: &VersionedTransaction,
    api_signers: &[String],
    signer_pubkey: &Pubkey,
) -> Vec<String> {
    let local = signer_pubkey.to_string();
    let num_required = tx.message.header().num_required_signatures as usize;

    let required = tx
        .message
        .static_account_keys()
        .iter()
        .take(num_required)
        .skip(1)
        .map(|key| key.to_string());

    let mut co_signers: Vec<String> = Vec::new();
    for signer in required.chain(api_signers.iter().cloned()) {
        if signer != local && !co_signers.contains(&signer) {
            co_signers.push(signer);
        }
    }
    co_signers
}

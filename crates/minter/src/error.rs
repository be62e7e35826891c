//! # ミントエラー型
//!
//! ミント処理の全ステップで共通のエラー型。
//! どのステップで失敗しても残りのステップは実行されず、そのまま呼び出し元に返る。

/// ミント処理のエラー型。
#[derive(Debug, thiserror::Error)]
pub enum MintError {
    /// ネットワーク通信に失敗（ミントAPIへの到達不能等）
    #[error("通信に失敗: {0}")]
    Transport(String),
    /// JSONのシリアライズ・パースに失敗
    #[error("エンコードに失敗: {0}")]
    Encoding(String),
    /// ミントAPIが失敗レスポンスを返した
    #[error("ミントAPIがエラーを返しました: {0}")]
    Api(String),
    /// トランザクションのBase64デコードに失敗
    #[error("トランザクションのデコードに失敗: {0}")]
    Decode(String),
    /// トランザクションのワイヤフォーマットが不正
    #[error("トランザクションのデシリアライズに失敗: {0}")]
    Deserialize(String),
    /// 署名鍵が未設定、または形式が不正
    #[error("署名鍵の設定が不正です: {0}")]
    Config(String),
    /// RPCノードへのブロードキャストに失敗
    #[error("トランザクションのブロードキャストに失敗: {0}")]
    Submission(String),
}

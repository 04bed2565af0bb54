//! # ドメイン層エラー定義
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 必須フィールドの欠落、不正な入力 |
//! | `NotFound` | 404 Not Found | 外部 ID に一致する書籍が存在しない |
//!
//! `NotFound` は永続化層が返すものではなく、ユースケース層が
//! 検索結果の不在（`None`）を検出して生成する。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// メッセージはそのままクライアントに返されるため、英語で記述する。
    #[error("{0}")]
    Validation(String),

    /// エンティティが見つからない
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"Book"）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },
}

//! # エラーレスポンス / メッセージレスポンス
//!
//! Book API が返す JSON ボディの共通形を提供する。
//!
//! ## 設計
//!
//! - エラーは `{ "error": "<message>" }`、完了通知は `{ "message": "<message>" }` の 1 フィールド形式
//! - `ErrorResponse` / `MessageResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - ステータスコードとの対応付けは API サービスの責務

use serde::{Deserialize, Serialize};

/// 書籍が存在しない場合の固定メッセージ
pub const BOOK_NOT_FOUND: &str = "Book not found";

/// エラーレスポンス
///
/// すべての失敗レスポンスで使用する。`error` には人間可読なメッセージを入れる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(example = json!({ "error": "Book not found" })))]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// 任意のメッセージでエラーレスポンスを作成する
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// 404 用: 書籍が見つからない
    pub fn book_not_found() -> Self {
        Self::new(BOOK_NOT_FOUND)
    }
}

/// 完了メッセージレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(
    feature = "openapi",
    schema(example = json!({ "message": "Book deleted successfully" }))
)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_book_not_foundが固定メッセージを返す() {
        let error = ErrorResponse::book_not_found();

        assert_eq!(error.error, "Book not found");
    }

    #[test]
    fn test_errorレスポンスがerrorフィールドだけを持つ() {
        let error = ErrorResponse::new("Book validation failed: title is required");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "error": "Book validation failed: title is required" })
        );
    }

    #[test]
    fn test_messageレスポンスがmessageフィールドだけを持つ() {
        let message = MessageResponse::new("Book deleted successfully");
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "message": "Book deleted successfully" })
        );
    }

    #[test]
    fn test_jsonデシリアライズが正しく動作する() {
        let error: ErrorResponse = serde_json::from_str(r#"{"error": "Book not found"}"#).unwrap();

        assert_eq!(error, ErrorResponse::book_not_found());
    }
}

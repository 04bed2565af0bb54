//! # Book Service エラー定義
//!
//! HTTP 境界のエラーと、レスポンスへの変換を定義する。
//!
//! ## エラー種別と HTTP ステータスの対応
//!
//! | 種別 | ステータス | ボディ |
//! |------|-----------|--------|
//! | `Validation` | 400 | `{"error": <メッセージ>}` |
//! | `NotFound` | 404 | `{"error": "Book not found"}` |
//! | `Internal` | 500 | `{"error": <メッセージ>}` |
//!
//! 永続化層のエラーは操作ごとに振り分ける。読み取り（一覧・取得）は 500、
//! 書き込み（作成・更新・削除）は 400 として返す。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bookshelf_domain::DomainError;
use bookshelf_infra::InfraError;
use bookshelf_shared::ErrorResponse;
use thiserror::Error;

use crate::usecase::BookError;

/// Book Service で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 不正なリクエスト、または書き込み時の永続化エラー
    #[error("{0}")]
    Validation(String),

    /// 書籍が見つからない
    #[error("Book not found")]
    NotFound,

    /// 読み取り時の永続化エラー
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// 読み取り系の操作（一覧・取得）のエラーを変換する
    pub fn from_read(err: BookError) -> Self {
        match err {
            BookError::Persistence(e) => {
                log_persistence_error(&e);
                Self::Internal(e.to_string())
            }
            other => Self::from_client_error(other),
        }
    }

    /// 書き込み系の操作（作成・更新・削除）のエラーを変換する
    pub fn from_write(err: BookError) -> Self {
        match err {
            BookError::Persistence(e) => {
                log_persistence_error(&e);
                Self::Validation(e.to_string())
            }
            other => Self::from_client_error(other),
        }
    }

    fn from_client_error(err: BookError) -> Self {
        match err {
            BookError::Domain(DomainError::NotFound { .. }) => Self::NotFound,
            other => Self::Validation(other.to_string()),
        }
    }
}

fn log_persistence_error(e: &InfraError) {
    tracing::error!(
        error = %e,
        span_trace = %e.span_trace(),
        "永続化処理に失敗しました"
    );
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            ApiError::NotFound => (StatusCode::NOT_FOUND, ErrorResponse::book_not_found()),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(msg))
            }
        };

        (status, Json(body)).into_response()
    }
}

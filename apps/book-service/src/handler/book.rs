//! # 書籍ハンドラ
//!
//! 書籍の CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /api/books` - 書籍一覧
//! - `GET /api/books/{id}` - 書籍詳細
//! - `POST /api/books` - 書籍作成
//! - `PUT /api/books/{id}` - 書籍更新（ドキュメント全体の置換）
//! - `DELETE /api/books/{id}` - 書籍削除
//!
//! `{id}` はクライアントが指定する外部 ID。ストアが採番する内部 ID ではない。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use bookshelf_domain::book::{Book, BookDraft};
use bookshelf_shared::{ErrorResponse, MessageResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::ApiError, usecase::BookUseCaseImpl};

/// 削除成功時のメッセージ
pub const BOOK_DELETED: &str = "Book deleted successfully";

/// 書籍 API の共有状態
pub struct BookState {
    pub usecase: BookUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 書籍の作成・更新リクエスト
///
/// 欠落・`null` のフィールドは `None` として受け取り、ユースケースで
/// 「required」エラーとして報告する。未知のフィールドは無視する。
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "5",
    "title": "The Catcher in the Rye",
    "author": "J.D. Salinger",
    "published_date": "1951-07-16",
    "summary": "A coming-of-age novel narrated by Holden Caulfield."
}))]
pub struct BookRequest {
    #[schema(value_type = String, required = true)]
    pub id:             Option<String>,
    #[schema(value_type = String, required = true)]
    pub title:          Option<String>,
    #[schema(value_type = String, required = true)]
    pub author:         Option<String>,
    #[schema(value_type = String, required = true)]
    pub published_date: Option<String>,
    #[schema(value_type = String, required = true)]
    pub summary:        Option<String>,
}

impl From<BookRequest> for BookDraft {
    fn from(req: BookRequest) -> Self {
        Self {
            id:             req.id,
            title:          req.title,
            author:         req.author,
            published_date: req.published_date,
            summary:        req.summary,
        }
    }
}

/// 書籍データ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "1",
    "title": "Oliver Twist",
    "author": "Charles Dickens",
    "published_date": "1837",
    "summary": "It follows the story of an orphan boy named Oliver Twist."
}))]
pub struct BookData {
    pub id:             String,
    pub title:          String,
    pub author:         String,
    pub published_date: String,
    pub summary:        String,
}

impl From<Book> for BookData {
    fn from(book: Book) -> Self {
        Self {
            id:             book.id().to_string(),
            title:          book.title().to_string(),
            author:         book.author().to_string(),
            published_date: book.published_date().to_string(),
            summary:        book.summary().to_string(),
        }
    }
}

/// JSON ボディを取り出す
///
/// 構文エラーや型不一致（文字列以外の値など）は 400 `{error}` として返す。
fn parse_body(payload: Result<Json<BookRequest>, JsonRejection>) -> Result<BookDraft, ApiError> {
    let Json(req) = payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    Ok(req.into())
}

// --- ハンドラ ---

/// GET /api/books
#[utoipa::path(
   get,
   path = "/api/books",
   tag = "books",
   summary = "Returns a list of all books",
   description = "Returns a full list of all books",
   responses(
      (status = 200, description = "Successful", body = Vec<BookData>,
         example = json!([{
            "id": "1",
            "title": "Oliver Twist",
            "author": "Charles Dickens",
            "published_date": "1837",
            "summary": "It follows the story of an orphan boy named Oliver Twist."
         }])),
      (status = 500, description = "Database error", body = ErrorResponse)
   )
)]
#[tracing::instrument(skip_all)]
pub async fn list_books(
    State(state): State<Arc<BookState>>,
) -> Result<impl IntoResponse, ApiError> {
    let books = state
        .usecase
        .list_books()
        .await
        .map_err(ApiError::from_read)?;

    let items: Vec<BookData> = books.into_iter().map(BookData::from).collect();
    Ok((StatusCode::OK, Json(items)))
}

/// GET /api/books/{id}
#[utoipa::path(
   get,
   path = "/api/books/{id}",
   tag = "books",
   summary = "Retrieve a book by ID",
   description = "Returns the book with the specified ID",
   params(("id" = String, Path, description = "Book ID", example = "6")),
   responses(
      (status = 200, description = "Returns the book with the specified ID", body = BookData,
         example = json!({
            "id": "6",
            "title": "Pride and Prejudice",
            "author": "Jane Austen",
            "published_date": "1813-01-23",
            "summary": "A romantic novel set in the early 19th century."
         })),
      (status = 404, description = "Book not found", body = ErrorResponse),
      (status = 500, description = "Database error", body = ErrorResponse)
   )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_book(
    State(state): State<Arc<BookState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state
        .usecase
        .get_book(&id)
        .await
        .map_err(ApiError::from_read)?;

    Ok((StatusCode::OK, Json(BookData::from(book))))
}

/// POST /api/books
///
/// ## レスポンス
///
/// - `201 Created`: 作成された書籍
/// - `400 Bad Request`: 必須フィールドの欠落、外部 ID の重複、永続化エラー
#[utoipa::path(
   post,
   path = "/api/books",
   tag = "books",
   summary = "Upload a new book",
   description = "Upload a new book with details",
   request_body = BookRequest,
   responses(
      (status = 201, description = "A new book has been uploaded successfully", body = BookData,
         example = json!({
            "id": "5",
            "title": "The Catcher in the Rye",
            "author": "J.D. Salinger",
            "published_date": "1951-07-16",
            "summary": "A coming-of-age novel narrated by Holden Caulfield."
         })),
      (status = 400, description = "Validation or database error", body = ErrorResponse)
   )
)]
#[tracing::instrument(skip_all)]
pub async fn create_book(
    State(state): State<Arc<BookState>>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = parse_body(payload)?;

    let book = state
        .usecase
        .create_book(draft)
        .await
        .map_err(ApiError::from_write)?;

    Ok((StatusCode::CREATED, Json(BookData::from(book))))
}

/// PUT /api/books/{id}
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の書籍
/// - `400 Bad Request`: 必須フィールドの欠落、ボディとパスの `id` 不一致、永続化エラー
/// - `404 Not Found`: 書籍が見つからない
#[utoipa::path(
   put,
   path = "/api/books/{id}",
   tag = "books",
   summary = "Update a book by ID",
   description = "Replaces the book with the specified ID and returns the updated book",
   params(("id" = String, Path, description = "Book ID", example = "3")),
   request_body = BookRequest,
   responses(
      (status = 200, description = "Book successfully updated", body = BookData,
         example = json!({
            "id": "3",
            "title": "To Kill a Mockingbird",
            "author": "Harper Lee",
            "published_date": "1960-07-11",
            "summary": "A story set in the fictional town of Maycomb, Alabama."
         })),
      (status = 400, description = "Validation or database error", body = ErrorResponse),
      (status = 404, description = "Book not found", body = ErrorResponse)
   )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_book(
    State(state): State<Arc<BookState>>,
    Path(id): Path<String>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = parse_body(payload)?;

    let book = state
        .usecase
        .update_book(&id, draft)
        .await
        .map_err(ApiError::from_write)?;

    Ok((StatusCode::OK, Json(BookData::from(book))))
}

/// DELETE /api/books/{id}
///
/// 一致する書籍がなくても 200 を返す。
#[utoipa::path(
   delete,
   path = "/api/books/{id}",
   tag = "books",
   summary = "Delete a book by ID",
   description = "Deletes the book with the specified ID",
   params(("id" = String, Path, description = "Book ID", example = "1")),
   responses(
      (status = 200, description = "Book deleted successfully", body = MessageResponse),
      (status = 400, description = "Database error", body = ErrorResponse)
   )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_book(
    State(state): State<Arc<BookState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .usecase
        .delete_book(&id)
        .await
        .map_err(ApiError::from_write)?;

    Ok((StatusCode::OK, Json(MessageResponse::new(BOOK_DELETED))))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_欠落とnullのフィールドはnoneになる() {
        let req: BookRequest =
            serde_json::from_value(serde_json::json!({ "id": "1", "title": null })).unwrap();

        let draft = BookDraft::from(req);

        assert_eq!(draft.id.as_deref(), Some("1"));
        assert_eq!(draft.title, None);
        assert_eq!(draft.summary, None);
    }

    #[test]
    fn test_未知のフィールドは無視される() {
        let req: BookRequest = serde_json::from_value(serde_json::json!({
            "id": "1",
            "title": "Oliver Twist",
            "isbn": "978-0141439747"
        }))
        .unwrap();

        assert_eq!(req.title.as_deref(), Some("Oliver Twist"));
    }

    #[test]
    fn test_文字列以外の値はデシリアライズできない() {
        let result = serde_json::from_value::<BookRequest>(serde_json::json!({ "id": 1 }));

        assert!(result.is_err());
    }

    #[test]
    fn test_book_dataは5フィールドだけをシリアライズする() {
        let book = Book::new("1", "Oliver Twist", "Charles Dickens", "1837", "An orphan boy")
            .unwrap();

        let json = serde_json::to_value(BookData::from(book)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "title": "Oliver Twist",
                "author": "Charles Dickens",
                "published_date": "1837",
                "summary": "An orphan boy"
            })
        );
    }
}

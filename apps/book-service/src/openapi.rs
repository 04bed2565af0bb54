//! # OpenAPI 仕様定義
//!
//! utoipa を使用して Book API の OpenAPI 仕様を Rust の型から自動生成する。
//! `ApiDoc::openapi()` で OpenAPI ドキュメントを取得できる。
//!
//! 配信は `app_builder` が Swagger UI と一緒に行う。
//!
//! - `GET /api-docs`: OpenAPI ドキュメント（JSON）
//! - `GET /api-docs/ui/`: Swagger UI
//!
//! ルーター（`app_builder`）とは同じハンドラ関数を参照するだけで、
//! 両者の一致はコンパイル時には検証されない。`tests/openapi_spec.rs` で確認する。

use utoipa::OpenApi;

use crate::handler::{book, health};

#[derive(OpenApi)]
#[openapi(
   info(
      title = "Book API",
      version = "1.0",
      description = "CRUD API for managing books"
   ),
   servers(
      (url = "http://localhost:4000/", description = "ローカル開発サーバー")
   ),
   paths(
      // health
      health::health_check,
      health::readiness_check,
      // books
      book::list_books,
      book::get_book,
      book::create_book,
      book::update_book,
      book::delete_book,
   ),
   components(schemas(
      bookshelf_shared::ErrorResponse,
      bookshelf_shared::MessageResponse,
   )),
   tags(
      (name = "health", description = "ヘルスチェック"),
      (name = "books", description = "書籍管理"),
   )
)]
pub struct ApiDoc;

/// OpenAPI ドキュメント（JSON）のパス
pub const OPENAPI_JSON_PATH: &str = "/api-docs";

/// Swagger UI のパス
pub const SWAGGER_UI_PATH: &str = "/api-docs/ui";

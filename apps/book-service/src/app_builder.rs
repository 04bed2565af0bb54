//! # Book Service アプリケーション構築
//!
//! DI（リポジトリ・State）の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use bookshelf_infra::{db::MongoConnection, repository::BookRepository};
use bookshelf_shared::{
    ErrorResponse,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    handler::{
        BookState,
        ReadinessState,
        create_book,
        delete_book,
        get_book,
        health_check,
        list_books,
        readiness_check,
        update_book,
    },
    openapi::{ApiDoc, OPENAPI_JSON_PATH, SWAGGER_UI_PATH},
    usecase::BookUseCaseImpl,
};

/// どのルートにも一致しないリクエストのメッセージ
pub const ROUTE_NOT_FOUND: &str = "Not found";

/// ルーターを構築する
///
/// 書籍ルートは末尾スラッシュ付き（`/api/books/` など）でも同じハンドラに届く。
/// どのルートにも一致しない場合は 404 `{"error": "Not found"}` を返す。
///
/// # 引数
///
/// * `book_repository` - 書籍リポジトリ（本番は MongoDB、テストはインメモリ）
/// * `connection` - Readiness Check で参照するデータベース接続
pub fn build_app(book_repository: Arc<dyn BookRepository>, connection: MongoConnection) -> Router {
    let book_state = Arc::new(BookState {
        usecase: BookUseCaseImpl::new(book_repository),
    });
    let readiness_state = Arc::new(ReadinessState { connection });

    let book_routes = Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route(
            "/books/{id}/",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(book_state);

    Router::new()
        .route("/health/ready", get(readiness_check))
        .with_state(readiness_state)
        .route("/health", get(health_check))
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .nest("/api", book_routes)
        .fallback(route_not_found)
        // Request ID レイヤー（レイヤー順序が重要: 下に書いたものが外側）
        // 1. SetRequestIdLayer（最外）: リクエスト受信時に UUID v7 を生成（またはクライアント提供値を使用）
        // 2. TraceLayer: カスタムスパンに request_id を含め、全ログに自動注入
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(ROUTE_NOT_FOUND)),
    )
}

//! # Book Service サーバー
//!
//! 書籍の CRUD API を提供する HTTP サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `BOOK_SERVICE_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `BOOK_SERVICE_PORT` | No | ポート番号（デフォルト: `4000`） |
//! | `MONGODB_URI` | No | MongoDB 接続 URI（デフォルト: `mongodb://127.0.0.1:27017`） |
//! | `MONGODB_DATABASE` | No | データベース名（デフォルト: `Crud_Swagger`） |
//! | `MONGODB_COLLECTION` | No | コレクション名（デフォルト: `books_collections`） |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,bookshelf=debug`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p bookshelf-book-service
//! ```
//!
//! ## データベース接続
//!
//! 起動時に一度だけ MongoDB へ接続する。失敗してもサーバーは起動し、
//! 書籍 API の各リクエストが個別にエラーを返す（`/health/ready` は 503）。

use std::{net::SocketAddr, sync::Arc};

use bookshelf_book_service::{app_builder::build_app, config::BookServiceConfig};
use bookshelf_infra::{db, repository::MongoBookRepository};
use bookshelf_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Book Service サーバーのエントリーポイント
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. 設定の読み込み
/// 4. データベース接続とインデックス作成
/// 5. ルーターの構築と HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let _app_span = init_tracing(TracingConfig::from_env("book-service"))?.entered();

    // 設定読み込み
    let config = BookServiceConfig::from_env()?;

    tracing::info!(
        "Book Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続（失敗しても起動は続行する）
    let connection = db::connect(&config.mongodb_uri, &config.mongodb_database).await;

    let book_repository = MongoBookRepository::new(connection.clone(), &config.mongodb_collection);
    if connection.is_ready()
        && let Err(e) = book_repository.ensure_indexes().await
    {
        tracing::warn!(error = %e, "外部 ID のインデックスを作成できませんでした");
    }

    let app = build_app(Arc::new(book_repository), connection);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Book Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

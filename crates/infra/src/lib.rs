//! # Bookshelf インフラ層
//!
//! ドキュメントストア（MongoDB）との接続・永続化を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: 起動時に一度だけ接続を確立し、状態（ready / 非 ready）を保持
//! - **リポジトリ実装**: [`repository::BookRepository`] の MongoDB 実装
//! - **テスト支援**: `test-utils` feature でインメモリ実装を公開
//!
//! ## 依存関係
//!
//! ```text
//! book-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - MongoDB 接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use bookshelf_infra::{db, repository::MongoBookRepository};
//!
//! async fn setup() {
//!     let connection = db::connect("mongodb://127.0.0.1:27017", "Crud_Swagger").await;
//!     let repository = MongoBookRepository::new(connection, "books_collections");
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};

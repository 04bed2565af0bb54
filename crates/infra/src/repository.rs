//! # リポジトリ
//!
//! ## 設計方針
//!
//! - **依存性注入**: ハンドラ・ユースケースは `Arc<dyn BookRepository>` のみを知る
//! - **データベース抽象化**: MongoDB 固有の処理は `MongoBookRepository` にカプセル化
//! - **テスタビリティ**: トレイト経由でインメモリ実装に差し替え可能

pub mod book_repository;

pub use book_repository::{BookRepository, MongoBookRepository};

//! # ユースケース層
//!
//! Book Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//! - **HTTP 非依存**: ユースケースは [`BookError`] を返し、
//!   ステータスコードへの変換はハンドラ層（`ApiError`）が担う

pub mod book;

pub use book::{BookError, BookUseCaseImpl};

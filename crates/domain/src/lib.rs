//! # Bookshelf ドメイン層
//!
//! 書籍（Book）のドメインモデルと、その検証ルールを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! book-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（MongoDB）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`book`] - 書籍エンティティ、外部 ID、書き込み時の検証
//! - [`error`] - ドメイン層で発生するエラーの定義
//!
//! ## 使用例
//!
//! ```rust
//! use bookshelf_domain::book::{Book, BookDraft};
//!
//! let draft = BookDraft {
//!     id:             Some("1".to_string()),
//!     title:          Some("Oliver Twist".to_string()),
//!     author:         Some("Charles Dickens".to_string()),
//!     published_date: Some("1837".to_string()),
//!     summary:        Some("An orphan boy in London.".to_string()),
//! };
//!
//! let book = Book::try_from(draft).unwrap();
//! assert_eq!(book.primary_key().as_str(), "1");
//! ```

pub mod book;
pub mod error;

pub use error::DomainError;

//! # Bookshelf 共有ユーティリティ
//!
//! ワークスペース全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - API サービスとインフラ層の双方から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（`IntoResponse` 変換は各サービスの責務）

pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::{ErrorResponse, MessageResponse};
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};

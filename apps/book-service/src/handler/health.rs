//! # ヘルスチェックハンドラ
//!
//! Book Service の稼働状態を確認するためのエンドポイント。
//!
//! - `/health`: Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready`: Readiness Check（起動時の MongoDB 接続が成功したかを返す）
//!
//! 接続は起動時に一度だけ試行し、再接続しない。Readiness Check も
//! サーバーへの疎通を確認し直すことはなく、起動時の結果をそのまま返す。

use std::{collections::BTreeMap, sync::Arc};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use bookshelf_infra::db::MongoConnection;
use bookshelf_shared::{CheckStatus, HealthResponse, ReadinessResponse};

/// Book Service のヘルスチェックエンドポイント
#[utoipa::path(
   get,
   path = "/health",
   tag = "health",
   responses(
      (status = 200, description = "サーバー稼働中", body = HealthResponse)
   )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub connection: MongoConnection,
}

/// Book Service の Readiness Check エンドポイント
///
/// データベース接続が ready → 200、そうでなければ 503。
#[utoipa::path(
   get,
   path = "/health/ready",
   tag = "health",
   responses(
      (status = 200, description = "全依存サービス稼働中", body = ReadinessResponse),
      (status = 503, description = "データベースが利用不可", body = ReadinessResponse)
   )
)]
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let database = if state.connection.is_ready() {
        CheckStatus::Ok
    } else {
        CheckStatus::Error
    };

    let response = ReadinessResponse::from_checks(BTreeMap::from([(
        "database".to_string(),
        database,
    )]));
    let http_status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(response))
}

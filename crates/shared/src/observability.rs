//! # Observability 基盤
//!
//! Book Service のログ初期化と、HTTP リクエストごとのスパン生成を提供する。
//!
//! ## 環境変数
//!
//! | 変数名 | 説明 |
//! |--------|------|
//! | `RUST_LOG` | フィルタ（未設定なら [`TracingConfig::default_filter`]） |
//! | `LOG_FORMAT` | `json` / `pretty`（未設定・不正値は `pretty`） |

use std::str::FromStr;

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_FILTER: &str = "info,bookshelf=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 イベント 1 行の JSON（本番向け）
    Json,
    /// 人間が読みやすい形式（開発向け）
    #[default]
    Pretty,
}

/// 未知の `LOG_FORMAT` 値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(UnknownLogFormat(other.to_string())),
        }
    }
}

impl LogFormat {
    /// `LOG_FORMAT` から読み取る
    ///
    /// 不正値は subscriber 初期化前のため stderr に警告して `Pretty` を使う。
    pub fn from_env() -> Self {
        let Ok(value) = std::env::var("LOG_FORMAT") else {
            return Self::default();
        };
        value.parse().unwrap_or_else(|UnknownLogFormat(other)| {
            eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
            Self::default()
        })
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// ルートスパン `app` の `service` フィールド
    pub service_name:   String,
    pub log_format:     LogFormat,
    /// `RUST_LOG` 未設定時に使うフィルタ
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }

    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// グローバル subscriber を登録し、プロセス全体のルートスパンを返す
///
/// 返したスパンを `entered()` しておくと、以降のログすべてに
/// `service` が付く。`tracing_error::ErrorLayer` も登録するので、
/// `InfraError` は生成時点の SpanTrace を保持できる。
///
/// 二重に呼ぶと `TryInitError` を返す。
#[cfg(feature = "observability")]
pub fn init_tracing(
    config: TracingConfig,
) -> Result<tracing::Span, tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.default_filter));

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .try_init()?;

    Ok(tracing::info_span!("app", service = %config.service_name))
}

#[cfg(feature = "observability")]
pub use request::{MakeRequestUuidV7, REQUEST_ID_HEADER, make_request_span};

#[cfg(feature = "observability")]
mod request {
    use http::{HeaderValue, Request};
    use tower_http::request_id::{MakeRequestId, RequestId};

    /// Request ID を運ぶヘッダー名
    pub const REQUEST_ID_HEADER: &str = "x-request-id";

    /// UUID v7 で Request ID を生成する
    ///
    /// `SetRequestIdLayer` に渡す。クライアントが `X-Request-Id` を送ってきた場合は
    /// レイヤー側でその値が優先され、この生成器は呼ばれない。
    #[derive(Debug, Clone, Copy, Default)]
    pub struct MakeRequestUuidV7;

    impl MakeRequestId for MakeRequestUuidV7 {
        fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
            let id = uuid::Uuid::now_v7().to_string();
            HeaderValue::from_str(&id).ok().map(RequestId::new)
        }
    }

    /// `TraceLayer::make_span_with` に渡すリクエストスパン
    pub fn make_request_span<B>(request: &Request<B>) -> tracing::Span {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

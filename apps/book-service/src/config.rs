//! # Book Service 設定
//!
//! 環境変数から Book Service サーバーの設定を読み込む。
//! すべての変数は任意で、未設定の場合はデフォルト値を使用する。

use std::{env, num::ParseIntError};

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_MONGODB_URI: &str = "mongodb://127.0.0.1:27017";
const DEFAULT_MONGODB_DATABASE: &str = "Crud_Swagger";
const DEFAULT_MONGODB_COLLECTION: &str = "books_collections";

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// ポート番号として解釈できない
    #[error("BOOK_SERVICE_PORT は有効なポート番号である必要があります: {value}")]
    InvalidPort {
        value:  String,
        #[source]
        source: ParseIntError,
    },
}

/// Book Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookServiceConfig {
    /// バインドアドレス
    pub host:               String,
    /// ポート番号
    pub port:               u16,
    /// MongoDB 接続 URI
    pub mongodb_uri:        String,
    /// データベース名
    pub mongodb_database:   String,
    /// 書籍コレクション名
    pub mongodb_collection: String,
}

impl BookServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の変数ソースから設定を読み込む
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = match lookup("BOOK_SERVICE_PORT") {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: var_or("BOOK_SERVICE_HOST", DEFAULT_HOST),
            port,
            mongodb_uri: var_or("MONGODB_URI", DEFAULT_MONGODB_URI),
            mongodb_database: var_or("MONGODB_DATABASE", DEFAULT_MONGODB_DATABASE),
            mongodb_collection: var_or("MONGODB_COLLECTION", DEFAULT_MONGODB_COLLECTION),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<BookServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BookServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_未設定ならデフォルト値を使う() {
        let config = load(&[]).unwrap();

        assert_eq!(
            config,
            BookServiceConfig {
                host:               "0.0.0.0".to_string(),
                port:               4000,
                mongodb_uri:        "mongodb://127.0.0.1:27017".to_string(),
                mongodb_database:   "Crud_Swagger".to_string(),
                mongodb_collection: "books_collections".to_string(),
            }
        );
    }

    #[test]
    fn test_環境変数で上書きできる() {
        let config = load(&[
            ("BOOK_SERVICE_PORT", "8080"),
            ("MONGODB_URI", "mongodb://db:27017"),
            ("MONGODB_COLLECTION", "books"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.mongodb_uri, "mongodb://db:27017");
        assert_eq!(config.mongodb_collection, "books");
        assert_eq!(config.mongodb_database, "Crud_Swagger");
    }

    #[test]
    fn test_不正なポート番号はエラー() {
        let err = load(&[("BOOK_SERVICE_PORT", "forty")]).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "forty"));
    }
}

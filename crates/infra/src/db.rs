//! # MongoDB 接続管理
//!
//! プロセス全体で 1 つのデータベース接続を確立し、その状態を保持する。
//!
//! ## 接続の状態
//!
//! | 状態 | 条件 | リポジトリ操作 |
//! |------|------|---------------|
//! | ready | URI の解析と `ping` が成功 | ドライバ経由で実行 |
//! | 非 ready | いずれかが失敗 | すべて `NotConnected` エラー |
//!
//! 起動時の接続失敗でプロセスは終了せず、再試行もしない。
//! 以降のリクエストが個別に失敗する。
//!
//! ## 接続プール
//!
//! MongoDB ドライバの `Client` は内部に接続プールを持ち、`Clone` で共有できる。
//! プールサイズ等はドライバのデフォルトに任せる。

use mongodb::{Client, Database, bson::doc};

use crate::error::InfraError;

/// データベース接続ハンドル
///
/// エントリーポイントで一度だけ作成し、リポジトリに渡す。
/// `Clone` は内部の `Database`（Arc）を共有するだけで、新しい接続は張らない。
#[derive(Debug, Clone)]
pub struct MongoConnection {
    database: Option<Database>,
}

impl MongoConnection {
    /// 接続済みのハンドルを作成する
    pub fn ready(database: Database) -> Self {
        Self {
            database: Some(database),
        }
    }

    /// 接続に失敗した（利用不可の）ハンドルを作成する
    pub fn unavailable() -> Self {
        Self { database: None }
    }

    /// 起動時の接続が成功しているかどうか
    pub fn is_ready(&self) -> bool {
        self.database.is_some()
    }

    /// 接続済みの `Database` を取得する
    pub fn database(&self) -> Result<&Database, InfraError> {
        self.database.as_ref().ok_or_else(InfraError::not_connected)
    }
}

/// MongoDB に接続する
///
/// 成功・失敗のどちらでもログを出力し、[`MongoConnection`] を返す。
/// この関数はエラーを返さない（失敗時は非 ready のハンドルを返す）。
///
/// # 引数
///
/// * `uri` - 接続 URI（例: `mongodb://127.0.0.1:27017`）
/// * `database_name` - データベース名
pub async fn connect(uri: &str, database_name: &str) -> MongoConnection {
    match try_connect(uri, database_name).await {
        Ok(database) => {
            tracing::info!(database = database_name, "データベースに接続しました");
            MongoConnection::ready(database)
        }
        Err(e) => {
            tracing::error!(
                database = database_name,
                error = %e,
                "データベースに接続できませんでした"
            );
            MongoConnection::unavailable()
        }
    }
}

/// クライアントを作成し、`ping` で疎通を確認する
///
/// `Client::with_uri_str` は遅延接続のため、`ping` を送るまで
/// サーバーに到達できるかは分からない。
async fn try_connect(uri: &str, database_name: &str) -> Result<Database, InfraError> {
    let client = Client::with_uri_str(uri).await?;
    let database = client.database(database_name);
    database.run_command(doc! { "ping": 1 }).await?;
    Ok(database)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InfraErrorKind;

    #[test]
    fn test_unavailableはreadyではない() {
        let connection = MongoConnection::unavailable();

        assert!(!connection.is_ready());
        let err = connection.database().unwrap_err();
        assert!(matches!(err.kind(), InfraErrorKind::NotConnected));
    }

    #[tokio::test]
    async fn test_不正なuriでは非readyのハンドルを返す() {
        let connection = connect("not-a-mongodb-uri", "Crud_Swagger").await;

        assert!(!connection.is_ready());
    }
}

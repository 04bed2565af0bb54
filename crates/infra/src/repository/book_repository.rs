//! # BookRepository
//!
//! 書籍の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **外部 ID で照合**: 検索・置換・削除はすべて `{ id: <外部 ID> }` フィルタで行う。
//!   ストアが採番する `_id` はこの層の外に出さない
//! - **全体置換**: 更新は部分パッチではなく、ドキュメント全体の置換
//! - **1 書籍 = 1 ドキュメント**: 単一コレクションに 5 フィールドのみを保存する

use async_trait::async_trait;
use bookshelf_domain::book::{Book, BookId, ENTITY_TYPE};
use mongodb::{
    Collection,
    IndexModel,
    bson::{Document, doc},
    options::{IndexOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};

use crate::{db::MongoConnection, error::InfraError};

/// 外部 ID を格納するフィールド名
const EXTERNAL_ID_FIELD: &str = "id";

/// 外部 ID の一意インデックス名
const EXTERNAL_ID_INDEX: &str = "book_external_id_unique";

/// 書籍リポジトリトレイト
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// 全書籍を取得する
    async fn find_all(&self) -> Result<Vec<Book>, InfraError>;

    /// 外部 ID で書籍を検索する
    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, InfraError>;

    /// 書籍を挿入する
    ///
    /// 外部 ID が既に存在する場合は `Conflict` を返す。
    async fn insert(&self, book: &Book) -> Result<(), InfraError>;

    /// 外部 ID が一致する書籍をドキュメントごと置き換える
    ///
    /// 置換後の書籍を返す。一致する書籍がなければ `None`。
    async fn replace(&self, id: &BookId, book: &Book) -> Result<Option<Book>, InfraError>;

    /// 外部 ID が一致する書籍を削除する
    ///
    /// 削除した場合は `true`、一致する書籍がなかった場合は `false`。
    async fn delete(&self, id: &BookId) -> Result<bool, InfraError>;
}

/// MongoDB に保存するドキュメントの形
///
/// `_id` はフィールドに持たない（挿入時にドライバが採番し、読み出し時は無視する）。
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookDocument {
    id:             String,
    title:          String,
    author:         String,
    published_date: String,
    summary:        String,
}

impl From<&Book> for BookDocument {
    fn from(book: &Book) -> Self {
        Self {
            id:             book.id().as_str().to_string(),
            title:          book.title().to_string(),
            author:         book.author().to_string(),
            published_date: book.published_date().to_string(),
            summary:        book.summary().to_string(),
        }
    }
}

impl TryFrom<BookDocument> for Book {
    type Error = InfraError;

    fn try_from(document: BookDocument) -> Result<Self, Self::Error> {
        let id = BookId::new(document.id)
            .map_err(|e| InfraError::unexpected(format!("不正な外部 ID が格納されています: {e}")))?;
        Ok(Book::from_db(
            id,
            document.title,
            document.author,
            document.published_date,
            document.summary,
        ))
    }
}

fn by_external_id(id: &BookId) -> Document {
    doc! { EXTERNAL_ID_FIELD: id.as_str() }
}

/// MongoDB 実装の BookRepository
#[derive(Debug, Clone)]
pub struct MongoBookRepository {
    connection:      MongoConnection,
    collection_name: String,
}

impl MongoBookRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(connection: MongoConnection, collection_name: impl Into<String>) -> Self {
        Self {
            connection,
            collection_name: collection_name.into(),
        }
    }

    /// 外部 ID の一意インデックスを作成する（冪等）
    ///
    /// 同じ定義のインデックスが既に存在する場合、MongoDB は何もしない。
    #[tracing::instrument(skip_all, level = "debug")]
    pub async fn ensure_indexes(&self) -> Result<(), InfraError> {
        let options = IndexOptions::builder()
            .unique(true)
            .name(EXTERNAL_ID_INDEX.to_string())
            .build();
        let index = IndexModel::builder()
            .keys(doc! { EXTERNAL_ID_FIELD: 1 })
            .options(options)
            .build();

        self.collection()?.create_index(index).await?;
        tracing::debug!(index = EXTERNAL_ID_INDEX, "インデックスを確認しました");
        Ok(())
    }

    fn collection(&self) -> Result<Collection<BookDocument>, InfraError> {
        Ok(self
            .connection
            .database()?
            .collection::<BookDocument>(&self.collection_name))
    }
}

#[async_trait]
impl BookRepository for MongoBookRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Book>, InfraError> {
        let mut cursor = self.collection()?.find(doc! {}).await?;

        let mut books = Vec::new();
        while cursor.advance().await? {
            let document = cursor.deserialize_current()?;
            books.push(Book::try_from(document)?);
        }
        Ok(books)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, InfraError> {
        let document = self.collection()?.find_one(by_external_id(id)).await?;
        document.map(Book::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %book.id()))]
    async fn insert(&self, book: &Book) -> Result<(), InfraError> {
        let result = self
            .collection()?
            .insert_one(BookDocument::from(book))
            .await
            .map_err(InfraError::from);

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.is_duplicate_key() => {
                Err(InfraError::conflict(ENTITY_TYPE, book.id().as_str()))
            }
            Err(e) => Err(e),
        }
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn replace(&self, id: &BookId, book: &Book) -> Result<Option<Book>, InfraError> {
        let document = self
            .collection()?
            .find_one_and_replace(by_external_id(id), BookDocument::from(book))
            .return_document(ReturnDocument::After)
            .await?;
        document.map(Book::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &BookId) -> Result<bool, InfraError> {
        let result = self.collection()?.delete_one(by_external_id(id)).await?;
        Ok(result.deleted_count > 0)
    }
}

//! 書籍管理ユースケース

use std::sync::Arc;

use bookshelf_domain::{
    DomainError,
    book::{Book, BookDraft, BookId, ENTITY_TYPE},
};
use bookshelf_infra::{InfraError, repository::BookRepository};
use thiserror::Error;

/// 書籍ユースケースで発生するエラー
#[derive(Debug, Error)]
pub enum BookError {
    /// 入力の検証失敗、または書籍が存在しない
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// 更新時にボディの `id` がパスの `id` と一致しない
    #[error("Book id in body ('{body}') does not match path id ('{path}')")]
    IdMismatch {
        /// パスで指定された外部 ID
        path: String,
        /// ボディで指定された外部 ID
        body: String,
    },

    /// 同じ外部 ID の書籍が既に存在する
    #[error("Book with id '{0}' already exists")]
    AlreadyExists(String),

    /// 永続化層のエラー
    #[error(transparent)]
    Persistence(#[from] InfraError),
}

/// 書籍管理ユースケース
pub struct BookUseCaseImpl {
    book_repository: Arc<dyn BookRepository>,
}

impl BookUseCaseImpl {
    pub fn new(book_repository: Arc<dyn BookRepository>) -> Self {
        Self { book_repository }
    }

    /// 全書籍を取得する
    pub async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        Ok(self.book_repository.find_all().await?)
    }

    /// 外部 ID で書籍を取得する
    pub async fn get_book(&self, id: &str) -> Result<Book, BookError> {
        let book_id = BookId::new(id)?;
        self.book_repository
            .find_by_id(&book_id)
            .await?
            .ok_or_else(|| not_found(&book_id))
    }

    /// 書籍を作成する
    ///
    /// 1. 5 フィールドを検証して Book を組み立てる
    /// 2. 同じ外部 ID の書籍がないことを確認
    /// 3. 挿入（事前確認をすり抜けた重複は一意インデックスで検出される）
    pub async fn create_book(&self, draft: BookDraft) -> Result<Book, BookError> {
        let book = Book::try_from(draft)?;

        if self.book_repository.find_by_id(book.id()).await?.is_some() {
            return Err(BookError::AlreadyExists(book.id().to_string()));
        }

        self.book_repository
            .insert(&book)
            .await
            .map_err(|e| match e.as_conflict() {
                Some((_, id)) => BookError::AlreadyExists(id.to_string()),
                None => BookError::Persistence(e),
            })?;

        tracing::info!(id = %book.id(), "書籍を作成しました");
        Ok(book)
    }

    /// 書籍をドキュメントごと置き換える
    ///
    /// ボディは作成時と同じく 5 フィールドすべてが必須。
    /// 外部 ID の変更は許可しない（ボディの `id` はパスの `id` と一致すること）。
    pub async fn update_book(&self, id: &str, draft: BookDraft) -> Result<Book, BookError> {
        let book_id = BookId::new(id)?;
        let book = Book::try_from(draft)?;

        if book.id() != &book_id {
            return Err(BookError::IdMismatch {
                path: book_id.into_string(),
                body: book.id().to_string(),
            });
        }

        let updated = self
            .book_repository
            .replace(&book_id, &book)
            .await?
            .ok_or_else(|| not_found(&book_id))?;

        tracing::info!(id = %book_id, "書籍を更新しました");
        Ok(updated)
    }

    /// 書籍を削除する
    ///
    /// 一致する書籍がなくても成功として扱う（冪等）。
    pub async fn delete_book(&self, id: &str) -> Result<(), BookError> {
        let book_id = BookId::new(id)?;
        let deleted = self.book_repository.delete(&book_id).await?;

        if deleted {
            tracing::info!(id = %book_id, "書籍を削除しました");
        } else {
            tracing::debug!(id = %book_id, "削除対象の書籍がありませんでした");
        }
        Ok(())
    }
}

fn not_found(id: &BookId) -> BookError {
    BookError::Domain(DomainError::NotFound {
        entity_type: ENTITY_TYPE,
        id:          id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use bookshelf_infra::{
        db::MongoConnection,
        mock::InMemoryBookRepository,
        repository::MongoBookRepository,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn draft(id: &str, title: &str) -> BookDraft {
        BookDraft {
            id:             Some(id.to_string()),
            title:          Some(title.to_string()),
            author:         Some("Charles Dickens".to_string()),
            published_date: Some("1837".to_string()),
            summary:        Some("It follows the story of an orphan boy".to_string()),
        }
    }

    fn sut_with(repository: InMemoryBookRepository) -> BookUseCaseImpl {
        BookUseCaseImpl::new(Arc::new(repository))
    }

    #[tokio::test]
    async fn test_作成した書籍を外部idで取得できる() {
        let sut = sut_with(InMemoryBookRepository::new());

        let created = sut.create_book(draft("1", "Oliver Twist")).await.unwrap();
        let fetched = sut.get_book("1").await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_存在しない書籍の取得はnot_found() {
        let sut = sut_with(InMemoryBookRepository::new());

        let err = sut.get_book("404").await.unwrap_err();

        assert!(matches!(
            err,
            BookError::Domain(DomainError::NotFound { entity_type: "Book", .. })
        ));
    }

    #[tokio::test]
    async fn test_必須フィールドが欠けた作成はバリデーションエラー() {
        let repository = InMemoryBookRepository::new();
        let sut = sut_with(repository.clone());
        let input = BookDraft {
            summary: None,
            ..draft("1", "Oliver Twist")
        };

        let err = sut.create_book(input).await.unwrap_err();

        assert_eq!(err.to_string(), "Book validation failed: summary is required");
        assert!(repository.is_empty());
    }

    #[tokio::test]
    async fn test_同じ外部idの作成はalready_exists() {
        let sut = sut_with(InMemoryBookRepository::new());
        sut.create_book(draft("1", "Oliver Twist")).await.unwrap();

        let err = sut.create_book(draft("1", "Great Expectations")).await.unwrap_err();

        assert_eq!(err.to_string(), "Book with id '1' already exists");
    }

    #[tokio::test]
    async fn test_更新は全体を置き換えて更新後の書籍を返す() {
        let sut = sut_with(InMemoryBookRepository::new());
        sut.create_book(draft("1", "Oliver Twist")).await.unwrap();

        let updated = sut.update_book("1", draft("1", "Oliver Twist (Revised)")).await.unwrap();

        assert_eq!(updated.title(), "Oliver Twist (Revised)");
        assert_eq!(sut.get_book("1").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_存在しない書籍の更新はnot_found() {
        let sut = sut_with(InMemoryBookRepository::new());

        let err = sut.update_book("9", draft("9", "Emma")).await.unwrap_err();

        assert!(matches!(err, BookError::Domain(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_ボディのidがパスと異なる更新はid_mismatch() {
        let sut = sut_with(InMemoryBookRepository::new());
        sut.create_book(draft("1", "Oliver Twist")).await.unwrap();

        let err = sut.update_book("1", draft("2", "Oliver Twist")).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Book id in body ('2') does not match path id ('1')"
        );
    }

    #[tokio::test]
    async fn test_削除は存在しない書籍でも成功する() {
        let repository = InMemoryBookRepository::new();
        let sut = sut_with(repository.clone());
        sut.create_book(draft("1", "Oliver Twist")).await.unwrap();

        sut.delete_book("1").await.unwrap();
        sut.delete_book("1").await.unwrap();

        assert!(repository.is_empty());
    }

    #[tokio::test]
    async fn test_データベース未接続ならpersistenceエラー() {
        let repository =
            MongoBookRepository::new(MongoConnection::unavailable(), "books_collections");
        let sut = BookUseCaseImpl::new(Arc::new(repository));

        assert!(matches!(sut.list_books().await.unwrap_err(), BookError::Persistence(_)));
        assert!(matches!(
            sut.create_book(draft("1", "Oliver Twist")).await.unwrap_err(),
            BookError::Persistence(_)
        ));
        assert!(matches!(sut.delete_book("1").await.unwrap_err(), BookError::Persistence(_)));
    }
}

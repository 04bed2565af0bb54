//! # テスト用インメモリリポジトリ
//!
//! ハンドラ・ユースケースのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! bookshelf-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bookshelf_domain::book::{Book, BookId, ENTITY_TYPE};

use crate::{error::InfraError, repository::BookRepository};

/// インメモリの BookRepository
///
/// 挿入順を保持する。`Clone` したインスタンスは同じストアを共有する。
#[derive(Clone, Default)]
pub struct InMemoryBookRepository {
    books: Arc<Mutex<Vec<Book>>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期データ付きで作成する
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(Mutex::new(books)),
        }
    }

    /// 現在の件数
    pub fn len(&self) -> usize {
        self.books.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, InfraError> {
        Ok(self.books.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, InfraError> {
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id() == id)
            .cloned())
    }

    async fn insert(&self, book: &Book) -> Result<(), InfraError> {
        let mut books = self.books.lock().unwrap();
        if books.iter().any(|b| b.id() == book.id()) {
            return Err(InfraError::conflict(ENTITY_TYPE, book.id().as_str()));
        }
        books.push(book.clone());
        Ok(())
    }

    async fn replace(&self, id: &BookId, book: &Book) -> Result<Option<Book>, InfraError> {
        let mut books = self.books.lock().unwrap();
        let Some(slot) = books.iter_mut().find(|b| b.id() == id) else {
            return Ok(None);
        };
        *slot = book.clone();
        Ok(Some(book.clone()))
    }

    async fn delete(&self, id: &BookId) -> Result<bool, InfraError> {
        let mut books = self.books.lock().unwrap();
        let before = books.len();
        books.retain(|b| b.id() != id);
        Ok(books.len() < before)
    }
}

//! MongoBookRepository 統合テスト
//!
//! 実際の MongoDB を使用するため、デフォルトでは実行しない。
//! テストごとに一意なコレクションを作成し、終了時に削除する。
//!
//! 実行方法:
//! ```bash
//! docker run -d -p 27017:27017 mongo:7
//! MONGODB_URI=mongodb://127.0.0.1:27017 cargo test -p bookshelf-infra --test book_repository_test -- --ignored
//! ```

use bookshelf_domain::book::{Book, BookId};
use bookshelf_infra::{
    db::{self, MongoConnection},
    repository::{BookRepository, MongoBookRepository},
};
use mongodb::bson::Document;
use pretty_assertions::assert_eq;

const TEST_DATABASE: &str = "bookshelf_test";

/// テスト用の接続と、テスト専用コレクションを使うリポジトリを作成する
async fn setup() -> (MongoConnection, MongoBookRepository, String) {
    dotenvy::dotenv().ok();
    let uri =
        std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_string());

    let connection = db::connect(&uri, TEST_DATABASE).await;
    assert!(connection.is_ready(), "MongoDB に接続できること: {uri}");

    let collection_name = format!("books_{}", uuid::Uuid::now_v7().simple());
    let repository = MongoBookRepository::new(connection.clone(), collection_name.clone());
    repository.ensure_indexes().await.unwrap();

    (connection, repository, collection_name)
}

async fn teardown(connection: &MongoConnection, collection_name: &str) {
    connection
        .database()
        .unwrap()
        .collection::<Document>(collection_name)
        .drop()
        .await
        .unwrap();
}

fn oliver_twist() -> Book {
    Book::new(
        "1",
        "Oliver Twist",
        "Charles Dickens",
        "1837",
        "It follows the story of an orphan boy named Oliver Twist",
    )
    .unwrap()
}

#[tokio::test]
#[ignore = "MongoDB が必要"]
async fn test_挿入した書籍を外部idで取得できる() {
    let (connection, sut, collection) = setup().await;
    let book = oliver_twist();

    sut.insert(&book).await.unwrap();
    let found = sut.find_by_id(book.id()).await.unwrap();

    assert_eq!(found, Some(book));
    teardown(&connection, &collection).await;
}

#[tokio::test]
#[ignore = "MongoDB が必要"]
async fn test_外部idの重複挿入はconflictになる() {
    let (connection, sut, collection) = setup().await;
    sut.insert(&oliver_twist()).await.unwrap();

    let err = sut.insert(&oliver_twist()).await.unwrap_err();

    assert_eq!(err.as_conflict(), Some(("Book", "1")));
    assert_eq!(sut.find_all().await.unwrap().len(), 1);
    teardown(&connection, &collection).await;
}

#[tokio::test]
#[ignore = "MongoDB が必要"]
async fn test_置換は全フィールドを書き換えて置換後を返す() {
    let (connection, sut, collection) = setup().await;
    sut.insert(&oliver_twist()).await.unwrap();
    let replacement = Book::new(
        "1",
        "Oliver Twist (Revised)",
        "Charles Dickens",
        "1838",
        "Revised edition",
    )
    .unwrap();

    let replaced = sut
        .replace(&BookId::new("1").unwrap(), &replacement)
        .await
        .unwrap();

    assert_eq!(replaced, Some(replacement.clone()));
    assert_eq!(
        sut.find_by_id(replacement.id()).await.unwrap(),
        Some(replacement)
    );
    teardown(&connection, &collection).await;
}

#[tokio::test]
#[ignore = "MongoDB が必要"]
async fn test_削除後は取得できず件数が減る() {
    let (connection, sut, collection) = setup().await;
    sut.insert(&oliver_twist()).await.unwrap();
    let id = BookId::new("1").unwrap();

    assert!(sut.delete(&id).await.unwrap());
    assert!(!sut.delete(&id).await.unwrap());
    assert_eq!(sut.find_by_id(&id).await.unwrap(), None);
    assert!(sut.find_all().await.unwrap().is_empty());
    teardown(&connection, &collection).await;
}

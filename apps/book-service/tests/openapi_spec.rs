//! # OpenAPI 仕様テスト
//!
//! utoipa から生成される OpenAPI 仕様がルーターと整合しているかを検証する。

use bookshelf_book_service::openapi::ApiDoc;
use utoipa::OpenApi;

#[test]
fn test_openapi仕様がパニックせず生成される() {
    let doc = ApiDoc::openapi();
    // パニックしなければ成功
    let _yaml = doc.to_yaml().unwrap();
}

#[test]
fn test_infoとserverが設定されている() {
    let doc = ApiDoc::openapi();

    assert_eq!(doc.info.title, "Book API");
    assert_eq!(doc.info.version, "1.0");
    assert_eq!(
        doc.info.description.as_deref(),
        Some("CRUD API for managing books")
    );
    let servers = doc.servers.as_ref().expect("servers が存在すること");
    assert_eq!(servers[0].url, "http://localhost:4000/");
}

#[test]
fn test_全パスが含まれている() {
    let doc = ApiDoc::openapi();
    let paths: Vec<&str> = doc.paths.paths.keys().map(|k| k.as_str()).collect();

    // 4 パス（7 ハンドラ、同一パスに複数メソッドがあるため 4 パス）
    assert_eq!(paths.len(), 4, "パス数が 4 であること: {paths:?}");

    assert!(paths.contains(&"/health"));
    assert!(paths.contains(&"/health/ready"));
    assert!(paths.contains(&"/api/books"));
    assert!(paths.contains(&"/api/books/{id}"));
}

#[test]
fn test_書籍パスに全メソッドが定義されている() {
    let doc = ApiDoc::openapi();

    let collection = doc.paths.paths.get("/api/books").expect("/api/books");
    assert!(collection.get.is_some());
    assert!(collection.post.is_some());

    let item = doc.paths.paths.get("/api/books/{id}").expect("/api/books/{id}");
    assert!(item.get.is_some());
    assert!(item.put.is_some());
    assert!(item.delete.is_some());
}

#[test]
fn test_エラーレスポンスのスキーマが登録されている() {
    let doc = ApiDoc::openapi();
    let components = doc.components.as_ref().expect("components が存在すること");

    assert!(components.schemas.contains_key("ErrorResponse"));
    assert!(components.schemas.contains_key("MessageResponse"));
    assert!(components.schemas.contains_key("BookData"));
    assert!(components.schemas.contains_key("BookRequest"));
}

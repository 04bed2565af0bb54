//! # Book Service ライブラリ
//!
//! 書籍の CRUD API を提供するサーバーのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: State の初期化とルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: HTTP 境界のエラーとレスポンス変換
//! - `handler`: HTTP ハンドラ
//! - `openapi`: OpenAPI 仕様定義
//! - `usecase`: ビジネスロジック

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod openapi;
pub mod usecase;

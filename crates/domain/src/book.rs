//! # 書籍
//!
//! Book API が扱う唯一のエンティティ。
//!
//! ## 2 つの識別子
//!
//! - **外部 ID**（[`BookId`]）: クライアントが指定する `id` フィールド。
//!   取得・更新・削除はすべてこの値で照合する
//! - **内部 ID**: ドキュメントストアが採番する `_id`。ドメイン層では扱わない
//!
//! ## 書き込み時の検証
//!
//! 5 フィールド（`id`, `title`, `author`, `published_date`, `summary`）は
//! すべて必須の文字列。[`BookDraft`] から [`Book`] への変換時に検証し、
//! 欠落しているフィールドをまとめて 1 つのエラーメッセージで報告する。
//! `published_date` は日付として解釈しない（自由形式の文字列）。

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// エンティティ種別名（エラーメッセージ用）
pub const ENTITY_TYPE: &str = "Book";

// =========================================================================
// BookId（外部 ID）
// =========================================================================

/// 書籍の外部 ID（値オブジェクト）
///
/// # 不変条件
///
/// - 空文字列ではない
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{_0}")]
#[serde(try_from = "String", into = "String")]
pub struct BookId(String);

impl BookId {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation(
                "Book validation failed: id is required".to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for BookId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BookId> for String {
    fn from(id: BookId) -> Self {
        id.0
    }
}

// =========================================================================
// BookDraft（検証前の入力）
// =========================================================================

/// 検証前の書籍データ
///
/// リクエストボディをそのまま写し取った形。欠落・`null` のフィールドは `None`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub id:             Option<String>,
    pub title:          Option<String>,
    pub author:         Option<String>,
    pub published_date: Option<String>,
    pub summary:        Option<String>,
}

// =========================================================================
// Book（書籍エンティティ）
// =========================================================================

/// 書籍エンティティ
///
/// # 不変条件
///
/// - 5 フィールドすべてが空でない文字列
///
/// 生成は [`Book::new`] / `Book::try_from(BookDraft)`（検証あり）か、
/// 永続化層からの復元用の [`Book::from_db`] のみ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id:             BookId,
    title:          String,
    author:         String,
    published_date: String,
    summary:        String,
}

impl Book {
    /// 検証付きで書籍を作成する
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        published_date: impl Into<String>,
        summary: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::try_from(BookDraft {
            id:             Some(id.into()),
            title:          Some(title.into()),
            author:         Some(author.into()),
            published_date: Some(published_date.into()),
            summary:        Some(summary.into()),
        })
    }

    /// 永続化層から復元する（検証なし）
    ///
    /// ストアには検証済みの書籍しか書き込まれないため、再検証しない。
    pub fn from_db(
        id: BookId,
        title: String,
        author: String,
        published_date: String,
        summary: String,
    ) -> Self {
        Self {
            id,
            title,
            author,
            published_date,
            summary,
        }
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    /// 主キー（外部 ID の別名）
    ///
    /// 別途保存される値ではなく、常に [`Book::id`] と同じ値を返す。
    pub fn primary_key(&self) -> &BookId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn published_date(&self) -> &str {
        &self.published_date
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }
}

impl TryFrom<BookDraft> for Book {
    type Error = DomainError;

    fn try_from(draft: BookDraft) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();
        let mut require = |name: &'static str, value: Option<String>| match value {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                missing.push(format!("{name} is required"));
                None
            }
        };

        let id = require("id", draft.id);
        let title = require("title", draft.title);
        let author = require("author", draft.author);
        let published_date = require("published_date", draft.published_date);
        let summary = require("summary", draft.summary);

        match (id, title, author, published_date, summary) {
            (Some(id), Some(title), Some(author), Some(published_date), Some(summary)) => {
                Ok(Self {
                    id: BookId(id),
                    title,
                    author,
                    published_date,
                    summary,
                })
            }
            _ => Err(DomainError::Validation(format!(
                "Book validation failed: {}",
                missing.join(", ")
            ))),
        }
    }
}

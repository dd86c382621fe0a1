use chrono::{DateTime, NaiveDate, Utc};

use super::{Author, AuthorId, BookId, Isbn, ValidationError, errors::require_text};

/// Book集約 - 1冊の書籍
///
/// 著者は所有せず、IDによる参照のみを持つ（多対一）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    // 識別子
    pub id: BookId,

    // 書誌情報
    pub title: String,
    pub isbn: Isbn,
    pub published_date: Option<NaiveDate>,
    pub genre: Option<String>,

    // 他の集約への参照（IDのみ）
    pub author_id: AuthorId,

    // 監査情報
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// 純粋関数：新しい書籍を生成する
    pub fn create(new_book: NewBook, now: DateTime<Utc>) -> Self {
        Self {
            id: BookId::new(),
            title: new_book.title,
            isbn: new_book.isbn,
            published_date: new_book.published_date,
            genre: new_book.genre,
            author_id: new_book.author_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// 部分更新を適用する
    pub fn apply(&mut self, patch: BookPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(isbn) = patch.isbn {
            self.isbn = isbn;
        }
        if let Some(published_date) = patch.published_date {
            self.published_date = published_date;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
        if let Some(author_id) = patch.author_id {
            self.author_id = author_id;
        }
        self.updated_at = now;
    }
}

/// 書籍と、参照先著者の現在の状態
///
/// 読み取り時に結合して得る非正規化ビュー。著者のコピーは保存しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetails {
    pub book: Book,
    pub author: Option<Author>,
}

/// コマンド：書籍を登録する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub isbn: Isbn,
    pub published_date: Option<NaiveDate>,
    pub genre: Option<String>,
    pub author_id: AuthorId,
}

impl NewBook {
    pub fn new(
        title: String,
        isbn: Isbn,
        published_date: Option<NaiveDate>,
        genre: Option<String>,
        author_id: AuthorId,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: require_text("title", title)?,
            isbn,
            published_date,
            genre,
            author_id,
        })
    }
}

/// コマンド：書籍を部分更新する
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub isbn: Option<Isbn>,
    pub published_date: Option<Option<NaiveDate>>,
    pub genre: Option<Option<String>>,
    pub author_id: Option<AuthorId>,
}

/// 書籍一覧の検索条件
///
/// `search`（タイトルまたはISBNの部分一致）と`author_id`は独立した条件で、
/// 両方指定された場合はAND結合となる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub search: Option<String>,
    pub author_id: Option<AuthorId>,
}

impl BookFilter {
    pub fn new(search: Option<String>, author_id: Option<AuthorId>) -> Self {
        Self {
            search: search.filter(|s| !s.is_empty()),
            author_id,
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        let search_matches = match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                book.title.to_lowercase().contains(&term)
                    || book.isbn.as_str().to_lowercase().contains(&term)
            }
        };
        let author_matches = self.author_id.is_none_or(|id| book.author_id == id);

        search_matches && author_matches
    }
}

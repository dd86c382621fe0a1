use chrono::{DateTime, NaiveDate, Utc};

use super::{AuthorId, ValidationError, errors::require_text};

/// Author集約 - 書籍の著者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    // 識別子
    pub id: AuthorId,

    // 著者情報
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub birth_date: Option<NaiveDate>,

    // 監査情報
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Author {
    /// 純粋関数：新しい著者を生成する
    ///
    /// IDと監査情報を割り当てる。副作用なし。
    pub fn create(new_author: NewAuthor, now: DateTime<Utc>) -> Self {
        Self {
            id: AuthorId::new(),
            first_name: new_author.first_name,
            last_name: new_author.last_name,
            bio: new_author.bio,
            birth_date: new_author.birth_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// 部分更新を適用する
    ///
    /// 指定された項目のみ上書きし、それ以外は保持する。
    pub fn apply(&mut self, patch: AuthorPatch, now: DateTime<Utc>) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(birth_date) = patch.birth_date {
            self.birth_date = birth_date;
        }
        self.updated_at = now;
    }
}

/// コマンド：著者を登録する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl NewAuthor {
    /// 必須項目（first_name, last_name）が空でないことを検証して生成する
    pub fn new(
        first_name: String,
        last_name: String,
        bio: Option<String>,
        birth_date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: require_text("firstName", first_name)?,
            last_name: require_text("lastName", last_name)?,
            bio,
            birth_date,
        })
    }
}

/// コマンド：著者を部分更新する
///
/// `None`は「変更しない」。nullableな項目は`Some(None)`で値を消去する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<Option<String>>,
    pub birth_date: Option<Option<NaiveDate>>,
}

impl AuthorPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.bio.is_none()
            && self.birth_date.is_none()
    }
}

/// 著者一覧の検索条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorFilter {
    /// 名または姓に対する部分一致（大文字小文字を区別しない）
    pub search: Option<String>,
}

impl AuthorFilter {
    pub fn new(search: Option<String>) -> Self {
        // 空文字の検索語は条件なしとして扱う
        Self {
            search: search.filter(|s| !s.is_empty()),
        }
    }

    /// 著者が条件に一致するか
    pub fn matches(&self, author: &Author) -> bool {
        match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                author.first_name.to_lowercase().contains(&term)
                    || author.last_name.to_lowercase().contains(&term)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_author() -> Author {
        let new_author = NewAuthor::new(
            "John".to_string(),
            "Doe".to_string(),
            Some("Sci-fi author".to_string()),
            NaiveDate::from_ymd_opt(1980, 1, 15),
        )
        .unwrap();
        Author::create(new_author, Utc::now())
    }

    #[test]
    fn test_new_author_requires_names() {
        let result = NewAuthor::new(String::new(), "Doe".to_string(), None, None);
        assert_eq!(result.unwrap_err(), ValidationError::EmptyField("firstName"));

        let result = NewAuthor::new("John".to_string(), " ".to_string(), None, None);
        assert_eq!(result.unwrap_err(), ValidationError::EmptyField("lastName"));
    }

    #[test]
    fn test_apply_keeps_unspecified_fields() {
        let mut author = sample_author();
        let before = author.clone();

        author.apply(
            AuthorPatch {
                first_name: Some("Jane".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );

        assert_eq!(author.first_name, "Jane");
        assert_eq!(author.last_name, before.last_name);
        assert_eq!(author.bio, before.bio);
        assert_eq!(author.birth_date, before.birth_date);
        assert_eq!(author.id, before.id);
    }

    #[test]
    fn test_apply_clears_nullable_fields() {
        let mut author = sample_author();

        author.apply(
            AuthorPatch {
                bio: Some(None),
                birth_date: Some(None),
                ..Default::default()
            },
            Utc::now(),
        );

        assert_eq!(author.bio, None);
        assert_eq!(author.birth_date, None);
    }

    #[test]
    fn test_filter_matches_first_or_last_name_case_insensitive() {
        let author = sample_author();

        assert!(AuthorFilter::new(None).matches(&author));
        assert!(AuthorFilter::new(Some("jo".to_string())).matches(&author));
        assert!(AuthorFilter::new(Some("DOE".to_string())).matches(&author));
        assert!(!AuthorFilter::new(Some("smith".to_string())).matches(&author));
    }

    #[test]
    fn test_filter_empty_search_is_no_filter() {
        assert_eq!(AuthorFilter::new(Some(String::new())).search, None);
    }
}

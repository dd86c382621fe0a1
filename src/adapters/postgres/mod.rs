pub mod author_repository;
pub mod book_repository;

// パブリックに型を再エクスポート
pub use author_repository::AuthorRepository as PostgresAuthorRepository;
pub use book_repository::BookRepository as PostgresBookRepository;

/// LIKE/ILIKE用の部分一致パターンを作る
///
/// 検索語中の`%`・`_`・`\`はワイルドカードとして扱わずエスケープする。
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// offset/limitをPostgreSQLのBIGINTに変換する
pub(crate) fn to_bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

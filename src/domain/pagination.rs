/// ページ番号の既定値（1始まり）
pub const DEFAULT_PAGE: u32 = 1;

/// 1ページあたりの件数の既定値
pub const DEFAULT_LIMIT: u32 = 10;

/// ページ指定（クライアントからの入力）
///
/// 未指定の項目は`paginate`で既定値に置き換えられる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageRequest {
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self { page, limit }
    }
}

/// ストレージに渡す取得範囲（offset/limit）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

/// 純粋関数：ページ指定を取得範囲に変換する
///
/// - page未指定または0はページ1として扱う
/// - limit未指定または0は既定値（10件）として扱う
/// - offset = (page - 1) * limit
pub fn paginate(request: PageRequest) -> Pagination {
    let page = request.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
    let limit = request.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT);

    Pagination {
        offset: u64::from(page - 1) * u64::from(limit),
        limit: u64::from(limit),
    }
}

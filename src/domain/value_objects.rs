use std::fmt;
use uuid::Uuid;

use super::ValidationError;

/// 著者ID - 著者集約の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthorId(Uuid);

impl AuthorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for AuthorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 書籍ID - 書籍集約の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// ISBN
///
/// 不変条件：ISBN-10またはISBN-13としてチェックディジットが正しいこと。
/// ハイフンと空白は区切り文字として許容し、値は入力された表記のまま保持する。
/// 一意性の判定もこの表記で行う。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Isbn(String);

impl Isbn {
    /// 文字列をISBNとして検証する
    ///
    /// # エラー
    /// 桁数・文字種・チェックディジットのいずれかが不正な場合は
    /// `ValidationError::InvalidIsbn`を返す
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into().trim().to_string();
        let compact: Vec<char> = value
            .chars()
            .filter(|c| *c != '-' && *c != ' ')
            .collect();

        let valid = match compact.len() {
            10 => is_valid_isbn10(&compact),
            13 => is_valid_isbn13(&compact),
            _ => false,
        };

        if !valid {
            return Err(ValidationError::InvalidIsbn(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ISBN-10：重み10..1の加重和が11で割り切れること（末尾のみXで10を表す）
fn is_valid_isbn10(digits: &[char]) -> bool {
    let mut sum = 0;
    for (i, c) in digits.iter().enumerate() {
        let value = match *c {
            'X' | 'x' if i == 9 => 10,
            c => match c.to_digit(10) {
                Some(d) => d,
                None => return false,
            },
        };
        sum += value * (10 - i as u32);
    }
    sum % 11 == 0
}

/// ISBN-13：重み1,3を交互に掛けた和が10で割り切れること
fn is_valid_isbn13(digits: &[char]) -> bool {
    let mut sum = 0;
    for (i, c) in digits.iter().enumerate() {
        let Some(d) = c.to_digit(10) else {
            return false;
        };
        sum += if i % 2 == 0 { d } else { d * 3 };
    }
    sum % 10 == 0
}

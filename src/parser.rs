//! 구분자 텍스트 파싱 모듈
//!
//! CSV/TSV 텍스트를 헤더 이름으로 키가 지정된 레코드 목록으로 변환합니다.
//! 따옴표나 이스케이프는 지원하지 않습니다. 필드 안의 구분자는 그대로 필드를 나눕니다.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{FlashGenError, Result};

/// 필드 구분자
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter(char);

impl Delimiter {
    /// 쉼표 (CSV)
    pub const COMMA: Delimiter = Delimiter(',');
    /// 탭 (TSV)
    pub const TAB: Delimiter = Delimiter('\t');

    pub fn new(c: char) -> Self {
        Self(c)
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::COMMA
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            '\t' => write!(f, "tab"),
            c => write!(f, "{:?}", c),
        }
    }
}

impl FromStr for Delimiter {
    type Err = FlashGenError;

    /// `"tab"`, `"\t"` 또는 임의의 한 글자를 구분자로 해석
    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("tab") || s == "\\t" {
            return Ok(Self::TAB);
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != '\n' => Ok(Self(c)),
            _ => Err(FlashGenError::InvalidDelimiter {
                value: s.to_string(),
            }),
        }
    }
}

/// 파싱된 데이터 한 행 (헤더 이름 -> 필드 값, 헤더 순서 유지)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// 필드 값 설정. 같은 헤더가 이미 있으면 값만 덮어쓰고 위치는 유지합니다.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.0.insert(header.into(), Value::String(value.into()));
    }

    /// 필드 값 조회
    pub fn get(&self, header: &str) -> Option<&str> {
        self.0.get(header).and_then(Value::as_str)
    }

    /// 헤더 이름 목록 (삽입 순서)
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// 구분자 텍스트를 레코드 목록으로 파싱
///
/// # Arguments
/// * `content` - 파일 전체 내용
/// * `delimiter` - 필드 구분자
///
/// # Returns
/// 데이터 행마다 하나의 `Record`. 헤더만 있거나 비어 있으면 빈 목록입니다.
///
/// # Examples
/// ```
/// use flashgen::parser::{parse, Delimiter};
///
/// let records = parse("a,b\n1,2\n3,4", Delimiter::COMMA);
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].get("b"), Some("4"));
/// ```
pub fn parse(content: &str, delimiter: Delimiter) -> Vec<Record> {
    let mut lines = trim(content).split('\n');

    let headers: Vec<&str> = match lines.next() {
        Some(line) if !trim(line).is_empty() => split_fields(line, delimiter).collect(),
        _ => return Vec::new(),
    };

    lines
        .filter(|line| !trim(line).is_empty())
        .map(|line| {
            let mut values = split_fields(line, delimiter);
            headers
                .iter()
                .map(|header| (*header, values.next().unwrap_or("")))
                .collect::<Record>()
        })
        .collect()
}

/// 한 줄을 구분자로 나누고 각 필드의 공백 제거
fn split_fields(line: &str, delimiter: Delimiter) -> impl Iterator<Item = &str> {
    line.split(delimiter.as_char()).map(trim)
}

/// 앞뒤 공백 제거. BOM(U+FEFF)은 공백으로 취급하고 NEL(U+0085)은 값으로 남깁니다.
fn trim(s: &str) -> &str {
    s.trim_matches(is_blank)
}

fn is_blank(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

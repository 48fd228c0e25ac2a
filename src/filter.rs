//! 레코드 필터 모듈
//!
//! 파싱된 레코드 중 플래시카드가 아닌 행(섹션 제목 등)을 걸러냅니다.

use std::fmt;
use std::sync::Arc;

use crate::parser::Record;

/// 레코드 제외 규칙
#[derive(Clone, Default)]
pub enum RowFilter {
    /// 모든 레코드 유지
    #[default]
    KeepAll,
    /// 지정한 필드가 존재하고 비어 있지 않으면 제외
    ExcludeNonEmpty(String),
    /// 사용자 정의 조건 (true를 반환하면 유지)
    Custom(Arc<dyn Fn(&Record) -> bool + Send + Sync>),
}

impl RowFilter {
    /// 사용자 정의 조건으로 필터 생성
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        RowFilter::Custom(Arc::new(predicate))
    }

    /// 레코드를 유지할지 판단
    pub fn keeps(&self, record: &Record) -> bool {
        match self {
            RowFilter::KeepAll => true,
            RowFilter::ExcludeNonEmpty(field) => record.get(field).map_or(true, str::is_empty),
            RowFilter::Custom(predicate) => predicate(record),
        }
    }

    /// 필터가 아무것도 제외하지 않는지 확인
    pub fn is_identity(&self) -> bool {
        matches!(self, RowFilter::KeepAll)
    }
}

impl fmt::Debug for RowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowFilter::KeepAll => write!(f, "KeepAll"),
            RowFilter::ExcludeNonEmpty(field) => {
                f.debug_tuple("ExcludeNonEmpty").field(field).finish()
            }
            RowFilter::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl fmt::Display for RowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowFilter::KeepAll => write!(f, "없음"),
            RowFilter::ExcludeNonEmpty(field) => write!(f, "'{}' 값이 있는 행 제외", field),
            RowFilter::Custom(_) => write!(f, "사용자 정의"),
        }
    }
}

/// 필터를 적용하여 유지되는 레코드만 반환
pub fn filter_records(records: Vec<Record>, filter: &RowFilter) -> Vec<Record> {
    if filter.is_identity() {
        return records;
    }
    records.into_iter().filter(|r| filter.keeps(r)).collect()
}

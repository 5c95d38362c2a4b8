//! GTID 연산 관련 에러 타입

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GtidError {
    #[error("유효하지 않은 범위: {start}-{end}")]
    InvalidRange { start: u64, end: u64 },

    #[error("범위 인덱스 초과: {0} (0 또는 1만 허용)")]
    IndexOutOfBounds(usize),

    #[error("지원하지 않는 피연산자 타입: {0}")]
    UnsupportedType(String),

    #[error("GTID 파싱 에러: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, GtidError>;

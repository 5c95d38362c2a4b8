//! 연산 입력 타입
//!
//! `contains`에 넘길 피연산자와 `RangeList` 생성 입력을 하나의 열거형으로 받아
//! 생성/호출 시점에 한 번만 형태를 검사합니다.

use crate::error::Result;
use crate::gtid::GtidSet;
use crate::range::GtidRange;
use crate::range_list::RangeList;

/// 포함 관계 검사의 피연산자
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    /// `(start, end)` 쌍
    Pair(u64, u64),
    Range(&'a GtidRange),
    RangeList(&'a RangeList),
    Set(&'a GtidSet),
}

impl Operand<'_> {
    /// 에러 메시지용 타입 이름
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Pair(..) => "pair",
            Operand::Range(_) => "GtidRange",
            Operand::RangeList(_) => "RangeList",
            Operand::Set(_) => "GtidSet",
        }
    }
}

impl From<(u64, u64)> for Operand<'_> {
    fn from((start, end): (u64, u64)) -> Self {
        Operand::Pair(start, end)
    }
}

impl<'a> From<&'a GtidRange> for Operand<'a> {
    fn from(range: &'a GtidRange) -> Self {
        Operand::Range(range)
    }
}

impl<'a> From<&'a RangeList> for Operand<'a> {
    fn from(list: &'a RangeList) -> Self {
        Operand::RangeList(list)
    }
}

impl<'a> From<&'a GtidSet> for Operand<'a> {
    fn from(set: &'a GtidSet) -> Self {
        Operand::Set(set)
    }
}

/// `RangeList` 생성 입력 (텍스트, 범위, 쌍)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec<'a> {
    /// `"1-5:7:9-12"` 형태의 콜론 구분 텍스트
    Text(&'a str),
    Range(GtidRange),
    Pair(u64, u64),
}

impl RangeSpec<'_> {
    pub(crate) fn into_ranges(self) -> Result<Vec<GtidRange>> {
        match self {
            RangeSpec::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(Vec::new());
                }
                text.split(':').map(str::parse::<GtidRange>).collect()
            }
            RangeSpec::Range(range) => Ok(vec![range]),
            RangeSpec::Pair(start, end) => Ok(vec![GtidRange::new(start, end)?]),
        }
    }
}

impl<'a> From<&'a str> for RangeSpec<'a> {
    fn from(text: &'a str) -> Self {
        RangeSpec::Text(text)
    }
}

impl<'a> From<&'a String> for RangeSpec<'a> {
    fn from(text: &'a String) -> Self {
        RangeSpec::Text(text.as_str())
    }
}

impl From<GtidRange> for RangeSpec<'_> {
    fn from(range: GtidRange) -> Self {
        RangeSpec::Range(range)
    }
}

impl From<(u64, u64)> for RangeSpec<'_> {
    fn from((start, end): (u64, u64)) -> Self {
        RangeSpec::Pair(start, end)
    }
}

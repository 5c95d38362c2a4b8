//! GTID 시퀀스 범위
//!
//! 한 서버(UUID)에서 실행된 연속 트랜잭션 번호 구간 `[start, end]` (양 끝 포함).
//! 텍스트 형식: `"12"` (단일) 또는 `"198-2174"`

use crate::error::{GtidError, Result};
use crate::operand::Operand;
use crate::range_list::RangeList;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use std::sync::OnceLock;

fn range_pattern() -> Result<&'static Regex> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    if let Some(pattern) = PATTERN.get() {
        return Ok(pattern);
    }
    let pattern = Regex::new(r"^(\d+)(?:-(\d+))?$")
        .map_err(|e| GtidError::ParseError(format!("Invalid range pattern: {}", e)))?;
    Ok(PATTERN.get_or_init(|| pattern))
}

/// GTID 범위 (sequence 범위)
///
/// `start <= end`, `start >= 1` 이 항상 성립합니다. 정렬 순서는 `(start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeRecord")]
pub struct GtidRange {
    start: u64,
    end: u64,
}

#[derive(Deserialize)]
struct RangeRecord {
    start: u64,
    end: u64,
}

impl TryFrom<RangeRecord> for GtidRange {
    type Error = GtidError;

    fn try_from(record: RangeRecord) -> Result<Self> {
        GtidRange::new(record.start, record.end)
    }
}

impl GtidRange {
    pub fn new(start: u64, end: u64) -> Result<Self> {
        // MySQL 트랜잭션 번호는 1부터 시작
        if start == 0 || start > end {
            return Err(GtidError::InvalidRange { start, end });
        }
        Ok(GtidRange { start, end })
    }

    /// 단일 트랜잭션 범위 (`start == end`)
    pub fn single(sequence: u64) -> Result<Self> {
        GtidRange::new(sequence, sequence)
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// 범위에 포함된 트랜잭션 수
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// 0 → start, 1 → end
    pub fn get(&self, index: usize) -> Result<u64> {
        match index {
            0 => Ok(self.start),
            1 => Ok(self.end),
            _ => Err(GtidError::IndexOutOfBounds(index)),
        }
    }

    /// 다른 범위 (또는 `(start, end)` 쌍)가 이 범위 안에 완전히 들어가는지 검사
    ///
    /// 쌍은 `GtidRange::new`와 같은 검증을 거칩니다.
    pub fn contains<'a>(&self, operand: impl Into<Operand<'a>>) -> Result<bool> {
        let other = GtidRange::from_operand(operand.into(), "포함할")?;
        Ok(self.covers(&other))
    }

    fn from_operand(operand: Operand<'_>, action: &str) -> Result<GtidRange> {
        match operand {
            Operand::Range(range) => Ok(*range),
            Operand::Pair(start, end) => GtidRange::new(start, end),
            other => Err(GtidError::UnsupportedType(format!(
                "GtidRange는 {}을(를) {} 수 없음",
                other.kind(),
                action
            ))),
        }
    }

    pub(crate) fn covers(&self, other: &GtidRange) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    pub fn contains_sequence(&self, sequence: u64) -> bool {
        sequence >= self.start && sequence <= self.end
    }

    /// 최소 하나의 트랜잭션 번호를 공유하는지 (범위 또는 `(start, end)` 쌍)
    pub fn overlaps<'a>(&self, operand: impl Into<Operand<'a>>) -> Result<bool> {
        let other = GtidRange::from_operand(operand.into(), "비교할")?;
        Ok(self.intersects(&other))
    }

    fn intersects(&self, other: &GtidRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// 겹치지 않고 빈틈 없이 맞닿아 있는지 (순서 무관)
    pub fn is_consecutive(&self, other: &GtidRange) -> bool {
        self.end.checked_add(1) == Some(other.start) || other.end.checked_add(1) == Some(self.start)
    }

    /// 겹치거나 맞닿은 범위를 하나로 병합
    pub fn merge(&self, other: &GtidRange) -> Option<GtidRange> {
        if self.intersects(other) || self.is_consecutive(other) {
            Some(GtidRange {
                start: self.start.min(other.start),
                end: self.end.max(other.end),
            })
        } else {
            None
        }
    }

    /// 합집합: 병합 가능하면 범위 하나, 아니면 정렬된 두 범위
    pub fn union(&self, other: &GtidRange) -> RangeList {
        if let Some(merged) = self.merge(other) {
            return RangeList::from_normalized(vec![merged]);
        }
        let (lower, upper) = if self.start <= other.start {
            (*self, *other)
        } else {
            (*other, *self)
        };
        RangeList::from_normalized(vec![lower, upper])
    }

    /// 차집합: 결과는 0, 1 또는 2개의 범위
    pub fn difference(&self, other: &GtidRange) -> RangeList {
        if !self.intersects(other) {
            return RangeList::from_normalized(vec![*self]);
        }

        let mut remainder = Vec::with_capacity(2);
        if self.start < other.start {
            remainder.push(GtidRange {
                start: self.start,
                end: other.start - 1,
            });
        }
        if self.end > other.end {
            remainder.push(GtidRange {
                start: other.end + 1,
                end: self.end,
            });
        }
        RangeList::from_normalized(remainder)
    }
}

impl PartialEq<(u64, u64)> for GtidRange {
    fn eq(&self, other: &(u64, u64)) -> bool {
        self.start == other.0 && self.end == other.1
    }
}

impl TryFrom<(u64, u64)> for GtidRange {
    type Error = GtidError;

    fn try_from((start, end): (u64, u64)) -> Result<Self> {
        GtidRange::new(start, end)
    }
}

impl fmt::Display for GtidRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for GtidRange {
    type Err = GtidError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let caps = range_pattern()?
            .captures(token)
            .ok_or_else(|| GtidError::ParseError(format!("Invalid range: {:?}", s)))?;

        let start = parse_sequence(&caps[1])?;
        let end = match caps.get(2) {
            Some(end) => parse_sequence(end.as_str())?,
            None => start,
        };
        GtidRange::new(start, end)
    }
}

fn parse_sequence(token: &str) -> Result<u64> {
    token
        .parse::<u64>()
        .map_err(|_| GtidError::ParseError(format!("Invalid sequence: {}", token)))
}

impl Add for &GtidRange {
    type Output = RangeList;

    fn add(self, other: &GtidRange) -> RangeList {
        self.union(other)
    }
}

impl Sub for &GtidRange {
    type Output = RangeList;

    fn sub(self, other: &GtidRange) -> RangeList {
        self.difference(other)
    }
}

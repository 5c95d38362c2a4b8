//! 한 서버(UUID)의 GTID 범위 목록
//!
//! 텍스트 형식: `"1-139:141:145-197"`
//!
//! 항상 정규화된 상태를 유지합니다: `start` 기준 오름차순 정렬, 겹치거나 맞닿은
//! 범위는 하나로 병합되어 인접한 두 범위 사이에는 최소 한 개의 빈 번호가 있습니다.

use crate::error::{GtidError, Result};
use crate::operand::{Operand, RangeSpec};
use crate::range::GtidRange;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RangeList {
    ranges: Vec<GtidRange>,
}

impl RangeList {
    pub fn new() -> Self {
        RangeList { ranges: Vec::new() }
    }

    /// 텍스트, 범위, `(start, end)` 쌍을 섞어서 생성
    ///
    /// ```
    /// use mysql_gtid::{GtidRange, RangeList, RangeSpec};
    ///
    /// let list = RangeList::from_specs([
    ///     RangeSpec::Range(GtidRange::new(1, 5).unwrap()),
    ///     RangeSpec::Text("9-12"),
    ///     RangeSpec::Pair(6, 6),
    /// ])
    /// .unwrap();
    /// assert_eq!(list.to_string(), "1-6:9-12");
    /// ```
    pub fn from_specs<'a, I, S>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<RangeSpec<'a>>,
    {
        let mut ranges = Vec::new();
        for spec in specs {
            let spec: RangeSpec<'a> = spec.into();
            ranges.extend(spec.into_ranges()?);
        }
        Ok(RangeList::from_ranges(ranges))
    }

    /// 임의 순서의 범위들로 생성 (정렬 및 병합 수행)
    pub fn from_ranges(ranges: impl IntoIterator<Item = GtidRange>) -> Self {
        RangeList {
            ranges: normalize(ranges.into_iter().collect()),
        }
    }

    /// 이미 정규화된 범위 목록
    pub(crate) fn from_normalized(ranges: Vec<GtidRange>) -> Self {
        debug_assert!(is_normalized(&ranges));
        RangeList { ranges }
    }

    pub fn ranges(&self) -> &[GtidRange] {
        &self.ranges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GtidRange> {
        self.ranges.iter()
    }

    /// 범위 개수 (트랜잭션 수는 `count`)
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn first(&self) -> Option<&GtidRange> {
        self.ranges.first()
    }

    pub fn last(&self) -> Option<&GtidRange> {
        self.ranges.last()
    }

    /// 포함된 트랜잭션 번호의 총 개수
    pub fn count(&self) -> u64 {
        self.ranges.iter().map(GtidRange::len).sum()
    }

    pub fn union(&self, other: &RangeList) -> RangeList {
        let mut ranges = Vec::with_capacity(self.ranges.len() + other.ranges.len());
        ranges.extend_from_slice(&self.ranges);
        ranges.extend_from_slice(&other.ranges);
        RangeList::from_ranges(ranges)
    }

    pub fn difference(&self, other: &RangeList) -> RangeList {
        let mut working = self.ranges.clone();
        for removed in &other.ranges {
            working = working
                .iter()
                .flat_map(|range| range.difference(removed))
                .collect();
            if working.is_empty() {
                break;
            }
        }
        RangeList::from_ranges(working)
    }

    /// 단일 트랜잭션 번호를 추가한 새 목록
    pub fn add(&self, sequence: u64) -> Result<RangeList> {
        let single = GtidRange::single(sequence)?;
        Ok(self.union(&RangeList::from(single)))
    }

    /// 포함 관계 검사
    ///
    /// 범위는 목록의 범위 중 하나에 완전히 들어가야 합니다 (여러 범위에 걸친 경우는
    /// 사이에 빈 번호가 있으므로 포함되지 않음). 목록은 모든 범위가 그래야 합니다.
    pub fn contains<'a>(&self, operand: impl Into<Operand<'a>>) -> Result<bool> {
        match operand.into() {
            Operand::Range(range) => Ok(self.covers(range)),
            Operand::RangeList(list) => Ok(self.covers_list(list)),
            other => Err(GtidError::UnsupportedType(format!(
                "RangeList는 {}을(를) 포함할 수 없음",
                other.kind()
            ))),
        }
    }

    pub(crate) fn covers(&self, range: &GtidRange) -> bool {
        let idx = self.ranges.partition_point(|r| r.start() <= range.start());
        idx > 0 && self.ranges[idx - 1].covers(range)
    }

    pub(crate) fn covers_list(&self, other: &RangeList) -> bool {
        other.ranges.iter().all(|range| self.covers(range))
    }

    pub fn contains_sequence(&self, sequence: u64) -> bool {
        let idx = self.ranges.partition_point(|r| r.start() <= sequence);
        idx > 0 && self.ranges[idx - 1].contains_sequence(sequence)
    }
}

/// 정렬 후 겹치거나 맞닿은 범위 병합
fn normalize(mut ranges: Vec<GtidRange>) -> Vec<GtidRange> {
    ranges.sort_unstable();

    let mut merged: Vec<GtidRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        if let Some(last) = merged.last_mut() {
            if let Some(joined) = last.merge(&range) {
                *last = joined;
                continue;
            }
        }
        merged.push(range);
    }
    merged
}

fn is_normalized(ranges: &[GtidRange]) -> bool {
    ranges
        .windows(2)
        .all(|pair| pair[0].end().saturating_add(1) < pair[1].start())
}

impl From<GtidRange> for RangeList {
    fn from(range: GtidRange) -> Self {
        RangeList {
            ranges: vec![range],
        }
    }
}

impl FromIterator<GtidRange> for RangeList {
    fn from_iter<I: IntoIterator<Item = GtidRange>>(iter: I) -> Self {
        RangeList::from_ranges(iter)
    }
}

impl IntoIterator for RangeList {
    type Item = GtidRange;
    type IntoIter = std::vec::IntoIter<GtidRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.into_iter()
    }
}

impl<'a> IntoIterator for &'a RangeList {
    type Item = &'a GtidRange;
    type IntoIter = std::slice::Iter<'a, GtidRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

impl fmt::Display for RangeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{}", range)?;
        }
        Ok(())
    }
}

impl FromStr for RangeList {
    type Err = GtidError;

    fn from_str(s: &str) -> Result<Self> {
        RangeList::from_specs([s])
    }
}

impl From<RangeList> for String {
    fn from(list: RangeList) -> Self {
        list.to_string()
    }
}

impl TryFrom<String> for RangeList {
    type Error = GtidError;

    fn try_from(text: String) -> Result<Self> {
        text.parse()
    }
}

impl Add for &RangeList {
    type Output = RangeList;

    fn add(self, other: &RangeList) -> RangeList {
        self.union(other)
    }
}

impl Sub for &RangeList {
    type Output = RangeList;

    fn sub(self, other: &RangeList) -> RangeList {
        self.difference(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gtid::GtidSet;

    fn list(text: &str) -> RangeList {
        text.parse().unwrap()
    }

    fn range(start: u64, end: u64) -> GtidRange {
        GtidRange::new(start, end).unwrap()
    }

    fn gl1() -> RangeList {
        RangeList::from_specs(["1-139", "141", "145-197"]).unwrap()
    }

    #[test]
    fn test_empty() {
        let empty = RangeList::new();
        assert!(empty.ranges().is_empty());
        assert_eq!(empty, list(""));
        assert_eq!(empty, RangeList::from_specs(Vec::<&str>::new()).unwrap());
        assert_eq!(empty.to_string(), "");
    }

    #[test]
    fn test_parse() {
        assert_eq!(RangeList::from_specs([(1_u64, 19_u64)]).unwrap(), list("1-19"));
        assert_eq!(
            RangeList::from_specs([RangeSpec::Pair(1, 1), RangeSpec::Text("9-12")]).unwrap(),
            list("1:9-12")
        );
        assert_eq!(
            RangeList::from_specs([RangeSpec::Range(range(1, 5)), RangeSpec::Text("9-12")]).unwrap(),
            list("1-5:9-12")
        );
        assert!(matches!(
            "1::3".parse::<RangeList>(),
            Err(GtidError::ParseError(_))
        ));
        assert!(RangeList::from_specs([RangeSpec::Pair(5, 2)]).is_err());
    }

    #[test]
    fn test_normalizes_unsorted_input() {
        let l = list("145-197:1-139:141:140");
        assert_eq!(l.to_string(), "1-141:145-197");
        assert_eq!(l.len(), 2);
        assert_eq!(l.first(), Some(&range(1, 141)));
        assert_eq!(l.last(), Some(&range(145, 197)));
    }

    #[test]
    fn test_union() {
        let gl1 = gl1();
        let expected = RangeList::from_specs(["1-141", "145-197"]).unwrap();
        assert_eq!(&gl1 + &list("140"), expected);
        assert_eq!(gl1.union(&list("112-140")), expected);
        assert_eq!(gl1.union(&list("1-156")), list("1-197"));
        assert_eq!(gl1.union(&list("142-144")), list("1-139:141-197"));
        assert_eq!(list("1:3:18").union(&list("2:4-8")), list("1-8:18"));
    }

    #[test]
    fn test_zero_union() {
        assert_eq!(list("1").union(&RangeList::new()), list("1"));
        assert_eq!(RangeList::new().union(&list("1")), list("1"));
    }

    #[test]
    fn test_difference() {
        let gl1 = gl1();
        assert_eq!(
            gl1.difference(&list("2-7:100-101:141")),
            list("1:8-99:102-139:145-197")
        );
        let zero = &gl1 - &gl1;
        assert!(zero.is_empty());
        assert_eq!(gl1.difference(&RangeList::new()), gl1);
    }

    #[test]
    fn test_contains() {
        let gl1 = gl1();
        assert!(gl1.contains(&range(2, 98)).unwrap());
        assert!(gl1.contains(&range(141, 141)).unwrap());
        assert!(gl1.contains(&range(145, 197)).unwrap());
        assert!(!gl1.contains(&range(144, 197)).unwrap());
        assert!(!gl1.contains(&range(142, 142)).unwrap());
        assert!(!gl1.contains(&range(139, 141)).unwrap());

        assert!(gl1.contains(&list("2-98:141")).unwrap());
        assert!(gl1.contains(&list("141")).unwrap());
        assert!(gl1.contains(&list("1-139:141:145-197")).unwrap());
        assert!(!gl1.contains(&list("1-139:141-142:145-197")).unwrap());
    }

    #[test]
    fn test_contains_unsupported() {
        let gl1 = gl1();
        let set = GtidSet::parse("3E11FA47-71CA-11E1-9E33-C80AA9429562:1-23:27").unwrap();
        assert!(matches!(gl1.contains(&set), Err(GtidError::UnsupportedType(_))));
        assert!(matches!(gl1.contains((1_u64, 47_u64)), Err(GtidError::UnsupportedType(_))));
    }

    #[test]
    fn test_contains_sequence() {
        let gl1 = gl1();
        assert!(gl1.contains_sequence(1));
        assert!(gl1.contains_sequence(141));
        assert!(!gl1.contains_sequence(140));
        assert!(!gl1.contains_sequence(198));
        assert!(!RangeList::new().contains_sequence(1));
    }

    #[test]
    fn test_add() {
        let l = list("1-3:5").add(4).unwrap();
        assert_eq!(l, list("1-5"));
        assert_eq!(l.add(9).unwrap().to_string(), "1-5:9");
        assert!(l.add(0).is_err());
    }

    #[test]
    fn test_trx_count() {
        assert_eq!(gl1().count(), 193);
        assert_eq!(RangeList::new().count(), 0);
    }

    #[test]
    fn test_serde_as_text() {
        let json = serde_json::to_string(&gl1()).unwrap();
        assert_eq!(json, r#""1-139:141:145-197""#);
        assert_eq!(serde_json::from_str::<RangeList>(&json).unwrap(), gl1());
        assert!(serde_json::from_str::<RangeList>(r#""7-3""#).is_err());
    }
}

//! GTID (Global Transaction ID) 집합
//!
//! GTID 형식: UUID:sequence-number
//! 여러 서버의 GTID 집합을 추적: "uuid1:1-100:105,\nuuid2:1-50"
//!
//! 항목 순서는 텍스트에 나온 순서(또는 추가된 순서)를 유지하며 출력에만 영향을 줍니다.
//! UUID는 대소문자를 포함해 그대로 비교/출력합니다.

use crate::error::{GtidError, Result};
use crate::operand::Operand;
use crate::range_list::RangeList;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use tracing::{debug, trace};

/// 서버가 다중 소스 GTID를 출력할 때 쓰는 항목 구분자
const ENTRY_SEPARATOR: &str = ",\n";

/// 전체 GTID 집합 (여러 UUID)
///
/// 비어 있는 `RangeList`를 가진 항목은 저장하지 않습니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct GtidSet {
    entries: Vec<(String, RangeList)>,
}

impl GtidSet {
    pub fn new() -> Self {
        GtidSet {
            entries: Vec::new(),
        }
    }

    /// GTID 문자열 파싱 (format: "uuid1:1-100:200,uuid2:1-50")
    ///
    /// 항목 구분자 `,` 뒤의 줄바꿈은 허용됩니다. 빈 문자열과 `NULL`은 빈 집합입니다.
    /// 같은 UUID가 여러 번 나오면 첫 항목 위치에 합집합으로 합쳐집니다.
    pub fn parse(gtid_str: &str) -> Result<Self> {
        let mut gtid_set = GtidSet::new();

        let gtid_str = gtid_str.trim();
        if gtid_str.is_empty() || gtid_str == "NULL" {
            return Ok(gtid_set);
        }

        for entry in gtid_str.split(',') {
            let (uuid, ranges) = parse_entry(entry)?;
            gtid_set.merge_entry(uuid, ranges);
        }

        debug!(sources = gtid_set.len(), "Parsed GTID set");
        Ok(gtid_set)
    }

    fn position(&self, uuid: &str) -> Option<usize> {
        self.entries.iter().position(|(id, _)| id == uuid)
    }

    pub fn get(&self, uuid: &str) -> Option<&RangeList> {
        self.position(uuid).map(|i| &self.entries[i].1)
    }

    /// UUID의 범위 목록을 교체 (집합을 직접 변경하는 연산)
    ///
    /// 기존 UUID는 자리를 유지하고, 새 UUID는 끝에 추가됩니다.
    /// 빈 목록을 넣으면 항목이 제거됩니다. 이전 값을 반환합니다.
    pub fn insert(&mut self, uuid: impl Into<String>, ranges: RangeList) -> Option<RangeList> {
        let uuid = uuid.into();
        if ranges.is_empty() {
            return self.remove(&uuid);
        }
        match self.position(&uuid) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, ranges)),
            None => {
                self.entries.push((uuid, ranges));
                None
            }
        }
    }

    pub fn remove(&mut self, uuid: &str) -> Option<RangeList> {
        let i = self.position(uuid)?;
        Some(self.entries.remove(i).1)
    }

    /// 단일 GTID 추가 (format: "uuid:sequence")
    pub fn add_gtid(&mut self, gtid: &str) -> Result<()> {
        let (uuid, sequence) = parse_gtid(gtid)?;
        let ranges = match self.get(uuid) {
            Some(existing) => existing.add(sequence)?,
            None => RangeList::new().add(sequence)?,
        };
        self.insert(uuid, ranges);
        Ok(())
    }

    pub fn contains_gtid(&self, gtid: &str) -> bool {
        match parse_gtid(gtid) {
            Ok((uuid, sequence)) => self
                .get(uuid)
                .is_some_and(|ranges| ranges.contains_sequence(sequence)),
            Err(_) => false,
        }
    }

    /// 다른 GTID 집합의 모든 트랜잭션을 포함하는지 검사
    pub fn contains<'a>(&self, operand: impl Into<Operand<'a>>) -> Result<bool> {
        match operand.into() {
            Operand::Set(other) => Ok(other.entries.iter().all(|(uuid, ranges)| {
                self.get(uuid)
                    .is_some_and(|own| own.covers_list(ranges))
            })),
            other => Err(GtidError::UnsupportedType(format!(
                "GtidSet은 {}을(를) 포함할 수 없음",
                other.kind()
            ))),
        }
    }

    /// 합집합: self의 UUID 순서를 유지하고 other에만 있는 UUID를 뒤에 추가
    pub fn union(&self, other: &GtidSet) -> GtidSet {
        let mut result = self.clone();
        for (uuid, ranges) in &other.entries {
            result.merge_entry(uuid, ranges.clone());
        }
        result
    }

    /// 차집합: self에 없는 UUID는 추가되지 않고, 비게 된 항목은 제거
    pub fn difference(&self, other: &GtidSet) -> GtidSet {
        let mut entries = Vec::with_capacity(self.entries.len());
        for (uuid, ranges) in &self.entries {
            let remaining = match other.get(uuid) {
                Some(removed) => ranges.difference(removed),
                None => ranges.clone(),
            };
            if remaining.is_empty() {
                trace!(uuid = %uuid, "Dropping exhausted GTID entry");
                continue;
            }
            entries.push((uuid.clone(), remaining));
        }
        GtidSet { entries }
    }

    fn merge_entry(&mut self, uuid: &str, ranges: RangeList) {
        if ranges.is_empty() {
            return;
        }
        match self.position(uuid) {
            Some(i) => {
                let merged = self.entries[i].1.union(&ranges);
                self.entries[i].1 = merged;
            }
            None => self.entries.push((uuid.to_string(), ranges)),
        }
    }

    /// 전체 트랜잭션 수
    ///
    /// UUID 하나의 개수는 `u64`에 들어가지만 여러 UUID의 합은 넘칠 수 있어 `u128`로 셉니다.
    pub fn count(&self) -> u128 {
        self.entries
            .iter()
            .map(|(_, ranges)| u128::from(ranges.count()))
            .sum()
    }

    /// UUID 개수
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn uuids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(uuid, _)| uuid.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RangeList)> {
        self.entries.iter().map(|(uuid, ranges)| (uuid.as_str(), ranges))
    }
}

/// "uuid:ranges" 항목 하나 파싱
fn parse_entry(entry: &str) -> Result<(&str, RangeList)> {
    let entry = entry.trim();
    let (uuid, ranges_str) = entry
        .split_once(':')
        .ok_or_else(|| GtidError::ParseError(format!("Invalid GTID entry: {:?}", entry)))?;

    if uuid.is_empty() || uuid.chars().any(char::is_whitespace) {
        return Err(GtidError::ParseError(format!("Invalid source id: {:?}", uuid)));
    }
    if ranges_str.trim().is_empty() {
        return Err(GtidError::ParseError(format!("Missing ranges for {}", uuid)));
    }

    Ok((uuid, ranges_str.parse()?))
}

/// "uuid:sequence" 파싱
fn parse_gtid(gtid: &str) -> Result<(&str, u64)> {
    let (uuid, sequence) = gtid
        .trim()
        .split_once(':')
        .ok_or_else(|| GtidError::ParseError(format!("Invalid GTID format: {}", gtid)))?;
    if uuid.is_empty() {
        return Err(GtidError::ParseError(format!("Invalid GTID format: {}", gtid)));
    }
    let sequence = sequence
        .parse::<u64>()
        .map_err(|_| GtidError::ParseError(format!("Invalid sequence: {}", sequence)))?;
    Ok((uuid, sequence))
}

/// UUID 순서와 무관한 비교
impl PartialEq for GtidSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(uuid, ranges)| other.get(uuid) == Some(ranges))
    }
}

impl Eq for GtidSet {}

impl fmt::Display for GtidSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (uuid, ranges)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(ENTRY_SEPARATOR)?;
            }
            write!(f, "{}:{}", uuid, ranges)?;
        }
        Ok(())
    }
}

impl FromStr for GtidSet {
    type Err = GtidError;

    fn from_str(s: &str) -> Result<Self> {
        GtidSet::parse(s)
    }
}

impl From<GtidSet> for String {
    fn from(set: GtidSet) -> Self {
        set.to_string()
    }
}

impl TryFrom<String> for GtidSet {
    type Error = GtidError;

    fn try_from(text: String) -> Result<Self> {
        GtidSet::parse(&text)
    }
}

impl Add for &GtidSet {
    type Output = GtidSet;

    fn add(self, other: &GtidSet) -> GtidSet {
        self.union(other)
    }
}

impl Sub for &GtidSet {
    type Output = GtidSet;

    fn sub(self, other: &GtidSet) -> GtidSet {
        self.difference(other)
    }
}

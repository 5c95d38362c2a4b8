//! 공개 API를 통한 GTID 연산 시나리오

use mysql_gtid::{GtidError, GtidRange, GtidSet, RangeList};

const UUID_A: &str = "3E11FA47-71CA-11E1-9E33-C80AA9429562";

fn list(text: &str) -> RangeList {
    text.parse().unwrap()
}

#[test]
fn range_length_and_text() {
    let range = GtidRange::new(198, 2174).unwrap();
    assert_eq!(range.len(), 1977);
    assert_eq!(range.to_string(), "198-2174");
}

#[test]
fn range_difference_cuts_upper_edge() {
    let range = GtidRange::new(19, 132).unwrap();
    let removed = GtidRange::new(95, 200).unwrap();
    assert_eq!(range.difference(&removed), list("19-94"));
}

#[test]
fn range_list_difference_and_count() {
    let executed = list("1-139:141:145-197");
    assert_eq!(
        executed.difference(&list("2-7:100-101:141")),
        list("1:8-99:102-139:145-197")
    );
    assert_eq!(executed.count(), 193);
}

#[test]
fn gtid_set_union_fills_gaps() {
    let a = GtidSet::parse(&format!("{}:1-23:27", UUID_A)).unwrap();
    let b = GtidSet::parse(&format!("{}:24-26:28", UUID_A)).unwrap();
    assert_eq!(a.union(&b), GtidSet::parse(&format!("{}:1-28", UUID_A)).unwrap());
}

#[test]
fn empty_gtid_set() {
    let empty = GtidSet::parse("").unwrap();
    assert_eq!(empty.count(), 0);
    assert!(empty.is_empty());
}

#[test]
fn gtid_executed_round_trip() {
    // SHOW MASTER STATUS 출력 형태
    let executed = "0b1ff4f0-e7e2-11ea-a3c4-0242ac110002:1-5012,
2C7C3F0E-E7E2-11EA-A3C4-0242AC110003:1-9:11:13-20,
9a2e8c2d-e7e2-11ea-a3c4-0242ac110004:7";
    let gtid_set = GtidSet::parse(executed).unwrap();
    assert_eq!(gtid_set.len(), 3);
    assert_eq!(gtid_set.count(), 5012 + 9 + 1 + 8 + 1);
    assert_eq!(gtid_set.to_string(), executed);
}

#[test]
fn single_line_input_renders_multiline() {
    let gtid_set = GtidSet::parse("a:1-3,b:5").unwrap();
    assert_eq!(gtid_set.to_string(), "a:1-3,\nb:5");
}

#[test]
fn non_canonical_input_is_normalized() {
    let gtid_set = GtidSet::parse("a:5-9:1-3:4").unwrap();
    assert_eq!(gtid_set.to_string(), "a:1-9");
}

#[test]
fn failover_candidate_selection() {
    let source = GtidSet::parse("a:1-500,\nb:1-20").unwrap();
    let replica_1 = GtidSet::parse("a:1-480,\nb:1-20").unwrap();
    let replica_2 = GtidSet::parse("a:1-499,\nb:1-20,\nc:1").unwrap();

    // 누락이 가장 적은 레플리카
    let behind_1 = source.difference(&replica_1).count();
    let behind_2 = source.difference(&replica_2).count();
    assert_eq!((behind_1, behind_2), (20, 1));

    // errant 트랜잭션 확인
    assert!(source.contains(&replica_1).unwrap());
    assert!(!source.contains(&replica_2).unwrap());
    assert_eq!(replica_2.difference(&source).to_string(), "c:1");
}

#[test]
fn mutation_via_insert_only() {
    let mut gtid_set = GtidSet::parse("a:1-3").unwrap();
    let snapshot = gtid_set.clone();
    let _ = gtid_set.union(&GtidSet::parse("b:1").unwrap());
    assert_eq!(gtid_set, snapshot);

    gtid_set.insert("b", list("1-2"));
    assert_eq!(gtid_set.to_string(), "a:1-3,\nb:1-2");
}

#[test]
fn error_kinds() {
    assert!(matches!(GtidRange::new(5, 1), Err(GtidError::InvalidRange { .. })));
    assert!(matches!(
        GtidRange::new(1, 5).unwrap().get(2),
        Err(GtidError::IndexOutOfBounds(2))
    ));
    assert!(matches!(GtidSet::parse("a:x"), Err(GtidError::ParseError(_))));
    let gtid_set = GtidSet::parse("a:1").unwrap();
    assert!(matches!(
        list("1").contains(&gtid_set),
        Err(GtidError::UnsupportedType(_))
    ));
}

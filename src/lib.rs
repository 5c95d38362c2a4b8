//! MySQL GTID 집합 연산
//!
//! 복제 토폴로지에서 서버가 실행한 트랜잭션을 나타내는 GTID 집합의 대수 연산을 제공합니다.
//! 주요 기능:
//! - `GtidRange`: 한 UUID의 연속 트랜잭션 번호 구간
//! - `RangeList`: 정렬/병합된 구간 목록
//! - `GtidSet`: UUID별 구간 목록 (`gtid_executed` 형식 파싱 및 출력)
//! - 합집합, 차집합, 포함 관계, 트랜잭션 수 계산
//!
//! 모든 연산은 새 값을 반환하며, `GtidSet::insert`/`GtidSet::add_gtid`만 집합을 직접
//! 변경합니다. 내부 잠금은 없으므로 같은 `GtidSet`을 여러 스레드에서 변경하려면
//! 호출하는 쪽에서 동기화해야 합니다.
//!
//! ```
//! use mysql_gtid::GtidSet;
//!
//! let executed = GtidSet::parse("3E11FA47-71CA-11E1-9E33-C80AA9429562:1-23:27").unwrap();
//! let incoming = GtidSet::parse("3E11FA47-71CA-11E1-9E33-C80AA9429562:24-26:28").unwrap();
//! assert_eq!(
//!     executed.union(&incoming).to_string(),
//!     "3E11FA47-71CA-11E1-9E33-C80AA9429562:1-28"
//! );
//! ```

pub mod error;
pub mod gtid;
pub mod operand;
pub mod range;
pub mod range_list;

pub use error::{GtidError, Result};
pub use gtid::GtidSet;
pub use operand::{Operand, RangeSpec};
pub use range::GtidRange;
pub use range_list::RangeList;

/// 레플리카 GTID 따라잡기 검사 예제
///
/// 소스 서버와 레플리카의 `gtid_executed` 값을 비교하여 레플리카에 누락된 트랜잭션과
/// 소스에 없는 (errant) 트랜잭션을 JSON으로 출력합니다.
///
/// GTID_SOURCE_EXECUTED="uuid:1-100" GTID_REPLICA_EXECUTED="uuid:1-90" cargo run
use mysql_gtid::{GtidSet, Result};
use serde::Serialize;
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 비교 대상 설정
#[derive(Debug, Clone, Default)]
struct ReportConfig {
    source_executed: String,
    replica_executed: String,
}

impl ReportConfig {
    fn from_env() -> Self {
        ReportConfig {
            source_executed: env::var("GTID_SOURCE_EXECUTED").unwrap_or_default(),
            replica_executed: env::var("GTID_REPLICA_EXECUTED").unwrap_or_default(),
        }
    }
}

/// 비교 결과
#[derive(Debug, Serialize)]
struct CatchUpReport {
    source: GtidSet,
    replica: GtidSet,
    /// 소스에는 있고 레플리카에는 없는 트랜잭션
    missing: GtidSet,
    /// 레플리카에만 있는 트랜잭션
    errant: GtidSet,
    missing_count: u128,
    errant_count: u128,
    caught_up: bool,
}

fn build_report(config: &ReportConfig) -> Result<CatchUpReport> {
    let source = GtidSet::parse(&config.source_executed)?;
    let replica = GtidSet::parse(&config.replica_executed)?;

    let missing = source.difference(&replica);
    let errant = replica.difference(&source);
    let caught_up = replica.contains(&source)?;

    Ok(CatchUpReport {
        missing_count: missing.count(),
        errant_count: errant.count(),
        source,
        replica,
        missing,
        errant,
        caught_up,
    })
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // 로깅 초기화
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ReportConfig::from_env();
    let report = build_report(&config)?;
    info!(
        source_transactions = report.source.count(),
        replica_transactions = report.replica.count(),
        "Compared GTID sets"
    );
    if report.caught_up {
        info!("Replica has executed every source transaction");
    } else {
        warn!(missing = report.missing_count, "Replica is behind source");
    }
    if !report.errant.is_empty() {
        warn!(errant = %report.errant, "Replica has errant transactions");
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

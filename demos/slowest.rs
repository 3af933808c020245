//! 列出慢查询日志中最慢的若干条带来源注解的查询
//!
//! ```text
//! cargo run --example slowest -- /data/mysql/slow-query.log 5 3
//! RUST_LOG=slow_query_log_analyzer=debug cargo run --example slowest -- slow.log
//! ```

use slow_query_log_analyzer::SlowQueryLog;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("usage: slowest <slow-query.log> [seconds] [limit]")?;
    let seconds: f64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(5.0);
    let limit: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(3);

    let log = SlowQueryLog::new(&path);
    let mut shown = 0usize;
    let with_source = log
        .slower_than(seconds)?
        .filter(|record| record.as_ref().map_or(true, |r| r.has_source()))
        .take(limit);
    for record in with_source {
        let record = record?;
        println!(
            "{:>10} {}\n           {}",
            record.query_time().map(|t| format!("{t:.3}s")).unwrap_or_default(),
            record.source.as_deref().unwrap_or_default(),
            record.sql.replace('\n', " ")
        );
        shown += 1;
    }

    info!(path = %path, seconds, shown, "done");
    Ok(())
}

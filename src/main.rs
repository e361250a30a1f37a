// Small CLI: run the dashboard aggregations against an existing measurement
// database and print the results as JSON.
//
// Usage:
//   cargo run --bin packline-qc -- [db_path] [key=value ...]
//
// Filter keys: start=YYYY-MM-DD end=YYYY-MM-DD plant=... line=... eq=...
// Keys omitted or given an empty value place no constraint.

use packline_qc::app::{get_default_db_path, AppState};
use packline_qc::domain::MeasurementFilter;
use packline_qc::logging;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", packline_qc::APP_NAME, packline_qc::VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1).peekable();

    // 第一个非 key=value 参数视为数据库路径
    let db_path = match args.peek() {
        Some(first) if !first.contains('=') => {
            let path = first.clone();
            args.next();
            path
        }
        _ => get_default_db_path(),
    };
    tracing::info!("使用数据库: {}", db_path);

    // 其余参数解析为过滤条件
    let mut filter = MeasurementFilter::default();
    for arg in args {
        match arg.split_once('=') {
            Some(("start", v)) => filter.start_date = Some(v.to_string()),
            Some(("end", v)) => filter.end_date = Some(v.to_string()),
            Some(("plant", v)) => filter.plant = Some(v.to_string()),
            Some(("line", v)) => filter.line = Some(v.to_string()),
            Some(("eq", v)) => filter.equipment = Some(v.to_string()),
            _ => anyhow::bail!("无法识别的参数: {} (期望 key=value)", arg),
        }
    }

    let state = AppState::new(db_path)?;

    let metrics = state.dashboard_api.dashboard_metrics(&filter)?;
    let defects = state.dashboard_api.pareto_defects(&filter)?;
    let ranking = state.dashboard_api.plant_ranking()?;

    let output = json!({
        "metrics": metrics,
        "defects": defects,
        "ranking": ranking,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

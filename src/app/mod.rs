// ==========================================
// 包装线质量KPI分析系统 - 应用层
// ==========================================
// 职责: 应用装配（依赖注入容器）与入口辅助
// ==========================================

pub mod state;

pub use state::{build_state_from_connection, get_default_db_path, AppState};

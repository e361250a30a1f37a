// ==========================================
// 包装线质量KPI分析系统 - API 层
// ==========================================
// 职责: 面向调用方的业务接口（过滤规范化、错误折叠）
// ==========================================

pub mod catalog_api;
pub mod dashboard_api;
pub mod error;

// 重导出核心 API
pub use catalog_api::CatalogApi;
pub use dashboard_api::DashboardApi;
pub use error::{ApiError, ApiResult};

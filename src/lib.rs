// ==========================================
// 包装线质量KPI分析系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 生产质量决策支持 (KPI 聚合引擎)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    DateRange, DefectBreakdown, DefectCategory, FilterPredicate, FilterTarget, LineRecord,
    MeasurementFilter, MetricSet, PackagingRecord, PlantRankEntry,
};

// 引擎
pub use engine::{
    positive_only_average, DefectParetoEngine, KpiEngine, PlantRankingEngine,
    DEFAULT_OVERWEIGHT_GRAMS_PER_BAG,
};

// API
pub use api::{ApiError, ApiResult, CatalogApi, DashboardApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "包装线质量KPI分析系统";

// ==========================================
// 预编译检查
// ==========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

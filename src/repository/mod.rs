// ==========================================
// 包装线质量KPI分析系统 - 数据仓储层
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod line_record_repo;
pub mod packaging_record_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use line_record_repo::{
    LineAggregates, LinePlantSummary, LineRecordRepository, LinkedLineAggregates,
    UnlinkedLineAggregates,
};
pub use packaging_record_repo::{
    DefectSums, PackagingAggregates, PackagingPlantSummary, PackagingRecordRepository,
};

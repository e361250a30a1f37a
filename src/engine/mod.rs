// ==========================================
// 包装线质量KPI分析系统 - 引擎层
// ==========================================
// 职责: 业务规则（缺失值归一、效率平均、占比、排名）
// 红线: 引擎只读数据源，不产生写入，不持有请求间状态
// ==========================================

pub mod defects;
pub mod efficiency;
pub mod kpi;
pub mod ranking;

// 重导出核心引擎
pub use defects::DefectParetoEngine;
pub use efficiency::positive_only_average;
pub use kpi::{KpiEngine, DEFAULT_OVERWEIGHT_GRAMS_PER_BAG};
pub use ranking::PlantRankingEngine;

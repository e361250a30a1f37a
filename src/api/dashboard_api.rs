// ==========================================
// 包装线质量KPI分析系统 - 看板 API
// ==========================================
// 职责: 封装 KPI/缺陷/排名三个引擎，提供看板聚合查询
// 架构: API 层 → Engine 层 → Repository 层
// 约定: 过滤规范化在本层完成，引擎只消费谓词
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::domain::filter::MeasurementFilter;
use crate::domain::metrics::{DefectBreakdown, MetricSet, PlantRankEntry};
use crate::engine::{DefectParetoEngine, KpiEngine, PlantRankingEngine};

// ==========================================
// DashboardApi - 看板 API
// ==========================================

/// 看板API
///
/// 职责：
/// 1. KPI 指标集查询（过滤口径）
/// 2. 缺陷帕累托分析（过滤口径）
/// 3. 工厂排名（全局口径）
///
/// 每个方法是一次独立的无状态计算，可并发调用。
pub struct DashboardApi {
    kpi_engine: Arc<KpiEngine>,
    defect_engine: Arc<DefectParetoEngine>,
    ranking_engine: Arc<PlantRankingEngine>,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    pub fn new(
        kpi_engine: Arc<KpiEngine>,
        defect_engine: Arc<DefectParetoEngine>,
        ranking_engine: Arc<PlantRankingEngine>,
    ) -> Self {
        Self {
            kpi_engine,
            defect_engine,
            ranking_engine,
        }
    }

    /// 查询看板 KPI 指标集
    ///
    /// # 参数
    /// - filter: 原始过滤请求（全部字段可选，空串视为无约束）
    ///
    /// # 返回
    /// - Ok(MetricSet): 完整指标集
    /// - Err(ApiError): 上游数据源失败（单一聚合失败，无部分结果）
    pub fn dashboard_metrics(&self, filter: &MeasurementFilter) -> ApiResult<MetricSet> {
        let predicate = filter.normalize();
        tracing::debug!(empty_filter = predicate.is_empty(), "看板指标查询");
        Ok(self.kpi_engine.compute_metrics(&predicate)?)
    }

    /// 查询缺陷帕累托分析
    ///
    /// # 参数
    /// - filter: 原始过滤请求
    ///
    /// # 返回
    /// - Ok(DefectBreakdown): 四类缺陷求和、总量与占比
    pub fn pareto_defects(&self, filter: &MeasurementFilter) -> ApiResult<DefectBreakdown> {
        let predicate = filter.normalize();
        Ok(self.defect_engine.analyze(&predicate)?)
    }

    /// 查询工厂排名（全局口径，不受过滤影响）
    ///
    /// # 返回
    /// - Ok(Vec<PlantRankEntry>): 按综合效率降序的排名，
    ///   同一数据快照下重复调用输出一致（含并列顺序）
    pub fn plant_ranking(&self) -> ApiResult<Vec<PlantRankEntry>> {
        Ok(self.ranking_engine.rank()?)
    }
}

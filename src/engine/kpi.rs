// ==========================================
// 包装线质量KPI分析系统 - KPI 聚合引擎
// ==========================================
// 职责: 在过滤谓词下聚合两张测量表，产出完整指标集
// 缺失值策略: 聚合为 NULL 一律归一为 0 再参与后续计算
// 人工/自动拆分: 以包装记录联动关系 (tsc.ccw_id) 划分 ccw 记录
// ==========================================

use std::sync::Arc;

use crate::domain::filter::FilterPredicate;
use crate::domain::metrics::MetricSet;
use crate::engine::efficiency::positive_only_average;
use crate::repository::{LineRecordRepository, PackagingRecordRepository, RepositoryResult};

/// 每袋超重克数常量（声明口径的估算值，非实测）
///
/// 超重指标 = 合格袋数 × 该常量。可通过 ConfigManager 覆写
/// （config_kv: overweight_grams_per_bag）。
pub const DEFAULT_OVERWEIGHT_GRAMS_PER_BAG: f64 = 0.1;

// ==========================================
// KpiEngine - KPI 聚合引擎
// ==========================================
/// KPI 聚合引擎
///
/// 每次计算是 (谓词, 数据库快照) 的纯函数，引擎不持有请求间状态，
/// 不产生写入。上游查询失败整体上抛，不返回部分结果。
pub struct KpiEngine {
    line_repo: Arc<LineRecordRepository>,
    packaging_repo: Arc<PackagingRecordRepository>,
    /// 每袋超重克数（默认 DEFAULT_OVERWEIGHT_GRAMS_PER_BAG）
    overweight_grams_per_bag: f64,
}

impl KpiEngine {
    /// 创建新的 KpiEngine 实例
    pub fn new(
        line_repo: Arc<LineRecordRepository>,
        packaging_repo: Arc<PackagingRecordRepository>,
    ) -> Self {
        Self {
            line_repo,
            packaging_repo,
            overweight_grams_per_bag: DEFAULT_OVERWEIGHT_GRAMS_PER_BAG,
        }
    }

    /// 覆写每袋超重克数
    pub fn with_overweight_grams_per_bag(mut self, grams: f64) -> Self {
        self.overweight_grams_per_bag = grams;
        self
    }

    /// 计算指标集
    ///
    /// # 步骤
    /// 1. 按谓词取两表标量聚合（及可选理论产能）
    /// 2. NULL 聚合归一为 0
    /// 3. 综合效率 = {ccw, atlas, tsc} 三均值的正值平均
    /// 4. 人工效率 = 无联动子集 {ccw, atlas} 的正值平均
    /// 5. 自动效率 = 有联动子集 {ccw, atlas, tsc} 的正值平均
    /// 6. 废品率 = 标准偏差均值
    /// 7. 超重克数 = 合格袋数 × 每袋克数常量
    pub fn compute_metrics(&self, predicate: &FilterPredicate) -> RepositoryResult<MetricSet> {
        // ===== 步骤 1: 标量聚合 =====
        let line = self.line_repo.efficiency_aggregates(predicate)?;
        let packaging = self.packaging_repo.aggregates(predicate)?;
        let theoretical = self.packaging_repo.theoretical_bags(predicate)?;

        // ===== 步骤 2: 缺失值归一 =====
        let ccw_efficiency = line.avg_efficiency_ccw.unwrap_or(0.0);
        let atlas_efficiency = line.avg_efficiency_atlas.unwrap_or(0.0);
        let tsc_efficiency = packaging.avg_efficiency_tsc.unwrap_or(0.0);
        let waste_rate = line.avg_std_deviation.unwrap_or(0.0);
        let good_bags = packaging.sum_good_bags.unwrap_or(0);
        let theoretical_bags = theoretical.unwrap_or(0);

        // ===== 步骤 3: 综合效率 =====
        let overall_efficiency =
            positive_only_average(&[ccw_efficiency, atlas_efficiency, tsc_efficiency]);

        // ===== 步骤 4: 人工效率（无联动包装记录） =====
        let manual = self.line_repo.unlinked_efficiency_aggregates(predicate)?;
        let manual_efficiency = positive_only_average(&[
            manual.avg_efficiency_ccw.unwrap_or(0.0),
            manual.avg_efficiency_atlas.unwrap_or(0.0),
        ]);

        // ===== 步骤 5: 自动效率（有联动包装记录） =====
        let automatic = self.line_repo.linked_efficiency_aggregates(predicate)?;
        let automatic_efficiency = positive_only_average(&[
            automatic.avg_efficiency_ccw.unwrap_or(0.0),
            automatic.avg_efficiency_atlas.unwrap_or(0.0),
            automatic.avg_efficiency_tsc.unwrap_or(0.0),
        ]);

        // ===== 步骤 7: 超重估算 =====
        let overweight_grams = good_bags as f64 * self.overweight_grams_per_bag;

        let metrics = MetricSet {
            overall_efficiency,
            waste_rate,
            good_bags,
            theoretical_bags,
            ccw_efficiency,
            atlas_efficiency,
            tsc_efficiency,
            manual_efficiency,
            automatic_efficiency,
            leak_bags: packaging.sum_leak_bags.unwrap_or(0),
            flat_bags: packaging.sum_flat_bags.unwrap_or(0),
            double_bags: packaging.sum_double_bags.unwrap_or(0),
            thick_bags: packaging.sum_thick_bags.unwrap_or(0),
            overweight_grams,
        };

        tracing::debug!(
            overall_efficiency = metrics.overall_efficiency,
            good_bags = metrics.good_bags,
            "KPI 聚合完成"
        );

        Ok(metrics)
    }
}

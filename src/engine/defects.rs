// ==========================================
// 包装线质量KPI分析系统 - 缺陷帕累托引擎
// ==========================================
// 职责: 在过滤谓词下求和四类缺陷并计算占比
// 类别顺序固定: leak, flat, double, thick
// total = 0 时全部占比为 0，不产生除零错误
// ==========================================

use std::sync::Arc;

use crate::domain::filter::FilterPredicate;
use crate::domain::metrics::DefectBreakdown;
use crate::repository::{PackagingRecordRepository, RepositoryResult};

// ==========================================
// DefectParetoEngine - 缺陷帕累托引擎
// ==========================================
/// 缺陷帕累托引擎
pub struct DefectParetoEngine {
    packaging_repo: Arc<PackagingRecordRepository>,
}

impl DefectParetoEngine {
    /// 创建新的 DefectParetoEngine 实例
    pub fn new(packaging_repo: Arc<PackagingRecordRepository>) -> Self {
        Self { packaging_repo }
    }

    /// 计算缺陷帕累托分析
    ///
    /// # 返回
    /// - 四类缺陷原始求和、总量、各占比（百分比）
    pub fn analyze(&self, predicate: &FilterPredicate) -> RepositoryResult<DefectBreakdown> {
        let sums = self.packaging_repo.defect_sums(predicate)?;

        // 缺失值归一为 0
        let leak = sums.leak_bags.unwrap_or(0);
        let flat = sums.flat_bags.unwrap_or(0);
        let double = sums.double_bags.unwrap_or(0);
        let thick = sums.thick_bags.unwrap_or(0);
        let total = leak + flat + double + thick;

        let percentage = |count: i64| -> f64 {
            if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            }
        };

        Ok(DefectBreakdown {
            leak_bags: leak,
            flat_bags: flat,
            double_bags: double,
            thick_bags: thick,
            total,
            leak_pct: percentage(leak),
            flat_pct: percentage(flat),
            double_pct: percentage(double),
            thick_pct: percentage(thick),
        })
    }
}

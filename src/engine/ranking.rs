// ==========================================
// 包装线质量KPI分析系统 - 工厂排名引擎
// ==========================================
// 职责: 对两张测量表出现过的全部工厂计算 KPI 并按综合效率降序排名
// 范围: 全局口径，不受请求过滤影响
// 确定性: 工厂枚举顺序固定 + 稳定排序，同一数据快照下输出可复现
// ==========================================

use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::metrics::PlantRankEntry;
use crate::engine::efficiency::positive_only_average;
use crate::repository::{LineRecordRepository, PackagingRecordRepository, RepositoryResult};

// ==========================================
// PlantRankingEngine - 工厂排名引擎
// ==========================================
/// 工厂排名引擎
pub struct PlantRankingEngine {
    line_repo: Arc<LineRecordRepository>,
    packaging_repo: Arc<PackagingRecordRepository>,
}

impl PlantRankingEngine {
    /// 创建新的 PlantRankingEngine 实例
    pub fn new(
        line_repo: Arc<LineRecordRepository>,
        packaging_repo: Arc<PackagingRecordRepository>,
    ) -> Self {
        Self {
            line_repo,
            packaging_repo,
        }
    }

    /// 计算工厂排名
    ///
    /// # 步骤
    /// 1. 取两表非空工厂名并集（先 ccw 后 tsc，保持枚举顺序）
    /// 2. 逐工厂汇总: 合格袋数(tsc)、合格卸料数(ccw)、超重件数(ccw)、
    ///    标准偏差均值(ccw)，综合效率用与 KPI 引擎相同的正值平均规则
    /// 3. 按综合效率降序稳定排序（并列保持枚举顺序）
    pub fn rank(&self) -> RepositoryResult<Vec<PlantRankEntry>> {
        let plants = self.distinct_plants_union()?;

        let mut entries = Vec::with_capacity(plants.len());
        for plant in plants {
            let line = self.line_repo.plant_summary(&plant)?;
            let packaging = self.packaging_repo.plant_summary(&plant)?;

            // 缺失值归一为 0 后走共享的正值平均规则
            let overall_efficiency = positive_only_average(&[
                line.avg_efficiency_ccw.unwrap_or(0.0),
                line.avg_efficiency_atlas.unwrap_or(0.0),
                packaging.avg_efficiency_tsc.unwrap_or(0.0),
            ]);

            entries.push(PlantRankEntry {
                plant,
                total_good: packaging.total_good_bags.unwrap_or(0),
                total_good_ccw: line.total_good_units.unwrap_or(0),
                overweight_total: line.total_overweight_units.unwrap_or(0),
                overall_efficiency,
                avg_desestandar: line.avg_std_deviation.unwrap_or(0.0),
            });
        }

        // Vec::sort_by 是稳定排序，效率并列时保持枚举顺序
        entries.sort_by(|a, b| {
            b.overall_efficiency
                .partial_cmp(&a.overall_efficiency)
                .unwrap_or(Ordering::Equal)
        });

        tracing::debug!(plants = entries.len(), "工厂排名计算完成");
        Ok(entries)
    }

    /// 两表非空工厂名并集，保持“先 ccw 枚举、再补 tsc 新增”的固定顺序
    fn distinct_plants_union(&self) -> RepositoryResult<Vec<String>> {
        let mut plants = self.line_repo.distinct_plants()?;
        for plant in self.packaging_repo.distinct_plants()? {
            if !plants.contains(&plant) {
                plants.push(plant);
            }
        }
        Ok(plants)
    }
}

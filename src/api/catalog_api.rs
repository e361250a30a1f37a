// ==========================================
// 包装线质量KPI分析系统 - 目录 API
// ==========================================
// 职责: 看板过滤控件的数据源（工厂/产线/设备清单、可用日期范围）
// 架构: API 层 → Repository 层（目录查询无业务规则，不经引擎）
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::domain::metrics::DateRange;
use crate::repository::{LineRecordRepository, PackagingRecordRepository};

// ==========================================
// CatalogApi - 目录 API
// ==========================================

/// 目录API
pub struct CatalogApi {
    line_repo: Arc<LineRecordRepository>,
    packaging_repo: Arc<PackagingRecordRepository>,
}

impl CatalogApi {
    /// 创建新的CatalogApi实例
    pub fn new(
        line_repo: Arc<LineRecordRepository>,
        packaging_repo: Arc<PackagingRecordRepository>,
    ) -> Self {
        Self {
            line_repo,
            packaging_repo,
        }
    }

    /// 查询工厂清单（ccw 表去重非空）
    pub fn list_plants(&self) -> ApiResult<Vec<String>> {
        Ok(self.line_repo.distinct_plants()?)
    }

    /// 查询指定工厂的产线清单
    ///
    /// # 说明
    /// - 工厂为空时返回空清单（与历史行为一致，不报错）
    pub fn list_lines(&self, plant: &str) -> ApiResult<Vec<String>> {
        if plant.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.line_repo.distinct_lines(plant.trim())?)
    }

    /// 查询设备清单（工厂/产线约束可选）
    pub fn list_equipment(
        &self,
        plant: Option<&str>,
        line: Option<&str>,
    ) -> ApiResult<Vec<String>> {
        Ok(self.line_repo.distinct_equipment(plant, line)?)
    }

    /// 查询两张测量表合并后的可用日期范围
    ///
    /// # 返回
    /// - Ok(Some(DateRange)): 任一表有数据
    /// - Ok(None): 两表均为空
    pub fn available_dates(&self) -> ApiResult<Option<DateRange>> {
        let line_bounds = self.line_repo.date_bounds()?;
        let packaging_bounds = self.packaging_repo.date_bounds()?;

        let mut min_candidates = Vec::new();
        let mut max_candidates = Vec::new();
        for (min, max) in [line_bounds, packaging_bounds].into_iter().flatten() {
            min_candidates.push(min);
            max_candidates.push(max);
        }

        let range = match (min_candidates.into_iter().min(), max_candidates.into_iter().max()) {
            (Some(min_date), Some(max_date)) => Some(DateRange { min_date, max_date }),
            _ => None,
        };

        Ok(range)
    }
}

// ==========================================
// 包装线质量KPI分析系统 - 过滤模型
// ==========================================
// 职责: 把请求层的原始过滤条件规范化为统一谓词,
//       并按目标表改写为参数化 WHERE 片段
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// MeasurementFilter - 原始过滤请求
// ==========================================
/// 过滤请求
///
/// 所有字段可选; 缺失或空字符串均表示“无此约束”，而不是匹配空串。
/// 日期按字符串透传，比较语义交给记录源 (SQLite TEXT 比较，ISO-8601 格式下正确)。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeasurementFilter {
    pub start_date: Option<String>, // 区间下界: date_start >= start_date
    pub end_date: Option<String>,   // 区间上界: date_end <= end_date
    pub plant: Option<String>,      // 工厂精确匹配
    pub line: Option<String>,       // 产线精确匹配
    pub equipment: Option<String>,  // 设备精确匹配
}

impl MeasurementFilter {
    /// 规范化为谓词
    ///
    /// # 规则
    /// - None 和空字符串（含纯空白）一律归一为“无约束”
    /// - 空谓词匹配全部记录
    pub fn normalize(&self) -> FilterPredicate {
        FilterPredicate {
            start_date: normalize_value(&self.start_date),
            end_date: normalize_value(&self.end_date),
            plant: normalize_value(&self.plant),
            line: normalize_value(&self.line),
            equipment: normalize_value(&self.equipment),
        }
    }
}

/// 空串/空白归一为 None
fn normalize_value(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// ==========================================
// FilterTarget - 谓词改写目标
// ==========================================
/// 同一谓词需要同时作用于两张测量表（以及可选的产能子表），
/// 各表的列名/别名不同，由此枚举决定改写方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTarget {
    /// ccw 表（产线记录），别名 ccw
    Line,
    /// tsc 表（包装记录），别名 tsc
    Packaging,
    /// tsc_daily 产能子表: 日期作用于 td.date，范围字段作用于联表 tsc
    Capacity,
}

// ==========================================
// FilterPredicate - 规范化谓词
// ==========================================
/// 规范化后的过滤谓词（若干条件的合取）
///
/// conditions 与 params 必须保持同序，由同一处生成保证。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPredicate {
    start_date: Option<String>,
    end_date: Option<String>,
    plant: Option<String>,
    line: Option<String>,
    equipment: Option<String>,
}

impl FilterPredicate {
    /// 是否为空谓词（匹配全部记录）
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.plant.is_none()
            && self.line.is_none()
            && self.equipment.is_none()
    }

    /// 生成目标表的条件片段（与 params() 同序）
    pub fn conditions(&self, target: FilterTarget) -> Vec<String> {
        let (start_col, end_col, scope_alias) = match target {
            FilterTarget::Line => ("ccw.date_start", "ccw.date_end", "ccw"),
            FilterTarget::Packaging => ("tsc.date_start", "tsc.date_end", "tsc"),
            FilterTarget::Capacity => ("td.date", "td.date", "tsc"),
        };

        let mut conditions = Vec::new();
        if self.start_date.is_some() {
            conditions.push(format!("{} >= ?", start_col));
        }
        if self.end_date.is_some() {
            conditions.push(format!("{} <= ?", end_col));
        }
        if self.plant.is_some() {
            conditions.push(format!("{}.plant = ?", scope_alias));
        }
        if self.line.is_some() {
            conditions.push(format!("{}.line = ?", scope_alias));
        }
        if self.equipment.is_some() {
            conditions.push(format!("{}.eq = ?", scope_alias));
        }
        conditions
    }

    /// 生成绑定参数（与 conditions() 同序）
    pub fn params(&self) -> Vec<String> {
        [
            &self.start_date,
            &self.end_date,
            &self.plant,
            &self.line,
            &self.equipment,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }

    /// 生成完整 WHERE 子句（空谓词返回空串）
    pub fn where_sql(&self, target: FilterTarget) -> String {
        render_where(&self.conditions(target))
    }
}

/// 条件列表拼接为 WHERE 子句
///
/// 供仓储在谓词条件之外追加结构性条件（例如人工/自动拆分的
/// `tsc.id IS NULL`）后统一拼接。
pub fn render_where(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

// ==========================================
// 单元测试
// ==========================================

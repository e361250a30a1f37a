// ==========================================
// 包装线质量KPI分析系统 - 指标输出类型
// ==========================================
// 职责: 定义引擎对外输出的指标 DTO
// 约束: 字段名即对外序列化契约，调用方按原样消费
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// MetricSet - 看板指标集
// ==========================================
/// 一次过滤请求的完整 KPI 指标集
///
/// 效率类字段单位为百分比 [0,100]；计数类字段为袋数/件数。
/// 缺数据一律归一为 0（见 engine::kpi 的缺失值策略）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub overall_efficiency: f64,   // 综合效率 (三传感器正值平均)
    pub waste_rate: f64,           // 废品率 (标准偏差均值)
    pub good_bags: i64,            // 合格袋数
    pub theoretical_bags: i64,     // 理论袋数 (产能子表, 缺表为 0)

    // ===== 分设备效率 =====
    pub ccw_efficiency: f64,       // CCW 主传感器效率均值
    pub atlas_efficiency: f64,     // ATLAS 副传感器效率均值
    pub tsc_efficiency: f64,       // TSC 包装传感器效率均值

    // ===== 人工/自动拆分 =====
    pub manual_efficiency: f64,    // 人工线效率 (无联动包装记录)
    pub automatic_efficiency: f64, // 自动线效率 (有联动包装记录)

    // ===== 缺陷计数 =====
    pub leak_bags: i64,            // 漏气袋数
    pub flat_bags: i64,            // 瘪袋数
    pub double_bags: i64,          // 双重袋数
    pub thick_bags: i64,           // 过厚袋数

    // ===== 超重分析 =====
    pub overweight_grams: f64,     // 估算超重克数 (合格袋数 × 每袋克数常量)
}

// ==========================================
// DefectBreakdown - 缺陷帕累托分析
// ==========================================
/// 四类缺陷的总量与占比
///
/// 类别顺序固定: leak, flat, double, thick (见 domain::types::DefectCategory)。
/// total = 0 时四个百分比全为 0，不产生除零错误。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefectBreakdown {
    pub leak_bags: i64,
    pub flat_bags: i64,
    pub double_bags: i64,
    pub thick_bags: i64,
    pub total: i64,
    pub leak_pct: f64,
    pub flat_pct: f64,
    pub double_pct: f64,
    pub thick_pct: f64,
}

// ==========================================
// PlantRankEntry - 工厂排名条目
// ==========================================
/// 全局工厂排名的一行（不受请求过滤影响）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantRankEntry {
    pub plant: String,             // 工厂
    pub total_good: i64,           // 合格袋数 (tsc)
    pub total_good_ccw: i64,       // 合格卸料数 (ccw)
    pub overweight_total: i64,     // 超重件数 (ccw)
    pub overall_efficiency: f64,   // 综合效率 (排序键, 降序)
    pub avg_desestandar: f64,      // 标准偏差均值
}

// ==========================================
// DateRange - 可用日期范围
// ==========================================
/// 两张测量表合并后的整体日期范围
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub min_date: String,
    pub max_date: String,
}

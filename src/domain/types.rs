// ==========================================
// 包装线质量KPI分析系统 - 基础类型
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// DefectCategory - 缺陷类别
// ==========================================
// 约束: 类别集合与顺序固定 (leak, flat, double, thick)，
// 输出结构依赖该顺序保持向后兼容。新增类别必须追加在末尾。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectCategory {
    Leak,   // 漏气袋
    Flat,   // 瘪袋
    Double, // 双重袋
    Thick,  // 过厚袋
}

impl DefectCategory {
    /// 固定顺序的全量类别表
    pub const ALL: [DefectCategory; 4] = [
        DefectCategory::Leak,
        DefectCategory::Flat,
        DefectCategory::Double,
        DefectCategory::Thick,
    ];

    /// 存储列名（tsc 表）
    pub fn column(&self) -> &'static str {
        match self {
            DefectCategory::Leak => "leak_bags",
            DefectCategory::Flat => "flat_bags",
            DefectCategory::Double => "double_bags",
            DefectCategory::Thick => "thick_bags",
        }
    }
}

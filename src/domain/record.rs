// ==========================================
// 包装线质量KPI分析系统 - 测量记录领域模型
// ==========================================
// 数据来源: 既有产线数据库 (ccw / tsc 两张测量表)
// 引擎本身只读; insert 仅供测试夹具与本地建库工具使用
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// LineRecord - 产线测量记录 (ccw 表)
// ==========================================
// 一条记录对应一条产线的一个测量区间
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    pub id: Option<i64>,           // 存储分配的主键 (插入前为 None)
    pub plant: String,             // 工厂
    pub line: String,              // 产线
    pub equipment: String,         // 设备编码 (eq 列)
    pub date_start: NaiveDate,     // 测量区间开始
    pub date_end: NaiveDate,       // 测量区间结束

    // ===== 效率读数 =====
    // 读数为 NULL 或 0 均视为“无数据”，不参与效率平均 (见 engine::efficiency)
    pub efficiency_ccw: Option<f64>,   // 主效率传感器 (eficiencia_ccw 列)
    pub efficiency_atlas: Option<f64>, // 副效率传感器 (eficiencia_atlas 列)

    // ===== 质量指标 =====
    pub std_deviation: Option<f64>, // 标准偏差 (des_estandar 列, 废品率口径)
    pub good_units: i64,            // 合格卸料数 (descargas_buenas 列)
    pub overweight_units: i64,      // 超重件数 (sobre_peso 列)
}

// ==========================================
// PackagingRecord - 包装测量记录 (tsc 表)
// ==========================================
// 一条记录对应一台包装设备的一个测量区间
// linked_line 指向所属产线记录; 为 None 表示人工线 (无联动包装)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagingRecord {
    pub id: Option<i64>,           // 存储分配的主键 (插入前为 None)
    pub linked_line: Option<i64>,  // 关联的产线记录 (ccw_id 列, 可空)
    pub plant: String,             // 工厂
    pub line: String,              // 产线
    pub equipment: String,         // 设备编码 (eq 列)
    pub date_start: NaiveDate,     // 测量区间开始
    pub date_end: NaiveDate,       // 测量区间结束

    // ===== 效率读数 =====
    pub efficiency_tsc: Option<f64>, // 包装效率传感器 (eficiencia_tsc 列)

    // ===== 产量与缺陷计数 =====
    pub good_bags: i64,            // 合格袋数
    pub leak_bags: i64,            // 漏气袋数
    pub flat_bags: i64,            // 瘪袋数
    pub double_bags: i64,          // 双重袋数
    pub thick_bags: i64,           // 过厚袋数
}

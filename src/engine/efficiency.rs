// ==========================================
// 包装线质量KPI分析系统 - 效率平均规则
// ==========================================
// 职责: 多传感器效率的“正值平均”共享实现
// 调用方: KPI 聚合引擎（综合/人工/自动口径）与工厂排名引擎
// 共享一个实现，保证两处口径不漂移
// ==========================================

/// 正值平均: 只对严格大于 0 的读数求算术平均，集合为空时返回 0
///
/// # 数据质量说明
/// 上游测量数据中“真实为 0 的效率”与“无数据”不可区分（NULL 已在
/// 引擎侧归一为 0）。本规则沿用该口径：0 视同缺数据，排除在平均之外。
/// 这是已知的数据质量缺陷，消费方解读指标时需要知晓，但计算口径
/// 必须保持一致，不做“修正”。
pub fn positive_only_average(values: &[f64]) -> f64 {
    let positives: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
    if positives.is_empty() {
        return 0.0;
    }
    positives.iter().sum::<f64>() / positives.len() as f64
}

// ==========================================
// 单元测试
// ==========================================

// ==========================================
// 聚合物经销返利计算系统 - 坎级解析器
// ==========================================
// 职责: 将数值量度映射为坎级折扣率
// 红线: 无状态、无副作用、完全确定
// ==========================================

use crate::domain::scheme::Slab;

// ==========================================
// SlabResolver - 纯函数工具类
// ==========================================
pub struct SlabResolver;

impl SlabResolver {
    /// 解析量度对应的折扣率
    ///
    /// # 规则
    /// - 在所有满足 measure ≥ criteria 的坎级中取最大 amount
    /// - 空坎级列表或无达坎 → 0
    /// - 达坎判定统一为非严格（≥）,需要严格正量度的方案
    ///   由录入面将首坎 criteria 设为正值
    ///
    /// # 参数
    /// - measure: 量度（销量、百分比或投影量）
    /// - slabs: 坎级列表（解析不依赖录入顺序）
    pub fn resolve(measure: f64, slabs: &[Slab]) -> f64 {
        slabs
            .iter()
            .filter(|s| measure >= s.criteria)
            .map(|s| s.amount)
            .fold(0.0, f64::max)
    }
}

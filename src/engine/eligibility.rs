// ==========================================
// 聚合物经销返利计算系统 - 资格过滤器
// ==========================================
// 职责: 物料分组隶属 × 开票日期窗口的布尔掩码
// 红线: 无状态、无副作用
// ==========================================

use crate::domain::sales::SalesRow;
use crate::domain::types::MaterialGroup;
use chrono::NaiveDate;
use std::collections::HashSet;

// ==========================================
// EligibilityFilter - 纯函数工具类
// ==========================================
pub struct EligibilityFilter;

impl EligibilityFilter {
    /// 计算行资格掩码
    ///
    /// # 规则
    /// 行合格 iff 物料分组 ∈ groups 且 start ≤ 开票日期 ≤ end（双闭区间）
    ///
    /// # 参数
    /// - rows: 工作行集（期间切片）
    /// - groups: 适用物料分组集合（线上单值/列表已在边界归一化）
    /// - start / end: 方案有效期
    pub fn mask(
        rows: &[SalesRow],
        groups: &HashSet<MaterialGroup>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<bool> {
        rows.iter()
            .map(|row| {
                groups.contains(&row.material_group)
                    && row.billing_date >= start
                    && row.billing_date <= end
            })
            .collect()
    }
}

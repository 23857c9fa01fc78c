// ==========================================
// 聚合物经销返利计算系统 - 客户主数据
// ==========================================
// MOU 承诺目标: 长表 (客户组, 物料族, 目标量, 有效期)
// 仓库距离主数据: 送达方 → 距离(公里),仅运费方案需要
// ==========================================

use crate::domain::period::Period;
use crate::domain::types::MaterialFamily;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// MouTarget - MOU 承诺目标（长表一行）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MouTarget {
    pub sold_to_group: String,   // 客户组
    pub family: MaterialFamily,  // 物料族
    pub target_qty: f64,         // 承诺目标量
    pub start_date: NaiveDate,   // 有效期起
    pub end_date: NaiveDate,     // 有效期止
}

impl MouTarget {
    /// 有效期是否与评估月重叠
    pub fn is_active_in(&self, period: &Period) -> bool {
        self.start_date <= period.last_day() && self.end_date >= period.first_day()
    }
}

// ==========================================
// MouTargetTable - MOU 承诺目标表
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MouTargetTable {
    pub targets: Vec<MouTarget>,
}

impl MouTargetTable {
    pub fn new(targets: Vec<MouTarget>) -> Self {
        MouTargetTable { targets }
    }

    /// 查找评估月内生效的承诺目标
    ///
    /// # 规则
    /// - 有效期与评估月重叠即生效
    /// - 多条重叠时取表内首条（录入面保证窗口互斥）
    /// - 缺失返回 None,调用方按 0 目标处理
    pub fn active_target(
        &self,
        sold_to_group: &str,
        family: MaterialFamily,
        period: &Period,
    ) -> Option<f64> {
        self.targets
            .iter()
            .find(|t| {
                t.sold_to_group == sold_to_group && t.family == family && t.is_active_in(period)
            })
            .map(|t| t.target_qty)
    }
}

// ==========================================
// DistanceMaster - 仓库距离主数据
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistanceMaster {
    pub distances: HashMap<String, f64>, // 送达方 → 距离(公里)
}

impl DistanceMaster {
    pub fn new(distances: HashMap<String, f64>) -> Self {
        DistanceMaster { distances }
    }

    pub fn get(&self, ship_to: &str) -> Option<f64> {
        self.distances.get(ship_to).copied()
    }
}

// ==========================================
// CustomerMasters - 参考表合集
// ==========================================
// 用途: 编排器的注入参数,核心不自行取数
#[derive(Debug, Clone, Default)]
pub struct CustomerMasters {
    pub mou: MouTargetTable,
    pub distances: DistanceMaster,
}

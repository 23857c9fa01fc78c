// ==========================================
// 聚合物经销返利计算系统 - 销售台账领域模型
// ==========================================
// 红线: 台账行为只读输入,引擎不得原地修改
// 用途: 导入层写入,引擎层按期间切片后参与计算
// ==========================================

use crate::domain::period::Period;
use crate::domain::types::{MaterialFamily, MaterialGroup};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// SalesRow - 开票行项目
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRow {
    // ===== 客户维度 =====
    pub sold_to_group: String,        // 售达方客户组
    pub sold_to_name: String,         // 售达方名称
    pub ship_to: Option<String>,      // 送达方（运费方案按此关联仓库距离）

    // ===== 物料维度 =====
    pub material_group: MaterialGroup,        // 物料分组（PP/LLDPE/HDPE）
    pub material_description: Option<String>, // 物料描述（清洗后）

    // ===== 开票维度 =====
    pub billing_date: NaiveDate, // 开票日期
    pub quantity: f64,           // 开票数量（≥0）
    pub net_value: Option<f64>,  // 净开票额
}

impl SalesRow {
    /// 行所属物料族（PP→PP, LLDPE/HDPE→PE）
    pub fn material_family(&self) -> MaterialFamily {
        self.material_group.family()
    }
}

// ==========================================
// PeriodSummary - 期间汇总
// ==========================================
// 用途: 计算前的台账概览（记录数 + 总量）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub record_count: usize,
    pub total_quantity: f64,
}

// ==========================================
// SalesLedger - 销售台账
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesLedger {
    pub rows: Vec<SalesRow>,
}

impl SalesLedger {
    pub fn new(rows: Vec<SalesRow>) -> Self {
        SalesLedger { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 期间切片（工作副本,原台账不动）
    pub fn rows_in_period(&self, period: &Period) -> Vec<SalesRow> {
        self.rows
            .iter()
            .filter(|r| period.contains(r.billing_date))
            .cloned()
            .collect()
    }

    /// 台账中出现过的年份（升序去重）
    pub fn available_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .rows
            .iter()
            .map(|r| chrono::Datelike::year(&r.billing_date))
            .collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// 台账中出现过的月份（升序去重）
    pub fn available_months(&self) -> Vec<u32> {
        let mut months: Vec<u32> = self
            .rows
            .iter()
            .map(|r| chrono::Datelike::month(&r.billing_date))
            .collect();
        months.sort_unstable();
        months.dedup();
        months
    }

    /// 期间汇总（记录数 + 总量）
    pub fn period_summary(&self, period: &Period) -> PeriodSummary {
        let mut record_count = 0;
        let mut total_quantity = 0.0;
        for row in &self.rows {
            if period.contains(row.billing_date) {
                record_count += 1;
                total_quantity += row.quantity;
            }
        }
        PeriodSummary {
            record_count,
            total_quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(group: MaterialGroup, date: (i32, u32, u32), qty: f64) -> SalesRow {
        SalesRow {
            sold_to_group: "G1".to_string(),
            sold_to_name: "客户一".to_string(),
            ship_to: None,
            material_group: group,
            material_description: None,
            billing_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            quantity: qty,
            net_value: None,
        }
    }

    #[test]
    fn test_rows_in_period() {
        let ledger = SalesLedger::new(vec![
            row(MaterialGroup::Pp, (2026, 1, 10), 10.0),
            row(MaterialGroup::Hdpe, (2026, 2, 10), 20.0),
            row(MaterialGroup::Pp, (2026, 1, 31), 30.0),
        ]);
        let jan = Period::new(2026, 1).unwrap();
        assert_eq!(ledger.rows_in_period(&jan).len(), 2);
    }

    #[test]
    fn test_period_summary() {
        let ledger = SalesLedger::new(vec![
            row(MaterialGroup::Pp, (2026, 1, 10), 10.0),
            row(MaterialGroup::Pp, (2026, 1, 20), 15.0),
            row(MaterialGroup::Pp, (2026, 3, 5), 99.0),
        ]);
        let summary = ledger.period_summary(&Period::new(2026, 1).unwrap());
        assert_eq!(summary.record_count, 2);
        assert!((summary.total_quantity - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_available_years_months() {
        let ledger = SalesLedger::new(vec![
            row(MaterialGroup::Pp, (2025, 12, 1), 1.0),
            row(MaterialGroup::Pp, (2026, 1, 1), 1.0),
            row(MaterialGroup::Pp, (2026, 1, 15), 1.0),
        ]);
        assert_eq!(ledger.available_years(), vec![2025, 2026]);
        assert_eq!(ledger.available_months(), vec![1, 12]);
    }
}

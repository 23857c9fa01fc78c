// ==========================================
// 聚合物经销返利计算系统 - 聚合基准
// ==========================================
// 职责: 按 (客户组 × 物料族) 计算四种客户级量度
// 红线: 分母缺失/为零一律钳制为 0,不得产生 NaN/∞;
//       评估窗口内出现过的键必须全部出现在结果中
// ==========================================

use crate::domain::masters::MouTargetTable;
use crate::domain::period::Period;
use crate::domain::sales::{SalesLedger, SalesRow};
use crate::domain::types::MaterialFamily;
use std::collections::HashMap;
use tracing::debug;

/// 聚合键: (客户组, 物料族)
pub type BaseKey = (String, MaterialFamily);

/// 年度投影的缓冲系数
pub const ANNUAL_PROJECTION_BUFFER: f64 = 1.2;

// ==========================================
// AggregationBases - 纯函数工具类
// ==========================================
pub struct AggregationBases;

impl AggregationBases {
    /// 当期销量: 评估窗口内按键求和的开票数量
    pub fn current_volume(rows: &[SalesRow]) -> HashMap<BaseKey, f64> {
        let mut volumes: HashMap<BaseKey, f64> = HashMap::new();
        for row in rows {
            let key = (row.sold_to_group.clone(), row.material_family());
            *volumes.entry(key).or_insert(0.0) += row.quantity;
        }
        volumes
    }

    /// MOU 百分比: 当期销量 ÷ 生效承诺目标 × 100
    ///
    /// # 规则
    /// - 目标缺失或为 0 → 百分比钳制为 0（记 debug 日志,不报错）
    /// - 结果四舍五入到 2 位小数
    pub fn mou_percentage(
        rows: &[SalesRow],
        period: &Period,
        mou: &MouTargetTable,
    ) -> HashMap<BaseKey, f64> {
        let volumes = Self::current_volume(rows);
        let mut result = HashMap::with_capacity(volumes.len());
        for ((group, family), volume) in volumes {
            let target = mou.active_target(&group, family, period).unwrap_or(0.0);
            let pct = if target > 0.0 {
                Self::round2(volume / target * 100.0)
            } else {
                debug!(
                    sold_to_group = %group,
                    family = %family,
                    period = %period,
                    "MOU 承诺目标缺失或为 0,百分比按 0 处理"
                );
                0.0
            };
            result.insert((group, family), pct);
        }
        result
    }

    /// 非零历史月均百分比: 当期销量 ÷ 同财年指定月份的非零月销量均值 × 100
    ///
    /// # 规则
    /// - scheme_months 中的月份在评估月所属财年内解析日历年
    /// - 仅严格正的月销量参与均值;无正值月 → 百分比钳制为 0
    /// - 结果四舍五入到 2 位小数
    pub fn non_zero_months_avg_percentage(
        rows: &[SalesRow],
        ledger: &SalesLedger,
        period: &Period,
        scheme_months: &[u32],
    ) -> HashMap<BaseKey, f64> {
        let volumes = Self::current_volume(rows);
        let mut result = HashMap::with_capacity(volumes.len());

        for ((group, family), volume) in volumes {
            let mut positive_sum = 0.0;
            let mut positive_count = 0usize;

            for &month in scheme_months {
                let year = period.calendar_year_of_fiscal_month(month);
                let monthly = Self::monthly_volume(ledger, &group, family, year, month);
                if monthly > 0.0 {
                    positive_sum += monthly;
                    positive_count += 1;
                }
            }

            let pct = if positive_count > 0 {
                let mean = positive_sum / positive_count as f64;
                Self::round2(volume / mean * 100.0)
            } else {
                debug!(
                    sold_to_group = %group,
                    family = %family,
                    "历史月销量无正值,非零月均百分比按 0 处理"
                );
                0.0
            };
            result.insert((group, family), pct);
        }
        result
    }

    /// 年度投影销量: 财年迄今实际量 + 生效目标 × 剩余财月 × 1.2 缓冲
    pub fn annual_projected_volume(
        rows: &[SalesRow],
        ledger: &SalesLedger,
        period: &Period,
        mou: &MouTargetTable,
    ) -> HashMap<BaseKey, f64> {
        let volumes = Self::current_volume(rows);
        let fiscal_start = period.fiscal_year_start();
        let ytd_end = period.last_day();
        let remaining = period.remaining_fiscal_months() as f64;

        let mut result = HashMap::with_capacity(volumes.len());
        for ((group, family), _) in volumes {
            let ytd: f64 = ledger
                .rows
                .iter()
                .filter(|r| {
                    r.sold_to_group == group
                        && r.material_family() == family
                        && r.billing_date >= fiscal_start
                        && r.billing_date <= ytd_end
                })
                .map(|r| r.quantity)
                .sum();

            let target = mou.active_target(&group, family, period).unwrap_or(0.0);
            let projection = ytd + target * remaining * ANNUAL_PROJECTION_BUFFER;
            result.insert((group, family), projection);
        }
        result
    }

    /// 指定键在某日历年月的销量
    fn monthly_volume(
        ledger: &SalesLedger,
        group: &str,
        family: MaterialFamily,
        year: i32,
        month: u32,
    ) -> f64 {
        let period = match Period::new(year, month) {
            Some(p) => p,
            None => return 0.0,
        };
        ledger
            .rows
            .iter()
            .filter(|r| {
                r.sold_to_group == group
                    && r.material_family() == family
                    && period.contains(r.billing_date)
            })
            .map(|r| r.quantity)
            .sum()
    }

    /// 四舍五入到 2 位小数（远离零方向）
    pub fn round2(x: f64) -> f64 {
        (x * 100.0).round() / 100.0
    }
}

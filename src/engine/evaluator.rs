// ==========================================
// 聚合物经销返利计算系统 - 方案求值器
// ==========================================
// 职责: 每种方案类型一个求值函数,输出 (行号, 折扣行) 对
// 红线: 求值器只读台账与参考表,不读取自身先前写入的列,
//       同一输入必然产出同一输出（幂等）
// ==========================================

use crate::domain::masters::{DistanceMaster, MouTargetTable};
use crate::domain::period::Period;
use crate::domain::sales::{SalesLedger, SalesRow};
use crate::domain::scheme::{SchemeRecord, SchemeTerms};
use crate::domain::types::{Basis, MaterialFamily, MaterialGroup, PriceDirection, SchemeKind};
use crate::engine::aggregation::{AggregationBases, BaseKey};
use crate::engine::eligibility::EligibilityFilter;
use crate::engine::error::{DiscountError, DiscountResult};
use crate::engine::slab::SlabResolver;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// 运费低档距离上限（公里）
pub const FREIGHT_NEAR_DISTANCE_KM: f64 = 100.0;

// ==========================================
// CreditBucket - 凭证结算桶
// ==========================================
// 月度桶按月开具,年度桶（年度坎级、MOU 年度组件）按年结算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditBucket {
    Month,
    Annual,
}

// ==========================================
// SchemeLine - 单条方案命中明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeLine {
    pub kind: SchemeKind,    // 产生明细的方案类型
    pub rate: f64,           // 折扣率
    pub credit: f64,         // 凭证金额 = rate × quantity
    pub bucket: CreditBucket, // 结算桶
}

// ==========================================
// PriceChangeEvent - 价格变动事件（仅信息）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChangeEvent {
    pub date: NaiveDate,
    pub direction: PriceDirection,
    pub amount: f64,
}

/// (行号, 折扣行) 对,由编排器合并进工作行
pub type LineHits = Vec<(usize, SchemeLine)>;

// ==========================================
// SchemeEvaluator - 方案求值工具类
// ==========================================
pub struct SchemeEvaluator;

impl SchemeEvaluator {
    /// MOU 方案: 月度组件进月度桶,年度组件进年度桶
    pub fn evaluate_mou(rows: &[SalesRow], record: &SchemeRecord) -> LineHits {
        let SchemeTerms::Mou {
            monthly_component,
            annual_component,
        } = &record.terms
        else {
            return Vec::new();
        };

        let mask = EligibilityFilter::mask(
            rows,
            &record.material_group_set(),
            record.start_date,
            record.end_date,
        );

        let mut hits = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            if !mask[i] {
                continue;
            }
            hits.push((
                i,
                SchemeLine {
                    kind: SchemeKind::Mou,
                    rate: *monthly_component,
                    credit: monthly_component * row.quantity,
                    bucket: CreditBucket::Month,
                },
            ));
            hits.push((
                i,
                SchemeLine {
                    kind: SchemeKind::Mou,
                    rate: *annual_component,
                    credit: annual_component * row.quantity,
                    bucket: CreditBucket::Annual,
                },
            ));
        }
        hits
    }

    /// 平率方案（Early Bird / Price Protection / Cash）
    pub fn evaluate_flat(rows: &[SalesRow], record: &SchemeRecord) -> LineHits {
        let SchemeTerms::Flat { discount_amount } = &record.terms else {
            return Vec::new();
        };

        let mask = EligibilityFilter::mask(
            rows,
            &record.material_group_set(),
            record.start_date,
            record.end_date,
        );

        rows.iter()
            .enumerate()
            .filter(|(i, _)| mask[*i])
            .map(|(i, row)| {
                (
                    i,
                    SchemeLine {
                        kind: record.kind,
                        rate: *discount_amount,
                        credit: discount_amount * row.quantity,
                        bucket: CreditBucket::Month,
                    },
                )
            })
            .collect()
    }

    /// 运费方案: 距离 ≤100 公里取低档,否则取高档
    ///
    /// # 失败语义
    /// 资格行缺少送达方编号或距离记录 → 硬校验错误,
    /// 报出全部缺失编号,整个期间不产出部分结果
    pub fn evaluate_freight(
        rows: &[SalesRow],
        record: &SchemeRecord,
        distances: &DistanceMaster,
    ) -> DiscountResult<LineHits> {
        let SchemeTerms::Freight {
            less_dist_value,
            high_dist_value,
        } = &record.terms
        else {
            return Ok(Vec::new());
        };

        let mask = EligibilityFilter::mask(
            rows,
            &record.material_group_set(),
            record.start_date,
            record.end_date,
        );

        // 先整体校验关联,再计算
        let mut missing_ship_to: Vec<String> = Vec::new();
        let mut missing_distance: Vec<String> = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            if !mask[i] {
                continue;
            }
            match &row.ship_to {
                None => missing_ship_to.push(row.sold_to_group.clone()),
                Some(ship_to) => {
                    if distances.get(ship_to).is_none() {
                        missing_distance.push(ship_to.clone());
                    }
                }
            }
        }
        if !missing_ship_to.is_empty() {
            missing_ship_to.sort();
            missing_ship_to.dedup();
            return Err(DiscountError::MissingShipTo {
                sold_to_groups: missing_ship_to,
            });
        }
        if !missing_distance.is_empty() {
            missing_distance.sort();
            missing_distance.dedup();
            return Err(DiscountError::MissingDistance {
                ship_to_ids: missing_distance,
            });
        }

        let mut hits = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            if !mask[i] {
                continue;
            }
            // 关联已校验,此处必然能取到距离
            let distance = row
                .ship_to
                .as_deref()
                .and_then(|s| distances.get(s))
                .unwrap_or(f64::MAX);
            let rate = if distance <= FREIGHT_NEAR_DISTANCE_KM {
                *less_dist_value
            } else {
                *high_dist_value
            };
            hits.push((
                i,
                SchemeLine {
                    kind: SchemeKind::Freight,
                    rate,
                    credit: rate * row.quantity,
                    bucket: CreditBucket::Month,
                },
            ));
        }
        Ok(hits)
    }

    /// 数量坎级: 坎级解析当期 (客户组 × 物料族) 销量,整组同率
    ///
    /// # 规则
    /// 资格掩码放宽到记录分组所属族的全部分组
    pub fn evaluate_quantity_slab(rows: &[SalesRow], record: &SchemeRecord) -> LineHits {
        let SchemeTerms::QuantitySlab { slabs } = &record.terms else {
            return Vec::new();
        };
        let base = AggregationBases::current_volume(rows);
        Self::slab_hits(
            rows,
            record,
            &Self::family_broadened_groups(record),
            &base,
            slabs,
            CreditBucket::Month,
        )
    }

    /// 年度数量坎级: 坎级解析年度投影销量,只进年度桶
    pub fn evaluate_annual_quantity_slab(
        rows: &[SalesRow],
        record: &SchemeRecord,
        ledger: &SalesLedger,
        period: &Period,
        mou: &MouTargetTable,
    ) -> LineHits {
        let SchemeTerms::AnnualQuantitySlab { slabs } = &record.terms else {
            return Vec::new();
        };
        let base = AggregationBases::annual_projected_volume(rows, ledger, period, mou);
        Self::slab_hits(
            rows,
            record,
            &Self::family_broadened_groups(record),
            &base,
            slabs,
            CreditBucket::Annual,
        )
    }

    /// 基准坎级（Hidden / X-Y Scheme）: 按记录选择聚合基准
    ///
    /// # 规则
    /// - 记录分组含 PP → PP 族,否则 PE 族
    /// - 资格掩码限定为该族的全部分组
    /// - 同类型多条并行记录的折扣率相加,不覆盖（由编排器累加保证）
    pub fn evaluate_basis_slab(
        rows: &[SalesRow],
        record: &SchemeRecord,
        ledger: &SalesLedger,
        period: &Period,
        mou: &MouTargetTable,
    ) -> LineHits {
        let SchemeTerms::BasisSlab {
            basis,
            slabs,
            scheme_months,
        } = &record.terms
        else {
            return Vec::new();
        };

        let family = if record.material_groups.contains(&MaterialGroup::Pp) {
            MaterialFamily::Pp
        } else {
            MaterialFamily::Pe
        };
        let groups: HashSet<MaterialGroup> =
            family.canonical_groups().iter().copied().collect();

        let base = match basis {
            Basis::MouPct => AggregationBases::mou_percentage(rows, period, mou),
            Basis::FlatVolume => AggregationBases::current_volume(rows),
            Basis::NonZeroMonthsAvgPct => {
                AggregationBases::non_zero_months_avg_percentage(
                    rows,
                    ledger,
                    period,
                    scheme_months,
                )
            }
        };

        debug!(
            kind = %record.kind,
            basis = %basis,
            family = %family,
            keys = base.len(),
            "基准坎级求值"
        );

        Self::slab_hits(rows, record, &groups, &base, slabs, CreditBucket::Month)
    }

    /// 价格变动: 记录事件,不产生折扣行
    pub fn evaluate_price_change(record: &SchemeRecord) -> Option<PriceChangeEvent> {
        let SchemeTerms::PriceChange { direction, amount } = &record.terms else {
            return None;
        };
        Some(PriceChangeEvent {
            // 生效日为记录的有效期起
            date: record.start_date,
            direction: *direction,
            amount: *amount,
        })
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 记录分组所属族的全部分组（坎级方案的放宽掩码）
    fn family_broadened_groups(record: &SchemeRecord) -> HashSet<MaterialGroup> {
        let mut groups = HashSet::new();
        for g in &record.material_groups {
            groups.extend(g.family().canonical_groups().iter().copied());
        }
        groups
    }

    /// 公共坎级命中逻辑: 行键查基准 → 解析坎级 → 产出折扣行
    fn slab_hits(
        rows: &[SalesRow],
        record: &SchemeRecord,
        groups: &HashSet<MaterialGroup>,
        base: &HashMap<BaseKey, f64>,
        slabs: &[crate::domain::scheme::Slab],
        bucket: CreditBucket,
    ) -> LineHits {
        let mask = EligibilityFilter::mask(rows, groups, record.start_date, record.end_date);

        let mut hits = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            if !mask[i] {
                continue;
            }
            let key = (row.sold_to_group.clone(), row.material_family());
            let measure = base.get(&key).copied().unwrap_or(0.0);
            let rate = SlabResolver::resolve(measure, slabs);
            hits.push((
                i,
                SchemeLine {
                    kind: record.kind,
                    rate,
                    credit: rate * row.quantity,
                    bucket,
                },
            ));
        }
        hits
    }
}

// ==========================================
// 聚合物经销返利计算系统 - 折扣编排器
// ==========================================
// 职责: 按固定方案顺序遍历活动目录,将求值器产出的
//       折扣行合并进工作行并累加汇总
// 红线: 累加不覆盖;固定顺序保证浮点求和舍入可复现
// ==========================================

use crate::domain::masters::CustomerMasters;
use crate::domain::period::Period;
use crate::domain::sales::{SalesLedger, SalesRow};
use crate::domain::scheme::{SchemeCatalog, SchemeRecord};
use crate::domain::types::SchemeKind;
use crate::engine::catalog_filter::CatalogFilter;
use crate::engine::error::DiscountResult;
use crate::engine::evaluator::{
    CreditBucket, LineHits, PriceChangeEvent, SchemeEvaluator, SchemeLine,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// ==========================================
// DiscountTotals - 行级累计汇总
// ==========================================
// month_discount / net_discount 为折扣率合计,
// month_credit_note / annual_credit_note 为凭证金额合计
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountTotals {
    pub month_discount: f64,     // 月度折扣率合计（月度桶 rate 之和）
    pub month_credit_note: f64,  // 月度凭证金额（月度桶 credit 之和）
    pub annual_credit_note: f64, // 年度凭证金额（年度桶 credit 之和）
    pub net_discount: f64,       // 净折扣率（全部桶 rate 之和）
}

impl DiscountTotals {
    /// 累加一条折扣行（加法合并,不覆盖）
    fn accumulate(&mut self, line: &SchemeLine) {
        self.net_discount += line.rate;
        match line.bucket {
            CreditBucket::Month => {
                self.month_discount += line.rate;
                self.month_credit_note += line.credit;
            }
            CreditBucket::Annual => {
                self.annual_credit_note += line.credit;
            }
        }
    }
}

// ==========================================
// DiscountRow - 带折扣明细的工作行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountRow {
    pub row: SalesRow,           // 源开票行（只读副本）
    pub lines: Vec<SchemeLine>,  // 命中的方案明细
    pub totals: DiscountTotals,  // 明细的加法折叠
}

impl DiscountRow {
    fn new(row: SalesRow) -> Self {
        DiscountRow {
            row,
            lines: Vec::new(),
            totals: DiscountTotals::default(),
        }
    }
}

// ==========================================
// RunSummary - 期间运行汇总
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub record_count: usize,
    pub total_quantity: f64,
    pub month_credit_note: f64,
    pub annual_credit_note: f64,
}

// ==========================================
// DiscountRun - 一次期间计算的完整结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountRun {
    pub period: Period,
    pub rows: Vec<DiscountRow>,
    pub price_events: Vec<PriceChangeEvent>,
    pub applied: Vec<String>, // 方案命中日志（可解释性）
    pub summary: RunSummary,
}

// ==========================================
// DiscountOrchestrator - 折扣编排器
// ==========================================
pub struct DiscountOrchestrator;

impl DiscountOrchestrator {
    pub fn new() -> Self {
        DiscountOrchestrator
    }

    /// 执行一个期间的完整折扣计算
    ///
    /// # 流程
    /// 1. 期间目录过滤 → 活动方案子目录
    /// 2. 台账期间切片 → 工作行
    /// 3. 按 SchemeKind::APPLY_ORDER 遍历方案类型,
    ///    类型内按目录顺序逐条求值,折扣行加法合并
    ///
    /// # 空结果
    /// 无活动方案或无期间行 → 空/零结果,不报错
    pub fn apply_discount(
        &self,
        ledger: &SalesLedger,
        catalog: &SchemeCatalog,
        masters: &CustomerMasters,
        period: Period,
    ) -> DiscountResult<DiscountRun> {
        info!(
            period = %period,
            ledger_rows = ledger.len(),
            catalog_records = catalog.len(),
            "开始期间折扣计算"
        );

        // ==========================================
        // 步骤1: 期间目录过滤
        // ==========================================
        let active = CatalogFilter::for_month(catalog, &period);
        debug!(active_records = active.len(), "期间目录过滤完成");

        // ==========================================
        // 步骤2: 台账期间切片
        // ==========================================
        let period_rows = ledger.rows_in_period(&period);
        let mut rows: Vec<DiscountRow> =
            period_rows.iter().cloned().map(DiscountRow::new).collect();

        if period_rows.is_empty() || active.is_empty() {
            info!(
                period_rows = period_rows.len(),
                active_records = active.len(),
                "期间无台账行或无活动方案,返回空结果"
            );
            let summary = Self::summarize(&rows);
            return Ok(DiscountRun {
                period,
                rows,
                price_events: Vec::new(),
                applied: Vec::new(),
                summary,
            });
        }

        // ==========================================
        // 步骤3: 按固定顺序求值并累加
        // ==========================================
        let mut price_events = Vec::new();
        let mut applied = Vec::new();

        for kind in SchemeKind::APPLY_ORDER {
            for record in active.records_of(kind) {
                if kind == SchemeKind::PriceChange {
                    if let Some(event) = SchemeEvaluator::evaluate_price_change(record) {
                        applied.push(format!(
                            "{}: {} {} ({})",
                            kind,
                            event.direction,
                            event.amount,
                            record.label()
                        ));
                        price_events.push(event);
                    }
                    continue;
                }

                let hits = Self::evaluate(kind, record, &period_rows, ledger, masters, &period)?;
                debug!(
                    kind = %kind,
                    record = %record.label(),
                    hit_rows = hits.len(),
                    "方案求值完成"
                );
                applied.push(format!("{}: {} 命中 {} 行", kind, record.label(), hits.len()));

                for (index, line) in hits {
                    rows[index].totals.accumulate(&line);
                    rows[index].lines.push(line);
                }
            }
        }

        let summary = Self::summarize(&rows);
        info!(
            record_count = summary.record_count,
            total_quantity = summary.total_quantity,
            month_credit_note = summary.month_credit_note,
            annual_credit_note = summary.annual_credit_note,
            "期间折扣计算完成"
        );

        Ok(DiscountRun {
            period,
            rows,
            price_events,
            applied,
            summary,
        })
    }

    /// 类型分发（目录文档解析后,此处不再出现字符串比较）
    fn evaluate(
        kind: SchemeKind,
        record: &SchemeRecord,
        period_rows: &[SalesRow],
        ledger: &SalesLedger,
        masters: &CustomerMasters,
        period: &Period,
    ) -> DiscountResult<LineHits> {
        let hits = match kind {
            SchemeKind::Mou => SchemeEvaluator::evaluate_mou(period_rows, record),
            SchemeKind::Freight => {
                SchemeEvaluator::evaluate_freight(period_rows, record, &masters.distances)?
            }
            SchemeKind::EarlyBird | SchemeKind::PriceProtection | SchemeKind::Cash => {
                SchemeEvaluator::evaluate_flat(period_rows, record)
            }
            SchemeKind::XyScheme | SchemeKind::Hidden => SchemeEvaluator::evaluate_basis_slab(
                period_rows,
                record,
                ledger,
                period,
                &masters.mou,
            ),
            SchemeKind::QuantitySlab => {
                SchemeEvaluator::evaluate_quantity_slab(period_rows, record)
            }
            SchemeKind::AnnualQuantitySlab => SchemeEvaluator::evaluate_annual_quantity_slab(
                period_rows,
                record,
                ledger,
                period,
                &masters.mou,
            ),
            // 价格变动在调用处单独处理
            SchemeKind::PriceChange => Vec::new(),
        };
        Ok(hits)
    }

    fn summarize(rows: &[DiscountRow]) -> RunSummary {
        let mut summary = RunSummary {
            record_count: rows.len(),
            ..RunSummary::default()
        };
        for dr in rows {
            summary.total_quantity += dr.row.quantity;
            summary.month_credit_note += dr.totals.month_credit_note;
            summary.annual_credit_note += dr.totals.annual_credit_note;
        }
        summary
    }
}

impl Default for DiscountOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

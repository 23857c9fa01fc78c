// ==========================================
// 折扣引擎集成测试
// ==========================================
// 覆盖: 目录文档解析 → 期间过滤 → 方案求值 → 累加汇总
// 的端到端路径,按业务场景组织

use chrono::NaiveDate;
use polymer_rebate_engine::domain::{
    CustomerMasters, MaterialGroup, MouTarget, MouTargetTable, Period, SalesLedger, SalesRow,
    SchemeCatalog,
};
use polymer_rebate_engine::engine::{DiscountError, DiscountOrchestrator};
use serde_json::json;

// ==========================================
// 测试辅助
// ==========================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sales_row(
    group: &str,
    mg: MaterialGroup,
    billing: (i32, u32, u32),
    qty: f64,
) -> SalesRow {
    SalesRow {
        sold_to_group: group.to_string(),
        sold_to_name: format!("经销商{}", group),
        ship_to: None,
        material_group: mg,
        material_description: None,
        billing_date: date(billing.0, billing.1, billing.2),
        quantity: qty,
        net_value: None,
    }
}

fn catalog_from(doc: serde_json::Value) -> SchemeCatalog {
    SchemeCatalog::from_document(&doc).expect("目录文档应能解析")
}

fn run(
    ledger: &SalesLedger,
    catalog: &SchemeCatalog,
    masters: &CustomerMasters,
    year: i32,
    month: u32,
) -> polymer_rebate_engine::engine::DiscountRun {
    DiscountOrchestrator::new()
        .apply_discount(ledger, catalog, masters, Period::new(year, month).unwrap())
        .expect("期间计算应成功")
}

// ==========================================
// 场景: 平率方案
// ==========================================

#[test]
fn test_early_bird_flat_discount_end_to_end() {
    let ledger = SalesLedger::new(vec![sales_row("G1", MaterialGroup::Pp, (2026, 1, 15), 100.0)]);
    let catalog = catalog_from(json!({
        "Early Bird": [{
            "material_groups": "PP",
            "start_date": "2026-01-01",
            "end_date": "2026-03-31",
            "discount_amount": 5.0
        }]
    }));

    let result = run(&ledger, &catalog, &CustomerMasters::default(), 2026, 1);

    assert_eq!(result.rows.len(), 1);
    let totals = result.rows[0].totals;
    assert_eq!(totals.month_discount, 5.0);
    assert_eq!(totals.month_credit_note, 500.0);
    assert_eq!(totals.net_discount, 5.0);
    assert_eq!(totals.annual_credit_note, 0.0);
    assert_eq!(result.summary.month_credit_note, 500.0);
}

#[test]
fn test_flat_discount_skips_out_of_window_rows() {
    // 方案有效期止于 1 月,2 月开票行不参与
    let ledger = SalesLedger::new(vec![
        sales_row("G1", MaterialGroup::Pp, (2026, 2, 10), 100.0),
    ]);
    let catalog = catalog_from(json!({
        "Cash": [{
            "material_groups": "PP",
            "start_date": "2026-01-01",
            "end_date": "2026-01-31",
            "discount_amount": 2.0
        }]
    }));

    let result = run(&ledger, &catalog, &CustomerMasters::default(), 2026, 2);
    // 记录与 2 月无重叠,期间目录过滤后无活动方案
    assert_eq!(result.rows[0].lines.len(), 0);
    assert_eq!(result.summary.month_credit_note, 0.0);
}

// ==========================================
// 场景: MOU 双组件
// ==========================================

#[test]
fn test_mou_dual_component_buckets() {
    let ledger = SalesLedger::new(vec![sales_row("G1", MaterialGroup::Pp, (2026, 1, 15), 50.0)]);
    let catalog = catalog_from(json!({
        "MOU": [{
            "material_groups": ["PP", "LLDPE", "HDPE"],
            "start_date": "2026-01-01",
            "end_date": "2026-12-31",
            "monthly_component": 2.0,
            "annual_component": 3.0
        }]
    }));

    let result = run(&ledger, &catalog, &CustomerMasters::default(), 2026, 1);

    let totals = result.rows[0].totals;
    // 月度组件: 2 × 50 = 100;年度组件: 3 × 50 = 150
    assert_eq!(totals.month_credit_note, 100.0);
    assert_eq!(totals.annual_credit_note, 150.0);
    // 净折扣率累计两个组件
    assert_eq!(totals.net_discount, 5.0);
    assert_eq!(result.rows[0].lines.len(), 2);
}

// ==========================================
// 场景: 数量坎级（组级解析）
// ==========================================

#[test]
fn test_quantity_slab_resolves_at_group_level() {
    // G1 组当期总量 300,解析坎级 100 → 率 1,组内每行同率
    let ledger = SalesLedger::new(vec![
        sales_row("G1", MaterialGroup::Pp, (2026, 1, 5), 200.0),
        sales_row("G1", MaterialGroup::Pp, (2026, 1, 20), 100.0),
    ]);
    let catalog = catalog_from(json!({
        "Quantity Slab": [{
            "material_groups": "PP",
            "start_date": "2026-01-01",
            "end_date": "2026-12-31",
            "discount_amount": [
                { "criteria": 0.0, "amount": 0.0 },
                { "criteria": 100.0, "amount": 1.0 },
                { "criteria": 500.0, "amount": 2.0 }
            ]
        }]
    }));

    let result = run(&ledger, &catalog, &CustomerMasters::default(), 2026, 1);

    for row in &result.rows {
        assert_eq!(row.totals.net_discount, 1.0);
    }
    // 凭证金额 = 率 × 各行数量
    assert_eq!(result.rows[0].totals.month_credit_note, 200.0);
    assert_eq!(result.rows[1].totals.month_credit_note, 100.0);
}

// ==========================================
// 场景: MOU% 基准坎级
// ==========================================

#[test]
fn test_xy_scheme_mou_percentage_basis() {
    // 当期销量 90,MOU 目标 100 → MOU% = 90,落在 80 坎 → 率 1
    let ledger = SalesLedger::new(vec![sales_row("G1", MaterialGroup::Pp, (2026, 1, 15), 90.0)]);
    let catalog = catalog_from(json!({
        "X-Y Scheme": [{
            "material_groups": "PP",
            "start_date": "2026-01-01",
            "end_date": "2026-12-31",
            "basis": "MOU%",
            "discount_amount": [
                { "criteria": 80.0, "amount": 1.0 },
                { "criteria": 100.0, "amount": 2.0 }
            ]
        }]
    }));

    let mut masters = CustomerMasters::default();
    masters.mou = MouTargetTable::new(vec![MouTarget {
        sold_to_group: "G1".to_string(),
        family: polymer_rebate_engine::domain::MaterialFamily::Pp,
        target_qty: 100.0,
        start_date: date(2025, 4, 1),
        end_date: date(2026, 3, 31),
    }]);

    let result = run(&ledger, &catalog, &masters, 2026, 1);
    assert_eq!(result.rows[0].totals.net_discount, 1.0);
    assert_eq!(result.rows[0].totals.month_credit_note, 90.0);
}

#[test]
fn test_mou_percentage_missing_target_defaults_to_zero() {
    // 无承诺目标 → 基准 0 → 仅 0 坎可达
    let ledger = SalesLedger::new(vec![sales_row("G1", MaterialGroup::Pp, (2026, 1, 15), 90.0)]);
    let catalog = catalog_from(json!({
        "X-Y Scheme": [{
            "material_groups": "PP",
            "start_date": "2026-01-01",
            "end_date": "2026-12-31",
            "basis": "MOU%",
            "discount_amount": [
                { "criteria": 80.0, "amount": 1.0 }
            ]
        }]
    }));

    let result = run(&ledger, &catalog, &CustomerMasters::default(), 2026, 1);
    assert_eq!(result.rows[0].totals.net_discount, 0.0);
}

// ==========================================
// 场景: 运费硬校验
// ==========================================

#[test]
fn test_freight_missing_distance_aborts_whole_period() {
    let mut row_a = sales_row("G1", MaterialGroup::Pp, (2026, 1, 10), 10.0);
    row_a.ship_to = Some("S001".to_string());
    let mut row_b = sales_row("G2", MaterialGroup::Pp, (2026, 1, 12), 20.0);
    row_b.ship_to = Some("S002".to_string());
    let ledger = SalesLedger::new(vec![row_a, row_b]);

    let catalog = catalog_from(json!({
        "Freight": [{
            "material_groups": "PP",
            "start_date": "2026-01-01",
            "end_date": "2026-12-31",
            "less_dist_value": 1.0,
            "high_dist_value": 2.0
        }]
    }));

    // 距离主数据为空 → 整个期间失败,错误报出全部缺失编号
    let err = DiscountOrchestrator::new()
        .apply_discount(
            &ledger,
            &catalog,
            &CustomerMasters::default(),
            Period::new(2026, 1).unwrap(),
        )
        .unwrap_err();

    match err {
        DiscountError::MissingDistance { ship_to_ids } => {
            assert_eq!(ship_to_ids, vec!["S001".to_string(), "S002".to_string()]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

// ==========================================
// 场景: 并行记录加法合并
// ==========================================

#[test]
fn test_overlapping_hidden_records_accumulate() {
    let ledger = SalesLedger::new(vec![sales_row("G1", MaterialGroup::Pp, (2026, 1, 15), 100.0)]);
    let catalog = catalog_from(json!({
        "Hidden": [
            {
                "material_groups": "PP",
                "start_date": "2026-01-01",
                "end_date": "2026-12-31",
                "basis": "Flat Discount",
                "discount_amount": [{ "criteria": 50.0, "amount": 1.0 }]
            },
            {
                "material_groups": "PP",
                "start_date": "2026-01-01",
                "end_date": "2026-06-30",
                "basis": "Flat Discount",
                "discount_amount": [{ "criteria": 50.0, "amount": 0.5 }]
            }
        ]
    }));

    let result = run(&ledger, &catalog, &CustomerMasters::default(), 2026, 1);
    // 两条记录的率相加,不覆盖
    assert_eq!(result.rows[0].totals.net_discount, 1.5);
    assert_eq!(result.rows[0].lines.len(), 2);
}

#[test]
fn test_disjoint_same_kind_records_are_order_independent() {
    // 两条互不重叠的同类型记录,目录内顺序不影响结果
    let ledger = SalesLedger::new(vec![
        sales_row("G1", MaterialGroup::Pp, (2026, 1, 15), 100.0),
        sales_row("G1", MaterialGroup::Lldpe, (2026, 1, 15), 100.0),
    ]);
    let rec_pp = json!({
        "material_groups": "PP",
        "start_date": "2026-01-01",
        "end_date": "2026-12-31",
        "discount_amount": 5.0
    });
    let rec_pe = json!({
        "material_groups": ["LLDPE", "HDPE"],
        "start_date": "2026-01-01",
        "end_date": "2026-12-31",
        "discount_amount": 3.0
    });

    let forward = catalog_from(json!({ "Cash": [rec_pp.clone(), rec_pe.clone()] }));
    let reversed = catalog_from(json!({ "Cash": [rec_pe, rec_pp] }));

    let run_a = run(&ledger, &forward, &CustomerMasters::default(), 2026, 1);
    let run_b = run(&ledger, &reversed, &CustomerMasters::default(), 2026, 1);

    for (a, b) in run_a.rows.iter().zip(&run_b.rows) {
        assert_eq!(a.totals, b.totals);
    }
    assert_eq!(run_a.rows[0].totals.net_discount, 5.0);
    assert_eq!(run_a.rows[1].totals.net_discount, 3.0);
}

#[test]
fn test_multiple_kinds_accumulate_in_fixed_order() {
    let ledger = SalesLedger::new(vec![sales_row("G1", MaterialGroup::Pp, (2026, 1, 15), 100.0)]);
    let catalog = catalog_from(json!({
        "Early Bird": [{
            "material_groups": "PP",
            "start_date": "2026-01-01",
            "end_date": "2026-12-31",
            "discount_amount": 5.0
        }],
        "Cash": [{
            "material_groups": "PP",
            "start_date": "2026-01-01",
            "end_date": "2026-12-31",
            "discount_amount": 2.0
        }],
        "MOU": [{
            "material_groups": "PP",
            "start_date": "2026-01-01",
            "end_date": "2026-12-31",
            "monthly_component": 1.0,
            "annual_component": 1.0
        }]
    }));

    let result = run(&ledger, &catalog, &CustomerMasters::default(), 2026, 1);
    let totals = result.rows[0].totals;
    // 净折扣率 = 5 + 2 + 1(月度) + 1(年度)
    assert_eq!(totals.net_discount, 9.0);
    assert_eq!(totals.month_discount, 8.0);
    assert_eq!(totals.annual_credit_note, 100.0);
    // 明细顺序遵循固定应用顺序: MOU 两条在前
    assert_eq!(
        result.rows[0].lines[0].kind,
        polymer_rebate_engine::domain::SchemeKind::Mou
    );
}

// ==========================================
// 场景: 年度坎级与价格变动
// ==========================================

#[test]
fn test_annual_quantity_slab_projection_qualifies() {
    // 财年首月(4月)销量 100,无目标 → 投影 = 100,达 100 坎
    let ledger = SalesLedger::new(vec![sales_row("G1", MaterialGroup::Pp, (2026, 4, 15), 100.0)]);
    let catalog = catalog_from(json!({
        "Annual Quantity Slab": [{
            "material_groups": "PP",
            "start_date": "2026-04-01",
            "end_date": "2027-03-31",
            "discount_amount": [{ "criteria": 100.0, "amount": 2.0 }]
        }]
    }));

    let result = run(&ledger, &catalog, &CustomerMasters::default(), 2026, 4);
    let totals = result.rows[0].totals;
    // 年度坎级只进年度桶
    assert_eq!(totals.annual_credit_note, 200.0);
    assert_eq!(totals.month_credit_note, 0.0);
    assert_eq!(totals.month_discount, 0.0);
    assert_eq!(totals.net_discount, 2.0);
}

#[test]
fn test_price_change_is_event_only() {
    let ledger = SalesLedger::new(vec![sales_row("G1", MaterialGroup::Pp, (2026, 1, 15), 100.0)]);
    let catalog = catalog_from(json!({
        "Price Change": [{
            "material_groups": "PP",
            "start_date": "2026-01-10",
            "end_date": "2026-01-10",
            "direction": "Decrease",
            "amount": 1.5
        }]
    }));

    let result = run(&ledger, &catalog, &CustomerMasters::default(), 2026, 1);
    assert_eq!(result.price_events.len(), 1);
    assert_eq!(result.price_events[0].date, date(2026, 1, 10));
    // 折扣列不受影响
    assert_eq!(result.rows[0].totals.net_discount, 0.0);
}

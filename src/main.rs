// ==========================================
// 聚合物经销返利计算系统 - CLI 主入口
// ==========================================
// 用途: 加载方案目录与输入表,运行一个期间的折扣计算,
//       打印信用凭证汇总
// ==========================================

use anyhow::{bail, Context};
use polymer_rebate_engine::catalog::CatalogStore;
use polymer_rebate_engine::config::get_default_catalog_path;
use polymer_rebate_engine::domain::{CustomerMasters, Period};
use polymer_rebate_engine::engine::DiscountOrchestrator;
use polymer_rebate_engine::importer::{DistanceImporter, MouImporter, SalesImporter};
use polymer_rebate_engine::logging;

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", polymer_rebate_engine::APP_NAME);
    tracing::info!("系统版本: {}", polymer_rebate_engine::VERSION);
    tracing::info!("==================================================");

    // ==========================================
    // 参数解析
    // ==========================================
    // 用法: polymer-rebate-engine <销售台账文件> <年> <月>
    //       [--mou <承诺表文件>] [--distance <距离主数据文件>] [--catalog <目录文档>]
    let mut sales_path: Option<String> = None;
    let mut year: Option<i32> = None;
    let mut month: Option<u32> = None;
    let mut mou_path: Option<String> = None;
    let mut distance_path: Option<String> = None;
    let mut catalog_path: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mou" => mou_path = args.next(),
            "--distance" => distance_path = args.next(),
            "--catalog" => catalog_path = args.next(),
            _ => {
                if sales_path.is_none() {
                    sales_path = Some(arg);
                } else if year.is_none() {
                    year = Some(arg.parse().context("年份参数必须是整数")?);
                } else if month.is_none() {
                    month = Some(arg.parse().context("月份参数必须是 1..=12 的整数")?);
                } else {
                    bail!("多余的参数: {}", arg);
                }
            }
        }
    }

    let (Some(sales_path), Some(year), Some(month)) = (sales_path, year, month) else {
        eprintln!(
            "用法: polymer-rebate-engine <销售台账文件> <年> <月> \
             [--mou <承诺表>] [--distance <距离主数据>] [--catalog <目录文档>]"
        );
        std::process::exit(2);
    };

    let period = Period::new(year, month).context("月份必须在 1..=12 范围内")?;

    // ==========================================
    // 加载方案目录与输入表
    // ==========================================
    let catalog_path = catalog_path.unwrap_or_else(get_default_catalog_path);
    tracing::info!("使用方案目录: {}", catalog_path);
    let catalog = CatalogStore::new(&catalog_path)
        .load_or_default()
        .context("方案目录加载失败")?;

    let ledger = SalesImporter::from_file(&sales_path).context("销售台账导入失败")?;

    let mut masters = CustomerMasters::default();
    if let Some(path) = mou_path {
        masters.mou = MouImporter::from_file(&path).context("MOU 承诺表导入失败")?;
    }
    if let Some(path) = distance_path {
        masters.distances =
            DistanceImporter::from_file(&path).context("仓库距离主数据导入失败")?;
    }

    let summary = ledger.period_summary(&period);
    tracing::info!(
        period = %period,
        records = summary.record_count,
        total_quantity = summary.total_quantity,
        "期间台账概览"
    );

    // ==========================================
    // 执行折扣计算
    // ==========================================
    let run = DiscountOrchestrator::new()
        .apply_discount(&ledger, &catalog, &masters, period)
        .context("期间折扣计算失败")?;

    // ==========================================
    // 打印结果
    // ==========================================
    println!("==================================================");
    println!("期间: {}", run.period);
    println!("记录数: {}", run.summary.record_count);
    println!("总量: {:.3}", run.summary.total_quantity);
    println!("月度凭证金额: {:.2}", run.summary.month_credit_note);
    println!("年度凭证金额: {:.2}", run.summary.annual_credit_note);
    println!("==================================================");

    if !run.applied.is_empty() {
        println!("方案命中:");
        for line in &run.applied {
            println!("  {}", line);
        }
    }
    for event in &run.price_events {
        println!("价格变动: {} {} {}", event.date, event.direction, event.amount);
    }

    Ok(())
}

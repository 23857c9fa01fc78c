// 演示用方案目录生成器
//
// 用法:
//   cargo run --bin seed_demo_catalog -- [目标路径]
//
// 不传路径时写入默认目录文档位置。
// 覆盖已有文档前会打印提示,便于手工确认后重跑。

use chrono::NaiveDate;
use polymer_rebate_engine::catalog::CatalogStore;
use polymer_rebate_engine::config::get_default_catalog_path;
use polymer_rebate_engine::domain::{
    Basis, MaterialGroup, PriceDirection, SchemeCatalog, SchemeKind, SchemeRecord, SchemeTerms,
    Slab,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    polymer_rebate_engine::logging::init();

    let path = std::env::args()
        .skip(1)
        .find(|s| !s.is_empty())
        .unwrap_or_else(get_default_catalog_path);

    let store = CatalogStore::new(&path);
    if store.path().exists() {
        println!("提示: 目标文档已存在,将被整份替换: {}", path);
    }

    let catalog = build_demo_catalog()?;
    store.save(&catalog)?;

    println!("演示目录已写入: {} ({} 条记录)", path, catalog.len());
    Ok(())
}

// 覆盖全部方案类型各一条,有效期取一个完整财年
fn build_demo_catalog() -> Result<SchemeCatalog, Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2027, 3, 31).unwrap();
    let all_groups = vec![
        MaterialGroup::Pp,
        MaterialGroup::Lldpe,
        MaterialGroup::Hdpe,
    ];
    let pe_groups = vec![MaterialGroup::Lldpe, MaterialGroup::Hdpe];

    let mut catalog = SchemeCatalog::new();

    catalog.append(SchemeRecord::new(
        SchemeKind::Mou,
        all_groups.clone(),
        start,
        end,
        SchemeTerms::Mou {
            monthly_component: 2.0,
            annual_component: 3.0,
        },
    )?);

    catalog.append(SchemeRecord::new(
        SchemeKind::EarlyBird,
        all_groups.clone(),
        start,
        end,
        SchemeTerms::Flat {
            discount_amount: 5.0,
        },
    )?);

    catalog.append(SchemeRecord::new(
        SchemeKind::PriceProtection,
        vec![MaterialGroup::Pp],
        start,
        end,
        SchemeTerms::Flat {
            discount_amount: 1.5,
        },
    )?);

    catalog.append(SchemeRecord::new(
        SchemeKind::Cash,
        all_groups.clone(),
        start,
        end,
        SchemeTerms::Flat {
            discount_amount: 2.5,
        },
    )?);

    catalog.append(SchemeRecord::new(
        SchemeKind::Freight,
        all_groups.clone(),
        start,
        end,
        SchemeTerms::Freight {
            less_dist_value: 1.0,
            high_dist_value: 2.0,
        },
    )?);

    catalog.append(SchemeRecord::new(
        SchemeKind::XyScheme,
        vec![MaterialGroup::Pp],
        start,
        end,
        SchemeTerms::BasisSlab {
            basis: Basis::MouPct,
            slabs: vec![
                Slab {
                    criteria: 0.0,
                    amount: 0.0,
                },
                Slab {
                    criteria: 80.0,
                    amount: 1.0,
                },
                Slab {
                    criteria: 100.0,
                    amount: 2.0,
                },
            ],
            scheme_months: vec![],
        },
    )?);

    catalog.append(SchemeRecord::new(
        SchemeKind::Hidden,
        pe_groups.clone(),
        start,
        end,
        SchemeTerms::BasisSlab {
            basis: Basis::NonZeroMonthsAvgPct,
            slabs: vec![
                Slab {
                    criteria: 90.0,
                    amount: 0.5,
                },
                Slab {
                    criteria: 110.0,
                    amount: 1.5,
                },
            ],
            scheme_months: vec![4, 5, 6],
        },
    )?);

    catalog.append(SchemeRecord::new(
        SchemeKind::QuantitySlab,
        pe_groups,
        start,
        end,
        SchemeTerms::QuantitySlab {
            slabs: vec![
                Slab {
                    criteria: 100.0,
                    amount: 1.0,
                },
                Slab {
                    criteria: 500.0,
                    amount: 2.0,
                },
            ],
        },
    )?);

    catalog.append(SchemeRecord::new(
        SchemeKind::AnnualQuantitySlab,
        all_groups,
        start,
        end,
        SchemeTerms::AnnualQuantitySlab {
            slabs: vec![
                Slab {
                    criteria: 1000.0,
                    amount: 1.0,
                },
                Slab {
                    criteria: 5000.0,
                    amount: 2.5,
                },
            ],
        },
    )?);

    catalog.append(SchemeRecord::new(
        SchemeKind::PriceChange,
        vec![MaterialGroup::Pp],
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
        SchemeTerms::PriceChange {
            direction: PriceDirection::Increase,
            amount: 3.0,
        },
    )?);

    Ok(catalog)
}

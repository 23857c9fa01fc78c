// ==========================================
// 聚合物经销返利计算系统 - 期间目录过滤器
// ==========================================
// 职责: 选出与目标年月有效期重叠的方案记录
// 规则: 双闭区间重叠判定 start ≤ 月末 AND end ≥ 月初
// ==========================================

use crate::domain::period::Period;
use crate::domain::scheme::SchemeCatalog;

// ==========================================
// CatalogFilter - 纯函数工具类
// ==========================================
pub struct CatalogFilter;

impl CatalogFilter {
    /// 目标月份的活动方案子目录（空类型键被剔除）
    pub fn for_month(catalog: &SchemeCatalog, period: &Period) -> SchemeCatalog {
        catalog.filter_by_range(period.first_day(), period.last_day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scheme::{SchemeRecord, SchemeTerms};
    use crate::domain::types::{MaterialGroup, SchemeKind};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn flat(start: (i32, u32, u32), end: (i32, u32, u32)) -> SchemeRecord {
        SchemeRecord::new(
            SchemeKind::EarlyBird,
            vec![MaterialGroup::Pp],
            date(start.0, start.1, start.2),
            date(end.0, end.1, end.2),
            SchemeTerms::Flat {
                discount_amount: 5.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_overlap_retained() {
        let mut catalog = SchemeCatalog::new();
        catalog.append(flat((2026, 1, 1), (2026, 3, 31)));

        let feb = Period::new(2026, 2).unwrap();
        assert_eq!(CatalogFilter::for_month(&catalog, &feb).len(), 1);
    }

    #[test]
    fn test_partial_overlap_retained() {
        // 有效期只覆盖月内几天也算活动
        let mut catalog = SchemeCatalog::new();
        catalog.append(flat((2026, 2, 25), (2026, 3, 5)));

        let feb = Period::new(2026, 2).unwrap();
        assert_eq!(CatalogFilter::for_month(&catalog, &feb).len(), 1);
        let mar = Period::new(2026, 3).unwrap();
        assert_eq!(CatalogFilter::for_month(&catalog, &mar).len(), 1);
        let apr = Period::new(2026, 4).unwrap();
        assert!(CatalogFilter::for_month(&catalog, &apr).is_empty());
    }

    #[test]
    fn test_empty_kind_dropped() {
        let mut catalog = SchemeCatalog::new();
        catalog.append(flat((2026, 1, 1), (2026, 1, 31)));

        let jun = Period::new(2026, 6).unwrap();
        let filtered = CatalogFilter::for_month(&catalog, &jun);
        assert!(filtered.kinds().is_empty());
    }
}

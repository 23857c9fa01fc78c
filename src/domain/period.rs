// ==========================================
// 聚合物经销返利计算系统 - 计算期间与财年日历
// ==========================================
// 规则: 财年从 4 月起算,财年 F 覆盖 F 年 4 月至 F+1 年 3 月
// 用途: 月度窗口切片、历史月回溯、年度投影的剩余月数
// ==========================================

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 财年起始月份（4 月）
pub const FISCAL_START_MONTH: u32 = 4;

// ==========================================
// Period - 计算期间（年 + 月）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32, // 1..=12
}

impl Period {
    /// 创建期间（月份非法时返回 None）
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Period { year, month })
        } else {
            None
        }
    }

    /// 月初日期
    pub fn first_day(&self) -> NaiveDate {
        // month 在构造时校验过
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(self.year, 1, 1).unwrap())
    }

    /// 月末日期（下月 1 日减 1 天）
    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(next_year, 1, 1).unwrap())
            - Duration::days(1)
    }

    /// 日期是否落在本期间内
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// 所属财年
    ///
    /// # 规则
    /// - 月份 ≥ 4 → 财年 = 日历年
    /// - 月份 < 4 → 财年 = 日历年 - 1
    pub fn fiscal_year(&self) -> i32 {
        if self.month >= FISCAL_START_MONTH {
            self.year
        } else {
            self.year - 1
        }
    }

    /// 财年内的月序（4 月=1, 5 月=2, ..., 3 月=12）
    pub fn fiscal_month_index(&self) -> u32 {
        if self.month >= FISCAL_START_MONTH {
            self.month - FISCAL_START_MONTH + 1
        } else {
            self.month + 12 - FISCAL_START_MONTH + 1
        }
    }

    /// 财年内本期间之后剩余的月数
    pub fn remaining_fiscal_months(&self) -> u32 {
        12 - self.fiscal_month_index()
    }

    /// 所属财年的起始日（财年 F 的 4 月 1 日）
    pub fn fiscal_year_start(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.fiscal_year(), FISCAL_START_MONTH, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(self.fiscal_year(), 1, 1).unwrap())
    }

    /// 同财年内某月份对应的日历年
    ///
    /// # 规则
    /// 财年 F 内: 月份 ≥ 4 → F, 否则 → F + 1
    pub fn calendar_year_of_fiscal_month(&self, month: u32) -> i32 {
        if month >= FISCAL_START_MONTH {
            self.fiscal_year()
        } else {
            self.fiscal_year() + 1
        }
    }

    /// 日期所属的期间
    pub fn of_date(date: NaiveDate) -> Self {
        Period {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

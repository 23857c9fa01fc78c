// ==========================================
// 聚合物经销返利计算系统 - 引擎层
// ==========================================
// 职责: 折扣计算规则,纯同步内存批处理
// 红线: 引擎不做 I/O,全部输入为注入的物化表;
//       校验错误中止整个期间,不产出部分结果
// ==========================================

pub mod aggregation;
pub mod catalog_filter;
pub mod eligibility;
pub mod error;
pub mod evaluator;
pub mod orchestrator;
pub mod slab;

// 重导出核心引擎
pub use aggregation::{AggregationBases, BaseKey, ANNUAL_PROJECTION_BUFFER};
pub use catalog_filter::CatalogFilter;
pub use eligibility::EligibilityFilter;
pub use error::{DiscountError, DiscountResult};
pub use evaluator::{
    CreditBucket, PriceChangeEvent, SchemeEvaluator, SchemeLine, FREIGHT_NEAR_DISTANCE_KM,
};
pub use orchestrator::{
    DiscountOrchestrator, DiscountRow, DiscountRun, DiscountTotals, RunSummary,
};
pub use slab::SlabResolver;

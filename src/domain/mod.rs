// ==========================================
// 聚合物经销返利计算系统 - 领域层
// ==========================================
// 职责: 实体与类型定义,边界解析
// 红线: 领域层无 I/O,目录文档在此一次性解析为类型化记录
// ==========================================

pub mod masters;
pub mod period;
pub mod sales;
pub mod scheme;
pub mod types;

// 重导出核心实体
pub use masters::{CustomerMasters, DistanceMaster, MouTarget, MouTargetTable};
pub use period::{Period, FISCAL_START_MONTH};
pub use sales::{PeriodSummary, SalesLedger, SalesRow};
pub use scheme::{
    CatalogEditError, SchemeCatalog, SchemeParseError, SchemeRecord, SchemeTerms, Slab,
};
pub use types::{Basis, MaterialFamily, MaterialGroup, PriceDirection, SchemeKind};

// ==========================================
// 聚合物经销返利计算系统 - 核心库
// ==========================================
// 技术栈: Rust + JSON 方案目录
// 系统定位: 决策支持系统 (月度信用凭证计算核心)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 折扣计算规则
pub mod engine;

// 目录层 - 方案目录存储
pub mod catalog;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Basis, MaterialFamily, MaterialGroup, PriceDirection, SchemeKind};

// 领域实体
pub use domain::{
    CustomerMasters, DistanceMaster, MouTarget, MouTargetTable, Period, SalesLedger, SalesRow,
    SchemeCatalog, SchemeRecord, SchemeTerms, Slab,
};

// 引擎
pub use engine::{
    AggregationBases, CatalogFilter, DiscountError, DiscountOrchestrator, DiscountRow,
    DiscountRun, DiscountTotals, EligibilityFilter, SchemeEvaluator, SlabResolver,
};

// 目录存储
pub use catalog::{CatalogError, CatalogStore};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "聚合物经销返利计算系统";

// 方案目录文档版本
pub const CATALOG_VERSION: &str = "v0.1";

// ==========================================
// 预编译检查
// ==========================================

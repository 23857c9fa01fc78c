// ==========================================
// 聚合物经销返利计算系统 - 目录层
// ==========================================
// 职责: 方案目录文档的持久化边界
// ==========================================

pub mod store;

pub use store::{CatalogError, CatalogResult, CatalogStore};

// ==========================================
// 聚合物经销返利计算系统 - 导入层
// ==========================================
// 职责: 外部报表 → 领域表（薄封装,无算法内容）
// 管道: 文件解析 → 字段映射/清洗 → 领域实体
// ==========================================

pub mod error;
pub mod file_parser;
pub mod masters_importer;
pub mod sales_importer;

// 重导出导入器
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, RawRecord, UniversalFileParser};
pub use masters_importer::{DistanceImporter, MouImporter};
pub use sales_importer::SalesImporter;

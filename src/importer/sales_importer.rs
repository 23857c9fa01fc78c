// ==========================================
// 聚合物经销返利计算系统 - 销售台账导入
// ==========================================
// 职责: 原始字符串记录 → SalesRow（字段映射 + 清洗）
// 清洗规则: ID 列去尾部 ".0";净值去千分位;
//           物料描述去 "HP DURAPOL " 前缀与 "-MS" 后缀
// ==========================================

use crate::domain::sales::{SalesLedger, SalesRow};
use crate::domain::types::MaterialGroup;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, UniversalFileParser};
use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

// ===== 报表列名（线上契约）=====
const COL_SOLD_TO_GROUP: &str = "Sold-to Group";
const COL_SOLD_TO_NAME: &str = "Sold-to-Party Name";
const COL_SHIP_TO: &str = "Ship-to Party";
const COL_MATERIAL_GROUP: &str = "Material Group";
const COL_MATERIAL_DESC: &str = "Material Description";
const COL_BILLING_DATE: &str = "Billing Date";
const COL_QUANTITY: &str = "Quantity";
const COL_NET_VALUE: &str = "Net Value";

/// 物料描述的厂牌前缀（清洗时剔除）
const DESC_BRAND_PREFIX: &str = "HP DURAPOL ";
/// 物料描述的包装后缀（清洗时剔除）
const DESC_PACK_SUFFIX: &str = "-MS";

// ==========================================
// SalesImporter - 销售台账导入器
// ==========================================
pub struct SalesImporter;

impl SalesImporter {
    /// 从报表文件导入台账
    pub fn from_file<P: AsRef<Path>>(path: P) -> ImportResult<SalesLedger> {
        let records = UniversalFileParser.parse(path)?;
        Self::from_records(&records)
    }

    /// 从原始记录导入台账（行号从 1 计,用于错误定位）
    pub fn from_records(records: &[RawRecord]) -> ImportResult<SalesLedger> {
        let mut rows = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            rows.push(Self::map_row(idx + 1, record)?);
        }

        info!(rows = rows.len(), "销售台账导入完成");
        Ok(SalesLedger::new(rows))
    }

    fn map_row(row_no: usize, record: &RawRecord) -> ImportResult<SalesRow> {
        let sold_to_group = clean_id(req_field(row_no, record, COL_SOLD_TO_GROUP)?);
        let sold_to_name = req_field(row_no, record, COL_SOLD_TO_NAME)
            .map(|s| s.to_string())
            .unwrap_or_default();

        let group_raw = req_field(row_no, record, COL_MATERIAL_GROUP)?;
        let material_group = MaterialGroup::from_wire(group_raw).ok_or_else(|| {
            ImportError::FieldMappingError {
                row: row_no,
                message: format!("未知物料分组: {}", group_raw),
            }
        })?;

        let billing_date = parse_date(row_no, COL_BILLING_DATE, req_field(row_no, record, COL_BILLING_DATE)?)?;

        let quantity = parse_number(row_no, COL_QUANTITY, req_field(row_no, record, COL_QUANTITY)?)?;
        if quantity < 0.0 {
            return Err(ImportError::ValueRangeError {
                row: row_no,
                field: COL_QUANTITY.to_string(),
                value: quantity,
                min: 0.0,
                max: f64::MAX,
            });
        }

        let net_value = match opt_field(record, COL_NET_VALUE) {
            Some(v) => Some(parse_number(row_no, COL_NET_VALUE, v)?),
            None => None,
        };

        let ship_to = opt_field(record, COL_SHIP_TO).map(clean_id);
        let material_description =
            opt_field(record, COL_MATERIAL_DESC).map(clean_material_description);

        Ok(SalesRow {
            sold_to_group,
            sold_to_name,
            ship_to,
            material_group,
            material_description,
            billing_date,
            quantity,
            net_value,
        })
    }
}

// ==========================================
// 字段读取与清洗
// ==========================================

fn req_field<'a>(row_no: usize, record: &'a RawRecord, field: &str) -> ImportResult<&'a str> {
    record
        .get(field)
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ImportError::FieldMappingError {
            row: row_no,
            message: format!("缺少字段 {}", field),
        })
}

fn opt_field<'a>(record: &'a RawRecord, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
}

/// ID 列归一化: 去空白 + 去数值化产生的尾部 ".0"
pub(crate) fn clean_id(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_suffix(".0").unwrap_or(trimmed).to_string()
}

/// 数值解析: 容忍千分位分隔符
pub(crate) fn parse_number(row_no: usize, field: &str, raw: &str) -> ImportResult<f64> {
    let cleaned = raw.trim().replace(',', "");
    cleaned
        .parse::<f64>()
        .map_err(|_| ImportError::TypeConversionError {
            row: row_no,
            field: field.to_string(),
            message: format!("无法解析数值: {}", raw),
        })
}

/// 日期解析: 先试 ISO,再试日前格式
pub(crate) fn parse_date(row_no: usize, field: &str, raw: &str) -> ImportResult<NaiveDate> {
    let trimmed = raw.trim();
    for fmt in ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date);
        }
    }
    Err(ImportError::DateFormatError {
        row: row_no,
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// 物料描述清洗: 去厂牌前缀与包装后缀
fn clean_material_description(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_prefix = trimmed.strip_prefix(DESC_BRAND_PREFIX).unwrap_or(trimmed);
    without_prefix
        .strip_suffix(DESC_PACK_SUFFIX)
        .unwrap_or(without_prefix)
        .to_string()
}

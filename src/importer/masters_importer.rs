// ==========================================
// 聚合物经销返利计算系统 - 客户主数据导入
// ==========================================
// MOU 承诺表: 录入面为宽表（每族一列目标）,导入时摊平为长表
// 仓库距离主数据: (送达方, 距离) 两列
// ==========================================

use crate::domain::masters::{DistanceMaster, MouTarget, MouTargetTable};
use crate::domain::types::MaterialFamily;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, UniversalFileParser};
use crate::importer::sales_importer::{clean_id, parse_date, parse_number};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

// ===== MOU 宽表列名 =====
const COL_SOLD_TO_GROUP: &str = "Sold-to Group";
const COL_PP_TARGET: &str = "PP Target";
const COL_PE_TARGET: &str = "PE Target";
const COL_START_DATE: &str = "Start Date";
const COL_END_DATE: &str = "End Date";

// ===== 距离主数据列名 =====
const COL_SHIP_TO: &str = "Ship-to Party";
const COL_DISTANCE: &str = "Warehouse Distance";

// ==========================================
// MouImporter - MOU 承诺表导入器
// ==========================================
pub struct MouImporter;

impl MouImporter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> ImportResult<MouTargetTable> {
        let records = UniversalFileParser.parse(path)?;
        Self::from_records(&records)
    }

    /// 宽表摊平为长表: 每行按族列展开,空目标列跳过
    pub fn from_records(records: &[RawRecord]) -> ImportResult<MouTargetTable> {
        let family_columns = [
            (MaterialFamily::Pp, COL_PP_TARGET),
            (MaterialFamily::Pe, COL_PE_TARGET),
        ];

        let mut targets = Vec::new();
        for (idx, record) in records.iter().enumerate() {
            let row_no = idx + 1;
            let group = clean_id(req(row_no, record, COL_SOLD_TO_GROUP)?);
            let start_date = parse_date(row_no, COL_START_DATE, req(row_no, record, COL_START_DATE)?)?;
            let end_date = parse_date(row_no, COL_END_DATE, req(row_no, record, COL_END_DATE)?)?;

            for (family, column) in family_columns {
                let Some(raw) = record.get(column).map(|s| s.as_str()).filter(|s| !s.is_empty())
                else {
                    continue;
                };
                let target_qty = parse_number(row_no, column, raw)?;
                targets.push(MouTarget {
                    sold_to_group: group.clone(),
                    family,
                    target_qty,
                    start_date,
                    end_date,
                });
            }
        }

        info!(targets = targets.len(), "MOU 承诺表导入完成");
        Ok(MouTargetTable::new(targets))
    }
}

// ==========================================
// DistanceImporter - 仓库距离主数据导入器
// ==========================================
pub struct DistanceImporter;

impl DistanceImporter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> ImportResult<DistanceMaster> {
        let records = UniversalFileParser.parse(path)?;
        Self::from_records(&records)
    }

    pub fn from_records(records: &[RawRecord]) -> ImportResult<DistanceMaster> {
        let mut distances = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            let row_no = idx + 1;
            let ship_to = clean_id(req(row_no, record, COL_SHIP_TO)?);
            let distance = parse_number(row_no, COL_DISTANCE, req(row_no, record, COL_DISTANCE)?)?;
            distances.insert(ship_to, distance);
        }

        info!(entries = distances.len(), "仓库距离主数据导入完成");
        Ok(DistanceMaster::new(distances))
    }
}

fn req<'a>(row_no: usize, record: &'a RawRecord, field: &str) -> ImportResult<&'a str> {
    record
        .get(field)
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ImportError::FieldMappingError {
            row: row_no,
            message: format!("缺少字段 {}", field),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_mou_wide_to_long() {
        let rec = record(&[
            (COL_SOLD_TO_GROUP, "1001.0"),
            (COL_PP_TARGET, "500"),
            (COL_PE_TARGET, "300"),
            (COL_START_DATE, "2026-04-01"),
            (COL_END_DATE, "2027-03-31"),
        ]);
        let table = MouImporter::from_records(&[rec]).unwrap();
        assert_eq!(table.targets.len(), 2);
        assert_eq!(table.targets[0].sold_to_group, "1001");
        assert_eq!(table.targets[0].family, MaterialFamily::Pp);
        assert_eq!(table.targets[0].target_qty, 500.0);
        assert_eq!(table.targets[1].family, MaterialFamily::Pe);
    }

    #[test]
    fn test_mou_skips_empty_family_column() {
        let rec = record(&[
            (COL_SOLD_TO_GROUP, "1001"),
            (COL_PP_TARGET, "500"),
            (COL_START_DATE, "2026-04-01"),
            (COL_END_DATE, "2027-03-31"),
        ]);
        let table = MouImporter::from_records(&[rec]).unwrap();
        assert_eq!(table.targets.len(), 1);
        assert_eq!(table.targets[0].family, MaterialFamily::Pp);
    }

    #[test]
    fn test_mou_missing_group_is_error() {
        let rec = record(&[
            (COL_PP_TARGET, "500"),
            (COL_START_DATE, "2026-04-01"),
            (COL_END_DATE, "2027-03-31"),
        ]);
        let err = MouImporter::from_records(&[rec]).unwrap_err();
        assert!(matches!(err, ImportError::FieldMappingError { row: 1, .. }));
    }

    #[test]
    fn test_distance_master_import() {
        let recs = vec![
            record(&[(COL_SHIP_TO, "S001.0"), (COL_DISTANCE, "80")]),
            record(&[(COL_SHIP_TO, "S002"), (COL_DISTANCE, "250.5")]),
        ];
        let master = DistanceImporter::from_records(&recs).unwrap();
        assert_eq!(master.get("S001"), Some(80.0));
        assert_eq!(master.get("S002"), Some(250.5));
    }
}

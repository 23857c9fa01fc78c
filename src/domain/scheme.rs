// ==========================================
// 聚合物经销返利计算系统 - 方案目录领域模型
// ==========================================
// 红线: 目录文档在边界处一次性解析为带标签的条款变体,
//       引擎内部不得出现按键名探测的动态分支
// 线上契约: discount_type / material_groups / start_date /
//           end_date + 各类型专有字段（见解析函数）
// ==========================================

use crate::domain::types::{Basis, MaterialGroup, PriceDirection, SchemeKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// 目录日期的存储格式（ISO-8601）
const DATE_FMT: &str = "%Y-%m-%d";

// ==========================================
// 方案解析错误
// ==========================================
#[derive(Error, Debug)]
pub enum SchemeParseError {
    // ===== 文档结构错误 =====
    #[error("目录文档必须是 JSON 对象")]
    DocumentNotObject,

    #[error("方案记录必须是 JSON 对象 (类型 {kind})")]
    RecordNotObject { kind: SchemeKind },

    #[error("未知方案类型: {0}")]
    UnknownKind(String),

    // ===== 字段错误 =====
    #[error("缺少必填字段 (类型 {kind}, 字段 {field})")]
    MissingField { kind: SchemeKind, field: String },

    #[error("字段格式错误 (字段 {field}): {message}")]
    InvalidField { field: String, message: String },

    #[error("日期格式错误 (字段 {field}): 期望 YYYY-MM-DD，实际 {value}")]
    InvalidDate { field: String, value: String },

    #[error("有效期起止颠倒: {start} > {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    // ===== 枚举标签错误 =====
    #[error("未知物料分组: {0}")]
    UnknownMaterialGroup(String),

    #[error("未知聚合基准标签: {0}")]
    UnknownBasis(String),

    #[error("未知价格变动方向: {0}")]
    UnknownDirection(String),

    // ===== 一致性错误 =====
    #[error("条款与方案类型不匹配 (类型 {kind})")]
    TermsKindMismatch { kind: SchemeKind },
}

// ==========================================
// 目录编辑错误（CRUD 索引寻址）
// ==========================================
#[derive(Error, Debug)]
pub enum CatalogEditError {
    #[error("方案记录不存在: {kind} #{index}")]
    NoSuchRecord { kind: SchemeKind, index: usize },
}

// ==========================================
// Slab - 坎级（阈值 → 折扣率）
// ==========================================
// 约定: 录入面保证 criteria 非降序,解析不依赖顺序
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slab {
    pub criteria: f64, // 坎级阈值
    pub amount: f64,   // 达坎折扣率
}

// ==========================================
// SchemeTerms - 方案条款（带标签变体）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchemeTerms {
    /// MOU 双组件: 月度组件按月结算,年度组件按年结算
    Mou {
        monthly_component: f64,
        annual_component: f64,
    },
    /// 平率条款（Early Bird / Price Protection / Cash 共用）
    Flat { discount_amount: f64 },
    /// 运费条款: 距离 ≤100 公里取低档,否则取高档
    Freight {
        less_dist_value: f64,
        high_dist_value: f64,
    },
    /// 数量坎级: 按当期销量解析坎级
    QuantitySlab { slabs: Vec<Slab> },
    /// 年度数量坎级: 按年度投影销量解析坎级,只进年度凭证
    AnnualQuantitySlab { slabs: Vec<Slab> },
    /// 基准坎级（Hidden / X-Y Scheme 共用）: 按记录选择聚合基准
    BasisSlab {
        basis: Basis,
        slabs: Vec<Slab>,
        scheme_months: Vec<u32>, // 仅 Non-Zero Months Avg% 基准使用
    },
    /// 价格变动: 仅记录事件,不产生折扣
    PriceChange {
        direction: PriceDirection,
        amount: f64,
    },
}

impl SchemeTerms {
    /// 条款变体是否与方案类型匹配
    pub fn matches_kind(&self, kind: SchemeKind) -> bool {
        matches!(
            (self, kind),
            (SchemeTerms::Mou { .. }, SchemeKind::Mou)
                | (SchemeTerms::Flat { .. }, SchemeKind::EarlyBird)
                | (SchemeTerms::Flat { .. }, SchemeKind::PriceProtection)
                | (SchemeTerms::Flat { .. }, SchemeKind::Cash)
                | (SchemeTerms::Freight { .. }, SchemeKind::Freight)
                | (SchemeTerms::QuantitySlab { .. }, SchemeKind::QuantitySlab)
                | (
                    SchemeTerms::AnnualQuantitySlab { .. },
                    SchemeKind::AnnualQuantitySlab
                )
                | (SchemeTerms::BasisSlab { .. }, SchemeKind::Hidden)
                | (SchemeTerms::BasisSlab { .. }, SchemeKind::XyScheme)
                | (SchemeTerms::PriceChange { .. }, SchemeKind::PriceChange)
        )
    }
}

// ==========================================
// SchemeRecord - 方案记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeRecord {
    pub kind: SchemeKind,                  // 方案类型
    pub material_groups: Vec<MaterialGroup>, // 适用物料分组（线上接受单值或列表）
    pub start_date: NaiveDate,             // 有效期起（含）
    pub end_date: NaiveDate,               // 有效期止（含）
    pub terms: SchemeTerms,                // 类型专有条款
}

impl SchemeRecord {
    /// 构造并校验（有效期顺序 + 条款/类型一致性）
    pub fn new(
        kind: SchemeKind,
        material_groups: Vec<MaterialGroup>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        terms: SchemeTerms,
    ) -> Result<Self, SchemeParseError> {
        if start_date > end_date {
            return Err(SchemeParseError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        if !terms.matches_kind(kind) {
            return Err(SchemeParseError::TermsKindMismatch { kind });
        }
        Ok(SchemeRecord {
            kind,
            material_groups,
            start_date,
            end_date,
            terms,
        })
    }

    /// 适用物料分组集合（资格判定用）
    pub fn material_group_set(&self) -> HashSet<MaterialGroup> {
        self.material_groups.iter().copied().collect()
    }

    /// 有效期是否与 [start, end] 重叠（双闭区间）
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }

    /// 维护页选择列表的记录标签
    pub fn label(&self) -> String {
        format!("{} → {}", self.start_date, self.end_date)
    }

    /// 从目录文档的单条记录解析
    pub fn from_wire(kind: SchemeKind, value: &Value) -> Result<Self, SchemeParseError> {
        let obj = value
            .as_object()
            .ok_or(SchemeParseError::RecordNotObject { kind })?;

        let material_groups = parse_material_groups(kind, obj)?;
        let start_date = req_date(kind, obj, "start_date")?;
        let end_date = req_date(kind, obj, "end_date")?;

        let terms = match kind {
            SchemeKind::Mou => SchemeTerms::Mou {
                monthly_component: opt_f64(obj, "monthly_component")?,
                annual_component: opt_f64(obj, "annual_component")?,
            },
            SchemeKind::EarlyBird | SchemeKind::PriceProtection | SchemeKind::Cash => {
                SchemeTerms::Flat {
                    discount_amount: opt_f64(obj, "discount_amount")?,
                }
            }
            SchemeKind::Freight => SchemeTerms::Freight {
                less_dist_value: opt_f64(obj, "less_dist_value")?,
                high_dist_value: opt_f64(obj, "high_dist_value")?,
            },
            SchemeKind::QuantitySlab => SchemeTerms::QuantitySlab {
                slabs: parse_slabs(kind, obj)?,
            },
            SchemeKind::AnnualQuantitySlab => SchemeTerms::AnnualQuantitySlab {
                slabs: parse_slabs(kind, obj)?,
            },
            SchemeKind::Hidden | SchemeKind::XyScheme => {
                let basis_label = req_str(kind, obj, "basis")?;
                let basis = Basis::from_wire(basis_label)
                    .ok_or_else(|| SchemeParseError::UnknownBasis(basis_label.to_string()))?;
                SchemeTerms::BasisSlab {
                    basis,
                    slabs: parse_slabs(kind, obj)?,
                    scheme_months: parse_scheme_months(obj)?,
                }
            }
            SchemeKind::PriceChange => {
                let direction_label = req_str(kind, obj, "direction")?;
                let direction = PriceDirection::from_wire(direction_label).ok_or_else(|| {
                    SchemeParseError::UnknownDirection(direction_label.to_string())
                })?;
                SchemeTerms::PriceChange {
                    direction,
                    amount: opt_f64(obj, "amount")?,
                }
            }
        };

        SchemeRecord::new(kind, material_groups, start_date, end_date, terms)
    }

    /// 序列化为目录文档的单条记录
    pub fn to_wire(&self) -> Value {
        let mut obj = Map::new();
        obj.insert(
            "material_groups".to_string(),
            Value::Array(
                self.material_groups
                    .iter()
                    .map(|g| Value::String(g.wire_name().to_string()))
                    .collect(),
            ),
        );
        obj.insert(
            "start_date".to_string(),
            Value::String(self.start_date.format(DATE_FMT).to_string()),
        );
        obj.insert(
            "end_date".to_string(),
            Value::String(self.end_date.format(DATE_FMT).to_string()),
        );

        match &self.terms {
            SchemeTerms::Mou {
                monthly_component,
                annual_component,
            } => {
                obj.insert("monthly_component".to_string(), json!(monthly_component));
                obj.insert("annual_component".to_string(), json!(annual_component));
            }
            SchemeTerms::Flat { discount_amount } => {
                obj.insert("discount_amount".to_string(), json!(discount_amount));
            }
            SchemeTerms::Freight {
                less_dist_value,
                high_dist_value,
            } => {
                obj.insert("less_dist_value".to_string(), json!(less_dist_value));
                obj.insert("high_dist_value".to_string(), json!(high_dist_value));
            }
            SchemeTerms::QuantitySlab { slabs }
            | SchemeTerms::AnnualQuantitySlab { slabs } => {
                obj.insert("discount_amount".to_string(), slabs_to_wire(slabs));
            }
            SchemeTerms::BasisSlab {
                basis,
                slabs,
                scheme_months,
            } => {
                obj.insert(
                    "basis".to_string(),
                    Value::String(basis.wire_name().to_string()),
                );
                obj.insert("discount_amount".to_string(), slabs_to_wire(slabs));
                obj.insert("scheme_months".to_string(), json!(scheme_months));
            }
            SchemeTerms::PriceChange { direction, amount } => {
                obj.insert(
                    "direction".to_string(),
                    Value::String(direction.wire_name().to_string()),
                );
                obj.insert("amount".to_string(), json!(amount));
            }
        }

        Value::Object(obj)
    }
}

// ==========================================
// 解析辅助函数
// ==========================================

/// material_groups 接受单个字符串或字符串列表,统一归一化
fn parse_material_groups(
    kind: SchemeKind,
    obj: &Map<String, Value>,
) -> Result<Vec<MaterialGroup>, SchemeParseError> {
    let value = obj
        .get("material_groups")
        .ok_or_else(|| SchemeParseError::MissingField {
            kind,
            field: "material_groups".to_string(),
        })?;

    let raw: Vec<&str> = match value {
        Value::String(s) => vec![s.as_str()],
        Value::Array(items) => items
            .iter()
            .map(|v| {
                v.as_str().ok_or_else(|| SchemeParseError::InvalidField {
                    field: "material_groups".to_string(),
                    message: "列表元素必须是字符串".to_string(),
                })
            })
            .collect::<Result<_, _>>()?,
        _ => {
            return Err(SchemeParseError::InvalidField {
                field: "material_groups".to_string(),
                message: "期望字符串或字符串列表".to_string(),
            })
        }
    };

    let mut groups = Vec::new();
    for s in raw {
        let group = MaterialGroup::from_wire(s)
            .ok_or_else(|| SchemeParseError::UnknownMaterialGroup(s.to_string()))?;
        if !groups.contains(&group) {
            groups.push(group);
        }
    }
    Ok(groups)
}

fn req_str<'a>(
    kind: SchemeKind,
    obj: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a str, SchemeParseError> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| SchemeParseError::MissingField {
            kind,
            field: field.to_string(),
        })
}

fn req_date(
    kind: SchemeKind,
    obj: &Map<String, Value>,
    field: &str,
) -> Result<NaiveDate, SchemeParseError> {
    let s = req_str(kind, obj, field)?;
    NaiveDate::parse_from_str(s.trim(), DATE_FMT).map_err(|_| SchemeParseError::InvalidDate {
        field: field.to_string(),
        value: s.to_string(),
    })
}

/// 可选数值字段,缺失按 0 处理（恢复性默认策略）
fn opt_f64(obj: &Map<String, Value>, field: &str) -> Result<f64, SchemeParseError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(0.0),
        Some(v) => v.as_f64().ok_or_else(|| SchemeParseError::InvalidField {
            field: field.to_string(),
            message: "期望数值".to_string(),
        }),
    }
}

/// 坎级列表: discount_amount 必须是 {criteria, amount} 对象的数组
fn parse_slabs(kind: SchemeKind, obj: &Map<String, Value>) -> Result<Vec<Slab>, SchemeParseError> {
    let value = obj
        .get("discount_amount")
        .ok_or_else(|| SchemeParseError::MissingField {
            kind,
            field: "discount_amount".to_string(),
        })?;

    let items = value
        .as_array()
        .ok_or_else(|| SchemeParseError::InvalidField {
            field: "discount_amount".to_string(),
            message: "坎级方案期望 {criteria, amount} 列表".to_string(),
        })?;

    let mut slabs = Vec::with_capacity(items.len());
    for item in items {
        let slab_obj = item
            .as_object()
            .ok_or_else(|| SchemeParseError::InvalidField {
                field: "discount_amount".to_string(),
                message: "坎级元素必须是对象".to_string(),
            })?;
        slabs.push(Slab {
            criteria: opt_f64(slab_obj, "criteria")?,
            amount: opt_f64(slab_obj, "amount")?,
        });
    }
    Ok(slabs)
}

fn parse_scheme_months(obj: &Map<String, Value>) -> Result<Vec<u32>, SchemeParseError> {
    match obj.get("scheme_months") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| {
                v.as_u64()
                    .filter(|m| (1..=12).contains(m))
                    .map(|m| m as u32)
                    .ok_or_else(|| SchemeParseError::InvalidField {
                        field: "scheme_months".to_string(),
                        message: "期望 1..=12 的月份数字".to_string(),
                    })
            })
            .collect(),
        Some(_) => Err(SchemeParseError::InvalidField {
            field: "scheme_months".to_string(),
            message: "期望月份数字列表".to_string(),
        }),
    }
}

fn slabs_to_wire(slabs: &[Slab]) -> Value {
    Value::Array(
        slabs
            .iter()
            .map(|s| json!({ "criteria": s.criteria, "amount": s.amount }))
            .collect(),
    )
}

// ==========================================
// SchemeCatalog - 方案目录
// ==========================================
// 存储形态: { 方案类型名 → [记录] },空类型键在写出时剔除
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemeCatalog {
    records: BTreeMap<SchemeKind, Vec<SchemeRecord>>,
}

impl SchemeCatalog {
    pub fn new() -> Self {
        SchemeCatalog::default()
    }

    /// 从目录文档解析（边界校验,未知类型/基准立即报错）
    pub fn from_document(doc: &Value) -> Result<Self, SchemeParseError> {
        let obj = doc.as_object().ok_or(SchemeParseError::DocumentNotObject)?;

        let mut catalog = SchemeCatalog::new();
        for (kind_name, records_value) in obj {
            let kind = SchemeKind::from_wire(kind_name)
                .ok_or_else(|| SchemeParseError::UnknownKind(kind_name.clone()))?;

            let items = records_value
                .as_array()
                .ok_or(SchemeParseError::RecordNotObject { kind })?;

            for item in items {
                catalog.append(SchemeRecord::from_wire(kind, item)?);
            }
        }
        Ok(catalog)
    }

    /// 序列化为目录文档
    pub fn to_document(&self) -> Value {
        let mut obj = Map::new();
        for (kind, records) in &self.records {
            if records.is_empty() {
                continue;
            }
            obj.insert(
                kind.wire_name().to_string(),
                Value::Array(records.iter().map(|r| r.to_wire()).collect()),
            );
        }
        Value::Object(obj)
    }

    /// 追加记录（类型列表按需创建）
    pub fn append(&mut self, record: SchemeRecord) {
        self.records.entry(record.kind).or_default().push(record);
    }

    /// 按 (类型, 索引) 覆盖记录
    pub fn update(
        &mut self,
        kind: SchemeKind,
        index: usize,
        record: SchemeRecord,
    ) -> Result<(), CatalogEditError> {
        let list = self
            .records
            .get_mut(&kind)
            .ok_or(CatalogEditError::NoSuchRecord { kind, index })?;
        let slot = list
            .get_mut(index)
            .ok_or(CatalogEditError::NoSuchRecord { kind, index })?;
        *slot = record;
        Ok(())
    }

    /// 按 (类型, 索引) 删除记录,类型列表清空后剔除该键
    pub fn delete(
        &mut self,
        kind: SchemeKind,
        index: usize,
    ) -> Result<SchemeRecord, CatalogEditError> {
        let list = self
            .records
            .get_mut(&kind)
            .ok_or(CatalogEditError::NoSuchRecord { kind, index })?;
        if index >= list.len() {
            return Err(CatalogEditError::NoSuchRecord { kind, index });
        }
        let removed = list.remove(index);
        if list.is_empty() {
            self.records.remove(&kind);
        }
        Ok(removed)
    }

    /// 某类型下的全部记录
    pub fn records_of(&self, kind: SchemeKind) -> &[SchemeRecord] {
        self.records.get(&kind).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// 目录中出现的方案类型
    pub fn kinds(&self) -> Vec<SchemeKind> {
        self.records.keys().copied().collect()
    }

    /// 有效期与 [start, end] 重叠的记录子目录（维护视图用）
    pub fn filter_by_range(&self, start: NaiveDate, end: NaiveDate) -> SchemeCatalog {
        let mut filtered = SchemeCatalog::new();
        for records in self.records.values() {
            for record in records {
                if record.overlaps(start, end) {
                    filtered.append(record.clone());
                }
            }
        }
        filtered
    }

    /// 记录总数
    pub fn len(&self) -> usize {
        self.records.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.values().all(|v| v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn flat_record(kind: SchemeKind, amount: f64) -> SchemeRecord {
        SchemeRecord::new(
            kind,
            vec![MaterialGroup::Pp],
            date(2026, 1, 1),
            date(2026, 3, 31),
            SchemeTerms::Flat {
                discount_amount: amount,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_parse_flat_record_single_group_string() {
        // material_groups 接受单个字符串
        let value = json!({
            "material_groups": "PP",
            "start_date": "2026-01-01",
            "end_date": "2026-03-31",
            "discount_amount": 5.0
        });
        let record = SchemeRecord::from_wire(SchemeKind::EarlyBird, &value).unwrap();
        assert_eq!(record.material_groups, vec![MaterialGroup::Pp]);
        assert_eq!(
            record.terms,
            SchemeTerms::Flat {
                discount_amount: 5.0
            }
        );
    }

    #[test]
    fn test_parse_basis_slab_record() {
        let value = json!({
            "material_groups": ["LLDPE", "HDPE"],
            "start_date": "2026-04-01",
            "end_date": "2027-03-31",
            "basis": "MOU%",
            "discount_amount": [
                { "criteria": 0.0, "amount": 0.0 },
                { "criteria": 80.0, "amount": 1.5 }
            ],
            "scheme_months": [4, 5, 6]
        });
        let record = SchemeRecord::from_wire(SchemeKind::Hidden, &value).unwrap();
        match &record.terms {
            SchemeTerms::BasisSlab {
                basis,
                slabs,
                scheme_months,
            } => {
                assert_eq!(*basis, Basis::MouPct);
                assert_eq!(slabs.len(), 2);
                assert_eq!(scheme_months, &vec![4, 5, 6]);
            }
            other => panic!("unexpected terms: {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_basis_is_error() {
        let value = json!({
            "material_groups": ["PP"],
            "start_date": "2026-01-01",
            "end_date": "2026-03-31",
            "basis": "Mystery Basis",
            "discount_amount": []
        });
        let err = SchemeRecord::from_wire(SchemeKind::XyScheme, &value).unwrap_err();
        assert!(matches!(err, SchemeParseError::UnknownBasis(_)));
    }

    #[test]
    fn test_parse_inverted_date_range_is_error() {
        let value = json!({
            "material_groups": ["PP"],
            "start_date": "2026-03-31",
            "end_date": "2026-01-01",
            "discount_amount": 5.0
        });
        let err = SchemeRecord::from_wire(SchemeKind::Cash, &value).unwrap_err();
        assert!(matches!(err, SchemeParseError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_parse_missing_numeric_defaults_to_zero() {
        let value = json!({
            "material_groups": ["PP"],
            "start_date": "2026-01-01",
            "end_date": "2026-03-31"
        });
        let record = SchemeRecord::from_wire(SchemeKind::Mou, &value).unwrap();
        assert_eq!(
            record.terms,
            SchemeTerms::Mou {
                monthly_component: 0.0,
                annual_component: 0.0
            }
        );
    }

    #[test]
    fn test_document_roundtrip() {
        let mut catalog = SchemeCatalog::new();
        catalog.append(flat_record(SchemeKind::EarlyBird, 5.0));
        catalog.append(
            SchemeRecord::new(
                SchemeKind::QuantitySlab,
                vec![MaterialGroup::Lldpe, MaterialGroup::Hdpe],
                date(2026, 1, 1),
                date(2026, 12, 31),
                SchemeTerms::QuantitySlab {
                    slabs: vec![
                        Slab {
                            criteria: 0.0,
                            amount: 0.0,
                        },
                        Slab {
                            criteria: 100.0,
                            amount: 1.0,
                        },
                    ],
                },
            )
            .unwrap(),
        );

        let doc = catalog.to_document();
        let parsed = SchemeCatalog::from_document(&doc).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn test_document_unknown_kind_is_error() {
        let doc = json!({ "Mystery Scheme": [] });
        let err = SchemeCatalog::from_document(&doc).unwrap_err();
        assert!(matches!(err, SchemeParseError::UnknownKind(_)));
    }

    #[test]
    fn test_crud_append_update_delete() {
        let mut catalog = SchemeCatalog::new();
        catalog.append(flat_record(SchemeKind::Cash, 2.0));
        catalog.append(flat_record(SchemeKind::Cash, 3.0));
        assert_eq!(catalog.records_of(SchemeKind::Cash).len(), 2);

        catalog
            .update(SchemeKind::Cash, 1, flat_record(SchemeKind::Cash, 4.0))
            .unwrap();
        assert_eq!(
            catalog.records_of(SchemeKind::Cash)[1].terms,
            SchemeTerms::Flat {
                discount_amount: 4.0
            }
        );

        catalog.delete(SchemeKind::Cash, 0).unwrap();
        catalog.delete(SchemeKind::Cash, 0).unwrap();
        // 列表清空后类型键被剔除
        assert!(catalog.kinds().is_empty());
        assert!(catalog
            .to_document()
            .as_object()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_crud_index_miss() {
        let mut catalog = SchemeCatalog::new();
        catalog.append(flat_record(SchemeKind::Cash, 2.0));
        let err = catalog.delete(SchemeKind::Cash, 5).unwrap_err();
        assert!(matches!(err, CatalogEditError::NoSuchRecord { .. }));
        let err = catalog
            .update(SchemeKind::EarlyBird, 0, flat_record(SchemeKind::EarlyBird, 1.0))
            .unwrap_err();
        assert!(matches!(err, CatalogEditError::NoSuchRecord { .. }));
    }

    #[test]
    fn test_filter_by_range() {
        let mut catalog = SchemeCatalog::new();
        catalog.append(flat_record(SchemeKind::EarlyBird, 5.0)); // 2026-01-01 → 2026-03-31
        let hit = catalog.filter_by_range(date(2026, 3, 1), date(2026, 3, 31));
        assert_eq!(hit.len(), 1);
        let miss = catalog.filter_by_range(date(2026, 4, 1), date(2026, 6, 30));
        assert!(miss.is_empty());
    }

    #[test]
    fn test_record_label() {
        let record = flat_record(SchemeKind::EarlyBird, 5.0);
        assert_eq!(record.label(), "2026-01-01 → 2026-03-31");
    }

    #[test]
    fn test_terms_kind_mismatch() {
        let err = SchemeRecord::new(
            SchemeKind::Freight,
            vec![MaterialGroup::Pp],
            date(2026, 1, 1),
            date(2026, 3, 31),
            SchemeTerms::Flat {
                discount_amount: 5.0,
            },
        )
        .unwrap_err();
        assert!(matches!(err, SchemeParseError::TermsKindMismatch { .. }));
    }
}

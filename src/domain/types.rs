// ==========================================
// 聚合物经销返利计算系统 - 领域类型定义
// ==========================================
// 物料分组: PP / LLDPE / HDPE（线上目录的原始口径）
// 物料族: PP / PE（折扣聚合口径，LLDPE/HDPE 归并为 PE）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 物料分组 (Material Group)
// ==========================================
// 红线: 枚举封闭,目录中出现未知分组视为校验错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaterialGroup {
    Pp,    // 聚丙烯
    Lldpe, // 线性低密度聚乙烯
    Hdpe,  // 高密度聚乙烯
}

impl MaterialGroup {
    /// 归并到物料族（PP→PP, LLDPE/HDPE→PE）
    pub fn family(&self) -> MaterialFamily {
        match self {
            MaterialGroup::Pp => MaterialFamily::Pp,
            MaterialGroup::Lldpe | MaterialGroup::Hdpe => MaterialFamily::Pe,
        }
    }

    /// 从目录/报表中的字符串解析
    pub fn from_wire(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PP" => Some(MaterialGroup::Pp),
            "LLDPE" => Some(MaterialGroup::Lldpe),
            "HDPE" => Some(MaterialGroup::Hdpe),
            _ => None,
        }
    }

    /// 目录文档中的存储字符串
    pub fn wire_name(&self) -> &'static str {
        match self {
            MaterialGroup::Pp => "PP",
            MaterialGroup::Lldpe => "LLDPE",
            MaterialGroup::Hdpe => "HDPE",
        }
    }
}

impl fmt::Display for MaterialGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

// ==========================================
// 物料族 (Material Family)
// ==========================================
// 用途: 聚合基准与方案条款的聚合键
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaterialFamily {
    Pp, // 聚丙烯族
    Pe, // 聚乙烯族（LLDPE + HDPE）
}

impl MaterialFamily {
    /// 族内的全部物料分组（坎级方案将资格掩码放宽到整族）
    pub fn canonical_groups(&self) -> &'static [MaterialGroup] {
        match self {
            MaterialFamily::Pp => &[MaterialGroup::Pp],
            MaterialFamily::Pe => &[MaterialGroup::Lldpe, MaterialGroup::Hdpe],
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PP" => Some(MaterialFamily::Pp),
            "PE" => Some(MaterialFamily::Pe),
            _ => None,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            MaterialFamily::Pp => "PP",
            MaterialFamily::Pe => "PE",
        }
    }
}

impl fmt::Display for MaterialFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

// ==========================================
// 方案类型 (Scheme Kind)
// ==========================================
// 红线: 类型集合封闭,不支持用户自定义规则语言
// 序列化格式: 目录文档的顶层键（wire_name）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SchemeKind {
    Mou,                // MOU 月度/年度双组件折扣
    EarlyBird,          // 早鸟折扣（平率）
    PriceProtection,    // 价格保护（平率）
    Freight,            // 运费折扣（按仓库距离分档）
    Cash,               // 现金折扣（平率）
    XyScheme,           // X-Y 坎级方案（按聚合基准）
    Hidden,             // 隐藏折扣（按聚合基准）
    QuantitySlab,       // 数量坎级（当期销量）
    AnnualQuantitySlab, // 年度数量坎级（年度投影销量）
    PriceChange,        // 价格变动记录（仅信息,不产生折扣）
}

impl SchemeKind {
    /// 固定的方案应用顺序
    ///
    /// # 规则
    /// 累加可交换,顺序仅影响浮点求和的舍入复现;
    /// 价格变动仅记录事件,放在最后
    pub const APPLY_ORDER: [SchemeKind; 10] = [
        SchemeKind::Mou,
        SchemeKind::Freight,
        SchemeKind::EarlyBird,
        SchemeKind::PriceProtection,
        SchemeKind::Cash,
        SchemeKind::XyScheme,
        SchemeKind::Hidden,
        SchemeKind::QuantitySlab,
        SchemeKind::AnnualQuantitySlab,
        SchemeKind::PriceChange,
    ];

    /// 从目录文档顶层键解析
    pub fn from_wire(s: &str) -> Option<Self> {
        match s.trim() {
            "MOU" => Some(SchemeKind::Mou),
            "Early Bird" => Some(SchemeKind::EarlyBird),
            "Price Protection" => Some(SchemeKind::PriceProtection),
            "Freight" => Some(SchemeKind::Freight),
            "Cash" => Some(SchemeKind::Cash),
            "X-Y Scheme" => Some(SchemeKind::XyScheme),
            "Hidden" => Some(SchemeKind::Hidden),
            "Quantity Slab" => Some(SchemeKind::QuantitySlab),
            "Annual Quantity Slab" => Some(SchemeKind::AnnualQuantitySlab),
            "Price Change" => Some(SchemeKind::PriceChange),
            _ => None,
        }
    }

    /// 目录文档顶层键
    pub fn wire_name(&self) -> &'static str {
        match self {
            SchemeKind::Mou => "MOU",
            SchemeKind::EarlyBird => "Early Bird",
            SchemeKind::PriceProtection => "Price Protection",
            SchemeKind::Freight => "Freight",
            SchemeKind::Cash => "Cash",
            SchemeKind::XyScheme => "X-Y Scheme",
            SchemeKind::Hidden => "Hidden",
            SchemeKind::QuantitySlab => "Quantity Slab",
            SchemeKind::AnnualQuantitySlab => "Annual Quantity Slab",
            SchemeKind::PriceChange => "Price Change",
        }
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

// ==========================================
// 聚合基准选择器 (Basis)
// ==========================================
// 用途: Hidden / X-Y 坎级方案按记录选择聚合基准
// 红线: 未知基准标签为校验错误,不得静默产出空基准
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Basis {
    MouPct,             // 当期销量 ÷ MOU 承诺目标 × 100
    FlatVolume,         // 当期销量（平量）
    NonZeroMonthsAvgPct, // 当期销量 ÷ 非零历史月均量 × 100
}

impl Basis {
    /// 从目录文档的基准标签解析
    pub fn from_wire(s: &str) -> Option<Self> {
        match s.trim() {
            "MOU%" => Some(Basis::MouPct),
            "Flat Discount" => Some(Basis::FlatVolume),
            "Non-Zero Months Avg%" => Some(Basis::NonZeroMonthsAvgPct),
            _ => None,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            Basis::MouPct => "MOU%",
            Basis::FlatVolume => "Flat Discount",
            Basis::NonZeroMonthsAvgPct => "Non-Zero Months Avg%",
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

// ==========================================
// 价格变动方向 (Price Direction)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceDirection {
    Increase, // 涨价
    Decrease, // 降价
}

impl PriceDirection {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s.trim() {
            "Increase" => Some(PriceDirection::Increase),
            "Decrease" => Some(PriceDirection::Decrease),
            _ => None,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            PriceDirection::Increase => "Increase",
            PriceDirection::Decrease => "Decrease",
        }
    }
}

impl fmt::Display for PriceDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

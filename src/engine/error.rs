// ==========================================
// 聚合物经销返利计算系统 - 引擎错误类型
// ==========================================
// 规则: 校验错误中止整个期间计算,不得产出部分信用凭证
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 折扣计算错误类型
#[derive(Error, Debug)]
pub enum DiscountError {
    // ===== 运费方案关联错误 =====
    #[error("缺少仓库距离记录 (送达方: {})", ship_to_ids.join(", "))]
    MissingDistance { ship_to_ids: Vec<String> },

    #[error("资格行缺少送达方编号 (客户组: {})", sold_to_groups.join(", "))]
    MissingShipTo { sold_to_groups: Vec<String> },
}

/// Result 类型别名
pub type DiscountResult<T> = Result<T, DiscountError>;

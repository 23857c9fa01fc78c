// ==========================================
// 聚合物经销返利计算系统 - 配置层
// ==========================================
// 职责: 提供方案目录文档的默认存储位置
// ==========================================

use std::path::PathBuf;

/// 获取方案目录文档的默认路径
///
/// # 解析顺序
/// 1. 环境变量 POLYMER_REBATE_CATALOG_PATH（便于调试/测试/CI）
/// 2. 用户数据目录（开发环境使用独立目录，避免污染生产数据）
/// 3. 回退为当前目录下的 scheme_catalog.json
pub fn get_default_catalog_path() -> String {
    // 允许通过环境变量显式指定目录文档路径
    if let Ok(path) = std::env::var("POLYMER_REBATE_CATALOG_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 先给一个默认回退值，后续如果能拿到 data_dir 再覆盖
    let mut path = PathBuf::from("./scheme_catalog.json");

    // 尝试获取用户数据目录
    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("polymer-rebate-engine-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("polymer-rebate-engine");
        }

        path = path.join("scheme_catalog.json");
    }

    path.display().to_string()
}

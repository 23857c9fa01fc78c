// ==========================================
// 聚合物经销返利计算系统 - 方案目录存储
// ==========================================
// 职责: 整份目录文档的加载/保存（对调用方原子替换）
// 红线: 核心不做部分写入;先写临时文件再重命名
// ==========================================

use crate::domain::scheme::{CatalogEditError, SchemeCatalog, SchemeParseError};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

// ==========================================
// 目录存储错误
// ==========================================
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("目录文档读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("目录文档不是合法 JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Parse(#[from] SchemeParseError),

    #[error(transparent)]
    Edit(#[from] CatalogEditError),
}

/// Result 类型别名
pub type CatalogResult<T> = Result<T, CatalogError>;

// ==========================================
// CatalogStore - 目录文档存储
// ==========================================
// 约定: 外部应用串行化编辑,单写者;核心不提供乐观并发
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        CatalogStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 加载整份目录文档并解析（文件必须存在）
    pub fn load(&self) -> CatalogResult<SchemeCatalog> {
        let text = fs::read_to_string(&self.path)?;
        let doc: Value = serde_json::from_str(&text)?;
        let catalog = SchemeCatalog::from_document(&doc)?;
        debug!(
            path = %self.path.display(),
            records = catalog.len(),
            "方案目录加载完成"
        );
        Ok(catalog)
    }

    /// 加载目录,文件不存在时返回空目录
    pub fn load_or_default(&self) -> CatalogResult<SchemeCatalog> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "目录文档不存在,使用空目录");
            return Ok(SchemeCatalog::new());
        }
        self.load()
    }

    /// 整份替换保存（写临时文件 + 重命名,调用方观察到原子替换）
    pub fn save(&self, catalog: &SchemeCatalog) -> CatalogResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let doc = catalog.to_document();
        let text = serde_json::to_string_pretty(&doc)?;

        // 同目录临时文件,保证 rename 不跨文件系统
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, text)?;
        fs::rename(&tmp_path, &self.path)?;

        info!(
            path = %self.path.display(),
            records = catalog.len(),
            "方案目录保存完成"
        );
        Ok(())
    }
}

//! 学习记录存储服务
//!
//! 只负责读写 `<卡组路径>.history.json`，不关心调度逻辑。

use crate::error::{AppError, AppResult};
use crate::leitner::LeitnerSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// 学习记录文件内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFile {
    pub saved_at: DateTime<Utc>,
    pub leitner: LeitnerSnapshot,
}

/// 学习记录存储
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// 为卡组文件创建存储，记录文件路径为 `<卡组路径><suffix>`
    pub fn for_deck(deck_path: &Path, suffix: &str) -> Self {
        let mut path = deck_path.as_os_str().to_owned();
        path.push(suffix);
        Self {
            path: PathBuf::from(path),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取学习记录
    ///
    /// 文件不存在时返回 `None`；文件损坏时返回错误，由调用方决定是否重新开始。
    pub async fn load(&self) -> AppResult<Option<HistoryFile>> {
        let path_display = self.path.display().to_string();

        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("学习记录不存在: {}", path_display);
                return Ok(None);
            }
            Err(e) => return Err(AppError::file_read_failed(path_display, e)),
        };

        let history = serde_json::from_str(&content)
            .map_err(|e| AppError::json_parse_failed(path_display, e))?;

        Ok(Some(history))
    }

    /// 保存学习记录
    pub async fn save(&self, snapshot: LeitnerSnapshot) -> AppResult<()> {
        let path_display = self.path.display().to_string();
        let history = HistoryFile {
            saved_at: Utc::now(),
            leitner: snapshot,
        };

        let json = serde_json::to_string_pretty(&history)
            .map_err(|e| AppError::json_serialize_failed(path_display.clone(), e))?;

        fs::write(&self.path, json)
            .await
            .map_err(|e| AppError::file_write_failed(path_display.clone(), e))?;

        debug!("学习记录已保存: {}", path_display);
        Ok(())
    }
}

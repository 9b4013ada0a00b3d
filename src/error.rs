use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 卡组解析错误
    #[error("卡组错误: {0}")]
    Deck(#[from] DeckError),
    /// 调度器错误
    #[error("调度错误: {0}")]
    Leitner(#[from] LeitnerError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 目标文件已存在
    #[error("输出文件 '{path}' 已存在")]
    AlreadyExists { path: String },
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// JSON 序列化失败
    #[error("JSON序列化失败 ({path}): {source}")]
    JsonSerializeFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 卡组解析错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    /// `[ ... ]` 分组中少于两个 `( ... )` 条目
    #[error("第 {index} 个分组格式错误: 需要 2 个条目，实际 {found} 个")]
    MalformedGroup { index: usize, found: usize },
    /// 没有解析到任何词条
    #[error("没有找到任何词条: {path}")]
    NoDefinitions { path: String },
}

/// 调度器错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LeitnerError {
    /// 操作需要当前选中的词条，但当前没有
    #[error("无效状态: {0}")]
    InvalidState(&'static str),
    /// 所有盒子都为空，没有可测试的词条
    #[error("所有盒子都为空")]
    Empty,
    /// 恢复的快照不满足数据模型约束
    #[error("快照无效: {0}")]
    InvalidSnapshot(String),
}

/// 配置错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 盒子数量必须至少为 1
    #[error("盒子数量必须至少为 1，当前为 {value}")]
    InvalidBoxCount { value: usize },
    /// 未知的问答顺序
    #[error("未知的问答顺序: {value} (可选: standard, reversed, random)")]
    InvalidOrder { value: String },
    /// 缺少卡组路径
    #[error("缺少卡组路径，请使用 --deck-path 指定")]
    MissingDeckPath,
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return AppError::File(FileError::NotFound { path });
        }
        AppError::File(FileError::ReadFailed { path, source })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 JSON 解析错误
    pub fn json_parse_failed(path: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::File(FileError::JsonParseFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 JSON 序列化错误
    pub fn json_serialize_failed(path: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::File(FileError::JsonSerializeFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

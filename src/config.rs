use crate::cli::Cli;
use crate::error::{AppError, AppResult, ConfigError, FileError};
use crate::workflow::AnswerOrder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// 程序配置
///
/// 优先级：默认值 < 配置文件（`LEITNER_CONFIG`）< 环境变量 < 命令行参数
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// 卡组文件路径
    pub deck_path: Option<PathBuf>,
    /// 问答顺序
    pub order: AnswerOrder,
    /// 是否输出调度器状态
    pub debug: bool,
    /// 盒子数量
    pub box_count: usize,
    /// 随机种子，未设置时使用系统熵
    pub seed: Option<u64>,
    /// 是否打乱卡组
    pub shuffle: bool,
    /// 学习记录文件后缀
    pub history_suffix: String,
    /// 日志级别
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deck_path: None,
            order: AnswerOrder::Standard,
            debug: false,
            box_count: 3,
            seed: None,
            shuffle: true,
            history_suffix: ".history.json".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// 配置文件内容，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub deck_path: Option<PathBuf>,
    pub order: Option<AnswerOrder>,
    pub debug: Option<bool>,
    pub box_count: Option<usize>,
    pub seed: Option<u64>,
    pub shuffle: Option<bool>,
    pub history_suffix: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// 默认值 + 配置文件 + 环境变量
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("LEITNER_CONFIG") {
            config = config.merge_file(Self::read_file(Path::new(&path))?);
        }

        Ok(config.apply_env()?)
    }

    /// 读取 TOML 配置文件
    pub fn read_file(path: &Path) -> AppResult<FileConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

        toml::from_str(&content).map_err(|e| {
            AppError::File(FileError::TomlParseFailed {
                path: path.display().to_string(),
                source: e,
            })
        })
    }

    pub fn merge_file(self, file: FileConfig) -> Self {
        Self {
            deck_path: file.deck_path.or(self.deck_path),
            order: file.order.unwrap_or(self.order),
            debug: file.debug.unwrap_or(self.debug),
            box_count: file.box_count.unwrap_or(self.box_count),
            seed: file.seed.or(self.seed),
            shuffle: file.shuffle.unwrap_or(self.shuffle),
            history_suffix: file.history_suffix.unwrap_or(self.history_suffix),
            log_level: file.log_level.unwrap_or(self.log_level),
        }
    }

    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// 用变量查找函数覆盖配置，便于测试时不读真实环境
    pub fn apply_vars(self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base = self;
        Ok(Self {
            deck_path: lookup("LEITNER_DECK_PATH")
                .map(PathBuf::from)
                .or(base.deck_path),
            order: parse_var(&lookup, "LEITNER_ORDER", "standard|reversed|random")?
                .unwrap_or(base.order),
            debug: parse_var(&lookup, "LEITNER_DEBUG", "bool")?.unwrap_or(base.debug),
            box_count: parse_var(&lookup, "LEITNER_BOXES", "usize")?.unwrap_or(base.box_count),
            seed: parse_var(&lookup, "LEITNER_SEED", "u64")?.or(base.seed),
            shuffle: parse_var(&lookup, "LEITNER_SHUFFLE", "bool")?.unwrap_or(base.shuffle),
            history_suffix: lookup("LEITNER_HISTORY_SUFFIX").unwrap_or(base.history_suffix),
            log_level: lookup("LOG_LEVEL").unwrap_or(base.log_level),
        })
    }

    /// 命令行参数覆盖配置
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(deck_path) = &cli.deck_path {
            self.deck_path = Some(deck_path.clone());
        }
        if let Some(order) = cli.order {
            self.order = order;
        }
        if let Some(boxes) = cli.boxes {
            self.box_count = boxes;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        self.debug |= cli.debug;
        if cli.no_shuffle {
            self.shuffle = false;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.box_count == 0 {
            return Err(ConfigError::InvalidBoxCount {
                value: self.box_count,
            });
        }
        Ok(())
    }

    /// 练习模式必须指定卡组
    pub fn require_deck_path(&self) -> Result<&Path, ConfigError> {
        self.deck_path.as_deref().ok_or(ConfigError::MissingDeckPath)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
    }
}

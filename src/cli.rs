//! 命令行参数

use crate::workflow::AnswerOrder;
use clap::Parser;
use std::path::PathBuf;

/// Leitner 盒子背诵练习
#[derive(Parser, Debug, Default)]
#[command(name = "leitner-drill")]
#[command(about = "leitner-drill - 用 Leitner 盒子法背诵卡组", long_about = None)]
#[command(version)]
pub struct Cli {
    /// 卡组文件路径
    #[arg(long, value_name = "PATH")]
    pub deck_path: Option<PathBuf>,

    /// 问答顺序
    #[arg(long, value_enum)]
    pub order: Option<AnswerOrder>,

    /// 每次出题前输出调度器状态
    #[arg(long)]
    pub debug: bool,

    /// 把 key=value 文件转换为卡组文件后退出
    #[arg(long, value_name = "PATH")]
    pub convert_from_kv: Option<PathBuf>,

    /// 盒子数量
    #[arg(long, value_name = "N")]
    pub boxes: Option<usize>,

    /// 随机种子（打乱卡组、随机问答顺序）
    #[arg(long)]
    pub seed: Option<u64>,

    /// 保持卡组文件中的顺序
    #[arg(long)]
    pub no_shuffle: bool,
}

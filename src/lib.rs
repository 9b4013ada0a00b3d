//! # Leitner Drill
//!
//! 一个用 Leitner 盒子法背诵卡组的命令行程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 调度核心（Leitner）
//! - `leitner/` - 盒子、阶段、待移动表，没有任何 I/O
//! - `Leitner` - 取词、记录结果、批量提交、推进阶段
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `HistoryStore` - 读写学习记录
//! - `deck_converter` - 键值文件转卡组文件
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整处理流程
//! - `QuestionCtx` - 题目上下文（词条 + 盒子 + 阶段）
//! - `DrillFlow` - 流程编排（取词 → 出题 → 判定 → 统计）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/session_runner` - 终端会话、中断信号、保存学习记录

pub mod cli;
pub mod config;
pub mod error;
pub mod leitner;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use cli::Cli;
pub use config::Config;
pub use error::{AppError, AppResult, LeitnerError};
pub use leitner::{Leitner, LeitnerSnapshot, PassStatus};
pub use models::{Deck, Item, ItemId};
pub use orchestrator::App;
pub use workflow::{AnswerOrder, DrillFlow, Prepared, QuestionCtx, SessionStats};

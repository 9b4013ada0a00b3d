//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次练习会话的生命周期，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! session_runner (输入输出、信号、学习记录)
//!     ↓
//! workflow::DrillFlow (单题流程：出题 / 判定 / 统计)
//!     ↓
//! leitner (调度核心：盒子 / 阶段 / 提交)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层读写终端和文件
//! 2. **向下依赖**：编排层 → workflow → leitner
//! 3. **无业务逻辑**：只做调度和统计，不做具体判定

pub mod session_runner;

pub use session_runner::{restore_or_start, App};

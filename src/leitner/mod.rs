//! Leitner 调度核心
//!
//! ## 模块划分
//!
//! - `box_set` - 盒子（先进先出队列）与固定数量的盒子集合
//! - `stage` - 阶段控制，决定本轮哪些盒子参与测试
//! - `scheduler` - 取词、记录作答结果、批量提交移动、推进阶段
//! - `snapshot` - 保存与恢复调度器状态，与卡组对齐
//!
//! 本层没有 I/O，也不持有锁；每个会话独占一个 [`Leitner`] 实例。

pub mod box_set;
pub mod scheduler;
pub mod snapshot;
pub mod stage;

pub use box_set::{BoxSet, LeitnerBox};
pub use scheduler::{Leitner, PassStatus, PendingMove, Selection};
pub use snapshot::{LeitnerSnapshot, ReconcileReport};
pub use stage::StageController;

//! 练习流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整处理流程
//!
//! 流程顺序：
//! 1. 推进阶段并取词（调度器）
//! 2. 按问答顺序生成题目
//! 3. 比对用户答案 → 记录结果 → 更新统计

use crate::error::LeitnerError;
use crate::leitner::{Leitner, LeitnerSnapshot};
use crate::utils::logging::log_leitner_state;
use crate::workflow::answer_order::AnswerOrder;
use crate::workflow::question_ctx::QuestionCtx;
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// 取题结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prepared {
    /// 下一道题
    Question(QuestionCtx),
    /// 没有任何词条可以练习
    Exhausted,
}

/// 单题作答结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerVerdict {
    pub correct: bool,
    pub expected: String,
    pub destination: usize,
}

/// 会话统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub correct: usize,
    pub wrong: usize,
}

impl SessionStats {
    pub fn total(&self) -> usize {
        self.correct + self.wrong
    }

    /// 正确率（百分比），没有作答时为 `None`
    pub fn accuracy(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.correct as f64 / total as f64 * 100.0),
        }
    }
}

/// 练习流程
///
/// - 持有调度器和随机源
/// - 决定出什么题、如何判定答案
/// - 不做任何终端 I/O
pub struct DrillFlow {
    leitner: Leitner,
    order: AnswerOrder,
    rng: ChaCha8Rng,
    stats: SessionStats,
    debug: bool,
    current: Option<QuestionCtx>,
}

impl DrillFlow {
    /// 创建新的练习流程
    pub fn new(leitner: Leitner, order: AnswerOrder, rng: ChaCha8Rng) -> Self {
        Self {
            leitner,
            order,
            rng,
            stats: SessionStats::default(),
            debug: false,
            current: None,
        }
    }

    /// 开启后每次出题前输出调度器完整状态
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn leitner(&self) -> &Leitner {
        &self.leitner
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn current(&self) -> Option<&QuestionCtx> {
        self.current.as_ref()
    }

    /// 准备下一道题
    ///
    /// 上一道题尚未作答时原样返回。
    pub fn prepare_question(&mut self) -> Prepared {
        if let Some(ctx) = &self.current {
            return Prepared::Question(ctx.clone());
        }

        let stage_before = self.leitner.stage();

        let selection = match self.leitner.next_item() {
            Ok(selection) => selection.clone(),
            Err(_) => return Prepared::Exhausted,
        };

        if self.leitner.stage() != stage_before {
            info!("📦 进入阶段 {}", self.leitner.stage());
        }

        if self.debug {
            log_leitner_state(&self.leitner);
        }

        let (question, answer) = self.order.arrange(&selection.item, &mut self.rng);
        let ctx = QuestionCtx {
            item_id: selection.item.id,
            question,
            answer,
            box_index: selection.box_index,
            stage: self.leitner.stage(),
        };

        self.current = Some(ctx.clone());
        Prepared::Question(ctx)
    }

    /// 记录用户答案
    ///
    /// 去掉首尾空白后与正确答案完全一致才算答对。
    pub fn record_answer(&mut self, user_answer: &str) -> Result<AnswerVerdict, LeitnerError> {
        let ctx = self
            .current
            .take()
            .ok_or(LeitnerError::InvalidState("没有待作答的题目"))?;

        let correct = user_answer.trim() == ctx.answer;
        let destination = self.leitner.record_outcome(correct)?;

        if correct {
            self.stats.correct += 1;
        } else {
            self.stats.wrong += 1;
        }

        Ok(AnswerVerdict {
            correct,
            expected: ctx.answer,
            destination,
        })
    }

    /// 结束会话：归位所有词条并导出快照
    pub fn finish(&mut self) -> LeitnerSnapshot {
        self.current = None;
        self.leitner.settle();
        self.leitner.snapshot()
    }
}

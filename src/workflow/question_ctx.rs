//! 题目上下文
//!
//! 封装"正在问哪个词条、来自哪个盒子"这一信息

use crate::models::ItemId;
use std::fmt::Display;

/// 一道题目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCtx {
    /// 词条 id
    pub item_id: ItemId,

    /// 展示给用户的题目
    pub question: String,

    /// 正确答案
    pub answer: String,

    /// 词条来自哪个盒子
    pub box_index: usize,

    /// 出题时的阶段
    pub stage: usize,
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[词条 #{} 盒子#{} 阶段#{}]",
            self.item_id, self.box_index, self.stage
        )
    }
}

//! 阶段控制
//!
//! 阶段 `stage` 表示本轮参与测试的最高盒子编号，活动集合始终是前缀
//! `boxes[0..=stage]`。阶段 0 只测 0 号盒子，阶段 1 测 0–1 号，依此类推；
//! 越过最后一个盒子后回到阶段 0。

use crate::leitner::box_set::{BoxSet, LeitnerBox};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageController {
    stage: usize,
    active: Vec<usize>,
}

impl StageController {
    /// 阶段 0，活动集合尚未计算
    pub fn new() -> Self {
        Self::at_stage(0)
    }

    pub fn at_stage(stage: usize) -> Self {
        Self {
            stage,
            active: Vec::new(),
        }
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    /// 活动盒子的编号，按从小到大排列
    pub fn active_indices(&self) -> &[usize] {
        &self.active
    }

    /// 重新计算活动集合；每次修改 `stage` 之后、判断是否为空之前都要调用
    pub fn setup_stage(&mut self, box_count: usize) {
        let last = self.stage.min(box_count.saturating_sub(1));
        self.active = (0..box_count).take(last + 1).collect();
    }

    /// 活动集合为空，或其中每个盒子都没有词条
    pub fn is_active_stage_empty(&self, boxes: &BoxSet) -> bool {
        self.active
            .iter()
            .all(|&index| boxes.box_at(index).is_empty())
    }

    /// 前进一个阶段，超过最后一个盒子时回到 0
    ///
    /// 不会重新计算活动集合，调用方需随后调用 [`setup_stage`](Self::setup_stage)。
    pub fn advance_stage(&mut self, box_count: usize) {
        self.stage += 1;
        if self.stage >= box_count {
            self.stage = 0;
        }
    }

    pub fn active_boxes<'a>(
        &'a self,
        boxes: &'a BoxSet,
    ) -> impl Iterator<Item = &'a LeitnerBox> + 'a {
        self.active.iter().map(move |&index| boxes.box_at(index))
    }
}

impl Default for StageController {
    fn default() -> Self {
        Self::new()
    }
}

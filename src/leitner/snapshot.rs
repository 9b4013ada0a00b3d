//! 调度器快照
//!
//! 会话之间把盒子、阶段和待移动表整体保存下来，下次原样恢复。

use crate::error::LeitnerError;
use crate::leitner::box_set::{BoxSet, LeitnerBox};
use crate::leitner::scheduler::{Leitner, PendingMove};
use crate::leitner::stage::StageController;
use crate::models::{Item, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 可序列化的调度器状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeitnerSnapshot {
    pub box_count: usize,
    pub stage: usize,
    pub boxes: Vec<Vec<Item>>,
    #[serde(default)]
    pub pending: Vec<PendingMove>,
}

/// 快照与卡组对齐的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: usize,
    pub removed: usize,
}

impl Leitner {
    /// 导出当前状态
    ///
    /// 正在测试的词条不在快照中，保存前应先调用 [`settle`](Leitner::settle)。
    pub fn snapshot(&self) -> LeitnerSnapshot {
        LeitnerSnapshot {
            box_count: self.box_count(),
            stage: self.stage(),
            boxes: self
                .boxes
                .iter()
                .map(|leitner_box| leitner_box.items().iter().cloned().collect())
                .collect(),
            pending: self.pending.values().cloned().collect(),
        }
    }

    /// 从快照恢复
    pub fn from_snapshot(snapshot: LeitnerSnapshot) -> Result<Self, LeitnerError> {
        validate(&snapshot)?;

        let boxes = snapshot
            .boxes
            .into_iter()
            .enumerate()
            .map(|(index, items)| LeitnerBox::with_items(index, items))
            .collect();

        let mut stage = StageController::at_stage(snapshot.stage);
        stage.setup_stage(snapshot.box_count);

        Ok(Self {
            boxes: BoxSet::from_boxes(boxes),
            stage,
            pending: snapshot
                .pending
                .into_iter()
                .map(|movement| (movement.item.id, movement))
                .collect(),
            current: None,
        })
    }

    /// 让调度器中的词条与卡组保持一致
    ///
    /// 卡组中新增的词条以新的 id 放入 0 号盒子，卡组中已删除的词条从盒子和
    /// 待移动表中移除。按提示和答案的内容匹配。正在测试词条时不能调用。
    pub fn reconcile(&mut self, deck_items: &[Item]) -> Result<ReconcileReport, LeitnerError> {
        if self.current.is_some() {
            return Err(LeitnerError::InvalidState("存在正在测试的词条，无法与卡组对齐"));
        }

        let wanted: HashSet<(&str, &str)> = deck_items
            .iter()
            .map(|item| (item.prompt.as_str(), item.response.as_str()))
            .collect();
        let in_deck =
            |item: &Item| wanted.contains(&(item.prompt.as_str(), item.response.as_str()));

        let before = self.boxes.total_items() + self.pending.len();
        for leitner_box in self.boxes.iter_mut() {
            leitner_box.retain(|item| in_deck(item));
        }
        self.pending.retain(|_, movement| in_deck(&movement.item));
        let removed = before - self.boxes.total_items() - self.pending.len();

        let known: Vec<&Item> = self
            .boxes
            .iter()
            .flat_map(LeitnerBox::items)
            .chain(self.pending.values().map(|movement| &movement.item))
            .collect();

        let mut next_id = known.iter().map(|item| item.id + 1).max().unwrap_or(0);

        let mut fresh: Vec<Item> = Vec::new();
        for item in deck_items {
            let seen = known
                .iter()
                .copied()
                .chain(fresh.iter())
                .any(|existing| existing.same_content(item));
            if seen {
                continue;
            }
            fresh.push(Item::new(next_id, item.prompt.clone(), item.response.clone()));
            next_id += 1;
        }

        let added = fresh.len();
        let first_box = self.boxes.box_at_mut(0);
        for item in fresh {
            first_box.push_back(item);
        }

        Ok(ReconcileReport { added, removed })
    }
}

fn validate(snapshot: &LeitnerSnapshot) -> Result<(), LeitnerError> {
    if snapshot.box_count == 0 {
        return Err(LeitnerError::InvalidSnapshot("盒子数量为 0".to_string()));
    }
    if snapshot.boxes.len() != snapshot.box_count {
        return Err(LeitnerError::InvalidSnapshot(format!(
            "声明 {} 个盒子，实际 {} 个",
            snapshot.box_count,
            snapshot.boxes.len()
        )));
    }
    if snapshot.stage >= snapshot.box_count {
        return Err(LeitnerError::InvalidSnapshot(format!(
            "阶段 {} 超出范围 [0, {}]",
            snapshot.stage,
            snapshot.box_count - 1
        )));
    }

    let mut seen: HashSet<ItemId> = HashSet::new();
    let boxed = snapshot.boxes.iter().flatten();
    let pending = snapshot.pending.iter().map(|movement| &movement.item);
    for item in boxed.chain(pending) {
        if !seen.insert(item.id) {
            return Err(LeitnerError::InvalidSnapshot(format!(
                "词条 id {} 重复",
                item.id
            )));
        }
    }

    if let Some(movement) = snapshot
        .pending
        .iter()
        .find(|movement| movement.destination >= snapshot.box_count)
    {
        return Err(LeitnerError::InvalidSnapshot(format!(
            "词条 #{} 的目标盒子 {} 不存在",
            movement.item.id, movement.destination
        )));
    }

    Ok(())
}

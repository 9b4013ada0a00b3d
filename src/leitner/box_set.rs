//! 盒子与盒子集合

use crate::models::{Item, ItemId};
use std::collections::VecDeque;

/// 单个 Leitner 盒子
///
/// 先进先出：测试时从队首取出，提交移动时追加到队尾。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeitnerBox {
    index: usize,
    items: VecDeque<Item>,
}

impl LeitnerBox {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            items: VecDeque::new(),
        }
    }

    pub(crate) fn with_items(index: usize, items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            index,
            items: items.into_iter().collect(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn items(&self) -> &VecDeque<Item> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub(crate) fn pop_front(&mut self) -> Option<Item> {
        self.items.pop_front()
    }

    pub(crate) fn push_back(&mut self, item: Item) {
        self.items.push_back(item);
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&Item) -> bool) {
        self.items.retain(keep);
    }

    /// 按答案文本稳定排序
    pub(crate) fn sort_by_response(&mut self) {
        self.items
            .make_contiguous()
            .sort_by(|a, b| a.response.cmp(&b.response));
    }
}

/// 固定数量的有序盒子集合
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxSet {
    boxes: Vec<LeitnerBox>,
}

impl BoxSet {
    /// 创建 `box_count` 个空盒子，并把所有词条按给定顺序放入 0 号盒子
    ///
    /// `box_count` 至少为 1，由调用方保证。
    pub fn new(box_count: usize, items: impl IntoIterator<Item = Item>) -> Self {
        let mut boxes: Vec<LeitnerBox> = (0..box_count).map(LeitnerBox::new).collect();
        if let Some(first) = boxes.first_mut() {
            first.items.extend(items);
        }
        Self { boxes }
    }

    pub(crate) fn from_boxes(boxes: Vec<LeitnerBox>) -> Self {
        Self { boxes }
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// 取指定盒子，索引按盒子数量取模
    pub fn box_at(&self, index: usize) -> &LeitnerBox {
        &self.boxes[index % self.boxes.len()]
    }

    pub(crate) fn box_at_mut(&mut self, index: usize) -> &mut LeitnerBox {
        let count = self.boxes.len();
        &mut self.boxes[index % count]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LeitnerBox> {
        self.boxes.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, LeitnerBox> {
        self.boxes.iter_mut()
    }

    /// 所有盒子中的词条总数（不含正在测试或待移动的词条）
    pub fn total_items(&self) -> usize {
        self.boxes.iter().map(LeitnerBox::len).sum()
    }

    /// 查找词条所在的盒子
    pub fn locate(&self, id: ItemId) -> Option<usize> {
        self.boxes
            .iter()
            .find(|leitner_box| leitner_box.contains(id))
            .map(LeitnerBox::index)
    }
}

impl<'a> IntoIterator for &'a BoxSet {
    type Item = &'a LeitnerBox;
    type IntoIter = std::slice::Iter<'a, LeitnerBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}

//! Leitner 调度器
//!
//! 每次从活动盒子中取出一个词条测试，答对后移往下一个盒子、答错移往上一个盒子。
//! 移动不会立即生效，而是记录在待移动表中，等活动盒子全部取空时一次性提交。
//!
//! ```text
//! select_next ──► record_outcome ──► (活动盒子为空?) ──► commit ──► advance_stage
//!      ▲                                                                  │
//!      └──────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::LeitnerError;
use crate::leitner::box_set::{BoxSet, LeitnerBox};
use crate::leitner::stage::StageController;
use crate::models::{Item, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// 当前正在测试的词条及其来源盒子
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub box_index: usize,
    pub item: Item,
}

/// 一条待提交的移动
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMove {
    pub item: Item,
    pub destination: usize,
}

/// `advance_pass` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassStatus {
    /// 当前阶段还有词条，什么都没做
    Ready,
    /// 已提交并进入新的阶段，新阶段有词条
    Advanced { stage: usize },
    /// 已进入新的阶段，但新阶段为空；更靠后的盒子里还有词条
    Idle { stage: usize },
    /// 所有盒子都为空
    Empty,
}

/// Leitner 调度器
#[derive(Debug, Clone)]
pub struct Leitner {
    pub(crate) boxes: BoxSet,
    pub(crate) stage: StageController,
    pub(crate) pending: BTreeMap<ItemId, PendingMove>,
    pub(crate) current: Option<Selection>,
}

impl Leitner {
    /// 新会话：所有词条放入 0 号盒子，从阶段 0 开始
    pub fn new(box_count: usize, items: impl IntoIterator<Item = Item>) -> Self {
        let boxes = BoxSet::new(box_count, items);
        let mut stage = StageController::new();
        stage.setup_stage(boxes.box_count());

        Self {
            boxes,
            stage,
            pending: BTreeMap::new(),
            current: None,
        }
    }

    pub fn box_count(&self) -> usize {
        self.boxes.box_count()
    }

    pub fn stage(&self) -> usize {
        self.stage.stage()
    }

    pub fn boxes(&self) -> &BoxSet {
        &self.boxes
    }

    pub fn box_at(&self, index: usize) -> &LeitnerBox {
        self.boxes.box_at(index)
    }

    pub fn active_boxes(&self) -> impl Iterator<Item = &LeitnerBox> + '_ {
        self.stage.active_boxes(&self.boxes)
    }

    pub fn pending(&self) -> impl Iterator<Item = &PendingMove> + '_ {
        self.pending.values()
    }

    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    /// 词条总数：盒子中的、正在测试的和待移动的
    pub fn item_count(&self) -> usize {
        self.boxes.total_items() + self.pending.len() + usize::from(self.current.is_some())
    }

    pub fn is_active_stage_empty(&self) -> bool {
        self.stage.is_active_stage_empty(&self.boxes)
    }

    /// 从活动盒子中取出下一个词条
    ///
    /// 按盒子编号从小到大扫描，取第一个非空盒子的队首词条。词条立即离开盒子，
    /// 直到提交前只属于当前选择。已有选择时原样返回，不会再取新词条。
    pub fn select_next(&mut self) -> Option<&Selection> {
        if self.current.is_none() {
            self.current = self.take_front_of_active();
            if let Some(selection) = &self.current {
                trace!(
                    "选中词条 #{} (盒子 {}, 阶段 {})",
                    selection.item.id,
                    selection.box_index,
                    self.stage.stage()
                );
            }
        }
        self.current.as_ref()
    }

    fn take_front_of_active(&mut self) -> Option<Selection> {
        let index = self
            .stage
            .active_indices()
            .iter()
            .copied()
            .find(|&index| !self.boxes.box_at(index).is_empty())?;

        self.boxes
            .box_at_mut(index)
            .pop_front()
            .map(|item| Selection {
                box_index: index,
                item,
            })
    }

    /// 记录当前词条的作答结果，返回目标盒子编号
    ///
    /// 答对移往下一个盒子（最后一个盒子保持不动），答错移往上一个盒子
    /// （0 号盒子保持不动）。移动在 [`commit`](Self::commit) 时才生效。
    pub fn record_outcome(&mut self, was_correct: bool) -> Result<usize, LeitnerError> {
        let selection = self
            .current
            .take()
            .ok_or(LeitnerError::InvalidState("没有正在测试的词条"))?;

        let destination = if was_correct {
            (selection.box_index + 1).min(self.box_count() - 1)
        } else {
            selection.box_index.saturating_sub(1)
        };

        debug!(
            "词条 #{} {}: 盒子 {} → {}",
            selection.item.id,
            if was_correct { "答对" } else { "答错" },
            selection.box_index,
            destination
        );

        self.pending.insert(
            selection.item.id,
            PendingMove {
                item: selection.item,
                destination,
            },
        );

        Ok(destination)
    }

    /// 一次性提交所有待移动词条
    ///
    /// 提交后每个盒子按答案文本重新排序，插入顺序不会保留。
    pub fn commit(&mut self) {
        if !self.pending.is_empty() {
            debug!("提交 {} 个待移动词条", self.pending.len());
        }

        for (_, movement) in std::mem::take(&mut self.pending) {
            self.boxes
                .box_at_mut(movement.destination)
                .push_back(movement.item);
        }

        for leitner_box in self.boxes.iter_mut() {
            leitner_box.sort_by_response();
        }
    }

    /// 每次取词前调用：活动盒子取空时提交移动并进入下一阶段
    pub fn advance_pass(&mut self) -> PassStatus {
        if !self.is_active_stage_empty() {
            return PassStatus::Ready;
        }

        self.commit();
        self.stage.advance_stage(self.box_count());
        self.stage.setup_stage(self.box_count());

        let stage = self.stage.stage();
        if !self.is_active_stage_empty() {
            debug!("进入阶段 {}", stage);
            PassStatus::Advanced { stage }
        } else if self.boxes.total_items() == 0 && self.current.is_none() {
            PassStatus::Empty
        } else {
            trace!("阶段 {} 没有词条", stage);
            PassStatus::Idle { stage }
        }
    }

    /// 前进到下一个有词条的阶段并取出词条
    ///
    /// 已有选择时直接返回该选择。
    pub fn next_item(&mut self) -> Result<&Selection, LeitnerError> {
        if self.current.is_none() {
            // 最多绕一整圈即可找到非空阶段
            for _ in 0..=self.box_count() {
                match self.advance_pass() {
                    PassStatus::Empty => return Err(LeitnerError::Empty),
                    PassStatus::Idle { .. } => continue,
                    PassStatus::Ready | PassStatus::Advanced { .. } => break,
                }
            }
            self.select_next();
        }

        self.current.as_ref().ok_or(LeitnerError::Empty)
    }

    /// 结束会话前归位所有词条
    ///
    /// 尚未作答的词条退回 0 号盒子，然后提交全部待移动词条。
    pub fn settle(&mut self) {
        if let Some(selection) = self.current.take() {
            debug!("词条 #{} 未作答，退回盒子 0", selection.item.id);
            self.pending.insert(
                selection.item.id,
                PendingMove {
                    item: selection.item,
                    destination: 0,
                },
            );
        }
        self.commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Deck;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    const GO: ItemId = 0;
    const BE: ItemId = 1;
    const SEE: ItemId = 2;
    const SLEEP: ItemId = 3;

    fn verbs() -> Vec<Item> {
        Deck::from_pairs([
            ("andare", "to go"),
            ("essere", "to be"),
            ("vedere", "to see"),
            ("dormire", "to sleep"),
        ])
        .into_items()
    }

    fn ids(leitner_box: &LeitnerBox) -> Vec<ItemId> {
        leitner_box.items().iter().map(|item| item.id).collect()
    }

    fn layout(leitner: &Leitner) -> Vec<Vec<ItemId>> {
        leitner.boxes().iter().map(ids).collect()
    }

    /// 每个词条出现的位置数：盒子、当前选择、待移动表
    fn occurrences(leitner: &Leitner) -> HashMap<ItemId, usize> {
        let mut seen = HashMap::new();
        for leitner_box in leitner.boxes() {
            for item in leitner_box.items() {
                *seen.entry(item.id).or_insert(0) += 1;
            }
        }
        for movement in leitner.pending() {
            *seen.entry(movement.item.id).or_insert(0) += 1;
        }
        if let Some(selection) = leitner.current() {
            *seen.entry(selection.item.id).or_insert(0) += 1;
        }
        seen
    }

    fn answer(leitner: &mut Leitner, correct: bool) -> ItemId {
        let id = leitner.next_item().unwrap().item.id;
        leitner.record_outcome(correct).unwrap();
        id
    }

    #[test]
    fn test_new_starts_at_stage_zero() {
        let leitner = Leitner::new(3, verbs());

        assert_eq!(leitner.stage(), 0);
        let active: Vec<_> = leitner.active_boxes().map(LeitnerBox::index).collect();
        assert_eq!(active, vec![0]);
        assert_eq!(layout(&leitner), vec![vec![GO, BE, SEE, SLEEP], vec![], vec![]]);
        assert_eq!(leitner.pending().count(), 0);
        assert!(leitner.current().is_none());
    }

    #[test]
    fn test_select_next_takes_front_item_out_of_its_box() {
        let mut leitner = Leitner::new(3, verbs());

        let selection = leitner.select_next().cloned().unwrap();
        assert_eq!(selection.box_index, 0);
        assert_eq!(selection.item.id, GO);
        assert!(!leitner.box_at(0).contains(GO));
        assert_eq!(leitner.item_count(), 4);
    }

    #[test]
    fn test_select_next_keeps_existing_selection() {
        let mut leitner = Leitner::new(3, verbs());
        leitner.select_next();
        let again = leitner.select_next().unwrap().item.id;

        assert_eq!(again, GO);
        assert_eq!(ids(leitner.box_at(0)), vec![BE, SEE, SLEEP]);
    }

    #[test]
    fn test_select_next_prefers_lowest_active_box() {
        let mut leitner = Leitner::new(3, verbs());
        leitner.stage = StageController::at_stage(1);
        leitner.stage.setup_stage(3);
        let moved = leitner.boxes.box_at_mut(0).pop_front().unwrap();
        leitner.boxes.box_at_mut(1).push_back(moved);

        assert_eq!(leitner.select_next().unwrap().box_index, 0);
        assert_eq!(leitner.current().unwrap().item.id, BE);
    }

    #[test]
    fn test_select_next_on_empty_stage_selects_nothing() {
        let mut leitner = Leitner::new(3, Vec::new());
        assert!(leitner.select_next().is_none());
        assert!(leitner.current().is_none());
    }

    #[test]
    fn test_record_outcome_without_selection_is_invalid_state() {
        let mut leitner = Leitner::new(3, verbs());
        assert!(matches!(
            leitner.record_outcome(true),
            Err(LeitnerError::InvalidState(_))
        ));
    }

    #[test]
    fn test_record_outcome_defers_movement() {
        let mut leitner = Leitner::new(3, verbs());
        leitner.select_next();

        assert_eq!(leitner.record_outcome(true), Ok(1));
        assert!(leitner.current().is_none());
        assert!(leitner.boxes().locate(GO).is_none());

        let pending: Vec<_> = leitner
            .pending()
            .map(|movement| (movement.item.id, movement.destination))
            .collect();
        assert_eq!(pending, vec![(GO, 1)]);
    }

    #[test]
    fn test_correct_answer_saturates_at_last_box() {
        let mut leitner = Leitner::new(3, vec![Item::new(0, "x", "y")]);
        leitner.current = Some(Selection {
            box_index: 2,
            item: Item::new(0, "x", "y"),
        });
        leitner.boxes.box_at_mut(0).pop_front();

        assert_eq!(leitner.record_outcome(true), Ok(2));
        leitner.commit();
        assert_eq!(leitner.boxes().locate(0), Some(2));
    }

    #[test]
    fn test_wrong_answer_saturates_at_first_box() {
        let mut leitner = Leitner::new(3, verbs());
        leitner.select_next();

        assert_eq!(leitner.record_outcome(false), Ok(0));
        leitner.commit();
        assert_eq!(leitner.boxes().locate(GO), Some(0));
    }

    #[test]
    fn test_wrong_answer_demotes_from_second_box() {
        let mut leitner = Leitner::new(3, verbs());
        leitner.boxes.box_at_mut(0).retain(|_| false);
        leitner.boxes.box_at_mut(1).push_back(Item::new(SEE, "vedere", "to see"));
        leitner.stage = StageController::at_stage(1);
        leitner.stage.setup_stage(3);

        let selection = leitner.select_next().cloned().unwrap();
        assert_eq!((selection.box_index, selection.item.id), (1, SEE));

        assert_eq!(leitner.record_outcome(false), Ok(0));
        leitner.commit();
        assert_eq!(leitner.boxes().locate(SEE), Some(0));
    }

    #[test]
    fn test_commit_moves_everything_and_sorts_by_response() {
        let mut leitner = Leitner::new(3, Vec::new());
        for (item, destination) in [
            (Item::new(BE, "essere", "to be"), 0),
            (Item::new(SLEEP, "dormire", "to sleep"), 1),
            (Item::new(SEE, "vedere", "to see"), 2),
            (Item::new(GO, "andare", "to go"), 2),
        ] {
            leitner
                .pending
                .insert(item.id, PendingMove { item, destination });
        }

        leitner.commit();

        assert_eq!(layout(&leitner), vec![vec![BE], vec![SLEEP], vec![GO, SEE]]);
        assert_eq!(leitner.pending().count(), 0);
    }

    #[test]
    fn test_answered_items_stay_out_of_boxes_until_commit() {
        let mut leitner = Leitner::new(3, verbs());
        for _ in 0..4 {
            answer(&mut leitner, true);
        }

        assert_eq!(leitner.boxes().total_items(), 0);
        assert_eq!(leitner.pending().count(), 4);

        leitner.commit();
        assert_eq!(layout(&leitner), vec![vec![], vec![BE, GO, SEE, SLEEP], vec![]]);
    }

    #[test]
    fn test_advance_pass_ready_while_stage_has_items() {
        let mut leitner = Leitner::new(3, verbs());
        assert_eq!(leitner.advance_pass(), PassStatus::Ready);
        assert_eq!(leitner.stage(), 0);
    }

    #[test]
    fn test_stage_grows_after_draining() {
        let mut leitner = Leitner::new(3, verbs());
        for _ in 0..4 {
            answer(&mut leitner, true);
        }

        assert!(leitner.is_active_stage_empty());
        assert_eq!(leitner.advance_pass(), PassStatus::Advanced { stage: 1 });
        let active: Vec<_> = leitner.active_boxes().map(LeitnerBox::index).collect();
        assert_eq!(active, vec![0, 1]);
    }

    #[test]
    fn test_always_correct_scenario_wraps_stage() {
        let mut leitner = Leitner::new(3, verbs());

        // 阶段 0：按盒内顺序提问，全部升到 1 号盒子
        let asked: Vec<_> = (0..4).map(|_| answer(&mut leitner, true)).collect();
        assert_eq!(asked, vec![GO, BE, SEE, SLEEP]);
        assert_eq!(leitner.stage(), 0);

        // 阶段 1：从 1 号盒子提问（已按答案排序），全部升到 2 号盒子
        let asked: Vec<_> = (0..4).map(|_| answer(&mut leitner, true)).collect();
        assert_eq!(leitner.stage(), 1);
        assert_eq!(asked, vec![BE, GO, SEE, SLEEP]);

        // 阶段 2：已在最后一个盒子，答对后保持不动
        let asked: Vec<_> = (0..4).map(|_| answer(&mut leitner, true)).collect();
        assert_eq!(leitner.stage(), 2);
        assert_eq!(asked, vec![BE, GO, SEE, SLEEP]);

        // 阶段回到 0，但 0 号盒子为空
        assert_eq!(leitner.advance_pass(), PassStatus::Idle { stage: 0 });
        assert_eq!(layout(&leitner), vec![vec![], vec![], vec![BE, GO, SEE, SLEEP]]);
        assert_eq!(leitner.advance_pass(), PassStatus::Idle { stage: 1 });
        assert_eq!(leitner.advance_pass(), PassStatus::Advanced { stage: 2 });
    }

    #[test]
    fn test_next_item_skips_empty_stages() {
        let mut leitner = Leitner::new(3, verbs());
        for _ in 0..12 {
            answer(&mut leitner, true);
        }

        let selection = leitner.next_item().unwrap();
        assert_eq!(selection.box_index, 2);
        assert_eq!(leitner.stage(), 2);
    }

    #[test]
    fn test_mixed_answers_follow_leitner_rules() {
        let mut leitner = Leitner::new(3, verbs());

        for _ in 0..4 {
            answer(&mut leitner, true);
        }

        // 阶段 1
        assert_eq!(answer(&mut leitner, true), BE);
        assert_eq!(answer(&mut leitner, false), GO);
        assert_eq!(answer(&mut leitner, false), SEE);
        assert_eq!(answer(&mut leitner, true), SLEEP);
        assert_eq!(leitner.stage(), 1);

        // 阶段 2：答错的词条先从 0 号盒子出来
        assert_eq!(answer(&mut leitner, false), GO);
        assert_eq!(leitner.stage(), 2);
        assert_eq!(layout(&leitner), vec![vec![SEE], vec![], vec![BE, SLEEP]]);
        assert_eq!(answer(&mut leitner, false), SEE);
        assert_eq!(answer(&mut leitner, true), BE);
        assert_eq!(answer(&mut leitner, true), SLEEP);

        // 回到阶段 0
        assert_eq!(answer(&mut leitner, false), GO);
        assert_eq!(leitner.stage(), 0);
        assert_eq!(layout(&leitner), vec![vec![SEE], vec![], vec![BE, SLEEP]]);
    }

    #[test]
    fn test_advance_pass_reports_empty_without_items() {
        let mut leitner = Leitner::new(3, Vec::new());
        assert_eq!(leitner.advance_pass(), PassStatus::Empty);
        assert_eq!(leitner.next_item(), Err(LeitnerError::Empty));
    }

    #[test]
    fn test_every_item_lives_in_exactly_one_place() {
        let mut leitner = Leitner::new(4, verbs());
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..200 {
            leitner.next_item().unwrap();
            let seen = occurrences(&leitner);
            assert_eq!(seen.len(), 4);
            assert!(seen.values().all(|&count| count == 1));

            leitner.record_outcome(rng.gen_bool(0.6)).unwrap();
            let seen = occurrences(&leitner);
            assert_eq!(seen.len(), 4);
            assert!(seen.values().all(|&count| count == 1));
        }
    }

    #[test]
    fn test_settle_returns_selection_to_first_box() {
        let mut leitner = Leitner::new(3, verbs());
        answer(&mut leitner, true);
        leitner.next_item().unwrap();

        leitner.settle();

        assert!(leitner.current().is_none());
        assert_eq!(leitner.pending().count(), 0);
        assert_eq!(leitner.boxes().locate(GO), Some(1));
        assert_eq!(leitner.boxes().locate(BE), Some(0));
        assert_eq!(leitner.boxes().total_items(), 4);
    }

    #[test]
    fn test_single_box_keeps_everything_in_place() {
        let mut leitner = Leitner::new(1, verbs());
        for _ in 0..8 {
            answer(&mut leitner, true);
        }
        assert_eq!(leitner.stage(), 0);
        assert_eq!(leitner.boxes().total_items() + leitner.pending().count(), 4);
    }
}

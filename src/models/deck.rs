use crate::models::item::Item;
use rand::seq::SliceRandom;
use rand::Rng;

/// 卡组：按文件顺序排列的词条集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    pub items: Vec<Item>,
}

impl Deck {
    /// 由提示/答案对构建卡组，id 按顺序从 0 开始分配
    pub fn from_pairs<I, P, R>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, R)>,
        P: Into<String>,
        R: Into<String>,
    {
        let items = pairs
            .into_iter()
            .enumerate()
            .map(|(id, (prompt, response))| Item::new(id, prompt, response))
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 打乱词条顺序
    ///
    /// 随机源由调用方传入，相同种子得到相同顺序。
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.items.shuffle(rng);
    }

    /// 随机取一个词条
    pub fn random_item<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Item> {
        self.items.choose(rng)
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}

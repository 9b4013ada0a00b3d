use serde::{Deserialize, Serialize};

/// 词条在一次会话中的稳定标识
pub type ItemId = usize;

/// 一对提示/答案
///
/// 创建后不可变；在盒子之间移动时整体转移所有权，不会被多个盒子共享。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub prompt: String,
    pub response: String,
}

impl Item {
    pub fn new(id: ItemId, prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            response: response.into(),
        }
    }

    /// 忽略 id，只比较提示和答案
    pub fn same_content(&self, other: &Item) -> bool {
        self.prompt == other.prompt && self.response == other.response
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} → {}", self.id, self.prompt, self.response)
    }
}

use crate::error::DeckError;
use crate::models::deck::Deck;
use crate::utils::strings_between;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 去掉空行和以 `#` 开头的注释行
pub fn strip_comments(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 解析卡组文本
///
/// 每个 `[ ... ]` 分组是一个词条，分组内前两个 `( ... )` 分别是提示和答案。
pub fn parse_deck(data: &str) -> Result<Deck, DeckError> {
    let mut pairs = Vec::new();

    for (index, group) in strings_between(data, '[', ']').into_iter().enumerate() {
        let mut words = strings_between(&group, '(', ')').into_iter();

        match (words.next(), words.next()) {
            (Some(prompt), Some(response)) => pairs.push((prompt, response)),
            (first, _) => {
                return Err(DeckError::MalformedGroup {
                    index,
                    found: usize::from(first.is_some()),
                })
            }
        }
    }

    Ok(Deck::from_pairs(pairs))
}

/// 从文件加载卡组
pub async fn load_deck_file(path: &Path) -> Result<Deck> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取卡组文件: {}", path.display()))?;

    let deck = parse_deck(&strip_comments(&content))
        .with_context(|| format!("无法解析卡组文件: {}", path.display()))?;

    tracing::info!("成功加载 {} 个词条: {}", deck.len(), path.display());

    Ok(deck)
}

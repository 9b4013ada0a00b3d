//! 键值文件转换服务
//!
//! 把 `key=value` 形式的文件转换为卡组文件，输出到 `<原路径>.deck`。

use crate::error::{AppError, AppResult, DeckError, FileError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// 恰好包含一个 `=` 的行
static KEY_VALUE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^=]*)=([^=]*)$").expect("键值正则表达式无效"));

/// 解析键值文本，跳过空行、注释行和格式不符的行
pub fn parse_key_values(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| KEY_VALUE_LINE.captures(line))
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// 把词条渲染为卡组文件格式
pub fn render_deck(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(prompt, response)| format!("[\n    ({})\n    ({})\n]", prompt, response))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 转换后的文件路径
pub fn deck_output_path(input: &Path) -> PathBuf {
    let mut path = input.as_os_str().to_owned();
    path.push(".deck");
    PathBuf::from(path)
}

/// 读取键值文件并写出卡组文件，返回输出路径
///
/// 输出文件已存在时不会覆盖。
pub async fn convert_key_value_to_deck_file(input: &Path) -> AppResult<PathBuf> {
    let content = fs::read_to_string(input)
        .await
        .map_err(|e| AppError::file_read_failed(input.display().to_string(), e))?;

    let pairs = parse_key_values(&content);
    if pairs.is_empty() {
        return Err(DeckError::NoDefinitions {
            path: input.display().to_string(),
        }
        .into());
    }

    let output = deck_output_path(input);
    let output_display = output.display().to_string();

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&output)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => AppError::File(FileError::AlreadyExists {
                path: output_display.clone(),
            }),
            _ => AppError::file_write_failed(output_display.clone(), e),
        })?;

    file.write_all(render_deck(&pairs).as_bytes())
        .await
        .map_err(|e| AppError::file_write_failed(output_display.clone(), e))?;
    file.flush()
        .await
        .map_err(|e| AppError::file_write_failed(output_display.clone(), e))?;

    info!("✓ 已转换 {} 个词条: {}", pairs.len(), output_display);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_deck;

    #[test]
    fn test_parse_key_values_skips_noise() {
        let content = "# 动词\nandare=to go\n\nessere=to be=extra\nvedere\ndormire=to sleep";
        assert_eq!(
            parse_key_values(content),
            vec![
                ("andare".to_string(), "to go".to_string()),
                ("dormire".to_string(), "to sleep".to_string()),
            ]
        );
    }

    #[test]
    fn test_rendered_deck_parses_back() {
        let pairs = parse_key_values("andare=to go\nessere=to be");
        let deck = parse_deck(&render_deck(&pairs)).unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.items[1].prompt, "essere");
        assert_eq!(deck.items[1].response, "to be");
    }

    #[tokio::test]
    async fn test_convert_writes_deck_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("verbs.txt");
        std::fs::write(&input, "andare=to go\nessere=to be\n").unwrap();

        let output = convert_key_value_to_deck_file(&input).await.unwrap();
        assert_eq!(output, dir.path().join("verbs.txt.deck"));

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, "[\n    (andare)\n    (to go)\n]\n[\n    (essere)\n    (to be)\n]");
    }

    #[tokio::test]
    async fn test_convert_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("verbs.txt");
        std::fs::write(&input, "andare=to go\n").unwrap();
        std::fs::write(dir.path().join("verbs.txt.deck"), "keep me").unwrap();

        let err = convert_key_value_to_deck_file(&input).await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::AlreadyExists { .. })));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("verbs.txt.deck")).unwrap(),
            "keep me"
        );
    }

    #[tokio::test]
    async fn test_convert_without_definitions() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.txt");
        std::fs::write(&input, "# nothing here\n").unwrap();

        let err = convert_key_value_to_deck_file(&input).await.unwrap_err();
        assert!(matches!(err, AppError::Deck(DeckError::NoDefinitions { .. })));
    }
}

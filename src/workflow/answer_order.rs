use crate::error::ConfigError;
use crate::models::Item;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 问答顺序
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnswerOrder {
    /// 显示提示，回答答案
    #[default]
    Standard,
    /// 显示答案，回答提示
    Reversed,
    /// 每题随机
    Random,
}

impl AnswerOrder {
    /// 返回 (题目, 正确答案)
    pub fn arrange<R: Rng + ?Sized>(self, item: &Item, rng: &mut R) -> (String, String) {
        let reversed = match self {
            AnswerOrder::Standard => false,
            AnswerOrder::Reversed => true,
            AnswerOrder::Random => rng.gen_bool(0.5),
        };

        if reversed {
            (item.response.clone(), item.prompt.clone())
        } else {
            (item.prompt.clone(), item.response.clone())
        }
    }
}

impl FromStr for AnswerOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(AnswerOrder::Standard),
            "reversed" => Ok(AnswerOrder::Reversed),
            "random" => Ok(AnswerOrder::Random),
            _ => Err(ConfigError::InvalidOrder {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AnswerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnswerOrder::Standard => "standard",
            AnswerOrder::Reversed => "reversed",
            AnswerOrder::Random => "random",
        };
        f.write_str(name)
    }
}

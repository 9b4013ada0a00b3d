//! 练习会话 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次练习会话的资源和生命周期。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：加载卡组、打乱顺序、恢复学习记录
//! 2. **问答循环**：输出题目、读取答案、输出判定结果
//! 3. **会话结束**：收到中断信号或输入结束时归位词条、保存学习记录、输出统计
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单题的判定细节，委托 `DrillFlow`
//! - **资源所有者**：唯一持有输入输出和学习记录存储的模块

use crate::config::Config;
use crate::leitner::Leitner;
use crate::models::{load_deck_file, Deck};
use crate::services::HistoryStore;
use crate::utils::logging::{log_restored, log_startup, print_session_summary};
use crate::workflow::{AnswerVerdict, DrillFlow, Prepared, SessionStats};
use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    flow: DrillFlow,
    history: HistoryStore,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        let deck_path = config.require_deck_path()?.to_path_buf();

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut deck = load_deck_file(&deck_path).await?;
        if config.shuffle {
            deck.shuffle(&mut rng);
        }

        log_startup(&config, deck.len());

        let history = HistoryStore::for_deck(&deck_path, &config.history_suffix);
        let leitner = restore_or_start(&history, config.box_count, deck).await;
        let flow = DrillFlow::new(leitner, config.order, rng).with_debug(config.debug);

        Ok(Self { flow, history })
    }

    /// 从标准输入读取答案，直到 Ctrl-C、SIGTERM 或输入结束
    pub async fn run(self) -> Result<SessionStats> {
        let input = BufReader::new(tokio::io::stdin());
        let mut output = tokio::io::stdout();
        self.run_session(input, &mut output, shutdown_signal()).await
    }

    /// 运行问答循环
    ///
    /// `shutdown` 完成时立即结束会话；无论如何结束都会保存学习记录。
    pub async fn run_session<R, W, S>(
        mut self,
        input: R,
        output: &mut W,
        shutdown: S,
    ) -> Result<SessionStats>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut lines = input.lines();

        loop {
            let ctx = match self.flow.prepare_question() {
                Prepared::Question(ctx) => ctx,
                Prepared::Exhausted => {
                    warn!("⚠️ 卡组中没有任何词条，练习结束");
                    break;
                }
            };

            let prompt = format!("❓ 题目:\n{}\n\n✏️ 答案:\n", ctx.question);
            output.write_all(prompt.as_bytes()).await?;
            output.flush().await?;

            let line = tokio::select! {
                line = lines.next_line() => line.context("读取答案失败")?,
                _ = &mut shutdown => {
                    info!("\n收到中断信号，结束练习");
                    break;
                }
            };

            let Some(answer) = line else {
                info!("输入结束，结束练习");
                break;
            };

            let verdict = self.flow.record_answer(&answer)?;
            output.write_all(render_verdict(&verdict).as_bytes()).await?;
            output.flush().await?;
        }

        Ok(self.finish().await)
    }

    /// 归位词条、保存学习记录并输出统计
    async fn finish(mut self) -> SessionStats {
        let stats = self.flow.stats();
        let snapshot = self.flow.finish();
        let history_path = self.history.path().display().to_string();

        if let Err(e) = self.history.save(snapshot).await {
            error!("❌ 无法保存学习记录: {}", e);
        }

        print_session_summary(&stats, &history_path);
        stats
    }
}

/// 恢复学习记录，失败时从头开始
///
/// 学习记录中的盒子数量优先于配置。
pub async fn restore_or_start(history: &HistoryStore, box_count: usize, deck: Deck) -> Leitner {
    match history.load().await {
        Ok(Some(file)) => match Leitner::from_snapshot(file.leitner) {
            Ok(mut leitner) => match leitner.reconcile(&deck.items) {
                Ok(report) => {
                    if leitner.box_count() != box_count {
                        warn!(
                            "⚠️ 学习记录使用 {} 个盒子，忽略配置中的 {}",
                            leitner.box_count(),
                            box_count
                        );
                    }
                    log_restored(&leitner, &report);
                    return leitner;
                }
                Err(e) => warn!("⚠️ 学习记录与卡组无法对齐，重新开始: {}", e),
            },
            Err(e) => warn!("⚠️ 学习记录无效，重新开始: {}", e),
        },
        Ok(None) => info!("📁 没有学习记录，从头开始"),
        Err(e) => warn!("⚠️ 无法读取学习记录，重新开始: {}", e),
    }

    Leitner::new(box_count, deck.into_items())
}

fn render_verdict(verdict: &AnswerVerdict) -> String {
    if verdict.correct {
        "\n============ ✅ 正确 ============\n\n".to_string()
    } else {
        format!(
            "\n============ ❌ 错误 ============\n\n正确答案:\n{}\n\n",
            verdict.expected
        )
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("无法监听 Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

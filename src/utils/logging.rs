//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use crate::config::Config;
use crate::leitner::{Leitner, ReconcileReport};
use crate::workflow::SessionStats;
use tracing::{debug, info};

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 配置
/// - `item_count`: 卡组中的词条数量
pub fn log_startup(config: &Config, item_count: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 开始练习");
    if let Some(deck_path) = &config.deck_path {
        info!("📄 卡组: {} ({} 个词条)", deck_path.display(), item_count);
    }
    info!("📦 盒子数量: {} | 问答顺序: {}", config.box_count, config.order);
    info!("{}", "=".repeat(60));
}

/// 记录学习记录恢复信息
///
/// # 参数
/// - `leitner`: 恢复后的调度器
/// - `report`: 与卡组对齐的结果
pub fn log_restored(leitner: &Leitner, report: &ReconcileReport) {
    info!("✓ 已恢复学习记录，当前阶段 {}", leitner.stage());
    if report.added > 0 || report.removed > 0 {
        info!(
            "📋 卡组有变化: 新增 {} 个词条，移除 {} 个词条",
            report.added, report.removed
        );
    }
}

/// 输出调度器完整状态（debug 级别）
///
/// 包括当前阶段的活动盒子、每个盒子的内容以及待移动表
pub fn log_leitner_state(leitner: &Leitner) {
    debug!("阶段 {} 的活动盒子:", leitner.stage());
    for leitner_box in leitner.active_boxes() {
        debug!("\t- 盒子 {}\t词条: {}", leitner_box.index(), leitner_box.len());
    }

    for leitner_box in leitner.boxes() {
        let items = leitner_box
            .items()
            .iter()
            .map(|item| truncate_text(&item.prompt, 20))
            .collect::<Vec<_>>()
            .join(", ");
        debug!("盒子 {}: [{}]", leitner_box.index(), items);
    }

    debug!("待移动:");
    for movement in leitner.pending() {
        debug!(
            "\t{} -> {}",
            truncate_text(&movement.item.to_string(), 40),
            movement.destination
        );
    }
}

/// 打印会话统计信息
///
/// # 参数
/// - `stats`: 会话统计
/// - `history_path`: 学习记录文件路径
pub fn print_session_summary(stats: &SessionStats, history_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 本次练习统计");
    info!(
        "结束时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 答对: {}", stats.correct);
    info!("❌ 答错: {}", stats.wrong);
    if let Some(accuracy) = stats.accuracy() {
        info!("🎯 正确率: {:.2}%", accuracy);
    }
    info!("{}", "=".repeat(60));
    info!("\n学习记录已保存至: {}", history_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

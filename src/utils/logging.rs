//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::models::{GenerationSettings, QuestionRecord};

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 题目生成客户端启动");
    info!("🌐 生成服务: {}", config.api_base_url);
    info!("{}", "=".repeat(60));
}

/// 记录本次生成参数
pub fn log_settings(settings: &GenerationSettings, input_count: usize) {
    info!("📋 输入数量: {}", input_count);
    info!(
        "⚙️ 题目数: {} | 难度: {} | 模型: {} ({})",
        settings.effective_question_count(),
        settings.difficulty,
        settings.model_version,
        settings.model_version.label()
    );
}

/// 打印题目预览
pub fn log_questions(questions: &[QuestionRecord]) {
    for (i, q) in questions.iter().enumerate() {
        info!("  {}. {}", i + 1, q);
    }
}

/// 打印最终统计信息
pub fn print_final_stats(question_count: usize, written: &[PathBuf]) {
    info!("\n{}", "=".repeat(60));
    info!("📊 处理完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 题目数量: {}", question_count);
    for path in written {
        info!("💾 导出文件: {}", path.display());
    }
    info!("{}", "=".repeat(60));
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

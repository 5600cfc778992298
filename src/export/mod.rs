//! 导出
//!
//! 按需从当前题目列表生成 JSON 或 CSV，不做缓存

pub mod structured;
pub mod tabular;

use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::error::ExportError;
use crate::models::QuestionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn encode(self, questions: &[QuestionRecord]) -> Result<String, ExportError> {
        match self {
            ExportFormat::Json => structured::encode(questions),
            ExportFormat::Csv => tabular::encode(questions),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// `questions_<YYYY-MM-DD>.<ext>`
pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!("questions_{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// 当前 UTC 日期
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// 将导出内容写入目录，返回文件路径
pub async fn write_export(
    dir: &Path,
    format: ExportFormat,
    questions: &[QuestionRecord],
) -> Result<PathBuf, ExportError> {
    let content = format.encode(questions)?;
    let path = dir.join(export_file_name(format, today()));

    let io_err = |source: std::io::Error| ExportError::Write {
        path: path.display().to_string(),
        source,
    };
    fs::create_dir_all(dir).await.map_err(io_err)?;
    fs::write(&path, content).await.map_err(io_err)?;

    info!("💾 已导出 {} 道题目: {}", questions.len(), path.display());
    Ok(path)
}

use crate::error::ExportError;
use crate::models::QuestionRecord;

/// 完整、按序的 JSON 导出（两空格缩进）
pub fn encode(questions: &[QuestionRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(questions)?)
}

/// 读取之前导出的 JSON
pub fn decode(content: &str) -> Result<Vec<QuestionRecord>, ExportError> {
    Ok(serde_json::from_str(content)?)
}

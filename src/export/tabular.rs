//! CSV 导出
//!
//! 每题一行：题干、正确答案、以 " | " 连接的干扰项；所有字段都加引号

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::ExportError;
use crate::models::QuestionRecord;

pub const HEADER: &str = "Question,Correct Answer,Distractors\n";
pub const DISTRACTOR_SEPARATOR: &str = " | ";

pub fn encode(questions: &[QuestionRecord]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(HEADER.as_bytes().to_vec());

    for q in questions {
        let correct = q.correct_answer().map(|a| a.answer.as_str()).unwrap_or("");
        let distractors = q
            .distractors()
            .map(|a| a.answer.as_str())
            .collect::<Vec<_>>()
            .join(DISTRACTOR_SEPARATOR);
        writer.write_record([q.question.as_str(), correct, distractors.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))?;
    // 输入均为 UTF-8 字符串
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

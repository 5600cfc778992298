use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 单个选项
///
/// 字段名与生成接口返回的 JSON 保持一致（`answer` / `correct`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub answer: String,
    #[serde(default)]
    pub correct: bool,
    /// 服务端附带的其他字段，导出时原样保留
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnswerOption {
    pub fn new(answer: impl Into<String>, correct: bool) -> Self {
        Self {
            answer: answer.into(),
            correct,
            extra: Map::new(),
        }
    }
}

/// 生成（并可编辑）的单选题
///
/// 创建时恰好有一个选项被标记为正确；用户编辑后不再校验这一点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// 题干
    pub question: String,
    /// 有序的选项列表
    #[serde(default)]
    pub answers: Vec<AnswerOption>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuestionRecord {
    pub fn new(question: impl Into<String>, answers: Vec<AnswerOption>) -> Self {
        Self {
            question: question.into(),
            answers,
            extra: Map::new(),
        }
    }

    /// 第一个被标记为正确的选项
    pub fn correct_answer(&self) -> Option<&AnswerOption> {
        self.answers.iter().find(|a| a.correct)
    }

    /// 所有干扰项（未标记为正确的选项），保持原有顺序
    pub fn distractors(&self) -> impl Iterator<Item = &AnswerOption> {
        self.answers.iter().filter(|a| !a.correct)
    }
}

impl std::fmt::Display for QuestionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 截断题干以便显示（最多80个字符）
        let preview = crate::utils::truncate_text(&self.question, 80);
        write!(f, "{} [{} 个选项]", preview, self.answers.len())
    }
}

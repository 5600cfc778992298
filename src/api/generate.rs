//! 生成接口
//!
//! 负责组装 multipart 请求体和解释响应，不涉及网络本身

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::GenerateError;
use crate::models::{FileRef, GenerationSettings, QuestionRecord};
use crate::state::InputCollection;

/// 生成接口路径
pub const GENERATE_PATH: &str = "/generate";

/// multipart 表单中的一个字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text { name: &'static str, value: String },
    File { name: &'static str, file: FileRef },
}

impl FormPart {
    pub fn name(&self) -> &'static str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => *name,
        }
    }
}

/// 一次生成请求
///
/// 字段顺序：question_count, difficulty, version, files..., text_input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub parts: Vec<FormPart>,
}

impl GenerationRequest {
    /// 由当前输入和设置组装请求
    pub fn build(inputs: &InputCollection, settings: &GenerationSettings) -> Self {
        let mut parts = vec![
            FormPart::Text {
                name: "question_count",
                value: settings.effective_question_count().to_string(),
            },
            FormPart::Text {
                name: "difficulty",
                value: settings.difficulty.as_str().to_string(),
            },
            FormPart::Text {
                name: "version",
                value: settings.model_version.id().to_string(),
            },
        ];

        for item in inputs {
            if let Some(file) = item.as_file() {
                parts.push(FormPart::File {
                    name: "files",
                    file: file.clone(),
                });
            }
        }

        let text = inputs.joined_text();
        if !text.trim().is_empty() {
            parts.push(FormPart::Text {
                name: "text_input",
                value: text,
            });
        }

        debug!(
            "组装生成请求: {} 个字段, 题目数 {}, 难度 {}, 模型 {}",
            parts.len(),
            settings.effective_question_count(),
            settings.difficulty,
            settings.model_version
        );

        Self { parts }
    }

    /// 第一个同名文本字段的值
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            FormPart::Text { name: n, value } if *n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = &FileRef> {
        self.parts.iter().filter_map(|p| match p {
            FormPart::File { file, .. } => Some(file),
            FormPart::Text { .. } => None,
        })
    }
}

/// 解释生成接口的响应
///
/// - 非 2xx：优先使用 JSON 中的 `detail`，否则为 `Server Error: <状态码>`
/// - 2xx：解析失败返回解析错误；响应体不是对象，或 `questions` 缺失/为假值，视为错误
pub fn interpret_response(status: u16, body: &[u8]) -> Result<Vec<QuestionRecord>, GenerateError> {
    if !(200..300).contains(&status) {
        let message = error_detail(body).unwrap_or_else(|| format!("Server Error: {}", status));
        warn!("⚠️ 服务端返回错误 ({}): {}", status, message);
        return Err(GenerateError::Server { status, message });
    }

    let questions = match serde_json::from_slice::<Value>(body)? {
        Value::Object(mut map) => map.remove("questions"),
        _ => None,
    };
    let questions = match questions {
        Some(value) if !is_falsy(&value) => value,
        _ => return Err(GenerateError::MissingQuestions),
    };

    let questions: Vec<QuestionRecord> = serde_json::from_value(questions)?;
    debug!("解析到 {} 道题目", questions.len());
    Ok(questions)
}

/// null、false、0、空字符串视为未提供；空数组不算
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// 从错误响应体中提取 `detail`
fn error_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        v if is_falsy(v) => None,
        Value::String(s) => Some(s.clone()),
        // 例如校验错误返回的数组
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, InputItem, ModelVersion};

    #[test]
    fn text_only_request_has_no_file_parts() {
        let mut inputs = InputCollection::new();
        inputs.add(InputItem::text(
            "Pasted Text",
            "Photosynthesis converts light to energy.",
        ));
        let settings = GenerationSettings::new(40, Difficulty::Medium, ModelVersion::T5SmallDgrace);

        let request = GenerationRequest::build(&inputs, &settings);

        assert_eq!(request.text_field("question_count"), Some("40"));
        assert_eq!(request.text_field("difficulty"), Some("Medium"));
        assert_eq!(request.text_field("version"), Some("t5-small-dgrace"));
        assert_eq!(
            request.text_field("text_input"),
            Some("Photosynthesis converts light to energy.")
        );
        assert_eq!(request.files().count(), 0);
    }

    #[test]
    fn whitespace_text_is_omitted_and_files_kept() {
        let mut inputs = InputCollection::new();
        inputs.add(InputItem::text("blank", "   "));
        inputs.add(InputItem::file(FileRef::new("a.pdf", vec![1u8])));
        inputs.add(InputItem::file(FileRef::new("b.docx", vec![2u8])));

        let request = GenerationRequest::build(&inputs, &GenerationSettings::default());

        assert!(request.text_field("text_input").is_none());
        let names: Vec<_> = request.files().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.docx"]);
        assert_eq!(request.text_field("version"), Some("t5-base-dgrace"));
    }

    #[test]
    fn error_detail_is_preferred() {
        let err = interpret_response(500, br#"{"detail":"model unavailable"}"#).unwrap_err();
        assert_eq!(err.to_string(), "model unavailable");
    }

    #[test]
    fn unparseable_error_body_uses_status() {
        let err = interpret_response(500, b"<html>oops</html>").unwrap_err();
        assert_eq!(err.to_string(), "Server Error: 500");

        let err = interpret_response(404, br#"{"detail":""}"#).unwrap_err();
        assert_eq!(err.to_string(), "Server Error: 404");
    }

    #[test]
    fn success_without_questions_is_an_error() {
        let err = interpret_response(200, b"{}").unwrap_err();
        assert!(matches!(err, GenerateError::MissingQuestions));
        assert_eq!(
            err.to_string(),
            "The server responded successfully but sent no questions."
        );
    }

    #[test]
    fn success_with_bad_json_is_parse_error() {
        let err = interpret_response(200, b"not json").unwrap_err();
        assert!(matches!(err, GenerateError::MalformedBody(_)));
    }

    #[test]
    fn non_object_or_falsy_questions_mean_no_questions() {
        let bodies: [&[u8]; 7] = [
            b"null",
            b"[]",
            b"42",
            br#"{"questions":null}"#,
            br#"{"questions":false}"#,
            br#"{"questions":0}"#,
            br#"{"questions":""}"#,
        ];
        for body in bodies {
            let err = interpret_response(200, body).unwrap_err();
            assert!(
                matches!(err, GenerateError::MissingQuestions),
                "body {:?} gave {:?}",
                String::from_utf8_lossy(body),
                err
            );
        }
    }

    #[test]
    fn truthy_non_list_questions_is_parse_error() {
        let err = interpret_response(200, br#"{"questions":"soon"}"#).unwrap_err();
        assert!(matches!(err, GenerateError::MalformedBody(_)));
    }

    #[test]
    fn falsy_detail_falls_back_to_status() {
        let bodies: [&[u8]; 3] = [
            br#"{"detail":0}"#,
            br#"{"detail":false}"#,
            br#"{"detail":null}"#,
        ];
        for body in bodies {
            let err = interpret_response(502, body).unwrap_err();
            assert_eq!(err.to_string(), "Server Error: 502");
        }

        let err =
            interpret_response(422, br#"{"detail":[{"msg":"field required"}]}"#).unwrap_err();
        assert_eq!(err.to_string(), r#"[{"msg":"field required"}]"#);
    }

    #[test]
    fn empty_question_list_is_accepted() {
        let questions = interpret_response(200, br#"{"questions":[]}"#).unwrap();
        assert!(questions.is_empty());
    }
}

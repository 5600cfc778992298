use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 题目数量上限
pub const MAX_QUESTION_COUNT: u32 = 100;
/// 未指定（或为 0）时发送的题目数量
pub const DEFAULT_QUESTION_COUNT: u32 = 20;

/// 设置项解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("未知难度: {0}（可选 Easy / Medium / Hard）")]
    UnknownDifficulty(String),
    #[error("未知模型版本: {0}")]
    UnknownModelVersion(String),
    #[error("题目数量 {0} 超出范围 [1, {max}]", max = MAX_QUESTION_COUNT)]
    QuestionCountOutOfRange(u32),
}

/// 难度枚举
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// 接口字段值
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SettingsError::UnknownDifficulty(s.to_string()))
    }
}

/// 干扰项生成模型版本（固定集合，原样作为 `version` 字段发送）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelVersion {
    #[default]
    #[serde(rename = "t5-base-dgrace")]
    T5BaseDgrace,
    #[serde(rename = "t5-small-dgrace")]
    T5SmallDgrace,
    #[serde(rename = "t5-base-sciq")]
    T5BaseSciq,
    #[serde(rename = "t5-small-sciq")]
    T5SmallSciq,
    #[serde(rename = "t5-base-dgrace-sciq")]
    T5BaseDgraceSciq,
    #[serde(rename = "t5-small-dgrace-sciq")]
    T5SmallDgraceSciq,
}

impl ModelVersion {
    pub const ALL: [ModelVersion; 6] = [
        ModelVersion::T5BaseDgrace,
        ModelVersion::T5SmallDgrace,
        ModelVersion::T5BaseSciq,
        ModelVersion::T5SmallSciq,
        ModelVersion::T5BaseDgraceSciq,
        ModelVersion::T5SmallDgraceSciq,
    ];

    /// 模型标识
    pub fn id(self) -> &'static str {
        match self {
            ModelVersion::T5BaseDgrace => "t5-base-dgrace",
            ModelVersion::T5SmallDgrace => "t5-small-dgrace",
            ModelVersion::T5BaseSciq => "t5-base-sciq",
            ModelVersion::T5SmallSciq => "t5-small-sciq",
            ModelVersion::T5BaseDgraceSciq => "t5-base-dgrace-sciq",
            ModelVersion::T5SmallDgraceSciq => "t5-small-dgrace-sciq",
        }
    }

    /// 展示名称
    pub fn label(self) -> &'static str {
        match self {
            ModelVersion::T5BaseDgrace => "Base DGrace (High Quality)",
            ModelVersion::T5SmallDgrace => "Small DGrace (Fastest)",
            ModelVersion::T5BaseSciq => "Base SciQ (Scientific)",
            ModelVersion::T5SmallSciq => "Small SciQ (Scientific Fast)",
            ModelVersion::T5BaseDgraceSciq => "Base Mixed (DGrace + SciQ)",
            ModelVersion::T5SmallDgraceSciq => "Small Mixed (DGrace + SciQ)",
        }
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ModelVersion {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelVersion::ALL
            .into_iter()
            .find(|m| m.id() == s.trim())
            .ok_or_else(|| SettingsError::UnknownModelVersion(s.to_string()))
    }
}

/// 单次生成请求的参数，每次请求重新构造，不做持久化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// 题目数量，取值 [1, 100]；0 视为未设置
    pub question_count: u32,
    pub difficulty: Difficulty,
    pub model_version: ModelVersion,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            difficulty: Difficulty::default(),
            model_version: ModelVersion::default(),
        }
    }
}

impl GenerationSettings {
    pub fn new(question_count: u32, difficulty: Difficulty, model_version: ModelVersion) -> Self {
        Self {
            question_count,
            difficulty,
            model_version,
        }
    }

    /// 实际发送的题目数量（0 回退为默认值 20）
    pub fn effective_question_count(&self) -> u32 {
        if self.question_count == 0 {
            DEFAULT_QUESTION_COUNT
        } else {
            self.question_count
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.question_count > MAX_QUESTION_COUNT {
            return Err(SettingsError::QuestionCountOutOfRange(self.question_count));
        }
        Ok(())
    }
}

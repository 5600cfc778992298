//! 应用状态
//!
//! 单一的 [`ApplicationState`]，所有修改都通过 [`Action`] 分发。
//! 生成请求带有递增的 [`RequestToken`]，只有最新令牌的结果会被应用。

pub mod editor;
pub mod inputs;

pub use editor::QuestionEditor;
pub use inputs::InputCollection;

use std::fmt;
use tracing::{debug, info, warn};

use crate::api::GenerationRequest;
use crate::error::{GenerateError, StateError};
use crate::models::{GenerationSettings, InputItem, QuestionRecord};

/// 当前阶段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Result,
    Error,
}

/// 生成请求令牌，单调递增
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 一次已发起的生成：令牌 + 请求体
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub token: RequestToken,
    pub request: GenerationRequest,
}

/// 状态转移
#[derive(Debug)]
pub enum Action {
    AddInput(InputItem),
    RemoveInput(usize),
    ClearInputs,
    UpdateQuestion(usize, QuestionRecord),
    DeleteQuestion(usize),
    UpdateStem(usize, String),
    UpdateOptionText {
        question: usize,
        option: usize,
        text: String,
    },
    StartOver,
    GenerationFinished {
        token: RequestToken,
        outcome: Result<Vec<QuestionRecord>, GenerateError>,
    },
    GenerationCancelled(RequestToken),
}

/// 全局唯一的应用状态，不做持久化
#[derive(Debug, Default)]
pub struct ApplicationState {
    inputs: InputCollection,
    editor: QuestionEditor,
    phase: Phase,
    error_message: Option<String>,
    last_token: u64,
}

impl ApplicationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inputs(&self) -> &InputCollection {
        &self.inputs
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        self.editor.questions()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// 最近一次发起的令牌
    pub fn latest_token(&self) -> Option<RequestToken> {
        (self.last_token > 0).then_some(RequestToken(self.last_token))
    }

    /// 发起生成
    ///
    /// 输入为空时直接返回 [`GenerateError::NoInputs`]，状态不变；
    /// 否则进入 Loading、清除错误并返回新的令牌和请求体
    pub fn begin_generation(
        &mut self,
        settings: &GenerationSettings,
    ) -> Result<GenerationTicket, GenerateError> {
        if self.inputs.is_empty() {
            warn!("⚠️ {}", GenerateError::NoInputs);
            return Err(GenerateError::NoInputs);
        }
        settings.validate()?;

        self.last_token += 1;
        let token = RequestToken(self.last_token);
        self.phase = Phase::Loading;
        self.error_message = None;

        info!("🚀 发起生成请求 {} ({} 个输入)", token, self.inputs.len());

        Ok(GenerationTicket {
            token,
            request: GenerationRequest::build(&self.inputs, settings),
        })
    }

    /// 令牌是否仍是最新的
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.last_token
    }

    /// 分发一个状态转移
    ///
    /// 对过期令牌的完成/取消不做修改，返回 `Ok(false)`
    pub fn dispatch(&mut self, action: Action) -> Result<bool, StateError> {
        match action {
            Action::AddInput(item) => {
                debug!("添加输入: {}", item.name());
                self.inputs.add(item);
            }
            Action::RemoveInput(index) => {
                if self.inputs.remove(index).is_none() {
                    debug!("移除输入位置 {} 越界，忽略", index);
                    return Ok(false);
                }
            }
            Action::ClearInputs => self.inputs.clear(),
            Action::UpdateQuestion(index, record) => self.editor.update_question(index, record)?,
            Action::DeleteQuestion(index) => {
                if self.editor.delete_question(index).is_none() {
                    debug!("删除题目位置 {} 越界，忽略", index);
                    return Ok(false);
                }
            }
            Action::UpdateStem(index, stem) => self.editor.update_stem(index, stem)?,
            Action::UpdateOptionText {
                question,
                option,
                text,
            } => self.editor.update_option_text(question, option, text)?,
            Action::StartOver => {
                self.editor.clear();
                self.error_message = None;
                if self.phase != Phase::Loading {
                    self.phase = Phase::Idle;
                }
            }
            Action::GenerationFinished { token, outcome } => {
                if !self.is_current(token) {
                    debug!("忽略过期的生成结果 {}", token);
                    return Ok(false);
                }
                match outcome {
                    Ok(questions) => {
                        info!("✓ 生成完成 {}: {} 道题目", token, questions.len());
                        self.editor.replace_all(questions);
                        self.phase = Phase::Result;
                        self.error_message = None;
                    }
                    Err(err) => {
                        warn!("❌ 生成失败 {}: {}", token, err);
                        self.error_message = Some(err.to_string());
                        self.phase = Phase::Error;
                    }
                }
            }
            Action::GenerationCancelled(token) => {
                if !self.is_current(token) || self.phase != Phase::Loading {
                    return Ok(false);
                }
                info!("已取消生成请求 {}", token);
                self.phase = Phase::Idle;
            }
        }
        Ok(true)
    }
}

/// 按值的状态转移
pub fn reduce(mut state: ApplicationState, action: Action) -> Result<ApplicationState, StateError> {
    state.dispatch(action)?;
    Ok(state)
}

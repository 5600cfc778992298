//! 题目编辑
//!
//! 不校验编辑后是否仍有正确选项，也不校验文本是否为空

use crate::error::StateError;
use crate::models::QuestionRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionEditor {
    questions: Vec<QuestionRecord>,
}

impl QuestionEditor {
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self { questions }
    }

    /// 用生成结果整体替换
    pub fn replace_all(&mut self, questions: Vec<QuestionRecord>) {
        self.questions = questions;
    }

    pub fn clear(&mut self) {
        self.questions.clear();
    }

    /// 整体替换指定位置的题目
    pub fn update_question(
        &mut self,
        index: usize,
        record: QuestionRecord,
    ) -> Result<(), StateError> {
        let len = self.questions.len();
        let slot = self
            .questions
            .get_mut(index)
            .ok_or(StateError::QuestionOutOfRange { index, len })?;
        *slot = record;
        Ok(())
    }

    /// 删除指定位置的题目，后续题目前移；越界时不做修改
    pub fn delete_question(&mut self, index: usize) -> Option<QuestionRecord> {
        if index < self.questions.len() {
            Some(self.questions.remove(index))
        } else {
            None
        }
    }

    /// 只替换题干文本
    pub fn update_stem(&mut self, index: usize, stem: impl Into<String>) -> Result<(), StateError> {
        let len = self.questions.len();
        let record = self
            .questions
            .get_mut(index)
            .ok_or(StateError::QuestionOutOfRange { index, len })?;
        record.question = stem.into();
        Ok(())
    }

    /// 只替换某个选项的文本，保留其 `correct` 标记
    pub fn update_option_text(
        &mut self,
        index: usize,
        option_index: usize,
        text: impl Into<String>,
    ) -> Result<(), StateError> {
        let len = self.questions.len();
        let record = self
            .questions
            .get_mut(index)
            .ok_or(StateError::QuestionOutOfRange { index, len })?;

        let option_len = record.answers.len();
        let option = record
            .answers
            .get_mut(option_index)
            .ok_or(StateError::OptionOutOfRange {
                question: index,
                index: option_index,
                len: option_len,
            })?;
        option.answer = text.into();
        Ok(())
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

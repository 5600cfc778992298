//! 命令执行
//!
//! 把命令行参数翻译为状态转移和生成流程调用

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

use crate::cli::{Command, ExportArgs, GenerateArgs, OutputArgs};
use crate::clients::{GenerateTransport, HttpGenerateClient};
use crate::config::Config;
use crate::export::{self, structured};
use crate::models::{GenerationSettings, InputItem, ModelVersion, QuestionRecord};
use crate::state::{Action, Phase, QuestionEditor};
use crate::utils::logging;
use crate::workflow::GenerationSession;

/// 应用主结构
pub struct App {
    config: Config,
    session: GenerationSession,
}

impl App {
    /// 使用 HTTP 客户端初始化应用
    pub fn initialize(config: Config) -> Self {
        let transport = Arc::new(HttpGenerateClient::new(&config));
        Self::with_transport(config, transport)
    }

    pub fn with_transport(config: Config, transport: Arc<dyn GenerateTransport>) -> Self {
        logging::log_startup(&config);
        Self {
            config,
            session: GenerationSession::new(transport),
        }
    }

    pub fn session(&self) -> &GenerationSession {
        &self.session
    }

    /// 运行子命令，返回写出的文件
    pub async fn run(&mut self, command: Command) -> Result<Vec<PathBuf>> {
        match command {
            Command::Generate(args) => self.generate(args).await,
            Command::Export(args) => self.export(args).await,
            Command::Models => {
                list_models();
                Ok(Vec::new())
            }
        }
    }

    async fn generate(&mut self, args: GenerateArgs) -> Result<Vec<PathBuf>> {
        let settings = self.settings_for(&args);

        for path in &args.files {
            let item = InputItem::from_path(path).await?;
            self.session.dispatch(Action::AddInput(item))?;
        }
        for path in &args.text_files {
            let content = fs::read_to_string(path)
                .await
                .with_context(|| format!("无法读取文本文件: {}", path.display()))?;
            self.add_pasted_text(content)?;
        }
        for text in args.texts {
            self.add_pasted_text(text)?;
        }

        logging::log_settings(&settings, self.session.state().inputs().len());

        info!("⏳ 正在生成题目，可能需要一分钟...");
        let phase = self.session.generate(&settings).await?;

        if phase == Phase::Error {
            let message = self
                .session
                .state()
                .error_message()
                .unwrap_or_default()
                .to_string();
            anyhow::bail!("生成失败: {}", message);
        }

        self.finish(&args.output).await
    }

    async fn export(&mut self, args: ExportArgs) -> Result<Vec<PathBuf>> {
        let questions = load_questions(&args.input).await?;
        info!("📁 读取 {} 道题目: {}", questions.len(), args.input.display());

        // 借用结果阶段的编辑能力
        let editor = QuestionEditor::new(questions);
        let questions = apply_deletions(editor, &args.output.delete);

        self.write_all(&args.output, &questions).await
    }

    /// 删除指定题目并写出导出文件
    async fn finish(&mut self, output: &OutputArgs) -> Result<Vec<PathBuf>> {
        for pos in deletion_order(&output.delete) {
            let applied = match pos.checked_sub(1) {
                Some(index) => self.session.dispatch(Action::DeleteQuestion(index))?,
                None => false,
            };
            if !applied {
                warn!("⚠️ 题目位置 {} 不存在，跳过删除", pos);
            }
        }

        let questions = self.session.state().questions().to_vec();
        logging::log_questions(&questions);
        self.write_all(output, &questions).await
    }

    async fn write_all(
        &self,
        output: &OutputArgs,
        questions: &[QuestionRecord],
    ) -> Result<Vec<PathBuf>> {
        let dir = output
            .out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.config.output_dir));

        let mut written = Vec::new();
        for format in output.format.formats() {
            written.push(export::write_export(&dir, format, questions).await?);
        }

        logging::print_final_stats(questions.len(), &written);
        Ok(written)
    }

    fn add_pasted_text(&mut self, content: String) -> Result<()> {
        match InputItem::pasted_text(content) {
            Some(item) => {
                self.session.dispatch(Action::AddInput(item))?;
            }
            None => warn!("⚠️ 忽略空白文本输入"),
        }
        Ok(())
    }

    fn settings_for(&self, args: &GenerateArgs) -> GenerationSettings {
        let defaults = self.config.default_settings();
        GenerationSettings::new(
            args.count.unwrap_or(defaults.question_count),
            args.difficulty.unwrap_or(defaults.difficulty),
            args.model.unwrap_or(defaults.model_version),
        )
    }
}

/// 读取之前导出的 JSON 题目文件
pub async fn load_questions(path: &Path) -> Result<Vec<QuestionRecord>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取题目文件: {}", path.display()))?;
    structured::decode(&content)
        .with_context(|| format!("无法解析题目文件: {}", path.display()))
}

/// 按 1 起始的位置删除题目，越界位置忽略
fn apply_deletions(
    mut editor: QuestionEditor,
    positions: &[usize],
) -> Vec<QuestionRecord> {
    for pos in deletion_order(positions) {
        let removed = pos
            .checked_sub(1)
            .and_then(|index| editor.delete_question(index));
        if removed.is_none() {
            warn!("⚠️ 题目位置 {} 不存在，跳过删除", pos);
        }
    }
    editor.questions().to_vec()
}

/// 去重后从大到小排列，从后往前删时位置始终对应原列表
fn deletion_order(positions: &[usize]) -> Vec<usize> {
    let mut positions = positions.to_vec();
    positions.sort_unstable_by(|a, b| b.cmp(a));
    positions.dedup();
    positions
}

fn list_models() {
    for model in ModelVersion::ALL {
        println!("{:<24} {}", model.id(), model.label());
    }
}

//! 命令行参数定义

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::export::ExportFormat;
use crate::models::{Difficulty, ModelVersion};

#[derive(Parser, Debug)]
#[command(
    name = "quizgen",
    version,
    about = "根据上传的资料调用生成服务，编辑并导出单选题"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML 配置文件
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 上传资料并生成题目
    Generate(GenerateArgs),
    /// 重新导出之前保存的 JSON 题目文件
    Export(ExportArgs),
    /// 列出可用的模型版本
    Models,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// 要上传的文件（可重复）
    #[arg(long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// 直接粘贴的文本（可重复）
    #[arg(long = "text", value_name = "TEXT")]
    pub texts: Vec<String>,

    /// 作为粘贴文本读取的文件（可重复）
    #[arg(long = "text-file", value_name = "PATH")]
    pub text_files: Vec<PathBuf>,

    /// 题目数量
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub count: Option<u32>,

    /// 难度（Easy / Medium / Hard）
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// 模型版本，见 `quizgen models`
    #[arg(long)]
    pub model: Option<ModelVersion>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// 之前导出的 JSON 文件
    #[arg(value_name = "QUESTIONS_JSON")]
    pub input: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// 导出格式
    #[arg(long, value_enum, default_value = "both")]
    pub format: FormatArg,

    /// 导出目录（默认取配置）
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// 导出前删除的题目（从 1 开始，可重复）
    #[arg(long = "delete", value_name = "POS")]
    pub delete: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Csv,
    Both,
}

impl FormatArg {
    pub fn formats(self) -> Vec<ExportFormat> {
        match self {
            FormatArg::Json => vec![ExportFormat::Json],
            FormatArg::Csv => vec![ExportFormat::Csv],
            FormatArg::Both => vec![ExportFormat::Json, ExportFormat::Csv],
        }
    }
}

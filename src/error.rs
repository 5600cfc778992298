use thiserror::Error;

use crate::models::SettingsError;

/// 生成成功但未返回题目时的提示
pub const NO_QUESTIONS_MESSAGE: &str = "The server responded successfully but sent no questions.";
/// 没有任何输入时的提示
pub const NO_INPUTS_MESSAGE: &str = "Please upload content first.";

/// 生成请求的错误
///
/// `Display` 即为展示给用户的错误信息
#[derive(Debug, Error)]
pub enum GenerateError {
    /// 前置条件不满足：输入列表为空，不会发起网络请求
    #[error("{}", NO_INPUTS_MESSAGE)]
    NoInputs,

    /// 设置不合法
    #[error(transparent)]
    InvalidSettings(#[from] SettingsError),

    /// 网络层失败（连接失败、DNS 失败等），原样展示
    #[error("{0}")]
    Transport(String),

    /// 服务端返回非 2xx 状态
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 2xx 响应体无法解析
    #[error("{0}")]
    MalformedBody(#[from] serde_json::Error),

    /// 2xx 响应缺少 `questions` 字段
    #[error("{}", NO_QUESTIONS_MESSAGE)]
    MissingQuestions,

    /// 请求被新的请求取代或被主动取消
    #[error("请求已取消")]
    Cancelled,

    /// 后台任务异常退出
    #[error("生成任务异常退出: {0}")]
    TaskFailed(String),
}

impl From<reqwest::Error> for GenerateError {
    fn from(err: reqwest::Error) -> Self {
        GenerateError::Transport(err.to_string())
    }
}

/// 编辑状态时的错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("题目位置 {index} 超出范围（共 {len} 题）")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("题目 {question} 的选项位置 {index} 超出范围（共 {len} 个选项）")]
    OptionOutOfRange {
        question: usize,
        index: usize,
        len: usize,
    },
}

/// 导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("写入文件失败 ({path}): {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },

    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

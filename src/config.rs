use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::models::{Difficulty, GenerationSettings, ModelVersion};

/// 默认的生成服务地址
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 生成服务基础地址（请求发往 `{api_base_url}/generate`）
    pub api_base_url: String,
    /// 导出文件目录
    pub output_dir: String,
    // --- 默认生成参数 ---
    pub question_count: u32,
    pub difficulty: Difficulty,
    pub model_version: ModelVersion,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            output_dir: ".".to_string(),
            question_count: 40,
            difficulty: Difficulty::Medium,
            model_version: ModelVersion::T5SmallDgrace,
        }
    }
}

impl Config {
    /// 默认值 + 环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// 读取 TOML 配置文件，环境变量优先
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            })?;
        config.with_env_overrides()
    }

    fn with_env_overrides(self) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: std::env::var("QUIZGEN_API_URL").unwrap_or(self.api_base_url),
            output_dir: std::env::var("QUIZGEN_OUTPUT_DIR").unwrap_or(self.output_dir),
            question_count: parse_env("QUIZGEN_QUESTION_COUNT", "u32")?
                .unwrap_or(self.question_count),
            difficulty: parse_env("QUIZGEN_DIFFICULTY", "Difficulty")?.unwrap_or(self.difficulty),
            model_version: parse_env("QUIZGEN_MODEL", "ModelVersion")?
                .unwrap_or(self.model_version),
        })
    }

    /// 配置中的默认生成参数
    pub fn default_settings(&self) -> GenerationSettings {
        GenerationSettings::new(self.question_count, self.difficulty, self.model_version)
    }
}

fn parse_env<T: FromStr>(var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

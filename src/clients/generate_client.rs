//! 生成接口客户端
//!
//! 封装与远程生成服务的 HTTP 交互

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

use crate::api::{interpret_response, FormPart, GenerationRequest, GENERATE_PATH};
use crate::config::Config;
use crate::error::GenerateError;
use crate::models::QuestionRecord;

/// 发送生成请求的能力
///
/// 生产环境使用 [`HttpGenerateClient`]，测试中可替换为假实现
#[async_trait]
pub trait GenerateTransport: Send + Sync {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<Vec<QuestionRecord>, GenerateError>;
}

/// 基于 reqwest 的生成客户端
///
/// 不设置客户端超时，也不重试
pub struct HttpGenerateClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGenerateClient {
    /// 创建新的生成客户端
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.api_base_url)
    }

    pub fn with_base_url(api_base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}{}", api_base_url.trim_end_matches('/'), GENERATE_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 转换为 multipart 表单；Content-Type 及 boundary 由 reqwest 生成
    fn build_form(request: GenerationRequest) -> Result<Form, GenerateError> {
        let mut form = Form::new();
        for part in request.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File { name, file } => {
                    let mut file_part =
                        Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
                    if let Some(mime) = file.mime {
                        file_part = file_part.mime_str(mime)?;
                    }
                    form.part(name, file_part)
                }
            };
        }
        Ok(form)
    }
}

#[async_trait]
impl GenerateTransport for HttpGenerateClient {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<Vec<QuestionRecord>, GenerateError> {
        debug!("POST {}", self.endpoint);
        let form = Self::build_form(request)?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("生成接口请求失败: {}", e);
                GenerateError::from(e)
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        info!("📥 生成接口响应: {} ({} 字节)", status, body.len());

        interpret_response(status, &body)
    }
}

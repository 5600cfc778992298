//! API 模块
//!
//! 负责与生成服务约定的请求与响应格式

pub mod generate;

// 重新导出常用类型
pub use generate::{interpret_response, FormPart, GenerationRequest, GENERATE_PATH};

//! # quizgen
//!
//! 调用远程题目生成服务的客户端：收集资料、请求生成、编辑并导出单选题
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 输入项、生成参数、题目与选项
//!
//! ### ② 状态层（State）
//! - `state/` - 输入列表、题目编辑、带令牌的应用状态
//!
//! ### ③ 接口层（Api / Clients）
//! - `api/` - 组装 multipart 请求、解释响应
//! - `clients/` - `GenerateTransport` 及其 reqwest 实现
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 一次生成的完整生命周期（发起 → 等待 → 应用结果）
//!
//! ### ⑤ 导出（Export）
//! - `export/` - JSON / CSV 导出与写文件
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod export;
pub mod logger;
pub mod models;
pub mod state;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{GenerateTransport, HttpGenerateClient};
pub use config::Config;
pub use error::{GenerateError, StateError};
pub use export::ExportFormat;
pub use models::{
    AnswerOption, Difficulty, GenerationSettings, InputItem, ModelVersion, QuestionRecord,
};
pub use state::{Action, ApplicationState, Phase, RequestToken};
pub use workflow::GenerationSession;

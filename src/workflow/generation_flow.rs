//! 生成流程
//!
//! 持有应用状态和传输层，负责一次生成的完整生命周期：
//! 1. 检查前置条件并发放令牌（进入 Loading）
//! 2. 在后台任务中发送请求，取消被取代的旧请求
//! 3. 无论成功、失败还是任务异常，都以同一令牌结束（离开 Loading）

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::clients::GenerateTransport;
use crate::error::{GenerateError, StateError};
use crate::models::{GenerationSettings, QuestionRecord};
use crate::state::{Action, ApplicationState, Phase, RequestToken};

type PendingResult = Result<Vec<QuestionRecord>, GenerateError>;

/// 正在进行的请求
struct InFlight {
    token: RequestToken,
    handle: JoinHandle<PendingResult>,
}

/// 生成会话
pub struct GenerationSession {
    state: ApplicationState,
    transport: Arc<dyn GenerateTransport>,
    in_flight: Option<InFlight>,
}

impl GenerationSession {
    pub fn new(transport: Arc<dyn GenerateTransport>) -> Self {
        Self {
            state: ApplicationState::new(),
            transport,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    /// 分发编辑类的状态转移
    pub fn dispatch(&mut self, action: Action) -> Result<bool, StateError> {
        self.state.dispatch(action)
    }

    /// 发起生成，不等待结果
    ///
    /// 若已有请求在进行，旧请求会被中止，其结果不会被应用
    pub fn start(&mut self, settings: &GenerationSettings) -> Result<RequestToken, GenerateError> {
        let ticket = self.state.begin_generation(settings)?;

        if let Some(previous) = self.in_flight.take() {
            info!("中止被取代的请求 {}", previous.token);
            previous.handle.abort();
        }

        let transport = Arc::clone(&self.transport);
        let request = ticket.request;
        let handle = tokio::spawn(async move { transport.generate(request).await });

        self.in_flight = Some(InFlight {
            token: ticket.token,
            handle,
        });
        Ok(ticket.token)
    }

    /// 等待当前请求结束并应用结果
    ///
    /// 没有进行中的请求时直接返回当前阶段
    pub async fn wait(&mut self) -> Phase {
        let Some(InFlight { token, handle }) = self.in_flight.take() else {
            return self.state.phase();
        };

        let outcome = match handle.await {
            Ok(result) => result,
            Err(join_err) if join_err.is_cancelled() => Err(GenerateError::Cancelled),
            Err(join_err) => {
                error!("生成任务异常退出 {}: {}", token, join_err);
                Err(GenerateError::TaskFailed(join_err.to_string()))
            }
        };

        self.finish(token, outcome);
        self.state.phase()
    }

    /// 发起生成并等待结果
    ///
    /// 输入为空时返回错误且不发起网络请求；其余情况总是结束于 Result 或 Error
    pub async fn generate(&mut self, settings: &GenerationSettings) -> Result<Phase, GenerateError> {
        self.start(settings)?;
        Ok(self.wait().await)
    }

    /// 取消进行中的请求，回到 Idle
    pub fn cancel(&mut self) -> bool {
        let Some(InFlight { token, handle }) = self.in_flight.take() else {
            return false;
        };
        handle.abort();
        // 取消只会作用于当前令牌，不会失败
        self.state
            .dispatch(Action::GenerationCancelled(token))
            .unwrap_or(false)
    }

    fn finish(&mut self, token: RequestToken, outcome: PendingResult) {
        let applied = self
            .state
            .dispatch(Action::GenerationFinished { token, outcome })
            .unwrap_or(false);
        if !applied {
            debug!("请求 {} 的结果未被应用", token);
        }
    }
}

impl Drop for GenerationSession {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
        }
    }
}

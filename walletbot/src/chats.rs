//! Chats API surface.

use std::sync::Arc;

use tokio::sync::RwLock;

use walletbot_types::content::Content;
use walletbot_types::models::GenerateContentConfig;
use walletbot_types::response::GenerateContentResponse;

use crate::client::ClientInner;
use crate::error::{Error, Result};
use crate::models::Models;

#[derive(Clone)]
pub struct Chats {
    pub(crate) inner: Arc<ClientInner>,
}

impl Chats {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// 创建新会话。
    pub fn create(&self, model: impl Into<String>) -> ChatSession {
        self.create_with_config(model, GenerateContentConfig::default())
    }

    /// 带配置创建会话。
    pub fn create_with_config(
        &self,
        model: impl Into<String>,
        config: GenerateContentConfig,
    ) -> ChatSession {
        ChatSession {
            client: self.inner.clone(),
            model: model.into(),
            history: Arc::new(RwLock::new(Vec::new())),
            config,
        }
    }
}

/// Chat 会话。
///
/// 会话持有完整的轮次历史；每次成功发送追加一条用户消息和一条模型回复，
/// 失败时历史保持不变。
#[derive(Clone)]
pub struct ChatSession {
    client: Arc<ClientInner>,
    model: String,
    history: Arc<RwLock<Vec<Content>>>,
    config: GenerateContentConfig,
}

impl ChatSession {
    /// 会话使用的模型名。
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// 发送消息。
    ///
    /// 只有 prompt 未被拦截且第一个候选带有内容时才写入历史。
    ///
    /// # Errors
    /// 当请求失败、响应无法解析或回复为空时返回错误，此时历史不变。
    pub async fn send_message(
        &self,
        message: impl Into<String>,
    ) -> Result<GenerateContentResponse> {
        let user_content = Content::user(message);

        let mut contents = self.history.read().await.clone();
        contents.push(user_content.clone());

        let models = Models::new(self.client.clone());
        let response = models
            .generate_content_with_config(&self.model, contents, self.config.clone())
            .await?;

        let blocked = response
            .prompt_feedback
            .as_ref()
            .is_some_and(|feedback| feedback.block_reason.is_some());
        let reply = match response.first_content() {
            Some(content) if !blocked => content.clone(),
            _ => {
                return Err(Error::EmptyResponse {
                    message: response.missing_text_reason(),
                })
            }
        };

        let mut history = self.history.write().await;
        history.push(user_content);
        history.push(reply);
        tracing::debug!(turns = history.len(), "chat history updated");

        Ok(response)
    }

    /// 获取历史。
    pub async fn history(&self) -> Vec<Content> {
        self.history.read().await.clone()
    }

    /// 清空历史。
    pub async fn clear_history(&self) {
        self.history.write().await.clear();
    }
}

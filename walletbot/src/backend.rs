//! Narrow remote interfaces driven by the chat loop and the model lister.

use futures_util::future::BoxFuture;
use futures_util::stream::{BoxStream, StreamExt};

use walletbot_types::models::Model;

use crate::chats::ChatSession;
use crate::error::{Error, Result};
use crate::models::Models;

/// 发送一条消息并取回回复文本。
pub trait ChatBackend: Send + Sync {
    fn send_message<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// 列出模型目录（惰性、不可重启）。
pub trait ModelCatalog: Send + Sync {
    fn list_models(&self) -> BoxStream<'_, Result<Model>>;
}

impl ChatBackend for ChatSession {
    fn send_message<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let response = ChatSession::send_message(self, text).await?;
            response.text().ok_or_else(|| Error::EmptyResponse {
                message: response.missing_text_reason(),
            })
        })
    }
}

impl ModelCatalog for Models {
    fn list_models(&self) -> BoxStream<'_, Result<Model>> {
        self.list().boxed()
    }
}

impl<T: ChatBackend + ?Sized> ChatBackend for &T {
    fn send_message<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<String>> {
        (**self).send_message(text)
    }
}

impl<T: ModelCatalog + ?Sized> ModelCatalog for &T {
    fn list_models(&self) -> BoxStream<'_, Result<Model>> {
        (**self).list_models()
    }
}

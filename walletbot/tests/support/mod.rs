#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use futures_util::future::BoxFuture;
use futures_util::stream::{self, BoxStream, StreamExt};
use serde_json::{json, Value};

use walletbot::types::models::Model;
use walletbot::{ChatBackend, Client, Error, ModelCatalog, Result};

pub fn build_gemini_client(base_url: &str) -> Client {
    Client::builder()
        .api_key("test-key")
        .base_url(base_url)
        .build()
        .unwrap()
}

pub fn text_response(text: &str) -> Value {
    json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": text}]}, "finishReason": "STOP"}
        ]
    })
}

pub fn model_json(name: &str, methods: &[&str]) -> Value {
    json!({
        "name": format!("models/{name}"),
        "displayName": name.to_uppercase(),
        "supportedGenerationMethods": methods,
    })
}

pub fn model(name: &str, methods: &[&str]) -> Model {
    serde_json::from_value(model_json(name, methods)).unwrap()
}

/// 按脚本依次返回回复的后端，记录每次收到的消息。
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String>>>,
    received: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

impl ChatBackend for ScriptedBackend {
    fn send_message<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            self.received.lock().unwrap().push(text.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(format!("echo: {text}")))
        })
    }
}

/// 内存中的模型目录，可在末尾追加一个错误。
pub struct StaticCatalog {
    pub models: Vec<Model>,
    pub trailing_error: Option<String>,
}

impl StaticCatalog {
    pub fn new(models: Vec<Model>) -> Self {
        Self {
            models,
            trailing_error: None,
        }
    }
}

impl ModelCatalog for StaticCatalog {
    fn list_models(&self) -> BoxStream<'_, Result<Model>> {
        let mut items: Vec<Result<Model>> = self.models.iter().cloned().map(Ok).collect();
        if let Some(message) = &self.trailing_error {
            items.push(Err(Error::ApiError {
                status: 503,
                message: message.clone(),
            }));
        }
        stream::iter(items).boxed()
    }
}

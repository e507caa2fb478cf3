//! Models API surface.

use std::sync::Arc;

use futures_util::stream::{self, Stream, StreamExt};
use walletbot_types::content::Content;
use walletbot_types::models::{
    GenerateContentConfig, GenerateContentRequest, ListModelsConfig, ListModelsResponse, Model,
};
use walletbot_types::response::GenerateContentResponse;

use crate::client::ClientInner;
use crate::error::{Error, Result};

#[derive(Clone)]
pub struct Models {
    pub(crate) inner: Arc<ClientInner>,
}

impl Models {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// 生成内容（默认配置）。
    ///
    /// # Errors
    /// 当请求失败或响应无法解析时返回错误。
    pub async fn generate_content(
        &self,
        model: impl Into<String>,
        contents: Vec<Content>,
    ) -> Result<GenerateContentResponse> {
        self.generate_content_with_config(model, contents, GenerateContentConfig::default())
            .await
    }

    /// 生成内容（自定义配置）。
    ///
    /// # Errors
    /// 当请求失败或响应无法解析时返回错误。
    pub async fn generate_content_with_config(
        &self,
        model: impl Into<String>,
        contents: Vec<Content>,
        config: GenerateContentConfig,
    ) -> Result<GenerateContentResponse> {
        let model = model.into();
        let request = GenerateContentRequest::new(contents, config);
        let url = build_model_method_url(&self.inner, &model, "generateContent");

        let request = self.inner.http.post(url).json(&request);
        let response = self.inner.send(request).await?;
        Ok(response.json::<GenerateContentResponse>().await?)
    }

    /// 获取单页模型列表。
    ///
    /// # Errors
    /// 当请求失败或响应无法解析时返回错误。
    pub async fn list_page(&self, config: ListModelsConfig) -> Result<ListModelsResponse> {
        let url = build_models_list_url(&self.inner, &config)?;
        let request = self.inner.http.get(url);
        let response = self.inner.send(request).await?;
        let page = response.json::<ListModelsResponse>().await?;
        tracing::debug!(
            count = page.models.len(),
            next_page = page.next_page().unwrap_or(""),
            "fetched model page"
        );
        Ok(page)
    }

    /// 惰性列出所有模型（按需翻页）。
    ///
    /// 出错时产出一次错误后结束。
    pub fn list(&self) -> impl Stream<Item = Result<Model>> + Send + 'static {
        self.list_with_config(ListModelsConfig::default())
    }

    /// 惰性列出所有模型（带配置）。
    pub fn list_with_config(
        &self,
        config: ListModelsConfig,
    ) -> impl Stream<Item = Result<Model>> + Send + 'static {
        let models = self.clone();
        stream::unfold(Some(config), move |state| {
            let models = models.clone();
            async move {
                let config = state?;
                match models.list_page(config.clone()).await {
                    Ok(page) => {
                        let next = page.next_page().map(|token| ListModelsConfig {
                            page_token: Some(token.to_string()),
                            ..config
                        });
                        let items: Vec<Result<Model>> = page.models.into_iter().map(Ok).collect();
                        Some((stream::iter(items), next))
                    }
                    Err(err) => Some((stream::iter(vec![Err(err)]), None)),
                }
            }
        })
        .flatten()
    }

    /// 列出所有模型（自动翻页）。
    ///
    /// # Errors
    /// 任意一页请求失败时返回错误。
    pub async fn all(&self) -> Result<Vec<Model>> {
        let mut stream = Box::pin(self.list());
        let mut models = Vec::new();
        while let Some(model) = stream.next().await {
            models.push(model?);
        }
        Ok(models)
    }
}

fn transform_model_name(model: &str) -> String {
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

fn build_model_method_url(inner: &ClientInner, model: &str, method: &str) -> String {
    let model = transform_model_name(model);
    inner.api_client.url(&format!("{model}:{method}"))
}

fn build_models_list_url(inner: &ClientInner, config: &ListModelsConfig) -> Result<String> {
    let url = inner.api_client.url("models");
    let mut url = reqwest::Url::parse(&url).map_err(|err| Error::Parse {
        message: format!("invalid models URL {url}: {err}"),
    })?;
    if config.page_size.is_some() || config.page_token.is_some() {
        let mut pairs = url.query_pairs_mut();
        if let Some(page_size) = config.page_size {
            pairs.append_pair("pageSize", &page_size.to_string());
        }
        if let Some(page_token) = &config.page_token {
            pairs.append_pair("pageToken", page_token);
        }
    }
    Ok(url.to_string())
}

//! Authenticated JSON transport to the shop REST API.

use reqwest::{header::CONTENT_TYPE, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::error::ErrorBody;
use tracing::debug;
use url::Url;

use crate::{
    context::RequestContext,
    error::{ClientError, ClientResult},
};

const API_PREFIX: &str = "api/v1/";

pub type Query<'a> = [(&'a str, String)];

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(server_url: &str) -> ClientResult<Self> {
        Self::with_http(Client::new(), server_url)
    }

    pub fn with_http(http: Client, server_url: &str) -> ClientResult<Self> {
        let mut root = Url::parse(server_url.trim())?;
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        Ok(Self {
            http,
            base: root.join(API_PREFIX)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub(crate) fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    fn authorized(
        &self,
        ctx: &RequestContext,
        method: Method,
        path: &str,
    ) -> ClientResult<RequestBuilder> {
        let token = ctx.token().ok_or(ClientError::Unauthorized)?;
        Ok(self
            .http
            .request(method, self.endpoint(path)?)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json"))
    }

    /// Sends the request and classifies the status. The response is only
    /// returned on 2xx.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        ctx: &RequestContext,
        method: Method,
        path: &str,
        query: &Query<'_>,
        body: Option<&B>,
    ) -> ClientResult<Response> {
        let mut builder = self.authorized(ctx, method.clone(), path)?;
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!(method = %method, path, status = status.as_u16(), "api: request completed");
        classify(response).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        path: &str,
        query: &Query<'_>,
    ) -> ClientResult<T> {
        let response = self
            .send::<()>(ctx, Method::GET, path, query, None)
            .await?;
        decode(response).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        ctx: &RequestContext,
        path: &str,
        body: &B,
    ) -> ClientResult<StatusCode> {
        let response = self
            .send(ctx, Method::POST, path, &[], Some(body))
            .await?;
        Ok(response.status())
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        ctx: &RequestContext,
        path: &str,
        body: &B,
    ) -> ClientResult<StatusCode> {
        let response = self.send(ctx, Method::PUT, path, &[], Some(body)).await?;
        Ok(response.status())
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        ctx: &RequestContext,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<StatusCode> {
        let response = self.send(ctx, Method::PATCH, path, &[], body).await?;
        Ok(response.status())
    }

    pub async fn delete(
        &self,
        ctx: &RequestContext,
        path: &str,
        query: &Query<'_>,
    ) -> ClientResult<StatusCode> {
        let response = self
            .send::<()>(ctx, Method::DELETE, path, query, None)
            .await?;
        Ok(response.status())
    }
}

pub(crate) async fn classify(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }
    if !status.is_success() {
        let raw = response.bytes().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_slice(&raw).unwrap_or_default();
        return Err(ClientError::Status { status, body });
    }
    Ok(response)
}

pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let raw = response.bytes().await?;
    Ok(serde_json::from_slice(&raw)?)
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;

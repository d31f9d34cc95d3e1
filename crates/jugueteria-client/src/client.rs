// HTTP client wrapper for the jugueteria API
// Every outgoing call passes through `authorize`, which attaches the stored
// bearer credential when one is present. No refresh and no retry: an expired
// credential is only discovered when the backend rejects the call.

use std::sync::Arc;

use jugueteria_core::SessionManager;
use reqwest::multipart::Form;
use reqwest::{RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ApiError;

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: Arc<SessionManager>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Arc<SessionManager>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// The request-transformation step applied uniformly to every call:
    /// attach the credential as a bearer header, or forward the request
    /// unchanged when none is stored.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.authorize(self.http.get(self.url(path))).send().await?;
        self.handle_response(response).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .authorize(self.http.get(self.url(path)).query(query))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Fetch a binary body (invoice PDFs).
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.authorize(self.http.get(self.url(path))).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .authorize(self.http.post(self.url(path)).json(body))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// POST where the response body is irrelevant (registration, password
    /// recovery).
    pub(crate) async fn post_unit<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .authorize(self.http.post(self.url(path)).json(body))
            .send()
            .await?;
        self.expect_success(response).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.post(self.url(path)).multipart(form))
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .authorize(self.http.put(self.url(path)).json(body))
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub(crate) async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.put(self.url(path)).multipart(form))
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .authorize(self.http.delete(self.url(path)))
            .send()
            .await?;
        self.expect_success(response).await
    }

    /// DELETE that returns a body (removing a cart item returns the updated
    /// cart).
    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.delete(self.url(path)))
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "API request rejected");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.json().await?;
        Ok(body)
    }

    async fn expect_success(&self, response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }

        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

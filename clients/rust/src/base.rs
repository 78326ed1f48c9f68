use crate::session::Session;
use pollemic_api_structs::ErrorBody;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use tracing::debug;

pub(crate) struct BaseClient {
    address: String,
    client: Client,
    session: Arc<dyn Session>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    Unauthorized,
    Unauthenticated,
    BadClientData,
    NotFound,
    UnexpectedStatusCode(StatusCode),
}

#[derive(Debug, Clone)]
pub struct APIError {
    pub variant: APIErrorVariant,
    /// Message provided by the backend, if any
    pub message: Option<String>,
}

impl APIError {
    fn new(variant: APIErrorVariant) -> Self {
        Self {
            variant,
            message: None,
        }
    }

    /// Message to show to the user: the backend message when present,
    /// otherwise the given fallback
    pub fn user_message_or(&self, fallback: &str) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => fallback.to_string(),
        }
    }
}

impl fmt::Display for APIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{:?}: {}", self.variant, message),
            None => write!(f, "{:?}", self.variant),
        }
    }
}

impl std::error::Error for APIError {}

pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String, session: Arc<dyn Session>) -> Self {
        Self {
            address: address.trim_end_matches('/').to_string(),
            client: Client::new(),
            session,
        }
    }

    pub fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }

    fn get_client(&self, method: Method, path: String) -> RequestBuilder {
        let url = format!("{}/{}", self.address, path);
        let builder = self
            .client
            .request(method, &url)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(token) = self.session.bearer_token() {
            builder.bearer_auth(token)
        } else {
            builder
        }
    }

    async fn check_status_code(&self, res: Response) -> Result<Response, APIError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let variant = match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                APIErrorVariant::BadClientData
            }
            StatusCode::UNAUTHORIZED => APIErrorVariant::Unauthenticated,
            StatusCode::FORBIDDEN => APIErrorVariant::Unauthorized,
            StatusCode::NOT_FOUND => APIErrorVariant::NotFound,
            _ => APIErrorVariant::UnexpectedStatusCode(status),
        };
        let message = res
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.user_message());
        debug!("Backend responded with {}: {:?}", status, message);

        Err(APIError { variant, message })
    }

    async fn get_json_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
    ) -> APIResponse<T> {
        res.json::<T>()
            .await
            .map_err(|_| APIError::new(APIErrorVariant::MalformedResponse))
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Result<Response, reqwest::Error>,
    ) -> APIResponse<T> {
        let res = match res {
            Ok(res) => res,
            Err(e) => {
                debug!("Request failed: {}", e);
                return Err(APIError::new(APIErrorVariant::Network));
            }
        };
        let res = self.check_status_code(res).await?;
        self.get_json_response(res).await
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(&self, path: String) -> APIResponse<T> {
        let res = self.get_client(Method::GET, path).send().await;
        self.handle_api_response(res).await
    }

    pub async fn get_with_query<T: for<'de> Deserialize<'de>, Q: Serialize>(
        &self,
        path: String,
        query: &Q,
    ) -> APIResponse<T> {
        let res = self.get_client(Method::GET, path).query(query).send().await;
        self.handle_api_response(res).await
    }

    pub async fn delete<T: for<'de> Deserialize<'de>>(&self, path: String) -> APIResponse<T> {
        let res = self.get_client(Method::DELETE, path).send().await;
        self.handle_api_response(res).await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
    ) -> APIResponse<T> {
        let res = self.get_client(Method::POST, path).json(&body).send().await;
        self.handle_api_response(res).await
    }

    pub async fn post_empty<T: for<'de> Deserialize<'de>>(&self, path: String) -> APIResponse<T> {
        let res = self.get_client(Method::POST, path).send().await;
        self.handle_api_response(res).await
    }
}

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};

use verso_core::domain::ids::{ProjectId, UserId};
use verso_core::domain::persisted::{PersistedDocument, ProjectRecord};
use verso_core::ports::{RemoteError, RemoteStore};

use crate::config::RemoteConfig;

/// Almacén remoto sobre HTTP: `PUT` de JSON con token bearer opcional.
pub struct HttpRemoteStore {
  client: Client,
  base_url: String,
  token: Option<String>,
}

impl HttpRemoteStore {
  pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
    let client =
      Client::builder().timeout(config.timeout()).build().map_err(|e| RemoteError::Transport(e.to_string()))?;
    Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string(), token: config.token.clone() })
  }

  fn user_document_url(&self, user: &UserId) -> String {
    format!("{}/users/{}/document", self.base_url, user)
  }

  fn project_url(&self, id: ProjectId) -> String {
    format!("{}/projects/{}", self.base_url, id)
  }

  fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
    match &self.token {
      Some(token) => req.bearer_auth(token),
      None => req,
    }
  }

  async fn send(&self, req: RequestBuilder) -> Result<(), RemoteError> {
    let response = self.authorized(req).send().await.map_err(|e| {
      warn!(error = %e, "remote request failed");
      RemoteError::Transport(e.to_string())
    })?;
    check_status(&response)
  }
}

fn check_status(response: &Response) -> Result<(), RemoteError> {
  let status = response.status();
  if status.is_success() {
    return Ok(());
  }
  warn!(%status, url = %response.url(), "remote rejected write");
  Err(status_error(status))
}

fn status_error(status: StatusCode) -> RemoteError {
  match status {
    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::Unauthorized,
    other => RemoteError::Status(other.as_u16()),
  }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
  async fn save_for_user(&self, user: &UserId, doc: &PersistedDocument) -> Result<(), RemoteError> {
    let url = self.user_document_url(user);
    self.send(self.client.put(&url).json(doc)).await?;
    debug!(%url, "user document stored");
    Ok(())
  }

  async fn save_project(&self, project: &ProjectRecord) -> Result<(), RemoteError> {
    let url = self.project_url(project.id);
    self.send(self.client.put(&url).json(project)).await?;
    debug!(%url, "project stored");
    Ok(())
  }
}

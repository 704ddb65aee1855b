mod error;

pub use error::GatewayError;

use codepad_core::{Project, ProjectId, ProjectSummary, SourceSet};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// HTTP client with the timeouts used for every store call.
pub fn default_http_client() -> Result<Client, GatewayError> {
    Client::builder()
        .timeout(codepad_config::REQUEST_TIMEOUT)
        .user_agent(concat!("codepad/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(GatewayError::Client)
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginReply {
    token: String,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct CreateBody<'a> {
    name: &'a str,
    #[serde(flatten)]
    sources: &'a SourceSet,
}

/// Client for the remote project store.
///
/// Tokens are passed per call; the client holds no authentication state.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    base: String,
}

impl GatewayClient {
    pub fn new(client: Client, base_url: &str) -> Result<Self, GatewayError> {
        let base = base_url.trim().trim_end_matches('/');
        let parsed = reqwest::Url::parse(base)
            .map_err(|e| GatewayError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GatewayError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            client,
            base: base.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    fn project_url(&self, id: &str) -> String {
        self.url(&format!(
            "/project/{}",
            utf8_percent_encode(id, NON_ALPHANUMERIC)
        ))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, GatewayError> {
        let endpoint = self.url("/login");
        let req = self
            .client
            .post(&endpoint)
            .json(&LoginBody { email, password });
        let reply: LoginReply = decode(&endpoint, send(&endpoint, req).await?).await?;
        info!("login accepted for {email}");
        Ok(reply.token)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), GatewayError> {
        let endpoint = self.url("/register");
        let req = self.client.post(&endpoint).json(&RegisterBody {
            username,
            email,
            password,
        });
        send(&endpoint, req).await?;
        info!("registered {email}");
        Ok(())
    }

    pub async fn list_projects(&self, token: &str) -> Result<Vec<ProjectSummary>, GatewayError> {
        let endpoint = self.url("/projects");
        let req = self.client.get(&endpoint).header(AUTHORIZATION, token);
        let projects: Vec<ProjectSummary> = decode(&endpoint, send(&endpoint, req).await?).await?;
        debug!("listed {} projects", projects.len());
        Ok(projects)
    }

    pub async fn create_project(
        &self,
        token: &str,
        name: &str,
        sources: &SourceSet,
    ) -> Result<ProjectSummary, GatewayError> {
        let endpoint = self.url("/project");
        let req = self
            .client
            .post(&endpoint)
            .header(AUTHORIZATION, token)
            .json(&CreateBody { name, sources });
        let mut created: Project = decode(&endpoint, send(&endpoint, req).await?).await?;
        if created.name.is_empty() {
            created.name = name.to_string();
        }
        info!("created project {} ({})", created.name, created.id);
        Ok(created.summary())
    }

    pub async fn fetch_project(&self, token: &str, id: &str) -> Result<Project, GatewayError> {
        let endpoint = self.project_url(id);
        let req = self.client.get(&endpoint).header(AUTHORIZATION, token);
        let mut project: Project = decode(&endpoint, send(&endpoint, req).await?).await?;
        if project.id.is_empty() {
            project.id = ProjectId::from(id);
        }
        debug!("fetched project {id}");
        Ok(project)
    }

    pub async fn update_project(
        &self,
        token: &str,
        id: &str,
        sources: &SourceSet,
    ) -> Result<(), GatewayError> {
        let endpoint = self.project_url(id);
        let req = self
            .client
            .put(&endpoint)
            .header(AUTHORIZATION, token)
            .json(sources);
        send(&endpoint, req).await?;
        info!("saved project {id}");
        Ok(())
    }

    pub async fn delete_project(&self, token: &str, id: &str) -> Result<(), GatewayError> {
        let endpoint = self.project_url(id);
        let req = self.client.delete(&endpoint).header(AUTHORIZATION, token);
        send(&endpoint, req).await?;
        info!("deleted project {id}");
        Ok(())
    }
}

async fn send(endpoint: &str, req: RequestBuilder) -> Result<Response, GatewayError> {
    let resp = req.send().await.map_err(|source| GatewayError::Transport {
        endpoint: endpoint.to_string(),
        source,
    })?;

    let status = resp.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(GatewayError::AuthDenied(status.as_u16()));
    }
    if !status.is_success() {
        return Err(GatewayError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(resp)
}

async fn decode<T: serde::de::DeserializeOwned>(
    endpoint: &str,
    resp: Response,
) -> Result<T, GatewayError> {
    resp.json::<T>().await.map_err(|source| GatewayError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_ids_are_percent_encoded_into_the_path() {
        let gw = GatewayClient::new(Client::new(), "http://store.test/api/").unwrap();
        assert_eq!(
            gw.project_url("a/b c"),
            "http://store.test/api/project/a%2Fb%20c"
        );
    }

    #[test]
    fn non_http_base_is_rejected() {
        let err = GatewayClient::new(Client::new(), "file:///tmp").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidBaseUrl(_)));
    }
}

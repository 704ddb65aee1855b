use anyhow::Context;
use codepad_core::{Project, ProjectSummary, SourceSet};
use codepad_infra::{GatewayClient, GatewayError};
use tokio::runtime::Runtime;

use crate::ports::ProjectGateway;

/// [`ProjectGateway`] over HTTP. Each call blocks the calling worker thread
/// on a small runtime owned by the adapter.
pub struct HttpProjectGateway {
    client: GatewayClient,
    runtime: Runtime,
}

impl HttpProjectGateway {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = codepad_infra::default_http_client().context("Failed to build HTTP client")?;
        let client = GatewayClient::new(http, base_url)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("codepad-net")
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;
        Ok(Self { client, runtime })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

impl ProjectGateway for HttpProjectGateway {
    fn login(&self, email: &str, password: &str) -> Result<String, GatewayError> {
        self.runtime.block_on(self.client.login(email, password))
    }

    fn register(&self, username: &str, email: &str, password: &str) -> Result<(), GatewayError> {
        self.runtime
            .block_on(self.client.register(username, email, password))
    }

    fn list_projects(&self, token: &str) -> Result<Vec<ProjectSummary>, GatewayError> {
        self.runtime.block_on(self.client.list_projects(token))
    }

    fn create_project(
        &self,
        token: &str,
        name: &str,
        sources: &SourceSet,
    ) -> Result<ProjectSummary, GatewayError> {
        self.runtime
            .block_on(self.client.create_project(token, name, sources))
    }

    fn fetch_project(&self, token: &str, id: &str) -> Result<Project, GatewayError> {
        self.runtime.block_on(self.client.fetch_project(token, id))
    }

    fn update_project(
        &self,
        token: &str,
        id: &str,
        sources: &SourceSet,
    ) -> Result<(), GatewayError> {
        self.runtime
            .block_on(self.client.update_project(token, id, sources))
    }

    fn delete_project(&self, token: &str, id: &str) -> Result<(), GatewayError> {
        self.runtime.block_on(self.client.delete_project(token, id))
    }
}

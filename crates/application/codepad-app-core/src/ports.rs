use codepad_core::{Project, ProjectSummary, SourceSet};
use codepad_infra::GatewayError;
use codepad_persistence::ClientState;

/// Blocking view of the remote project store. Called from worker threads.
pub trait ProjectGateway: Send + Sync + 'static {
    fn login(&self, email: &str, password: &str) -> Result<String, GatewayError>;
    fn register(&self, username: &str, email: &str, password: &str) -> Result<(), GatewayError>;
    fn list_projects(&self, token: &str) -> Result<Vec<ProjectSummary>, GatewayError>;
    fn create_project(
        &self,
        token: &str,
        name: &str,
        sources: &SourceSet,
    ) -> Result<ProjectSummary, GatewayError>;
    fn fetch_project(&self, token: &str, id: &str) -> Result<Project, GatewayError>;
    fn update_project(&self, token: &str, id: &str, sources: &SourceSet)
        -> Result<(), GatewayError>;
    fn delete_project(&self, token: &str, id: &str) -> Result<(), GatewayError>;
}

pub trait ClientStore: Send + Sync + 'static {
    fn load(&self) -> anyhow::Result<ClientState>;
    fn save(&self, state: &ClientState) -> anyhow::Result<()>;
}

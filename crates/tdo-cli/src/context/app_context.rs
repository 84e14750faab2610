use anyhow::Context;
use tdo_api::{TaskQuery, TodoClient};
use tdo_config::Settings;
use tdo_core::Snapshot;
use tdo_core::entities::Task;

use crate::progress::spin;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub client: TodoClient,
    pub settings: Settings,
}

impl AppContext {
    pub fn init(settings: Settings) -> anyhow::Result<Self> {
        let client = TodoClient::new(&settings.api).context("failed to build HTTP client")?;
        Ok(Self { client, settings })
    }

    /// Projects, sections, and tasks in one consistent snapshot.
    pub async fn snapshot(&self) -> anyhow::Result<Snapshot> {
        spin("fetching projects, sections, and tasks", self.client.fetch_snapshot())
            .await
            .context("failed to fetch records")
    }

    /// Projects and sections only, for commands that never look at tasks.
    pub async fn structure(&self) -> anyhow::Result<Snapshot> {
        let (projects, sections) = spin("fetching projects and sections", async {
            tokio::try_join!(self.client.list_projects(), self.client.list_sections(None))
        })
        .await
        .context("failed to fetch projects and sections")?;
        Ok(Snapshot::new(projects, sections, Vec::new()))
    }

    /// Projects only.
    pub async fn projects(&self) -> anyhow::Result<Snapshot> {
        let projects = spin("fetching projects", self.client.list_projects())
            .await
            .context("failed to fetch projects")?;
        Ok(Snapshot::new(projects, Vec::new(), Vec::new()))
    }

    /// Active tasks matching a server-side query.
    pub async fn tasks(&self, query: &TaskQuery) -> anyhow::Result<Vec<Task>> {
        spin("fetching tasks", self.client.list_tasks(query))
            .await
            .context("failed to fetch tasks")
    }
}

use tracing::info;

use super::{DomainError, DomainResult};
use crate::{
    models::{NewProjectRequest, Project},
    repositories::{ProjectRepository, RecordStore},
    validation::validate_required,
};

pub async fn list_projects(store: &dyn RecordStore) -> DomainResult<Vec<Project>> {
    Ok(store.list_projects().await?)
}

pub async fn create_project(
    store: &dyn RecordStore,
    request: NewProjectRequest,
) -> DomainResult<Project> {
    validate_required("Name", &request.name).map_err(DomainError::Validation)?;
    validate_required("Description", &request.description).map_err(DomainError::Validation)?;

    let project = store
        .insert_project(&Project::new(
            request.name.trim().to_string(),
            request.description.trim().to_string(),
        ))
        .await?;

    info!(project_id = %project.id, "Created project");
    Ok(project)
}

use std::sync::Arc;

use crate::config::{AppConfig, BackendConfig};
use crate::error::{CommandError, StoreError};
use crate::notify::{LogNotifier, Notifier};
use crate::projects::{validate_fields, Project, ProjectFields};
use crate::session::{LocalSessionProvider, Session, SessionProvider, SessionUser};
use crate::store::{Database, ImageUpload, ProjectStore, SupabaseClient};

/// Shared handles for every command.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn ProjectStore>,
    pub session: Arc<dyn SessionProvider>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn ProjectStore>,
        session: Arc<dyn SessionProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            store,
            session,
            notifier,
        }
    }

    /// Connects the configured backend.
    pub fn from_config(config: AppConfig) -> Result<Self, StoreError> {
        let backend = &config.backend;
        let (store, session): (Arc<dyn ProjectStore>, Arc<dyn SessionProvider>) = match backend {
            BackendConfig::Supabase { url, anon_key } => {
                let client = SupabaseClient::new(url, anon_key, &config.table, &config.bucket)?;
                tracing::info!(%url, table = %config.table, "[app_state] using hosted backend");
                let store: Arc<dyn ProjectStore> = Arc::new(client.clone());
                let session: Arc<dyn SessionProvider> = Arc::new(client);
                (store, session)
            }
            BackendConfig::Local { db_path, public_base_url } => {
                let db = Database::open(db_path, public_base_url, &config.bucket)?;
                tracing::info!(path = %db_path.display(), "[app_state] using local backend");
                let store: Arc<dyn ProjectStore> = Arc::new(db);
                let session: Arc<dyn SessionProvider> = Arc::new(LocalSessionProvider::new(
                    config.admin_email.clone(),
                    config.admin_password.clone(),
                ));
                (store, session)
            }
        };

        Ok(Self::new(config, store, session, Arc::new(LogNotifier)))
    }

    /// Session snapshot for building views.
    pub async fn current_session(&self) -> Session {
        self.session.session().await
    }
}

// Project commands
pub async fn list_projects(state: &AppState) -> Result<Vec<Project>, CommandError> {
    let projects = state.store.list_projects().await?;
    tracing::debug!(count = projects.len(), "[list_projects]");
    Ok(projects)
}

pub async fn get_project(state: &AppState, id: String) -> Result<Option<Project>, CommandError> {
    Ok(state.store.get_project(&id).await?)
}

pub async fn create_project(
    state: &AppState,
    fields: ProjectFields,
) -> Result<Project, CommandError> {
    validate_fields(&fields)?;
    let project = state.store.insert_project(&fields.for_save()).await?;
    tracing::info!(id = ?project.id, title = %project.fields.title, "[create_project]");
    Ok(project)
}

pub async fn update_project(
    state: &AppState,
    id: String,
    fields: ProjectFields,
) -> Result<Project, CommandError> {
    validate_fields(&fields)?;
    let fields = fields.for_save();
    state.store.update_project(&id, &fields).await?;
    tracing::info!(%id, "[update_project]");
    Ok(Project::stored(id, fields))
}

pub async fn delete_project(state: &AppState, id: String) -> Result<(), CommandError> {
    state.store.delete_project(&id).await?;
    tracing::info!(%id, "[delete_project]");
    Ok(())
}

pub async fn upload_image(state: &AppState, file: ImageUpload) -> Result<String, CommandError> {
    let url = state.store.upload_image(&file).await?;
    tracing::info!(file = %file.file_name, %url, "[upload_image]");
    Ok(url)
}

// Session commands
pub async fn sign_in(
    state: &AppState,
    email: String,
    password: String,
) -> Result<SessionUser, CommandError> {
    Ok(state.session.sign_in(email.trim(), &password).await?)
}

pub async fn sign_out(state: &AppState) -> Result<(), CommandError> {
    state.session.sign_out().await?;
    tracing::info!("[sign_out]");
    Ok(())
}

pub async fn get_session(state: &AppState) -> Result<Option<SessionUser>, CommandError> {
    Ok(state.session.current_user().await)
}

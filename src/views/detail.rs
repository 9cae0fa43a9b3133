use crate::content::{split_lanes, ContentBlock};
use crate::editor::ProjectEditor;
use crate::error::EditorError;
use crate::notify::Notifier;
use crate::projects::Project;
use crate::session::Session;
use crate::store::ProjectStore;
use crate::views::render::{render_detail, render_not_found, render_viewer};
use crate::views::route::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    /// The id matched no record.
    NotFound,
    Loaded(Project),
    /// Fetch failed with the given message.
    Failed(String),
}

/// Single project page with its own edit modal and full-size image viewer.
pub struct ProjectDetailView {
    id: String,
    session: Session,
    state: DetailState,
    editor: ProjectEditor,
    viewer: Option<String>,
}

impl ProjectDetailView {
    pub fn new(id: impl Into<String>, session: Session) -> Self {
        Self {
            id: id.into(),
            session,
            state: DetailState::Loading,
            editor: ProjectEditor::default(),
            viewer: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fetches the record once. A missing id is not an error and is never
    /// retried.
    pub async fn load(&mut self, store: &dyn ProjectStore, notifier: &dyn Notifier) {
        self.state = DetailState::Loading;
        match store.get_project(&self.id).await {
            Ok(Some(project)) => {
                tracing::debug!(id = %self.id, "[detail_view] loaded");
                self.state = DetailState::Loaded(project);
            }
            Ok(None) => {
                tracing::debug!(id = %self.id, "[detail_view] not found");
                self.state = DetailState::NotFound;
            }
            Err(e) => {
                tracing::warn!(id = %self.id, error = %e, "[detail_view] load failed");
                let message = e.to_string();
                notifier.alert(&message);
                self.state = DetailState::Failed(message);
            }
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn project(&self) -> Option<&Project> {
        match &self.state {
            DetailState::Loaded(project) => Some(project),
            _ => None,
        }
    }

    /// Text blocks and image blocks of the loaded project, each in order.
    pub fn lanes(&self) -> (Vec<&ContentBlock>, Vec<&ContentBlock>) {
        match self.project() {
            Some(project) => split_lanes(&project.fields.content_blocks),
            None => (Vec::new(), Vec::new()),
        }
    }

    pub fn can_edit(&self) -> bool {
        self.session.is_present() && self.project().is_some()
    }

    pub fn render(&self) -> String {
        match &self.state {
            DetailState::Loading => r#"<div class="loading"></div>"#.to_string(),
            DetailState::NotFound | DetailState::Failed(_) => render_not_found(),
            DetailState::Loaded(project) => {
                let mut html = render_detail(project, self.can_edit());
                if let Some(url) = &self.viewer {
                    html.push_str(&render_viewer(url));
                }
                html
            }
        }
    }

    pub fn back(&self) -> Route {
        Route::Home
    }

    // ==================== Editing ====================

    pub fn editor(&self) -> &ProjectEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut ProjectEditor {
        &mut self.editor
    }

    /// Opens the modal pre-filled from the displayed record.
    pub fn begin_edit(&mut self) -> bool {
        if !self.can_edit() {
            return false;
        }
        if let DetailState::Loaded(project) = &self.state {
            self.editor.open_edit(project);
        }
        true
    }

    /// Saves the modal. The displayed record is replaced only after the store
    /// accepts the write.
    pub async fn save_edit(
        &mut self,
        store: &dyn ProjectStore,
        notifier: &dyn Notifier,
    ) -> Result<Project, EditorError> {
        let saved = self.editor.submit(store, notifier).await?;
        self.state = DetailState::Loaded(saved.clone());
        Ok(saved)
    }

    // ==================== Image viewer ====================

    /// Opens the full-size viewer for an image block of this project.
    pub fn open_image(&mut self, block_id: &str) -> bool {
        let url = self.project().and_then(|p| {
            p.fields
                .content_blocks
                .iter()
                .find(|b| b.id() == block_id && matches!(b, ContentBlock::Image { .. }))
                .map(|b| b.content().to_string())
        });
        match url {
            Some(url) => {
                self.viewer = Some(url);
                true
            }
            None => false,
        }
    }

    pub fn close_image(&mut self) {
        self.viewer = None;
    }

    pub fn viewer(&self) -> Option<&str> {
        self.viewer.as_deref()
    }
}

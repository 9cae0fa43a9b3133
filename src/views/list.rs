use crate::config::ViewSettings;
use crate::content::{html_to_text, truncate_chars};
use crate::editor::ProjectEditor;
use crate::error::EditorError;
use crate::notify::Notifier;
use crate::projects::{Project, Technology};
use crate::session::Session;
use crate::store::ProjectStore;
use crate::views::render::render_card;
use crate::views::route::Route;

const EMPTY_LIST_HTML: &str =
    r#"<section class="project-list empty"><p>Nenhum projeto ainda.</p></section>"#;

/// Category value that disables filtering.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Ready,
    /// Fetch failed; rendered as the empty state.
    Failed,
}

/// Everything a project card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub role: String,
    pub duration: String,
    /// Plain-text, truncated description.
    pub summary: String,
    pub technologies: Vec<Technology>,
    pub category: Option<String>,
    pub expanded: bool,
    pub deletable: bool,
}

impl ProjectCard {
    pub fn render(&self) -> String {
        render_card(self)
    }
}

/// Interactions on a card. `Delete` and `ToggleExpand` come from nested
/// controls and never navigate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Open,
    Delete,
    ToggleExpand,
}

/// Project gallery. Holds its own copy of the fetched records; nothing is
/// shared with other views.
pub struct ProjectListView {
    session: Session,
    settings: ViewSettings,
    state: ListState,
    projects: Vec<Project>,
    expanded: Option<String>,
    category: String,
    editor: ProjectEditor,
}

impl ProjectListView {
    pub fn new(session: Session, settings: ViewSettings) -> Self {
        Self {
            session,
            settings,
            state: ListState::Loading,
            projects: Vec::new(),
            expanded: None,
            category: ALL_CATEGORIES.to_string(),
            editor: ProjectEditor::default(),
        }
    }

    /// Fetches the whole table. A failure alerts and leaves an empty list.
    pub async fn load(&mut self, store: &dyn ProjectStore, notifier: &dyn Notifier) {
        self.state = ListState::Loading;
        match store.list_projects().await {
            Ok(projects) => {
                tracing::debug!(count = projects.len(), "[list_view] loaded");
                self.projects = projects;
                self.state = ListState::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "[list_view] load failed");
                notifier.alert(&e.to_string());
                self.projects.clear();
                self.state = ListState::Failed;
            }
        }
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn is_empty_state(&self) -> bool {
        self.state != ListState::Loading && self.visible().next().is_none()
    }

    pub fn can_manage(&self) -> bool {
        self.session.is_present()
    }

    /// `"all"` followed by each distinct category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for category in self.projects.iter().filter_map(|p| p.fields.category.as_deref()) {
            if !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
        }
        categories
    }

    pub fn selected_category(&self) -> &str {
        &self.category
    }

    pub fn select_category(&mut self, category: &str) {
        self.category = category.to_string();
    }

    fn visible(&self) -> impl Iterator<Item = &Project> {
        let category = self.category.as_str();
        self.projects.iter().filter(move |p| {
            category == ALL_CATEGORIES || p.fields.category.as_deref() == Some(category)
        })
    }

    pub fn cards(&self) -> Vec<ProjectCard> {
        self.visible()
            .filter_map(|project| {
                let id = project.id.clone()?;
                let summary = truncate_chars(
                    &html_to_text(&project.fields.description),
                    self.settings.description_preview_chars,
                );
                Some(ProjectCard {
                    expanded: self.expanded.as_deref() == Some(id.as_str()),
                    id,
                    title: project.fields.title.clone(),
                    thumbnail: project.thumbnail(&self.settings.placeholder_image).to_string(),
                    role: project.fields.role.clone(),
                    duration: project.fields.duration.clone(),
                    summary,
                    technologies: project.fields.technologies.clone(),
                    category: project.fields.category.clone(),
                    deletable: self.can_manage(),
                })
            })
            .collect()
    }

    pub fn render(&self) -> String {
        if self.is_empty_state() {
            return EMPTY_LIST_HTML.to_string();
        }
        let cards: String = self.cards().iter().map(ProjectCard::render).collect();
        format!(r#"<section class="project-list">{}</section>"#, cards)
    }

    /// At most one card is expanded; toggling it again collapses it.
    pub fn toggle_expanded(&mut self, id: &str) {
        if self.expanded.as_deref() == Some(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id.to_string());
        }
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Dispatches a card interaction. Only `Open` returns a route.
    pub async fn handle_card(
        &mut self,
        id: &str,
        action: CardAction,
        store: &dyn ProjectStore,
        notifier: &dyn Notifier,
    ) -> Option<Route> {
        match action {
            CardAction::Open => Some(Route::ProjectDetail(id.to_string())),
            CardAction::ToggleExpand => {
                self.toggle_expanded(id);
                None
            }
            CardAction::Delete => {
                self.delete(id, store, notifier).await;
                None
            }
        }
    }

    /// Deletes remotely, then drops the card. The card stays when the store
    /// reports a failure.
    pub async fn delete(
        &mut self,
        id: &str,
        store: &dyn ProjectStore,
        notifier: &dyn Notifier,
    ) -> bool {
        if !self.can_manage() {
            return false;
        }

        match store.delete_project(id).await {
            Ok(()) => {
                self.projects.retain(|p| p.id.as_deref() != Some(id));
                if self.expanded.as_deref() == Some(id) {
                    self.expanded = None;
                }
                true
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "[list_view] delete failed");
                notifier.alert(&e.to_string());
                false
            }
        }
    }

    /// Adds a freshly saved project without re-fetching.
    pub fn append_local(&mut self, project: Project) {
        if let Some(id) = project.id.as_deref() {
            if let Some(existing) = self.projects.iter_mut().find(|p| p.id.as_deref() == Some(id)) {
                *existing = project;
                return;
            }
        }
        self.projects.push(project);
    }

    // ==================== Create editor ====================

    pub fn editor(&self) -> &ProjectEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut ProjectEditor {
        &mut self.editor
    }

    /// Opens the create modal. Requires a session.
    pub fn open_editor(&mut self) -> bool {
        if !self.can_manage() {
            return false;
        }
        self.editor.open_create();
        true
    }

    /// Saves the modal's draft and appends the stored record to the list.
    pub async fn submit_editor(
        &mut self,
        store: &dyn ProjectStore,
        notifier: &dyn Notifier,
    ) -> Result<Project, EditorError> {
        let project = self.editor.submit(store, notifier).await?;
        self.append_local(project.clone());
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::projects::ProjectFields;
    use crate::session::SessionUser;
    use crate::testing::{FlakyStore, Op};

    fn admin() -> Session {
        Session::signed_in(SessionUser { id: "u".into(), email: None })
    }

    fn fields(title: &str, category: Option<&str>) -> ProjectFields {
        ProjectFields {
            title: title.to_string(),
            description: format!("<p>{} summary</p>", title),
            category: category.map(String::from),
            ..ProjectFields::default()
        }
    }

    #[tokio::test]
    async fn test_load_and_cards() {
        let store = FlakyStore::new();
        store.db.insert_project(&ProjectFields::titled("Redesign")).unwrap();
        let notifier = RecordingNotifier::new();

        let mut view = ProjectListView::new(Session::anonymous(), ViewSettings::default());
        view.load(&store, &notifier).await;

        let cards = view.cards();
        assert_eq!(view.state(), ListState::Ready);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Redesign");
        assert_eq!(cards[0].thumbnail, "/placeholder.svg");
        assert!(!cards[0].deletable);
    }

    #[tokio::test]
    async fn test_failed_load_renders_empty_state() {
        let store = FlakyStore::new();
        store.fail(Op::List);
        let notifier = RecordingNotifier::new();

        let mut view = ProjectListView::new(Session::anonymous(), ViewSettings::default());
        view.load(&store, &notifier).await;

        assert_eq!(view.state(), ListState::Failed);
        assert!(view.is_empty_state());
        assert!(view.render().contains("empty"));
        assert_eq!(notifier.messages().len(), 1);
    }

    #[test]
    fn test_summary_truncated_plain_text() {
        let mut view = ProjectListView::new(
            Session::anonymous(),
            ViewSettings {
                placeholder_image: "/p.svg".into(),
                description_preview_chars: 10,
            },
        );
        let mut f = ProjectFields::titled("x");
        f.description = "<p>A <strong>very</strong> long description</p>".into();
        view.append_local(Project::stored("1", f));
        assert_eq!(view.cards()[0].summary, "A very lon...");
    }

    #[tokio::test]
    async fn test_open_navigates_delete_does_not() {
        let store = FlakyStore::new();
        let id = store.db.insert_project(&ProjectFields::titled("A")).unwrap().id.unwrap();
        let notifier = RecordingNotifier::new();
        let mut view = ProjectListView::new(admin(), ViewSettings::default());
        view.load(&store, &notifier).await;

        let route = view.handle_card(&id, CardAction::Open, &store, &notifier).await;
        assert_eq!(route, Some(Route::ProjectDetail(id.clone())));

        let route = view.handle_card(&id, CardAction::Delete, &store, &notifier).await;
        assert_eq!(route, None);
        assert!(view.projects().is_empty());
        assert!(store.db.list_projects().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_card() {
        let store = FlakyStore::new();
        let id = store.db.insert_project(&ProjectFields::titled("Keep")).unwrap().id.unwrap();
        let notifier = RecordingNotifier::new();
        let mut view = ProjectListView::new(admin(), ViewSettings::default());
        view.load(&store, &notifier).await;

        store.fail(Op::Delete);
        assert!(!view.delete(&id, &store, &notifier).await);
        assert_eq!(view.projects().len(), 1);
        assert_eq!(notifier.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_anonymous_cannot_delete_or_create() {
        let store = FlakyStore::new();
        let id = store.db.insert_project(&ProjectFields::titled("A")).unwrap().id.unwrap();
        let notifier = RecordingNotifier::new();
        let mut view = ProjectListView::new(Session::anonymous(), ViewSettings::default());
        view.load(&store, &notifier).await;

        assert!(!view.delete(&id, &store, &notifier).await);
        assert!(!store.called(Op::Delete));
        assert!(!view.open_editor());
    }

    #[test]
    fn test_categories_and_filter() {
        let mut view = ProjectListView::new(Session::anonymous(), ViewSettings::default());
        view.append_local(Project::stored("1", fields("Shop", Some("web"))));
        view.append_local(Project::stored("2", fields("Fit", Some("mobile"))));
        view.append_local(Project::stored("3", fields("Estate", Some("web"))));
        view.append_local(Project::stored("4", fields("Misc", None)));

        assert_eq!(view.categories(), vec!["all", "web", "mobile"]);

        view.select_category("web");
        let titles: Vec<String> = view.cards().into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Shop", "Estate"]);

        view.select_category(ALL_CATEGORIES);
        assert_eq!(view.cards().len(), 4);
    }

    #[test]
    fn test_toggle_expanded() {
        let mut view = ProjectListView::new(Session::anonymous(), ViewSettings::default());
        view.append_local(Project::stored("1", fields("A", None)));
        view.append_local(Project::stored("2", fields("B", None)));

        view.toggle_expanded("1");
        assert_eq!(view.expanded(), Some("1"));
        view.toggle_expanded("2");
        assert_eq!(view.expanded(), Some("2"));
        assert!(view.cards()[1].expanded);
        view.toggle_expanded("2");
        assert_eq!(view.expanded(), None);
    }

    #[tokio::test]
    async fn test_create_through_modal_appends_locally() {
        let store = FlakyStore::new();
        let notifier = RecordingNotifier::new();
        let mut view = ProjectListView::new(admin(), ViewSettings::default());
        view.load(&store, &notifier).await;

        assert!(view.open_editor());
        view.editor_mut().set_title("Redesign");
        let saved = view.submit_editor(&store, &notifier).await.unwrap();

        assert_eq!(view.projects().len(), 1);
        assert_eq!(view.projects()[0].id, saved.id);
        assert!(!view.editor().is_open());
    }
}

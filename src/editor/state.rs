use crate::content::{append_block, is_blank_rich_text, remove_block, BlockKind};
use crate::editor::rich_text::{AppendImageTag, RichTextField, RichTextHandle};
use crate::error::{EditorError, StoreError};
use crate::notify::Notifier;
use crate::projects::{validate_fields, BadgeVariant, Project, ProjectFields, Technology};
use crate::store::{ImageUpload, ProjectStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Closed,
    Draft,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { id: String },
}

/// Where a finished upload goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadTarget {
    /// New image content block, with an optional caption.
    ContentBlock { caption: Option<String> },
    /// The card thumbnail (`imageUrl`).
    Thumbnail,
    /// Inline image inside a rich-text field.
    Inline(RichTextField),
}

/// Proof that an upload was started through [`ProjectEditor::begin_upload`].
#[derive(Debug)]
#[must_use]
pub struct UploadTicket {
    target: UploadTarget,
    generation: u64,
}

impl UploadTicket {
    pub fn target(&self) -> &UploadTarget {
        &self.target
    }
}

/// What to send once a submit has been started.
#[derive(Debug, Clone)]
#[must_use]
pub struct SubmitRequest {
    pub mode: EditorMode,
    pub fields: ProjectFields,
}

/// Text typed into the "add" inputs but not yet added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Scratch {
    text_block: String,
    achievement: String,
    technology: String,
    image_caption: String,
}

/// Modal form that builds a project draft and saves it.
///
/// Closed -> Draft on open, Draft -> Submitting on submit, Submitting ->
/// Closed on success or back to Draft on failure. The draft is owned here
/// until a save succeeds.
pub struct ProjectEditor {
    phase: EditorPhase,
    mode: EditorMode,
    draft: ProjectFields,
    scratch: Scratch,
    pending_uploads: usize,
    last_error: Option<String>,
    /// Bumped on every reset so tickets from an earlier draft are ignored.
    generation: u64,
    rich_text: Box<dyn RichTextHandle>,
}

impl Default for ProjectEditor {
    fn default() -> Self {
        Self::new(Box::new(AppendImageTag))
    }
}

impl ProjectEditor {
    pub fn new(rich_text: Box<dyn RichTextHandle>) -> Self {
        Self {
            phase: EditorPhase::Closed,
            mode: EditorMode::Create,
            draft: ProjectFields::default(),
            scratch: Scratch::default(),
            pending_uploads: 0,
            last_error: None,
            generation: 0,
            rich_text,
        }
    }

    // ==================== Lifecycle ====================

    /// Opens an empty draft.
    pub fn open_create(&mut self) {
        self.reset();
        self.phase = EditorPhase::Draft;
        tracing::debug!("[editor] opened for create");
    }

    /// Opens a draft copied from a stored project. A project without an id
    /// opens in create mode.
    pub fn open_edit(&mut self, project: &Project) {
        self.reset();
        self.mode = match &project.id {
            Some(id) => EditorMode::Edit { id: id.clone() },
            None => EditorMode::Create,
        };
        self.draft = project.fields.clone();
        self.phase = EditorPhase::Draft;
        tracing::debug!(mode = ?self.mode, "[editor] opened for edit");
    }

    /// Discards the draft, no questions asked.
    pub fn cancel(&mut self) {
        if self.phase != EditorPhase::Closed {
            tracing::debug!("[editor] cancelled");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = EditorPhase::Closed;
        self.mode = EditorMode::Create;
        self.draft = ProjectFields::default();
        self.scratch = Scratch::default();
        self.pending_uploads = 0;
        self.last_error = None;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.phase != EditorPhase::Closed
    }

    pub fn draft(&self) -> &ProjectFields {
        &self.draft
    }

    /// Direct access to the draft while it is editable.
    pub fn draft_mut(&mut self) -> Option<&mut ProjectFields> {
        match self.phase {
            EditorPhase::Draft => Some(&mut self.draft),
            EditorPhase::Closed | EditorPhase::Submitting => None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn pending_uploads(&self) -> usize {
        self.pending_uploads
    }

    /// New uploads are allowed only when none is in flight.
    pub fn can_upload(&self) -> bool {
        self.phase == EditorPhase::Draft && self.pending_uploads == 0
    }

    /// Save button state.
    pub fn can_submit(&self) -> bool {
        self.phase == EditorPhase::Draft
            && self.pending_uploads == 0
            && validate_fields(&self.draft).is_ok()
    }

    // ==================== Field edits ====================

    fn edit(&mut self, f: impl FnOnce(&mut ProjectFields)) {
        if let Some(draft) = self.draft_mut() {
            f(draft);
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.edit(|d| d.title = title.to_string());
    }

    pub fn set_description(&mut self, html: &str) {
        self.edit(|d| d.description = html.to_string());
    }

    pub fn set_detailed_content(&mut self, html: &str) {
        self.edit(|d| {
            d.detailed_content = if is_blank_rich_text(html) {
                None
            } else {
                Some(html.to_string())
            }
        });
    }

    pub fn set_role(&mut self, role: &str) {
        self.edit(|d| d.role = role.to_string());
    }

    pub fn set_duration(&mut self, duration: &str) {
        self.edit(|d| d.duration = duration.to_string());
    }

    pub fn set_category(&mut self, category: &str) {
        let category = category.trim();
        self.edit(|d| {
            d.category = if category.is_empty() { None } else { Some(category.to_string()) }
        });
    }

    pub fn clear_thumbnail(&mut self) {
        self.edit(|d| d.image_url = None);
    }

    // ==================== Scratch inputs ====================

    pub fn set_pending_text_block(&mut self, html: &str) {
        if self.phase == EditorPhase::Draft {
            self.scratch.text_block = html.to_string();
        }
    }

    pub fn pending_text_block(&self) -> &str {
        &self.scratch.text_block
    }

    pub fn set_pending_achievement(&mut self, text: &str) {
        if self.phase == EditorPhase::Draft {
            self.scratch.achievement = text.to_string();
        }
    }

    pub fn pending_achievement(&self) -> &str {
        &self.scratch.achievement
    }

    pub fn set_pending_technology(&mut self, name: &str) {
        if self.phase == EditorPhase::Draft {
            self.scratch.technology = name.to_string();
        }
    }

    pub fn pending_technology(&self) -> &str {
        &self.scratch.technology
    }

    pub fn set_pending_caption(&mut self, caption: &str) {
        if self.phase == EditorPhase::Draft {
            self.scratch.image_caption = caption.to_string();
        }
    }

    pub fn pending_caption(&self) -> &str {
        &self.scratch.image_caption
    }

    // ==================== Lists ====================

    /// Appends the pending text block. Returns false when it was blank.
    pub fn add_text_block(&mut self) -> bool {
        if self.phase != EditorPhase::Draft {
            return false;
        }
        let before = self.draft.content_blocks.len();
        self.draft.content_blocks = append_block(
            &self.draft.content_blocks,
            BlockKind::Text,
            &self.scratch.text_block,
            None,
        );
        let added = self.draft.content_blocks.len() > before;
        if added {
            self.scratch.text_block.clear();
        }
        added
    }

    pub fn remove_block(&mut self, id: &str) {
        self.edit(|d| d.content_blocks = remove_block(&d.content_blocks, id));
    }

    pub fn add_technology(&mut self, variant: BadgeVariant) -> bool {
        let name = self.scratch.technology.trim().to_string();
        if self.phase != EditorPhase::Draft || name.is_empty() {
            return false;
        }
        self.draft.technologies.push(Technology { name, variant });
        self.scratch.technology.clear();
        true
    }

    pub fn remove_technology(&mut self, index: usize) {
        self.edit(|d| {
            if index < d.technologies.len() {
                d.technologies.remove(index);
            }
        });
    }

    pub fn add_achievement(&mut self) -> bool {
        let text = self.scratch.achievement.trim().to_string();
        if self.phase != EditorPhase::Draft || text.is_empty() {
            return false;
        }
        self.draft.achievements.push(text);
        self.scratch.achievement.clear();
        true
    }

    pub fn remove_achievement(&mut self, index: usize) {
        self.edit(|d| {
            if index < d.achievements.len() {
                d.achievements.remove(index);
            }
        });
    }

    // ==================== Uploads ====================

    /// Marks an upload as in flight. Blocks submit and further uploads until
    /// [`complete_upload`](Self::complete_upload) is called with its result.
    pub fn begin_upload(&mut self, target: UploadTarget) -> Result<UploadTicket, EditorError> {
        match self.phase {
            EditorPhase::Closed => return Err(EditorError::NotOpen),
            EditorPhase::Submitting => return Err(EditorError::AlreadySubmitting),
            EditorPhase::Draft => {}
        }
        if self.pending_uploads > 0 {
            return Err(EditorError::UploadPending);
        }
        self.pending_uploads += 1;
        Ok(UploadTicket {
            target,
            generation: self.generation,
        })
    }

    /// Applies an upload result. On failure the draft is left untouched and
    /// the error is alerted. A ticket issued before the last close or reopen
    /// is dropped without touching the current draft.
    pub fn complete_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<String, StoreError>,
        notifier: &dyn Notifier,
    ) -> Result<String, EditorError> {
        if ticket.generation != self.generation {
            tracing::debug!("[editor] dropping upload from a closed draft");
            return result.map_err(EditorError::Store);
        }
        self.pending_uploads = self.pending_uploads.saturating_sub(1);

        let url = match result {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, "[editor] image upload failed");
                let message = e.to_string();
                notifier.alert(&message);
                self.last_error = Some(message);
                return Err(EditorError::Store(e));
            }
        };

        if self.phase != EditorPhase::Draft {
            return Ok(url);
        }

        match ticket.target {
            UploadTarget::ContentBlock { caption } => {
                let caption = caption.or_else(|| {
                    let pending = self.scratch.image_caption.trim();
                    (!pending.is_empty()).then(|| pending.to_string())
                });
                self.draft.content_blocks = append_block(
                    &self.draft.content_blocks,
                    BlockKind::Image,
                    &url,
                    caption.as_deref(),
                );
                self.scratch.image_caption.clear();
            }
            UploadTarget::Thumbnail => {
                self.draft.image_url = Some(url.clone());
            }
            UploadTarget::Inline(field) => {
                let current = match field {
                    RichTextField::Description => self.draft.description.clone(),
                    RichTextField::DetailedContent => {
                        self.draft.detailed_content.clone().unwrap_or_default()
                    }
                    RichTextField::PendingTextBlock => self.scratch.text_block.clone(),
                };
                let updated = self.rich_text.insert_image(field, &current, &url);
                match field {
                    RichTextField::Description => self.draft.description = updated,
                    RichTextField::DetailedContent => self.draft.detailed_content = Some(updated),
                    RichTextField::PendingTextBlock => self.scratch.text_block = updated,
                }
            }
        }
        self.last_error = None;
        Ok(url)
    }

    /// Uploads `file` and applies it to `target`.
    pub async fn upload(
        &mut self,
        target: UploadTarget,
        file: &ImageUpload,
        store: &dyn ProjectStore,
        notifier: &dyn Notifier,
    ) -> Result<String, EditorError> {
        let ticket = self.begin_upload(target)?;
        let result = store.upload_image(file).await;
        self.complete_upload(ticket, result, notifier)
    }

    // ==================== Submit ====================

    /// Validates and moves to `Submitting`. Nothing is sent when this fails.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, EditorError> {
        match self.phase {
            EditorPhase::Closed => return Err(EditorError::NotOpen),
            EditorPhase::Submitting => return Err(EditorError::AlreadySubmitting),
            EditorPhase::Draft => {}
        }
        if self.pending_uploads > 0 {
            return Err(EditorError::UploadPending);
        }
        if let Err(e) = validate_fields(&self.draft) {
            self.last_error = Some(e.to_string());
            return Err(e.into());
        }

        self.phase = EditorPhase::Submitting;
        Ok(SubmitRequest {
            mode: self.mode.clone(),
            fields: self.draft.for_save(),
        })
    }

    /// Finishes a submit. Success closes and resets the editor; failure goes
    /// back to `Draft` with the draft intact and the error alerted.
    pub fn finish_submit(
        &mut self,
        result: Result<Project, StoreError>,
        notifier: &dyn Notifier,
    ) -> Result<Project, EditorError> {
        match result {
            Ok(project) => {
                tracing::info!(id = ?project.id, "[editor] saved");
                self.reset();
                Ok(project)
            }
            Err(e) => {
                tracing::warn!(error = %e, "[editor] save failed");
                let message = e.to_string();
                notifier.alert(&message);
                self.phase = EditorPhase::Draft;
                self.last_error = Some(message);
                Err(EditorError::Store(e))
            }
        }
    }

    /// Inserts or overwrites the project depending on the mode.
    pub async fn submit(
        &mut self,
        store: &dyn ProjectStore,
        notifier: &dyn Notifier,
    ) -> Result<Project, EditorError> {
        let request = self.begin_submit()?;
        let result = match &request.mode {
            EditorMode::Create => store.insert_project(&request.fields).await,
            EditorMode::Edit { id } => store
                .update_project(id, &request.fields)
                .await
                .map(|()| Project::stored(id.clone(), request.fields.clone())),
        };
        self.finish_submit(result, notifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentBlock, EMPTY_RICH_TEXT};
    use crate::notify::RecordingNotifier;
    use crate::testing::{FlakyStore, Op};

    fn stored_with_two_blocks() -> Project {
        Project::stored(
            "p1",
            ProjectFields {
                title: "Existing".to_string(),
                content_blocks: vec![
                    ContentBlock::Text { id: "block-1".into(), content: "<p>One</p>".into() },
                    ContentBlock::Image {
                        id: "block-2".into(),
                        content: "https://x/2.png".into(),
                        caption: None,
                    },
                ],
                ..ProjectFields::default()
            },
        )
    }

    #[test]
    fn test_closed_editor_ignores_edits() {
        let mut editor = ProjectEditor::default();
        editor.set_title("x");
        editor.set_pending_text_block("<p>a</p>");
        assert!(!editor.add_text_block());
        assert_eq!(editor.draft().title, "");
        assert!(editor.draft_mut().is_none());
    }

    #[test]
    fn test_add_text_block_clears_scratch_only_when_added() {
        let mut editor = ProjectEditor::default();
        editor.open_create();

        editor.set_pending_text_block("<p>Hello</p>");
        assert!(editor.add_text_block());
        assert_eq!(editor.pending_text_block(), "");

        editor.set_pending_text_block(EMPTY_RICH_TEXT);
        assert!(!editor.add_text_block());
        assert_eq!(editor.pending_text_block(), EMPTY_RICH_TEXT);
        assert_eq!(editor.draft().content_blocks.len(), 1);
    }

    #[test]
    fn test_technologies_and_achievements() {
        let mut editor = ProjectEditor::default();
        editor.open_create();

        editor.set_pending_technology("  Figma ");
        assert!(editor.add_technology(BadgeVariant::Secondary));
        editor.set_pending_technology("   ");
        assert!(!editor.add_technology(BadgeVariant::Default));
        editor.set_pending_achievement("Cut costs by 30%");
        assert!(editor.add_achievement());
        editor.set_pending_achievement("Second");
        assert!(editor.add_achievement());

        editor.remove_achievement(0);
        editor.remove_achievement(9);
        editor.remove_technology(3);

        assert_eq!(editor.draft().technologies[0].name, "Figma");
        assert_eq!(editor.draft().achievements, vec!["Second".to_string()]);
    }

    #[test]
    fn test_submit_guard_reflects_title_and_uploads() {
        let mut editor = ProjectEditor::default();
        assert!(!editor.can_submit());
        editor.open_create();
        assert!(!editor.can_submit());
        editor.set_title("Redesign");
        assert!(editor.can_submit());

        let ticket = editor.begin_upload(UploadTarget::Thumbnail).unwrap();
        assert!(!editor.can_submit());
        assert!(!editor.can_upload());
        assert!(matches!(editor.begin_submit(), Err(EditorError::UploadPending)));
        assert!(matches!(
            editor.begin_upload(UploadTarget::Thumbnail),
            Err(EditorError::UploadPending)
        ));

        let notifier = RecordingNotifier::new();
        editor.complete_upload(ticket, Ok("https://x/t.png".into()), &notifier).unwrap();
        assert!(editor.can_submit());
        assert_eq!(editor.draft().image_url.as_deref(), Some("https://x/t.png"));
    }

    #[tokio::test]
    async fn test_blank_title_never_reaches_store() {
        let store = FlakyStore::new();
        let notifier = RecordingNotifier::new();
        let mut editor = ProjectEditor::default();
        editor.open_create();
        editor.set_title("   ");

        let err = editor.submit(&store, &notifier).await.unwrap_err();
        assert!(matches!(err, EditorError::Validation(_)));
        assert!(store.calls().is_empty());
        assert_eq!(editor.phase(), EditorPhase::Draft);
    }

    #[tokio::test]
    async fn test_create_submit_resets_everything() {
        let store = FlakyStore::new();
        let notifier = RecordingNotifier::new();
        let mut editor = ProjectEditor::default();
        editor.open_create();
        editor.set_title("Redesign");
        editor.set_pending_text_block("<p>Body</p>");
        editor.add_text_block();
        editor.set_pending_text_block("<p>left over</p>");
        editor.set_pending_achievement("unsaved");

        let saved = editor.submit(&store, &notifier).await.unwrap();

        assert!(saved.id.is_some());
        assert_eq!(saved.fields.content_blocks.len(), 1);
        assert_eq!(editor.phase(), EditorPhase::Closed);
        assert_eq!(editor.draft(), &ProjectFields::default());
        assert_eq!(editor.pending_text_block(), "");
        assert_eq!(editor.pending_achievement(), "");
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_edit_remove_block_then_update() {
        let store = FlakyStore::new();
        let notifier = RecordingNotifier::new();
        let existing = store.db.insert_project(&stored_with_two_blocks().fields).unwrap();
        let id = existing.id.clone().unwrap();

        let mut editor = ProjectEditor::default();
        editor.open_edit(&existing);
        assert_eq!(editor.mode(), &EditorMode::Edit { id: id.clone() });
        editor.remove_block("block-1");
        assert_eq!(editor.draft().content_blocks.len(), 1);

        let saved = editor.submit(&store, &notifier).await.unwrap();
        assert_eq!(store.calls(), vec![Op::Update]);
        assert_eq!(saved.fields.content_blocks.len(), 1);

        let reloaded = store.db.get_project(&id).unwrap().unwrap();
        assert_eq!(reloaded.fields.content_blocks.len(), 1);
        assert_eq!(reloaded.fields.content_blocks[0].id(), "block-2");
    }

    #[tokio::test]
    async fn test_failed_save_returns_to_draft() {
        let store = FlakyStore::new();
        store.fail(Op::Insert);
        let notifier = RecordingNotifier::new();
        let mut editor = ProjectEditor::default();
        editor.open_create();
        editor.set_title("Retry me");

        let err = editor.submit(&store, &notifier).await.unwrap_err();
        assert!(matches!(err, EditorError::Store(_)));
        assert_eq!(editor.phase(), EditorPhase::Draft);
        assert_eq!(editor.draft().title, "Retry me");
        assert_eq!(notifier.messages(), vec!["Backend returned 503: Service unavailable"]);

        store.recover(Op::Insert);
        assert!(editor.submit(&store, &notifier).await.is_ok());
        assert_eq!(store.db.list_projects().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_upload_leaves_draft_unchanged() {
        let store = FlakyStore::new();
        store.fail(Op::Upload);
        let notifier = RecordingNotifier::new();
        let mut editor = ProjectEditor::default();
        editor.open_create();
        editor.set_title("With image");
        let before = editor.draft().clone();

        let file = ImageUpload::new("shot.png", vec![0u8; 4]);
        let result = editor
            .upload(UploadTarget::ContentBlock { caption: None }, &file, &store, &notifier)
            .await;

        assert!(result.is_err());
        assert_eq!(editor.draft(), &before);
        assert_eq!(editor.pending_uploads(), 0);
        assert_eq!(notifier.messages().len(), 1);
        assert!(!store.called(Op::Insert));
    }

    #[tokio::test]
    async fn test_upload_appends_captioned_image_block() {
        let store = FlakyStore::new();
        let notifier = RecordingNotifier::new();
        let mut editor = ProjectEditor::default();
        editor.open_create();
        editor.set_pending_caption("Home screen");

        let file = ImageUpload::new("Tela Inicial.png", vec![1, 2]);
        let url = editor
            .upload(UploadTarget::ContentBlock { caption: None }, &file, &store, &notifier)
            .await
            .unwrap();

        let block = &editor.draft().content_blocks[0];
        assert_eq!(block.content(), url);
        assert_eq!(block.caption(), Some("Home screen"));
        assert_eq!(editor.pending_caption(), "");
    }

    #[tokio::test]
    async fn test_inline_upload_goes_through_handle() {
        struct Prepend;
        impl RichTextHandle for Prepend {
            fn insert_image(&self, _field: RichTextField, html: &str, url: &str) -> String {
                format!("<img src=\"{}\">{}", url, html)
            }
        }

        let store = FlakyStore::new();
        let notifier = RecordingNotifier::new();
        let mut editor = ProjectEditor::new(Box::new(Prepend));
        editor.open_create();
        editor.set_description("<p>Intro</p>");

        let file = ImageUpload::new("a.png", vec![1]);
        let url = editor
            .upload(UploadTarget::Inline(RichTextField::Description), &file, &store, &notifier)
            .await
            .unwrap();

        assert_eq!(editor.draft().description, format!("<img src=\"{}\"><p>Intro</p>", url));
    }

    #[test]
    fn test_double_submit_rejected_while_submitting() {
        let mut editor = ProjectEditor::default();
        editor.open_create();
        editor.set_title("Once");

        let request = editor.begin_submit().unwrap();
        assert_eq!(request.mode, EditorMode::Create);
        assert_eq!(editor.phase(), EditorPhase::Submitting);
        assert!(matches!(editor.begin_submit(), Err(EditorError::AlreadySubmitting)));
        editor.set_title("changed mid-flight");
        assert_eq!(editor.draft().title, "Once");
    }

    #[test]
    fn test_submit_drops_blank_blocks() {
        let mut editor = ProjectEditor::default();
        editor.open_create();
        editor.set_title("t");
        if let Some(draft) = editor.draft_mut() {
            draft.content_blocks.push(ContentBlock::Text {
                id: "b".into(),
                content: EMPTY_RICH_TEXT.into(),
            });
        }
        let request = editor.begin_submit().unwrap();
        assert!(request.fields.content_blocks.is_empty());
    }

    #[test]
    fn test_upload_from_cancelled_draft_is_dropped() {
        let notifier = RecordingNotifier::new();
        let mut editor = ProjectEditor::default();
        editor.open_create();
        let stale = editor.begin_upload(UploadTarget::ContentBlock { caption: None }).unwrap();
        editor.cancel();

        editor.open_create();
        editor.set_title("Fresh");
        let current = editor.begin_upload(UploadTarget::Thumbnail).unwrap();

        let url = editor
            .complete_upload(stale, Ok("https://x/stale.png".into()), &notifier)
            .unwrap();
        assert_eq!(url, "https://x/stale.png");
        assert!(editor.draft().content_blocks.is_empty());
        assert_eq!(editor.pending_uploads(), 1);
        assert!(!editor.can_submit());

        editor.complete_upload(current, Ok("https://x/thumb.png".into()), &notifier).unwrap();
        assert_eq!(editor.draft().image_url.as_deref(), Some("https://x/thumb.png"));
        assert_eq!(editor.pending_uploads(), 0);
        assert!(editor.can_submit());
    }

    #[test]
    fn test_failed_upload_from_cancelled_draft_is_silent() {
        let notifier = RecordingNotifier::new();
        let mut editor = ProjectEditor::default();
        editor.open_create();
        let stale = editor.begin_upload(UploadTarget::Thumbnail).unwrap();
        editor.cancel();
        editor.open_create();

        let failure = StoreError::Status { status: 500, message: "boom".into() };
        assert!(editor.complete_upload(stale, Err(failure), &notifier).is_err());
        assert!(notifier.messages().is_empty());
        assert!(editor.last_error().is_none());
    }

    #[test]
    fn test_empty_detailed_content_is_cleared() {
        let mut editor = ProjectEditor::default();
        editor.open_create();
        editor.set_detailed_content("<p>Long read</p>");
        assert_eq!(editor.draft().detailed_content.as_deref(), Some("<p>Long read</p>"));

        editor.set_detailed_content(EMPTY_RICH_TEXT);
        assert!(editor.draft().detailed_content.is_none());
        editor.set_detailed_content("");
        assert!(editor.draft().detailed_content.is_none());
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut editor = ProjectEditor::default();
        editor.open_edit(&stored_with_two_blocks());
        editor.set_title("changed");
        editor.cancel();
        assert_eq!(editor.phase(), EditorPhase::Closed);
        assert_eq!(editor.draft(), &ProjectFields::default());
        assert_eq!(editor.mode(), &EditorMode::Create);
    }
}

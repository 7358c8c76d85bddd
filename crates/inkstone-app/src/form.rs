//! The post editor form.
//!
//! Owns the draft record and the save/close flow around the rich text
//! editor: inline validation for the required fields, dirty tracking, a
//! blocking confirm before closing with unsaved changes, and the single
//! record write to the store.

use inkstone_common::Toast;

use crate::post::PostRecord;
use crate::store::{PostStore, StoreError};

/// Form fields with inline validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Author,
    Content,
}

/// One inline validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Why a save did not happen.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SaveError {
    #[error("validation failed for {} field(s)", .0.len())]
    #[diagnostic(code(inkstone::app::validation))]
    Invalid(Vec<FieldError>),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),
}

/// Draft state for creating or editing one post.
#[derive(Debug, Default)]
pub struct PostForm {
    draft: PostRecord,
    editing_existing: bool,
    dirty: bool,
}

impl PostForm {
    /// A form for a new post.
    pub fn new() -> Self {
        Self::default()
    }

    /// A form pre-filled from an existing record.
    pub fn edit(record: PostRecord) -> Self {
        Self {
            draft: record,
            editing_existing: true,
            dirty: false,
        }
    }

    pub fn draft(&self) -> &PostRecord {
        &self.draft
    }

    /// Mutable access to the draft. Any touch marks the form dirty.
    pub fn draft_mut(&mut self) -> &mut PostRecord {
        self.dirty = true;
        &mut self.draft
    }

    pub fn set_title(&mut self, title: &str) {
        self.draft_mut().title = title.to_owned();
    }

    pub fn set_author(&mut self, author: &str) {
        self.draft_mut().author = author.to_owned();
    }

    /// The editor's change notification lands here.
    pub fn update_content(&mut self, value: &str) {
        self.draft_mut().content = value.to_owned();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Inline validation for the required fields. Empty means the form can
    /// be saved.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.draft.title.trim().is_empty() {
            errors.push(FieldError {
                field: Field::Title,
                message: "Please enter a title for your post.",
            });
        }
        if self.draft.author.trim().is_empty() {
            errors.push(FieldError {
                field: Field::Author,
                message: "Please enter an author name.",
            });
        }
        if self.draft.content.trim().is_empty() {
            errors.push(FieldError {
                field: Field::Content,
                message: "Please add some content to your post.",
            });
        }
        errors
    }

    /// Forward the whole draft to the store as one record write, keyed by
    /// the externally assigned `id`. Validation failures block the write;
    /// a successful save clears the dirty flag and returns the success
    /// toast for the host to display.
    pub fn save<S: PostStore>(&mut self, store: &mut S, id: u64) -> Result<Toast, SaveError> {
        let errors = self.validate();
        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "save blocked by validation");
            return Err(SaveError::Invalid(errors));
        }

        self.draft.id = id;
        store.put(&self.draft)?;
        self.dirty = false;

        let description = if self.editing_existing {
            "Post updated successfully!"
        } else {
            "Post created successfully!"
        };
        Ok(Toast::success("Success", description))
    }

    /// Gate a close behind the unsaved-changes confirm. The `confirm`
    /// collaborator blocks and answers; cancelling keeps the form open.
    pub fn request_close(&self, confirm: impl FnOnce(&str) -> bool) -> bool {
        if !self.dirty {
            return true;
        }
        confirm("You have unsaved changes. Are you sure you want to close without saving?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPostStore;
    use inkstone_common::{EditorConfig, ToastLevel};
    use inkstone_editor_core::Editor;

    fn valid_form() -> PostForm {
        let mut form = PostForm::new();
        form.set_title("Hello");
        form.set_author("Ada");
        form.update_content("<p>body</p>");
        form
    }

    #[test]
    fn validation_blocks_save_and_store_stays_untouched() {
        let mut form = PostForm::new();
        form.set_title("only a title");
        let mut store = MemoryPostStore::new();

        let err = form.save(&mut store, 1).unwrap_err();
        match err {
            SaveError::Invalid(errors) => {
                let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
                assert_eq!(fields, vec![Field::Author, Field::Content]);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(store.records.is_empty());
        assert!(form.is_dirty());
    }

    #[test]
    fn save_writes_one_record_keyed_by_the_given_id() {
        let mut form = valid_form();
        let mut store = MemoryPostStore::new();

        let toast = form.save(&mut store, 42).unwrap();
        assert_eq!(toast.level, ToastLevel::Success);
        assert_eq!(toast.description, "Post created successfully!");
        assert!(!form.is_dirty());

        let record = &store.records[&42];
        assert_eq!(record.title, "Hello");
        assert_eq!(record.content, "<p>body</p>");
    }

    #[test]
    fn saving_again_overwrites_the_whole_record() {
        let mut form = valid_form();
        let mut store = MemoryPostStore::new();
        form.save(&mut store, 42).unwrap();

        form.set_title("Hello, renamed");
        form.save(&mut store, 42).unwrap();

        assert_eq!(store.records.len(), 1);
        assert_eq!(store.records[&42].title, "Hello, renamed");
    }

    #[test]
    fn editing_an_existing_record_reports_an_update() {
        let record = PostRecord {
            id: 7,
            title: "t".into(),
            author: "a".into(),
            content: "c".into(),
            ..PostRecord::default()
        };
        let mut form = PostForm::edit(record);
        assert!(!form.is_dirty());

        form.update_content("<p>revised</p>");
        let mut store = MemoryPostStore::new();
        let toast = form.save(&mut store, 7).unwrap();
        assert_eq!(toast.description, "Post updated successfully!");
    }

    #[test]
    fn close_guard_only_engages_while_dirty() {
        let mut form = valid_form();

        // Dirty: the confirm decides, and cancelling keeps the form open.
        assert!(!form.request_close(|_| false));
        assert!(form.request_close(|message| {
            assert!(message.contains("unsaved changes"));
            true
        }));

        // Clean after save: no prompt at all.
        let mut store = MemoryPostStore::new();
        form.save(&mut store, 1).unwrap();
        assert!(form.request_close(|_| panic!("confirm must not run for a clean form")));
    }

    #[test]
    fn editor_changes_flow_into_the_draft() {
        let mut form = PostForm::new();
        form.set_title("T");
        form.set_author("A");

        let mut editor = Editor::new("", EditorConfig::default());
        editor.sync_external_value("<p>typed</p>");
        // The shell reads the editor at save time.
        form.update_content(&editor.value());

        let mut store = MemoryPostStore::new();
        form.save(&mut store, 9).unwrap();
        assert_eq!(store.records[&9].content, "<p>typed</p>");
    }

    #[test]
    fn store_failure_propagates_and_keeps_the_form_dirty() {
        struct FailingStore;
        impl PostStore for FailingStore {
            fn put(&mut self, _record: &PostRecord) -> Result<(), StoreError> {
                Err(StoreError::new("offline"))
            }
        }

        let mut form = valid_form();
        let err = form.save(&mut FailingStore, 1).unwrap_err();
        assert!(matches!(err, SaveError::Store(_)));
        assert!(form.is_dirty());
    }
}

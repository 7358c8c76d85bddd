//! End-to-end flows through the editor shell.

use inkstone_common::EditorConfig;
use inkstone_editor_core::{
    Editor, EditorMode, Key, KeyCombo, KeydownResult, Modifiers,
};
use inkstone_markup::validate_fragment;
use web_time::{Duration, Instant};

fn editor_with(content: &str) -> Editor {
    Editor::new(content, EditorConfig::default())
}

#[test]
fn bold_selection_enables_undo() {
    let mut editor = editor_with("hello");
    assert!(!editor.can_undo());

    editor.select(0, 5);
    let content = editor.apply_command("bold", None);

    assert_eq!(content, "<strong>hello</strong>");
    assert!(editor.can_undo());
    assert!(!editor.can_redo());
    assert_eq!(validate_fragment(&content), Ok(()));
}

#[test]
fn unsupported_command_is_a_silent_no_op() {
    let mut editor = editor_with("<p>x</p>");
    let content = editor.apply_command("insertEmoji", Some("🎉"));

    assert_eq!(content, "<p>x</p>");
    assert!(!editor.can_undo());
}

#[test]
fn undo_then_redo_restores_the_exact_snapshot() {
    let mut editor = editor_with("hello");
    editor.select(0, 5);
    let bolded = editor.bold();

    assert_eq!(editor.undo().as_deref(), Some("hello"));
    assert!(editor.can_redo());
    assert_eq!(editor.redo(), Some(bolded.clone()));
    assert_eq!(editor.value(), bolded);
}

#[test]
fn commit_after_undo_prunes_the_redo_branch() {
    let mut editor = editor_with("one two");
    editor.select(0, 3);
    editor.bold();
    editor.select(editor.value().find("two").unwrap(), editor.value().len());
    editor.italic();

    editor.undo();
    // A fresh commit while not at the tail discards the forward branch.
    editor.select(0, 1);
    editor.bold();

    assert!(!editor.can_redo());
    assert_eq!(editor.redo(), None);
}

#[test]
fn preview_round_trip_drops_uncommitted_surface_state() {
    let mut editor = editor_with("<p>committed</p>");
    // Stray state that never went through a commit.
    editor.sync_external_value("<p>stray</p>");
    assert_eq!(editor.value(), "<p>stray</p>");

    assert_eq!(editor.toggle_preview(), EditorMode::Previewing);
    assert_eq!(editor.toggle_preview(), EditorMode::Editing);

    // Back in editing mode the surface matches the last pushed snapshot.
    assert_eq!(editor.value(), "<p>committed</p>");
}

#[test]
fn commands_are_inert_while_previewing() {
    let mut editor = editor_with("<p>abc</p>");
    editor.select(3, 6);
    editor.toggle_preview();

    let content = editor.apply_command("bold", None);
    assert_eq!(content, "<p>abc</p>");
    assert!(!editor.can_undo());
}

#[test]
fn external_echo_does_not_clobber_the_surface() {
    let mut editor = editor_with("<p>a</p>");
    editor.select(3, 4);
    let committed = editor.bold();

    // The host echoes our own change notification back.
    assert!(!editor.sync_external_value(&committed));
    // A genuinely new external value applies.
    assert!(editor.sync_external_value("<p>other</p>"));
    assert_eq!(editor.value(), "<p>other</p>");
}

#[test]
fn keyboard_shortcuts_drive_commands_and_history() {
    let mut editor = editor_with("hi");
    editor.select(0, 2);

    let bold = KeyCombo::with_modifiers(Key::character("b"), Modifiers::CTRL);
    assert_eq!(editor.handle_key(&bold, false), KeydownResult::Handled);
    assert_eq!(editor.value(), "<strong>hi</strong>");

    let undo = KeyCombo::with_modifiers(Key::character("z"), Modifiers::CTRL);
    assert_eq!(editor.handle_key(&undo, false), KeydownResult::Handled);
    assert_eq!(editor.value(), "hi");

    let redo = KeyCombo::with_modifiers(Key::character("z"), Modifiers::CTRL_SHIFT);
    assert_eq!(editor.handle_key(&redo, false), KeydownResult::Handled);
    assert_eq!(editor.value(), "<strong>hi</strong>");

    let other = KeyCombo::with_modifiers(Key::character("s"), Modifiers::CTRL);
    assert_eq!(editor.handle_key(&other, false), KeydownResult::NotHandled);
}

#[test]
fn autosave_signals_once_after_a_change_settles() {
    let mut editor = editor_with("");
    let start = Instant::now();

    // No changes: never fires.
    assert!(editor.poll_autosave(start + Duration::from_secs(60)).is_none());

    editor.select(0, 0);
    editor.sync_external_value("seed"); // stray, uncommitted: no rearm
    assert!(editor.poll_autosave(start + Duration::from_secs(60)).is_none());

    let mut editor = editor_with("draft");
    editor.select(0, 5);
    editor.bold();
    // Too early.
    assert!(editor.poll_autosave(Instant::now()).is_none());
    // Past the debounce window.
    let toast = editor
        .poll_autosave(Instant::now() + Duration::from_secs(6))
        .expect("autosave fires after the window");
    assert_eq!(toast.title, "Auto-saved");

    // Fires once per change.
    assert!(
        editor
            .poll_autosave(Instant::now() + Duration::from_secs(12))
            .is_none()
    );
}

#[test]
fn autosave_never_fires_after_close() {
    let mut editor = editor_with("x");
    editor.select(0, 1);
    editor.bold();
    editor.close();

    assert!(
        editor
            .poll_autosave(Instant::now() + Duration::from_secs(60))
            .is_none()
    );
}

#[test]
fn preview_html_renders_code_widgets_from_the_current_snapshot() {
    let mut editor = editor_with("");
    let request = editor.request_code_block().unwrap();
    editor.submit_code_block(request, "python", "print(1)").unwrap();

    editor.toggle_preview();
    let html = editor.preview_html();

    assert!(html.contains(r#"<span class="code-block-language">python</span>"#));
    assert!(html.contains("copy-btn"));
    assert!(!html.contains("data-language"));
}

#[test]
fn placeholder_shows_only_for_empty_editing_surface() {
    let mut editor = editor_with("");
    assert!(editor.placeholder_visible());
    assert_eq!(editor.placeholder(), "Start writing...");

    editor.toggle_preview();
    assert!(!editor.placeholder_visible());
    editor.toggle_preview();

    editor.sync_external_value("<p>x</p>");
    assert!(!editor.placeholder_visible());
}

//! Media ingestion: turning picked or dropped image files into inline
//! embeds.
//!
//! File reading is the one asynchronous operation in the editor, so it is
//! split in two phases. `begin_image_*` validates the request and captures
//! the insertion point; the host reads the bytes however it likes and
//! calls `complete_image`, which builds a self-contained data-URL `<img>`
//! and commits a snapshot atomically. A completion that arrives after the
//! editor closed (or after the surface was replaced) is dropped - there is
//! no cancellation path for an in-flight read, so the guard lives here.

use base64::{Engine, engine::general_purpose::STANDARD};
use inkstone_common::Toast;
use inkstone_markup::FragmentBuilder;
use mime_sniffer::MimeTypeSniffer;
use smol_str::SmolStr;

use crate::editor::Editor;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Metadata of a file offered to the editor. The bytes arrive later,
/// at `complete_image`.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    /// MIME type as declared by the source (file input, drag payload).
    pub mime: Option<String>,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, mime: Option<&str>) -> Self {
        Self {
            name: name.into(),
            mime: mime.map(str::to_owned),
        }
    }

    fn declares_image(&self) -> bool {
        self.mime
            .as_deref()
            .is_some_and(|m| m.starts_with("image/"))
    }
}

/// An accepted ingestion waiting for its bytes.
#[derive(Debug)]
pub struct PendingImage {
    pub(crate) caret: usize,
    pub(crate) generation: u64,
    pub(crate) alt: SmolStr,
    pub(crate) name: String,
    pub(crate) declared_mime: Option<String>,
}

impl Editor {
    /// Accept a file chosen through the file picker.
    ///
    /// Note the asymmetry with [`Editor::begin_image_drop`]: picker
    /// selections are not MIME-checked, mirroring the accept-filtered
    /// file input this replaces.
    pub fn begin_image_pick(&mut self, file: &IncomingFile) -> Option<PendingImage> {
        if !self.editable() {
            return None;
        }
        Some(self.pending(file, "Uploaded image"))
    }

    /// Accept a drag-and-drop. The first file declaring an `image/*` MIME
    /// type wins; the rest of the drop is ignored. A drop with no image
    /// files is a no-op.
    pub fn begin_image_drop(&mut self, files: &[IncomingFile]) -> Option<PendingImage> {
        if !self.editable() {
            return None;
        }
        let Some(file) = files.iter().find(|f| f.declares_image()) else {
            if !files.is_empty() {
                tracing::debug!(count = files.len(), "drop contained no image files");
            }
            return None;
        };
        Some(self.pending(file, "Dropped image"))
    }

    fn pending(&self, file: &IncomingFile, alt: &'static str) -> PendingImage {
        PendingImage {
            caret: self.surface.caret(),
            generation: self.generation,
            alt: SmolStr::new_static(alt),
            name: file.name.clone(),
            declared_mime: file.mime.clone(),
        }
    }

    /// Finish an ingestion with the bytes the host read. Injects the embed
    /// at the captured insertion point, commits a snapshot and returns it.
    ///
    /// Returns None (leaving content and history untouched) when the read
    /// went stale: editor closed, surface replaced, or no longer editing.
    pub fn complete_image(&mut self, pending: PendingImage, bytes: &[u8]) -> Option<String> {
        if !self.editable() || pending.generation != self.generation {
            tracing::debug!(file = %pending.name, "stale image read dropped");
            return None;
        }

        let mime = pending
            .declared_mime
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(str::to_owned)
            .or_else(|| bytes.sniff_mime_type().map(str::to_owned))
            .unwrap_or_else(|| FALLBACK_MIME.to_owned());

        let src = format!("data:{mime};base64,{}", STANDARD.encode(bytes));
        let mut b = FragmentBuilder::new();
        b.void("img")
            .attr("src", &src)
            .attr("alt", &pending.alt)
            .attr("style", "max-width: 100%; height: auto;");
        let fragment = b.finish();

        self.surface.set_caret(pending.caret);
        self.surface.insert_fragment_at_caret(&fragment);

        let content = self.value();
        self.commit(&content);
        Some(content)
    }

    /// Report a failed file read. Content and history stay untouched; the
    /// host forwards the returned toast to its notifier.
    pub fn fail_image(&self, pending: PendingImage, reason: &str) -> Toast {
        tracing::warn!(file = %pending.name, reason, "image read failed");
        Toast::destructive(
            "Image failed to load",
            format!("Could not read {}.", pending.name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkstone_markup::validate_fragment;

    fn png_file() -> IncomingFile {
        IncomingFile::new("shot.png", Some("image/png"))
    }

    #[test]
    fn picked_image_becomes_a_data_url_embed() {
        let mut editor = Editor::default();
        let pending = editor.begin_image_pick(&png_file()).unwrap();
        let content = editor.complete_image(pending, b"ABC").unwrap();

        assert_eq!(
            content,
            r#"<img src="data:image/png;base64,QUJD" alt="Uploaded image" style="max-width: 100%; height: auto;" />"#
        );
        assert!(editor.can_undo());
        assert_eq!(validate_fragment(&content), Ok(()));
    }

    #[test]
    fn first_image_in_a_multi_file_drop_wins() {
        let mut editor = Editor::default();
        let files = vec![
            IncomingFile::new("notes.txt", Some("text/plain")),
            IncomingFile::new("a.gif", Some("image/gif")),
            IncomingFile::new("b.png", Some("image/png")),
        ];
        let pending = editor.begin_image_drop(&files).unwrap();
        let content = editor.complete_image(pending, b"X").unwrap();
        assert!(content.contains("data:image/gif;base64,"));
        assert!(content.contains(r#"alt="Dropped image""#));
    }

    #[test]
    fn non_image_drop_is_a_no_op() {
        let mut editor = Editor::default();
        let before = editor.value();
        let files = vec![IncomingFile::new("notes.txt", Some("text/plain"))];

        assert!(editor.begin_image_drop(&files).is_none());
        assert_eq!(editor.value(), before);
        assert!(!editor.can_undo());
    }

    #[test]
    fn picker_selection_skips_the_mime_check() {
        // The observed asymmetry: a picked file is accepted even without
        // an image MIME type, while the same file in a drop is refused.
        let mut editor = Editor::default();
        let file = IncomingFile::new("data.bin", None);

        assert!(editor.begin_image_drop(std::slice::from_ref(&file)).is_none());
        assert!(editor.begin_image_pick(&file).is_some());
    }

    #[test]
    fn undeclared_mime_falls_back_to_sniffing() {
        let mut editor = Editor::default();
        let pending = editor.begin_image_pick(&IncomingFile::new("x", None)).unwrap();
        // A real PNG header sniffs as image/png.
        let bytes = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        let content = editor.complete_image(pending, bytes).unwrap();
        assert!(content.contains("data:image/png;base64,"));
    }

    #[test]
    fn stale_completion_after_close_is_dropped() {
        let mut editor = Editor::default();
        let pending = editor.begin_image_pick(&png_file()).unwrap();
        editor.close();

        assert!(editor.complete_image(pending, b"ABC").is_none());
    }

    #[test]
    fn completion_during_preview_is_dropped() {
        let mut editor = Editor::default();
        let pending = editor.begin_image_pick(&png_file()).unwrap();
        editor.toggle_preview();

        assert!(editor.complete_image(pending, b"ABC").is_none());
        assert!(!editor.can_undo());
    }

    #[test]
    fn failed_read_reports_a_toast_and_keeps_history() {
        let mut editor = Editor::default();
        let pending = editor.begin_image_pick(&png_file()).unwrap();
        let toast = editor.fail_image(pending, "permission denied");

        assert_eq!(toast.title, "Image failed to load");
        assert!(!editor.can_undo());
    }
}

//! Code block insertion.
//!
//! Collecting the language and code body is a host concern (a modal, a
//! palette, whatever), so insertion is a request/response exchange:
//! `request_code_block` captures the insertion point, the host gathers the
//! two strings and either submits or cancels. An empty code body aborts
//! the whole operation - the language answer is discarded with it.

use inkstone_markup::FragmentBuilder;

use crate::editor::Editor;

/// A pending code block insertion, waiting on the host's prompt.
#[derive(Debug)]
pub struct CodeBlockRequest {
    pub(crate) caret: usize,
    pub(crate) generation: u64,
}

impl Editor {
    /// Start a code block insertion at the current caret. None outside
    /// editing mode.
    pub fn request_code_block(&mut self) -> Option<CodeBlockRequest> {
        if !self.editable() {
            return None;
        }
        Some(CodeBlockRequest {
            caret: self.surface.caret(),
            generation: self.generation,
        })
    }

    /// Complete a code block insertion.
    ///
    /// The code body is stored verbatim (escaped in transit, decoded on
    /// display). A whitespace-only body aborts and returns None with
    /// content and history untouched; an empty language falls back to
    /// `text`. A trailing empty paragraph is appended after the block so
    /// further typing is not trapped inside the code region.
    pub fn submit_code_block(
        &mut self,
        request: CodeBlockRequest,
        language: &str,
        code: &str,
    ) -> Option<String> {
        if !self.editable() || request.generation != self.generation {
            tracing::debug!("stale code block request dropped");
            return None;
        }
        if code.trim().is_empty() {
            tracing::debug!("empty code body, insertion aborted");
            return None;
        }

        let language = language.trim();
        let language = if language.is_empty() { "text" } else { language };

        let mut b = FragmentBuilder::new();
        b.start("pre")
            .attr("data-language", language)
            .start("code")
            .text(code)
            .end()
            .end()
            .start("p")
            .void("br")
            .end();
        let fragment = b.finish();

        self.surface.set_caret(request.caret);
        self.surface.insert_fragment_at_caret(&fragment);

        let content = self.value();
        self.commit(&content);
        Some(content)
    }

    /// Abandon a code block request (the host's prompt was dismissed).
    pub fn cancel_code_block(&mut self, _request: CodeBlockRequest) {
        tracing::debug!("code block request cancelled");
    }
}

//! Strict well-formedness check for Content Snapshots.

use smol_str::SmolStr;
use thiserror::Error;

use crate::event::FragmentEvent;
use crate::parser::FragmentParser;

/// A violation of the snapshot well-formedness invariant.
#[derive(Debug, Error, miette::Diagnostic, PartialEq, Eq)]
pub enum FragmentError {
    #[error("<{name}> opened at byte {offset} is never closed")]
    #[diagnostic(code(inkstone::markup::unclosed))]
    Unclosed { name: SmolStr, offset: usize },

    #[error("</{found}> at byte {offset} closes <{expected}>")]
    #[diagnostic(code(inkstone::markup::misnested))]
    MismatchedClose {
        expected: SmolStr,
        found: SmolStr,
        offset: usize,
    },

    #[error("</{name}> at byte {offset} has nothing to close")]
    #[diagnostic(code(inkstone::markup::stray_close))]
    StrayClose { name: SmolStr, offset: usize },
}

/// Check that every tag in the fragment is balanced and properly nested.
///
/// Snapshots produced by the editing surface always pass; this exists so
/// programmatic injection and tests can assert the invariant.
pub fn validate_fragment(fragment: &str) -> Result<(), FragmentError> {
    let mut stack: Vec<(SmolStr, usize)> = Vec::new();

    for (event, span) in FragmentParser::new(fragment) {
        match event {
            FragmentEvent::Start(tag) => stack.push((tag.name, span.start)),
            FragmentEvent::End(name) => match stack.pop() {
                Some((open, _)) if open == name => {}
                Some((open, _)) => {
                    return Err(FragmentError::MismatchedClose {
                        expected: open,
                        found: name,
                        offset: span.start,
                    });
                }
                None => {
                    return Err(FragmentError::StrayClose {
                        name,
                        offset: span.start,
                    });
                }
            },
            FragmentEvent::Void(_) | FragmentEvent::Text(_) => {}
        }
    }

    match stack.pop() {
        Some((name, offset)) => Err(FragmentError::Unclosed { name, offset }),
        None => Ok(()),
    }
}

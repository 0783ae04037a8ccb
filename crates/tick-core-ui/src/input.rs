//! Editor input variants.
//!
//! An editor input names what an editor is showing: a workspace source
//! file, a compiled class file, an archive entry, a bare element handle,
//! or a failed resolution. The variants form a closed set dispatched by
//! exhaustive matching, and the whole value round-trips through JSON for
//! session persistence.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An ordered, hashable key identifying the host document an input is
/// backed by. Inputs with no backing document have no key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentKey(pub String);

/// Failure to restore a persisted editor input.
#[derive(Debug, Error)]
pub enum InputError {
    /// The persisted JSON could not be parsed.
    #[error("invalid persisted editor input: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What an editor is showing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditorInput {
    /// A source file in the workspace.
    SourceFile {
        /// Workspace-relative path.
        path: PathBuf,
    },
    /// A compiled class file with attached or derived source.
    ClassFile {
        /// Fully qualified type handle.
        type_handle: String,
    },
    /// An entry inside an archive on the classpath.
    JarEntry {
        /// Path to the archive.
        archive: PathBuf,
        /// Entry path inside the archive.
        entry: String,
    },
    /// A bare element handle with no resolvable document (e.g. a working
    /// copy that was discarded).
    HandleOnly {
        /// The element handle.
        handle: String,
    },
    /// Input resolution failed; the editor shows a placeholder.
    Exceptional {
        /// Why resolution failed.
        message: String,
    },
}

impl EditorInput {
    /// Short name for tab labels.
    pub fn display_name(&self) -> String {
        match self {
            EditorInput::SourceFile { path } => file_name(path),
            EditorInput::ClassFile { type_handle } => type_handle
                .rsplit('.')
                .next()
                .unwrap_or(type_handle)
                .to_string(),
            EditorInput::JarEntry { entry, .. } => entry
                .rsplit('/')
                .next()
                .unwrap_or(entry)
                .to_string(),
            EditorInput::HandleOnly { handle } => handle.clone(),
            EditorInput::Exceptional { .. } => "<unresolved>".to_string(),
        }
    }

    /// Long description for tooltips.
    pub fn tooltip(&self) -> String {
        match self {
            EditorInput::SourceFile { path } => path.display().to_string(),
            EditorInput::ClassFile { type_handle } => type_handle.clone(),
            EditorInput::JarEntry { archive, entry } => {
                format!("{}!{entry}", archive.display())
            }
            EditorInput::HandleOnly { handle } => handle.clone(),
            EditorInput::Exceptional { message } => message.clone(),
        }
    }

    /// The host document this input is backed by, if any.
    ///
    /// Annotation models are bound per document key; inputs without a key
    /// never carry error ticks.
    pub fn document_key(&self) -> Option<DocumentKey> {
        match self {
            EditorInput::SourceFile { path } => {
                Some(DocumentKey(format!("file:{}", path.display())))
            }
            EditorInput::ClassFile { type_handle } => {
                Some(DocumentKey(format!("class:{type_handle}")))
            }
            EditorInput::JarEntry { archive, entry } => {
                Some(DocumentKey(format!("jar:{}!{entry}", archive.display())))
            }
            EditorInput::HandleOnly { .. } | EditorInput::Exceptional { .. } => None,
        }
    }

    /// Whether the shown document accepts edits.
    pub fn is_editable(&self) -> bool {
        match self {
            EditorInput::SourceFile { .. } => true,
            EditorInput::ClassFile { .. }
            | EditorInput::JarEntry { .. }
            | EditorInput::HandleOnly { .. }
            | EditorInput::Exceptional { .. } => false,
        }
    }

    /// Whether an annotation model can be bound for this input.
    pub fn supports_annotations(&self) -> bool {
        self.document_key().is_some()
    }

    /// Serialize for session persistence.
    pub fn to_persisted(&self) -> String {
        // Serialization of this enum cannot fail: no non-string keys, no
        // non-finite floats.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Restore a persisted input.
    pub fn from_persisted(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

//! Search request and result data models.
//!
//! Documents are treated as opaque payloads: the core reads only the id and
//! title, and every other field the backend sends is preserved untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Number of results requested when the caller does not specify one.
pub const DEFAULT_TOP_K: usize = 5;

/// Body of `POST /api/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Trimmed, non-empty query text.
    pub query: String,

    /// Upper bound on the number of results the backend should return.
    pub top_k: usize,
}

impl SearchRequest {
    /// Creates a new search request body.
    pub fn new(query: impl Into<String>, top_k: usize) -> Self {
        Self {
            query: query.into(),
            top_k,
        }
    }
}

/// Identifier of a document, numeric or textual depending on the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    /// Numeric identifier.
    Number(i64),
    /// String identifier.
    Text(String),
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Number(n) => write!(f, "{}", n),
            DocumentId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Metadata attached to a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document identifier, if the backend supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,

    /// Human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Any further metadata fields, kept verbatim.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// A document returned by the search backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Content body.
    #[serde(default)]
    pub page_content: String,

    /// Identifying metadata and open-ended extra fields.
    #[serde(default)]
    pub metadata: DocumentMetadata,

    /// Top-level fields beyond content and metadata.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Document {
    /// Returns the document id, if any.
    pub fn id(&self) -> Option<&DocumentId> {
        self.metadata.id.as_ref()
    }

    /// Returns the document title, if any.
    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }
}

/// A ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The matched document.
    pub document: Document,

    /// Backend-assigned relevance score. Results arrive already ordered by
    /// the backend; the client never re-sorts them.
    pub score: f64,

    /// Optional explanation of why the document matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

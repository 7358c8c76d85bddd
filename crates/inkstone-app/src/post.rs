//! Post records as written to the external store.

use serde::{Deserialize, Serialize};

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

/// The full record the enclosing form forwards to the store on save.
///
/// Field naming follows the hosted collection this mirrors
/// (`featureImage`, `publishDate`, ...). The identifier is assigned
/// externally; the form never invents one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub status: PostStatus,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub feature_image: String,
    #[serde(default)]
    pub post_images: Vec<String>,
    #[serde(default)]
    pub reading_level: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub publish_date: String,
}

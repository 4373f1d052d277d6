//! # Domain Models
//!
//! These structs represent the core entities of Rusty-Posts.
//! Rows carry their owner's foreign key; the `Nested*` types are the
//! detached, fully assembled snapshots handed back by read operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type PostId = i64;
pub type CommentId = i64;
pub type FileId = i64;

/// Text rendering used for every `created` field that leaves the system.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const WHOLE_SECOND_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders `YYYY-MM-DD HH:MM:SS.ffffff`, dropping the fraction when it is zero.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    if ts.timestamp_subsec_micros() == 0 {
        ts.format(WHOLE_SECOND_FORMAT).to_string()
    } else {
        ts.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// A blog-style post. The root of the ownership hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    /// Set once at insertion
    pub created: DateTime<Utc>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub text: String,
    pub created: DateTime<Utc>,
    /// Author identifier, free text
    pub user: String,
}

/// Metadata for a file attached to a comment. The content itself lives
/// outside the system; only its path is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachedFile {
    pub id: FileId,
    pub comment_id: CommentId,
    pub title: String,
    pub created: DateTime<Utc>,
    pub file_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedComment {
    pub comment: Comment,
    pub attached_files: Vec<AttachedFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedPost {
    pub post: Post,
    pub comments: Vec<NestedComment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub text: String,
}

/// The mutable fields of a Post. `id` and `created` are not represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostChanges {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub post_id: PostId,
    pub text: String,
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttachedFile {
    pub comment_id: CommentId,
    pub title: String,
    pub file_path: String,
}

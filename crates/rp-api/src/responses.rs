//! JSON bodies returned by the handlers. Timestamps go out as text.

use rp_core::models::{
    format_timestamp, AttachedFile, CommentId, FileId, NestedComment, NestedPost, Post, PostId,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AttachedFileBody {
    pub id: FileId,
    pub title: String,
    pub created: String,
    pub file_path: String,
}

/// A comment as it appears nested inside a post.
#[derive(Debug, Serialize)]
pub struct NestedCommentBody {
    pub id: CommentId,
    pub text: String,
    pub created: String,
    pub user: String,
    pub attached_files: Vec<AttachedFileBody>,
}

/// A comment in the global listing, which also names its post.
#[derive(Debug, Serialize)]
pub struct CommentBody {
    pub id: CommentId,
    pub post_id: PostId,
    pub text: String,
    pub created: String,
    pub user: String,
    pub attached_files: Vec<AttachedFileBody>,
}

#[derive(Debug, Serialize)]
pub struct PostBody {
    pub id: PostId,
    pub title: String,
    pub created: String,
    pub text: String,
    pub comments: Vec<NestedCommentBody>,
}

/// Returned by create: the post without its comments.
#[derive(Debug, Serialize)]
pub struct CreatedPostBody {
    pub id: PostId,
    pub title: String,
    pub created: String,
    pub text: String,
}

/// Returned by update.
#[derive(Debug, Serialize)]
pub struct UpdatedPostBody {
    pub id: PostId,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

impl From<AttachedFile> for AttachedFileBody {
    fn from(file: AttachedFile) -> Self {
        Self {
            id: file.id,
            created: format_timestamp(&file.created),
            title: file.title,
            file_path: file.file_path,
        }
    }
}

fn file_bodies(files: Vec<AttachedFile>) -> Vec<AttachedFileBody> {
    files.into_iter().map(AttachedFileBody::from).collect()
}

impl From<NestedComment> for NestedCommentBody {
    fn from(nested: NestedComment) -> Self {
        let NestedComment { comment, attached_files } = nested;
        Self {
            id: comment.id,
            text: comment.text,
            created: format_timestamp(&comment.created),
            user: comment.user,
            attached_files: file_bodies(attached_files),
        }
    }
}

impl From<NestedComment> for CommentBody {
    fn from(nested: NestedComment) -> Self {
        let NestedComment { comment, attached_files } = nested;
        Self {
            id: comment.id,
            post_id: comment.post_id,
            text: comment.text,
            created: format_timestamp(&comment.created),
            user: comment.user,
            attached_files: file_bodies(attached_files),
        }
    }
}

impl From<NestedPost> for PostBody {
    fn from(nested: NestedPost) -> Self {
        let NestedPost { post, comments } = nested;
        Self {
            id: post.id,
            title: post.title,
            created: format_timestamp(&post.created),
            text: post.text,
            comments: comments.into_iter().map(NestedCommentBody::from).collect(),
        }
    }
}

impl From<Post> for CreatedPostBody {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            created: format_timestamp(&post.created),
            text: post.text,
        }
    }
}

impl From<Post> for UpdatedPostBody {
    fn from(post: Post) -> Self {
        Self { id: post.id, title: post.title, text: post.text }
    }
}

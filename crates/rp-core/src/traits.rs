//! # Core Traits (Ports)
//!
//! Any storage plugin must implement these traits to be used by the binary.

use async_trait::async_trait;
use crate::error::Result;
use crate::models::{
    AttachedFile, Comment, CommentId, NestedComment, NestedPost, NewAttachedFile, NewComment,
    NewPost, Post, PostChanges, PostId,
};

/// Data persistence contract for posts, comments, and attached files.
///
/// Every operation addressing an entity by id fails with
/// [`AppError::NotFound`](crate::AppError::NotFound) when the id is absent.
/// Multi-row operations must run inside a single storage transaction.
#[async_trait]
pub trait PostRepo: Send + Sync {
    // Post Operations
    async fn list_posts(&self) -> Result<Vec<NestedPost>>;
    async fn create_post(&self, post: NewPost) -> Result<Post>;
    async fn get_post(&self, id: PostId) -> Result<NestedPost>;
    /// Only title and text change; comments are untouched.
    async fn update_post(&self, id: PostId, changes: PostChanges) -> Result<Post>;
    /// Removes the post together with its comments and their files.
    async fn delete_post(&self, id: PostId) -> Result<()>;

    // Comment Operations
    async fn list_comments(&self) -> Result<Vec<NestedComment>>;
    /// Fails with NotFound when the owning post does not exist.
    async fn create_comment(&self, comment: NewComment) -> Result<Comment>;
    /// Removes the comment together with its files.
    async fn delete_comment(&self, id: CommentId) -> Result<()>;

    // Attached File Operations
    /// Fails with NotFound when the owning comment does not exist.
    async fn attach_file(&self, file: NewAttachedFile) -> Result<AttachedFile>;
}

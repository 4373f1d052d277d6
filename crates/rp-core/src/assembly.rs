//! # Nested Read Assembly
//!
//! Storage plugins fetch flat rows and hand them here to build the
//! Post → Comment → AttachedFile tree. Input order is preserved, so callers
//! control child ordering through their queries.

use std::collections::HashMap;

use crate::models::{AttachedFile, Comment, CommentId, NestedComment, NestedPost, Post, PostId};

/// Groups files under their comments. Files whose comment is not in
/// `comments` are dropped.
pub fn nest_comments(comments: Vec<Comment>, files: Vec<AttachedFile>) -> Vec<NestedComment> {
    let mut by_comment: HashMap<CommentId, Vec<AttachedFile>> = HashMap::new();
    for file in files {
        by_comment.entry(file.comment_id).or_default().push(file);
    }

    comments
        .into_iter()
        .map(|comment| NestedComment {
            attached_files: by_comment.remove(&comment.id).unwrap_or_default(),
            comment,
        })
        .collect()
}

/// Builds the full tree for a set of posts.
pub fn nest_posts(
    posts: Vec<Post>,
    comments: Vec<Comment>,
    files: Vec<AttachedFile>,
) -> Vec<NestedPost> {
    let mut by_post: HashMap<PostId, Vec<NestedComment>> = HashMap::new();
    for nested in nest_comments(comments, files) {
        by_post.entry(nested.comment.post_id).or_default().push(nested);
    }

    posts
        .into_iter()
        .map(|post| NestedPost {
            comments: by_post.remove(&post.id).unwrap_or_default(),
            post,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post(id: PostId) -> Post {
        Post { id, title: format!("post {id}"), created: Utc::now(), text: String::new() }
    }

    fn comment(id: CommentId, post_id: PostId) -> Comment {
        Comment { id, post_id, text: "hi".into(), created: Utc::now(), user: "anon".into() }
    }

    fn file(id: i64, comment_id: CommentId) -> AttachedFile {
        AttachedFile {
            id,
            comment_id,
            title: format!("file {id}"),
            created: Utc::now(),
            file_path: format!("/files/{id}"),
        }
    }

    #[test]
    fn groups_children_under_parents_in_input_order() {
        let tree = nest_posts(
            vec![post(1), post(2)],
            vec![comment(10, 1), comment(11, 2), comment(12, 1)],
            vec![file(100, 12), file(101, 10), file(102, 12)],
        );

        assert_eq!(tree.len(), 2);
        let first = &tree[0];
        assert_eq!(first.post.id, 1);
        let ids: Vec<_> = first.comments.iter().map(|c| c.comment.id).collect();
        assert_eq!(ids, vec![10, 12]);
        let files: Vec<_> = first.comments[1].attached_files.iter().map(|f| f.id).collect();
        assert_eq!(files, vec![100, 102]);

        assert_eq!(tree[1].comments.len(), 1);
        assert!(tree[1].comments[0].attached_files.is_empty());
    }

    #[test]
    fn posts_without_comments_get_empty_collections() {
        let tree = nest_posts(vec![post(3)], vec![], vec![]);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].comments.is_empty());
    }

    #[test]
    fn rows_without_a_parent_are_dropped() {
        let nested = nest_comments(vec![comment(1, 1)], vec![file(5, 99)]);
        assert_eq!(nested.len(), 1);
        assert!(nested[0].attached_files.is_empty());

        assert!(nest_posts(vec![], vec![comment(1, 1)], vec![file(5, 1)]).is_empty());
    }
}

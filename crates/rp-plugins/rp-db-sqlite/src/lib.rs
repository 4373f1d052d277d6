//! # rp-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational model
//! and the `rp-core` domain models. Every multi-row operation runs inside one
//! transaction; an uncommitted transaction rolls back when dropped, so early
//! returns never leave partial writes behind.

mod schema;

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use rp_core::assembly::{nest_comments, nest_posts};
use rp_core::error::{AppError, Result};
use rp_core::models::{
    AttachedFile, Comment, CommentId, NestedComment, NestedPost, NewAttachedFile, NewComment,
    NewPost, Post, PostChanges, PostId,
};
use rp_core::traits::PostRepo;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqlitePool, SqlitePoolOptions,
    SqliteRow,
};
use sqlx::Row;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_POSTS: &str = "SELECT id, title, created, text FROM posts ORDER BY id";
const SELECT_POST: &str = "SELECT id, title, created, text FROM posts WHERE id = ?";
const SELECT_COMMENTS: &str =
    "SELECT id, post_id, text, created, \"user\" FROM comments ORDER BY id";
const SELECT_COMMENTS_OF_POST: &str =
    "SELECT id, post_id, text, created, \"user\" FROM comments WHERE post_id = ? ORDER BY id";
const SELECT_FILES: &str =
    "SELECT id, comment_id, title, created, file_path FROM attached_files ORDER BY id";
const SELECT_FILES_OF_POST: &str = "SELECT f.id, f.comment_id, f.title, f.created, f.file_path \
     FROM attached_files f JOIN comments c ON c.id = f.comment_id \
     WHERE c.post_id = ? ORDER BY f.id";

pub struct SqlitePostRepo {
    pool: SqlitePool,
}

impl SqlitePostRepo {
    /// Connects with the default pool size and creates the schema if absent.
    pub async fn new(url: &str) -> Result<Self> {
        Self::connect(url, 5).await
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .or_internal()?
            .create_if_missing(true)
            .foreign_keys(true);

        // Each connection to an in-memory database sees its own empty
        // database, so the pool must hold exactly one that never expires.
        let pool = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(options)
                .await
        } else {
            // Writers queue on the lock for up to BUSY_TIMEOUT instead of failing.
            let options = options.journal_mode(SqliteJournalMode::Wal).busy_timeout(BUSY_TIMEOUT);
            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .connect_with(options)
                .await
        }
        .or_internal()?;

        Self::from_pool(pool).await
    }

    /// Wraps an existing pool. The schema is created if absent.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        schema::bootstrap(&pool).await.or_internal()?;
        log::info!("SQLite schema ready");
        Ok(Self { pool })
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Maps driver failures into the generic infrastructure error.
trait DbResultExt<T> {
    fn or_internal(self) -> Result<T>;
}

impl<T> DbResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn or_internal(self) -> Result<T> {
        self.map_err(|err| {
            log::error!("database error: {err}");
            AppError::internal(err)
        })
    }
}

fn post_from_row(row: &SqliteRow) -> sqlx::Result<Post> {
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        created: row.try_get("created")?,
        text: row.try_get("text")?,
    })
}

fn comment_from_row(row: &SqliteRow) -> sqlx::Result<Comment> {
    Ok(Comment {
        id: row.try_get("id")?,
        post_id: row.try_get("post_id")?,
        text: row.try_get("text")?,
        created: row.try_get("created")?,
        user: row.try_get("user")?,
    })
}

fn file_from_row(row: &SqliteRow) -> sqlx::Result<AttachedFile> {
    Ok(AttachedFile {
        id: row.try_get("id")?,
        comment_id: row.try_get("comment_id")?,
        title: row.try_get("title")?,
        created: row.try_get("created")?,
        file_path: row.try_get("file_path")?,
    })
}

/// Runs `sql` with an optional id parameter and maps every row.
async fn fetch_rows<T>(
    conn: &mut SqliteConnection,
    sql: &str,
    id: Option<i64>,
    map: fn(&SqliteRow) -> sqlx::Result<T>,
) -> sqlx::Result<Vec<T>> {
    let mut query = sqlx::query(sql);
    if let Some(id) = id {
        query = query.bind(id);
    }
    query.fetch_all(&mut *conn).await?.iter().map(map).collect()
}

#[async_trait]
impl PostRepo for SqlitePostRepo {
    /// Reads all three tables in one transaction and assembles the tree.
    async fn list_posts(&self) -> Result<Vec<NestedPost>> {
        let mut tx = self.pool.begin().await.or_internal()?;

        let posts = fetch_rows(&mut tx, SELECT_POSTS, None, post_from_row).await.or_internal()?;
        let comments = fetch_rows(&mut tx, SELECT_COMMENTS, None, comment_from_row)
            .await
            .or_internal()?;
        let files = fetch_rows(&mut tx, SELECT_FILES, None, file_from_row).await.or_internal()?;

        tx.commit().await.or_internal()?;
        log::debug!("listed {} posts", posts.len());
        Ok(nest_posts(posts, comments, files))
    }

    async fn create_post(&self, post: NewPost) -> Result<Post> {
        // Stored at microsecond precision so reads return the same value.
        let created = Utc::now().trunc_subsecs(6);

        let id = sqlx::query("INSERT INTO posts (title, created, text) VALUES (?, ?, ?)")
            .bind(&post.title)
            .bind(created)
            .bind(&post.text)
            .execute(&self.pool)
            .await
            .or_internal()?
            .last_insert_rowid();

        log::info!("created post {id}");
        Ok(Post { id, title: post.title, created, text: post.text })
    }

    async fn get_post(&self, id: PostId) -> Result<NestedPost> {
        let mut tx = self.pool.begin().await.or_internal()?;

        let post = sqlx::query(SELECT_POST)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .or_internal()?
            .map(|row| post_from_row(&row))
            .transpose()
            .or_internal()?
            .ok_or_else(|| AppError::not_found("Post", id))?;

        let comments = fetch_rows(&mut tx, SELECT_COMMENTS_OF_POST, Some(id), comment_from_row)
            .await
            .or_internal()?;
        let files = fetch_rows(&mut tx, SELECT_FILES_OF_POST, Some(id), file_from_row)
            .await
            .or_internal()?;

        tx.commit().await.or_internal()?;
        Ok(NestedPost { post, comments: nest_comments(comments, files) })
    }

    async fn update_post(&self, id: PostId, changes: PostChanges) -> Result<Post> {
        let mut tx = self.pool.begin().await.or_internal()?;

        let updated = sqlx::query("UPDATE posts SET title = ?, text = ? WHERE id = ?")
            .bind(&changes.title)
            .bind(&changes.text)
            .bind(id)
            .execute(&mut *tx)
            .await
            .or_internal()?
            .rows_affected();
        if updated == 0 {
            return Err(AppError::not_found("Post", id));
        }

        let row = sqlx::query(SELECT_POST).bind(id).fetch_one(&mut *tx).await.or_internal()?;
        let post = post_from_row(&row).or_internal()?;

        tx.commit().await.or_internal()?;
        log::info!("updated post {id}");
        Ok(post)
    }

    /// Deletes innermost rows first: files, then comments, then the post.
    ///
    /// The first statement is a write so the transaction takes the write lock
    /// up front; an absent post is detected from the final delete and the
    /// dropped transaction rolls back.
    async fn delete_post(&self, id: PostId) -> Result<()> {
        let mut tx = self.pool.begin().await.or_internal()?;

        let files = sqlx::query(
            "DELETE FROM attached_files WHERE comment_id IN (SELECT id FROM comments WHERE post_id = ?)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .or_internal()?
        .rows_affected();
        let comments = sqlx::query("DELETE FROM comments WHERE post_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .or_internal()?
            .rows_affected();
        let deleted = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .or_internal()?
            .rows_affected();
        if deleted == 0 {
            return Err(AppError::not_found("Post", id));
        }

        tx.commit().await.or_internal()?;
        log::info!("deleted post {id} with {comments} comments and {files} attached files");
        Ok(())
    }

    async fn list_comments(&self) -> Result<Vec<NestedComment>> {
        let mut tx = self.pool.begin().await.or_internal()?;

        let comments = fetch_rows(&mut tx, SELECT_COMMENTS, None, comment_from_row)
            .await
            .or_internal()?;
        let files = fetch_rows(&mut tx, SELECT_FILES, None, file_from_row).await.or_internal()?;

        tx.commit().await.or_internal()?;
        log::debug!("listed {} comments", comments.len());
        Ok(nest_comments(comments, files))
    }

    /// Parent check and insert are one statement.
    async fn create_comment(&self, comment: NewComment) -> Result<Comment> {
        let created = Utc::now().trunc_subsecs(6);

        let result = sqlx::query(
            "INSERT INTO comments (post_id, text, created, \"user\") \
             SELECT ?, ?, ?, ? WHERE EXISTS (SELECT 1 FROM posts WHERE id = ?)",
        )
        .bind(comment.post_id)
        .bind(&comment.text)
        .bind(created)
        .bind(&comment.user)
        .bind(comment.post_id)
        .execute(&self.pool)
        .await
        .or_internal()?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Post", comment.post_id));
        }

        let id = result.last_insert_rowid();
        log::info!("created comment {id} on post {}", comment.post_id);
        Ok(Comment {
            id,
            post_id: comment.post_id,
            text: comment.text,
            created,
            user: comment.user,
        })
    }

    async fn delete_comment(&self, id: CommentId) -> Result<()> {
        let mut tx = self.pool.begin().await.or_internal()?;

        let files = sqlx::query("DELETE FROM attached_files WHERE comment_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .or_internal()?
            .rows_affected();
        let deleted = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .or_internal()?
            .rows_affected();
        if deleted == 0 {
            return Err(AppError::not_found("Comment", id));
        }

        tx.commit().await.or_internal()?;
        log::info!("deleted comment {id} with {files} attached files");
        Ok(())
    }

    async fn attach_file(&self, file: NewAttachedFile) -> Result<AttachedFile> {
        let created = Utc::now().trunc_subsecs(6);

        let result = sqlx::query(
            "INSERT INTO attached_files (comment_id, title, created, file_path) \
             SELECT ?, ?, ?, ? WHERE EXISTS (SELECT 1 FROM comments WHERE id = ?)",
        )
        .bind(file.comment_id)
        .bind(&file.title)
        .bind(created)
        .bind(&file.file_path)
        .bind(file.comment_id)
        .execute(&self.pool)
        .await
        .or_internal()?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Comment", file.comment_id));
        }

        let id = result.last_insert_rowid();
        log::info!("attached file {id} to comment {}", file.comment_id);
        Ok(AttachedFile {
            id,
            comment_id: file.comment_id,
            title: file.title,
            created,
            file_path: file.file_path,
        })
    }
}

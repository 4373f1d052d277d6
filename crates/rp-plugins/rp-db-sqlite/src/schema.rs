//! Table definitions, created on connect when absent.
//!
//! Foreign keys cascade at the storage layer as well; the repo still deletes
//! children explicitly so correctness never hinges on the pragma being on.

use sqlx::SqlitePool;

const STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS posts (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        title   TEXT NOT NULL,
        created TEXT NOT NULL,
        text    TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS comments (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
        text    TEXT NOT NULL,
        created TEXT NOT NULL,
        \"user\"  TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments(post_id)",
    "CREATE TABLE IF NOT EXISTS attached_files (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        comment_id INTEGER NOT NULL REFERENCES comments(id) ON DELETE CASCADE,
        title      TEXT NOT NULL,
        created    TEXT NOT NULL,
        file_path  TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_attached_files_comment_id ON attached_files(comment_id)",
];

pub(crate) async fn bootstrap(pool: &SqlitePool) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for statement in STATEMENTS.iter().copied() {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await
}

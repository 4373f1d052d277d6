//! Request input validation.
//!
//! Raw parameters arrive as optional strings and are turned into typed forms
//! before any store operation runs.

use rp_core::{AppError, NewPost, PostChanges};
use serde::Deserialize;

/// Query parameters accepted by the create and update endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PostParams {
    pub title: Option<String>,
    pub text: Option<String>,
}

/// A validated post payload. Empty strings are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub text: String,
}

fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("missing required parameter: {name}")))
}

impl TryFrom<PostParams> for PostForm {
    type Error = AppError;

    fn try_from(params: PostParams) -> Result<Self, Self::Error> {
        Ok(Self {
            title: required(params.title, "title")?,
            text: required(params.text, "text")?,
        })
    }
}

impl From<PostForm> for NewPost {
    fn from(form: PostForm) -> Self {
        Self { title: form.title, text: form.text }
    }
}

impl From<PostForm> for PostChanges {
    fn from(form: PostForm) -> Self {
        Self { title: form.title, text: form.text }
    }
}

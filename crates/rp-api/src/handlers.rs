//! # rp-api Handlers
//!
//! This module coordinates the flow between HTTP requests and Core traits:
//! validate input, call the repo, turn the snapshot into a response body.

use actix_web::{web, HttpResponse};
use rp_core::models::PostId;
use rp_core::traits::PostRepo;

use crate::error::ApiError;
use crate::forms::{PostForm, PostParams};
use crate::responses::{
    CommentBody, CreatedPostBody, MessageBody, PostBody, UpdatedPostBody,
};

/// State shared across all Actix-web workers.
pub struct AppState {
    pub repo: Box<dyn PostRepo>,
}

type HandlerResult = Result<HttpResponse, ApiError>;

/// GET /api/posts
pub async fn list_posts(data: web::Data<AppState>) -> HandlerResult {
    let posts = data.repo.list_posts().await?;
    let body: Vec<PostBody> = posts.into_iter().map(PostBody::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/posts?title=..&text=..
pub async fn create_post(
    data: web::Data<AppState>,
    params: web::Query<PostParams>,
) -> HandlerResult {
    let form = PostForm::try_from(params.into_inner())?;
    let post = data.repo.create_post(form.into()).await?;
    Ok(HttpResponse::Ok().json(CreatedPostBody::from(post)))
}

/// GET /api/posts/{post_id}
pub async fn get_post(data: web::Data<AppState>, path: web::Path<PostId>) -> HandlerResult {
    let post = data.repo.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostBody::from(post)))
}

/// PUT /api/posts/{post_id}?title=..&text=..
pub async fn update_post(
    data: web::Data<AppState>,
    path: web::Path<PostId>,
    params: web::Query<PostParams>,
) -> HandlerResult {
    let form = PostForm::try_from(params.into_inner())?;
    let post = data.repo.update_post(path.into_inner(), form.into()).await?;
    Ok(HttpResponse::Ok().json(UpdatedPostBody::from(post)))
}

/// DELETE /api/posts/{post_id}
pub async fn delete_post(data: web::Data<AppState>, path: web::Path<PostId>) -> HandlerResult {
    data.repo.delete_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageBody { message: "Post deleted successfully" }))
}

/// GET /api/comments
pub async fn list_comments(data: web::Data<AppState>) -> HandlerResult {
    let comments = data.repo.list_comments().await?;
    let body: Vec<CommentBody> = comments.into_iter().map(CommentBody::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

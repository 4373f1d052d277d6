use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use rp_api::configure_routes;
use rp_api::handlers::AppState;
use rp_core::{NewAttachedFile, NewComment, NewPost, PostRepo};
use rp_db_sqlite::SqlitePostRepo;
use serde_json::Value;

async fn memory_repo() -> SqlitePostRepo {
    SqlitePostRepo::new("sqlite::memory:").await.expect("Failed to open in-memory database")
}

fn state(repo: SqlitePostRepo) -> web::Data<AppState> {
    web::Data::new(AppState { repo: Box::new(repo) })
}

#[actix_web::test]
async fn create_get_delete_scenario() {
    let app = test::init_service(
        App::new().app_data(state(memory_repo().await)).configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post().uri("/api/posts?title=Hello&text=World").to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["title"], "Hello");
    assert_eq!(created["text"], "World");
    assert!(created["created"].is_string());
    assert!(created.get("comments").is_none());

    let req = test::TestRequest::get().uri("/api/posts/1").to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["id"], 1);
    assert_eq!(fetched["created"], created["created"]);
    assert_eq!(fetched["comments"], serde_json::json!([]));

    let req = test::TestRequest::delete().uri("/api/posts/1").to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted["message"], "Post deleted successfully");

    let req = test::TestRequest::get().uri("/api/posts/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Post not found with ID 1");
}

#[actix_web::test]
async fn update_returns_flat_post_and_persists() {
    let app = test::init_service(
        App::new().app_data(state(memory_repo().await)).configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post().uri("/api/posts?title=Old&text=Body").to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put().uri("/api/posts/1?title=New&text=Other").to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated, serde_json::json!({ "id": 1, "title": "New", "text": "Other" }));

    let req = test::TestRequest::get().uri("/api/posts/1").to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["title"], "New");
    assert_eq!(fetched["text"], "Other");
    assert_eq!(fetched["created"], created["created"]);
}

#[actix_web::test]
async fn missing_post_is_404_for_every_verb() {
    let app = test::init_service(
        App::new().app_data(state(memory_repo().await)).configure(configure_routes),
    )
    .await;

    for req in [
        test::TestRequest::get().uri("/api/posts/99"),
        test::TestRequest::put().uri("/api/posts/99?title=t&text=x"),
        test::TestRequest::delete().uri("/api/posts/99"),
    ] {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

#[actix_web::test]
async fn missing_parameter_is_rejected() {
    let app = test::init_service(
        App::new().app_data(state(memory_repo().await)).configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post().uri("/api/posts?title=Only").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "validation error: missing required parameter: text");

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let posts: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(posts, serde_json::json!([]));
}

#[actix_web::test]
async fn empty_values_are_accepted() {
    let app = test::init_service(
        App::new().app_data(state(memory_repo().await)).configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post().uri("/api/posts?title=&text=").to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["title"], "");
    assert_eq!(created["text"], "");
}

#[actix_web::test]
async fn deleting_a_post_removes_its_comments_and_files() {
    let repo = memory_repo().await;
    let post = repo
        .create_post(NewPost { title: "Hello".into(), text: "World".into() })
        .await
        .unwrap();
    let comment = repo
        .create_comment(NewComment { post_id: post.id, text: "nice".into(), user: "ana".into() })
        .await
        .unwrap();
    for name in ["one.txt", "two.txt"] {
        repo.attach_file(NewAttachedFile {
            comment_id: comment.id,
            title: name.into(),
            file_path: format!("/uploads/{name}"),
        })
        .await
        .unwrap();
    }
    let app = test::init_service(
        App::new().app_data(state(repo)).configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let posts: Value = test::call_and_read_body_json(&app, req).await;
    let nested = &posts[0]["comments"][0];
    assert_eq!(nested["user"], "ana");
    assert!(nested.get("post_id").is_none());
    assert_eq!(nested["attached_files"][1]["title"], "two.txt");

    let req = test::TestRequest::get().uri("/api/comments").to_request();
    let comments: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(comments[0]["post_id"], post.id);
    assert_eq!(comments[0]["attached_files"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::delete().uri(&format!("/api/posts/{}", post.id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/comments").to_request();
    let comments: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(comments, serde_json::json!([]));

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let posts: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(posts, serde_json::json!([]));
}

#[actix_web::test]
async fn list_posts_returns_every_post_in_order() {
    let app = test::init_service(
        App::new().app_data(state(memory_repo().await)).configure(configure_routes),
    )
    .await;

    for i in 0..3 {
        let req = test::TestRequest::post()
            .uri(&format!("/api/posts?title=post{i}&text=body"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let posts: Value = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<_> = posts.as_array().unwrap().iter().map(|p| p["title"].clone()).collect();
    assert_eq!(titles, vec!["post0", "post1", "post2"]);
}

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, json_request, multipart_request, product, Part, TestApp};
use serde_json::json;
use tower::ServiceExt;

const MP4: &[u8] = b"\x00\x00\x00\x18ftypmp42fake-video";

fn seeded_app() -> TestApp {
    let app = TestApp::new();
    app.seed_products(&[
        product("p1", "Oak Dining Table", "Dining Tables", 90000),
        product("p2", "Walnut Bed", "Beds", 150000),
    ]);
    app
}

#[tokio::test]
async fn test_create_review_with_video_upload() {
    let app = seeded_app();
    let token = app.admin_token();

    let response = app
        .router()
        .oneshot(multipart_request(
            "POST",
            "/api/v1/admin/reviews",
            &token,
            &[
                Part::Text("creatorName", "Amna"),
                Part::Text("creatorHandle", "@amna"),
                Part::Text("reviewText", "Sturdy and beautiful"),
                Part::Text("relatedProductIds", "p2"),
                Part::Text("related_product_ids", "p1"),
                Part::Text("relatedProductIds", "unknown"),
                Part::File("video", "tour.mp4", "video/mp4", MP4),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Review created successfully!"));

    let review = &body["review"];
    assert_eq!(review["creator"]["name"], json!("Amna"));
    let related: Vec<&str> = review["relatedProducts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(related, vec!["p2", "p1"]);

    let video = review["videoUrl"].as_str().unwrap();
    assert!(video.starts_with("/uploads/review-videos/reviews/"));
    assert!(video.ends_with(".mp4"));
    assert_eq!(std::fs::read(app.path(&format!("public{}", video))).unwrap(), MP4);
}

#[tokio::test]
async fn test_create_review_requires_a_video() {
    let app = seeded_app();
    let token = app.admin_token();

    let response = app
        .router()
        .oneshot(multipart_request(
            "POST",
            "/api/v1/admin/reviews",
            &token,
            &[Part::Text("creatorName", "Amna")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Video file is required."));
}

#[tokio::test]
async fn test_create_review_requires_a_creator() {
    let app = seeded_app();
    let token = app.admin_token();

    let response = app
        .router()
        .oneshot(multipart_request(
            "POST",
            "/api/v1/admin/reviews",
            &token,
            &[Part::File("video", "tour.mp4", "video/mp4", MP4)],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Creator name is required."));
}

#[tokio::test]
async fn test_signed_upload_url_needs_hosted_storage() {
    let app = seeded_app();
    let token = app.admin_token();

    let response = app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/admin/reviews/upload-url",
            Some(&token),
            &json!({ "fileName": "tour.mp4" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_review_record_points_at_the_uploaded_object() {
    let app = seeded_app();
    let token = app.admin_token();

    let response = app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/admin/reviews/record",
            Some(&token),
            &json!({
                "creatorName": "Bilal",
                "creatorHandle": "@bilal",
                "relatedProductIds": ["p1"],
                "videoPath": "reviews/123-abc.mp4"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(
        body["review"]["videoUrl"],
        json!("/uploads/review-videos/reviews/123-abc.mp4")
    );
    assert_eq!(body["review"]["relatedProducts"][0]["name"], json!("Oak Dining Table"));
}

#[tokio::test]
async fn test_review_record_rejects_escaping_paths() {
    let app = seeded_app();
    let token = app.admin_token();

    let response = app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/admin/reviews/record",
            Some(&token),
            &json!({ "creatorName": "Bilal", "videoPath": "../secrets.mp4" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_review_replaces_video_and_removes_old_one() {
    let app = seeded_app();
    let token = app.admin_token();
    let router = app.router();

    let created = body_json(
        router
            .clone()
            .oneshot(multipart_request(
                "POST",
                "/api/v1/admin/reviews",
                &token,
                &[
                    Part::Text("creatorName", "Amna"),
                    Part::File("video", "first.mp4", "video/mp4", MP4),
                ],
            ))
            .await
            .unwrap(),
    )
    .await;
    let id = created["review"]["id"].as_str().unwrap().to_string();
    let old_video = created["review"]["videoUrl"].as_str().unwrap().to_string();
    let old_file = app.path(&format!("public{}", old_video));
    assert!(old_file.exists());

    let response = router
        .oneshot(multipart_request(
            "PUT",
            &format!("/api/v1/admin/reviews/{}", id),
            &token,
            &[
                Part::Text("creatorName", "Amna K."),
                Part::Text("overlayText", "Watch this"),
                Part::File("videoFile", "second.mp4", "video/mp4", MP4),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["review"]["creator"]["name"], json!("Amna K."));
    assert_eq!(body["review"]["overlayText"], json!("Watch this"));
    assert_ne!(body["review"]["videoUrl"], json!(old_video));
    assert!(!old_file.exists());
}

#[tokio::test]
async fn test_delete_review_then_public_page_is_gone() {
    let app = seeded_app();
    let token = app.admin_token();
    let router = app.router();

    let created = body_json(
        router
            .clone()
            .oneshot(multipart_request(
                "POST",
                "/api/v1/admin/reviews",
                &token,
                &[
                    Part::Text("creatorName", "Sana"),
                    Part::File("video", "clip.mp4", "video/mp4", MP4),
                ],
            ))
            .await
            .unwrap(),
    )
    .await;
    let id = created["review"]["id"].as_str().unwrap().to_string();
    let public = format!("/api/v1/review/{}", id);

    let page = router.clone().oneshot(get(&public, None)).await.unwrap();
    assert_eq!(page.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(delete(&format!("/api/v1/admin/reviews/{}", id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        json!("Review deleted successfully")
    );

    let page = router.oneshot(get(&public, None)).await.unwrap();
    assert_eq!(page.status(), StatusCode::NOT_FOUND);
}

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use demporium_server_lib::api::config::Config;
use demporium_server_lib::api::server::app;
use demporium_server_lib::api::state::AppState;
use demporium_server_lib::data::models::product::Product;
use demporium_server_lib::data::models::review::Review;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

pub const BOUNDARY: &str = "demporium-test-boundary";

/// A local-only application rooted in a fresh temporary directory.
pub struct TestApp {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let state = AppState::from_config(Config::local(dir.path()))
            .expect("Local state needs no connection");
        TestApp { dir, state }
    }

    pub fn router(&self) -> Router {
        app(self.state.clone())
    }

    pub fn path(&self, relative: &str) -> std::path::PathBuf {
        self.dir.path().join(relative)
    }

    pub fn admin_token(&self) -> String {
        self.state
            .jwt
            .generate_token("admin@demporium.test")
            .expect("Failed to sign token")
    }

    pub fn seed_products(&self, products: &[Product]) {
        write_json(&self.path("data/products.json"), &json!(products));
    }

    pub fn seed_reviews(&self, reviews: &[Review]) {
        write_json(&self.path("data/reviews.json"), &json!(reviews));
    }

    pub fn seed_categories(&self, categories: Value) {
        write_json(&self.path("data/categories.json"), &categories);
    }
}

pub fn write_json(path: &Path, value: &Value) {
    std::fs::create_dir_all(path.parent().expect("fixture path has a parent"))
        .expect("Failed to create fixture dir");
    std::fs::write(path, serde_json::to_vec_pretty(value).expect("valid json"))
        .expect("Failed to write fixture");
}

pub fn product(id: &str, name: &str, category: &str, price: i64) -> Product {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "category": category,
        "price": price,
        "images": [format!("https://cdn.test/{}.jpg", id)],
        "description": format!("The {} for every home", name),
    }))
    .expect("valid product")
}

pub fn product_with(id: &str, name: &str, category: &str, price: i64, extra: Value) -> Product {
    let mut value = serde_json::to_value(product(id, name, category, price)).expect("serializable");
    if let (Some(target), Value::Object(fields)) = (value.as_object_mut(), extra) {
        target.extend(fields);
    }
    serde_json::from_value(value).expect("valid product")
}

pub fn review(id: &str, creator: &str, related: &[(&str, &str)]) -> Review {
    let related: Vec<Value> = related
        .iter()
        .map(|(id, name)| json!({ "id": id, "name": name }))
        .collect();

    serde_json::from_value(json!({
        "id": id,
        "creator": { "name": creator, "handle": format!("@{}", creator.to_lowercase()) },
        "thumbnail": "",
        "videoUrl": format!("/uploads/review-videos/reviews/{}.mp4", id),
        "overlayText": "",
        "reviewText": format!("{} loves it", creator),
        "relatedProducts": related,
    }))
    .expect("valid review")
}

/// A part of a multipart body: a text field or a file.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a str, &'a [u8]),
}

pub fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, content_type, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(method: &str, uri: &str, token: &str, parts: &[Part]) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .expect("valid request")
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("valid request")
}

pub fn delete(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .expect("valid request")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

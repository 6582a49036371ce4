//! A stand-in for the task API, served by actix-web on a random local port.

#![allow(dead_code)]

use actix_web::{web, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use taskdesk::auth::Session;
use taskdesk::config::Config;
use taskdesk::notify::MemoryNotifier;
use taskdesk::storage::{MemoryStorage, Storage};

pub const TOKEN: &str = "tok-1";
pub const PASSWORD: &str = "secret123";
/// Task id whose lookup answers only after `SLOW_RESPONSE`.
pub const SLOW_TASK: i64 = 504;
pub const SLOW_RESPONSE: Duration = Duration::from_secs(3);

fn authorized(req: &HttpRequest) -> bool {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == format!("Bearer {}", TOKEN))
}

fn accepts_json(req: &HttpRequest) -> bool {
    req.headers()
        .get("Accept")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == "application/json")
}

fn unauthenticated() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "message": "Unauthenticated." }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": "Not found" }))
}

fn user(name: &Value, email: &Value) -> Value {
    json!({
        "id": 1,
        "name": name,
        "email": email,
        "created_at": "2024-05-01T10:00:00.000000Z"
    })
}

fn task(id: i64, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": null,
        "status": status,
        "created_at": "2024-05-01T10:00:00.000000Z",
        "updated_at": "2024-05-01T10:00:00.000000Z"
    })
}

async fn login(body: web::Json<Value>) -> HttpResponse {
    if body["password"] != PASSWORD {
        return HttpResponse::Unauthorized().json(json!({ "message": "Invalid credentials" }));
    }
    HttpResponse::Ok().json(json!({
        "data": { "token": TOKEN, "user": user(&json!("Ada"), &body["email"]) }
    }))
}

async fn register(body: web::Json<Value>) -> HttpResponse {
    if body["email"] == "taken@example.com" {
        return HttpResponse::UnprocessableEntity().json(json!({
            "message": "The email has already been taken.",
            "errors": { "email": ["The email has already been taken."] }
        }));
    }
    if body["password"] != body["password_confirmation"] {
        return HttpResponse::UnprocessableEntity().json(json!({ "message": "Password mismatch" }));
    }
    HttpResponse::Created().json(json!({
        "data": { "token": TOKEN, "user": user(&body["name"], &body["email"]) }
    }))
}

async fn logout(req: HttpRequest) -> HttpResponse {
    if !authorized(&req) {
        return unauthenticated();
    }
    HttpResponse::Ok().json(json!({ "message": "Logged out" }))
}

async fn list_tasks(req: HttpRequest) -> HttpResponse {
    if !authorized(&req) {
        return unauthenticated();
    }
    if !accepts_json(&req) {
        return HttpResponse::NotAcceptable().finish();
    }
    HttpResponse::Ok().json(json!({
        "data": [task(1, "Write report", "pending"), task(2, "Ship release", "completed")]
    }))
}

async fn show_task(req: HttpRequest, id: web::Path<i64>) -> HttpResponse {
    if !authorized(&req) {
        return unauthenticated();
    }
    match id.into_inner() {
        1 => HttpResponse::Ok().json(json!({ "data": task(1, "Write report", "pending") })),
        500 => HttpResponse::InternalServerError().body("Internal Server Error"),
        SLOW_TASK => {
            actix_rt::time::sleep(SLOW_RESPONSE).await;
            HttpResponse::Ok().json(json!({ "data": task(SLOW_TASK, "Late", "pending") }))
        }
        _ => not_found(),
    }
}

async fn create_task(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    if !authorized(&req) {
        return unauthenticated();
    }
    let mut created = body.into_inner();
    created["id"] = json!(3);
    HttpResponse::Created().json(json!({ "data": created }))
}

async fn update_task(req: HttpRequest, id: web::Path<i64>, body: web::Json<Value>) -> HttpResponse {
    if !authorized(&req) {
        return unauthenticated();
    }
    let id = id.into_inner();
    if id != 1 {
        return not_found();
    }
    let mut updated = body.into_inner();
    updated["id"] = json!(id);
    HttpResponse::Ok().json(json!({ "data": updated }))
}

async fn delete_task(req: HttpRequest, id: web::Path<i64>) -> HttpResponse {
    if !authorized(&req) {
        return unauthenticated();
    }
    match id.into_inner() {
        1 => HttpResponse::NoContent().finish(),
        _ => not_found(),
    }
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/login", web::post().to(login))
            .route("/register", web::post().to(register))
            .route("/logout", web::post().to(logout))
            .route("/task", web::get().to(list_tasks))
            .route("/task", web::post().to(create_task))
            .route("/task/{id}", web::get().to(show_task))
            .route("/task/{id}", web::put().to(update_task))
            .route("/task/{id}", web::delete().to(delete_task)),
    );
}

/// Starts the mock API and returns its base URL. Must run inside an actix runtime.
pub fn spawn_api() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let server = HttpServer::new(|| actix_web::App::new().configure(routes))
        .workers(1)
        .listen(listener)
        .expect("Failed to listen")
        .run();
    actix_rt::spawn(server);
    format!("http://127.0.0.1:{}", port)
}

/// A base URL nothing is listening on.
pub fn dead_api() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

pub fn config(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
        state_file: PathBuf::new(),
        language_tag: Some("en-US".to_string()),
    }
}

pub struct Harness {
    pub storage: Arc<MemoryStorage>,
    pub notifier: Arc<MemoryNotifier>,
    pub app: taskdesk::App,
}

impl Harness {
    pub fn new(base_url: &str) -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let notifier = Arc::new(MemoryNotifier::new());
        let app = taskdesk::App::new(&config(base_url), storage.clone(), notifier.clone())
            .expect("Failed to build app");
        Self {
            storage,
            notifier,
            app,
        }
    }

    /// Puts a token in storage as if a previous run had signed in.
    pub fn with_token(self, token: &str) -> Self {
        self.storage.set("authToken", token).unwrap();
        self
    }

    pub fn session(&self) -> Session {
        self.app.session().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifier
            .notices()
            .into_iter()
            .map(|(_, message)| message)
            .collect()
    }
}

//! A server demonstrating routes, parameters, wildcards, middleware and a fallback.
//!
//! Run with `RUST_LOG=debug cargo run --example server`, optionally passing a
//! JSON config file path as the first argument.

use std::time::Instant;

use log::info;
use serde::{Deserialize, Serialize};
use tst_router::{
    handler, Context, HttpResponse, HttpServer, Method, ServerConfig, StatusCode,
};

#[derive(Serialize, Deserialize)]
struct Article {
    id: String,
    title: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ServerConfig::default(),
    };
    let server = HttpServer::new(config);

    // Log every request with its latency
    server
        .use_middleware(vec![handler(|ctx: Context| async move {
            let started = Instant::now();
            let line = format!("{} {}", ctx.request().method, ctx.request().path);
            let response = ctx.next().await;
            info!("{line} took {:?}", started.elapsed());
            response
        })])
        .await?;

    server
        .get("/", |_ctx| async {
            Ok(HttpResponse::new(StatusCode::Ok)
                .with_content_type("text/html")
                .with_body_string("<html><body><h1>Welcome to tst-router!</h1></body></html>"))
        })
        .await?;

    server
        .get("/hello/:name", |ctx: Context| async move {
            let greeting = ctx.query("greeting").unwrap_or("Hello");
            let name = ctx.param("name").unwrap_or("World");
            Ok(HttpResponse::text(StatusCode::Ok, format!("{greeting}, {name}!")))
        })
        .await?;

    server
        .get("/articles/:id", |ctx: Context| async move {
            let article = Article {
                id: ctx.param("id").unwrap_or_default().to_string(),
                title: "Ternary search trees".to_string(),
            };
            HttpResponse::new(StatusCode::Ok).with_json(&article)
        })
        .await?;

    server
        .post("/articles", |ctx: Context| async move {
            let article: Article = ctx.json()?;
            HttpResponse::new(StatusCode::Created).with_json(&article)
        })
        .await?;

    // A guard in front of the admin handler
    let require_token = handler(|ctx: Context| async move {
        match ctx.header("Authorization") {
            Some(_) => ctx.next().await,
            None => Ok(HttpResponse::text(StatusCode::Unauthorized, "Missing token")),
        }
    });
    let admin = handler(|_ctx| async { Ok(HttpResponse::text(StatusCode::Ok, "Admin area")) });
    server
        .add_route(Method::GET, "/admin", vec![require_token, admin])
        .await?;

    server
        .get("/static/*", |ctx: Context| async move {
            let file = ctx.param("*").unwrap_or_default().to_string();
            if file.is_empty() {
                return Ok(HttpResponse::text(StatusCode::NotFound, "No file requested"));
            }
            Ok(HttpResponse::text(StatusCode::Ok, format!("Would serve {file}")))
        })
        .await?;

    server
        .fallback(vec![handler(|ctx: Context| async move {
            Ok(HttpResponse::text(
                StatusCode::NotFound,
                format!("Nothing lives at {}", ctx.request().path),
            ))
        })])
        .await?;

    server.start().await?;

    Ok(())
}

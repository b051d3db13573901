//! Shared helpers for integration tests

#![allow(dead_code)]

use serde_json::{json, Value};

use eatratelove::api::ApiClient;
use eatratelove::config::ApiConfig;

/// Client pointed at a mock server.
pub fn client(base_url: &str) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    })
    .expect("valid api config")
}

/// Body of a successful login or signup.
pub fn auth_body(token: &str, username: &str) -> Value {
    json!({
        "token": token,
        "user": {
            "id": 1,
            "username": username,
            "email": format!("{}@example.com", username),
            "bio": null,
            "avatar_url": null
        }
    })
}

/// Body of `/auth/me`.
pub fn me_body(username: &str) -> Value {
    json!({
        "id": 1,
        "username": username,
        "email": format!("{}@example.com", username),
        "bio": null,
        "avatar_url": null
    })
}

/// `{items, total}` page of restaurants named `names`.
pub fn restaurant_page(total: u64, names: &[&str]) -> Value {
    let items: Vec<Value> = names
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "city": "Austin",
                "categories": "Indian",
                "rating": 4.5
            })
        })
        .collect();
    json!({ "items": items, "total": total })
}

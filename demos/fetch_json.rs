//! Fetch a JSON document and print the typed result.
//!
//! Run with diagnostic logging enabled:
//!
//! ```sh
//! cargo run --example fetch_json
//! ```

use relay_http::{ClientConfig, JsonConverter, RelayClient, RequestDescriptor};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Todo {
    id: u64,
    title: String,
    completed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let client = RelayClient::with_config(ClientConfig {
        enable_logging: true,
        ..Default::default()
    });

    let descriptor = RequestDescriptor::get("https://jsonplaceholder.typicode.com/todos/1")
        .add_header("Accept", "application/json")
        .tag("demo");

    let todo: Todo = client.fetch(descriptor, &JsonConverter).await?;
    println!("#{} {} (done: {})", todo.id, todo.title, todo.completed);
    Ok(())
}

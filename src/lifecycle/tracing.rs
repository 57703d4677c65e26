//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); the collection actors
//! tag their events with a `collection` field instead.
//!
//! ```bash
//! RUST_LOG=info cargo run -- --secret dev --seed
//! RUST_LOG=local_api_examples=debug,tower_http=debug cargo run -- --secret dev
//! ```
//!
//! With `RUST_LOG=info` creating a post through the API reads:
//!
//! ```text
//! INFO request{method=POST uri=/api/examples/posts}: Created collection="posts" id=post_4 size=4
//! ```
//!
//! Use `debug` to see full payloads: the actors log every request with its
//! parameters (`debug!(collection, ?params, "Create")`) and each client call logs
//! `Sending request` inside its instrumented span.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

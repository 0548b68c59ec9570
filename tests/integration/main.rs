//! DB-backed integration tests. They drive the full router with
//! `tower::ServiceExt::oneshot` and are `#[ignore]`d by default; run them
//! with `COURSEHUB_DATABASE__URL=postgres://... cargo test --test integration -- --ignored`.

mod auth_test;
mod helpers;
mod node_test;
mod permission_test;

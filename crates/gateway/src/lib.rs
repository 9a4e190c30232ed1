//! Health-check surface. Deployment platforms poll `/` and `/health`;
//! both report process status, never conversation content.

pub mod server;

pub use server::{AppState, build_app, start_server};

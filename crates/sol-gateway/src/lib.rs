//! HTTP gateway for Solyntra
//!
//! Accepts document uploads, extracts their text and hands it to a
//! [`sol_core::RAGEngine`]; answers questions and reports health and counters.

mod error;
mod extract;
mod routes;
mod server;


pub use error::ApiError;
pub use extract::{DocumentFormat, extract_text};
pub use routes::{MAX_FILES_PER_UPLOAD, UploadResponse, UploadedDocument};
pub use server::{AppState, MAX_UPLOAD_BYTES, bind, build_router, start};

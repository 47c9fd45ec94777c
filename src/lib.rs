// Library root
// -----------
// Blocking client for the UploadThing file-hosting API. The binary
// (`main.rs`) wraps it in a small interactive menu.
//
// Module responsibilities:
// - `api`: the `UtApi` client, signed JSON calls (list, delete, rename,
//   usage) and status/JSON handling shared by every request.
// - `upload`: the two-phase upload (presign, then multipart transfer of
//   each file to its pre-signed target).
// - `file`: file handles the upload consumes (local paths, memory).
// - `config`, `error`, `types`: configuration, typed errors, wire types.
// - `ui`: terminal flows for the binary.
pub mod api;
pub mod config;
pub mod error;
pub mod file;
pub mod types;
pub mod ui;
mod upload;

pub use api::UtApi;
pub use config::ClientConfig;
pub use error::{Result, UtApiError};
pub use file::{FileSource, LocalFile, MemoryFile};
pub use types::*;

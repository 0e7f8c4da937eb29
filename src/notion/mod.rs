// Notion REST plumbing shared by every tool
pub mod client;
pub mod operation;
pub mod schema;

pub use client::{NotionClient, RemoteRequest};
pub use operation::{BodyKind, HttpMethod, Operation};

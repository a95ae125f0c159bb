#![allow(dead_code)]

pub mod http;
pub mod storage;

pub use http::{get_json, spawn_server};
pub use storage::{StaticLister, create_artifact_dir, create_object_store};

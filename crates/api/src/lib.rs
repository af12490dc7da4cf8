#![forbid(unsafe_code)]

pub mod backend;
pub mod http;

pub use backend::{
    ApiError, InMemoryBackend, LessonRepository, ProgressSink, WordRepository,
};
pub use http::{ApiConfig, HttpBackend};

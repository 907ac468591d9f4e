pub mod config_service;
pub mod image_processing;
pub mod json_session_repository;
pub mod markdown_report_exporter;
pub mod memory_session_repository;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::image_processing::ImageRecompressor;
pub use crate::json_session_repository::JsonSessionRepository;
pub use crate::markdown_report_exporter::MarkdownReportExporter;
pub use crate::memory_session_repository::InMemorySessionRepository;

pub mod config;
pub mod error;
pub mod extract;
pub mod http_client;
pub mod persist;
pub mod pipeline;
pub mod records;
pub mod scorecard;
pub mod teams;
pub mod workbook_export;

pub mod alert;
pub mod config;
pub mod payload;
pub mod receiver;
pub mod report;

pub use alert::AlertNotification;
pub use config::{ReceiverConfig, DEFAULT_PORT};
pub use payload::{decode, AlertBatch, Payload, PayloadError};
pub use receiver::{router, serve, ACKNOWLEDGMENT};

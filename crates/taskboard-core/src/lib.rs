pub mod config;
pub mod error;
pub mod notice;
pub mod result;

pub use config::{AppConfig, BackendKind};
pub use error::{AuthErrorKind, TaskboardError};
pub use notice::{Notice, NoticeLevel, Notices};
pub use result::TaskboardResult;

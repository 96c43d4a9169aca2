pub mod email;
pub mod files;
pub mod notify;

pub use email::EmailService;
pub use files::{FileError, FileService};
pub use notify::NotificationService;

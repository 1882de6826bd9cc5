pub mod donation;
pub mod notification;
pub mod presence;

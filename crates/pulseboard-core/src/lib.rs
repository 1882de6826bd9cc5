pub mod donations;
pub mod error;
pub mod ids;
pub mod pipeline;
pub mod presence;
pub mod status;
pub mod toasts;

pub use error::CoreError;

pub mod chart;
pub mod config;
pub mod console;
pub mod dispatcher;
pub mod error;
pub mod normalizer;
pub mod page;
pub mod platform;
pub mod session;
pub mod view;

pub use error::FlowError;
pub use platform::Platform;

pub mod commands;
pub mod diagnostics;
pub mod session;

pub use session::FormSession;

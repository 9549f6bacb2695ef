use crate::level::Priority;

/// Priority assigned to messages built from a config that does not name one
pub const DEFAULT_PRIORITY: Priority = Priority::INFO;
/// Diagnostic log filter used when neither the config nor `RUST_LOG` sets one
pub const DEFAULT_LOG_FILTER: &str = "warn";

//! User-facing notices (the toast channel)

use crate::error::AppError;

#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, error: &AppError);
}

/// Sends notices to the log; used by the headless runner
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, error: &AppError) {
        if error.is_transport() {
            tracing::error!("Backend unreachable: {}", error);
        } else {
            tracing::error!("{}", error);
        }
    }
}

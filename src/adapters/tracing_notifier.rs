//! Default notifier: notices become tracing events.

use crate::traits::{Notice, NoticeLevel, Notifier};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        let code = notice.error_code.unwrap_or("-");
        match notice.level {
            NoticeLevel::Info => {
                tracing::info!(source = %notice.source, code, "{}", notice.message)
            }
            NoticeLevel::Warning => {
                tracing::warn!(source = %notice.source, code, "{}", notice.message)
            }
            NoticeLevel::Error => tracing::error!(
                source = %notice.source,
                code,
                retryable = notice.retryable,
                "{}",
                notice.message
            ),
        }
    }
}

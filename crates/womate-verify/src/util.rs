//! Process lifecycle utilities.

use std::io;

use tokio_util::sync::CancellationToken;

/// Translates SIGINT/SIGTERM into cancellation of a shared token.
///
/// The server's graceful-shutdown future awaits the token, so the first
/// signal drains in-flight requests instead of aborting them.
#[derive(Debug)]
pub struct SigDown {
    token: CancellationToken,
}

impl SigDown {
    /// Installs the signal listeners. Must be called within a Tokio runtime.
    pub fn try_new() -> io::Result<Self> {
        let token = CancellationToken::new();
        let trigger = token.clone();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            let mut interrupt = signal(SignalKind::interrupt())?;
            let mut terminate = signal(SignalKind::terminate())?;
            tokio::spawn(async move {
                tokio::select! {
                    _ = interrupt.recv() => {},
                    _ = terminate.recv() => {},
                }
                trigger.cancel();
            });
        }

        #[cfg(not(unix))]
        {
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    trigger.cancel();
                }
            });
        }

        Ok(Self { token })
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }
}

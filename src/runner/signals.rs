//! Signal listener task.
//!
//! Installing the handlers replaces the default "terminate the process"
//! reaction, so the tool survives the signal and can supervise the child's
//! shutdown instead. Each received signal is forwarded as a message; the task
//! ends when the receiving side is dropped.

use crate::error::{Result, SpiritError};
use crate::state_machine::ShutdownSignal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Register SIGINT/SIGTERM handlers and forward each delivery to `tx`
#[cfg(unix)]
pub fn spawn_signal_listener(tx: mpsc::Sender<ShutdownSignal>) -> Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| SpiritError::runtime(format!("unable to listen for SIGINT: {e}")))?;
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| SpiritError::runtime(format!("unable to listen for SIGTERM: {e}")))?;

    Ok(tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                received = sigint.recv() => received.map(|_| ShutdownSignal::Interrupt),
                received = sigterm.recv() => received.map(|_| ShutdownSignal::Terminate),
            };

            let Some(signal) = received else {
                debug!("Signal stream closed");
                return;
            };

            info!(signal = %signal, "Signal received");
            if tx.send(signal).await.is_err() {
                return;
            }
        }
    }))
}

#[cfg(not(unix))]
pub fn spawn_signal_listener(tx: mpsc::Sender<ShutdownSignal>) -> Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                debug!(error = %e, "Ctrl-C listener failed");
                return;
            }

            info!(signal = %ShutdownSignal::Interrupt, "Signal received");
            if tx.send(ShutdownSignal::Interrupt).await.is_err() {
                return;
            }
        }
    }))
}

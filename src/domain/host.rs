use std::sync::mpsc::Sender;

use tracing::warn;

use crate::domain::scheduler::PendingExecution;

/// What the palette session needs from the window that hosts it.
pub trait PaletteHost: Send {
    fn close_window(&mut self);
    fn schedule(&mut self, task: PendingExecution);
}

#[derive(Debug)]
pub enum HostRequest {
    Close,
    Execute(PendingExecution),
}

/// Forwards session requests to an event loop that drains the receiver
/// after each pass.
#[derive(Debug, Clone)]
pub struct ChannelHost {
    tx: Sender<HostRequest>,
}

impl ChannelHost {
    pub fn new(tx: Sender<HostRequest>) -> Self {
        Self { tx }
    }
}

impl PaletteHost for ChannelHost {
    fn close_window(&mut self) {
        if self.tx.send(HostRequest::Close).is_err() {
            warn!("palette host is gone, dropping close request");
        }
    }

    fn schedule(&mut self, task: PendingExecution) {
        let title = task.title().to_string();
        if self.tx.send(HostRequest::Execute(task)).is_err() {
            warn!(command = %title, "palette host is gone, dropping execution");
        }
    }
}

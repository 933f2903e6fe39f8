//! Interrupt delivery for the server role.

use rgbd_replay::InterruptSource;
use std::sync::mpsc::{self, Receiver};
use tracing::{debug, error};

/// Signal number reported for Ctrl-C.
pub const SIGINT: i32 = 2;

/// Ctrl-C handler that is only registered once something waits on it, so the
/// client role never installs one.
#[derive(Default)]
pub struct CtrlcInterrupt {
    receiver: Option<Receiver<i32>>,
}

impl CtrlcInterrupt {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InterruptSource for CtrlcInterrupt {
    fn wait_for_signal(&mut self) -> Option<i32> {
        if self.receiver.is_none() {
            let (tx, rx) = mpsc::channel();
            if let Err(e) = ctrlc::set_handler(move || {
                // Repeated interrupts during shutdown are dropped.
                let _ = tx.send(SIGINT);
            }) {
                error!("Error setting Ctrl-C handler: {}", e);
                return None;
            }
            debug!("Ctrl-C handler installed");
            self.receiver = Some(rx);
        }

        self.receiver.as_mut()?.wait_for_signal()
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

use crate::error::MonitorError;

//How often an interruptible sleep re-checks the flag
const POLL_SLICE: Duration = Duration::from_millis(50);

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_interrupt(_signal: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Shared "please stop" flag, raised by SIGINT/SIGTERM.
#[derive(Debug, Clone, Copy)]
pub struct Shutdown {
    flag: &'static AtomicBool,
}

impl Shutdown {
    /// Routes SIGINT and SIGTERM to the process-wide flag.
    pub fn install() -> Result<Self, MonitorError> {
        let action = SigAction::new(
            SigHandler::Handler(handle_interrupt),
            SaFlags::empty(),
            SigSet::empty(),
        );

        for sig in [Signal::SIGINT, Signal::SIGTERM] {
            // The handler only touches an atomic.
            unsafe { signal::sigaction(sig, &action) }?;
        }

        Ok(Shutdown { flag: &INTERRUPTED })
    }

    //Flag not wired to any signal
    #[cfg(test)]
    pub fn detached() -> Self {
        Shutdown {
            flag: Box::leak(Box::new(AtomicBool::new(false))),
        }
    }

    pub fn requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub fn request(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Sleeps for `duration` unless shutdown is requested first.
    /// Returns `false` if the sleep was cut short.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.requested() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep(POLL_SLICE.min(deadline - now));
        }
    }
}

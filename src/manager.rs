use std::io::Write;

use tracing::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::display;
use crate::error::MonitorError;
use crate::process::Snapshot;

pub mod interval;
pub mod monitoring;
pub mod signals;

use monitoring::SnapshotSource;
use signals::Shutdown;


//Monitor struct declaration
pub struct Monitor<S: SnapshotSource> {
    config: MonitorConfig,
    source: S,
    clear_screen: bool,
}

impl<S: SnapshotSource> Monitor<S> {
    pub fn new(config: MonitorConfig, source: S) -> Self {
        Monitor {
            config,
            source,
            clear_screen: false,
        }
    }

    //Redraw in place instead of scrolling
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    //One capture, reduced to the configured owner if any
    fn capture(&mut self) -> Result<Snapshot, MonitorError> {
        let mut snapshot = self.source.capture()?;
        if let Some(uid) = self.config.uid_filter {
            snapshot.retain_uid(uid);
        }
        Ok(snapshot)
    }

    /// Samples, diffs and renders until shutdown is requested.
    ///
    /// A source failure at any capture, including the first, ends the loop
    /// with an error. Nothing is rendered before the second capture.
    pub fn run<W: Write>(&mut self, out: &mut W, shutdown: &Shutdown) -> Result<(), MonitorError> {
        let mut previous = self.capture()?;
        if previous.is_empty() {
            warn!("source listed no processes; is the table header present?");
        }
        info!(processes = previous.len(), "baseline snapshot captured");

        while shutdown.sleep(self.config.refresh_interval) {
            let current = self.capture()?;
            debug!(previous = previous.len(), current = current.len(), "rendering interval");

            display::render_interval(out, &previous, &current, &self.config, self.clear_screen)?;

            //The superseded snapshot is dropped here
            previous = current;

            if shutdown.requested() {
                break;
            }
        }

        info!("shutdown requested");
        Ok(())
    }
}

//! A small module host: keeps the ambient vehicle status and hands every
//! decoded telemetry message to the loaded modules.

use std::time::{Duration, Instant};

use crate::errors::InstructorError;
use crate::telemetry::Telemetry;

mod status;
pub use status::{HostStatus, StatusTracker};

/// A named consumer of telemetry.
pub trait Module {
    fn name(&self) -> &'static str;

    /// Called once for every decoded message, after the status was updated.
    fn handle_packet(&mut self, msg: &Telemetry, status: &HostStatus) -> Result<(), InstructorError>;

    /// Modules which are no longer alive get unloaded by the host.
    fn is_alive(&mut self) -> bool {
        true
    }

    /// Release whatever the module holds on to.
    fn unload(&mut self) {}
}

pub struct ModuleHost {
    tracker: StatusTracker,
    modules: Vec<Box<dyn Module>>,
}

impl ModuleHost {
    pub fn new(heartbeat_timeout: Duration) -> Self {
        Self {
            tracker: StatusTracker::new(heartbeat_timeout),
            modules: Vec::new(),
        }
    }

    pub fn load(&mut self, module: Box<dyn Module>) {
        info!("host: Loaded module <{}>", module.name());
        self.modules.push(module);
    }

    pub fn status(&self) -> &HostStatus {
        self.tracker.status()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Update the status from `msg` and pass it on to every module.
    pub fn dispatch(&mut self, msg: &Telemetry, now: Instant) -> Result<(), InstructorError> {
        self.tracker.check_link(now);
        self.tracker.observe(msg, now);

        let status = self.tracker.status();
        for module in self.modules.iter_mut() {
            module.handle_packet(msg, status)?;
        }

        Ok(())
    }

    /// Periodic housekeeping while no telemetry is arriving.
    pub fn idle(&mut self, now: Instant) {
        self.tracker.check_link(now);
        self.reap();
    }

    /// Unload modules which stopped running.
    pub fn reap(&mut self) {
        self.modules.retain_mut(|module| {
            let alive = module.is_alive();
            if !alive {
                info!("host: Module <{}> stopped, unloading", module.name());
                module.unload();
            }
            alive
        });
    }

    pub fn unload_all(&mut self) {
        for mut module in self.modules.drain(..) {
            info!("host: Unloading module <{}>", module.name());
            module.unload();
        }
    }
}

impl Drop for ModuleHost {
    fn drop(&mut self) {
        self.unload_all();
    }
}

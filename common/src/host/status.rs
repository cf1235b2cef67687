use std::time::{Duration, Instant};

use crate::telemetry::{flight_mode, LastSeen, Telemetry, MAV_TYPE_GCS};
use crate::types::status::ProtocolVersion;

/// Read-only snapshot of what is known about the vehicle, shared with
/// every loaded module.
#[derive(Debug, Clone)]
pub struct HostStatus {
    pub flight_mode: String,
    pub heartbeat_error: bool,
    pub protocol: ProtocolVersion,
    pub waypoint_count: u16,
    pub last_seen: LastSeen,
}

impl Default for HostStatus {
    fn default() -> Self {
        Self {
            flight_mode: "UNKNOWN".into(),
            heartbeat_error: false,
            protocol: ProtocolVersion::default(),
            waypoint_count: 0,
            last_seen: LastSeen::new(),
        }
    }
}

/// Keeps [`HostStatus`] up to date from the telemetry stream.
#[derive(Debug)]
pub struct StatusTracker {
    status: HostStatus,
    heartbeat_timeout: Duration,
    last_heartbeat: Option<Instant>,
}

impl StatusTracker {
    pub fn new(heartbeat_timeout: Duration) -> Self {
        Self {
            status: HostStatus::default(),
            heartbeat_timeout,
            last_heartbeat: None,
        }
    }

    pub fn status(&self) -> &HostStatus {
        &self.status
    }

    /// Raise the heartbeat error flag if the vehicle went quiet.
    pub fn check_link(&mut self, now: Instant) {
        let Some(last) = self.last_heartbeat else {
            return;
        };

        if !self.status.heartbeat_error && now.duration_since(last) > self.heartbeat_timeout {
            warn!("host: No heartbeat for {:?}", now.duration_since(last));
            self.status.heartbeat_error = true;
        }
    }

    /// Fold a freshly received message into the status.
    pub fn observe(&mut self, msg: &Telemetry, now: Instant) {
        match msg {
            Telemetry::Heartbeat(heartbeat) if heartbeat.mav_type != MAV_TYPE_GCS => {
                self.last_heartbeat = Some(now);
                if self.status.heartbeat_error {
                    info!("host: Heartbeat OK");
                    self.status.heartbeat_error = false;
                }

                let mode = flight_mode::mode_string(heartbeat);
                if mode != self.status.flight_mode {
                    info!("host: Flight mode {} -> {}", self.status.flight_mode, mode);
                    self.status.flight_mode = mode;
                }

                self.status.protocol = ProtocolVersion::from_heartbeat(heartbeat.mavlink_version);
            }
            Telemetry::MissionCount(mission) => {
                debug!("host: Vehicle reports {} waypoints", mission.count);
                self.status.waypoint_count = mission.count;
            }
            _ => {}
        }

        self.status.last_seen.insert(*msg);
    }
}

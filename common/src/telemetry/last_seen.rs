use std::collections::HashMap;

use super::{MessageKind, Telemetry};

/// The most recently seen message of every kind.
#[derive(Debug, Default, Clone)]
pub struct LastSeen {
    messages: HashMap<MessageKind, Telemetry>,
}

impl LastSeen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `msg` as the latest of its kind.
    pub fn insert(&mut self, msg: Telemetry) {
        self.messages.insert(msg.kind(), msg);
    }

    pub fn get(&self, kind: MessageKind) -> Option<&Telemetry> {
        self.messages.get(&kind)
    }

    /// Read a field of the last message of `kind`. Returns `None` if no
    /// such message was seen yet, or if `read` does not apply to it.
    pub fn field<T>(&self, kind: MessageKind, read: impl FnOnce(&Telemetry) -> Option<T>) -> Option<T> {
        self.get(kind).and_then(read)
    }

    /// Like [`LastSeen::field`], falling back to `default` when missing.
    pub fn field_or<T>(
        &self,
        kind: MessageKind,
        default: T,
        read: impl FnOnce(&Telemetry) -> Option<T>,
    ) -> T {
        self.field(kind, read).unwrap_or(default)
    }

    /// Compass heading of the last VFR_HUD [deg].
    pub fn vfr_heading(&self) -> Option<f32> {
        self.field(MessageKind::VfrHud, |msg| match msg {
            Telemetry::VfrHud(hud) => Some(hud.heading as f32),
            _ => None,
        })
    }

    /// Altitude above home of the last GLOBAL_POSITION_INT [mm], zero if unseen.
    pub fn relative_alt_mm(&self) -> i32 {
        self.field_or(MessageKind::GlobalPositionInt, 0, |msg| match msg {
            Telemetry::GlobalPositionInt(pos) => Some(pos.relative_alt),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

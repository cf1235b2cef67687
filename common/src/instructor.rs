//! The instructor module: classifies telemetry and forwards the resulting
//! checklist states to whatever displays the checklist.

use std::sync::Arc;

use crate::classifier::classify;
use crate::errors::InstructorError;
use crate::host::{HostStatus, Module};
use crate::ipc::InstructorUi;
use crate::sync::channel::StateChannel;
use crate::sync::shutdown::ShutdownSignal;
use crate::telemetry::Telemetry;
use crate::types::checklist::ChecklistItem;

const ID: &str = "instructor";

/// Receiving end of checklist states.
pub trait ChecklistSink {
    /// Whether updates can still be delivered.
    fn is_alive(&mut self) -> bool;

    fn set_check(&mut self, item: ChecklistItem) -> Result<(), InstructorError>;

    /// Tell the receiver to tear down.
    fn close(&mut self);
}

impl ChecklistSink for InstructorUi {
    fn is_alive(&mut self) -> bool {
        InstructorUi::is_alive(self)
    }

    fn set_check(&mut self, item: ChecklistItem) -> Result<(), InstructorError> {
        InstructorUi::set_check(self, item)
    }

    fn close(&mut self) {
        InstructorUi::close(self)
    }
}

/// In-process sink, writing straight into the channel a checklist panel
/// drains. The shared shutdown signal stands in for the process lifetime.
#[derive(Clone)]
pub struct ChannelSink<const N: usize> {
    channel: Arc<StateChannel<ChecklistItem, N>>,
    shutdown: ShutdownSignal,
}

impl<const N: usize> ChannelSink<N> {
    pub fn new(channel: Arc<StateChannel<ChecklistItem, N>>, shutdown: ShutdownSignal) -> Self {
        Self { channel, shutdown }
    }
}

impl<const N: usize> ChecklistSink for ChannelSink<N> {
    fn is_alive(&mut self) -> bool {
        !self.shutdown.is_set()
    }

    fn set_check(&mut self, item: ChecklistItem) -> Result<(), InstructorError> {
        if let Some(dropped) = self.channel.sender().send(item) {
            warn!("{}: Channel full, dropped update for <{}>", ID, dropped.name);
        }
        Ok(())
    }

    fn close(&mut self) {
        self.shutdown.set();
    }
}

pub struct InstructorModule<S: ChecklistSink> {
    sink: S,
}

impl<S: ChecklistSink> InstructorModule<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S: ChecklistSink> Module for InstructorModule<S> {
    fn name(&self) -> &'static str {
        ID
    }

    fn handle_packet(&mut self, msg: &Telemetry, status: &HostStatus) -> Result<(), InstructorError> {
        for item in classify(msg, status) {
            if !self.sink.is_alive() {
                return Ok(());
            }
            trace!("{}: <{}> = {}", ID, item.name, item.state as u8);
            self.sink.set_check(item)?;
        }

        Ok(())
    }

    fn is_alive(&mut self) -> bool {
        self.sink.is_alive()
    }

    fn unload(&mut self) {
        self.sink.close();
    }
}

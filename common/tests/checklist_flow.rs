use std::sync::Arc;
use std::time::{Duration, Instant};

use common::classifier::{
    AVIONICS_POWER, FLIGHT_MODE_MANUAL, GNSS_FIX, IMU_CHECK, PIXHAWK_BOOTED, SERVO_POWER,
    WAYPOINTS_LOADED,
};
use common::host::ModuleHost;
use common::instructor::{ChannelSink, InstructorModule};
use common::ipc::{pump, Frame, FrameWriter};
use common::sync::channel::StateChannel;
use common::sync::shutdown::ShutdownSignal;
use common::telemetry::{GpsRawInt, Heartbeat, MissionCount, PowerStatus, Telemetry};
use common::types::checklist::{default_tabs, ChecklistItem, TickMode};
use common::ui::panel::{ButtonOutcome, Panel, Widget};
use common::ui::{tick, TickOutcome};

const POLL: Duration = Duration::from_millis(1);
const ENGINE_TAB: usize = 2;

fn vehicle_heartbeat() -> Telemetry {
    Telemetry::Heartbeat(Heartbeat {
        mav_type: 1,
        autopilot: 3,
        mavlink_version: 3,
        ..Default::default()
    })
}

fn feed(host: &mut ModuleHost, now: Instant) {
    host.dispatch(&Telemetry::MissionCount(MissionCount { count: 3 }), now)
        .unwrap();
    host.dispatch(&vehicle_heartbeat(), now).unwrap();
    host.dispatch(
        &Telemetry::GpsRawInt(GpsRawInt {
            fix_type: 2,
            cog: u16::MAX,
            satellites_visible: 9,
        }),
        now,
    )
    .unwrap();
    host.dispatch(
        &Telemetry::PowerStatus(PowerStatus {
            vservo: 5100,
            ..Default::default()
        }),
        now,
    )
    .unwrap();
}

#[test]
fn test_telemetry_reaches_visible_tab() {
    let channel = Arc::new(StateChannel::<ChecklistItem, 64>::new());
    let shutdown = ShutdownSignal::new();

    let mut host = ModuleHost::new(Duration::from_secs(5));
    host.load(Box::new(InstructorModule::new(ChannelSink::new(
        channel.clone(),
        shutdown.clone(),
    ))));

    let mut panel = Panel::new(&default_tabs()).unwrap();
    panel.select(ENGINE_TAB as u8).unwrap();

    feed(&mut host, Instant::now());
    assert!(matches!(
        tick(&mut panel, &shutdown, POLL, &*channel),
        TickOutcome::Running { .. }
    ));

    for label in [PIXHAWK_BOOTED, FLIGHT_MODE_MANUAL, WAYPOINTS_LOADED, GNSS_FIX, SERVO_POWER] {
        assert_eq!(Some(true), panel.checked(ENGINE_TAB, label), "{label}");
    }
    // Same label on the first tab, which was not visible
    assert_eq!(Some(false), panel.checked(0, GNSS_FIX));
}

#[test]
fn test_engine_tab_gating_follows_telemetry() {
    let channel = Arc::new(StateChannel::<ChecklistItem, 64>::new());
    let shutdown = ShutdownSignal::new();

    let mut host = ModuleHost::new(Duration::from_secs(5));
    host.load(Box::new(InstructorModule::new(ChannelSink::new(
        channel.clone(),
        shutdown.clone(),
    ))));

    let mut panel = Panel::new(&default_tabs()).unwrap();
    panel.select(ENGINE_TAB as u8).unwrap();

    // Tick every operator item on the tab
    let manual: Vec<u8> = panel
        .active_tab()
        .widgets
        .iter()
        .enumerate()
        .filter(|(_, widget)| {
            matches!(
                widget,
                Widget::Check {
                    mode: TickMode::Manual,
                    ..
                }
            )
        })
        .map(|(idx, _)| idx as u8)
        .collect();
    for idx in manual {
        panel.toggle(idx).unwrap();
    }

    feed(&mut host, Instant::now());
    tick(&mut panel, &shutdown, POLL, &*channel);

    // Avionics power and IMU have not been reported yet
    assert_eq!(Ok(ButtonOutcome::Blocked), panel.advance());
    panel.dismiss();

    for label in [AVIONICS_POWER, IMU_CHECK] {
        channel.send(ChecklistItem::new(label, true));
    }
    tick(&mut panel, &shutdown, POLL, &*channel);

    assert_eq!(Ok(ButtonOutcome::Advanced(3)), panel.advance());
}

#[test]
fn test_closing_the_sink_unloads_and_stops_the_panel() {
    let channel = Arc::new(StateChannel::<ChecklistItem, 64>::new());
    let shutdown = ShutdownSignal::new();

    let mut host = ModuleHost::new(Duration::from_secs(5));
    host.load(Box::new(InstructorModule::new(ChannelSink::new(
        channel.clone(),
        shutdown.clone(),
    ))));
    host.unload_all();

    let mut panel = Panel::new(&default_tabs()).unwrap();
    assert_eq!(
        TickOutcome::Shutdown,
        tick(&mut panel, &shutdown, POLL, &*channel)
    );
    assert_eq!(0, host.module_count());
}

#[test]
fn test_pipe_carries_updates_in_order() {
    let mut writer = FrameWriter::new(Vec::new());
    for (name, state) in [("A", true), ("B", false), ("A", false)] {
        writer
            .send(&Frame::Check(ChecklistItem::new(name, state)))
            .unwrap();
    }
    let bytes = writer.into_inner();

    let channel = StateChannel::<ChecklistItem, 8>::new();
    let shutdown = ShutdownSignal::new();
    pump(bytes.as_slice(), &channel, &shutdown).unwrap();

    assert_eq!(
        vec![
            ChecklistItem::new("A", true),
            ChecklistItem::new("B", false),
            ChecklistItem::new("A", false),
        ],
        channel.receiver().drain().collect::<Vec<_>>()
    );
    // End of stream stands in for the main process going away
    assert!(shutdown.is_set());
}

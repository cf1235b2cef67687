#[macro_use]
extern crate log;

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Instant;

use clap::Parser;
use common::config::InstructorConfig;
use common::errors::{InstructorError, MavlinkError};
use common::host::ModuleHost;
use common::instructor::InstructorModule;
use common::ipc::InstructorUi;
use common::telemetry::Telemetry;
use mavlink::ardupilotmega::MavMessage;
use mavlink::error::MessageReadError;

const ID: &str = "station";

#[derive(clap::Parser)]
#[clap(about = "Pre-flight checklist panel driven by live MAVLink telemetry")]
struct Args {
    /// Title of the checklist window
    title: Option<String>,

    /// Run as the checklist UI process
    #[clap(long, hide = true)]
    ui: bool,
}

fn main() -> Result<(), InstructorError> {
    let args = Args::parse();

    // Logs go to stderr, stdout belongs to the checklist
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .init();

    let config = common::config::load_from_env()?;
    let title = args.title.unwrap_or_else(|| config.title.clone());

    if args.ui {
        common::ui::run(&config, &title)
    } else {
        run_station(&config, &title)
    }
}

fn run_station(config: &InstructorConfig, title: &str) -> Result<(), InstructorError> {
    let telemetry = spawn_link_reader(&config.connection)?;

    let ui = InstructorUi::spawn(title, config.close_timeout())?;
    let mut host = ModuleHost::new(config.heartbeat_timeout());
    host.load(Box::new(InstructorModule::new(ui)));

    while host.module_count() > 0 {
        match telemetry.recv_timeout(config.tick_period()) {
            Ok(msg) => {
                host.dispatch(&msg, Instant::now())?;
                host.reap();
            }
            Err(RecvTimeoutError::Timeout) => host.idle(Instant::now()),
            Err(RecvTimeoutError::Disconnected) => {
                error!("{}: Telemetry link lost", ID);
                return Err(MavlinkError::LinkClosed.into());
            }
        }
    }

    info!("{}: All modules unloaded, exiting", ID);
    Ok(())
}

/// Connect to the vehicle and forward every decoded message from a
/// dedicated thread.
fn spawn_link_reader(address: &str) -> Result<Receiver<Telemetry>, InstructorError> {
    info!("{}: Connecting to <{}>", ID, address);
    let connection =
        mavlink::connect::<MavMessage>(address).map_err(|source| MavlinkError::Connect {
            address: address.to_string(),
            source,
        })?;

    let (tx, rx) = mpsc::channel();
    std::thread::Builder::new()
        .name("mavlink-reader".into())
        .spawn(move || loop {
            match connection.recv() {
                Ok((_, msg)) => {
                    if tx.send(Telemetry::from(&msg)).is_err() {
                        break;
                    }
                }
                Err(MessageReadError::Parse(e)) => {
                    debug!("{}: Dropped malformed message: {:?}", ID, e);
                }
                Err(e) => {
                    error!("{}: Link read failed: {:?}", ID, e);
                    break;
                }
            }
        })?;

    Ok(rx)
}

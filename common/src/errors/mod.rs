use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum InstructorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Postcard ser/de error: {0}")]
    Wire(#[from] postcard::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Mavlink error: {0}")]
    Mavlink(#[from] MavlinkError),
    #[error("Shell error: {0:?}")]
    Shell(embedded_io::ErrorKind),
    #[error("The checklist UI process is not running")]
    UiGone,
}

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Unable to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("A tick period of zero is not allowed")]
    ZeroTickPeriod,
    #[error("No checklist tabs were defined")]
    NoTabs,
}

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum MavlinkError {
    #[error("Unable to open link <{address}>: {source}")]
    Connect {
        address: String,
        source: std::io::Error,
    },
    #[error("The link was closed by the remote end")]
    LinkClosed,
}

/// Errors from operator actions on the checklist panel. None of these
/// are faults, they are reported back to the operator.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    #[error("There is no tab with index {0}")]
    NoSuchTab(u8),
    #[error("There is no widget with index {0} on this tab")]
    NoSuchWidget(u8),
    #[error("<{0}> is ticked automatically")]
    ReadOnly(String),
    #[error("Widget {0} can not be used that way")]
    WrongWidget(u8),
    #[error("Dismiss the open dialog first")]
    DialogOpen,
}

impl From<embedded_io::ErrorKind> for InstructorError {
    fn from(value: embedded_io::ErrorKind) -> Self {
        Self::Shell(value)
    }
}

use crate::config::ConfigError;
use crate::recruitment::RecruitmentError;
use crate::telemetry::TelemetryError;
use std::fmt;
use std::io;
use std::net::SocketAddr;

/// Process-level failure surfaced by the binaries.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    /// The listener could not be bound to the configured address.
    Bind { addr: SocketAddr, source: io::Error },
    /// The HTTP server stopped with an error after startup.
    Serve(io::Error),
    /// A CSV export could not be written to its destination.
    ExportOutput { target: String, source: io::Error },
    Recruitment(RecruitmentError),
}

impl AppError {
    pub fn bind(addr: SocketAddr) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Bind { addr, source }
    }

    pub fn export_output(target: impl Into<String>) -> impl FnOnce(io::Error) -> Self {
        let target = target.into();
        move |source| Self::ExportOutput { target, source }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Bind { addr, source } => {
                write!(f, "unable to bind recruitment api on {addr}: {source}")
            }
            AppError::Serve(err) => write!(f, "recruitment api stopped: {}", err),
            AppError::ExportOutput { target, source } => {
                write!(f, "unable to write candidate export to {target}: {source}")
            }
            AppError::Recruitment(err) => write!(f, "recruitment error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Bind { source, .. } | AppError::ExportOutput { source, .. } => Some(source),
            AppError::Serve(err) => Some(err),
            AppError::Recruitment(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<RecruitmentError> for AppError {
    fn from(value: RecruitmentError) -> Self {
        Self::Recruitment(value)
    }
}

//! Log sink configuration.
//!
//! httplib never installs anything on its own. The application builds a
//! [`Dispatch`] once at startup and injects it into [`HttpLib`]; [`init`]
//! additionally makes it the process-wide default so the application's own
//! `tracing` calls land in the same place.
//!
//! ```rust,no_run
//! use httplib::{HttpLib, LogConfig};
//!
//! # fn main() -> Result<(), httplib::Error> {
//! // RUST_LOG=debug LOG_FORMAT=json ./server
//! let dispatch = LogConfig::from_env()?.init()?;
//! let lib = HttpLib::new(dispatch);
//! # Ok(())
//! # }
//! ```
//!
//! [`HttpLib`]: crate::HttpLib
//! [`init`]: LogConfig::init

use std::str::FromStr;

use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::Error;

const DEFAULT_FILTER: &str = "info";

/// Output format of the fmt subscriber.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Pretty,
    /// One JSON object per line; request fields land under `fields`.
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full"    => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            "pretty"  => Ok(Self::Pretty),
            "json"    => Ok(Self::Json),
            _         => Err(Error::Format(s.to_owned())),
        }
    }
}

/// How to build the log sink.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogConfig {
    /// `EnvFilter` directives, e.g. `info,httplib=debug`.
    pub filter: String,
    pub format: LogFormat,
    /// ANSI colours. Off for anything a machine reads.
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: DEFAULT_FILTER.to_owned(), format: LogFormat::Full, ansi: true }
    }
}

impl LogConfig {
    /// Reads `RUST_LOG` and `LOG_FORMAT`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), with the variable lookup supplied.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut config = Self::default();
        if let Some(filter) = lookup("RUST_LOG").filter(|f| !f.trim().is_empty()) {
            config.filter = filter;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            config.format = format.parse()?;
        }
        // No ANSI escapes inside JSON output.
        config.ansi = config.format != LogFormat::Json;
        Ok(config)
    }

    /// Builds a dispatch writing to stdout, without installing it.
    pub fn dispatch(&self) -> Result<Dispatch, Error> {
        self.dispatch_with_writer(std::io::stdout)
    }

    /// Builds a dispatch writing to `writer`, without installing it.
    pub fn dispatch_with_writer<W>(&self, writer: W) -> Result<Dispatch, Error>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = EnvFilter::try_new(&self.filter)?;
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(self.ansi)
            .with_writer(writer);

        let dispatch = match self.format {
            LogFormat::Full    => Dispatch::new(builder.finish()),
            LogFormat::Compact => Dispatch::new(builder.compact().finish()),
            LogFormat::Pretty  => Dispatch::new(builder.pretty().finish()),
            LogFormat::Json    => Dispatch::new(builder.json().finish()),
        };
        Ok(dispatch)
    }

    /// Builds the stdout dispatch and installs it as the global default.
    ///
    /// Returns the handle for injection into [`HttpLib`](crate::HttpLib).
    /// Fails if a global default is already set.
    pub fn init(&self) -> Result<Dispatch, Error> {
        let dispatch = self.dispatch()?;
        tracing::dispatcher::set_global_default(dispatch.clone())?;
        Ok(dispatch)
    }
}

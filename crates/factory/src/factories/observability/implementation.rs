use std::fmt;

use time::{format_description::BorrowedFormatItem, macros::format_description};
use tracing::{Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        MakeWriter,
        format::Writer,
        time::{FormatTime, LocalTime, UtcTime},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

use crate::factories::observability::{
    Observability, ObservabilityConfig, error::ObservabilityError,
};

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Local wall clock, or UTC when the local offset cannot be determined
/// (e.g. inside a multi-threaded process on Unix).
struct LocalOrUtcTime {
    local: LocalTime<&'static [BorrowedFormatItem<'static>]>,
    utc: UtcTime<&'static [BorrowedFormatItem<'static>]>,
}

impl LocalOrUtcTime {
    fn new() -> Self {
        Self {
            local: LocalTime::new(TIMESTAMP_FORMAT),
            utc: UtcTime::new(TIMESTAMP_FORMAT),
        }
    }
}

impl FormatTime for LocalOrUtcTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let mut local = String::new();
        if self.local.format_time(&mut Writer::new(&mut local)).is_ok() {
            return w.write_str(&local);
        }

        self.utc.format_time(w)
    }
}

impl Observability {
    /// Install the global tracing subscriber described by `cfg`.
    pub fn init(cfg: &ObservabilityConfig) -> Result<(), ObservabilityError> {
        Self::subscriber(cfg)?.try_init()?;

        Ok(())
    }

    /// Build the subscriber without installing it.
    pub fn subscriber(
        cfg: &ObservabilityConfig,
    ) -> Result<impl Subscriber + Send + Sync + 'static, ObservabilityError> {
        let env_filter = Self::env_filter(cfg)?;
        let fmt_layer = Self::fmt_layer(cfg);

        Ok(tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer))
    }

    pub fn level(tracing_level: Option<&str>) -> Level {
        match tracing_level {
            None => Level::INFO,
            Some("TRACE") => Level::TRACE,
            Some("DEBUG") => Level::DEBUG,
            Some("INFO") => Level::INFO,
            Some("WARN") => Level::WARN,
            Some("ERROR") => Level::ERROR,
            _ => Level::INFO,
        }
    }

    // An explicit directive wins over RUST_LOG, which wins over tracing_level
    pub fn env_filter(cfg: &ObservabilityConfig) -> Result<EnvFilter, ObservabilityError> {
        let level = Self::level(cfg.tracing_level.as_deref());

        let env_filter = match cfg.rust_log.as_deref() {
            Some(rust_log) => EnvFilter::try_new(rust_log)?,
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase())),
        };

        Ok(env_filter)
    }

    pub fn fmt_layer<S>(cfg: &ObservabilityConfig) -> Box<dyn Layer<S> + Send + Sync + 'static>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        Self::fmt_layer_with_writer(cfg, std::io::stdout)
    }

    pub fn fmt_layer_with_writer<S, W>(
        cfg: &ObservabilityConfig,
        make_writer: W,
    ) -> Box<dyn Layer<S> + Send + Sync + 'static>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let log_format = cfg.log_format.as_deref().unwrap_or("json");
        let with_file = cfg.with_file.unwrap_or(true);
        let with_line_number = cfg.with_line_number.unwrap_or(true);
        let timer = LocalOrUtcTime::new();

        if log_format == "pretty" {
            tracing_subscriber::fmt::layer()
                .with_writer(make_writer)
                .with_ansi(true)
                .with_timer(timer)
                .with_target(false)
                .with_file(with_file)
                .with_line_number(with_line_number)
                .compact()
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(make_writer)
                .with_timer(timer)
                .with_target(false)
                .with_file(with_file)
                .with_line_number(with_line_number)
                .json()
                .flatten_event(true)
                .with_span_list(false)
                .boxed()
        }
    }
}

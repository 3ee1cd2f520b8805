// Logging - Process-wide tracing subscriber for suite runs
//
// Lines read `2025-01-31 02:05:09 PM [INFO]: message` in local time.
// `RUST_LOG` filters as usual and defaults to `info`.

use chrono::NaiveDateTime;
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";

/// Event formatter producing `<timestamp> [<LEVEL>]: <message>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuiteFormat;

impl<S, N> FormatEvent<S, N> for SuiteFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let now = chrono::Local::now().naive_local();
        write!(writer, "{}: ", prefix(&now, event.metadata().level()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn prefix(time: &NaiveDateTime, level: &Level) -> String {
    format!("{} [{}]", time.format(TIMESTAMP_FORMAT), level)
}

/// Installs the suite subscriber. Later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(SuiteFormat)
        .try_init();
}

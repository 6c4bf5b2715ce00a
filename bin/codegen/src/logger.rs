use graphql_codegen_config::log::{LogFormat, LoggingConfig};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, time::UtcTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

pub fn configure_logging(config: &LoggingConfig, silent: bool) {
    let timer = UtcTime::rfc_3339();
    // Silent mode suppresses everything below error-level output.
    let filter = if silent {
        EnvFilter::new("error")
    } else {
        EnvFilter::new(config.env_filter_str())
    };

    let layer = match config.format {
        LogFormat::Json => fmt::Layer::<Registry>::default()
            .json()
            .with_timer(timer)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        LogFormat::PrettyCompact => fmt::Layer::<Registry>::default()
            .compact()
            .with_timer(timer)
            .with_target(false)
            .boxed(),
    };

    tracing_subscriber::registry().with(layer).with(filter).init();
}

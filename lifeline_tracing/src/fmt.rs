use crate::{FormatFlavor, TracingConfig};
use tracing_core::Subscriber;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::Format as EventFormatter;
use tracing_subscriber::fmt::{layer as fmt_layer, FormatFields, Layer as FmtLayer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Boxes the given preconfigured layer, dropping the timestamp if the config
/// says so, and filters it by the given targets.
macro_rules! finish_layer {
    ($layer:expr, $config:expr, $targets:expr) => {{
        let layer = preconfigure($layer, $config);

        if $config.show_timestamp() {
            Box::new(layer.with_filter($targets)) as Box<dyn Layer<_> + Send + Sync>
        } else {
            Box::new(layer.without_time().with_filter($targets))
        }
    }};
}

/// Creates a [formatted `Layer`](FmtLayer) based on the given
/// [config](TracingConfig).
pub fn make_layer<S>(config: impl AsRef<TracingConfig>) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let config = config.as_ref();
    let targets = make_targets(config);

    match config.flavor() {
        FormatFlavor::Full => finish_layer!(fmt_layer(), config, targets),
        FormatFlavor::Compact => finish_layer!(fmt_layer().compact(), config, targets),
        FormatFlavor::Pretty => finish_layer!(fmt_layer().pretty(), config, targets),
        #[cfg(feature = "json")]
        FormatFlavor::Json => finish_layer!(
            fmt_layer().json().flatten_event(config.flatten_json()),
            config,
            targets
        ),
    }
}

/// Applies the display choices of the given config to a formatted layer of any
/// flavor.
fn preconfigure<S, N, L, T, W>(
    layer: FmtLayer<S, N, EventFormatter<L, T>, W>,
    config: &TracingConfig,
) -> FmtLayer<S, N, EventFormatter<L, T>, W>
where
    N: for<'writer> FormatFields<'writer> + 'static,
{
    #[cfg(feature = "json")]
    let ansi = config.color() && config.flavor() != FormatFlavor::Json;
    #[cfg(not(feature = "json"))]
    let ansi = config.color();

    layer
        .with_ansi(ansi)
        .with_target(config.show_target())
        .with_file(config.show_file())
        .with_line_number(config.show_line_number())
        .with_level(config.show_level())
        .with_thread_ids(config.show_thread_id())
        .with_thread_names(config.show_thread_name())
}

/// Creates the per-target filter: the root verbosity as the default, plus any
/// per-target overrides.
fn make_targets(config: &TracingConfig) -> Targets {
    Targets::new()
        .with_default(config.verbosity())
        .with_targets(config.targets())
}

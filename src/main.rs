use crate::dom::Document;
use crate::metrics::Viewport;
use tracing::{info, span, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// The in-memory document tree
#[allow(dead_code)]
mod dom;
/// The one-shot box-model construction sequence
mod fixture;
/// Resolution of inline styles into box-model edge sizes
mod metrics;
/// Deterministic text rendering of the constructed tree
mod snapshot;
/// Inline style surfaces and the style applier
#[allow(dead_code)]
mod style;

struct Args {
    pub output: String,
    pub viewport_width: Option<f64>,
    pub trace: bool,
}

fn main() {
    let args = parse_args().expect("Could not parse arguments");
    if args.trace {
        tracing_subscriber::fmt::fmt()
            .with_span_events(FmtSpan::ACTIVE)
            .with_max_level(Level::DEBUG)
            .with_env_filter(EnvFilter::from_default_env())
            .finish()
            .init();
        info!("Logger initialized");
    }

    let viewport = match args.viewport_width {
        Some(width) => Viewport {
            width,
            ..Viewport::default()
        },
        None => Viewport::default(),
    };

    let mut document = Document::new();
    fixture::build(&mut document).expect("Could not build fixture");
    let report = snapshot::render(&document, viewport);

    let span = span!(Level::DEBUG, "Saving result");
    let _enter = span.enter();
    std::fs::write(&args.output, report).expect("Could not save to file");
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();
    let args = Args {
        viewport_width: pargs.opt_value_from_str("--viewport-width")?,
        trace: pargs.contains(["--trace", "-t"]),
        output: pargs.free_from_str()?,
    };
    Ok(args)
}

use std::error::Error;
use std::fs::File;
use std::process;
use std::sync::Mutex;
use std::time::Duration;

#[macro_use]
mod log;

use cli::{parse_args, AppearanceArgs, Commands};
use models::{parse_color, Appearance, TabItem};
use tabs::{TabStrip, Timeline};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui::{ButtonView, DemoConfig};

/// Labels used when neither `--labels` nor `--tabs` is given.
const DEFAULT_LABELS: &[&str] = &["activity", "inbox", "drafts", "archive"];

fn main() {
    if let Err(e) = run() {
        error!("{e}");
        process::exit(1);
    }
}

fn run() -> std::result::Result<(), Box<dyn Error>> {
    let args = parse_args();

    if let Some(path) = &args.log_file {
        init_tracing(path)?;
        debug!("Tracing to {}", path);
    }

    match args.command {
        Commands::View { appearance, labels, tabs, placeholder, duration_ms } => {
            let labels = match (labels.is_empty(), tabs) {
                (false, _) => labels,
                (true, Some(n)) => (1..=n).map(|i| format!("tab {i}")).collect(),
                (true, None) => DEFAULT_LABELS.iter().map(|l| l.to_string()).collect(),
            };
            let config = DemoConfig {
                appearance: appearance_from(&appearance)?,
                labels,
                placeholder,
                transition: Duration::from_millis(duration_ms),
            };
            tracing::info!(tabs = config.labels.len(), "starting viewer");

            tui::run(config)?;
        }

        Commands::Layout { appearance, labels, select, width } => {
            let appearance = appearance_from(&appearance)?;
            let visible = appearance.content_width(width);

            let mut strip: TabStrip<ButtonView> = TabStrip::new(appearance);
            let mut timeline = Timeline::new();
            let mut sizing = |item: &TabItem| ButtonView::width_for(item);
            strip.reload(labels.iter().map(TabItem::new).collect(), &mut sizing, &mut timeline);
            if strip.select(select, &mut sizing, &mut timeline).is_none() && select != 0 {
                return Err(format!("No tab at index {} ({} tab(s))", select, strip.len()).into());
            }
            strip.scroll_to_selected(visible);
            timeline.finish_all();

            for (item, frame) in strip.items().iter().zip(strip.layout()) {
                let mark = if strip.selected_item() == Some(item) { " (selected)" } else { "" };
                info!("{} x={} width={}{}", item.label, frame.x, frame.width, mark);
            }
            if let Some(span) = strip.indicator_frame(&timeline) {
                info!("indicator x={} width={}", span.x, span.width);
            }
            success!(
                "{} tab(s) over {} column(s), {} visible, scrolled by {}",
                strip.len(),
                strip.content_width(),
                visible,
                strip.scroll_offset()
            );
        }
    }

    Ok(())
}

/// Build an [`Appearance`] from command-line flags.
fn appearance_from(args: &AppearanceArgs) -> std::result::Result<Appearance, Box<dyn Error>> {
    let mut appearance = Appearance::new()
        .with_strip_height(args.height)
        .with_spacing(args.left_spacing, args.right_spacing, args.inner_spacing)
        .with_background(parse_color(&args.background)?);
    if args.indicator {
        appearance = appearance.with_indicator(parse_color(&args.indicator_color)?, args.indicator_thickness);
    }
    Ok(appearance)
}

/// Send tracing output to `path`. `RUST_LOG` overrides the default filter.
fn init_tracing(path: &str) -> std::result::Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();
    Ok(())
}

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tabdeck")]
#[command(version)]
pub struct Cli {
    /// write tracing output to this file
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    /// the command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Look of the tab strip, shared by every command.
#[derive(Args, Clone, Debug)]
pub struct AppearanceArgs {
    /// height of the tab buttons, in rows
    #[arg(long, default_value_t = 3)]
    pub height: u16,

    /// gap before the first tab
    #[arg(long, default_value_t = 1)]
    pub left_spacing: u16,

    /// gap after the last tab
    #[arg(long, default_value_t = 1)]
    pub right_spacing: u16,

    /// gap between neighbouring tabs
    #[arg(long, default_value_t = 1)]
    pub inner_spacing: u16,

    /// strip background colour (name, index or #rrggbb)
    #[arg(long, default_value = "reset")]
    pub background: String,

    /// draw a bar under the selected tab
    #[arg(long)]
    pub indicator: bool,

    /// colour of the selection bar
    #[arg(long, default_value = "blue")]
    pub indicator_color: String,

    /// thickness of the selection bar, in rows
    #[arg(long, default_value_t = 1)]
    pub indicator_thickness: u16,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse a set of tabs through a TUI
    View {
        #[command(flatten)]
        appearance: AppearanceArgs,

        /// comma-separated tab labels
        #[arg(short, long, value_delimiter = ',')]
        labels: Vec<String>,

        /// generate this many numbered tabs when no labels are given
        #[arg(short, long)]
        tabs: Option<usize>,

        /// text shown once every tab is closed
        #[arg(short, long)]
        placeholder: Option<String>,

        /// length of the selection transition
        #[arg(long, default_value_t = 250)]
        duration_ms: u64,
    },

    /// Print where each tab lands in a strip of the given width
    Layout {
        #[command(flatten)]
        appearance: AppearanceArgs,

        /// comma-separated tab labels
        #[arg(short, long, value_delimiter = ',', required = true)]
        labels: Vec<String>,

        /// index of the selected tab
        #[arg(short, long, default_value_t = 0)]
        select: usize,

        /// outer width of the strip, in columns
        #[arg(short, long, default_value_t = 80)]
        width: u16,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

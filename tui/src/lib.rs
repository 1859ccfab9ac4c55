mod app;
mod button;
mod delegate;
mod events;
mod screens;
pub mod widgets;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use models::Appearance;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::{Duration, Instant};

use app::App;

pub use button::ButtonView;
pub use delegate::DemoDelegate;
pub use events::EventLog;
pub use screens::Screen;

/// How long to wait for input before advancing animations.
const FRAME: Duration = Duration::from_millis(16);

/// Everything the demo needs to start.
#[derive(Clone, Debug)]
pub struct DemoConfig {
    pub appearance: Appearance,
    pub labels: Vec<String>,
    /// Text shown while there are no tabs.
    pub placeholder: Option<String>,
    pub transition: Duration,
}

/// Launch the TUI with the provided configuration.
pub fn run(config: DemoConfig) -> io::Result<()> {
    // Install a panic hook that restores the terminal before printing
    // the panic message. Without this, a panic leaves the terminal in
    // raw mode, making it unusable.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));

    let mut app = App::new(config).map_err(io::Error::other)?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let mut last = Instant::now();
    loop {
        terminal.draw(|f| app.render(f))?;

        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) => {
                    if !app.handle_key(key.code)
                        && (key.code == KeyCode::Char('q') || key.code == KeyCode::Esc)
                    {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(_) => app.handle_click(mouse.column, mouse.row),
                    MouseEventKind::ScrollDown => app.handle_scroll(mouse.column, mouse.row, true),
                    MouseEventKind::ScrollUp => app.handle_scroll(mouse.column, mouse.row, false),
                    _ => {}
                },
                _ => {}
            }
        }

        let now = Instant::now();
        app.tick(now - last);
        last = now;
    }
}

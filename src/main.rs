//! A drag-to-spin, infinitely wrapping carousel in the terminal.
//!
//! Drag the strip with the mouse (or use ←/→) and let it spring onto the
//! nearest item.  Pass item labels as arguments; `--write-config` saves the
//! effective settings to the config file.

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use revolver::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use revolver::config::AppConfig;
use revolver::core::window::nearest_index;
use revolver::ui::{carousel::CarouselWidget, theme::Theme};
use revolver::{EngineState, Placement, PhysicsSpring, Revolver};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Drag-to-spin infinite carousel")]
struct Cli {
    /// Item labels (defaults to `1 2 3 4`).
    items: Vec<String>,

    /// Item width in columns.
    #[arg(long)]
    item_width: Option<f64>,

    /// Item height in rows.
    #[arg(long)]
    item_height: Option<f64>,

    /// Gap between items in columns.
    #[arg(long)]
    gap: Option<f64>,

    /// Animation frame interval in milliseconds.
    #[arg(long)]
    frame_ms: Option<u64>,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Save the effective configuration and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    /// Layer command-line values over `config`, then apply the same range
    /// checks as the config file.
    fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(w) = self.item_width {
            config.item_width = w;
        }
        if let Some(h) = self.item_height {
            config.item_height = h;
        }
        if let Some(g) = self.gap {
            config.items_gap = g;
        }
        if let Some(ms) = self.frame_ms {
            config.frame_ms = ms;
        }
        config.clamped()
    }

    fn items(&self) -> Vec<String> {
        if self.items.is_empty() {
            ["1", "2", "3", "4"].map(String::from).to_vec()
        } else {
            self.items.clone()
        }
    }
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── drawing ──────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    state.sync_slots();
    let layout = state.layout();
    let revolver = &state.revolver;

    let slots = &state.slots;
    let snapshot = revolver.snapshot(|_, i| slots.get(i));
    let cards: Vec<_> = snapshot
        .window
        .into_iter()
        .filter_map(|p| {
            Some(Placement {
                logical_index: p.logical_index,
                pixel_x: p.pixel_x,
                left: p.left,
                node: p.node?,
            })
        })
        .collect();

    let border_style = if snapshot.is_dragging {
        Theme::grabbing_border_style()
    } else {
        Theme::border_style()
    };
    let block = Block::default()
        .title(format!(" revolver · {} items ", revolver.items().len()))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(border_style);

    let focused = nearest_index(revolver.visual_offset(), revolver.pitch());
    frame.render_widget(
        CarouselWidget::new(&cards, state.item_width_cols())
            .focused(focused)
            .block(block),
        layout.carousel_area,
    );

    if state.show_debug {
        let drag = revolver
            .drag_delta()
            .map_or_else(|| "none".to_string(), |d| format!("{d:.1}"));
        let viewport = revolver
            .viewport_width()
            .map_or_else(|| "unmeasured".to_string(), |w| format!("{w}"));
        let debug = format!(
            " state: {:?}  offset: {:.1}  drag: {}  viewport: {}  center: {} ({})",
            revolver.state(),
            revolver.visual_offset(),
            drag,
            viewport,
            revolver.center_index(),
            revolver.center_item(),
        );
        frame.render_widget(
            Paragraph::new(debug).style(Theme::debug_style()),
            layout.debug_area,
        );
    }

    let hint = "drag or ←/→: spin | d: debug | q: quit";
    let status_text = state.status_message.as_deref().unwrap_or(hint);
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let config = cli.apply_overrides(AppConfig::load());

    if cli.write_config {
        let path = config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    let revolver = Revolver::new(
        cli.items(),
        config.geometry(),
        PhysicsSpring::new(config.spring()),
    )
    .context("invalid carousel configuration")?;
    let frame_interval = config.frame_interval();
    let mut state = AppState::new(revolver, config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    handler::handle_resize(&mut state, size.width, size.height);
    tracing::info!(
        items = state.revolver.items().len(),
        pitch = state.revolver.pitch(),
        "carousel ready"
    );

    let mut events = spawn_event_reader(frame_interval);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| draw(frame, &mut state))?;

        let Some(event) = events.recv().await else {
            break;
        };
        let is_frame = matches!(event, AppEvent::Frame);
        match event {
            AppEvent::Key(k) => handler::handle_key(&mut state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
            AppEvent::Resize { width, height } => handler::handle_resize(&mut state, width, height),
            AppEvent::FocusLost => handler::handle_focus_lost(&mut state),
            AppEvent::Frame => {}
        }

        // Input can starve the idle frame ticks, so also animate on a
        // wall-clock basis.
        if state.revolver.state() == EngineState::Settling
            && (is_frame || state.last_frame.elapsed() >= frame_interval)
        {
            handler::handle_frame(&mut state, Instant::now());
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_go_through_config_ranges() {
        let cli = Cli::parse_from([
            "revolver",
            "--item-width",
            "1e-300",
            "--item-height",
            "inf",
            "--gap",
            "0.6",
            "--frame-ms",
            "1",
        ]);
        let config = cli.apply_overrides(AppConfig::default());
        assert_eq!(config.item_width, 1.0);
        assert_eq!(config.item_height, AppConfig::default().item_height);
        assert_eq!(config.items_gap, 1.0);
        assert_eq!(config.frame_ms, 4);
        assert!(config.geometry().validate().is_ok());
    }

    #[test]
    fn no_overrides_keeps_loaded_values() {
        let cli = Cli::parse_from(["revolver", "a", "b"]);
        assert_eq!(cli.apply_overrides(AppConfig::default()), AppConfig::default());
        assert_eq!(cli.items(), vec!["a".to_string(), "b".to_string()]);
    }
}

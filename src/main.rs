//! Keyboard Tester - terminal keyboard testing utility
//!
//! Lights up every key of the selected layout as it is pressed.

use anyhow::Result;
use crossterm::{
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    symbols::border,
    widgets::{Block, Borders},
    Frame, Terminal,
};
use std::{
    fs::File,
    io::{stdout, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc, Arc,
    },
    time::Instant,
};

use keyboard_tester::{
    config::{self, Config},
    keyboard::{KeyEvent, KeyboardListener, TestPhase},
    ui::{
        App, AppState, AppView, CelebrationPopup, Control, KeyboardVisual, LastPressed,
        ProgressPanel, StatBadges, StatusBar, TabBar, TextPanel, ThemeColors,
    },
};

const LOG_FILE: &str = "keyboard-tester.log";

/// Log to a file in the config directory when `RUST_LOG` is set.
///
/// The terminal is owned by the UI, so nothing is ever written to stderr.
fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let Ok(dir) = config::config_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join(LOG_FILE)) else {
        return;
    };
    let _ = env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
}

fn phase_label(phase: TestPhase) -> &'static str {
    match phase {
        TestPhase::Idle => "IDLE",
        TestPhase::Active => "TESTING",
        TestPhase::Complete => "COMPLETE",
    }
}

fn draw(frame: &mut Frame, app: &App, colors: ThemeColors) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(3), // Stat badges
            Constraint::Length(3), // Last pressed + progress
            Constraint::Min(7),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    let tab_names: Vec<&str> = AppView::all().iter().map(|v| v.name()).collect();
    frame.render_widget(TabBar::new(&tab_names, app.view.index()), chunks[0]);

    let badges = app.badges();
    frame.render_widget(StatBadges::new(&badges, colors), chunks[1]);

    let info = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[2]);
    let last = app.keyboard_state.last_pressed().map(|k| k.as_str());
    frame.render_widget(LastPressed::new(last, colors), info[0]);
    frame.render_widget(
        ProgressPanel::new(
            app.keyboard_state.pressed_keys().len(),
            app.layout().expected_keys(),
            colors,
        ),
        info[1],
    );

    match app.view {
        AppView::Visual => {
            let title = format!(" \u{2328} {} Keyboard ", app.layout().name());
            let kb_block = Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(colors.dim));
            let visual = KeyboardVisual::new(&app.keyboard_state, colors);
            let kb_area = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(visual.height() + 2), Constraint::Min(0)])
                .split(chunks[3])[0];
            let kb_inner = kb_block.inner(kb_area);
            frame.render_widget(kb_block, kb_area);
            frame.render_widget(visual, kb_inner);
        }
        AppView::Text => {
            frame.render_widget(
                TextPanel::new(app.text.text(), app.text.len(), app.text.errors(), colors),
                chunks[3],
            );
        }
    }

    let elapsed = app.elapsed_formatted();
    let status = StatusBar::new(
        phase_label(app.keyboard_state.phase()),
        app.layout().name(),
        &elapsed,
    )
    .message(app.get_status());
    frame.render_widget(status, chunks[4]);

    if app.show_celebration {
        frame.render_widget(CelebrationPopup::new(app.layout().name(), colors), size);
    }
}

fn main() -> Result<()> {
    init_logging();

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("using default config: {}", e);
        Config::default()
    });
    let colors = ThemeColors::from_theme(config.ui.theme);

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&interrupted);
        if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
            log::warn!("could not install signal handler: {}", e);
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
            )
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    if !enhanced {
        app.set_status("Terminal does not report key releases; holds are momentary".to_string());
    }
    log::info!(
        "session started: layout {}, key releases {}",
        app.layout().name(),
        if enhanced { "reported" } else { "synthesized" }
    );

    let (event_tx, event_rx) = mpsc::channel::<KeyEvent>();
    let listener = KeyboardListener::new(event_tx, enhanced);

    let result = run(&mut terminal, &mut app, &listener, &event_rx, colors, &interrupted);

    // Cleanup terminal
    if enhanced {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    let report = app.generate_report();
    println!("\nKeyboard Tester session complete.");
    println!("Layout: {}", report.layout);
    println!(
        "Keys pressed: {} ({} unique of {})",
        report.keys_pressed_count,
        report.unique_keys_pressed_count,
        app.layout().expected_keys()
    );
    println!("Session duration: {}", app.elapsed_formatted());

    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    listener: &KeyboardListener,
    event_rx: &mpsc::Receiver<KeyEvent>,
    colors: ThemeColors,
    interrupted: &AtomicBool,
) -> Result<()> {
    let tick_rate = app.config.refresh_interval();

    loop {
        terminal.draw(|frame| draw(frame, app, colors))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                let now = Instant::now();
                if let Some(control) = Control::from_key(&key) {
                    app.run_control(control);
                } else if !app.handle_text_key(&key, listener.reports_releases(), now) {
                    listener.handle(&key, now);
                }
            }
        }

        while let Ok(key_event) = event_rx.try_recv() {
            app.process_event(&key_event);
        }

        app.tick(Instant::now());

        if interrupted.load(Ordering::SeqCst) {
            app.quit();
        }
        if app.state == AppState::Quitting {
            break;
        }
    }

    log::info!("session ended after {}", app.elapsed_formatted());
    Ok(())
}

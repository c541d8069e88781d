use crossterm::event::{
    self, Event, KeyEvent, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use hopper::input::{apply_input, map_key_event, InputOutcome, JumpKey};
use hopper::runner::{FrameClock, GameEngine, InputFlags, FRAME_MS};
use hopper::settings::{self, Command, LaunchOptions};
use hopper::ui::draw_ui;
use hopper::utils::{build_info, logging};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io::{self, Write};
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    let command = match settings::parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'hopper --help' for usage.");
            std::process::exit(1);
        }
    };

    let cli = match command {
        Command::Help => {
            println!("{}", settings::USAGE);
            return Ok(());
        }
        Command::Version => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Command::ListVariants => {
            println!("Variants:\n{}", settings::variant_listing());
            return Ok(());
        }
        Command::Play(cli) => cli,
    };

    let launch = match settings::load_settings(cli.config_path.as_deref())
        .and_then(|loaded| settings::resolve(&cli, loaded))
    {
        Ok(launch) => launch,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(launch.log_filter.as_deref()) {
        eprintln!("Warning: logging disabled ({})", e);
    }
    tracing::info!(
        version = %build_info::version_line(),
        variant = launch.variant.key(),
        seed = ?launch.seed,
        "starting"
    );

    let mut rng = match launch.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    #[cfg(feature = "web")]
    if let Some(port) = launch.serve_port {
        use std::sync::Arc;

        let server = Arc::new(hopper::web::WebServer::new());
        hopper::web::spawn_web_server(port, Arc::clone(&server))?;
        let writer = hopper::web::TeeWriter::new(server.output_sender());
        return run(writer, &launch, &mut rng, || server.try_recv_input());
    }

    #[cfg(not(feature = "web"))]
    if launch.serve_port.is_some() {
        eprintln!("Warning: --serve needs a build with `--features web`; playing locally.");
        tracing::warn!("--serve ignored: built without the web feature");
    }

    run(io::stdout(), &launch, &mut rng, || None)
}

/// Set up the terminal, play until the player quits, then restore it even
/// if the game loop failed.
fn run<W, F>(mut writer: W, launch: &LaunchOptions, rng: &mut StdRng, remote_input: F) -> io::Result<()>
where
    W: Write,
    F: FnMut() -> Option<KeyEvent>,
{
    enable_raw_mode()?;
    writer.execute(EnterAlternateScreen)?;

    // Key release events let a held jump end exactly when the key comes up
    let reports_release = supports_keyboard_enhancement().unwrap_or(false);
    if reports_release {
        writer.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    tracing::info!(reports_release, "terminal ready");

    let mut terminal = Terminal::new(CrosstermBackend::new(writer))?;
    terminal.hide_cursor()?;

    let result = game_loop(&mut terminal, launch, rng, reports_release, remote_input);

    if reports_release {
        terminal.backend_mut().execute(PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "game loop failed");
    }
    result
}

fn game_loop<B, F>(
    terminal: &mut Terminal<B>,
    launch: &LaunchOptions,
    rng: &mut StdRng,
    reports_release: bool,
    mut remote_input: F,
) -> io::Result<()>
where
    B: Backend,
    F: FnMut() -> Option<KeyEvent>,
{
    let mut engine = GameEngine::new(launch.config.clone());
    let mut clock = FrameClock::new();
    let mut jump = JumpKey::new(reports_release);
    let mut snapshot = engine.snapshot();

    let started = Instant::now();
    let mut seen_ms = 0u64;

    loop {
        terminal.draw(|frame| draw_ui(frame, &snapshot, &engine, launch.variant))?;

        let mut keys = Vec::new();
        if event::poll(Duration::from_millis(FRAME_MS))? {
            loop {
                if let Event::Key(key) = event::read()? {
                    keys.push(key);
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }
        keys.extend(std::iter::from_fn(&mut remote_input));

        let now_ms = clock.now_ms();
        let session = engine.session();
        for key in &keys {
            let Some(input) = map_key_event(key) else {
                continue;
            };
            if apply_input(&mut engine, &mut jump, input, now_ms) == InputOutcome::Quit {
                tracing::info!(
                    score = engine.displayed_score(),
                    session = engine.session(),
                    "player quit"
                );
                return Ok(());
            }
        }
        if jump.expire(now_ms) {
            engine.release_jump();
        }
        if engine.session() != session {
            snapshot = engine.snapshot();
        }

        let total_ms = started.elapsed().as_millis() as u64;
        clock.accumulate(total_ms.saturating_sub(seen_ms));
        seen_ms = total_ms;

        let input = InputFlags {
            jump_held: jump.is_held(),
        };
        while let Some(frame_ms) = clock.next_frame() {
            snapshot = engine.tick(frame_ms, input, rng);
        }
    }
}

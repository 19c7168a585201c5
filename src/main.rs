//! Headless Bug Validator session driven by a command script.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use bug_validator::constants::DEFAULT_CANVAS_SIZE;
use bug_validator::script::run_script;
use bug_validator::{AppConfig, LogLevel, OverlayHandle, Presenter, RectCoords, SessionController};

const USAGE: &str = "Usage: bug-validator [--config PATH] [--log-level LEVEL] [SCRIPT]

Reads commands from SCRIPT, or stdin when no script is given:
  source DIR | dest DIR | load | image N | next | prev | canvas W H
  add | select N | rect N | draw X1 Y1 X2 Y2 | drag X1 Y1 X2 Y2
  delete-rect | delete-defect | rename TEXT | category N | result TEXT
  undo | redo | zoom in|out|reset | save | save-next | status";

/// Presenter that reports through the log and the terminal.
#[derive(Debug, Default)]
struct LogPresenter {
    next_handle: u64,
}

impl Presenter for LogPresenter {
    fn clear_overlays(&mut self) {
        log::trace!("Overlays cleared");
    }

    fn draw_overlay(&mut self, coords: RectCoords, highlighted: bool) -> OverlayHandle {
        self.next_handle += 1;
        log::debug!(
            "Overlay {} at {:?}{}",
            self.next_handle,
            coords.as_array(),
            if highlighted { " (selected)" } else { "" }
        );
        OverlayHandle(self.next_handle)
    }

    fn show_status(&mut self, message: &str) {
        println!("{}", message);
    }

    fn show_info(&mut self, message: &str) {
        println!("{}", message);
    }

    fn show_warning(&mut self, message: &str) {
        log::warn!("{}", message);
    }
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    log_level: Option<LogLevel>,
    script: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--log-level" => {
                let name = args.next().ok_or("--log-level needs a level")?;
                let level = LogLevel::from_name(&name)
                    .ok_or_else(|| format!("Unknown log level: {}", name))?;
                parsed.log_level = Some(level);
            }
            "-h" | "--help" => return Err(String::new()),
            _ if arg.starts_with("--") => return Err(format!("Unknown option: {}", arg)),
            _ => parsed.script = Some(PathBuf::from(arg)),
        }
    }
    Ok(parsed)
}

fn read_script(path: Option<&PathBuf>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut script = String::new();
            std::io::stdin().read_to_string(&mut script)?;
            Ok(script)
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("{}", message);
            }
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    let config_path = args.config.clone().or_else(AppConfig::default_path);
    let loaded = match config_path.as_deref() {
        Some(path) => AppConfig::try_load(path),
        None => Ok(None),
    };

    // The logger needs the configured level, so load failures are reported after init.
    let level = match (&args.log_level, &loaded) {
        (Some(level), _) => *level,
        (None, Ok(Some(config))) => config.log_level,
        _ => LogLevel::default(),
    };
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .init();

    let config = match loaded {
        Ok(Some(config)) => {
            log::info!("Loaded configuration from {:?}", config_path);
            config
        }
        Ok(None) => {
            log::debug!("No config file found at {:?}", config_path);
            AppConfig::default()
        }
        Err(e) => {
            log::warn!("Failed to load config file {:?}: {}", config_path, e);
            AppConfig::default()
        }
    };

    let script = match read_script(args.script.as_ref()) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("Failed to read script: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut session = SessionController::new(config, config_path, LogPresenter::default());
    let (width, height) = DEFAULT_CANVAS_SIZE;
    session.resize_canvas(width, height);
    session.load_configured_images();

    let applied = run_script(&mut session, &script);
    log::info!("Ran {} command(s)", applied);
    ExitCode::SUCCESS
}

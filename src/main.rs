use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use steply_datetime::config::{ConfigError, OptionValue, PickerOptions};
use steply_datetime::format::AxisFormat;
use steply_datetime::runtime::event::WidgetAction;
use steply_datetime::terminal::{KeyCode, KeyModifiers, Terminal, TerminalEvent};
use steply_datetime::widgets::date_time::DateTimeInput;
use steply_datetime::widgets::traits::{
    Drawable, InteractionResult, Interactive, RenderContext, ValidationMode,
};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const IDLE_TIMEOUT: Duration = Duration::from_millis(250);
const DEFAULT_LOG_FILTER: &str = "steply_datetime=debug";

#[derive(Parser)]
#[command(name = "steply-datetime")]
#[command(version, about = "Interactive date/time picker demo", long_about = None)]
struct Cli {
    /// Picker options file (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Date format; `false` hides the date part, `true` uses the default
    #[arg(long)]
    date_format: Option<String>,
    /// Time format; `false` hides the time part, `true` uses the default
    #[arg(long)]
    time_format: Option<String>,
    /// Output mode: Date, utc-ms-timestamp or input-format
    #[arg(long)]
    mode: Option<String>,
    /// Initial value; digits are read as epoch milliseconds
    #[arg(long)]
    value: Option<String>,
}

#[derive(Debug, Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let Some(path) = std::env::var_os("STEPLY_LOG") else {
        return;
    };
    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("cannot open log file {}: {err}", PathBuf::from(path).display());
            return;
        }
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(DEFAULT_LOG_FILTER),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn load_options(cli: Cli) -> Result<PickerOptions, ConfigError> {
    let mut options = match &cli.config {
        Some(path) => PickerOptions::from_path(path)?,
        None => PickerOptions::default(),
    };
    if let Some(raw) = cli.date_format {
        options.date_format = axis_override(raw);
    }
    if let Some(raw) = cli.time_format {
        options.time_format = axis_override(raw);
    }
    if let Some(mode) = cli.mode {
        options.date_type_mode = Some(mode);
    }
    if let Some(raw) = cli.value {
        options.value = Some(match raw.trim().parse::<i64>() {
            Ok(millis) => OptionValue::Number(millis),
            Err(_) => OptionValue::Text(raw),
        });
    }
    Ok(options)
}

fn axis_override(raw: String) -> AxisFormat {
    match raw.as_str() {
        "true" => AxisFormat::Default,
        "false" => AxisFormat::Suppressed,
        _ => AxisFormat::Pattern(raw),
    }
}

fn run(cli: Cli) -> Result<(), DemoError> {
    let options = load_options(cli)?;
    let mut input = options.build_input()?;
    info!(
        format = input.picker().full_format(),
        mode = input.picker().date_type_mode().as_str(),
        "starting picker"
    );

    let mut terminal = Terminal::new()?;
    terminal.enter()?;
    let result = event_loop(&mut terminal, &mut input);
    terminal.exit()?;
    let actions = result?;

    for action in &actions {
        match action {
            WidgetAction::ValueChanged { change } => println!("change: {:?}", change.value),
            WidgetAction::Focused { id } => println!("focus: {id}"),
            WidgetAction::Blurred { id, value } => println!("blur: {id} {value:?}"),
            WidgetAction::InputDone => {}
        }
    }
    match input.validate(ValidationMode::Submit) {
        Ok(()) => println!("value: {:?}", input.value()),
        Err(message) => println!("invalid: {message}"),
    }
    Ok(())
}

fn event_loop(terminal: &mut Terminal, input: &mut DateTimeInput) -> io::Result<Vec<WidgetAction>> {
    let mut log = Vec::new();
    let mut focused = true;
    let mut result = input.on_focus_change(true);

    loop {
        let done = result
            .actions
            .iter()
            .any(|action| matches!(action, WidgetAction::InputDone));
        log.append(&mut result.actions);
        if done {
            break;
        }

        let ctx = RenderContext {
            focused_id: focused.then(|| input.id().to_string()),
            terminal_size: terminal.size(),
        };
        let cursor = if focused { input.cursor_pos() } else { None };
        terminal.render(&input.draw(&ctx).lines, cursor)?;

        let timeout = input.poll_timeout(Instant::now(), IDLE_TIMEOUT);
        result = match terminal.poll_event(timeout)? {
            TerminalEvent::Key(key)
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                debug!("interrupted");
                break;
            }
            TerminalEvent::Key(key) => {
                let mut result = input.on_key(key);
                if !result.handled && matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
                    focused = !focused;
                    result.merge(input.on_focus_change(focused));
                }
                result
            }
            TerminalEvent::Mouse(mouse) => {
                focused = true;
                input.on_mouse(mouse, Instant::now())
            }
            TerminalEvent::FocusGained => InteractionResult::consumed(),
            TerminalEvent::FocusLost => {
                focused = false;
                input.on_focus_change(false)
            }
            TerminalEvent::Resize(_) => InteractionResult::handled(),
            TerminalEvent::Tick => input.on_tick(Instant::now()),
        };
    }
    Ok(log)
}

use anyhow::{Context, Result};
use clap::Parser;
use ratatui::{backend::TermionBackend, Terminal};
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use termion::input::MouseTerminal;
use termion::raw::IntoRawMode;
use termion::screen::IntoAlternateScreen;

use keyquill::command::Interpreter;
use keyquill::config::Config;
use keyquill::document::TextBuffer;
use keyquill::file::loader::{load_text_file, load_text_from_stdin};
use keyquill::input::script::run_key_script;
use keyquill::input::InputHandler;
use keyquill::ui::UI;

/// keyquill - A modal text editor with vim-style motions, operators and counts
#[derive(Parser)]
#[command(name = "keyquill")]
#[command(version)]
#[command(about = "A modal text editor with vim-style motions, operators and counts", long_about = None)]
struct Cli {
    /// File to edit (omit to read from stdin if piped, or start with an empty buffer)
    file: Option<String>,

    /// Config file to use instead of ~/.config/keyquill/config.toml
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run a keystroke script without a terminal and print the resulting text
    /// (`<esc>` returns to normal mode, `<cr>` types a newline)
    #[arg(short, long, value_name = "SCRIPT")]
    keys: Option<String>,

    /// Append log output to this file (level from RUST_LOG, default warn)
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
}

/// Set up a panic hook that restores the terminal before displaying panic information.
///
/// Without this, panic messages would be hidden behind the alternate screen.
fn setup_panic_hook() {
    use std::panic;

    let default_panic = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Use stderr to avoid interfering with stdout pipes
        let _ = write!(io::stderr(), "{}", termion::screen::ToMainScreen);
        let _ = write!(io::stderr(), "{}", termion::cursor::Show);
        let _ = io::stderr().flush();

        default_panic(panic_info);
    }));
}

/// Initialises env_logger.
///
/// Logs go to `log_path` when given. Headless runs log to stderr; the
/// terminal UI has no log output otherwise, since stderr shares the screen.
fn init_logging(log_path: Option<&Path>, headless: bool) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Some(path) = log_path {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    } else if !headless {
        return Ok(());
    }

    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    setup_panic_hook();

    let cli = Cli::parse();
    init_logging(cli.log.as_deref(), cli.keys.is_some())?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    // Read the buffer BEFORE terminal setup, stdin may hold the text
    let (buffer, stdin_was_piped) = if let Some(file_path) = &cli.file {
        (load_text_file(file_path)?, false)
    } else if !io::stdin().is_terminal() {
        (load_text_from_stdin()?, true)
    } else {
        (TextBuffer::new(), false)
    };
    let mut buffer = buffer
        .with_system_clipboard()
        .with_undo_limit(config.undo_limit);

    let mut interpreter = Interpreter::new(config);

    if let Some(script) = &cli.keys {
        run_key_script(&mut interpreter, &mut buffer, script);
        if let Some(message) = interpreter.message() {
            log::info!("{:?}: {}", message.level, message.text);
        }
        let mut text = buffer.text();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        let mut stdout = io::stdout();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    // Termion can use /dev/tty directly when stdin is piped
    let stdout = io::stdout()
        .into_raw_mode()
        .context("Failed to enable raw mode")?;
    let stdout = MouseTerminal::from(stdout);
    let stdout = stdout
        .into_alternate_screen()
        .context("Failed to enter alternate screen")?;

    let backend = TermionBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let ui = UI::new();
    let mut input_handler = if stdin_was_piped {
        InputHandler::new_with_tty()
            .context("Failed to open /dev/tty for keyboard input when stdin was piped")?
    } else {
        InputHandler::new()
    };

    let result = run_event_loop(
        &mut terminal,
        &ui,
        &mut input_handler,
        &mut interpreter,
        &mut buffer,
    );

    // Termion restores the screen through Drop guards, the cursor we show ourselves
    write!(terminal.backend_mut(), "{}", termion::cursor::Show)?;
    terminal.backend_mut().flush()?;

    result
}

fn run_event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    ui: &UI,
    input_handler: &mut InputHandler,
    interpreter: &mut Interpreter,
    buffer: &mut TextBuffer,
) -> Result<()> {
    loop {
        ui.render(terminal, interpreter, buffer)?;

        match input_handler.poll_event(Duration::from_millis(100))? {
            Some(event) => {
                if input_handler.handle_event(event, interpreter, buffer)? {
                    break;
                }
            }
            None => {
                log::debug!("input closed");
                break;
            }
        }
    }

    Ok(())
}

mod ai;
mod app;
mod config;
mod constants;
mod credentials;
mod input;
mod reply;
mod ui;

use anyhow::Result;
use std::env;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ai::GeminiClient;
use crate::app::App;
use crate::config::Config;
use crate::credentials::CredentialStore;

fn setup_logging() {
    use std::fs::OpenOptions;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,replydraft=debug"));

    // The terminal is in the alternate screen, so log to a file
    let log_file = Config::config_dir()
        .ok()
        .map(|dir| dir.join("replydraft.log"))
        .and_then(|path| {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .ok()
        });

    if let Some(file) = log_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        // Fallback to stderr if file logging fails
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_usage() {
    eprintln!(
        r#"replydraft - Draft polite replies to parents' messages with Gemini

Usage: replydraft [command]

Commands:
    (none)      Open the reply form; the final draft is printed on exit
    setup       Store the Gemini API key
    help        Show this help message

The API key is read from the GEMINI_API_KEY environment variable,
the system keyring, or ~/.config/replydraft/.gemini_api_key.

Configuration file: ~/.config/replydraft/config.toml
"#
    );
}

fn run_setup() -> Result<()> {
    use std::io::{self, Write};

    println!("replydraft Setup");
    println!("================\n");

    let creds = CredentialStore::new();

    if let Ok((_, source)) = creds.load_api_key() {
        print!("An API key is already available from the {}. Replace it? [y/N]: ", source);
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Setup cancelled.");
            return Ok(());
        }
    }

    let key = loop {
        print!("Gemini API key: ");
        io::stdout().flush()?;
        let key = read_secret()?;
        println!();
        if !key.is_empty() {
            break key;
        }
        println!("The key cannot be empty.");
    };

    Config::ensure_dirs()?;
    let source = creds.store_api_key(&key)?;
    println!("API key stored in the {}.", source);

    // Write a default config so the settings are discoverable
    let config_path = Config::config_path()?;
    if !config_path.exists() {
        Config::default().save()?;
        println!("Default configuration written to {}", config_path.display());
    }

    println!("\nSetup complete! Run 'replydraft' to start.");
    Ok(())
}

fn read_secret() -> Result<String> {
    use std::io;

    let _guard = DisableEcho::new()?;

    let mut secret = String::new();
    io::stdin().read_line(&mut secret)?;
    Ok(secret.trim().to_string())
}

struct DisableEcho {
    #[cfg(unix)]
    original: libc::termios,
}

impl DisableEcho {
    #[cfg(unix)]
    fn new() -> Result<Self> {
        use std::mem::MaybeUninit;
        use std::os::unix::io::AsRawFd;

        let fd = std::io::stdin().as_raw_fd();
        let mut termios = MaybeUninit::<libc::termios>::uninit();

        unsafe {
            if libc::tcgetattr(fd, termios.as_mut_ptr()) != 0 {
                anyhow::bail!("Failed to get terminal attributes");
            }
            let original = termios.assume_init();
            let mut new = original;
            new.c_lflag &= !libc::ECHO;
            if libc::tcsetattr(fd, libc::TCSANOW, &new) != 0 {
                anyhow::bail!("Failed to set terminal attributes");
            }
            Ok(Self { original })
        }
    }

    #[cfg(not(unix))]
    fn new() -> Result<Self> {
        Ok(Self {})
    }
}

#[cfg(unix)]
impl Drop for DisableEcho {
    fn drop(&mut self) {
        use std::os::unix::io::AsRawFd;
        let fd = std::io::stdin().as_raw_fd();
        unsafe {
            libc::tcsetattr(fd, libc::TCSANOW, &self.original);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some("setup") => run_setup(),
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
        None => {
            Config::ensure_dirs()?;
            setup_logging();

            let config = Config::load()?;
            crate::ui::theme::init_theme(config.ui.theme);

            // A missing key is fatal: the form is never shown without one
            let creds = CredentialStore::new();
            let api_key = match creds.load_api_key() {
                Ok((key, source)) => {
                    tracing::info!("Using Gemini API key from {}", source);
                    key
                }
                Err(e) => {
                    tracing::error!("No API key: {}", e);
                    eprintln!("Configuration error: {}\n", e);
                    eprintln!("{}", creds.debug_info());
                    eprintln!("  export GEMINI_API_KEY='your-key'");
                    eprintln!("  replydraft");
                    std::process::exit(1);
                }
            };

            let client = GeminiClient::new(api_key, &config.gemini);
            let mut app = App::new(client);
            let draft = app.run().await?;

            if !draft.trim().is_empty() {
                println!("{}", draft);
            }
            Ok(())
        }
    }
}

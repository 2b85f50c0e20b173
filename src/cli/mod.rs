//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod repl;
pub mod say;

use std::error::Error;
use std::path::Path;

use clap::{Parser, Subcommand};

use crate::api::HttpBackend;
use crate::cli::repl::run_repl;
use crate::cli::say::run_say;
use crate::core::config::{Config, ConfigKey};
use crate::logging::{init_tracing, DiagnosticsTarget};
use crate::ui::chat_loop::run_chat;
use crate::ui::theme::Theme;
use crate::utils::logging::LoggingState;
use crate::utils::url::normalize_base_url;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    ", built ",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(name = "chatbox", version, long_version = LONG_VERSION)]
#[command(about = "A terminal chat client for a remote chat backend")]
#[command(
    long_about = "chatbox talks to a chat backend that keeps the conversation on the server. \
On start it loads the stored conversation for this session, then sends each message \
together with the running transcript and shows the reply.\n\n\
Backend:\n\
  GET  /get_history   returns {\"history\": \"...\"}\n\
  POST /chat          takes {\"message\", \"history\"}, returns {\"reply\", \"new_history\"}\n\n\
Controls (full-screen mode):\n\
  Enter             Send the message\n\
  Up/Down/PgUp/PgDn Scroll through the conversation\n\
  Ctrl+L            Reload the conversation from the server\n\
  Ctrl+C / Esc      Quit\n\n\
Configuration:\n\
  chatbox set base-url http://127.0.0.1:5000\n\
  chatbox set theme light\n\
  chatbox set request-timeout 30"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL for this run (overrides the configured base-url)
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Append every shown message to this file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<String>,

    /// Write diagnostic logs (filtered by RUST_LOG) to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub debug_log: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the full-screen chat interface (default)
    Chat,
    /// Chat line by line on stdin/stdout; type 'exit' to quit
    Repl,
    /// Send one message and print the reply
    Say {
        /// Message to send
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set (base-url, theme, request-timeout)
        key: Option<String>,
        /// Value to set for the key
        value: Option<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

/// What a chat command needs, resolved from config and flags.
struct SessionSetup {
    backend: HttpBackend,
    theme: Theme,
    logging: LoggingState,
}

impl SessionSetup {
    fn prepare(
        url: Option<&str>,
        log: Option<String>,
        debug_log: Option<&str>,
        fullscreen: bool,
    ) -> Result<Self, Box<dyn Error>> {
        let diagnostics = match debug_log {
            Some(path) => DiagnosticsTarget::File(Path::new(path)),
            None if fullscreen => DiagnosticsTarget::Off,
            None => DiagnosticsTarget::Stderr,
        };
        init_tracing(diagnostics)?;

        let config = Config::load()?;
        let base_url = resolve_base_url(url, &config);
        let backend = HttpBackend::new(&base_url, config.request_timeout())?;
        let logging = LoggingState::new(log)?;

        Ok(Self {
            backend,
            theme: config.resolved_theme(),
            logging,
        })
    }
}

/// `--url` wins over the config file when it is non-empty.
pub(crate) fn resolve_base_url(flag: Option<&str>, config: &Config) -> String {
    flag.map(normalize_base_url)
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| config.resolved_base_url())
}

fn parse_config_key(key: &str) -> ConfigKey {
    match ConfigKey::parse(key) {
        Some(key) => key,
        None => {
            let known: Vec<&str> = ConfigKey::ALL.iter().map(|key| key.as_str()).collect();
            eprintln!("❌ Unknown config key: {key}");
            eprintln!("Known keys: {}", known.join(", "));
            std::process::exit(1);
        }
    }
}

fn set_config_value(key: Option<String>, value: Option<String>) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    let (Some(key), Some(value)) = (key, value) else {
        config.print_all();
        return Ok(());
    };

    let key = parse_config_key(&key);
    match config.set_value(key, &value) {
        Ok(stored) => {
            config.save()?;
            println!("✅ Set {key} to: {stored}");
        }
        Err(message) => {
            eprintln!("❌ {message}");
            std::process::exit(1);
        }
    }
    Ok(())
}

fn unset_config_value(key: &str) -> Result<(), Box<dyn Error>> {
    let key = parse_config_key(key);
    let mut config = Config::load()?;
    config.unset_value(key);
    config.save()?;
    println!("✅ Unset {key}");
    Ok(())
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let Args {
        command,
        url,
        log,
        debug_log,
    } = Args::parse();

    match command.unwrap_or(Commands::Chat) {
        Commands::Set { key, value } => set_config_value(key, value),
        Commands::Unset { key } => unset_config_value(&key),
        Commands::Chat => {
            let setup = SessionSetup::prepare(url.as_deref(), log, debug_log.as_deref(), true)?;
            run_chat(setup.backend, setup.theme, setup.logging).await
        }
        Commands::Repl => {
            let setup = SessionSetup::prepare(url.as_deref(), log, debug_log.as_deref(), false)?;
            run_repl(&setup.backend, &setup.logging).await
        }
        Commands::Say { message } => {
            let setup = SessionSetup::prepare(url.as_deref(), log, debug_log.as_deref(), false)?;
            run_say(message, &setup.backend, &setup.logging).await
        }
    }
}

#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use desi_translate::api::client::ApiClient;
use desi_translate::api::TranslationBackend;
use desi_translate::app_config::{self, Config};
use desi_translate::export::{now_millis, Attachment};
use desi_translate::file_utils::FileManager;
use desi_translate::language_utils;
use desi_translate::pages::auth::{LoginForm, RegisterForm};
use desi_translate::pages::historical::HistoricalPage;
use desi_translate::pages::idiom::IdiomPage;
use desi_translate::pages::slang::SlangPage;
use desi_translate::pages::translator::TranslatorPage;
use desi_translate::pages::video::VideoPage;
use desi_translate::pages::ResultArea;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// How a page result is printed and saved
#[derive(Args, Debug)]
struct OutputArgs {
    /// Print the HTML rendering instead of plain text
    #[arg(long)]
    html: bool,

    /// Save the page's download file into this directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Save the page's download file into the user's download directory
    #[arg(long, conflicts_with = "output")]
    save: bool,
}

impl OutputArgs {
    /// Directory the download goes to, if any
    fn target_dir(&self) -> Option<PathBuf> {
        self.output
            .clone()
            .or_else(|| self.save.then(FileManager::default_download_dir))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check credentials against the backend
    Login {
        username: String,

        #[arg(short, long, env = "DESI_PASSWORD")]
        password: String,
    },

    /// Create an account
    Register {
        username: String,

        email: String,

        #[arg(short, long, env = "DESI_PASSWORD")]
        password: String,

        /// Password confirmation (defaults to --password)
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Look up an English idiom
    Idiom {
        idiom: String,

        /// Target language (e.g. 'hindi', 'hi', 'tel')
        #[arg(short, long)]
        target_language: Option<String>,

        /// Print the HTML rendering instead of plain text
        #[arg(long)]
        html: bool,
    },

    /// Normalize chat slang into standard English
    Slang {
        text: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Modernize historical English
    Historical {
        text: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Translate text with word-level analysis
    Translate {
        text: String,

        /// Source language code
        #[arg(short, long)]
        source_language: Option<String>,

        /// Target language (e.g. 'hindi', 'es', 'French')
        #[arg(short, long)]
        target_language: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Translate a subtitle file (.srt, .vtt, .txt)
    Video {
        #[arg(value_name = "SUBTITLE_FILE")]
        input: PathBuf,

        /// Target language (e.g. 'hindi', 'ta')
        #[arg(short, long)]
        target_language: Option<String>,

        /// Save an SRT document with the original timings instead of the transcript
        #[arg(long)]
        srt: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate shell completions for desi-translate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// desi-translate - command-line client for the desi-translate backend
#[derive(Parser, Debug)]
#[command(name = "desi-translate")]
#[command(version)]
#[command(about = "Idiom, slang, historical, text and subtitle translation client")]
#[command(long_about = "desi-translate drives the desi-translate web backend from a terminal.

EXAMPLES:
    desi-translate idiom \"break the ice\" -t hindi      # Translate an idiom
    desi-translate slang \"thx u r gr8\"                  # Normalize slang
    desi-translate historical \"Thou art kind\" -o out/   # Save the download file
    desi-translate translate \"good morning\" -t es       # Detailed translation
    desi-translate video movie.srt -t ta --srt -o out/  # Translate subtitles to SRT
    desi-translate completions bash > desi.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created. When auth.username and auth.password are set, the
    client logs in before calling the translation endpoints.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Backend URL, overriding the configuration
    #[arg(long, global = true)]
    base_url: Option<String>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Colour escape and marker for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌ "),
            Level::Warn => ("\x1B[1;33m", "🚧 "),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍 "),
            Level::Trace => ("\x1B[1;35m", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, marker) = Self::style_for_level(record.level());
            let _ = writeln!(std::io::stderr(), "{}{} {} {}\x1B[0m", colour, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Level is narrowed with log::set_max_level once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "desi-translate", &mut std::io::stdout());
        return Ok(());
    }

    run(cli).await
}

/// Load the configuration and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(base_url) = &cli.base_url {
        config.server.base_url = base_url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    }

    config.validate().context("Invalid configuration")?;
    log::set_max_level(config.log_level.to_level_filter());
    Ok(config)
}

/// Resolve a target language option to the backend key
fn target_language(option: Option<&str>, config: &Config) -> Result<String> {
    let key = match option {
        Some(input) => language_utils::backend_language_key(input)?,
        None => config.target_language_key()?,
    };
    if !language_utils::is_supported_target(&key) {
        warn!("The backend may not support target language '{}'", key);
    }
    Ok(key)
}

/// Open a session when credentials are configured
async fn ensure_session(backend: &dyn TranslationBackend, config: &Config) {
    let Some((username, password)) = config.auth.credentials() else {
        debug!("No credentials configured, calling the backend anonymously");
        return;
    };

    let mut form = LoginForm::new(&config.ui);
    form.username = username.to_string();
    form.password = password.to_string();
    if form.submit(backend).await.is_none() {
        let reason = form.error.map(|m| m.text).unwrap_or_default();
        warn!("Login as {} failed: {}", username, reason);
    }
}

/// Run `task` behind a spinner showing `message`
async fn with_spinner<F: Future>(message: &str, task: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = task.await;
    spinner.finish_and_clear();
    output
}

/// Print a rendered page and save its download when asked to
fn emit(rendering: String, attachment: Option<Attachment>, output: Option<PathBuf>) -> Result<()> {
    println!("{}", rendering.trim_end());

    if let (Some(dir), Some(attachment)) = (output, attachment) {
        let path = FileManager::write_attachment(dir, &attachment)?;
        info!("Saved {:?}", path);
    }
    Ok(())
}

/// Turn a failed result area into a non-zero exit
fn check_result(result: &ResultArea) -> Result<()> {
    match result {
        ResultArea::Failed(text) => Err(anyhow!("{}", text)),
        _ => Ok(()),
    }
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    let config = load_config(&cli)?;
    let client = ApiClient::from_config(&config.server)?;
    debug!("Backend: {}", client.base_url());

    match cli.command {
        Commands::Login { username, password } => {
            let mut form = LoginForm::new(&config.ui);
            form.username = username;
            form.password = password;

            match with_spinner("Logging in...", form.submit(&client)).await {
                Some(redirect) => {
                    println!("Login successful (redirect to {})", redirect.location);
                    Ok(())
                }
                None => Err(anyhow!("{}", form.error.map(|m| m.text).unwrap_or_default())),
            }
        }

        Commands::Register { username, email, password, confirm_password } => {
            let mut form = RegisterForm::new(&config.ui);
            form.username = username;
            form.email = email;
            form.confirm_password = confirm_password.unwrap_or_else(|| password.clone());
            form.password = password;

            match with_spinner("Registering...", form.submit(&client)).await {
                Some(redirect) => {
                    let message = form.success.map(|m| m.text).unwrap_or_default();
                    println!("{} (redirect to {} in {:?})", message, redirect.location, redirect.delay);
                    Ok(())
                }
                None => Err(anyhow!("{}", form.error.map(|m| m.text).unwrap_or_default())),
            }
        }

        Commands::Idiom { idiom, target_language: target, html } => {
            let target = target_language(target.as_deref(), &config)?;
            ensure_session(&client, &config).await;

            let mut page = IdiomPage::new(&config.ui, &target);
            page.input = idiom;
            with_spinner("Translating...", page.translate(&client)).await?;

            let rendering = if html { page.render_html() } else { page.render_text() };
            emit(rendering, None, None)?;
            check_result(&page.result)
        }

        Commands::Slang { text, output } => {
            ensure_session(&client, &config).await;

            let mut page = SlangPage::new(&config.ui);
            page.input = text;
            with_spinner("Normalizing...", page.normalize(&client)).await?;

            let rendering = if output.html { page.render_html() } else { page.render_text() };
            let attachment = page.actions.download.then(|| page.download(now_millis()));
            emit(rendering, attachment, output.target_dir())?;
            check_result(&page.result)
        }

        Commands::Historical { text, output } => {
            ensure_session(&client, &config).await;

            let mut page = HistoricalPage::new(&config.ui);
            page.input = text;
            with_spinner("Translating...", page.translate(&client)).await?;

            let rendering = if output.html { page.render_html() } else { page.render_text() };
            let attachment = page.actions.download.then(|| page.download(now_millis()));
            emit(rendering, attachment, output.target_dir())?;
            check_result(&page.result)
        }

        Commands::Translate { text, source_language, target_language: target, output } => {
            let target = target_language(target.as_deref(), &config)?;
            let source = source_language.unwrap_or_else(|| config.source_language.clone());
            ensure_session(&client, &config).await;

            let mut page = TranslatorPage::new(&config.ui, &source, &target);
            page.input = text;
            with_spinner("Translating...", page.translate(&client)).await?;

            let rendering = if output.html { page.render_html() } else { page.render_text() };
            let attachment = page.actions.download.then(|| page.download(now_millis()));
            emit(rendering, attachment, output.target_dir())?;
            check_result(&page.result)
        }

        Commands::Video { input, target_language: target, srt, output } => {
            let target = target_language(target.as_deref(), &config)?;

            let mut page = VideoPage::new(&config.ui, &config.upload, &target);
            page.load_file(&input).await?;
            ensure_session(&client, &config).await;
            with_spinner("Translating subtitles...", page.translate(&client)).await?;

            let rendering = if output.html { page.render_html() } else { page.render_text() };
            let attachment = match (page.actions.download, srt) {
                (false, _) => None,
                (true, true) => page.download_srt(now_millis()),
                (true, false) => Some(page.download(now_millis())),
            };
            emit(rendering, attachment, output.target_dir())?;
            check_result(&page.result)
        }

        Commands::Completions { .. } => Ok(()),
    }
}

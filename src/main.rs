// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde::Serialize;
use std::io::Write;

use dishfinder::app_config::{self, Config, LlmProvider};
use dishfinder::app_controller::{Controller, DietRequest, EatLocation};
use dishfinder::directory::Coordinates;
use dishfinder::finder::RestaurantFinder;
use dishfinder::recommendation::DietProfile;

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

/// CLI Wrapper for LlmProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLlmProvider {
    Ollama,
    OpenAI,
    Anthropic,
}

impl From<CliLlmProvider> for LlmProvider {
    fn from(cli_provider: CliLlmProvider) -> Self {
        match cli_provider {
            CliLlmProvider::Ollama => LlmProvider::Ollama,
            CliLlmProvider::OpenAI => LlmProvider::OpenAI,
            CliLlmProvider::Anthropic => LlmProvider::Anthropic,
        }
    }
}

/// Options shared by every command
#[derive(Args, Debug)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug)]
struct RestaurantsArgs {
    /// Dish or cuisine to search for
    #[arg(short, long)]
    term: String,

    /// Latitude of the search center
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude of the search center
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,

    /// Search radius in meters, overriding the configured one
    #[arg(short, long)]
    radius: Option<u32>,
}

#[derive(Args, Debug)]
struct RecommendArgs {
    /// Where to eat: outside or home
    #[arg(short, long)]
    eat_location: EatLocation,

    /// Health goal, e.g. "lose weight"
    #[arg(short, long)]
    goal: String,

    /// Dietary preference (repeatable)
    #[arg(short, long = "preference")]
    preferences: Vec<String>,

    /// Allergen to avoid (repeatable)
    #[arg(short, long = "allergy")]
    allergies: Vec<String>,

    /// Available ingredient for home meals (repeatable)
    #[arg(short, long = "ingredient")]
    ingredients: Vec<String>,

    /// Latitude, required when eating outside
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    lat: Option<f64>,

    /// Longitude, required when eating outside
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lng: Option<f64>,

    /// Search radius in meters, overriding the configured one
    #[arg(short, long)]
    radius: Option<u32>,

    /// Language model provider to use
    #[arg(long, value_enum)]
    provider: Option<CliLlmProvider>,

    /// Model name to use for recommendations
    #[arg(short, long)]
    model: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find restaurants for a dish and link them across directories
    Restaurants(RestaurantsArgs),

    /// Recommend dishes and where to eat them, or a meal plan for home
    Recommend(RecommendArgs),

    /// Generate shell completions for dishfinder
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// dishfinder - diet-aware dish and restaurant recommendations
#[derive(Parser, Debug)]
#[command(name = "dishfinder")]
#[command(version)]
#[command(about = "Diet-aware dish recommendations with cross-checked restaurant links")]
#[command(long_about = "dishfinder asks a language model for dishes that fit a diet, then finds nearby
restaurants serving them and links each one across two business directories.

EXAMPLES:
    dishfinder restaurants --term ramen --lat 40.71 --lng -74.0
    dishfinder recommend -e outside -g \"lose weight\" -p vegetarian --lat 40.71 --lng -74.0
    dishfinder recommend -e home -g \"build muscle\" -i chicken -i rice
    dishfinder completions bash > dishfinder.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file does not exist,
    a default one is created automatically. Directory API keys and the language
    model provider are set there.")]
struct CommandLineOptions {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
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

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
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
            let (emoji, color) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything here; the effective level is lowered once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "dishfinder", &mut std::io::stdout());
            Ok(())
        }
        Commands::Restaurants(args) => {
            let config = load_config(&cli.common)?;
            run_restaurants(args, config).await
        }
        Commands::Recommend(args) => {
            let mut config = load_config(&cli.common)?;
            if let Some(provider) = &args.provider {
                config.recommendation.provider = provider.clone().into();
            }
            if let Some(model) = &args.model {
                config.recommendation.active_provider_config_mut().model = model.clone();
            }
            run_recommend(args, config).await
        }
    }
}

/// Load or create the configuration and apply the effective log level
fn load_config(common: &CommonArgs) -> Result<Config> {
    if let Some(cmd_log_level) = &common.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let (mut config, created) = Config::load_or_create(&common.config_path)?;
    if created {
        warn!("Config file not found at '{}', created a default one.", common.config_path);
    }

    match &common.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(level_filter(&config.log_level)),
    }

    Ok(config)
}

async fn run_restaurants(args: RestaurantsArgs, config: Config) -> Result<()> {
    config.validate_search().context("Configuration validation failed")?;

    let finder = RestaurantFinder::from_config(&config);
    let location = Coordinates::new(args.lat, args.lng);
    let results = finder.find_matches(&args.term, location, args.radius).await;
    info!("Found {} restaurant(s) for '{}'", results.len(), args.term);

    print_json(&results)
}

async fn run_recommend(args: RecommendArgs, config: Config) -> Result<()> {
    let controller = Controller::with_config(config)?;
    if controller.test_connection().await.is_err() {
        warn!("Language model is unreachable, continuing with fallback recommendations where possible");
    }

    let location = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
        _ => None,
    };
    let request = DietRequest {
        eat_location: args.eat_location,
        profile: DietProfile {
            preferences: args.preferences,
            goal: args.goal,
            allergies: args.allergies,
            ingredients: args.ingredients,
        },
        location,
        radius_meters: args.radius,
    };

    let response = controller.handle(request).await?;
    print_json(&response)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output to JSON")?;
    println!("{}", json);
    Ok(())
}

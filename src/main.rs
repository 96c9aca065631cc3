use clap::{Arg, Command};
use log::LevelFilter;
use spamsift::analyzer::analyze;
use spamsift::config::Config;
use spamsift::normalization::EmailInput;
use spamsift::{seed, server, store};
use std::process;

#[tokio::main]
async fn main() {
    let matches = Command::new("spamsift")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rule-based spam classification with a CRUD dashboard API")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("spamsift.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Test configuration validity")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("analyze-email")
                .long("analyze-email")
                .value_name("FILE")
                .help("Analyze one email from a YAML file and print the result as JSON")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed the database with sample emails and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        match Config::write_default(generate_path) {
            Ok(()) => println!("Default configuration written to {generate_path}"),
            Err(e) => {
                eprintln!("Error writing configuration: {e}");
                process::exit(1);
            }
        }
        return;
    }

    // Analysis needs no config or database; handle it before loading either.
    if let Some(email_file) = matches.get_one::<String>("analyze-email") {
        analyze_email_file(email_file);
        return;
    }

    let config_path = matches.get_one::<String>("config").unwrap();
    let config = if std::path::Path::new(config_path).exists() {
        match Config::from_file(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading configuration: {e}");
                process::exit(1);
            }
        }
    } else {
        log::info!("No config file at {config_path}, using defaults");
        Config::default()
    };

    if matches.get_flag("test-config") {
        println!("✅ Configuration is valid");
        println!("  bind_address:  {}", config.bind_address);
        println!("  database_path: {}", config.database_path);
        return;
    }

    let pool = match store::init_db(&config.database_url()).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Error opening database: {e}");
            process::exit(1);
        }
    };

    if matches.get_flag("seed") {
        match seed::seed(&pool).await {
            Ok(count) => println!("✅ Seeded {count} sample emails"),
            Err(e) => {
                eprintln!("Error seeding database: {e}");
                process::exit(1);
            }
        }
        return;
    }

    if let Err(e) = server::serve(pool, &config.bind_address).await {
        eprintln!("Server error: {e}");
        process::exit(1);
    }
}

fn analyze_email_file(path: &str) {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            process::exit(1);
        }
    };

    let input: EmailInput = match serde_yaml::from_str(&content) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error parsing {path}: {e}");
            process::exit(1);
        }
    };

    let result = analyze(&input);
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing result: {e}");
            process::exit(1);
        }
    }
}

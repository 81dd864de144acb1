use appetizers::core::ConfigProvider;
use appetizers::utils::{logger, validation::Validate};
use appetizers::{AppError, AppetizerClient, CliConfig, ImageCache, Menu, TomlConfig};
use clap::Parser;
use std::sync::Arc;

fn print_menu(menu: &Menu) {
    for entry in &menu.entries {
        let record = &entry.record;
        let image = match &entry.image {
            Some(image) => {
                let (width, height) = image.dimensions();
                format!("{}x{}", width, height)
            }
            None => "placeholder".to_string(),
        };
        println!(
            "#{:<4} {:<28} ${:>6.2}  {:>4} kcal  {:>3}g protein  {:>3}g carbs  [{}]",
            record.id, record.name, record.price, record.calories, record.protein, record.carbs, image
        );
    }
}

async fn run<C: ConfigProvider + Validate>(config: &C) -> Result<Menu, AppError> {
    config.validate()?;

    // One cache for the whole process, shared by every consumer of the client.
    let cache = Arc::new(ImageCache::new());
    let client = AppetizerClient::from_config(config, cache)?;

    Ok(client.load_menu().await?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(cli.overlay(config)),
            Err(e) => {
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(e.exit_code());
            }
        },
        None => None,
    };

    let (verbose, json) = match &file_config {
        Some(config) => (config.logging.verbose, config.logging.json),
        None => (cli.verbose, cli.log_json),
    };
    if json {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting appetizers client");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &file_config {
        Some(config) => run(config).await,
        None => run(&cli).await,
    };

    match result {
        Ok(menu) => {
            print_menu(&menu);
            println!(
                "✅ {} appetizers, {} shown with a placeholder image",
                menu.len(),
                menu.missing_images()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Loading the menu failed: {}", e);
            if let AppError::Domain(domain) = &e {
                let alert = domain.alert();
                eprintln!("❌ {}", alert.title);
                eprintln!("{}", alert.message);
            } else {
                eprintln!("❌ {}", e.user_friendly_message());
            }
            std::process::exit(e.exit_code());
        }
    }
}

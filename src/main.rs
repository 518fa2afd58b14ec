use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clipscribe::cli::{Cli, Commands, TargetLanguage};
use clipscribe::config::Config;
use clipscribe::pipeline::Pipeline;
use clipscribe::{output, utils};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "clipscribe=debug"
    } else {
        "clipscribe=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Check for required external dependencies (non-fatal)
    let missing_deps = utils::check_dependencies().await;
    if !missing_deps.is_empty() {
        eprintln!("⚠️  Dependency check warnings:");
        for dep in missing_deps {
            eprintln!("   • {}", dep);
        }
        eprintln!("   (Continuing anyway - tools may be available)");
    }

    let config = Config::load().await?;

    match cli.command {
        Commands::Process {
            url,
            translate_to,
            model,
            work_dir,
            json,
        } => {
            let model = model.unwrap_or(config.transcription.default_model);
            let work_dir = match work_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };

            let pipeline = Pipeline::new(config, cli.quiet)?;

            tracing::info!("Starting run for URL: {}", url);

            let outcome = pipeline.run(&url, &work_dir, translate_to, model).await?;

            if json {
                output::print_json(&outcome)?;
            } else {
                output::render(&outcome);
            }
        }
        Commands::Config { show } => {
            if show {
                config.display();
            } else {
                config.interactive_setup().await?;
            }
        }
        Commands::Languages => {
            println!("Supported translation targets:");
            for lang in TargetLanguage::selectable() {
                println!("  • {} ({})", lang.code().unwrap_or("-"), lang.name());
            }
            println!("Pass --translate-to none (the default) to skip translation.");
        }
    }

    Ok(())
}

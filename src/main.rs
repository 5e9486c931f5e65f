mod assets;
mod build;
mod config;
mod error;
mod frontmatter;
mod highlight;
mod models;
mod parser;
mod template;
#[cfg(test)]
mod test_log;
mod theme;
mod walker;
mod watch;

use anyhow::Context as _;
use clap::{Parser as ClapParser, Subcommand};
use console::style;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::{BuildOptions, Config};
use crate::theme::Theme;

#[derive(ClapParser)]
#[command(author, version, about = "mdpress - Markdown in, themed static site out.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log every step, including watch events.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Build static site from Markdown files
    Build {
        /// Directory containing Markdown files
        input_dir: PathBuf,
        /// Directory to output generated HTML files
        output_dir: PathBuf,
        /// Watch for file changes and rebuild automatically
        #[arg(long)]
        watch: bool,
        /// Highlighting theme (see `mdpress themes`)
        #[arg(long)]
        theme: Option<String>,
        /// TOML file with site settings
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the built-in themes
    Themes,
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    // a second init only happens in tests; keep the first logger
    let _ = SimpleLogger::new()
        .with_level(level)
        .without_timestamps()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Themes => {
            for theme in Theme::ALL {
                let tone = if theme.is_dark() { "dark" } else { "light" };
                println!("{:<16}{}", theme.name(), style(tone).dim());
            }
        }
        Commands::Build {
            input_dir,
            output_dir,
            watch,
            theme,
            config,
        } => {
            let mut opts = BuildOptions::new(input_dir, output_dir);
            opts.watch = watch;
            if let Some(path) = &config {
                opts.config = Config::load(path)
                    .with_context(|| format!("could not load {}", path.display()))?;
            }
            if let Some(theme) = theme {
                opts = opts.with_theme(theme);
            }

            println!("mdpress build v{}", env!("CARGO_PKG_VERSION"));
            println!("{} {}", style("Input: ").dim(), opts.input_dir.display());
            println!("{} {}", style("Output:").dim(), opts.output_dir.display());
            println!("{} {}", style("Theme: ").dim(), opts.config.theme);
            if opts.watch {
                println!("{}", style("Watch mode enabled").yellow());
            }

            let report = build::perform_build(&opts).await.context("build failed")?;
            let status = if report.failures.is_empty() {
                style("success").cyan()
            } else {
                style("partial").yellow()
            };
            // warnings were already logged where they were raised
            println!(
                "{status} {} pages written, {} failed, {} warnings. Done in {:.2}s.",
                report.pages_written(),
                report.failures.len(),
                report.warnings.len(),
                start.elapsed().as_secs_f32()
            );

            if opts.watch {
                watch::watch(&opts).await.context("watch mode stopped")?;
            }
        }
    }
    Ok(())
}

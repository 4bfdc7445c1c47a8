use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use log::LevelFilter;
use metattr::config::MetattrConfig;
use metattr::error::Result;
use metattr::store::FsBackend;
use metattr::MetaAttributes;
use std::path::{Path, PathBuf};

mod args;
use args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    backend: FsBackend,
    config: MetattrConfig,
}

impl AppContext {
    fn attributes<'a>(&'a self, path: &Path) -> MetaAttributes<'a, FsBackend> {
        MetaAttributes::new(&self.backend, path).with_config(&self.config)
    }
}

fn init_logging(verbose: bool) {
    let mut clog = colog::default_builder();
    clog.filter(
        None,
        if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        },
    );
    clog.init();
}

fn run(cli: Cli) -> Result<()> {
    let ctx = init_context(cli.config)?;

    match cli.command {
        Commands::Show { files, json } => handle_show(&ctx, &files, json),
        Commands::SetName { file, name } => handle_set_name(&ctx, &file, &name),
        Commands::Clear { files } => handle_clear(&ctx, &files),
        Commands::Copy { source, target } => handle_copy(&ctx, &source, &target),
    }
}

fn init_context(config_dir: Option<PathBuf>) -> Result<AppContext> {
    let config_dir = config_dir.or_else(|| {
        ProjectDirs::from("net", "metattr", "metattr").map(|dirs| dirs.config_dir().to_path_buf())
    });
    let config = match config_dir {
        Some(dir) => MetattrConfig::load(dir)?,
        None => MetattrConfig::default(),
    };

    Ok(AppContext {
        backend: config.backend(),
        config,
    })
}

fn handle_show(ctx: &AppContext, files: &[PathBuf], json: bool) -> Result<()> {
    for (i, file) in files.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let attrs = ctx.attributes(file);
        println!("{}", file.display().to_string().as_str().bold());

        match attrs.original_name()? {
            Some(name) => println!("  {:<10} {}", "name", name),
            None => println!("  {:<10} {}", "name", "(none)".dimmed()),
        }

        if json {
            match attrs.raw_object() {
                Ok(Some(text)) => println!("  {:<10} {}", "metadata", text),
                Ok(None) => println!("  {:<10} {}", "metadata", "(none)".dimmed()),
                Err(e @ metattr::MetaError::Decode(_)) => {
                    println!("  {:<10} {}", "metadata", e.to_string().as_str().red())
                }
                Err(e) => return Err(e),
            }
        } else {
            match attrs.object() {
                Ok(Some(object)) => println!(
                    "  {:<10} {} {}",
                    "metadata",
                    format!("[{:?}]", object.kind()).as_str().cyan(),
                    object
                ),
                Ok(None) => println!("  {:<10} {}", "metadata", "(none)".dimmed()),
                Err(e @ metattr::MetaError::Decode(_)) => {
                    println!("  {:<10} {}", "metadata", e.to_string().as_str().red())
                }
                Err(e) => return Err(e),
            }
        }

        let created = attrs.creation_time();
        if created.timestamp_millis() == 0 {
            println!("  {:<10} {}", "created", "unknown".dimmed());
        } else {
            println!(
                "  {:<10} {}",
                "created",
                created.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
    }
    Ok(())
}

fn handle_set_name(ctx: &AppContext, file: &Path, name: &str) -> Result<()> {
    ctx.attributes(file).set_original_name(Some(name))?;
    if name.is_empty() {
        println!("{} {}", "Cleared name on".green(), file.display());
    } else {
        println!("{} {}", "Set name on".green(), file.display());
    }
    Ok(())
}

fn handle_clear(ctx: &AppContext, files: &[PathBuf]) -> Result<()> {
    for file in files {
        ctx.attributes(file).clear()?;
        println!("{} {}", "Cleared".green(), file.display());
    }
    Ok(())
}

fn handle_copy(ctx: &AppContext, source: &Path, target: &Path) -> Result<()> {
    ctx.attributes(source).copy_to(target)?;
    println!(
        "{} {} -> {}",
        "Copied".green(),
        source.display(),
        target.display()
    );
    Ok(())
}

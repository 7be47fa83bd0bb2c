use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use ircpalette_theme::{
    LoadReport, SemanticSlot, Theme, ThemeConfig, ThemeContext, ThemeStore, ThemeVariant,
    TEXT_COLOR_COUNT,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ircpalette-cli",
    about = "Inspect and manage IRC client color themes",
    author,
    version
)]
struct Cli {
    /// Per-user theme directory (defaults to the platform config directory).
    #[arg(long, global = true, value_name = "PATH")]
    theme_dir: Option<PathBuf>,
    /// System theme directory used by `bootstrap`; may be repeated.
    #[arg(long = "system-dir", global = true, value_name = "PATH")]
    system_dirs: Vec<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List theme files in the theme directory.
    List,
    /// Load a theme and print its contents.
    Show(ShowArgs),
    /// Load a theme and report lines that failed to parse.
    Check(LoadArgs),
    /// Load a theme and print the resulting 42-entry color table.
    Palette(LoadArgs),
    /// Copy system themes into an empty theme directory.
    Bootstrap,
    /// Append the standard text colors to themes that define none.
    Backfill,
    /// Save the current theme to a file.
    Save(SaveArgs),
}

#[derive(Args)]
struct LoadArgs {
    /// Theme file: a path, or a name inside the theme directory.
    #[arg(value_name = "FILE")]
    file: String,
    /// Built-in theme the file is layered over.
    #[arg(long, value_enum, default_value_t = BaseChoice::Dark)]
    base: BaseChoice,
}

#[derive(Args)]
struct ShowArgs {
    #[command(flatten)]
    load: LoadArgs,
    /// Print the theme record as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SaveArgs {
    /// Destination file path.
    #[arg(value_name = "FILE")]
    output: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BaseChoice {
    Light,
    Dark,
}

impl From<BaseChoice> for ThemeVariant {
    fn from(choice: BaseChoice) -> Self {
        match choice {
            BaseChoice::Light => ThemeVariant::Light,
            BaseChoice::Dark => ThemeVariant::Dark,
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let Cli {
        theme_dir,
        system_dirs,
        verbose,
        command,
    } = Cli::parse();
    init_logging(verbose);

    let config = resolve_config(theme_dir, system_dirs)?;
    match command {
        Commands::List => execute_list(&config),
        Commands::Show(args) => execute_show(args, config),
        Commands::Check(args) => execute_check(args, config),
        Commands::Palette(args) => execute_palette(args, config),
        Commands::Bootstrap => execute_bootstrap(&config),
        Commands::Backfill => execute_backfill(&config),
        Commands::Save(args) => execute_save(args, config),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_config(theme_dir: Option<PathBuf>, system_dirs: Vec<PathBuf>) -> Result<ThemeConfig> {
    let discovered = ThemeConfig::discover();
    let mut config = match theme_dir {
        Some(dir) => {
            let system = discovered
                .map(|config| config.system_dirs)
                .unwrap_or_default();
            ThemeConfig::new(resolve_input_path(&dir)?).with_system_dirs(system)
        }
        None => discovered
            .context("could not determine a configuration directory; pass --theme-dir")?,
    };
    if !system_dirs.is_empty() {
        let resolved = system_dirs
            .iter()
            .map(|dir| resolve_input_path(dir))
            .collect::<Result<Vec<_>>>()?;
        config = config.with_system_dirs(resolved);
    }
    Ok(config)
}

fn execute_list(config: &ThemeConfig) -> Result<()> {
    let store = ThemeStore::new(config.clone());
    let mut names = store.list_available();
    if names.is_empty() {
        println!("No themes found in {}", store.theme_dir().display());
        return Ok(());
    }
    names.sort();
    println!("Available themes:");
    for name in names {
        println!("  - {name}");
    }
    Ok(())
}

fn execute_show(args: ShowArgs, config: ThemeConfig) -> Result<()> {
    let (context, _) = load_into_fresh_context(&args.load, config)?;
    let theme = context.current_theme();
    if args.json {
        let json = serde_json::to_string_pretty(theme).context("serialize theme")?;
        println!("{json}");
        return Ok(());
    }
    print_theme(theme);
    Ok(())
}

fn execute_check(args: LoadArgs, config: ThemeConfig) -> Result<()> {
    let (_, report) = load_into_fresh_context(&args, config)?;
    let parse = &report.parse;
    println!(
        "{}: {} applied, {} skipped, {} invalid colors",
        report.path.display(),
        parse.applied,
        parse.skipped,
        parse.invalid_colors
    );
    for failure in &parse.failures {
        println!(
            "  line {}: {} ({})",
            failure.line_number, failure.error, failure.text
        );
    }
    if !parse.is_clean() {
        bail!("{} line(s) failed to parse", parse.failures.len());
    }
    Ok(())
}

fn execute_palette(args: LoadArgs, config: ThemeConfig) -> Result<()> {
    let (context, report) = load_into_fresh_context(&args, config)?;
    for (index, entry) in context.color_table().iter() {
        let marker = if report.sync.corrected_slots.contains(&index) {
            "  (corrected)"
        } else {
            ""
        };
        println!("{index:>2}  {}{marker}", entry.color);
    }
    Ok(())
}

fn execute_bootstrap(config: &ThemeConfig) -> Result<()> {
    let store = ThemeStore::new(config.clone());
    store.ensure_theme_dir()?;
    let report = store.bootstrap_first_run();
    println!(
        "Installed {} theme(s) into {} ({} skipped, {} failed)",
        report.installed.len(),
        store.theme_dir().display(),
        report.skipped,
        report.failed
    );
    for name in &report.installed {
        println!("  - {name}");
    }
    Ok(())
}

fn execute_backfill(config: &ThemeConfig) -> Result<()> {
    let store = ThemeStore::new(config.clone());
    let report = store.backfill_text_colors();
    println!(
        "Updated {} theme(s) ({} already complete, {} failed)",
        report.updated.len(),
        report.untouched,
        report.failed
    );
    for name in &report.updated {
        println!("  - {name}");
    }
    Ok(())
}

fn execute_save(args: SaveArgs, config: ThemeConfig) -> Result<()> {
    let store = ThemeStore::new(config);
    let context = ThemeContext::with_variant(store.config().base_variant);
    let output = resolve_input_path(&args.output)?;
    store
        .save(&context, &output)
        .with_context(|| format!("failed to save theme to {}", output.display()))
}

fn load_into_fresh_context(
    args: &LoadArgs,
    config: ThemeConfig,
) -> Result<(ThemeContext, LoadReport)> {
    let variant = ThemeVariant::from(args.base);
    let store = ThemeStore::new(config.with_base_variant(variant));
    let mut context = ThemeContext::with_variant(variant);
    let file = theme_argument(&args.file)?;
    let report = store
        .load(&mut context, None, &file)
        .with_context(|| format!("failed to load theme {}", args.file))?;
    Ok((context, report))
}

/// Paths that exist relative to the working directory win over names inside
/// the theme directory.
fn theme_argument(file: &str) -> Result<String> {
    let path = Path::new(file);
    if path.is_relative() && path.exists() {
        let absolute = resolve_input_path(path)?;
        return Ok(absolute.to_string_lossy().into_owned());
    }
    Ok(file.to_string())
}

fn print_theme(theme: &Theme) {
    println!("Theme: {}", theme.name);
    println!("Author: {}", theme.author);
    println!("Description: {}", theme.description);
    println!("Version: {}", theme.version);
    println!();
    for slot in SemanticSlot::ALL {
        println!("{:<12} {}", slot.key(), theme.slot(slot));
    }
    println!();
    for index in 0..TEXT_COLOR_COUNT {
        println!("text_color_{index:<2} {}", theme.text_colors[index]);
    }
    println!();
    println!("Fonts: {} / {} / {}", theme.fonts.normal, theme.fonts.bold, theme.fonts.italic);
    println!("Border width: {}, padding: {}", theme.border_width, theme.padding);
}

fn resolve_input_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()
            .context("determine current directory")?
            .join(path))
    }
}

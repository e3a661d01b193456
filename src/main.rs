use clap::{Parser, Subcommand};
use env_logger::Env;
use media_gal::{config, generate, menu, output, rename, scan};
use std::io::{self, Write};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "media-gal")]
#[command(about = "Media gallery builder and sequential renamer")]
#[command(long_about = "\
Media gallery builder and sequential renamer

Each configured section is a directory of photos and videos. The builder
walks every section and writes a self-contained HTML page, an embeddable
snippet and a JSON sidecar. The renamer gives the files in a section
canonical names ordered by modification time.

Project structure:

  project/
  ├── gallery.toml                 # Optional config (sections, colors, output)
  ├── HP/                          # Section directory
  │   ├── interview_day.mp4
  │   └── 2026/Lab_Tour.MOV        # Nested files are found by scan
  └── ART/
      ├── sunrise_study.jpg        # Shown as \"Sunrise Study\"
      └── .drafts/                 # Hidden entries are skipped

Renamed files follow <PREFIX>-<LABEL>-<NNN>.<ext>, e.g. MEDIA-ART-001.jpg.

Run 'media-gal gen-config' to generate a documented gallery.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Project root holding the section directories
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file [default: <root>/gallery.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the media found in every section
    Scan,
    /// Scan and write the page, snippet and JSON sidecar
    Build,
    /// Rename section files to <PREFIX>-<LABEL>-<NNN>.<ext>
    Rename(RenameArgs),
    /// Interactive preview/rename menu
    Menu,
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct RenameArgs {
    /// Only rename this section (repeatable; default: all sections)
    #[arg(long = "section", value_name = "LABEL")]
    sections: Vec<String>,

    /// Show the planned renames without touching any file
    #[arg(long)]
    dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(config::CONFIG_FILE_NAME));
    let load = || config::load_config(&config_path);

    match cli.command {
        Command::Scan => {
            let gallery_config = load()?;
            let manifest = scan::scan(&gallery_config, &cli.root)?;
            output::print_scan_output(&manifest);
        }
        Command::Build => {
            let gallery_config = load()?;
            println!("==> Scanning {}", cli.root.display());
            let manifest = scan::scan(&gallery_config, &cli.root)?;
            output::print_scan_output(&manifest);

            println!("==> Generating gallery");
            let result = generate::generate(&manifest, &gallery_config, &cli.root)?;
            output::print_generate_output(&manifest, &result);
        }
        Command::Rename(args) => {
            let gallery_config = load()?;
            let plans = rename::plan_sections(&gallery_config, &cli.root, &args.sections)?;
            for plan in &plans {
                output::print_rename_plan(plan);
            }
            if args.dry_run {
                return Ok(());
            }
            if !args.yes && !confirm("Proceed with renaming? [y/N]: ")? {
                println!("Cancelled.");
                return Ok(());
            }
            let reports: Vec<_> = plans.iter().map(rename::execute).collect();
            output::print_rename_reports(&reports);
        }
        Command::Menu => {
            let gallery_config = load()?;
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout();
            menu::run_menu(&mut input, &mut out, &gallery_config, &cli.root)?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Route `log` output to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(menu::is_confirmation(&answer))
}

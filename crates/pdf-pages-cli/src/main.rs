use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::info;
use pdf_pages::naming::derived_path;
use pdf_pages::outline::{self, ParsedOutline};
use pdf_pages::pdf;
use pdf_pages::ToolOptions;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdfp", about = "PDF page order and outline tools", version)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reorder pages for booklet printing
    Booklet {
        #[command(subcommand)]
        action: BookletAction,
    },

    /// Read, write or check document outlines
    Outline {
        #[command(subcommand)]
        action: OutlineAction,
    },

    /// Count PDF files and pages
    Stat {
        /// Files or directories to scan (defaults to the current directory)
        paths: Vec<PathBuf>,

        /// List every file
        #[arg(short, long)]
        verbose: bool,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum BookletAction {
    /// Pad to whole sheets and arrange pages in booklet order
    Make {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore reading order from a booklet-ordered PDF
    Split {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum OutlineAction {
    /// Export the outline of a PDF as text
    Get {
        /// Input PDF file
        pdf: PathBuf,

        /// Output text file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the outline of a PDF with one read from text
    Set {
        /// Input PDF file
        pdf: PathBuf,

        /// Outline text file
        outline: PathBuf,

        /// Added to every page number (overrides the configuration)
        #[arg(allow_negative_numbers = true)]
        offset: Option<i64>,

        /// Outline uses indentation instead of '#' markers
        #[arg(long)]
        indented: bool,

        /// Output PDF file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove the outline of a PDF
    Rm {
        /// Input PDF file
        pdf: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report problems in an outline text file
    Check {
        /// Outline text file
        outline: PathBuf,

        /// Outline uses indentation instead of '#' markers
        #[arg(long)]
        indented: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a configuration file with default values
    Init {
        #[arg(default_value = "pdfp.json")]
        path: PathBuf,
    },

    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let options = match &cli.config {
        Some(path) => ToolOptions::load(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => ToolOptions::default(),
    };

    match cli.command {
        Commands::Booklet { action } => match action {
            BookletAction::Make { input, output } => {
                let output = output_or_derived(output, &input, None, &options);
                let doc = pdf::load_pdf(&input).await?;
                let source_pages = doc.get_pages().len();
                let booklet = pdf::make_booklet(doc, &options).await?;
                let pages = booklet.get_pages().len();
                pdf::save_pdf(booklet, &output).await?;
                println!(
                    "Booklet: {} pages ({} blank, {} sheets) → {}",
                    pages,
                    pages - source_pages,
                    pdf_pages::booklet::sheet_count(pages),
                    output.display()
                );
            }
            BookletAction::Split { input, output } => {
                let output = output_or_derived(output, &input, None, &options);
                let doc = pdf::load_pdf(&input).await?;
                let restored = pdf::restore_booklet(doc).await?;
                let pages = restored.get_pages().len();
                pdf::save_pdf(restored, &output).await?;
                println!("Reading order: {} pages → {}", pages, output.display());
            }
        },

        Commands::Outline { action } => match action {
            OutlineAction::Get { pdf: input, output } => {
                let output = output_or_derived(output, &input, Some("txt"), &options);
                let doc = pdf::load_pdf(&input).await?;
                let items = pdf::read_outline(&doc)?;
                if items.is_empty() {
                    println!("{} has no outline", input.display());
                    return Ok(());
                }
                let root = outline::build_tree(items);
                outline::serialize_to_file(&root, &output).await?;
                println!("Outline: {} items → {}", root.len(), output.display());
            }
            OutlineAction::Set {
                pdf: input,
                outline: text,
                offset,
                indented,
                output,
            } => {
                let output = output_or_derived(output, &input, None, &options);
                let parsed = read_outline_text(&text, indented).await?;
                report_warnings(&parsed);

                let offset = offset.unwrap_or(options.outline_page_offset);
                let mut doc = pdf::load_pdf(&input).await?;
                let written = pdf::write_outline(&mut doc, &parsed.root, offset, &options)?;
                pdf::save_pdf(doc, &output).await?;
                println!("Outline: {} items → {}", written, output.display());
            }
            OutlineAction::Rm { pdf: input, output } => {
                let mut doc = pdf::load_pdf(&input).await?;
                if !pdf::remove_outline(&mut doc)? {
                    println!("{} has no outline", input.display());
                    return Ok(());
                }
                let output = output_or_derived(output, &input, None, &options);
                pdf::save_pdf(doc, &output).await?;
                println!("Outline removed → {}", output.display());
            }
            OutlineAction::Check {
                outline: text,
                indented,
            } => {
                let parsed = read_outline_text(&text, indented).await?;
                report_warnings(&parsed);
                println!("{}: {} items", text.display(), parsed.root.len());
                if !parsed.is_clean() {
                    bail!("{} problems in {}", parsed.warnings.len(), text.display());
                }
            }
        },

        Commands::Stat { paths, verbose } => {
            let paths = if paths.is_empty() {
                vec![PathBuf::from(".")]
            } else {
                paths
            };

            let stats = pdf::collect_page_statistics(&paths).await;
            if verbose {
                for file in &stats.files {
                    println!("{:>6}  {}", file.pages, file.path.display());
                }
            }
            for failure in &stats.failures {
                eprintln!("failed: {}: {}", failure.path.display(), failure.reason);
            }
            println!("Files: {}", stats.file_count());
            println!("Pages: {}", stats.page_count());
            if !stats.failures.is_empty() {
                println!("Unreadable: {}", stats.failures.len());
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Init { path } => {
                ToolOptions::default().save(&path).await?;
                println!("Wrote default configuration → {}", path.display());
            }
            ConfigAction::Show => {
                println!("{:#?}", options);
            }
        },
    }

    Ok(())
}

fn output_or_derived(
    output: Option<PathBuf>,
    input: &Path,
    extension: Option<&str>,
    options: &ToolOptions,
) -> PathBuf {
    output.unwrap_or_else(|| derived_path(input, extension, options.timestamp_outputs))
}

async fn read_outline_text(path: &Path, indented: bool) -> Result<ParsedOutline> {
    let parsed = if indented {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        outline::parse_indented_text(&text)
    } else {
        outline::parse_from_file(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?
    };
    info!("Parsed {} outline items from {}", parsed.root.len(), path.display());
    Ok(parsed)
}

fn report_warnings(parsed: &ParsedOutline) {
    for warning in &parsed.warnings {
        eprintln!("warning: {}", warning);
    }
}

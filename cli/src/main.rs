//! docxbook CLI - DOCX to static HTML book tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docxbook::{
    parse_file, split_sections, BuildReport, Catalog, JsonFormat, SectionOutcome, SiteBuilder,
    SiteOptions,
};

#[derive(Parser)]
#[command(name = "docxbook")]
#[command(version)]
#[command(about = "Turn a .docx manuscript into a static HTML book", long_about = None)]
struct Cli {
    /// Input DOCX file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Catalog JSON file (built-in catalog if not specified)
    #[arg(short, long, value_name = "JSON", env = "DOCXBOOK_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the HTML site (index, one page per chapter, source copy)
    Build {
        /// Input DOCX file (defaults to the catalog's source file)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "docs")]
        output: PathBuf,

        /// Catalog JSON file (built-in catalog if not specified)
        #[arg(short, long, value_name = "JSON", env = "DOCXBOOK_CATALOG")]
        catalog: Option<PathBuf>,

        /// Base URL for all links, overriding the catalog
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        /// Don't copy the source document into the output directory
        #[arg(long)]
        no_copy: bool,
    },

    /// List the chapters found in a document
    Sections {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Catalog JSON file
        #[arg(short, long, value_name = "JSON", env = "DOCXBOOK_CATALOG")]
        catalog: Option<PathBuf>,

        /// Print spans as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dump the parsed document (metadata, paragraphs, runs) as JSON
    Dump {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Compact JSON output
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the built-in catalog as JSON
    Catalog {
        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Build {
            input,
            output,
            catalog,
            base_url,
            no_copy,
        }) => cmd_build(
            input.as_deref(),
            &output,
            catalog.as_deref(),
            base_url,
            no_copy,
        ),
        Some(Commands::Sections {
            input,
            catalog,
            json,
        }) => cmd_sections(&input, catalog.as_deref(), json),
        Some(Commands::Dump {
            input,
            output,
            compact,
        }) => cmd_dump(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Catalog { output }) => cmd_catalog(output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: build if input is provided
            if let Some(input) = cli.input {
                let output = cli.output.unwrap_or_else(|| PathBuf::from("docs"));
                cmd_build(Some(&input), &output, cli.catalog.as_deref(), None, false)
            } else {
                println!("{}", "Usage: docxbook <FILE> [OUTPUT]".yellow());
                println!("       docxbook --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_catalog(path: Option<&Path>) -> docxbook::Result<Catalog> {
    match path {
        Some(path) => Catalog::from_file(path),
        None => Ok(Catalog::builtin()),
    }
}

/// Input file, falling back to the catalog's source file name.
fn resolve_input(input: Option<&Path>, catalog: &Catalog) -> PathBuf {
    input
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&catalog.book.source_file))
}

fn cmd_build(
    input: Option<&Path>,
    output: &Path,
    catalog: Option<&Path>,
    base_url: Option<String>,
    no_copy: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(catalog)?;
    let input = resolve_input(input, &catalog);

    let mut options = SiteOptions::new()
        .with_output_dir(output)
        .with_copy_source(!no_copy);
    if let Some(url) = base_url {
        options = options.with_base_url(url);
    }
    let builder = SiteBuilder::new(&catalog, options)?;

    println!("{} {}", "Reading".cyan(), input.display());
    let doc = parse_file(&input)?;
    let sections = builder.split(&doc);

    builder.prepare()?;
    let mut report = BuildReport {
        index: builder.write_index()?,
        ..Default::default()
    };
    println!("{} index.html", "Writing".green());

    let pb = ProgressBar::new(catalog.sections.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    for section in &catalog.sections {
        pb.set_message(format!("{}.html", section.slug));
        match builder.write_section(section, &sections, &doc.paragraphs)? {
            SectionOutcome::Written(page) => {
                pb.println(format!("{} {}.html", "Writing".green(), page.slug));
                report.pages.push(page);
            }
            SectionOutcome::Missing => {
                pb.println(format!(
                    "  {} {} not found in document!",
                    "WARNING:".yellow().bold(),
                    section.slug
                ));
                report.missing.push(section.slug.clone());
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if builder.options().copy_source {
        let dest = builder.copy_source(&input)?;
        println!("{} {}", "Copied .docx to".green(), dest.display());
        report.source_copy = Some(dest);
    }

    let stats = report.total_stats();
    println!("\n{}", "Done!".green().bold());
    println!(
        "  {} {} pages, {} missing",
        "├─".dimmed(),
        report.pages.len(),
        report.missing.len()
    );
    println!(
        "  {} {} headings, {} list items, {} paragraphs",
        "└─".dimmed(),
        stats.heading_count,
        stats.list_item_count,
        stats.paragraph_count
    );

    Ok(())
}

fn cmd_sections(
    input: &Path,
    catalog: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(catalog)?;
    catalog.validate()?;
    let doc = parse_file(input)?;
    let sections = split_sections(&doc, &catalog);

    if json {
        let found: Vec<_> = sections
            .in_document_order()
            .into_iter()
            .map(|(slug, span)| {
                serde_json::json!({ "slug": slug, "start": span.start, "end": span.end })
            })
            .collect();
        let value = serde_json::json!({
            "sections": found,
            "missing": sections.missing(&catalog),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (slug, span) in sections.in_document_order() {
        let title = catalog.get(slug).map(|s| s.title.as_str()).unwrap_or(slug);
        println!(
            "{:>5}..{:<5} {} {}",
            span.start,
            span.end,
            slug.bold(),
            format!("({}, {} paragraphs)", title, span.len()).dimmed()
        );
    }

    let missing = sections.missing(&catalog);
    if !missing.is_empty() {
        println!();
        for slug in missing {
            println!("{} {} not found in document", "WARNING:".yellow().bold(), slug);
        }
    }

    Ok(())
}

fn cmd_dump(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = docxbook::render::to_json(&doc, format)?;
    write_output(output, &json)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Paragraphs".bold(), doc.metadata.paragraph_count);

    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = doc.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref subject) = doc.metadata.subject {
        println!("{}: {}", "Subject".bold(), subject);
    }
    if let Some(ref modified_by) = doc.metadata.last_modified_by {
        println!("{}: {}", "Last modified by".bold(), modified_by);
    }
    if let Some(ref created) = doc.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = doc.metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = doc.plain_text();
    let words = text.split_whitespace().count();
    let blank = doc.paragraphs.iter().filter(|p| p.is_blank()).count();

    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Characters".bold(), text.chars().count());
    println!("{}: {}", "Blank paragraphs".bold(), blank);

    Ok(())
}

fn cmd_catalog(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = Catalog::builtin().to_json()?;
    write_output(output, &json)
}

/// Write to a file, or print to stdout when no path is given.
fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docxbook".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("DOCX to static HTML book tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_input_defaults_to_catalog_source() {
        let catalog = Catalog::builtin();
        assert_eq!(
            resolve_input(None, &catalog),
            PathBuf::from("That_Math_Life_Yo.docx")
        );
        assert_eq!(
            resolve_input(Some(Path::new("other.docx")), &catalog),
            PathBuf::from("other.docx")
        );
    }

    #[test]
    fn test_load_catalog_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, Catalog::builtin().to_json().unwrap()).unwrap();

        let catalog = load_catalog(Some(&path)).unwrap();
        assert_eq!(catalog, Catalog::builtin());
        assert!(load_catalog(Some(&dir.path().join("missing.json"))).is_err());
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        write_output(Some(&path), "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["docxbook", "build", "book.docx", "-o", "site", "--no-copy"])
            .unwrap();
        match cli.command {
            Some(Commands::Build {
                input,
                output,
                no_copy,
                ..
            }) => {
                assert_eq!(input, Some(PathBuf::from("book.docx")));
                assert_eq!(output, PathBuf::from("site"));
                assert!(no_copy);
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_bare_form_accepts_catalog() {
        let cli =
            Cli::try_parse_from(["docxbook", "book.docx", "site", "-c", "mini.json"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.input, Some(PathBuf::from("book.docx")));
        assert_eq!(cli.output, Some(PathBuf::from("site")));
        assert_eq!(cli.catalog, Some(PathBuf::from("mini.json")));
    }
}

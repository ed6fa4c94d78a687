use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use bibgroup_core::style::classify;
use bibgroup_core::{BuiltinStyle, GroupField, StyleRegistry};
use bibgroup_processor::render::BasicEngine;
use bibgroup_processor::{
    render_document, BibliographyOutput, InputHint, Pipeline, Request, StyleSelection,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a grouped bibliography from a CSL-JSON file
    Generate {
        /// Path to the CSL-JSON references file
        #[arg(index = 1)]
        references: PathBuf,

        /// Built-in citation style
        #[arg(short, long, default_value = "apa", value_parser = BuiltinStyle::from_str)]
        style: BuiltinStyle,

        /// Custom CSL style file (overrides --style)
        #[arg(long)]
        csl: Option<PathBuf>,

        /// Field to group the bibliography by
        #[arg(short, long, default_value = "archive_location", value_parser = GroupField::from_str)]
        group_by: GroupField,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Plain)]
        format: Format,

        /// Emit a standalone HTML document (implies --format html)
        #[arg(long)]
        document: bool,
    },
    /// Check whether a CSL style file is independent
    CheckStyle {
        /// Path to the CSL style file
        path: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum Format {
    Plain,
    Html,
    Both,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            references,
            style,
            csl,
            group_by,
            format,
            document,
        } => {
            let payload = match fs::read(&references) {
                Ok(bytes) => bytes,
                Err(e) => {
                    eprintln!("Error reading references: {}", e);
                    std::process::exit(1);
                }
            };
            let hint = hint_for(&references);

            let style = match csl {
                Some(ref path) => match fs::read_to_string(path) {
                    Ok(definition) => StyleSelection::Custom(definition),
                    Err(e) => {
                        eprintln!("Error reading CSL file: {}", e);
                        std::process::exit(1);
                    }
                },
                None => StyleSelection::Builtin(style),
            };

            let request = Request {
                payload,
                hint,
                style,
                group_field: group_by,
            };

            let mut pipeline = Pipeline::new();
            let mut registry = StyleRegistry::new();
            let engine = BasicEngine::new();

            match pipeline.run(request, &mut registry, &engine) {
                Ok(output) => print_output(&output, format, document),
                Err(e) if e.is_unsupported_style() => {
                    eprintln!("CSL style error: {}", e);
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::CheckStyle { path } => {
            let definition = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading file: {}", e);
                    std::process::exit(1);
                }
            };

            let class = classify(&definition);
            if class.is_dependent() {
                eprintln!(
                    "Dependent style: the file references an independent parent \
                     and carries no template of its own."
                );
                std::process::exit(1);
            }
            println!("Independent style.");
        }
    }
}

fn hint_for(path: &Path) -> InputHint {
    match path.extension().and_then(|e| e.to_str()) {
        Some(extension) => InputHint::from_extension(extension),
        None => InputHint::default(),
    }
}

fn print_output(output: &BibliographyOutput, format: Format, document: bool) {
    if document {
        println!("{}", render_document(output));
        return;
    }
    match format {
        Format::Plain => println!("{}", output.text),
        Format::Html => println!("{}", output.html),
        Format::Both => {
            println!("TEXT:\n{}", output.text);
            println!("\nHTML:\n{}", output.html);
        }
    }
}

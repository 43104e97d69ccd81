use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Map column aliases to canonical names in CSV files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rename alias headers of a CSV file to their canonical names
    Canonicalize(CanonicalizeArgs),
    /// Rename canonical headers back to the aliases recorded by `canonicalize`
    Restore(RestoreArgs),
    /// Print the canonical name for each given label
    Resolve(ResolveArgs),
    /// List the aliases defined in an alias file
    List(ListArgs),
    /// Convert an alias file between JSON and grouped YAML
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct CsvIoArgs {
    /// Input CSV file (`-` reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output CSV file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Delimiter to use for output (defaults to input delimiter)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Character encoding for the output file/stdout (defaults to utf-8)
    #[arg(long = "output-encoding")]
    pub output_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct CanonicalizeArgs {
    #[command(flatten)]
    pub io: CsvIoArgs,
    /// Alias file (.json flat map, or .yaml/.yml groups)
    #[arg(short = 'a', long = "aliases")]
    pub aliases: PathBuf,
    /// Skip renames that would overwrite an existing column instead of failing
    #[arg(long = "drop-conflicts")]
    pub drop_conflicts: bool,
    /// Write the applied rename record to this JSON file for a later `restore`
    #[arg(long = "record")]
    pub record: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RestoreArgs {
    #[command(flatten)]
    pub io: CsvIoArgs,
    /// Rename record written by `canonicalize --record`
    #[arg(long = "record")]
    pub record: Option<PathBuf>,
    /// Pass the file through unchanged when no record is available
    #[arg(long = "lenient")]
    pub lenient: bool,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Alias file (.json flat map, or .yaml/.yml groups)
    #[arg(short = 'a', long = "aliases")]
    pub aliases: PathBuf,
    /// Column labels to resolve
    #[arg(required = true)]
    pub labels: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Alias file (.json flat map, or .yaml/.yml groups)
    #[arg(short = 'a', long = "aliases")]
    pub aliases: PathBuf,
    /// Only list aliases of this canonical name
    #[arg(long = "canonical")]
    pub canonical: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Source alias file
    #[arg(short = 'a', long = "aliases")]
    pub aliases: PathBuf,
    /// Destination alias file; format follows the extension
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use nexustools::{
    analyze_meta, canonicalize_json, compile_regex, convert_text, find_matches, format_sql,
    load_config, parse_dictionary, render_diff, sql_is_formatted, text_stats, CaseOperation,
    Dictionary, SqlMode,
};

/// nexustools - deterministic developer-tool engines:
/// SQL formatter, JSON canonicalizer, regex analyzer, text case converter.
#[derive(Parser, Debug)]
#[command(name = "nexustools", version, about)]
struct Cli {
    /// Path to config file (nexustools.toml, or any TOML with a
    /// [tool.nexustools] table).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Format or minify SQL.
    Sql {
        /// Input file, or "-" for stdin (the default).
        input: Option<PathBuf>,

        /// Minify instead of pretty-printing.
        #[arg(long)]
        minify: bool,

        /// Spaces per indent level (2 or 4).
        #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(["2", "4"]))]
        indent_size: Option<String>,

        /// Keep keyword casing as written.
        #[arg(long)]
        no_uppercase_keywords: bool,

        /// Keep list items on one line.
        #[arg(long)]
        no_break_after_comma: bool,

        /// Keep AND/OR inline.
        #[arg(long)]
        no_newline_before_and_or: bool,

        /// Drop comments from the output.
        #[arg(long)]
        strip_comments: bool,

        /// Check formatting without printing the result.
        #[arg(long)]
        check: bool,

        /// Show a diff instead of the formatted output.
        #[arg(long)]
        diff: bool,
    },

    /// Canonicalize a JSON document.
    Json {
        /// Input file, or "-" for stdin (the default).
        input: Option<PathBuf>,

        /// Spaces per level: 0 (compact), 2, or 4.
        #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(["0", "2", "4"]))]
        indent: Option<String>,

        /// Recursively sort object keys.
        #[arg(long)]
        sort_keys: bool,

        /// Escape every non-ASCII character as \uXXXX.
        #[arg(long)]
        escape_unicode: bool,
    },

    /// Inspect a pattern's capture groups and enumerate its matches.
    Regex {
        /// The pattern source.
        pattern: String,

        /// Input file, or "-" for stdin (the default).
        input: Option<PathBuf>,

        /// Flag letters (g i m s u y d); unknown letters are dropped.
        #[arg(long, default_value = "")]
        flags: String,

        /// Cap on the number of enumerated matches.
        #[arg(long)]
        max_matches: Option<usize>,

        /// Only report capture-group metadata; skip matching.
        #[arg(long)]
        meta: bool,
    },

    /// Apply one of the letter-case/text transformations.
    Case {
        /// The transformation to apply.
        #[arg(value_enum)]
        operation: CaseOperation,

        /// Input file, or "-" for stdin (the default).
        input: Option<PathBuf>,

        /// File with dictionary entries (newline/comma/semicolon separated)
        /// whose canonical casing overrides word/sentence/title case.
        #[arg(long)]
        dictionary: Option<PathBuf>,
    },

    /// Parse dictionary text and print the canonical entries.
    Dict {
        /// Input file, or "-" for stdin (the default).
        input: Option<PathBuf>,
    },

    /// Count characters, words and lines.
    Stats {
        /// Input file, or "-" for stdin (the default).
        input: Option<PathBuf>,
    },
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            std::fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))
        }
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Sql {
            input,
            minify,
            indent_size,
            no_uppercase_keywords,
            no_break_after_comma,
            no_newline_before_and_or,
            strip_comments,
            check,
            diff,
        } => {
            let mut options = config.sql;
            if minify {
                options.mode = SqlMode::Minify;
            }
            if let Some(size) = indent_size {
                options.indent_size = size.parse().context("invalid indent size")?;
            }
            if no_uppercase_keywords {
                options.uppercase_keywords = false;
            }
            if no_break_after_comma {
                options.break_after_comma = false;
            }
            if no_newline_before_and_or {
                options.newline_before_and_or = false;
            }
            if strip_comments {
                options.strip_comments = true;
            }

            let source = read_input(input.as_deref())?;

            if check {
                return Ok(if sql_is_formatted(&source, &options) {
                    0
                } else {
                    eprintln!("would reformat");
                    1
                });
            }

            let Some(formatted) = format_sql(&source, &options) else {
                return Ok(0);
            };
            if diff {
                print!("{}", render_diff(source.trim(), &formatted));
            } else {
                println!("{formatted}");
            }
            Ok(0)
        }

        Command::Json {
            input,
            indent,
            sort_keys,
            escape_unicode,
        } => {
            let mut options = config.json;
            if let Some(indent) = indent {
                options.indent = indent.parse().context("invalid indent")?;
            }
            if sort_keys {
                options.sort_keys = true;
            }
            if escape_unicode {
                options.escape_unicode = true;
            }

            let source = read_input(input.as_deref())?;
            if let Some(json) = canonicalize_json(&source, &options)? {
                println!("{json}");
            }
            Ok(0)
        }

        Command::Regex {
            pattern,
            input,
            flags,
            max_matches,
            meta,
        } => {
            let info = analyze_meta(&pattern);
            println!("capturing groups: {}", info.capturing_groups);
            if !info.named_groups.is_empty() {
                println!("named groups: {}", info.named_groups.join(", "));
            }
            if meta {
                return Ok(0);
            }

            let compiled = compile_regex(&pattern, &flags)?;
            let source = read_input(input.as_deref())?;
            let cap = max_matches.unwrap_or(config.regex.max_matches);
            let records = find_matches(&compiled, &source, cap);

            println!("matches: {}", records.len());
            for record in &records {
                println!("{}: {}", record.index, record.matched_text);
                for group in &record.groups {
                    println!("  {}: {}", group.index, group.text);
                }
                // Report names in pattern order, not map order.
                for name in &info.named_groups {
                    if let Some(text) = record.named_groups.get(name) {
                        println!("  {name}: {text}");
                    }
                }
            }
            Ok(0)
        }

        Command::Case {
            operation,
            input,
            dictionary,
        } => {
            let dict = match dictionary {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    Dictionary::parse(&text)
                }
                None => Dictionary::new(),
            };
            let source = read_input(input.as_deref())?;
            println!("{}", convert_text(&source, operation, &dict));
            Ok(0)
        }

        Command::Dict { input } => {
            let source = read_input(input.as_deref())?;
            for entry in parse_dictionary(&source) {
                println!("{entry}");
            }
            Ok(0)
        }

        Command::Stats { input } => {
            let source = read_input(input.as_deref())?;
            let stats = text_stats(&source);
            println!("chars: {}", stats.chars);
            println!("chars (no whitespace): {}", stats.chars_no_whitespace);
            println!("words: {}", stats.words);
            println!("lines: {}", stats.lines);
            Ok(0)
        }
    }
}

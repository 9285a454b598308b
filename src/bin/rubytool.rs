use std::fs;
use std::path::Path;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use kanbun_engine::annotate::{self, Override, OverrideBook, PhoneticOptions, StaleReason};
use kanbun_engine::dict::{self, DictKind, ReadingDict};
use kanbun_engine::{render, settings, trace_init};

/// Unwrap a Result or print the error and exit.
macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Parser)]
#[command(name = "rubytool", about = "Ruby annotation and phonetic conversion diagnostics")]
struct Cli {
    /// Write JSON trace events to this directory (requires the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Readings,
    Glosses,
}

impl From<Kind> for DictKind {
    fn from(k: Kind) -> Self {
        match k {
            Kind::Readings => DictKind::Readings,
            Kind::Glosses => DictKind::Glosses,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Reading line over base line
    Lines,
    Html,
    Aozora,
    Json,
}

#[derive(clap::Args)]
struct Source {
    /// Dictionary file: compiled .kbdx or a TOML source (default: embedded)
    #[arg(long)]
    dict: Option<String>,
    /// Embedded dictionary to use when --dict is not given
    #[arg(long, value_enum, default_value = "readings")]
    kind: Kind,
    /// Override book (JSON, keyed by content id)
    #[arg(long, requires = "id")]
    overrides: Option<String>,
    /// Content id to take overrides for
    #[arg(long, requires = "overrides")]
    id: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Annotate text with readings
    Annotate {
        text: String,
        #[command(flatten)]
        source: Source,
        #[arg(long, value_enum, default_value = "lines")]
        format: Format,
    },

    /// Convert text to a flat reading string for narration
    Phonetic {
        text: String,
        #[command(flatten)]
        source: Source,
        /// Settings TOML (default: embedded)
        #[arg(long)]
        settings: Option<String>,
    },

    /// Show the dictionary candidates behind each span
    Explain {
        text: String,
        #[command(flatten)]
        source: Source,
    },

    /// Report overrides that can never apply and kanji left without a reading
    Lint {
        text: String,
        #[command(flatten)]
        source: Source,
        #[arg(long)]
        json: bool,
    },

    /// Compile a TOML dictionary source to the binary format
    Compile {
        input_file: String,
        output_file: String,
    },

    /// Print dictionary statistics
    Info { dict_file: String },
}

enum DictHandle {
    Loaded(ReadingDict),
    Embedded(&'static ReadingDict),
}

impl DictHandle {
    fn get(&self) -> &ReadingDict {
        match self {
            DictHandle::Loaded(d) => d,
            DictHandle::Embedded(d) => d,
        }
    }
}

fn open_dict(path: &str) -> ReadingDict {
    if path.ends_with(".toml") {
        let toml = die!(fs::read_to_string(path), "Failed to read {path}: {}");
        die!(ReadingDict::from_toml(&toml), "Failed to parse {path}: {}")
    } else {
        die!(
            ReadingDict::open(Path::new(path)),
            "Failed to open dictionary at {path}: {}"
        )
    }
}

fn open_resources(source: &Source) -> (DictHandle, Vec<Override>) {
    let dict = match &source.dict {
        Some(path) => DictHandle::Loaded(open_dict(path)),
        None => DictHandle::Embedded(dict::global(source.kind.into())),
    };

    let overrides = match (&source.overrides, &source.id) {
        (Some(path), Some(id)) => {
            let book = die!(
                OverrideBook::open(Path::new(path)),
                "Failed to open override book at {path}: {}"
            );
            if !book.ids().any(|known| known == id) {
                eprintln!("Warning: no overrides for content id '{id}'");
            }
            book.get(id).to_vec()
        }
        _ => Vec::new(),
    };

    (dict, overrides)
}

fn main() {
    let cli = Cli::parse();
    // Held to the end of main so buffered trace events reach the file.
    let trace = cli
        .trace_dir
        .as_deref()
        .map(|dir| trace_init::init_tracing(Path::new(dir)));

    match cli.command {
        Command::Annotate {
            text,
            source,
            format,
        } => {
            let (dict, overrides) = open_resources(&source);
            let spans = annotate::annotate(&text, &overrides, dict.get());
            match format {
                Format::Lines => {
                    let (top, bottom) = render::aligned_lines(&spans);
                    println!("{top}");
                    println!("{bottom}");
                }
                Format::Html => println!("{}", render::ruby_html(&spans)),
                Format::Aozora => println!("{}", render::aozora(&spans)),
                Format::Json => println!(
                    "{}",
                    die!(serde_json::to_string_pretty(&spans), "JSON error: {}")
                ),
            }
        }

        Command::Phonetic {
            text,
            source,
            settings: settings_file,
        } => {
            if let Some(path) = settings_file {
                let toml = die!(fs::read_to_string(&path), "Failed to read {path}: {}");
                die!(settings::init_custom(toml), "Invalid settings in {path}: {}");
            }
            let (dict, overrides) = open_resources(&source);
            let options = PhoneticOptions::from(&settings::settings().phonetic);
            println!(
                "{}",
                annotate::to_phonetic(&text, &overrides, dict.get(), &options)
            );
        }

        Command::Explain { text, source } => {
            let (dict, overrides) = open_resources(&source);
            for step in annotate::explain(&text, &overrides, dict.get()) {
                let span = step.span;
                let source = format!("{:?}", span.source);
                println!(
                    "[{:>3}+{}] {source:<11} {} → {:?}",
                    span.start, span.len, span.text, span.reading
                );
                for c in &step.candidates {
                    let key: String = text.chars().skip(span.start).take(c.chars).collect();
                    println!("        {key} = {}", c.reading);
                }
            }
        }

        Command::Lint { text, source, json } => {
            let (dict, overrides) = open_resources(&source);
            let stale = annotate::lint(&text, &overrides, dict.get());
            let spans = annotate::annotate(&text, &overrides, dict.get());
            let report = annotate::coverage(&spans);

            if json {
                let value = serde_json::json!({
                    "stale_overrides": stale,
                    "coverage": report,
                });
                println!(
                    "{}",
                    die!(serde_json::to_string_pretty(&value), "JSON error: {}")
                );
            } else {
                for s in &stale {
                    let o = s.entry;
                    let why = match &s.reason {
                        StaleReason::EmptyText => "empty text".to_string(),
                        StaleReason::OutOfRange { text_chars } => {
                            format!("past end of text ({text_chars} chars)")
                        }
                        StaleReason::Mismatch { found } => format!("text is '{found}'"),
                        StaleReason::Shadowed => "never reached".to_string(),
                    };
                    println!(
                        "override #{} @{} '{}' → {}: {why}",
                        s.index, o.position, o.text, o.reading
                    );
                }
                println!(
                    "coverage: {}/{} chars ({:.1}%)",
                    report.annotated_chars,
                    report.total_chars,
                    report.ratio() * 100.0
                );
                if !report.unannotated_kanji.is_empty() {
                    let missing: String = report.unannotated_kanji.iter().collect();
                    println!("no reading: {missing}");
                }
            }
            if !stale.is_empty() {
                drop(trace);
                process::exit(2);
            }
        }

        Command::Compile {
            input_file,
            output_file,
        } => {
            let toml = die!(
                fs::read_to_string(&input_file),
                "Failed to read {input_file}: {}"
            );
            let entries = die!(
                dict::parse_dict_toml(&toml),
                "Error parsing dictionary: {}"
            );
            eprintln!("Building trie from {} entries...", entries.len());
            let dict = ReadingDict::from_entries(entries);
            die!(
                dict.save(Path::new(&output_file)),
                "Error writing dictionary: {}"
            );
            eprintln!("Wrote {output_file}");
        }

        Command::Info { dict_file } => {
            let dict = open_dict(&dict_file);
            let (entries, multi) = dict.stats();
            println!("entries:         {entries}");
            println!("multi-char keys: {multi}");
            println!("longest key:     {} chars", dict.max_key_chars());
            if let Some((key, reading)) = dict.iter().next() {
                println!("first entry:     {key} = {reading}");
            };
        }
    }
}

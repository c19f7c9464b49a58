use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use colored::Colorize;
use goblin::embed::{embed_directory, EmbedOptions};
use goblin::io::{read_file, read_piped_stdin, OutputSink};
use goblin::remove::{remove_paths, RemoveOptions};
use goblin::sub::{substitute, Pattern, SubstitutionList};
use goblin::{clock, usage};
use std::env;
use std::path::PathBuf;

const LOG_ENV: &str = "GOBLIN_LOG";

const ECHO_LONG_ABOUT: &str = "\
Why do we need an echo command when every OS has one already? Cross-platformness
is the answer, along with quoting and newline differences on Windows.

Piped stdin takes precedence over the message arguments.";

const RM_LONG_ABOUT: &str =
    "rm removes each specified file. By default, it does not remove directories.";

const SUB_LONG_ABOUT: &str = r#"sub is a small utility that uses regex and regex groups to substitute
text inside either a piped in string or a file with arbitrarily numbered inputs.
The results are printed via stdout.

Groups are named with numbers. This allows specifying exact replacement strings
within the CLI args by placing the strings at the correct CLI arg index:

	> goblin echo Hello World | goblin sub -e "Hello (?P<1>(?s).*)" "Foo"
	Hello Foo

	> goblin echo Hello World | goblin sub -e "(?P<2>Hello) (?P<1>World)" "Foo" "Bar"
	Bar Foo

Group 0 refers to stdin/piped data:

	> goblin echo Hello World | goblin sub -e "Hello(?P<0>\s)World"
	HelloHello WorldWorld

File data can also be loaded as a haystack by using the --input flag. If this
flag is used then stdin is not operated on as a haystack, but is still
available as group 0:

	> goblin echo deez nutz | goblin sub -i README.md -e "(?P<0>is pretty cool)" -o README.md

Only the first match is substituted."#;

#[derive(Parser)]
#[command(name = "goblin")]
#[command(about = "A small utility to assist with Makefiles, CI or just scripting", long_about = None)]
#[command(version)]
struct Cli {
    /// Log to stderr: -v for debug, -vv for trace (GOBLIN_LOG overrides)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints a message, without a newline and without quotes
    #[command(long_about = ECHO_LONG_ABOUT)]
    Echo {
        /// File to write to instead of stdout
        #[arg(short = 'f', long = "tofile")]
        tofile: Option<PathBuf>,

        /// Message words, joined with single spaces
        message: Vec<String>,
    },

    /// Remove files or directories
    #[command(long_about = RM_LONG_ABOUT)]
    Rm {
        /// Remove directories and their contents recursively
        #[arg(short, long)]
        recursive: bool,

        /// Ignore nonexistent files and arguments, never prompt
        #[arg(short, long)]
        force: bool,

        /// Files or directories to remove
        paths: Vec<PathBuf>,
    },

    /// Regex replace in strings or files
    #[command(long_about = SUB_LONG_ABOUT)]
    Sub {
        /// Regex expression to use as a needle
        #[arg(short, long)]
        expression: String,

        /// Use file contents as haystack instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file to write the results to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replacement values for groups 1, 2, ...
        substitutes: Vec<String>,
    },

    /// Prints the current date and time to stdout
    Time {
        /// Outputs the date and time as a Unix timestamp
        #[arg(short, long)]
        unix: bool,

        /// strftime(3) format, see https://man7.org/linux/man-pages/man3/strftime.3.html
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Generates a C/C++ source and header that contains embedded resource data
    Restocsource {
        /// Directory that contains files to be converted
        #[arg(short = 's', long = "sourcedir")]
        source_dir: PathBuf,

        /// Destination source file; the header is written next to it as .h
        #[arg(short, long)]
        destination: PathBuf,

        /// Namespace of declarations
        #[arg(short, long)]
        namespace: String,

        /// The string type used in your codebase
        #[arg(short = 't', long = "stringtype", default_value = "std::string")]
        string_type: String,
    },

    /// Generates a total list of all commands, usages and descriptions
    Genusage {
        /// Generate each command usage inside a markdown code block
        #[arg(long)]
        md: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Echo { tofile, message } => cmd_echo(tofile, message),
        Commands::Rm {
            recursive,
            force,
            paths,
        } => cmd_rm(RemoveOptions { recursive, force }, paths),
        Commands::Sub {
            expression,
            input,
            output,
            substitutes,
        } => cmd_sub(&expression, input, output, substitutes),
        Commands::Time { unix, format } => cmd_time(unix, format),
        Commands::Restocsource {
            source_dir,
            destination,
            namespace,
            string_type,
        } => cmd_restocsource(EmbedOptions {
            source_dir,
            destination,
            namespace,
            string_type,
        }),
        Commands::Genusage { md } => cmd_genusage(md),
    }
}

/// Route tracing output to stderr; stdout carries tool output only.
fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = match env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::try_new(&directives).unwrap_or_else(|e| {
            eprintln!(
                "{}",
                format!("Warning: {LOG_ENV} is set but invalid ({e}), using {default_level}")
                    .yellow()
            );
            EnvFilter::new(default_level)
        }),
        Err(_) => EnvFilter::new(default_level),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Empty paths mean "not set", as in `-o ""`.
fn non_empty(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty())
}

fn cmd_echo(tofile: Option<PathBuf>, message: Vec<String>) -> Result<()> {
    let content = match read_piped_stdin()? {
        Some(piped) => piped,
        None => message.join(" ").into_bytes(),
    };

    let sink = non_empty(tofile).map_or(OutputSink::Stdout, OutputSink::Truncate);
    sink.write_all(&content)?;
    Ok(())
}

fn cmd_rm(options: RemoveOptions, paths: Vec<PathBuf>) -> Result<()> {
    let skipped = remove_paths(&paths, options)?;
    if skipped > 0 {
        tracing::debug!(skipped, "some paths could not be removed");
    }
    Ok(())
}

fn cmd_sub(
    expression: &str,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    substitutes: Vec<String>,
) -> Result<()> {
    // Slot 0 is whatever was piped in, even when --input supplies the haystack.
    let piped = read_piped_stdin()?.unwrap_or_default();
    let haystack = match non_empty(input) {
        Some(path) => read_file(&path)?,
        None => piped.clone(),
    };

    let pattern = Pattern::new(expression)
        .with_context(|| format!("failed to compile expression {expression:?}"))?;
    let substitutions = SubstitutionList::with_explicit(piped, substitutes);

    let output_bytes = substitute(&haystack, &pattern, &substitutions)?;

    let sink = non_empty(output).map_or(OutputSink::Stdout, OutputSink::Replace);
    sink.write_all(&output_bytes)?;
    Ok(())
}

fn cmd_time(unix: bool, format: Option<String>) -> Result<()> {
    if let Some(format) = format {
        println!("{}", clock::format_now(&format)?);
        return Ok(());
    }

    if unix {
        println!("{}", clock::unix_now());
        return Ok(());
    }

    // Neither switch given: show the subcommand's help
    let mut root = Cli::command();
    root.build();
    if let Some(time) = root.find_subcommand_mut("time") {
        time.print_help()?;
    }
    Ok(())
}

fn cmd_restocsource(options: EmbedOptions) -> Result<()> {
    let report = embed_directory(&options).with_context(|| {
        format!(
            "failed to embed resources from {}",
            options.source_dir.display()
        )
    })?;

    tracing::info!(
        resources = report.resources,
        source = %report.source_path.display(),
        header = %report.header_path.display(),
        "wrote embedded resources"
    );
    Ok(())
}

fn cmd_genusage(md: bool) -> Result<()> {
    print!("{}", usage::render_usage(&Cli::command(), md));
    Ok(())
}

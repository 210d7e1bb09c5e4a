mod batch;
mod error;
mod logger;
mod path_args;

use clap::{AppSettings, ArgEnum, Args, Parser, Subcommand};
use const_format::{formatcp, str_index};
use error::CliResult;
use git_version::git_version;
use modus::{
    ast::{print_module, RuleKind},
    checker::Config,
    parser,
};
use path_args::get_modules_from_paths;
use std::{
    fs::File,
    io::{self, BufRead, IsTerminal},
    path::Path,
};

// `git describe --all` also finds release tags like `modus-0.1.0`, so these are excluded
const GIT_BRANCH_NAME: &str = git_version!(
    args = ["--all", "--exclude", "modus-*"],
    fallback = "heads/none",
);
const GIT_COMMIT_HASH: &str = git_version!(fallback = "unknown");
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const VERSION_STRING: &str = formatcp!(
    "{} [git {} {}]",
    APP_VERSION,
    // Strips the "heads/" prefix
    str_index!(GIT_BRANCH_NAME, 6..),
    GIT_COMMIT_HASH,
);

#[derive(Parser)]
#[clap(
    name = "modus",
    version = VERSION_STRING,
    setting = AppSettings::DeriveDisplayOrder
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Sets the maximum logging level.
    #[clap(arg_enum, global = true, long = "log", default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Disables output coloring.
    #[clap(global = true, long)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Parses a module file and prints it back.
    Parse(ParseCommandOptions),

    /// Checks every proof in a module file.
    Check(CheckCommandOptions),

    /// Checks a series of module files in parallel.
    CheckAll(CheckAllCommandOptions),
}

#[derive(Args)]
struct Input {
    /// The module file. If this is "-", the module is read from stdin.
    module_file: String,
}

#[derive(Args, Clone)]
struct CheckingOptions {
    /// Enables strict checking. In strict mode, the replacement variable of a `rename` step must
    /// not already occur in the referenced formula.
    #[clap(short, long)]
    strict: bool,

    /// Rejects every proof line that uses the given rule. May be passed more than once.
    #[clap(arg_enum, long = "disallow")]
    disallowed_rules: Vec<RuleArg>,

    /// Allows the `universal` and `existential` rules to reference lines that were not proved.
    #[clap(long)]
    allow_unproved_premises: bool,
}

impl From<CheckingOptions> for Config {
    fn from(options: CheckingOptions) -> Self {
        options.disallowed_rules.into_iter().fold(
            Config::new()
                .strict(options.strict)
                .require_proved_quantifier_premise(!options.allow_unproved_premises),
            |config, rule| config.disallow_rule(rule.into()),
        )
    }
}

#[derive(Args)]
struct ParseCommandOptions {
    #[clap(flatten)]
    input: Input,
}

#[derive(Args)]
struct CheckCommandOptions {
    #[clap(flatten)]
    input: Input,

    #[clap(flatten)]
    checking: CheckingOptions,
}

#[derive(Args)]
struct CheckAllCommandOptions {
    #[clap(flatten)]
    checking: CheckingOptions,

    /// Number of files to check simultaneously.
    #[clap(short = 'j', long, default_value_t = 1)]
    num_jobs: usize,

    /// Stops checking the remaining files once one of them is found to be invalid.
    #[clap(long)]
    fail_fast: bool,

    /// The module files to check. If a directory is passed, every `.modus` file in it is checked,
    /// recursively.
    #[clap(required = true)]
    files: Vec<String>,
}

#[derive(ArgEnum, Clone)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
        }
    }
}

#[derive(ArgEnum, Clone, Copy)]
enum RuleArg {
    Add,
    Rename,
    Mp,
    SubstFree,
    SubstPred,
    SubstFunc,
    Universal,
    Existential,
    Cp,
}

impl From<RuleArg> for RuleKind {
    fn from(r: RuleArg) -> Self {
        match r {
            RuleArg::Add => Self::Add,
            RuleArg::Rename => Self::Rename,
            RuleArg::Mp => Self::ModusPonens,
            RuleArg::SubstFree => Self::SubstFree,
            RuleArg::SubstPred => Self::SubstPred,
            RuleArg::SubstFunc => Self::SubstFunc,
            RuleArg::Universal => Self::Universal,
            RuleArg::Existential => Self::Existential,
            RuleArg::Cp => Self::ConditionalProof,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let colors_enabled = !cli.no_color && std::io::stderr().is_terminal();
    logger::init(cli.log_level.into(), colors_enabled);

    let result = match cli.command {
        Command::Parse(options) => parse_command(options),
        Command::Check(options) => {
            match check_command(options) {
                Ok(true) => println!("valid"),
                Ok(false) => {
                    println!("invalid");
                    std::process::exit(1);
                }
                Err(e) => {
                    log::error!("{}", e);
                    println!("invalid");
                    std::process::exit(1);
                }
            }
            return;
        }
        Command::CheckAll(options) => check_all_command(options),
    };
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Opens the module file, and returns it along with the address used for it in error locations.
fn get_input(options: &Input) -> CliResult<(Box<dyn BufRead>, String)> {
    if options.module_file == "-" {
        return Ok((Box::new(io::stdin().lock()), "stdin".to_owned()));
    }
    let path = Path::new(&options.module_file);
    let address = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_owned();
    Ok((Box::new(io::BufReader::new(File::open(path)?)), address))
}

fn parse_command(options: ParseCommandOptions) -> CliResult<()> {
    let (input, address) = get_input(&options.input)?;
    let module = parser::parse_module(input, &address)?;
    print_module(&module)?;
    Ok(())
}

fn check_command(options: CheckCommandOptions) -> CliResult<bool> {
    let (input, address) = get_input(&options.input)?;
    let report = modus::check(input, &address, &options.checking.into())?;
    for e in &report.errors {
        log::error!("{}", e);
    }
    Ok(report.is_valid())
}

fn check_all_command(options: CheckAllCommandOptions) -> CliResult<()> {
    let files = get_modules_from_paths(options.files.iter().map(String::as_str))?;
    if files.is_empty() {
        log::warn!("no module files found");
        return Ok(());
    }
    log::info!(
        "checking {} files on {} threads",
        files.len(),
        options.num_jobs
    );

    let results = batch::run_batch(
        &files,
        options.num_jobs,
        &options.checking.into(),
        options.fail_fast,
    )?;
    println!(
        "{} valid, {} invalid, {} failed, {} interrupted",
        results.valid, results.invalid, results.failed, results.interrupted
    );
    if results.is_valid() {
        println!("valid");
    } else {
        println!("invalid");
        std::process::exit(1);
    }
    Ok(())
}

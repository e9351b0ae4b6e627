use clap::Parser;
use std::path::{Path, PathBuf};
use xpp_compiler::config::RuntimeConfig;
use xpp_compiler::{file_processor, logging, pipeline, CompileOptions, Dialect, Stage};

/// Scanner, LL(1) parser and scoped semantic checks for X++ programs
///
/// The lex stage prints token kinds through END_OF_FILE; the parse and check
/// stages print a success message. Any lexical, syntax or semantic error is
/// reported with its line and exits with status 1.
#[derive(Parser, Debug, PartialEq)]
#[command(version, about, after_help = environment_help())]
struct Cli {
    /// Source file to compile
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// How far to run: lex, parse or check [default: check]
    #[arg(long, value_name = "STAGE")]
    stage: Option<Stage>,

    /// Token set: xpp or minic (minic supports only lex) [default: xpp]
    #[arg(long, value_name = "DIALECT")]
    dialect: Option<Dialect>,

    /// Print the output as JSON (the token array for lex)
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Load preferences from a TOML file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Command-line flags win over the configuration
    fn apply(&self, mut options: CompileOptions) -> CompileOptions {
        if let Some(stage) = self.stage {
            options.stage = stage;
        }
        if let Some(dialect) = self.dialect {
            options.dialect = dialect;
        }
        options.emit_json |= self.json;
        options
    }
}

fn environment_help() -> String {
    format!(
        "Maximum source size: {} bytes\n\
         Environment: XPP_STAGE, XPP_DIALECT, XPP_EMIT_JSON, XPP_LOG_LEVEL,\n\
         XPP_STRUCTURED_LOGGING, XPP_CONSOLE_LOGGING, XPP_COLLECT_METRICS",
        file_processor::get_max_file_size()
    )
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(error) if !error.use_stderr() => error.exit(),
        Err(error) => {
            let _ = error.print();
            std::process::exit(1);
        }
    };

    let config = match &cli.config {
        Some(path) => match RuntimeConfig::load(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("Error: {}", error);
                std::process::exit(1);
            }
        },
        None => RuntimeConfig::default(),
    };

    // Logging is best effort; compilation proceeds without it
    let _ = logging::config::init_runtime_preferences(config.logging.clone());
    if let Err(message) = logging::init_global_logging() {
        eprintln!("Warning: {}", message);
    }

    let options = cli.apply(CompileOptions::from_config(&config));
    if let Err(error) = compile(&cli.input, &options) {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}

fn compile(input: &Path, options: &CompileOptions) -> Result<(), pipeline::PipelineError> {
    let result = pipeline::process_file(input, options)?;

    if options.emit_json {
        match result.output.to_json() {
            Ok(json) => println!("{}", json),
            Err(error) => {
                logging::safe_log_error(
                    logging::codes::system::INTERNAL_ERROR,
                    &format!("Failed to serialize output: {}", error),
                );
                println!("{}", result.output.render());
            }
        }
    } else {
        println!("{}", result.output.render());
    }
    Ok(())
}

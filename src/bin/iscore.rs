//! iscore CLI - Command-line interface for interview scoring
//!
//! Commands:
//! - score: Score an interview JSON document
//! - validate: Check an interview against the scoring input contract
//! - sample: Print a reference interview document

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use interview_score::encoder::{render_text, ReportEncoder};
use interview_score::validate::error_count;
use interview_score::{
    parse_input, validate_input, InterviewInput, ScoreCalculator, ScoreError, SCORE_VERSION,
};

/// iscore - Scoring engine for technical-interview telemetry
#[derive(Parser)]
#[command(name = "iscore")]
#[command(version = SCORE_VERSION)]
#[command(about = "Turn interview telemetry into competency scores", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an interview JSON document
    Score {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        format: OutputFormat,

        /// Include unrounded per-question scores (JSON formats only)
        #[arg(long)]
        per_question: bool,
    },

    /// Check an interview against the scoring input contract
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the two-question reference interview
    Sample,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON payload
    Json,
    /// Pretty-printed JSON payload
    JsonPretty,
    /// Labeled plain text
    Text,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn run(cli: Cli) -> Result<(), IscoreCliError> {
    match cli.command {
        Commands::Score {
            input,
            output,
            format,
            per_question,
        } => cmd_score(&input, &output, format, per_question),
        Commands::Validate { input, json } => cmd_validate(&input, json),
        Commands::Sample => cmd_sample(),
    }
}

fn cmd_score(
    input: &Path,
    output: &Path,
    format: OutputFormat,
    per_question: bool,
) -> Result<(), IscoreCliError> {
    let interview = read_interview(input)?;
    info!(questions = interview.questions.len(), "loaded interview");

    let calculator = ScoreCalculator::new();
    let scores = calculator.calculate_detailed(&interview.questions, &interview.config)?;
    let report = calculator.report(&scores);

    let encoder = ReportEncoder::new();
    let rendered = match format {
        OutputFormat::Text => render_text(&report),
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let mut value = serde_json::to_value(encoder.encode(&report, scores.questions.len()))?;
            if per_question {
                value["questions"] = serde_json::to_value(&scores.questions)?;
            }
            if matches!(format, OutputFormat::Json) {
                serde_json::to_string(&value)? + "\n"
            } else {
                serde_json::to_string_pretty(&value)? + "\n"
            }
        }
    };

    if output.to_string_lossy() == "-" {
        print!("{}", rendered);
    } else {
        fs::write(output, rendered)?;
        debug!(path = %output.display(), "wrote report");
    }

    Ok(())
}

fn cmd_validate(input: &Path, json: bool) -> Result<(), IscoreCliError> {
    let interview = read_interview(input)?;
    let issues = validate_input(&interview);
    let errors = error_count(&issues);

    if json {
        println!("{}", serde_json::to_string_pretty(&issues)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Questions: {}", interview.questions.len());
        println!("Errors:    {}", errors);
        println!("Warnings:  {}", issues.len() - errors);

        if !issues.is_empty() {
            println!("\nFindings:");
            for issue in &issues {
                let location = issue
                    .question
                    .map(|q| format!("question {}", q))
                    .unwrap_or_else(|| "interview".to_string());
                println!(
                    "  - [{:?}] {} {}: {}",
                    issue.severity, location, issue.field, issue.message
                );
            }
        }
    }

    if errors > 0 {
        Err(IscoreCliError::ValidationFailed(errors))
    } else {
        Ok(())
    }
}

fn cmd_sample() -> Result<(), IscoreCliError> {
    let sample: InterviewInput = serde_json::from_str(SAMPLE_INTERVIEW)?;
    println!("{}", serde_json::to_string_pretty(&sample)?);
    Ok(())
}

fn read_interview(input: &Path) -> Result<InterviewInput, IscoreCliError> {
    let data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            return Err(IscoreCliError::InteractiveStdin);
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    Ok(parse_input(&data)?)
}

/// One medium and one hard question, scored against a standard hint allowance
const SAMPLE_INTERVIEW: &str = r#"{
    "questions": [
        {
            "T_think": 120, "T_total": 600, "T_stuck": 45,
            "E_covered": 3, "E_total": 4,
            "C_initial": 2.0, "C_final": 1.0, "C_target": 1.0,
            "S_lint": 0.85, "K_useful": 400, "K_total": 550,
            "S_sentiment": 0.8,
            "H_types": [1],
            "Q_difficulty": 2
        },
        {
            "T_think": 300, "T_total": 1200, "T_stuck": 150,
            "E_covered": 4, "E_total": 6,
            "C_initial": 2.5, "C_final": 1.5, "C_target": 1.5,
            "S_lint": 0.70, "K_useful": 800, "K_total": 1100,
            "S_sentiment": 0.7,
            "H_types": [1, 2],
            "Q_difficulty": 3
        }
    ],
    "config": {
        "weights": { "ps": 0.4, "code": 0.3, "resilience": 0.1, "autonomy": 0.2 },
        "hint_budget": 1.0
    }
}"#;

// Error types

#[derive(Debug)]
enum IscoreCliError {
    Io(io::Error),
    Score(ScoreError),
    Json(serde_json::Error),
    InteractiveStdin,
    ValidationFailed(usize),
}

impl From<io::Error> for IscoreCliError {
    fn from(e: io::Error) -> Self {
        IscoreCliError::Io(e)
    }
}

impl From<ScoreError> for IscoreCliError {
    fn from(e: ScoreError) -> Self {
        IscoreCliError::Score(e)
    }
}

impl From<serde_json::Error> for IscoreCliError {
    fn from(e: serde_json::Error) -> Self {
        IscoreCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<IscoreCliError> for CliError {
    fn from(e: IscoreCliError) -> Self {
        match e {
            IscoreCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            IscoreCliError::Score(e @ ScoreError::ParseError(_)) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'iscore sample' to see the expected input shape".to_string()),
            },
            IscoreCliError::Score(e) => CliError {
                code: "SCORE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'iscore validate' for details".to_string()),
            },
            IscoreCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            IscoreCliError::InteractiveStdin => CliError {
                code: "NO_INPUT".to_string(),
                message: "stdin is a terminal, expected piped interview JSON".to_string(),
                hint: Some("Pipe a document in or pass --input <file>".to_string()),
            },
            IscoreCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} contract violations found", count),
                hint: Some("Fix the reported errors and retry".to_string()),
            },
        }
    }
}

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chartquiz_core::evaluate::{format_percentage_answer, validate_percentage_input};
use chartquiz_core::model::{Dataset, Question, QuestionKind, QuizSettings};
use log::info;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use services::export::{export_file_name, quiz_set_json, write_results_csv};
use services::{Clock, QuizRunner, QuizSession, QuizSetBuilder};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    EmptyUser,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::EmptyUser => write!(f, "--user cannot be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play     [--user <name>] [--seed <n>] [--settings <file>] [--export-dir <dir>]");
    eprintln!("  cargo run -p app -- generate [--seed <n>] [--settings <file>]");
    eprintln!();
    eprintln!("Defaults for play:");
    eprintln!("  --user anonymous, random seed, standard 20-question quiz, no export");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CHARTQUIZ_USER, CHARTQUIZ_SETTINGS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Generate,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "generate" => Some(Self::Generate),
            _ => None,
        }
    }
}

struct Args {
    user: String,
    seed: Option<u64>,
    settings_path: Option<PathBuf>,
    export_dir: Option<PathBuf>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut user = std::env::var("CHARTQUIZ_USER").unwrap_or_default();
        let mut settings_path = std::env::var("CHARTQUIZ_SETTINGS").ok().map(PathBuf::from);
        let mut seed = None;
        let mut export_dir = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--user" => {
                    let value = require_value(args, "--user")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::EmptyUser);
                    }
                    user = value;
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--settings" => {
                    settings_path = Some(PathBuf::from(require_value(args, "--settings")?));
                }
                "--export-dir" => {
                    export_dir = Some(PathBuf::from(require_value(args, "--export-dir")?));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            user,
            seed,
            settings_path,
            export_dir,
        })
    }

    fn rng(&self) -> Box<dyn RngCore> {
        match self.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(rand::rng()),
        }
    }

    fn settings(&self) -> Result<QuizSettings, Box<dyn std::error::Error>> {
        let Some(path) = &self.settings_path else {
            return Ok(QuizSettings::default_standard());
        };
        let raw = std::fs::read_to_string(path)?;
        let settings: QuizSettings = serde_json::from_str(&raw)?;
        info!("loaded quiz settings from {}", path.display());
        Ok(settings)
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let settings = parsed.settings()?;
    let mut rng = parsed.rng();

    match cmd {
        Command::Generate => {
            let quiz = QuizSetBuilder::new(&settings).build(rng.as_mut())?;
            println!("{}", quiz_set_json(&quiz)?);
            Ok(())
        }
        Command::Play => {
            let runner = QuizRunner::new(Clock::system()).with_settings(settings);
            let mut session = runner.start_quiz(&parsed.user, rng.as_mut())?;
            play(&runner, &mut session)?;
            print_summary(&session);
            if let Some(dir) = &parsed.export_dir {
                let date = runner.clock().now().date_naive();
                let path = dir.join(export_file_name(session.user_name(), date));
                let file = std::fs::File::create(&path)?;
                write_results_csv(session.results(), file)?;
                info!("results written to {}", path.display());
                println!("Results saved to {}", path.display());
            }
            Ok(())
        }
    }
}

fn play(runner: &QuizRunner, session: &mut QuizSession) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let total = session.quiz().len();
    let set_id = session.quiz().id();

    while let Some(question) = session.current_question().cloned() {
        let number = session.current_number().unwrap_or(total);
        println!();
        println!("Question {number} / {total}  (set {set_id})");
        println!("Read the {} chart:", question.chart());
        print!("{}", render_chart(question.dataset()));
        println!("{}", question.prompt());

        let answer = read_answer(&question, &mut lines)?;
        let answered = runner.answer_current(session, &answer)?;
        if answered.result.is_correct {
            println!("Correct! The actual value was {}.", answered.result.correct_answer);
        } else {
            println!("Incorrect. The answer is {}.", answered.result.correct_answer);
        }
        runner.present_current(session);
    }
    Ok(())
}

fn read_answer(
    question: &Question,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<String, Box<dyn std::error::Error>> {
    if question.kind() == QuestionKind::Rank {
        for (index, option) in question.options().iter().enumerate() {
            println!("  {}) {option}", index + 1);
        }
    }

    loop {
        match question.kind() {
            QuestionKind::Percentage => print!("Percentage (e.g. 25): "),
            QuestionKind::Rank => print!("Choice: "),
        }
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        };
        let line = line?;

        match question.kind() {
            QuestionKind::Percentage => match validate_percentage_input(&line) {
                Ok(value) => return Ok(format_percentage_answer(value)),
                Err(err) => println!("{err}"),
            },
            QuestionKind::Rank => {
                let choice = line.trim();
                if let Some(option) = pick_option(question.options(), choice) {
                    return Ok(option);
                }
                println!("choose one of the listed options");
            }
        }
    }
}

// Accepts either the option text or its 1-based position.
fn pick_option(options: &[String], choice: &str) -> Option<String> {
    if let Some(option) = options.iter().find(|o| o.as_str() == choice) {
        return Some(option.clone());
    }
    let index: usize = choice.parse().ok()?;
    options.get(index.checked_sub(1)?).cloned()
}

fn render_chart(dataset: &Dataset) -> String {
    let mut out = String::new();
    for category in dataset.categories() {
        let width = usize::try_from(category.value / 2).unwrap_or(0);
        out.push_str(&format!("  {:<2} {}\n", category.name, "#".repeat(width)));
    }
    out
}

fn print_summary(session: &QuizSession) {
    let summary = session.summary();
    println!();
    println!("Score: {} / {}", summary.correct, summary.total);
    println!("Accuracy: {:.1}%", summary.accuracy_percent);
    #[allow(clippy::cast_precision_loss)]
    let seconds = summary.total_time.num_milliseconds() as f64 / 1000.0;
    println!("Total time: {seconds:.1}s");
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

mod config;
mod registry;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use config::{CheckConfig, CheckSettings, ConfigError, load_config};
use dogcheck_core::{Architecture, DogNames, Error as CoreError};
use dogcheck_eval::{
    EvalError, EvaluateOptions, EvaluationEngine, MetricsReport, PredictionTable,
    collect_pet_labels, format_elapsed, render_comparison,
};
use registry::{RunContext, RunPaths, init_run_logging, start_run, write_text};
use schemars::schema_for;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "dogcheck",
    version,
    about = "Check image classifier labels against pet image file names"
)]
struct Cli {
    /// TOML file with default settings (defaults to ./dogcheck.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one model architecture.
    Check(CheckArgs),
    /// Evaluate every model architecture on the same images.
    Compare(InputArgs),
    /// Print the JSON Schema of metrics.json.
    Schema,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Directory of pet images (default: pet_images/).
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Text file with one dog name per line (default: dognames.txt).
    #[arg(long)]
    dogfile: Option<PathBuf>,
    /// Recorded classifier output as CSV with image,model,labels columns
    /// (default: predictions.csv).
    #[arg(long)]
    predictions: Option<PathBuf>,
    /// Output directory for runs (default: runs).
    #[arg(long)]
    run_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    inputs: InputArgs,
    /// CNN model architecture: vgg, alexnet or resnet (default: vgg).
    #[arg(long)]
    arch: Option<Architecture>,
    /// List images whose dog / not-dog classification was wrong.
    #[arg(long)]
    print_incorrect_dogs: bool,
    /// List images whose breed label was wrong.
    #[arg(long)]
    print_incorrect_breed: bool,
}

impl InputArgs {
    fn into_config(self) -> CheckConfig {
        CheckConfig {
            dir: self.dir,
            dogfile: self.dogfile,
            predictions: self.predictions,
            run_dir: self.run_dir,
            ..CheckConfig::default()
        }
    }
}

impl CheckArgs {
    fn into_config(self) -> CheckConfig {
        CheckConfig {
            arch: self.arch,
            print_incorrect_dogs: self.print_incorrect_dogs.then_some(true),
            print_incorrect_breed: self.print_incorrect_breed.then_some(true),
            ..self.inputs.into_config()
        }
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => {
            let settings = resolve_settings(args.into_config(), cli.config)?;
            run_check(settings)
        }
        Command::Compare(args) => {
            let settings = resolve_settings(args.into_config(), cli.config)?;
            run_compare(settings)
        }
        Command::Schema => {
            let schema = schema_for!(MetricsReport);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

fn resolve_settings(
    flags: CheckConfig,
    config_path: Option<PathBuf>,
) -> Result<CheckSettings, CliError> {
    let file = load_config(config_path.as_deref())?;
    Ok(CheckSettings::from(flags.or(file)))
}

struct Inputs {
    dog_names: DogNames,
    labels: dogcheck_eval::PetLabels,
    classifier: PredictionTable,
}

fn begin_run(
    command: &'static str,
    settings: CheckSettings,
) -> Result<(String, RunPaths), CliError> {
    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        command,
        settings,
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        command = command,
        run_root = %run_paths.root.display(),
        config = %run_paths.config_path.display()
    );
    Ok((run_id, run_paths))
}

// Dog names are loaded first so an unreadable reference file stops the run
// before any image is classified.
fn load_inputs(settings: &CheckSettings) -> Result<Inputs, CliError> {
    let dog_names = DogNames::load(&settings.dogfile)?;
    tracing::info!(event = "dog_names_loaded", count = dog_names.len());

    let labels = collect_pet_labels(&settings.dir)?;
    tracing::info!(event = "pet_labels_collected", count = labels.len());

    let classifier = PredictionTable::load(&settings.predictions)?;
    tracing::info!(event = "predictions_loaded", count = classifier.len());

    Ok(Inputs {
        dog_names,
        labels,
        classifier,
    })
}

fn run_check(settings: CheckSettings) -> Result<(), CliError> {
    let timer = Instant::now();
    let (run_id, run_paths) = begin_run("check", settings.clone())?;
    let inputs = load_inputs(&settings)?;

    let options = EvaluateOptions {
        print_incorrect_dogs: settings.print_incorrect_dogs,
        print_incorrect_breed: settings.print_incorrect_breed,
        run_id: Some(run_id.clone()),
        out_dir: Some(run_paths.root.clone()),
    };
    let result = EvaluationEngine::new(options).run(
        &inputs.labels,
        &inputs.classifier,
        settings.arch,
        &inputs.dog_names,
    )?;

    println!("{}", result.report);
    finish_run(&run_id, &run_paths, timer);
    Ok(())
}

fn run_compare(settings: CheckSettings) -> Result<(), CliError> {
    let timer = Instant::now();
    let (run_id, run_paths) = begin_run("compare", settings.clone())?;
    let inputs = load_inputs(&settings)?;

    let mut runs = Vec::with_capacity(Architecture::ALL.len());
    for arch in Architecture::ALL {
        let options = EvaluateOptions {
            run_id: Some(run_id.clone()),
            out_dir: Some(run_paths.root.join(arch.as_str())),
            ..EvaluateOptions::default()
        };
        let result = EvaluationEngine::new(options).run(
            &inputs.labels,
            &inputs.classifier,
            arch,
            &inputs.dog_names,
        )?;
        runs.push(result.metrics);
    }

    let comparison = render_comparison(&runs);
    write_text(&run_paths.root.join("comparison.md"), &comparison)?;

    println!("{comparison}");
    finish_run(&run_id, &run_paths, timer);
    Ok(())
}

fn finish_run(run_id: &str, run_paths: &RunPaths, timer: Instant) {
    let duration_ms = u64::try_from(timer.elapsed().as_millis()).unwrap_or(u64::MAX);
    tracing::info!(
        event = "run_finished",
        status = "success",
        run_id = %run_id,
        duration_ms = duration_ms
    );
    println!();
    println!("run_dir={}", run_paths.root.display());
    println!("** Total Elapsed Runtime: {}", format_elapsed(duration_ms));
}

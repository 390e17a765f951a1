use std::env;
use std::path::PathBuf;

use dogcheck_core::{Architecture, DogNames};
use dogcheck_eval::{EvaluateOptions, EvaluationEngine, PredictionTable, collect_pet_labels};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let mut dir: Option<PathBuf> = None;
    let mut dogfile: Option<PathBuf> = None;
    let mut predictions: Option<PathBuf> = None;
    let mut arch = Architecture::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dir" => dir = args.next().map(PathBuf::from),
            "--dogfile" => dogfile = args.next().map(PathBuf::from),
            "--predictions" => predictions = args.next().map(PathBuf::from),
            "--arch" => arch = args.next().ok_or("missing --arch value")?.parse()?,
            _ => return Err(format!("unexpected argument: {arg}").into()),
        }
    }

    let dir = dir.ok_or("missing --dir path")?;
    let dogfile = dogfile.ok_or("missing --dogfile path")?;
    let predictions = predictions.ok_or("missing --predictions path")?;

    let dog_names = DogNames::load(&dogfile)?;
    let labels = collect_pet_labels(&dir)?;
    let classifier = PredictionTable::load(&predictions)?;

    let options = EvaluateOptions {
        print_incorrect_dogs: true,
        print_incorrect_breed: true,
        ..EvaluateOptions::default()
    };
    let result = EvaluationEngine::new(options).run(&labels, &classifier, arch, &dog_names)?;
    println!("{}", result.report);
    Ok(())
}

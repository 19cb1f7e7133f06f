use std::env;
use std::fs;
use std::process;

use songmap::{AdaptOptions, FlatInput, SongMapError};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: songmap [--config <options.yaml>] <analysis.json> [output.json]
       songmap --lint <analysis.json>";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("Error [{}]: {}", e.code().as_str(), e);
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), SongMapError> {
    let mut lint_only = false;
    let mut config_path: Option<&String> = None;
    let mut positional: Vec<&String> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--lint" => lint_only = true,
            "--config" => match iter.next() {
                Some(path) => config_path = Some(path),
                None => usage_exit(),
            },
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => positional.push(arg),
        }
    }

    let (input_path, output_path) = match positional.as_slice() {
        [input] => (*input, None),
        [input, output] if !lint_only => (*input, Some(*output)),
        _ => usage_exit(),
    };

    let input = FlatInput::from_json(&read(input_path)?)?;

    if lint_only {
        let diagnostics = songmap::lint(&input);
        println!("{}", to_json(&diagnostics)?);
        eprintln!("{} warning(s) in {}", diagnostics.len(), input_path);
        return Ok(());
    }

    let options = match config_path {
        Some(path) => AdaptOptions::from_yaml(&read(path)?)?,
        None => AdaptOptions::default(),
    };

    let hierarchy = songmap::adapt(&input, &options)?;
    let json = to_json(&hierarchy)?;

    match output_path {
        Some(path) => {
            fs::write(path, &json).map_err(|e| SongMapError::Io {
                path: path.clone(),
                message: e.to_string(),
            })?;
            let stats = songmap::chord_mapping_stats(&hierarchy);
            eprintln!(
                "Wrote song map to {} ({} sections, {} syllables, {:.1}% with chords)",
                path,
                hierarchy.sections.len(),
                stats.total_syllables,
                stats.coverage_percentage
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn read(path: &str) -> Result<String, SongMapError> {
    fs::read_to_string(path).map_err(|e| SongMapError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, SongMapError> {
    serde_json::to_string_pretty(value).map_err(|e| SongMapError::Json(e.to_string()))
}

fn usage_exit() -> ! {
    eprintln!("{}", USAGE);
    process::exit(1);
}

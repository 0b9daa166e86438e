use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use smokelink_core::{DecoderConfig, analyze_hex_file};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.hex");
        if !input.exists() {
            continue;
        }
        let output = path.join("expected_report.json");
        regenerate_one(&input, &output)?;
    }

    Ok(())
}

fn regenerate_one(input: &Path, output: &Path) -> Result<(), String> {
    let mut report = analyze_hex_file(input, &DecoderConfig::default())
        .map_err(|err| format!("analysis failed for {}: {}", input.display(), err))?;
    // Input size differs across checkouts (line endings); golden tests ignore it.
    if let Some(info) = report.input.as_mut() {
        info.bytes = 0;
    }
    let mut json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    json.push('\n');
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}

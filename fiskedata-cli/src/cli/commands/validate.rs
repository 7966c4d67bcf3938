//! Validate command handler

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

use crate::cli::ValidateArgs;
use fiskedata::{
    Config, Feedback, FeedbackCode, FeedbackKind, FeedbackSink, UploadCandidate,
    UploadValidationPipeline, file_exists_in,
};

/// Validate every file and return how many failed
pub fn handle_validate_command(
    args: ValidateArgs,
    config: &Config,
    feedback: &dyn FeedbackSink,
) -> Result<usize> {
    let pipeline = UploadValidationPipeline::new(config, feedback);
    let mut seen: Vec<UploadCandidate> = Vec::new();
    let mut failed = 0;

    for path in &args.files {
        let candidate = candidate_for(path)?;

        if file_exists_in(&candidate, &seen) {
            log::warn!("Skipping duplicate upload: {}", candidate.name);
            feedback.emit(
                Feedback::new(FeedbackKind::Warning, FeedbackCode::DuplicateFile)
                    .with_message(format!("{} is already in the list", candidate.name)),
            );
            continue;
        }

        // Rejections are reported by the pipeline; the file is never read
        let format = match pipeline.precheck(&candidate) {
            Ok(format) => format,
            Err(_) => {
                failed += 1;
                seen.push(candidate);
                continue;
            }
        };

        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

        match pipeline.check_content(&candidate, format, &bytes) {
            Ok(()) => {
                feedback.emit(
                    Feedback::new(FeedbackKind::Success, FeedbackCode::UploadAccepted)
                        .with_message(format!("{} is valid", candidate.name)),
                );
            }
            Err(err) => {
                failed += 1;
                feedback.emit(
                    Feedback::error(FeedbackCode::InvalidWorkbook)
                        .with_message(format!("{}: {}", candidate.name, err)),
                );
            }
        }

        seen.push(candidate);
    }

    let total = seen.len();
    if failed == 0 {
        println!("{} {} file(s) valid", "✓".bright_green().bold(), total);
    } else {
        println!("{} {} of {} file(s) invalid", "✗".bright_red().bold(), failed, total);
    }

    Ok(failed)
}

fn candidate_for(path: &Path) -> Result<UploadCandidate> {
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow::anyhow!("Not a file: {}", path.display()))?;

    let size = fs::metadata(path)
        .with_context(|| format!("Failed to stat file: {}", path.display()))?
        .len();

    Ok(UploadCandidate::new(name, size))
}

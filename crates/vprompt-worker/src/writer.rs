//! Result persistence.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use vprompt_models::PromptRecord;

use crate::error::PipelineResult;

/// File name for a prompt record. `attempt > 0` adds a `_N` disambiguator.
pub fn prompt_record_file_name(stem: &str, generated_at: NaiveDateTime, attempt: u32) -> String {
    let base = format!(
        "{}_simple_prompts_{}",
        stem,
        generated_at.format("%Y%m%d_%H%M%S")
    );
    if attempt == 0 {
        format!("{}.json", base)
    } else {
        format!("{}_{}.json", base, attempt)
    }
}

/// Write `record` as pretty JSON into `dir`, creating it if needed.
///
/// Never overwrites: a run in the same second as an earlier one gets the
/// next free `_N` suffix.
pub async fn write_prompt_record(
    dir: &Path,
    stem: &str,
    generated_at: NaiveDateTime,
    record: &PromptRecord,
) -> PipelineResult<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let json = serde_json::to_vec_pretty(record)?;

    let mut attempt = 0;
    loop {
        let path = dir.join(prompt_record_file_name(stem, generated_at, attempt));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(mut file) => {
                file.write_all(&json).await?;
                file.flush().await?;
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

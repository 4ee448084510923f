//! Extract command - recover a hidden file from an image.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use stegim::config::Config;
use stegim::{extract_payload, CoverImage};

use super::{require_file, CommandExecutor};

/// Extract a file hidden with `stegim hide`.
///
/// Fails with exit code 4 if the image has no hidden content and
/// 5 if the hidden content is damaged.
#[derive(Args, Debug)]
pub struct ExtractCommand {
    /// Image carrying hidden content (.bmp or .png)
    pub image: PathBuf,

    /// Where to write the recovered file
    pub output: PathBuf,
}

impl CommandExecutor for ExtractCommand {
    fn execute(&self, _config: &Config) -> Result<()> {
        require_file(&self.image, "image")?;

        let cover = CoverImage::from_file(&self.image)
            .with_context(|| format!("Failed to load image {}", self.image.display()))?;

        let payload = extract_payload(&cover)
            .with_context(|| format!("Cannot extract from {}", self.image.display()))?;
        println!("Content extracted successfully!");

        fs::write(&self.output, &payload)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;
        println!(
            "Data written successfully in {} ({} bytes)!",
            self.output.display(),
            payload.len()
        );

        Ok(())
    }
}

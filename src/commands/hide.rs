//! Hide command - embed a file into a cover image.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use stegim::config::{backup_path, Config};
use stegim::{hide_payload, CoverImage, ImageKind};

use super::{require_file, CommandExecutor};

/// Hide a file in the blue channel of a BMP or PNG image.
///
/// The image is overwritten in place unless --output is given.
/// Nothing is written if the image is too small for the payload.
#[derive(Args, Debug)]
pub struct HideCommand {
    /// Cover image (.bmp or .png, 24-bit RGB)
    pub image: PathBuf,

    /// File to hide
    pub payload: PathBuf,

    /// Write the result here instead of overwriting the cover (.bmp or .png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CommandExecutor for HideCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        require_file(&self.image, "image")?;
        require_file(&self.payload, "payload")?;

        // Validate the destination before doing any work.
        let destination = self.output.as_ref().unwrap_or(&self.image);
        ImageKind::from_path(destination)?;

        let mut cover = CoverImage::from_file(&self.image)
            .with_context(|| format!("Failed to load image {}", self.image.display()))?;

        let payload = fs::read(&self.payload)
            .with_context(|| format!("Failed to read payload {}", self.payload.display()))?;

        println!("Hiding data ...");
        let codes = hide_payload(&payload, &mut cover)
            .with_context(|| format!("Cannot hide {} in {}", self.payload.display(), self.image.display()))?;

        if self.output.is_none() && config.hide.backup {
            let backup = backup_path(&self.image);
            fs::copy(&self.image, &backup)
                .with_context(|| format!("Failed to back up image to {}", backup.display()))?;
            info!(backup = %backup.display(), "original image backed up");
        }

        cover
            .save(destination)
            .with_context(|| format!("Failed to write image {}", destination.display()))?;

        info!(codes, image = %destination.display(), "hide finished");
        println!("Data hidden successfully in {}!", destination.display());
        Ok(())
    }
}

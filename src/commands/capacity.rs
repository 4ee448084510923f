//! Capacity command - show how much an image can carry.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use stegim::config::Config;
use stegim::stego::{has_watermark, max_codes};
use stegim::{CoverImage, PixelGrid};

use super::{require_file, CommandExecutor};

/// Show the hiding capacity of an image.
///
/// Capacity is counted in 12-bit codes; each code carries one or more
/// payload bytes depending on how well the payload compresses.
#[derive(Args, Debug)]
pub struct CapacityCommand {
    /// Image to inspect (.bmp or .png)
    pub image: PathBuf,
}

impl CommandExecutor for CapacityCommand {
    fn execute(&self, _config: &Config) -> Result<()> {
        require_file(&self.image, "image")?;

        let cover = CoverImage::from_file(&self.image)
            .with_context(|| format!("Failed to load image {}", self.image.display()))?;

        println!("Image Capacity Analysis");
        println!("=======================");
        println!("  Format: {:?}", cover.kind());
        println!("  Dimensions: {} x {}", cover.width(), cover.height());
        println!("  Usable bits: {}", cover.slots());
        println!("  Maximum codes: {}", max_codes(&cover));
        println!(
            "  Hidden content: {}",
            if has_watermark(&cover) { "yes" } else { "no" }
        );

        Ok(())
    }
}

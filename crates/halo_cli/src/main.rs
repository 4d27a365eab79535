//! Halo command line renderer.
//!
//! Loads (or builds) a scene, renders it and saves the result as a PNG.

mod cli;

use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use halo_core::SceneDescription;
use halo_renderer::{render, CancelToken, ImageBuffer, Scene};

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let config = args.render_config();
    config.validate().context("Invalid render settings")?;

    let mut desc = match &args.scene {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, using the built-in bubble scene");
            SceneDescription::demo()
        }
    };
    // The image decides the aspect ratio, otherwise pixels would stretch
    desc.camera.aspect_ratio = config.aspect_ratio();

    let scene = Scene::build(&desc).context("Invalid scene")?;

    let cancel = CancelToken::new();
    if let Some(seconds) = args.time_limit {
        let limit = Duration::try_from_secs_f64(seconds)
            .with_context(|| format!("Invalid time limit {seconds}"))?;
        let token = cancel.clone();
        thread::spawn(move || {
            thread::sleep(limit);
            log::warn!("Time limit of {:?} reached, stopping render", limit);
            token.cancel();
        });
    }

    let output = render(&scene.camera, &scene.world, &config, &cancel)?;
    if output.cancelled {
        log::warn!(
            "Saving partial image ({}/{} rows)",
            output.rows_completed,
            output.image.height
        );
    }

    save_png(&output.image, &args.output)?;
    log::info!(
        "Saved {} in {:.2}s",
        args.output.display(),
        output.elapsed.as_secs_f64()
    );

    Ok(())
}

fn save_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    image::save_buffer(
        path,
        image.as_bytes(),
        image.width,
        image.height,
        image::ColorType::Rgba8,
    )
    .with_context(|| format!("Failed to write {}", path.display()))
}

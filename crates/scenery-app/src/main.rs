//! Scenery - scene editor for spatial video
//!
//! Entry point: configuration, logging, the async runtime and either the
//! editor window or a headless export.
//!
//! ```text
//! scenery [scene.json]          open the editor
//! scenery --export scene.json   print the exported scene and exit
//! ```

mod app;
mod headless;

use anyhow::{Context, Result};
use eframe::egui;
use scenery_core::EditorConfig;
use scenery_media::{LocalResolver, ProbeVideoSource};
use scenery_scene::{EditorContext, Scene};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable naming the config file.
const CONFIG_ENV: &str = "SCENERY_CONFIG";
const DEFAULT_CONFIG: &str = "scenery.json";

fn main() -> Result<()> {
    let config_path = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = EditorConfig::load(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(config = %config_path.display(), "Scenery starting...");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("scenery-io")
        .build()?;

    let resolver = Arc::new(LocalResolver::new(&config.media_root));
    let ctx = EditorContext::new(
        config,
        resolver,
        Arc::new(ProbeVideoSource::new()),
        runtime.handle().clone(),
    );

    let mut args = std::env::args().skip(1);
    match args.next() {
        Some(flag) if flag == "--export" => {
            let path = args
                .next()
                .map(PathBuf::from)
                .context("--export needs a scene file")?;
            let scene = runtime.block_on(headless::load_scene(&ctx, &path))?;
            println!("{}", headless::export_json(&scene)?);
            Ok(())
        }
        Some(path) => {
            let path = PathBuf::from(path);
            let scene = runtime.block_on(headless::load_scene(&ctx, &path))?;
            run_editor(scene, Some(path))
        }
        None => run_editor(Scene::new(ctx, "Untitled"), None),
    }
}

fn run_editor(scene: Scene, scene_path: Option<PathBuf>) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Scenery"),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "Scenery",
        options,
        Box::new(move |cc| Ok(Box::new(app::SceneryApp::new(cc, scene, scene_path)))),
    )?;

    Ok(())
}

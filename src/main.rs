use anyhow::{Context, Result};
use log::{debug, info};
use mimalloc::MiMalloc;

use album_layout::config::Config;
use album_layout::faces::group_photos_by_person;
use album_layout::manifest::load_manifest;
use album_layout::models::AlbumProject;
use album_layout::{AutoDesigner, PlacementOptimizer, TemplateCatalog};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e.to_string()))?;

    info!("Manifest: {}", config.manifest_path.display());
    info!(
        "Album format: {}x{}in, safe zone {}in",
        config.settings.width, config.settings.height, config.settings.safe_zone_size
    );

    let mut photos = load_manifest(&config.manifest_path)
        .with_context(|| format!("Failed to load {}", config.manifest_path.display()))?;

    for (person, members) in group_photos_by_person(&photos) {
        debug!("{}: {} photos", person, members.len());
    }

    let catalog = TemplateCatalog::new();
    let designer = AutoDesigner::with_config(&catalog, config.generation.clone());
    let mut spreads = designer.auto_generate_album(&mut photos, &config.settings);

    if config.optimize {
        let optimizer = PlacementOptimizer::with_config(&config.settings, config.optimizer.clone());
        let report = optimizer.optimize_album(&mut spreads);
        info!(
            "Optimizer: {} crops shifted, {} gutter swaps, {} balance swaps, {} grouping swaps",
            report.nudged, report.gutter_swaps, report.balance_swaps, report.grouping_swaps
        );
    }

    let mut project = AlbumProject::new(&config.project_name, "", None, config.settings.clone());
    project.append_spreads(spreads);
    info!(
        "Placed {} of {} photos on {} spreads",
        project.placed_photo_count(),
        photos.len(),
        project.spreads.len()
    );

    let json = serde_json::to_string_pretty(&project)?;
    match &config.output_path {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Project written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

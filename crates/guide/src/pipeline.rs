use std::path::PathBuf;

use parks::{ImageStore, ParkRecord, ParksClient, collect_parks};
use rand::Rng;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::document::{GuideDocument, Picture};
use crate::error::{GuideError, Result};
use crate::map::{MapScope, draw_map};
use crate::render::write_docx;

pub const MAP_FILE_NAME: &str = "map.png";

#[derive(Debug, Clone)]
pub struct GuideSummary {
    pub requested: usize,
    pub included: usize,
    pub failed_ids: Vec<String>,
    pub output: PathBuf,
    pub document: GuideDocument,
}

/// Run the whole guide pipeline with a thread-local RNG.
pub async fn run(config: &AppConfig) -> Result<GuideSummary> {
    run_with_rng(config, &mut rand::thread_rng()).await
}

pub async fn run_with_rng<R: Rng + ?Sized>(config: &AppConfig, rng: &mut R) -> Result<GuideSummary> {
    let client = ParksClient::new(config.api_base_url.clone(), config.request_timeout())?;
    info!(api = %client.base_url(), sample_size = config.sample_size, "Collecting parks");

    let aggregation = collect_parks(&client, config.sample_size, rng).await?;
    println!("Making document...");

    let store = ImageStore::new(&config.image_dir);
    let document = assemble(config, &client, &store, &aggregation.records).await?;
    write_docx(&document, &config.output_path)?;
    println!("Done!");

    Ok(GuideSummary {
        requested: aggregation.requested,
        included: aggregation.succeeded(),
        failed_ids: aggregation.failed_ids(),
        output: config.output_path.clone(),
        document,
    })
}

/// Build the document: title, optional map, then one section per park.
pub async fn assemble(
    config: &AppConfig,
    client: &ParksClient,
    store: &ImageStore,
    records: &[ParkRecord],
) -> Result<GuideDocument> {
    let mut document = GuideDocument::new(&config.title);

    if config.map.enabled {
        if let Some(map) = render_map(config, store, records).await? {
            document.add_map(map);
        }
    }

    for park in records {
        let paths = store.fetch_all(client, &park.park_images).await?;
        // Read back now, the next park reuses the same file names.
        let pictures = paths
            .iter()
            .map(|p| Picture::load(p))
            .collect::<Result<Vec<_>>>()?;

        info!(park = %park.name, images = pictures.len(), "Added park section");
        document.add_park(park, pictures);
    }

    Ok(document)
}

async fn render_map(
    config: &AppConfig,
    store: &ImageStore,
    records: &[ParkRecord],
) -> Result<Option<Picture>> {
    tokio::fs::create_dir_all(store.dir())
        .await
        .map_err(|e| GuideError::assembly(store.dir(), e))?;
    let path = store.dir().join(MAP_FILE_NAME);
    let size = (config.map.width, config.map.height);

    if !draw_map(records, &MapScope::USA, &path, size)? {
        warn!("No park inside the map scope, skipping map");
        return Ok(None);
    }
    Picture::load(&path).map(Some)
}

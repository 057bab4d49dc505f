use std::io::Cursor;
use std::path::Path;

use guide::{AppConfig, Block, GuideError, run_with_rng};
use image::{ImageFormat, Rgb, RgbImage};
use parks::ParkError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const IDS: [&str; 5] = ["spk001", "spk002", "spk003", "spk004", "spk005"];

fn png_bytes(shade: u8) -> Vec<u8> {
    let mut out = Vec::new();
    RgbImage::from_pixel(8, 6, Rgb([shade, 90, 40]))
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

fn park_json(server: &MockServer, id: &str) -> Value {
    let images: Vec<String> = (0..3)
        .map(|n| format!("{}/img/{}/{}", server.uri(), id, n))
        .collect();

    json!({
        "name": format!("Park {}", id),
        "address": format!("{} Lake Rd, MN", id),
        "url": format!("https://parks.example/{}", id),
        "location": {"latitude": 46.5, "longitude": -94.3},
        "highlights": ["Trails", "Beach", "Waterfall"],
        "park_information": {"Overview": format!("About {}", id), "Camping": "Year round"},
        "park_images": images
    })
}

async fn mount_api(server: &MockServer, failing: &[&str]) {
    let stubs: Vec<Value> = IDS
        .iter()
        .map(|id| json!({"park_id": id, "name": format!("Park {}", id)}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stubs))
        .mount(server)
        .await;

    for id in IDS {
        let response = if failing.contains(&id) {
            ResponseTemplate::new(500)
        } else {
            ResponseTemplate::new(200).set_body_json(park_json(server, id))
        };
        Mock::given(method("GET"))
            .and(path(format!("/api/{}", id)))
            .respond_with(response)
            .mount(server)
            .await;

        for n in 0..3u8 {
            Mock::given(method("GET"))
                .and(path(format!("/img/{}/{}", id, n)))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes(n * 60)))
                .mount(server)
                .await;
        }
    }
}

fn config_for(server: &MockServer, dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.api_base_url = format!("{}/api", server.uri());
    config.image_dir = dir.join("images");
    config.output_path = dir.join("state_park_guide.docx");
    config.map.enabled = false;
    config
}

fn park_titles(blocks: &[Block]) -> Vec<String> {
    blocks
        .iter()
        .skip(1)
        .filter_map(|b| match b {
            Block::Title(t) => Some(t.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn all_parks_make_it_into_the_guide() {
    let server = MockServer::start().await;
    mount_api(&server, &[]).await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, dir.path());

    let summary = run_with_rng(&config, &mut StdRng::seed_from_u64(1)).await.unwrap();

    assert_eq!(summary.requested, 5);
    assert_eq!(summary.included, 5);
    assert!(summary.failed_ids.is_empty());
    assert!(config.output_path.exists());

    let doc = &summary.document;
    assert_eq!(doc.page_breaks(), 5);
    assert_eq!(park_titles(doc.blocks()).len(), 5);
    assert!(matches!(doc.blocks().last(), Some(Block::PageBreak)));

    // Highlights appear as bullets, in API order, for every park.
    let outline = doc.outline();
    let bullets: Vec<&str> = outline
        .iter()
        .filter(|l| l.starts_with("- "))
        .map(String::as_str)
        .collect();
    assert_eq!(bullets.len(), 15);
    for chunk in bullets.chunks(3) {
        assert_eq!(chunk, ["- Trails", "- Beach", "- Waterfall"]);
    }

    // One lead picture plus two photographs per park.
    let pictures = doc
        .blocks()
        .iter()
        .filter(|b| matches!(b, Block::Picture(_)))
        .count();
    assert_eq!(pictures, 15);
}

#[tokio::test]
async fn failed_parks_are_left_out() {
    let server = MockServer::start().await;
    mount_api(&server, &["spk002", "spk004"]).await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, dir.path());

    let summary = run_with_rng(&config, &mut StdRng::seed_from_u64(2)).await.unwrap();

    assert_eq!(summary.requested, 5);
    assert_eq!(summary.included, 3);
    let mut failed = summary.failed_ids.clone();
    failed.sort();
    assert_eq!(failed, vec!["spk002".to_string(), "spk004".to_string()]);

    assert_eq!(summary.document.page_breaks(), 3);
    let titles = park_titles(summary.document.blocks());
    assert_eq!(titles.len(), 3);
    assert!(!titles.contains(&"Park spk002".to_string()));
    assert!(config.output_path.exists());
}

#[tokio::test]
async fn no_document_when_every_park_fails() {
    let server = MockServer::start().await;
    mount_api(&server, &IDS).await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, dir.path());

    let err = run_with_rng(&config, &mut StdRng::seed_from_u64(3)).await.unwrap_err();

    assert!(matches!(err, GuideError::Park(ParkError::NoData { requested: 5 })));
    assert!(!config.output_path.exists());
}

#[tokio::test]
async fn same_responses_same_structure() {
    let server = MockServer::start().await;
    mount_api(&server, &["spk003"]).await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, dir.path());

    let first = run_with_rng(&config, &mut StdRng::seed_from_u64(9)).await.unwrap();
    let second = run_with_rng(&config, &mut StdRng::seed_from_u64(9)).await.unwrap();

    assert_eq!(first.document.outline(), second.document.outline());
}

#[tokio::test]
async fn broken_image_aborts_without_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"park_id": "spk001", "name": "Park spk001"}
        ])))
        .mount(&server)
        .await;
    let mut record = park_json(&server, "spk001");
    record["park_images"] = json!([format!("{}/img/missing", server.uri())]);
    Mock::given(method("GET"))
        .and(path("/api/spk001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, dir.path());
    let err = run_with_rng(&config, &mut StdRng::seed_from_u64(0)).await.unwrap_err();

    assert!(matches!(err, GuideError::Park(ParkError::ImageFetch { .. })));
    assert!(!config.output_path.exists());
}

#[tokio::test]
async fn unreachable_api_is_fatal() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, dir.path());

    let err = run_with_rng(&config, &mut StdRng::seed_from_u64(0)).await.unwrap_err();

    assert!(matches!(err, GuideError::Park(ParkError::UnreachableService { .. })));
}

#[tokio::test]
async fn map_follows_the_title() {
    let server = MockServer::start().await;
    mount_api(&server, &[]).await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(&server, dir.path());
    config.map.enabled = true;

    let summary = run_with_rng(&config, &mut StdRng::seed_from_u64(4)).await.unwrap();
    let blocks = summary.document.blocks();

    let map_path = config.image_dir.join("map.png");
    assert!(map_path.exists());
    assert_eq!(image::image_dimensions(&map_path).unwrap(), (1000, 800));

    match &blocks[1] {
        Block::Picture(picture) => {
            assert_eq!(picture.source, map_path);
            assert_eq!((picture.width, picture.height), (1000, 800));
        }
        other => panic!("expected map picture after title, got {:?}", other),
    }
    assert!(matches!(&blocks[2], Block::Title(name) if name.starts_with("Park spk")));
    assert_eq!(summary.document.page_breaks(), 5);
}

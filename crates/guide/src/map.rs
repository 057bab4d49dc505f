use std::ops::Range;
use std::path::Path;

use parks::ParkRecord;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, warn};

use crate::error::{GuideError, Result};

/// Smallest plotted span in degrees, so a single park still gets a map.
const MIN_SPAN_DEGREES: f64 = 1.0;
const PADDING_RATIO: f64 = 0.15;

/// Geographic area the map is restricted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapScope {
    pub name: &'static str,
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl MapScope {
    pub const USA: MapScope = MapScope {
        name: "usa",
        min_latitude: 24.4,
        max_latitude: 49.4,
        min_longitude: -125.0,
        max_longitude: -66.9,
    };

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Plotted area, cropped to the points.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub longitude: Range<f64>,
    pub latitude: Range<f64>,
}

/// Park markers that fall inside `scope`.
pub fn map_points(records: &[ParkRecord], scope: &MapScope) -> Vec<MapPoint> {
    records
        .iter()
        .filter_map(|park| {
            let location = park.location;
            if scope.contains(location.latitude, location.longitude) {
                Some(MapPoint {
                    name: park.name.clone(),
                    latitude: location.latitude,
                    longitude: location.longitude,
                })
            } else {
                warn!(park = %park.name, scope = scope.name, "Park outside map scope");
                None
            }
        })
        .collect()
}

pub fn crop_bounds(points: &[MapPoint]) -> Option<Bounds> {
    if points.is_empty() {
        return None;
    }

    let (mut min_lat, mut max_lat) = (f64::MAX, f64::MIN);
    let (mut min_lon, mut max_lon) = (f64::MAX, f64::MIN);
    for p in points {
        min_lat = min_lat.min(p.latitude);
        max_lat = max_lat.max(p.latitude);
        min_lon = min_lon.min(p.longitude);
        max_lon = max_lon.max(p.longitude);
    }

    Some(Bounds {
        latitude: padded(min_lat, max_lat),
        longitude: padded(min_lon, max_lon),
    })
}

fn padded(min: f64, max: f64) -> Range<f64> {
    let center = (min + max) / 2.0;
    let half = (max - min).max(MIN_SPAN_DEGREES) * (0.5 + PADDING_RATIO);
    (center - half)..(center + half)
}

/// Draw a labelled scatter map of the parks to `path`.
///
/// Returns `false` without writing anything when no park is inside `scope`.
pub fn draw_map(
    records: &[ParkRecord],
    scope: &MapScope,
    path: &Path,
    size: (u32, u32),
) -> Result<bool> {
    let points = map_points(records, scope);
    let Some(bounds) = crop_bounds(&points) else {
        return Ok(false);
    };

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| GuideError::Map(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(bounds.longitude, bounds.latitude)
        .map_err(|e| GuideError::Map(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .draw()
        .map_err(|e| GuideError::Map(e.to_string()))?;

    // Marker with its name below it.
    let label_style = ("sans-serif", 18)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    chart
        .draw_series(points.iter().map(|p| {
            EmptyElement::at((p.longitude, p.latitude))
                + Circle::new((0, 0), 6, BLUE.filled())
                + Text::new(p.name.clone(), (0, 10), label_style.clone())
        }))
        .map_err(|e| GuideError::Map(e.to_string()))?;

    root.present().map_err(|e| GuideError::Map(e.to_string()))?;
    debug!(path = ?path, points = points.len(), "Saved map");
    Ok(true)
}

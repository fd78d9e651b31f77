//! What the shell's map should show for the current draft: markers, camera
//! framing and the demo route overlay. Coordinates only; the map provider
//! does all drawing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, Coordinate, Place, PlaceId, DEMO_ROUTE};
use crate::{
    DEFAULT_MAP_ZOOM, FIT_EDGE_PADDING, INITIAL_CAMERA_LATITUDE, INITIAL_CAMERA_LONGITUDE,
    PICKUP_MARKER_COLOR, ROUTE_STROKE_COLOR, ROUTE_STROKE_WIDTH,
};

#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to encode route geometry: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinate> for LatLng {
    fn from(c: Coordinate) -> Self {
        Self {
            latitude: c.latitude(),
            longitude: c.longitude(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    Pickup,
    Destination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub kind: MarkerKind,
    pub place_id: PlaceId,
    pub title: String,
    pub position: LatLng,
    /// `None` means the provider's default pin.
    pub pin_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CameraView {
    Initial { center: LatLng, zoom: f64 },
    Centered { center: LatLng, zoom: f64 },
    FitToCoordinates { coordinates: Vec<LatLng>, edge_padding: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOverlay {
    pub coordinates: Vec<LatLng>,
    pub stroke_width: u32,
    pub stroke_color: String,
    /// The same path as a GeoJSON `LineString`.
    pub geojson: String,
}

pub fn markers(pickup: Option<&Place>, destination: Option<&Place>) -> Vec<MapMarker> {
    let pickup = pickup.map(|p| MapMarker {
        kind: MarkerKind::Pickup,
        place_id: p.id,
        title: p.title.clone(),
        position: p.coordinate.into(),
        pin_color: Some(PICKUP_MARKER_COLOR.to_string()),
    });
    let destination = destination.map(|p| MapMarker {
        kind: MarkerKind::Destination,
        place_id: p.id,
        title: p.title.clone(),
        position: p.coordinate.into(),
        pin_color: None,
    });
    pickup.into_iter().chain(destination).collect()
}

pub fn camera(pickup: Option<&Place>, destination: Option<&Place>) -> CameraView {
    match (pickup, destination) {
        (Some(from), Some(to)) => CameraView::FitToCoordinates {
            coordinates: vec![from.coordinate.into(), to.coordinate.into()],
            edge_padding: FIT_EDGE_PADDING,
        },
        (Some(only), None) | (None, Some(only)) => CameraView::Centered {
            center: only.coordinate.into(),
            zoom: DEFAULT_MAP_ZOOM,
        },
        (None, None) => CameraView::Initial {
            center: LatLng {
                latitude: INITIAL_CAMERA_LATITUDE,
                longitude: INITIAL_CAMERA_LONGITUDE,
            },
            zoom: DEFAULT_MAP_ZOOM,
        },
    }
}

/// The canned route, when the draft runs exactly along it.
pub fn route(pickup: Option<PlaceId>, destination: Option<PlaceId>) -> Result<Option<RouteOverlay>, MapError> {
    if pickup != Some(DEMO_ROUTE.from) || destination != Some(DEMO_ROUTE.to) {
        return Ok(None);
    }

    let line: Vec<Vec<f64>> = DEMO_ROUTE.path.iter().map(|p| p.to_vec()).collect();
    let geometry = geojson::Geometry::new(geojson::Value::LineString(line));
    let geojson = serde_json::to_string(&geometry)?;

    Ok(Some(RouteOverlay {
        coordinates: DEMO_ROUTE
            .path
            .iter()
            .map(|[longitude, latitude]| LatLng {
                latitude: *latitude,
                longitude: *longitude,
            })
            .collect(),
        stroke_width: ROUTE_STROKE_WIDTH,
        stroke_color: ROUTE_STROKE_COLOR.to_string(),
        geojson,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub markers: Vec<MapMarker>,
    pub camera: CameraView,
    pub route: Option<RouteOverlay>,
}

/// Builds the full map description for a draft. A route that cannot be
/// encoded is dropped with a warning; markers and camera still render.
pub fn map_view(catalog: &Catalog, pickup: Option<PlaceId>, destination: Option<PlaceId>) -> MapView {
    let from = pickup.and_then(|id| catalog.place(id));
    let to = destination.and_then(|id| catalog.place(id));

    let route = route(pickup, destination).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "dropping route overlay");
        None
    });

    MapView {
        markers: markers(from, to),
        camera: camera(from, to),
        route,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_follow_draft_slots() {
        let catalog = Catalog::builtin();
        let view = map_view(&catalog, Some(PlaceId(11)), None);

        assert_eq!(view.markers.len(), 1);
        assert_eq!(view.markers[0].kind, MarkerKind::Pickup);
        assert_eq!(view.markers[0].pin_color.as_deref(), Some(PICKUP_MARKER_COLOR));

        let view = map_view(&catalog, Some(PlaceId(11)), Some(PlaceId(6)));
        let kinds: Vec<_> = view.markers.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![MarkerKind::Pickup, MarkerKind::Destination]);
        assert_eq!(view.markers[1].pin_color, None);
    }

    #[test]
    fn camera_framing() {
        let catalog = Catalog::builtin();
        let leapfrog = catalog.place(PlaceId(11));
        let thamel = catalog.place(PlaceId(6));

        assert!(matches!(
            camera(leapfrog, thamel),
            CameraView::FitToCoordinates { ref coordinates, edge_padding: 100 } if coordinates.len() == 2
        ));

        match camera(None, thamel) {
            CameraView::Centered { center, zoom } => {
                assert!((center.latitude - 27.7162).abs() < f64::EPSILON);
                assert!((zoom - 15.0).abs() < f64::EPSILON);
            }
            other => panic!("expected centred camera, got {other:?}"),
        }

        match camera(None, None) {
            CameraView::Initial { center, .. } => {
                assert!((center.latitude - 27.693_311_3).abs() < 1e-9);
                assert!((center.longitude - 85.321_129_1).abs() < 1e-9);
            }
            other => panic!("expected initial camera, got {other:?}"),
        }
    }

    #[test]
    fn route_only_for_demo_pair() {
        assert!(route(Some(PlaceId(1)), Some(PlaceId(11))).unwrap().is_none());
        assert!(route(Some(PlaceId(11)), None).unwrap().is_none());

        let overlay = route(Some(PlaceId(11)), Some(PlaceId(1))).unwrap().unwrap();
        assert_eq!(overlay.stroke_width, 12);
        assert_eq!(overlay.stroke_color, "#4595ff");
        assert_eq!(overlay.coordinates.len(), DEMO_ROUTE.path.len());
        assert!((overlay.coordinates[0].latitude - 27.707_435).abs() < 1e-9);
    }

    #[test]
    fn route_geojson_is_a_line_string() {
        let overlay = route(Some(PlaceId(11)), Some(PlaceId(1))).unwrap().unwrap();
        let geometry: geojson::Geometry = serde_json::from_str(&overlay.geojson).unwrap();

        match geometry.value {
            geojson::Value::LineString(points) => {
                assert_eq!(points.len(), DEMO_ROUTE.path.len());
                assert_eq!(points[0], vec![85.327_246, 27.707_435]);
            }
            other => panic!("expected LineString, got {other:?}"),
        }
    }
}

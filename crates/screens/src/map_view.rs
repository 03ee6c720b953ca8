//! The map screen: observer position -> register fetch -> markers.

use api::{ApiError, Register};
use foundation::LatLon;

use crate::{Route, fetch_alert_text};

/// Fixed zoom the map opens at, centered on the observer.
pub const MAP_ZOOM: u8 = 16;

/// One rendered sighting: a point plus its popup content.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub register_id: i64,
    pub at: LatLon,
    pub title: String,
    pub specie_id: i64,
    pub specie_name: String,
    pub observations: String,
}

impl Marker {
    /// The popup's observations line.
    pub fn observations_line(&self) -> String {
        format!("Obs.: {}", self.observations)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    /// No observer position yet; nothing can be fetched.
    AwaitingPosition,
    /// Position established, register fetch outstanding (or failed).
    Loading { center: LatLon },
    Ready { center: LatLon, markers: Vec<Marker> },
}

/// Effects the host performs on the map screen's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum MapViewEffect {
    RequestDevicePosition,
    FetchRegisters,
    Alert(String),
    Navigate(Route),
    Log(String),
}

#[derive(Debug)]
pub struct MapView {
    state: State,
    skipped_records: usize,
}

impl MapView {
    /// Activate the screen with whatever position the shared context holds.
    ///
    /// With no shared position the device is asked instead; if that request
    /// never resolves the screen stays on its loading indicator. There is no
    /// fallback center and no timeout.
    pub fn start(shared_position: Option<LatLon>) -> (Self, Vec<MapViewEffect>) {
        let mut screen = Self {
            state: State::AwaitingPosition,
            skipped_records: 0,
        };
        let effects = match shared_position {
            Some(position) => screen.position_resolved(position),
            None => vec![MapViewEffect::RequestDevicePosition],
        };
        (screen, effects)
    }

    /// The loading indicator shows until markers are ready.
    pub fn is_loading(&self) -> bool {
        !matches!(self.state, State::Ready { .. })
    }

    pub fn center(&self) -> Option<LatLon> {
        match &self.state {
            State::AwaitingPosition => None,
            State::Loading { center } | State::Ready { center, .. } => Some(*center),
        }
    }

    /// Markers to draw; empty until the fetch completes.
    pub fn markers(&self) -> &[Marker] {
        match &self.state {
            State::Ready { markers, .. } => markers,
            _ => &[],
        }
    }

    /// Records dropped because their coordinates did not parse.
    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }

    /// A position arrived (from the device, or shared state at start).
    pub fn position_resolved(&mut self, position: LatLon) -> Vec<MapViewEffect> {
        if !matches!(self.state, State::AwaitingPosition) {
            return Vec::new();
        }
        self.state = State::Loading { center: position };
        vec![
            MapViewEffect::Log(format!(
                "position {} {}",
                position.lat_deg, position.lon_deg
            )),
            MapViewEffect::FetchRegisters,
        ]
    }

    /// The register fetch finished.
    pub fn registers_loaded(
        &mut self,
        result: Result<Vec<Register>, ApiError>,
    ) -> Vec<MapViewEffect> {
        let center = match &self.state {
            State::Loading { center } => *center,
            _ => return Vec::new(),
        };
        match result {
            Ok(records) => {
                let mut markers = Vec::with_capacity(records.len());
                for record in records {
                    match LatLon::parse(&record.latitude, &record.longitude) {
                        Ok(at) => markers.push(Marker {
                            register_id: record.id,
                            at,
                            title: record.title,
                            specie_id: record.specie.id,
                            specie_name: record.specie.scientific_name,
                            observations: record.observations,
                        }),
                        Err(_) => self.skipped_records += 1,
                    }
                }
                self.state = State::Ready { center, markers };

                if self.skipped_records > 0 {
                    vec![MapViewEffect::Log(format!(
                        "dropped {} register(s) with unreadable coordinates",
                        self.skipped_records
                    ))]
                } else {
                    Vec::new()
                }
            }
            // The screen keeps its loading presentation; there is no retry.
            Err(err) => vec![MapViewEffect::Alert(fetch_alert_text(&err))],
        }
    }

    /// A popup's species name was activated.
    pub fn specie_activated(&self, specie_id: i64) -> Vec<MapViewEffect> {
        vec![MapViewEffect::Navigate(Route::SpecieDetail(specie_id))]
    }
}

#[cfg(test)]
mod tests {
    use super::{MapView, MapViewEffect, Marker};
    use crate::Route;
    use api::{ApiError, Register, Specie};
    use foundation::LatLon;

    fn register(id: i64, lat: &str, lon: &str) -> Register {
        Register {
            id,
            title: format!("Spot {id}"),
            latitude: lat.to_string(),
            longitude: lon.to_string(),
            observations: "Fresh leaves".to_string(),
            specie: Specie {
                id: 9,
                scientific_name: "Ficus sp.".to_string(),
            },
        }
    }

    #[test]
    fn shared_position_skips_the_device_request() {
        let (screen, effects) = MapView::start(Some(LatLon::new(-27.58, -48.50)));
        assert!(effects.contains(&MapViewEffect::FetchRegisters));
        assert!(!effects.contains(&MapViewEffect::RequestDevicePosition));
        assert_eq!(screen.center(), Some(LatLon::new(-27.58, -48.50)));
    }

    #[test]
    fn without_a_position_the_device_is_asked() {
        let (screen, effects) = MapView::start(None);
        assert_eq!(effects, vec![MapViewEffect::RequestDevicePosition]);
        assert!(screen.is_loading());
        assert!(screen.center().is_none());
    }

    #[test]
    fn device_position_triggers_the_fetch() {
        let (mut screen, _) = MapView::start(None);
        let effects = screen.position_resolved(LatLon::new(-27.58, -48.50));
        assert!(effects.contains(&MapViewEffect::FetchRegisters));
        assert!(screen.is_loading());
    }

    #[test]
    fn a_second_position_is_ignored() {
        let (mut screen, _) = MapView::start(Some(LatLon::new(-27.58, -48.50)));
        let effects = screen.position_resolved(LatLon::new(0.0, 0.0));
        assert!(effects.is_empty());
        assert_eq!(screen.center(), Some(LatLon::new(-27.58, -48.50)));
    }

    #[test]
    fn marker_count_equals_record_count() {
        let (mut screen, _) = MapView::start(Some(LatLon::new(-27.58, -48.50)));
        let records = vec![
            register(1, "-27.58", "-48.50"),
            register(2, "-27.60", "-48.52"),
            register(3, "-27.55", "-48.49"),
        ];
        screen.registers_loaded(Ok(records.clone()));

        assert!(!screen.is_loading());
        assert_eq!(screen.markers().len(), records.len());
        for (marker, record) in screen.markers().iter().zip(&records) {
            assert_eq!(
                marker.at,
                LatLon::parse(&record.latitude, &record.longitude).unwrap()
            );
        }
    }

    #[test]
    fn popup_content_mirrors_the_record() {
        let (mut screen, _) = MapView::start(Some(LatLon::new(-27.58, -48.50)));
        screen.registers_loaded(Ok(vec![register(1, "-27.58", "-48.50")]));

        let marker: &Marker = &screen.markers()[0];
        assert_eq!(marker.title, "Spot 1");
        assert_eq!(marker.specie_name, "Ficus sp.");
        assert_eq!(marker.observations_line(), "Obs.: Fresh leaves");
    }

    #[test]
    fn unreadable_coordinates_drop_the_record() {
        let (mut screen, _) = MapView::start(Some(LatLon::new(-27.58, -48.50)));
        let effects = screen.registers_loaded(Ok(vec![
            register(1, "-27.58", "-48.50"),
            register(2, "somewhere", "-48.52"),
        ]));

        assert_eq!(screen.markers().len(), 1);
        assert_eq!(screen.skipped_records(), 1);
        assert!(matches!(effects.as_slice(), [MapViewEffect::Log(_)]));
    }

    #[test]
    fn fetch_failure_keeps_the_loading_view() {
        let (mut screen, _) = MapView::start(Some(LatLon::new(-27.58, -48.50)));
        let effects = screen.registers_loaded(Err(ApiError::Http {
            status: 500,
            body: String::new(),
        }));

        assert_eq!(effects, vec![MapViewEffect::Alert("Erro 500".to_string())]);
        assert!(screen.is_loading());
        assert!(screen.markers().is_empty());
    }

    #[test]
    fn specie_activation_navigates_to_its_detail() {
        let (mut screen, _) = MapView::start(Some(LatLon::new(-27.58, -48.50)));
        screen.registers_loaded(Ok(vec![register(1, "-27.58", "-48.50")]));

        let effects = screen.specie_activated(9);
        assert_eq!(
            effects,
            vec![MapViewEffect::Navigate(Route::SpecieDetail(9))]
        );
    }
}

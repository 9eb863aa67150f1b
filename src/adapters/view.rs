use crate::domain::model::Coordinate;
use crate::domain::ports::MapView;

/// 印度全境的預設視角
pub const DEFAULT_CENTER: (f64, f64) = (22.5, 78.9);
pub const DEFAULT_ZOOM: u8 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub label: String,
}

/// In-memory map state: at most one marker plus the current view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    marker: Option<Marker>,
    center: (f64, f64),
    zoom: u8,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            marker: None,
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }

    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl MapView for ViewState {
    fn set_marker(&mut self, coordinate: Coordinate, label: &str) {
        if let Some(previous) = self.marker.replace(Marker {
            coordinate,
            label: label.to_string(),
        }) {
            tracing::debug!("Replaced marker '{}'", previous.label);
        }
    }

    fn recenter(&mut self, coordinate: Coordinate, zoom: u8) {
        self.center = (coordinate.latitude(), coordinate.longitude());
        self.zoom = zoom;
    }

    // 回到全國視角
    fn reset(&mut self) {
        self.marker = None;
        self.center = DEFAULT_CENTER;
        self.zoom = DEFAULT_ZOOM;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_is_replaced_not_stacked() {
        let mut view = ViewState::new();
        let delhi = Coordinate::new(28.6139, 77.2090).unwrap();
        let mumbai = Coordinate::new(19.076, 72.8777).unwrap();

        view.set_marker(delhi, "Connaught Place");
        view.set_marker(mumbai, "Fort");
        view.recenter(mumbai, 7);

        let marker = view.marker().unwrap();
        assert_eq!(marker.label, "Fort");
        assert_eq!(marker.coordinate, mumbai);
        assert_eq!(view.center(), (19.076, 72.8777));
        assert_eq!(view.zoom(), 7);
    }

    #[test]
    fn test_reset_restores_default_view() {
        let mut view = ViewState::new();
        let delhi = Coordinate::new(28.6139, 77.2090).unwrap();
        view.set_marker(delhi, "Connaught Place");
        view.recenter(delhi, 14);

        view.reset();

        assert!(view.marker().is_none());
        assert_eq!(view, ViewState::default());
    }
}

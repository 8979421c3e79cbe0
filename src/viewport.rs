// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Camera over the laid-out tree: which point is in the middle of the pane and how far in we are.

use glam::DVec2;
use serde::Serialize;

/// Zoom range of the pane.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 4.0;

/// Padding around the content when fitting, as a fraction of the pane.
const FIT_PADDING: f64 = 0.1;

/// Axis-aligned box in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Smallest box containing every rectangle given as `(top_left, size)`.
    pub fn enclosing<I>(rects: I) -> Option<Self>
    where
        I: IntoIterator<Item = (DVec2, DVec2)>,
    {
        rects.into_iter().fold(None, |bounds, (top_left, size)| {
            let rect = Bounds::new(top_left, top_left + size);
            Some(match bounds {
                None => rect,
                Some(bounds) => bounds.union(&rect),
            })
        })
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }
}

/// Pointer interaction signals delivered to the pane listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneEvent {
    PanStarted,
    PanEnded,
    DragStarted { person_id: String },
    DragEnded { person_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Layout-space point shown in the middle of the pane.
    pub center: DVec2,
    pub zoom: f64,
    /// Pane size in screen pixels.
    pub size: DVec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DVec2::new(1280.0, 800.0))
    }
}

impl Viewport {
    pub fn new(size: DVec2) -> Self {
        Self {
            center: DVec2::ZERO,
            zoom: 1.0,
            size,
        }
    }

    /// Centers on `bounds` and zooms so that it fills the pane minus the padding.
    pub fn fit_to(&mut self, bounds: &Bounds) {
        self.center = bounds.center();
        let content = bounds.size();
        let available = self.size * (1.0 - 2.0 * FIT_PADDING);
        let zoom_x = if content.x > 0.0 { available.x / content.x } else { MAX_ZOOM };
        let zoom_y = if content.y > 0.0 { available.y / content.y } else { MAX_ZOOM };
        self.zoom = clamp_zoom(zoom_x.min(zoom_y).min(1.0));
    }

    pub fn center_on(&mut self, point: DVec2) {
        self.center = point;
    }

    /// Moves the view by a screen-space delta, as when dragging the background.
    pub fn pan_by(&mut self, screen_delta: DVec2) {
        self.center -= screen_delta / self.zoom;
    }

    /// Multiplies the zoom, keeping it within [`MIN_ZOOM`, `MAX_ZOOM`].
    pub fn zoom_by(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.zoom = clamp_zoom(self.zoom * factor);
        }
    }

    /// Converts a screen-space delta to layout space.
    pub fn to_layout_delta(&self, screen_delta: DVec2) -> DVec2 {
        screen_delta / self.zoom
    }
}

fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_centers_and_never_zooms_in_past_one() {
        let mut viewport = Viewport::new(DVec2::new(1000.0, 1000.0));
        let bounds = Bounds::new(DVec2::new(0.0, 0.0), DVec2::new(100.0, 50.0));
        viewport.fit_to(&bounds);
        assert_eq!(viewport.center, DVec2::new(50.0, 25.0));
        assert_eq!(viewport.zoom, 1.0);
    }

    #[test]
    fn fit_zooms_out_for_large_content() {
        let mut viewport = Viewport::new(DVec2::new(1000.0, 500.0));
        viewport.fit_to(&Bounds::new(DVec2::ZERO, DVec2::new(8000.0, 400.0)));
        assert!((viewport.zoom - 0.1).abs() < 1e-9);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut viewport = Viewport::default();
        viewport.zoom_by(100.0);
        assert_eq!(viewport.zoom, MAX_ZOOM);
        viewport.zoom_by(0.0001);
        assert_eq!(viewport.zoom, MIN_ZOOM);
        viewport.zoom_by(-1.0);
        assert_eq!(viewport.zoom, MIN_ZOOM);
    }

    #[test]
    fn pan_moves_against_the_drag() {
        let mut viewport = Viewport::default();
        viewport.zoom_by(2.0);
        viewport.pan_by(DVec2::new(20.0, 0.0));
        assert_eq!(viewport.center, DVec2::new(-10.0, 0.0));
    }

    #[test]
    fn enclosing_of_nothing_is_none() {
        assert!(Bounds::enclosing(std::iter::empty()).is_none());
        let bounds = Bounds::enclosing([
            (DVec2::new(0.0, 0.0), DVec2::new(10.0, 10.0)),
            (DVec2::new(-5.0, 20.0), DVec2::new(10.0, 10.0)),
        ])
        .unwrap();
        assert_eq!(bounds.min, DVec2::new(-5.0, 0.0));
        assert_eq!(bounds.max, DVec2::new(10.0, 30.0));
    }
}

// End of File

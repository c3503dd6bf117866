//! Achsenparallele Ausdehnung (Extent) in Kartenkoordinaten und deren
//! Neuberechnung nach Rotation.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{GeorefError, Point2D, SimilarityTransform};

/// Achsenparalleles Rechteck `(x0, y0, x1, y1)` mit `x0 ≤ x1`, `y0 ≤ y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Linke Kante
    pub x0: f64,
    /// Untere Kante
    pub y0: f64,
    /// Rechte Kante
    pub x1: f64,
    /// Obere Kante
    pub y1: f64,
}

impl Extent {
    /// Erstellt einen Extent und prüft Endlichkeit und Reihenfolge.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Result<Self, GeorefError> {
        let extent = Self { x0, y0, x1, y1 };
        extent.validate()?;
        Ok(extent)
    }

    /// Kleinster Extent, der alle Punkte enthält.
    pub fn bounding(points: &[Point2D]) -> Result<Self, GeorefError> {
        let Some(first) = points.first() else {
            return Err(GeorefError::degenerate("Keine Punkte für Bounding-Box"));
        };
        let (min, max) = points
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Self::new(min.x, min.y, max.x, max.y)
    }

    /// Prüft die Invarianten (endlich, `x0 ≤ x1`, `y0 ≤ y1`).
    pub fn validate(&self) -> Result<(), GeorefError> {
        let values = [self.x0, self.y0, self.x1, self.y1];
        if !values.iter().all(|v| v.is_finite()) {
            return Err(GeorefError::degenerate(format!(
                "Extent enthält NaN/∞: {:?}",
                values
            )));
        }
        if self.x0 > self.x1 || self.y0 > self.y1 {
            return Err(GeorefError::degenerate(format!(
                "Extent nicht geordnet: {:?}",
                values
            )));
        }
        Ok(())
    }

    /// Breite in Karteneinheiten.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Höhe in Karteneinheiten.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Fläche in Karteneinheiten².
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Mittelpunkt.
    pub fn center(&self) -> Point2D {
        DVec2::new((self.x0 + self.x1) * 0.5, (self.y0 + self.y1) * 0.5)
    }

    /// Die vier Ecken in der Reihenfolge (x0,y0), (x0,y1), (x1,y0), (x1,y1).
    pub fn corners(&self) -> [Point2D; 4] {
        [
            DVec2::new(self.x0, self.y0),
            DVec2::new(self.x0, self.y1),
            DVec2::new(self.x1, self.y0),
            DVec2::new(self.x1, self.y1),
        ]
    }

    /// Platziert ein Bild mit `width × height` Pixeln in den sichtbaren Kartenausschnitt.
    ///
    /// Übernimmt `x0`, `y0` und `x1` aus `view` und leitet `y1` aus dem
    /// Seitenverhältnis des Bildes ab: `y1 = y0 + (x1 - x0) / aspect`.
    pub fn fit_to_view(view: &Extent, width: u32, height: u32) -> Result<Self, GeorefError> {
        if width == 0 || height == 0 {
            return Err(GeorefError::degenerate("Bild ohne Pixel"));
        }
        let aspect = width as f64 / height as f64;
        Self::new(view.x0, view.y0, view.x1, view.y0 + view.width() / aspect)
    }

    /// Zentriert ein Bild mit 1 Karteneinheit pro Pixel um `center`.
    pub fn centered_on(center: Point2D, width: u32, height: u32) -> Result<Self, GeorefError> {
        let half = DVec2::new(width as f64, height as f64) * 0.5;
        Self::new(
            center.x - half.x,
            center.y - half.y,
            center.x + half.x,
            center.y + half.y,
        )
    }
}

/// Berechnet den achsenparallelen Extent nach Anwendung von `transform`
/// auf alle vier Ecken von `original`.
///
/// Bei Winkeln ungleich einem Vielfachen von 90° ist das Ergebnis größer als
/// das transformierte Rechteck selbst.
pub fn recompute(
    transform: &SimilarityTransform,
    original: &Extent,
) -> Result<Extent, GeorefError> {
    original.validate()?;
    let mapped = original.corners().map(|corner| transform.apply(corner));
    let extent = Extent::bounding(&mapped)?;
    log::debug!(
        "Extent neu berechnet: ({:.3}, {:.3}, {:.3}, {:.3}) -> ({:.3}, {:.3}, {:.3}, {:.3})",
        original.x0,
        original.y0,
        original.x1,
        original.y1,
        extent.x0,
        extent.y0,
        extent.x1,
        extent.y1
    );
    Ok(extent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::solve;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_new_rejects_unordered_and_non_finite() {
        assert!(Extent::new(1.0, 0.0, 0.0, 1.0).is_err());
        assert!(Extent::new(0.0, 2.0, 1.0, 1.0).is_err());
        assert!(Extent::new(0.0, 0.0, f64::NAN, 1.0).is_err());
        assert!(Extent::new(0.0, 0.0, 1.0, f64::INFINITY).is_err());
        assert!(Extent::new(0.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_recompute_quarter_turn_scenario() {
        let t = solve(
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(100.0, 100.0),
            DVec2::new(100.0, 110.0),
        )
        .unwrap();
        let original = Extent::new(0.0, 0.0, 10.0, 5.0).unwrap();

        let extent = recompute(&t, &original).unwrap();

        assert_abs_diff_eq!(extent.x0, 95.0, epsilon = 1e-9);
        assert_abs_diff_eq!(extent.y0, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(extent.x1, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(extent.y1, 110.0, epsilon = 1e-9);
        assert_abs_diff_eq!(extent.width(), original.height(), epsilon = 1e-9);
        assert_abs_diff_eq!(extent.height(), original.width(), epsilon = 1e-9);
    }

    #[test]
    fn test_recompute_area_never_shrinks() {
        let original = Extent::new(-3.0, 2.0, 17.0, 9.5).unwrap();
        let offset = DVec2::new(250.0, -40.0);

        for step in -24..=24 {
            let angle = step as f64 * 15.0;
            let t = SimilarityTransform::from_parts(1.0, angle, offset).unwrap();
            let extent = recompute(&t, &original).unwrap();

            if step % 6 == 0 {
                // Vielfaches von 90°: Fläche bleibt gleich
                assert_abs_diff_eq!(extent.area(), original.area(), epsilon = 1e-9);
            } else {
                assert!(
                    extent.area() > original.area() + 1e-6,
                    "Winkel {angle}°: Fläche {} nicht größer als {}",
                    extent.area(),
                    original.area()
                );
            }
        }
    }

    #[test]
    fn test_recompute_contains_all_mapped_corners() {
        let original = Extent::new(0.0, 0.0, 40.0, 30.0).unwrap();
        let t = SimilarityTransform::from_parts(2.5, 33.0, DVec2::new(5.0, 5.0)).unwrap();
        let extent = recompute(&t, &original).unwrap();

        for corner in original.corners() {
            let mapped = t.apply(corner);
            assert!(mapped.x >= extent.x0 - 1e-9 && mapped.x <= extent.x1 + 1e-9);
            assert!(mapped.y >= extent.y0 - 1e-9 && mapped.y <= extent.y1 + 1e-9);
        }
    }

    #[test]
    fn test_recompute_rejects_non_finite_extent() {
        let bad = Extent {
            x0: 0.0,
            y0: f64::NAN,
            x1: 1.0,
            y1: 1.0,
        };
        let result = recompute(&SimilarityTransform::identity(), &bad);
        assert!(matches!(result, Err(GeorefError::DegenerateInput(_))));
    }

    #[test]
    fn test_fit_to_view_uses_aspect() {
        let view = Extent::new(1000.0, 2000.0, 1400.0, 2300.0).unwrap();
        let extent = Extent::fit_to_view(&view, 800, 200).unwrap();
        assert_eq!(extent.x0, 1000.0);
        assert_eq!(extent.y0, 2000.0);
        assert_eq!(extent.x1, 1400.0);
        assert_abs_diff_eq!(extent.y1, 2100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_centered_on() {
        let extent = Extent::centered_on(DVec2::new(10.0, 20.0), 4, 2).unwrap();
        assert_eq!(extent, Extent::new(8.0, 19.0, 12.0, 21.0).unwrap());
    }
}

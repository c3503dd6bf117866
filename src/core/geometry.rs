//! Ähnlichkeitstransformation (Rotation + uniforme Skalierung + Translation)
//! aus zwei Korrespondenzpaaren.

use glam::{DAffine2, DMat2, DVec2};

use super::GeorefError;

/// Projizierte Kartenkoordinate (oder bildlokale Koordinate), doppelte Genauigkeit.
pub type Point2D = DVec2;

/// 2D-Ähnlichkeitstransformation ohne Scherung.
///
/// Entspricht der 2×3-Matrix `[[a, -b, tx], [b, a, ty]]` mit
/// `a = scale·cos(angle)` und `b = scale·sin(angle)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityTransform {
    scale: f64,
    angle_deg: f64,
    affine: DAffine2,
}

impl SimilarityTransform {
    /// Baut eine Transformation aus Skalierung, Winkel (Grad) und Translation.
    ///
    /// Die Rotation wird um den Ursprung ausgeführt, danach wird `translation`
    /// addiert.
    pub fn from_parts(
        scale: f64,
        angle_deg: f64,
        translation: Point2D,
    ) -> Result<Self, GeorefError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(GeorefError::degenerate(format!(
                "Skalierung muss endlich und > 0 sein (war {scale})"
            )));
        }
        if !angle_deg.is_finite() || !translation.is_finite() {
            return Err(GeorefError::degenerate("Winkel/Translation nicht endlich"));
        }
        Ok(Self::from_raw_angle(
            scale,
            angle_deg.to_radians(),
            translation,
        ))
    }

    fn from_raw_angle(scale: f64, angle_rad: f64, translation: Point2D) -> Self {
        let a = scale * angle_rad.cos();
        let b = scale * angle_rad.sin();
        // Spaltenweise: (a, b) und (-b, a)
        let linear = DMat2::from_cols(DVec2::new(a, b), DVec2::new(-b, a));
        Self {
            scale,
            angle_deg: normalize_degrees(angle_rad.to_degrees()),
            affine: DAffine2::from_mat2_translation(linear, translation),
        }
    }

    /// Identität (Skalierung 1, Winkel 0, keine Translation).
    pub fn identity() -> Self {
        Self::from_raw_angle(1.0, 0.0, DVec2::ZERO)
    }

    /// Uniformer Skalierungsfaktor (`sqrt(a² + b²)`, immer > 0).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Rotationswinkel in Grad, normalisiert auf `(-180°, 180°]`.
    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    /// Translationsanteil `(tx, ty)`.
    pub fn translation(&self) -> Point2D {
        self.affine.translation
    }

    /// Matrix-Form `[[a, -b, tx], [b, a, ty]]`.
    pub fn matrix(&self) -> [[f64; 3]; 2] {
        let m = self.affine.matrix2;
        let t = self.affine.translation;
        [[m.x_axis.x, m.y_axis.x, t.x], [m.x_axis.y, m.y_axis.y, t.y]]
    }

    /// Wendet die Transformation auf einen Punkt an.
    pub fn apply(&self, point: Point2D) -> Point2D {
        self.affine.transform_point2(point)
    }
}

/// Löst die Ähnlichkeitstransformation für `p1_src ↦ p1_dst`, `p2_src ↦ p2_dst`.
///
/// `p1_src` wird per Konstruktion exakt auf `p1_dst` abgebildet, `p2_src`
/// bis auf Rundungsfehler auf `p2_dst`.
///
/// Fehler: `DegenerateInput` bei zusammenfallenden Punkten eines Paars oder
/// nicht-endlichen Koordinaten.
pub fn solve(
    p1_src: Point2D,
    p2_src: Point2D,
    p1_dst: Point2D,
    p2_dst: Point2D,
) -> Result<SimilarityTransform, GeorefError> {
    if ![p1_src, p2_src, p1_dst, p2_dst]
        .iter()
        .all(|p| p.is_finite())
    {
        return Err(GeorefError::degenerate("Koordinaten nicht endlich"));
    }

    let v_src = p2_src - p1_src;
    let v_dst = p2_dst - p1_dst;

    let len_src = v_src.length();
    let len_dst = v_dst.length();
    if len_src == 0.0 || len_dst == 0.0 {
        return Err(GeorefError::degenerate(
            "Quell- oder Zielpunkte fallen zusammen",
        ));
    }

    // Abstände jenseits des f64-Bereichs laufen zu inf bzw. 0 über
    let scale = len_dst / len_src;
    if !(scale.is_finite() && scale > 0.0) {
        return Err(GeorefError::degenerate(format!(
            "Skalierung nicht darstellbar (Quelle {len_src}, Ziel {len_dst})"
        )));
    }
    let angle = v_dst.y.atan2(v_dst.x) - v_src.y.atan2(v_src.x);
    let a = scale * angle.cos();
    let b = scale * angle.sin();

    let translation = DVec2::new(
        p1_dst.x - a * p1_src.x + b * p1_src.y,
        p1_dst.y - b * p1_src.x - a * p1_src.y,
    );

    if !translation.is_finite() {
        return Err(GeorefError::degenerate("Translation nicht endlich"));
    }

    let transform = SimilarityTransform::from_raw_angle(scale, angle, translation);
    log::debug!(
        "Ähnlichkeitstransformation: Skalierung {:.6}, Winkel {:.4}°, Translation ({:.3}, {:.3})",
        transform.scale(),
        transform.angle_deg(),
        translation.x,
        translation.y
    );
    Ok(transform)
}

/// Normalisiert einen Winkel in Grad auf `(-180°, 180°]`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r <= -180.0 {
        r + 360.0
    } else if r > 180.0 {
        r - 360.0
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2D {
        DVec2::new(x, y)
    }

    #[test]
    fn test_solve_maps_both_pairs() {
        let cases = [
            (p(0.0, 0.0), p(10.0, 0.0), p(100.0, 100.0), p(100.0, 110.0)),
            (p(3.5, -2.0), p(-7.0, 11.0), p(1.68e6, 6.13e6), p(1.6801e6, 6.1302e6)),
            (p(1.0, 1.0), p(2.0, 1.0), p(-5.0, 4.0), p(-9.0, 4.0)),
            (p(-20.0, 7.0), p(-20.0, 7.5), p(0.25, 0.5), p(0.0, 0.0)),
        ];

        for (s1, s2, d1, d2) in cases {
            let t = solve(s1, s2, d1, d2).expect("Transformation erwartet");
            let mapped1 = t.apply(s1);
            let mapped2 = t.apply(s2);
            let tol = 1e-9 * (1.0 + d2.abs().max_element());
            assert_abs_diff_eq!(mapped1.x, d1.x, epsilon = tol);
            assert_abs_diff_eq!(mapped1.y, d1.y, epsilon = tol);
            assert_abs_diff_eq!(mapped2.x, d2.x, epsilon = tol);
            assert_abs_diff_eq!(mapped2.y, d2.y, epsilon = tol);

            let expected_scale = (d2 - d1).length() / (s2 - s1).length();
            assert_abs_diff_eq!(t.scale(), expected_scale, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_solve_quarter_turn() {
        let t = solve(p(0.0, 0.0), p(10.0, 0.0), p(100.0, 100.0), p(100.0, 110.0)).unwrap();
        assert_abs_diff_eq!(t.angle_deg(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t.scale(), 1.0, epsilon = 1e-12);
        let m = t.matrix();
        assert_abs_diff_eq!(m[0][0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m[0][1], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m[1][0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m[0][2], 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m[1][2], 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_solve_rejects_coincident_points() {
        let q = p(4.0, 2.0);
        for r in [p(0.0, 0.0), p(1.0, -1.0), p(4.0, 2.0)] {
            let src_degenerate = solve(q, q, p(0.0, 0.0), r);
            assert!(matches!(src_degenerate, Err(GeorefError::DegenerateInput(_))));

            let dst_degenerate = solve(p(0.0, 0.0), r + p(1.0, 0.0), q, q);
            assert!(matches!(dst_degenerate, Err(GeorefError::DegenerateInput(_))));
        }
    }

    #[test]
    fn test_solve_rejects_non_finite() {
        let result = solve(p(f64::NAN, 0.0), p(1.0, 0.0), p(0.0, 0.0), p(0.0, 1.0));
        assert!(matches!(result, Err(GeorefError::DegenerateInput(_))));
    }

    #[test]
    fn test_solve_rejects_overflowing_scale() {
        // Quellabstand läuft zu inf über, Skalierung wäre 0
        let vanishing = solve(p(0.0, 0.0), p(1e200, 1e200), p(0.0, 0.0), p(1.0, 0.0));
        assert!(matches!(vanishing, Err(GeorefError::DegenerateInput(_))));

        let exploding = solve(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0), p(1e200, 1e200));
        assert!(matches!(exploding, Err(GeorefError::DegenerateInput(_))));

        let both = solve(p(0.0, 0.0), p(1e200, 1e200), p(0.0, 0.0), p(-1e200, 1e200));
        assert!(matches!(both, Err(GeorefError::DegenerateInput(_))));
    }

    #[test]
    fn test_angle_reported_in_half_open_range() {
        // atan2-Differenz ergibt hier -270°, gemeldet wird +90°
        let t = solve(p(0.0, 0.0), p(-1.0, 0.0), p(0.0, 0.0), p(0.0, -1.0)).unwrap();
        assert_abs_diff_eq!(t.angle_deg(), 90.0, epsilon = 1e-9);

        let half_turn = solve(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0), p(-1.0, 0.0)).unwrap();
        assert_abs_diff_eq!(half_turn.angle_deg(), 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-180.0), 180.0);
        assert_eq!(normalize_degrees(180.0), 180.0);
        assert_eq!(normalize_degrees(270.0), -90.0);
        assert_eq!(normalize_degrees(-450.0), -90.0);
        assert_eq!(normalize_degrees(0.0), 0.0);
    }

    #[test]
    fn test_from_parts_rejects_invalid_scale() {
        assert!(SimilarityTransform::from_parts(0.0, 10.0, DVec2::ZERO).is_err());
        assert!(SimilarityTransform::from_parts(-1.0, 10.0, DVec2::ZERO).is_err());
        assert!(SimilarityTransform::from_parts(1.0, f64::INFINITY, DVec2::ZERO).is_err());
        assert!(SimilarityTransform::from_parts(2.0, 45.0, DVec2::new(1.0, 2.0)).is_ok());
    }
}

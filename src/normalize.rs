/*
 * The $P Point-Cloud Recognizer (rust version)
 *
 * Original authors:
 * 
 * 	    Radu-Daniel Vatavu, Ph.D.
 *	    University Stefan cel Mare of Suceava
 *	    Suceava 720229, Romania
 *	    vatavu@eed.usv.ro
 *
 *	    Lisa Anthony, Ph.D.
 *      UMBC
 *      Information Systems Department
 *      1000 Hilltop Circle
 *      Baltimore, MD 21250
 *      lanthony@umbc.edu
 *
 *	    Jacob O. Wobbrock, Ph.D.
 * 	    The Information School
 *	    University of Washington
 *	    Seattle, WA 98195-2840
 *	    wobbrock@uw.edu
 *
 * The academic publication for the $P recognizer, and what should be 
 * used to cite it, is:
 *
 *	Vatavu, R.-D., Anthony, L. and Wobbrock, J.O. (2012).  
 *	  Gestures as point clouds: A $P recognizer for user interface 
 *	  prototypes. Proceedings of the ACM Int'l Conference on  
 *	  Multimodal Interfaces (ICMI '12). Santa Monica, California  
 *	  (October 22-26, 2012). New York: ACM Press, pp. 273-280.
 *
 * This software is distributed under the "New BSD License" agreement:
 *
 * Copyright (c) 2012, Radu-Daniel Vatavu, Lisa Anthony, and 
 * Jacob O. Wobbrock. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without
 * modification, are permitted provided that the following conditions are met:
 *    * Redistributions of source code must retain the above copyright
 *      notice, this list of conditions and the following disclaimer.
 *    * Redistributions in binary form must reproduce the above copyright
 *      notice, this list of conditions and the following disclaimer in the
 *      documentation and/or other materials provided with the distribution.
 *    * Neither the names of the University Stefan cel Mare of Suceava, 
 *	    University of Washington, nor UMBC, nor the names of its contributors 
 *	    may be used to endorse or promote products derived from this software 
 *	    without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS
 * IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO,
 * THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR
 * PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL Radu-Daniel Vatavu OR Lisa Anthony
 * OR Jacob O. Wobbrock OR Ferran Pujol Camins BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, 
 * EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT 
 * OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS 
 * INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, 
 * STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY
 * OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF
 * SUCH DAMAGE.
**/

//! Gesture normalization: resampling, scaling with shape preservation and
//! translation of the centroid.

use crate::{
    config::RecognizerConfig,
    error::RecognizerError,
    geometry::{self, require_points, BoundingBox},
    point::Point,
};

/// Normalizes a gesture path.
///
/// Standard $-family processing: optionally resample into
/// `config.num_points` points, then scale into [0..1]x[0..1] and translate
/// the centroid to `config.origin`. Templates and candidates both go through
/// here, so their point counts always agree when resampling is on.
pub fn normalize(
    points: &[Point],
    resample_points: bool,
    config: &RecognizerConfig,
) -> Result<Vec<Point>, RecognizerError> {
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(RecognizerError::NonFiniteCoordinate { index });
    }
    let points = if resample_points {
        resample(points, config.num_points)?
    } else {
        points.to_vec()
    };
    let points = scale(&points)?;
    translate_to(&points, &config.origin)
}

/// Resamples the array of points into n points equally distanced along each stroke.
///
/// Interpolated points take the stroke id of the point that follows them.
pub fn resample(points: &[Point], n: usize) -> Result<Vec<Point>, RecognizerError> {
    if n < 2 {
        return Err(RecognizerError::InvalidConfig(format!(
            "cannot resample into {n} point(s)"
        )));
    }
    require_points(points, 2)?;

    let interval = geometry::path_length(points)? / (n - 1) as f64;
    if interval == 0.0 {
        return Err(RecognizerError::DegenerateGeometry(
            "gesture path has zero length",
        ));
    }
    if !interval.is_finite() {
        return Err(RecognizerError::DegenerateGeometry(
            "gesture path length overflows",
        ));
    }

    // interpolated points are inserted here so the next segment starts from them
    let mut src = points.to_vec();
    let mut new_points = Vec::with_capacity(n);
    new_points.push(src[0]);
    let mut d = 0.0;

    let mut i = 1;
    while i < src.len() {
        let (prev, cur) = (src[i - 1], src[i]);
        if prev.stroke_id == cur.stroke_id {
            let dist = geometry::euclidean_distance(&prev, &cur);
            if d + dist >= interval {
                // d < interval here, so dist > 0
                let t = (interval - d) / dist;
                let q = Point::new(
                    prev.x + t * (cur.x - prev.x),
                    prev.y + t * (cur.y - prev.y),
                    cur.stroke_id,
                );
                // a full interval that rounds back onto prev never advances the walk
                if d == 0.0 && q.x == prev.x && q.y == prev.y {
                    return Err(RecognizerError::DegenerateGeometry(
                        "resampling interval is below coordinate precision",
                    ));
                }
                new_points.push(q);
                if new_points.len() == n {
                    break;
                }
                src.insert(i, q);
                d = 0.0;
            } else {
                d += dist;
            }
        }
        i += 1;
    }

    // sometimes we fall a rounding-error short of adding the last point
    let last = src[src.len() - 1];
    while new_points.len() < n {
        new_points.push(last);
    }
    new_points.truncate(n);
    Ok(new_points)
}

/// Performs scale normalization with shape preservation into [0..1]x[0..1]
pub fn scale(points: &[Point]) -> Result<Vec<Point>, RecognizerError> {
    let b = BoundingBox::of(points)?;
    let size = b.width().max(b.height());
    if size == 0.0 {
        return Err(RecognizerError::DegenerateGeometry("all points coincide"));
    }
    if !size.is_finite() {
        return Err(RecognizerError::DegenerateGeometry("gesture extent overflows"));
    }
    Ok(points
        .iter()
        .map(|p| Point::new((p.x - b.min_x) / size, (p.y - b.min_y) / size, p.stroke_id))
        .collect())
}

/// Translates the points so that their centroid lands on `target`
pub fn translate_to(points: &[Point], target: &Point) -> Result<Vec<Point>, RecognizerError> {
    let c = geometry::centroid(points)?;
    Ok(points
        .iter()
        .map(|p| Point::new(p.x + target.x - c.x, p.y + target.y - c.y, p.stroke_id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn zigzag() -> Vec<Point> {
        vec![
            Point::new(10.0, 10.0, 0),
            Point::new(40.0, 80.0, 0),
            Point::new(55.0, 12.0, 0),
            Point::new(90.0, 75.0, 0),
            Point::new(20.0, 50.0, 1),
            Point::new(80.0, 52.0, 1),
        ]
    }

    #[test]
    fn resample_returns_exactly_n_points() {
        let inputs = [
            zigzag(),
            vec![Point::new(0.0, 0.0, 0), Point::new(1.0, 0.0, 0)],
            vec![
                Point::new(0.0, 0.0, 0),
                Point::new(0.0, 0.0, 0),
                Point::new(0.3, 0.1, 0),
                Point::new(7.0, 3.0, 0),
            ],
        ];
        for points in &inputs {
            for n in [2, 3, 7, 32, 64, 100] {
                assert_eq!(resample(points, n).unwrap().len(), n, "n = {n}");
            }
        }
    }

    #[test]
    fn resample_spaces_points_evenly() {
        let line = [Point::new(0.0, 0.0, 0), Point::new(10.0, 0.0, 0)];
        let resampled = resample(&line, 11).unwrap();
        for (i, p) in resampled.iter().enumerate() {
            assert!((p.x - i as f64).abs() < EPS, "{p:?}");
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn resample_never_interpolates_across_strokes() {
        // two parallel horizontal strokes, y = 0 and y = 5
        let points = [
            Point::new(0.0, 0.0, 0),
            Point::new(4.0, 0.0, 0),
            Point::new(0.0, 5.0, 1),
            Point::new(4.0, 5.0, 1),
        ];
        let resampled = resample(&points, 9).unwrap();
        for p in &resampled {
            match p.stroke_id {
                0 => assert!(p.y.abs() < EPS),
                1 => assert!((p.y - 5.0).abs() < EPS),
                other => panic!("unexpected stroke {other}"),
            }
        }
    }

    #[test]
    fn resample_rejects_bad_input() {
        assert_eq!(
            resample(&[Point::new(1.0, 1.0, 0)], 32),
            Err(RecognizerError::InvalidInput { required: 2, actual: 1 })
        );
        assert!(matches!(resample(&zigzag(), 1), Err(RecognizerError::InvalidConfig(_))));
        // two taps: no path to walk along
        let taps = [Point::new(0.0, 0.0, 0), Point::new(5.0, 5.0, 1)];
        assert!(matches!(resample(&taps, 32), Err(RecognizerError::DegenerateGeometry(_))));
    }

    #[test]
    fn resample_rejects_intervals_below_precision() {
        let next_up = f64::from_bits(1e20f64.to_bits() + 1);
        let inputs = [
            [Point::new(1e20, 0.0, 0), Point::new(next_up, 0.0, 0)],
            [Point::new(1000.0, 0.0, 0), Point::new(1000.0 + 1e-12, 0.0, 0)],
        ];
        for points in &inputs {
            assert!(
                matches!(resample(points, 32), Err(RecognizerError::DegenerateGeometry(_))),
                "{points:?}"
            );
        }
    }

    #[test]
    fn overflowing_extent_is_degenerate() {
        let huge = [Point::new(-1e308, 0.0, 0), Point::new(1e308, 0.0, 0)];
        assert!(matches!(resample(&huge, 32), Err(RecognizerError::DegenerateGeometry(_))));
        assert!(matches!(scale(&huge), Err(RecognizerError::DegenerateGeometry(_))));
        for resample_points in [true, false] {
            assert!(matches!(
                normalize(&huge, resample_points, &RecognizerConfig::default()),
                Err(RecognizerError::DegenerateGeometry(_))
            ));
        }
    }

    #[test]
    fn scale_preserves_aspect_ratio() {
        let rect = [
            Point::new(10.0, 10.0, 0),
            Point::new(30.0, 10.0, 0),
            Point::new(30.0, 20.0, 0),
        ];
        let scaled = scale(&rect).unwrap();
        assert_eq!(scaled[0], Point::new(0.0, 0.0, 0));
        assert_eq!(scaled[1], Point::new(1.0, 0.0, 0));
        assert_eq!(scaled[2], Point::new(1.0, 0.5, 0));
    }

    #[test]
    fn scale_rejects_coincident_points() {
        let dot = [Point::new(3.0, 3.0, 0), Point::new(3.0, 3.0, 0)];
        assert!(matches!(scale(&dot), Err(RecognizerError::DegenerateGeometry(_))));
    }

    #[test]
    fn translate_moves_centroid_to_target() {
        let target = Point::new(-2.0, 7.5, 0);
        let moved = translate_to(&zigzag(), &target).unwrap();
        let c = geometry::centroid(&moved).unwrap();
        assert!((c.x - target.x).abs() < EPS);
        assert!((c.y - target.y).abs() < EPS);
        assert!(moved.iter().zip(zigzag()).all(|(a, b)| a.stroke_id == b.stroke_id));
    }

    #[test]
    fn normalize_centers_unit_scaled_cloud() {
        let config = RecognizerConfig::default();
        let normalized = normalize(&zigzag(), true, &config).unwrap();
        assert_eq!(normalized.len(), config.num_points);

        let c = geometry::centroid(&normalized).unwrap();
        assert!(c.x.abs() < EPS && c.y.abs() < EPS);
        let b = BoundingBox::of(&normalized).unwrap();
        assert!((b.width().max(b.height()) - 1.0).abs() < EPS);
    }

    #[test]
    fn normalize_without_resampling_is_idempotent() {
        let config = RecognizerConfig::default();
        let once = normalize(&zigzag(), false, &config).unwrap();
        let twice = normalize(&once, false, &config).unwrap();
        assert_eq!(once.len(), zigzag().len());
        for (a, b) in once.iter().zip(&twice) {
            assert!((a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS);
        }
    }

    #[test]
    fn normalize_rejects_non_finite_points() {
        let mut points = zigzag();
        points[3].y = f64::NAN;
        assert_eq!(
            normalize(&points, true, &RecognizerConfig::default()),
            Err(RecognizerError::NonFiniteCoordinate { index: 3 })
        );
    }
}

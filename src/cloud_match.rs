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

use crate::{config::RecognizerConfig, geometry, point::Point};

/// Implements greedy search for a minimum-distance matching between two point clouds.
///
/// Only every `config.step(n)`-th start index is tried, in both matching
/// directions. Clouds with different point counts can't be matched and are
/// infinitely far apart.
pub fn greedy_cloud_match(points1: &[Point], points2: &[Point], config: &RecognizerConfig) -> f64 {
    // the two clouds should have the same number of points by now
    if points1.len() != points2.len() {
        return f64::INFINITY;
    }
    let n = points1.len();
    let step = config.step(n);

    let mut min_distance = f64::INFINITY;
    for i in (0..n).step_by(step) {
        // match points1 --> points2 starting with index point i
        let d1 = cloud_distance(points1, points2, i);
        // match points2 --> points1 starting with index point i
        let d2 = cloud_distance(points2, points1, i);
        min_distance = min_distance.min(d1.min(d2));
    }
    min_distance
}

/// Computes the distance between two point clouds by performing a minimum-distance greedy matching
/// starting with point `start_index`.
///
/// Each point of the first cloud, visited cyclically from `start_index`, takes
/// the nearest unmatched point of the second cloud (lowest index on ties). The
/// k-th match is weighted by `1 - k/n`.
pub(crate) fn cloud_distance(points1: &[Point], points2: &[Point], start_index: usize) -> f64 {
    debug_assert_eq!(points1.len(), points2.len());
    let n = points1.len();
    if n == 0 {
        return 0.0;
    }
    // matched[j] signals whether point j from the 2nd cloud has been already matched
    let mut matched = vec![false; n];
    let mut sum = 0.0;
    let mut i = start_index % n;
    for k in 0..n {
        let mut index = 0;
        let mut min_dist = f64::INFINITY;
        for (j, p) in points2.iter().enumerate() {
            if !matched[j] {
                let dist = geometry::euclidean_distance(&points1[i], p);
                if dist < min_dist {
                    min_dist = dist;
                    index = j;
                }
            }
        }
        matched[index] = true;
        let weight = 1.0 - k as f64 / n as f64;
        sum += weight * min_dist;
        i = (i + 1) % n;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn star() -> Vec<Point> {
        vec![
            Point::new(50.0, 0.0, 0),
            Point::new(62.0, 38.0, 0),
            Point::new(100.0, 38.0, 0),
            Point::new(69.0, 61.0, 0),
            Point::new(81.0, 100.0, 0),
            Point::new(50.0, 76.0, 0),
            Point::new(19.0, 100.0, 0),
            Point::new(31.0, 61.0, 0),
            Point::new(0.0, 38.0, 0),
            Point::new(38.0, 38.0, 0),
            Point::new(50.0, 0.0, 0),
        ]
    }

    fn normalized(points: &[Point]) -> Vec<Point> {
        normalize(points, true, &RecognizerConfig::default()).unwrap()
    }

    #[test]
    fn cloud_matched_against_itself_is_zero() {
        let cloud = normalized(&star());
        assert_eq!(cloud_distance(&cloud, &cloud, 0), 0.0);
        assert_eq!(cloud_distance(&cloud, &cloud, 17), 0.0);
        assert_eq!(greedy_cloud_match(&cloud, &cloud, &RecognizerConfig::default()), 0.0);
    }

    #[test]
    fn matching_ignores_point_order() {
        let cloud = normalized(&star());
        let mut shuffled = cloud.clone();
        shuffled.reverse();
        shuffled.rotate_left(5);
        assert_eq!(cloud_distance(&cloud, &shuffled, 0), 0.0);
    }

    #[test]
    fn weights_decrease_along_the_walk() {
        // every point sits exactly 1 away from its only counterpart
        let a = [Point::new(0.0, 0.0, 0), Point::new(10.0, 0.0, 0)];
        let b = [Point::new(0.0, 1.0, 0), Point::new(10.0, 1.0, 0)];
        // 1 * 1.0 + 1 * 0.5
        assert_eq!(cloud_distance(&a, &b, 0), 1.5);
        assert_eq!(cloud_distance(&a, &b, 1), 1.5);
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        let a = [Point::new(0.0, 0.0, 0), Point::new(0.0, 5.0, 0)];
        // both candidates are 1 away from a[0]; a[0] must take b[0], leaving
        // b[1] at distance 4 for a[1]
        let b = [Point::new(-1.0, 0.0, 0), Point::new(1.0, 0.0, 0)];
        let expected = 1.0 + 0.5 * (1.0f64 + 25.0).sqrt();
        assert!((cloud_distance(&a, &b, 0) - expected).abs() < 1e-12);
    }

    #[test]
    fn clouds_of_different_sizes_never_match() {
        let config = RecognizerConfig::default();
        let a = normalized(&star());
        let shorter = &a[..a.len() - 1];
        assert_eq!(greedy_cloud_match(&a, shorter, &config), f64::INFINITY);
        assert_eq!(greedy_cloud_match(shorter, &a, &config), f64::INFINITY);
        assert_eq!(crate::point_cloud_recognizer::score(f64::INFINITY), 0.0);
    }

    #[test]
    fn greedy_match_takes_the_best_direction_and_start() {
        let config = RecognizerConfig { epsilon: 1.0, ..Default::default() };
        let a = normalized(&star());
        let line = normalized(&[Point::new(0.0, 0.0, 0), Point::new(100.0, 0.0, 0)]);
        let best = greedy_cloud_match(&a, &line, &config);
        for start in 0..a.len() {
            assert!(best <= cloud_distance(&a, &line, start));
            assert!(best <= cloud_distance(&line, &a, start));
        }
        assert!(best > 0.0);
    }

    #[test]
    fn coarser_search_never_beats_exhaustive() {
        let a = normalized(&star());
        let b = normalized(&[
            Point::new(0.0, 0.0, 0),
            Point::new(100.0, 100.0, 0),
            Point::new(100.0, 0.0, 1),
            Point::new(0.0, 100.0, 1),
        ]);
        let exhaustive = greedy_cloud_match(&a, &b, &RecognizerConfig { epsilon: 1.0, ..Default::default() });
        let coarse = greedy_cloud_match(&a, &b, &RecognizerConfig::default());
        assert!(exhaustive <= coarse);
    }
}

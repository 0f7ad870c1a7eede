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

use crate::{error::RecognizerError, point::Point};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// Default number of points on the gesture path
pub const NUM_POINTS: usize = 32;
/// Default greedy search trade-off, in [0..1]
pub const EPSILON: f64 = 0.5;
/// Default translation target
pub const ORIGIN: Point = Point::new(0.0, 0.0, 0);

/// Parameters shared by template registration and recognition.
/// Templates and candidates must be normalized with the same values,
/// so a `Recognizer` owns exactly one of these.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecognizerConfig {
    /// Number of points every gesture is resampled to
    pub num_points: usize,
    /// Controls the number of greedy search trials. The matcher tries every
    /// `floor(n^(1-epsilon))`-th start index: 1 tries all of them, 0 only
    /// the first one.
    pub epsilon: f64,
    /// Point the centroid of every normalized gesture is moved to
    pub origin: Point,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        RecognizerConfig {
            num_points: NUM_POINTS,
            epsilon: EPSILON,
            origin: ORIGIN,
        }
    }
}

impl RecognizerConfig {
    pub fn validate(&self) -> Result<(), RecognizerError> {
        if self.num_points < 2 {
            return Err(RecognizerError::InvalidConfig(format!(
                "num_points must be at least 2, got {}",
                self.num_points
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(RecognizerError::InvalidConfig(format!(
                "epsilon must be in [0, 1], got {}",
                self.epsilon
            )));
        }
        if !self.origin.is_finite() {
            return Err(RecognizerError::InvalidConfig(
                "origin must have finite coordinates".into(),
            ));
        }
        Ok(())
    }

    /// Distance between two greedy search start indexes for clouds of `n` points
    pub fn step(&self, n: usize) -> usize {
        ((n as f64).powf(1.0 - self.epsilon).floor() as usize).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = RecognizerConfig::default();
        assert_eq!(config.num_points, 32);
        assert_eq!(config.epsilon, 0.5);
        assert_eq!(config.origin, Point::new(0.0, 0.0, 0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let too_few = RecognizerConfig { num_points: 1, ..Default::default() };
        assert!(matches!(too_few.validate(), Err(RecognizerError::InvalidConfig(_))));

        let bad_epsilon = RecognizerConfig { epsilon: 1.5, ..Default::default() };
        assert!(matches!(bad_epsilon.validate(), Err(RecognizerError::InvalidConfig(_))));

        let nan_epsilon = RecognizerConfig { epsilon: f64::NAN, ..Default::default() };
        assert!(nan_epsilon.validate().is_err());

        let bad_origin = RecognizerConfig {
            origin: Point::new(f64::INFINITY, 0.0, 0),
            ..Default::default()
        };
        assert!(bad_origin.validate().is_err());
    }

    #[test]
    fn step_follows_epsilon() {
        let config = RecognizerConfig::default();
        assert_eq!(config.step(32), 5);
        assert_eq!(config.step(64), 8);

        let exhaustive = RecognizerConfig { epsilon: 1.0, ..Default::default() };
        assert_eq!(exhaustive.step(32), 1);

        let single = RecognizerConfig { epsilon: 0.0, ..Default::default() };
        assert_eq!(single.step(32), 32);
        assert_eq!(single.step(0), 1);
    }
}

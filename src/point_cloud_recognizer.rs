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

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace};

use crate::{
    cloud_match::greedy_cloud_match,
    config::RecognizerConfig,
    error::RecognizerError,
    gesture::{PointCloud, RawTemplate},
    normalize::normalize,
    point::Point,
};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// The $P distance between two normalized clouds at which the score drops to 0
const MAX_DISTANCE: f64 = 2.0;

/// Outcome of matching a candidate gesture against a template set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecognitionResult {
    /// Class of the matched template, `None` when there are no templates
    pub name: Option<String>,
    /// Match confidence in [0..1]
    pub score: f64,
}

impl RecognitionResult {
    /// The result reported when nothing can be matched
    pub fn no_match() -> Self {
        RecognitionResult {
            name: None,
            score: 0.0,
        }
    }

    fn from_distance(name: &str, distance: f64) -> Self {
        RecognitionResult {
            name: Some(name.to_owned()),
            score: score(distance),
        }
    }
}

/// Maps a cloud distance in [0..2] to a score in [1..0].
/// Distances beyond 2 score 0.
pub fn score(distance: f64) -> f64 {
    ((distance - MAX_DISTANCE) / -MAX_DISTANCE).clamp(0.0, 1.0)
}

/// The $P recognizer: a set of normalized point-cloud templates that
/// candidate gestures are classified against.
///
/// Recognition only reads the template list, so a shared `&Recognizer` can
/// be used from several threads; adding or removing templates needs `&mut`.
#[derive(Debug, Clone, Default)]
pub struct Recognizer {
    config: RecognizerConfig,
    templates: Vec<PointCloud>,
}

impl Recognizer {
    /// Builds a recognizer with the default configuration
    pub fn new(templates: impl IntoIterator<Item = RawTemplate>) -> Result<Self, RecognizerError> {
        Self::with_config(RecognizerConfig::default(), templates)
    }

    pub fn with_config(
        config: RecognizerConfig,
        templates: impl IntoIterator<Item = RawTemplate>,
    ) -> Result<Self, RecognizerError> {
        config.validate()?;
        let mut recognizer = Recognizer {
            config,
            templates: Vec::new(),
        };
        for template in templates {
            recognizer.add_template(template.name, &template.points)?;
        }
        Ok(recognizer)
    }

    /// Normalizes `points` and registers them as a template of class `name`.
    /// Returns the number of templates held afterwards.
    pub fn add_template(
        &mut self,
        name: impl Into<String>,
        points: &[Point],
    ) -> Result<usize, RecognizerError> {
        let name = name.into();
        let cloud = PointCloud::new(name, points, &self.config).inspect_err(|e| {
            debug!(error = %e, "rejected gesture template");
        })?;
        debug!(name = cloud.name(), raw_points = points.len(), "registered gesture template");
        self.templates.push(cloud);
        Ok(self.templates.len())
    }

    /// Removes every template of class `name`, returning how many were dropped
    pub fn remove_templates(&mut self, name: &str) -> usize {
        let before = self.templates.len();
        self.templates.retain(|t| t.name() != name);
        let removed = before - self.templates.len();
        debug!(name, removed, "removed gesture templates");
        removed
    }

    pub fn templates(&self) -> &[PointCloud] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Classifies a candidate gesture against the template set.
    /// Returns the closest template and its score, or a no-match result when
    /// no templates are registered.
    pub fn recognize(&self, points: &[Point]) -> Result<RecognitionResult, RecognizerError> {
        self.recognize_inner(points, None)
    }

    /// Like [`Recognizer::recognize`], but gives up with
    /// [`RecognizerError::Cancelled`] once `cancel` is set. The flag is
    /// checked before each template.
    pub fn recognize_cancellable(
        &self,
        points: &[Point],
        cancel: &AtomicBool,
    ) -> Result<RecognitionResult, RecognizerError> {
        self.recognize_inner(points, Some(cancel))
    }

    /// Scores a candidate gesture against every template.
    /// Results are sorted from the closest match to the farthest.
    pub fn rank(&self, points: &[Point]) -> Result<Vec<RecognitionResult>, RecognizerError> {
        self.rank_inner(points, None)
    }

    /// Like [`Recognizer::rank`], but gives up with
    /// [`RecognizerError::Cancelled`] once `cancel` is set.
    pub fn rank_cancellable(
        &self,
        points: &[Point],
        cancel: &AtomicBool,
    ) -> Result<Vec<RecognitionResult>, RecognizerError> {
        self.rank_inner(points, Some(cancel))
    }

    fn recognize_inner(
        &self,
        points: &[Point],
        cancel: Option<&AtomicBool>,
    ) -> Result<RecognitionResult, RecognizerError> {
        let candidate = normalize(points, true, &self.config)?;

        let mut best: Option<(&PointCloud, f64)> = None;
        for (template, dist) in self.distances(&candidate, cancel) {
            let dist = dist?;
            if best.map_or(true, |(_, b)| dist < b) {
                best = Some((template, dist));
            }
        }

        let result = match best {
            Some((template, dist)) => RecognitionResult::from_distance(template.name(), dist),
            None => RecognitionResult::no_match(),
        };
        debug!(name = ?result.name, score = result.score, "recognized gesture");
        Ok(result)
    }

    fn rank_inner(
        &self,
        points: &[Point],
        cancel: Option<&AtomicBool>,
    ) -> Result<Vec<RecognitionResult>, RecognizerError> {
        let candidate = normalize(points, true, &self.config)?;

        let mut matches = self
            .distances(&candidate, cancel)
            .map(|(template, dist)| dist.map(|d| RecognitionResult::from_distance(template.name(), d)))
            .collect::<Result<Vec<_>, RecognizerError>>()?;
        // stable, so equal scores keep template order
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(matches)
    }

    /// Greedy cloud distance from `candidate` to every template, in template order
    fn distances<'a>(
        &'a self,
        candidate: &'a [Point],
        cancel: Option<&'a AtomicBool>,
    ) -> impl Iterator<Item = (&'a PointCloud, Result<f64, RecognizerError>)> + 'a {
        self.templates.iter().map(move |template| {
            if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
                return (template, Err(RecognizerError::Cancelled));
            }
            let dist = greedy_cloud_match(candidate, template.points(), &self.config);
            trace!(name = template.name(), dist, "matched template");
            (template, Ok(dist))
        })
    }
}

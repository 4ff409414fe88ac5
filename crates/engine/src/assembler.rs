//! # Recommendation Assembler
//!
//! The public entry point. Coordinates the extraction chain:
//! 1. JSON block source; when it yields records they are used directly
//! 2. Otherwise chunk source → filters → region resolver → backfill
//! 3. If nothing survives, the configured fallback destination table
//! 4. Final guard: dedup, no self-referencing activities, activity cap,
//!    truncation
//!
//! No stage fails the call on malformed text; each soft miss degrades to
//! the next tier and is only visible in logs and in `used_fallback`.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use gazetteer::Gazetteer;
use pipeline::filters::{DuplicatePlaceFilter, GenericTextFilter, SelfReferenceFilter, mentions_place};
use pipeline::{Backfill, FilterPipeline, RegionResolver};
use serde_json::Value;
use sources::{Candidate, ChunkSource, JsonBlockSource, RequestContext};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::recommendation::{ExtractionResult, ExtractionStrategy, Recommendation};
use crate::request::ExtractionRequest;

/// Turns generator text into a bounded recommendation list.
///
/// Cheap to clone: all heavy state is behind `Arc`, and nothing is mutated
/// during extraction, so clones can serve requests on any thread.
#[derive(Clone)]
pub struct RecommendationAssembler {
    config: Arc<EngineConfig>,
    json_source: JsonBlockSource,
    chunk_source: Arc<ChunkSource>,
    filter_pipeline: Arc<FilterPipeline>,
    resolver: RegionResolver,
    backfill: Backfill,
}

impl RecommendationAssembler {
    /// Create an assembler over a shared gazetteer.
    ///
    /// Fails only if `config` doesn't validate.
    pub fn new(gazetteer: Arc<Gazetteer>, config: EngineConfig) -> Result<Self> {
        config.validate().map_err(|reason| EngineError::Config {
            path: "<in-memory>".to_string(),
            reason,
        })?;

        let filter_pipeline = Arc::new(
            FilterPipeline::new()
                .add_filter(GenericTextFilter::new())
                .add_filter(DuplicatePlaceFilter)
                .add_filter(SelfReferenceFilter),
        );
        let resolver = RegionResolver::new(gazetteer)
            .with_context_radius(config.context_radius)
            .with_category_regions(config.category_regions.clone())
            .with_default_region(config.default_region.clone());
        let backfill = Backfill::new(
            config.vibe_activities.clone(),
            config.generic_activities.clone(),
            config.rationale_template.clone(),
        );

        Ok(Self {
            config: Arc::new(config),
            json_source: JsonBlockSource::new(),
            chunk_source: Arc::new(ChunkSource::new()),
            filter_pipeline,
            resolver,
            backfill,
        })
    }

    /// Built-in gazetteer and default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(Arc::new(Gazetteer::builtin()?), EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        self.resolver.gazetteer()
    }

    /// Main entry point.
    ///
    /// # Arguments
    /// * `raw_text` - Generator output; may be empty
    /// * `location_hint` - The user's declared area, if any
    /// * `preference_tags` - Requested vibes, used only for synthesized text
    ///
    /// # Returns
    /// 1 to `max_recommendations` recommendations
    pub fn extract<S: AsRef<str>>(
        &self,
        raw_text: &str,
        location_hint: Option<&str>,
        preference_tags: &[S],
    ) -> ExtractionResult {
        let context = RequestContext::new(raw_text)
            .with_location(location_hint)
            .with_tags(preference_tags);
        self.extract_context(&context)
    }

    pub fn extract_request(&self, request: &ExtractionRequest) -> ExtractionResult {
        self.extract(
            &request.raw_text,
            request.location.as_deref(),
            &request.preference_tags,
        )
    }

    /// Extract from an untyped JSON request.
    ///
    /// The only error is `EngineError::InvalidInput`, for a request whose
    /// raw text is missing or not a string.
    pub fn extract_value(&self, value: &Value) -> Result<ExtractionResult> {
        let request = ExtractionRequest::from_value(value)?;
        Ok(self.extract_request(&request))
    }

    pub fn extract_context(&self, context: &RequestContext) -> ExtractionResult {
        let start_time = Instant::now();

        let (recommendations, used_fallback, strategy) = match self.json_source.get_candidates(context) {
            Some(candidates) => {
                let (recommendations, synthesized) = self.from_json(candidates, context);
                (recommendations, synthesized, ExtractionStrategy::JsonBlock)
            }
            None => match self.from_chunks(context) {
                Some((recommendations, synthesized)) => {
                    (recommendations, synthesized, ExtractionStrategy::Chunks)
                }
                None => (self.from_fallback_table(context), true, ExtractionStrategy::FallbackTable),
            },
        };

        let recommendations = self.finish(recommendations);
        info!(
            "Extracted {} recommendations via {} (fallback: {}) in {:.2?}",
            recommendations.len(),
            strategy,
            used_fallback,
            start_time.elapsed()
        );

        ExtractionResult {
            recommendations,
            used_fallback,
            strategy,
        }
    }

    /// JSON records are trusted as declared; only missing regions and
    /// rationales are filled in.
    fn from_json(&self, candidates: Vec<Candidate>, context: &RequestContext) -> (Vec<Recommendation>, bool) {
        let mut synthesized = false;
        let recommendations = candidates
            .into_iter()
            .map(|candidate| {
                if candidate.rationale.is_none() {
                    synthesized = true;
                }
                let region = candidate
                    .region
                    .clone()
                    .unwrap_or_else(|| self.resolver.default_region(context));
                let rationale = candidate
                    .rationale
                    .clone()
                    .unwrap_or_else(|| self.backfill.rationale_for(context));
                Recommendation::new(candidate.place, region, rationale, candidate.activities)
            })
            .collect();
        (recommendations, synthesized)
    }

    /// `None` when the text yields no usable candidate.
    fn from_chunks(&self, context: &RequestContext) -> Option<(Vec<Recommendation>, bool)> {
        let candidates = self.chunk_source.get_candidates(context);
        debug!("Chunk source produced {} candidates", candidates.len());

        let filtered = match self.filter_pipeline.apply(candidates, context) {
            Ok(filtered) => filtered,
            Err(e) => {
                warn!("Filter pipeline failed, using fallback table: {:#}", e);
                return None;
            }
        };
        if filtered.is_empty() {
            debug!("No candidates survived filtering");
            return None;
        }

        let resolved = self.resolver.resolve_all(filtered, context);
        let synthesized = resolved
            .iter()
            .any(|c| c.activities.is_empty() || c.rationale.is_none());
        let complete = self.backfill.apply(resolved, context);

        let recommendations = complete
            .into_iter()
            .map(|candidate| {
                let region = candidate
                    .region
                    .unwrap_or_else(|| self.resolver.default_region(context));
                let rationale = candidate
                    .rationale
                    .unwrap_or_else(|| self.backfill.rationale_for(context));
                Recommendation::new(candidate.place, region, rationale, candidate.activities)
            })
            .collect();
        Some((recommendations, synthesized))
    }

    /// First matching rule's destinations, else the default destinations.
    fn from_fallback_table(&self, context: &RequestContext) -> Vec<Recommendation> {
        let tags = context.tags_lower();
        let location = context.location_hint.as_deref();

        let destinations = match self
            .config
            .fallback_rules
            .iter()
            .find(|rule| rule.matches(&tags, location))
        {
            Some(rule) => {
                debug!("Fallback rule {:?} matched", rule.keywords);
                &rule.destinations
            }
            None => &self.config.default_destinations,
        };
        warn!("No usable recommendations in text, using {} fallback destinations", destinations.len());

        destinations
            .iter()
            .map(|destination| {
                let mut rec = destination.clone();
                if rec.region.trim().is_empty() {
                    rec.region = self.resolver.default_region(context);
                }
                if rec.rationale.trim().is_empty() {
                    rec.rationale = self.backfill.rationale_for(context);
                }
                if rec.activities.is_empty() {
                    rec.activities = self.backfill.activities_for(context);
                }
                rec
            })
            .collect()
    }

    /// Invariants every result satisfies regardless of path.
    fn finish(&self, recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
        let mut seen = HashSet::new();
        recommendations
            .into_iter()
            .filter(|rec| !rec.place.trim().is_empty())
            .filter(|rec| seen.insert(rec.place_key()))
            .map(|mut rec| {
                rec.place = rec.place.trim().to_string();
                let place = rec.place.clone();
                rec.activities.retain(|activity| !mentions_place(activity, &place));
                rec.activities.truncate(self.config.max_activities);
                rec
            })
            .take(self.config.max_recommendations)
            .collect()
    }
}

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::cache::AnalysisCache;
use crate::engine::AnalysisEngine;
use crate::error::ChartResult;
use crate::render::{FigureSpec, VisualizationBundle, assemble_figure};

use super::projection::convert_analysis;
use super::request::LoadRequest;

/// Cache-fronted conversion service.
///
/// Owns the seam between the external analysis engine and the chart model:
/// one engine call per distinct (instrument, timeframe, engine options)
/// key within the cache TTL, shape-checked and projected into an immutable
/// [`VisualizationBundle`] snapshot.
pub struct ChartService<E: AnalysisEngine> {
    engine: Arc<E>,
    cache: Arc<AnalysisCache>,
}

impl<E: AnalysisEngine> ChartService<E> {
    /// The cache is constructor-injected so hosts and tests control its
    /// lifecycle and TTL explicitly.
    pub fn new(engine: Arc<E>, cache: Arc<AnalysisCache>) -> Self {
        Self { engine, cache }
    }

    #[must_use]
    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    /// Loads the projected bundle for one request.
    ///
    /// Validates the request, then delegates to the cache; on a miss the
    /// compute closure invokes the engine, verifies the result shape, and
    /// projects every layer. Engine failures and shape violations leave
    /// the cache untouched.
    #[instrument(skip(self, request), fields(instrument = %request.instrument, timeframe = request.timeframe.id()))]
    pub fn load(&self, request: &LoadRequest) -> ChartResult<Arc<VisualizationBundle>> {
        request.validate()?;

        let key = request.key();
        let engine_request = request.to_engine_request();
        let engine = Arc::clone(&self.engine);

        let bundle = self.cache.get_or_compute(key, move || {
            let analysis = engine.compute_analysis(&engine_request)?;
            convert_analysis(&analysis)
        })?;

        debug!(
            bars = bundle.bar_count(),
            strokes = bundle.strokes.len(),
            segments = bundle.segments.len(),
            pivot_zones = bundle.pivot_zones.len(),
            signals = bundle.signals.len(),
            "bundle ready"
        );
        Ok(bundle)
    }

    /// Loads and assembles in one step, applying the request's visibility
    /// flags to the (possibly cached) bundle.
    pub fn load_figure(&self, request: &LoadRequest) -> ChartResult<FigureSpec> {
        let bundle = self.load(request)?;
        Ok(assemble_figure(&bundle, &request.config))
    }
}

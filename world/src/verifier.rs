//! Memoised accessibility verification in front of the reachability engine.

use log::trace;
use pick_up_sticks_core::{BlockingSet, CellCoord};

use crate::{cache::AccessibilityCache, geometry::GridGeometry, reachability::ReachabilityEngine};

/// Hit and miss counters collected by an [`AccessibilityVerifier`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheCounters {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that fell through to a traversal.
    pub misses: u64,
}

/// Answers accessibility queries from the cache, falling back to a flood fill.
///
/// The cache is purely an optimisation: bypassing it yields identical answers.
#[derive(Debug)]
pub struct AccessibilityVerifier {
    geometry: GridGeometry,
    engine: ReachabilityEngine,
    cache: AccessibilityCache,
    counters: CacheCounters,
}

impl AccessibilityVerifier {
    /// Creates a verifier for `geometry` retaining up to `cache_capacity` verdicts.
    #[must_use]
    pub fn new(geometry: GridGeometry, cache_capacity: usize) -> Self {
        Self {
            geometry,
            engine: ReachabilityEngine::new(),
            cache: AccessibilityCache::new(cache_capacity),
            counters: CacheCounters::default(),
        }
    }

    /// Grid geometry the verifier reasons about.
    #[must_use]
    pub const fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Underlying verdict cache.
    #[must_use]
    pub const fn cache(&self) -> &AccessibilityCache {
        &self.cache
    }

    /// Hit and miss counters accumulated since construction.
    #[must_use]
    pub const fn counters(&self) -> CacheCounters {
        self.counters
    }

    /// Decides whether every open interior cell stays mutually reachable once
    /// `candidate` is added to `blocking`, consulting the cache first.
    ///
    /// Invalid candidates (border, out of range, already blocking) are
    /// answered `false` immediately and never cached.
    pub fn is_fully_accessible(
        &mut self,
        blocking: &BlockingSet,
        candidate: Option<CellCoord>,
    ) -> bool {
        if let Some(cell) = candidate {
            if blocking.contains(cell) || !self.geometry.is_interior(cell) {
                return false;
            }
        }

        if let Some(verdict) = self.cache.get(blocking, candidate) {
            self.counters.hits = self.counters.hits.saturating_add(1);
            trace!("accessibility cache hit for {candidate:?}: {verdict}");
            return verdict;
        }

        self.counters.misses = self.counters.misses.saturating_add(1);
        let verdict = self.engine.is_fully_accessible(&self.geometry, blocking, candidate);
        trace!("accessibility cache miss for {candidate:?}: {verdict}");
        self.cache.put(blocking, candidate, verdict);
        verdict
    }

    /// Drops every memoised verdict.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

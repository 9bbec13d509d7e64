// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dotplot Filter: the single writable source of selection truth.
//!
//! Linked views (the scatterplot, companion charts, search results) all read
//! one shared piece of state to decide which items are visible:
//!
//! - `brush_filter`: item ids selected by the current brush gesture.
//! - `brush_range`: the raw-value interval a 1D brush covers, for display.
//! - `search_filter`: item ids matched by an independent search facility.
//!
//! [`FilterStore`] holds that state, exposes typed accessors instead of ad hoc
//! shared fields, and notifies subscribers after — never during — a state
//! change, so a consumer recomputing its per-item visibility always observes a
//! fully updated store. An item is visible when each non-empty filter contains
//! it ([`FilterState::is_included`]); an *empty* filter means "no constraint",
//! not "nothing selected".
//!
//! A revision counter bumps only when a mutation genuinely changes the state,
//! giving observers a cheap "did anything actually change?" marker.
//!
//! ## Example
//!
//! ```rust
//! use dotplot_filter::FilterStore;
//! use hashbrown::HashSet;
//!
//! let mut store = FilterStore::new();
//! let sub = store.subscribe(|state| {
//!     // A real view would recompute visibility here.
//!     assert!(state.brush_range.is_some());
//! });
//!
//! store.set_brush(HashSet::from_iter([1, 2]), Some((1990.0, 2004.0)));
//! assert!(store.get().is_included(1));
//! assert!(!store.get().is_included(3));
//!
//! store.unsubscribe(sub);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashSet;

/// The shared selection state every linked view reads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    /// Item ids selected by the brush. Empty means "no brush constraint".
    pub brush_filter: HashSet<u32>,
    /// Raw-value bounds of a 1D brush, if one is active.
    pub brush_range: Option<(f64, f64)>,
    /// Item ids matched by the search facility. Empty means "no search
    /// constraint".
    pub search_filter: HashSet<u32>,
}

impl FilterState {
    /// Returns `true` if the item passes both filters.
    ///
    /// `included = (brush empty OR id ∈ brush) AND (search empty OR id ∈ search)`.
    #[must_use]
    pub fn is_included(&self, id: u32) -> bool {
        (self.brush_filter.is_empty() || self.brush_filter.contains(&id))
            && (self.search_filter.is_empty() || self.search_filter.contains(&id))
    }
}

/// Identifies a registered subscriber for later removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

type Callback = Box<dyn FnMut(&FilterState)>;

/// Owns the [`FilterState`] and its subscriber list.
///
/// All mutation goes through the typed setters; every genuine change bumps
/// the revision and notifies subscribers with the post-change state.
#[derive(Default)]
pub struct FilterStore {
    state: FilterState,
    subscribers: Vec<Option<Callback>>,
    revision: u64,
}

impl FilterStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: FilterState::default(),
            subscribers: Vec::new(),
            revision: 0,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn get(&self) -> &FilterState {
        &self.state
    }

    /// Returns the current revision counter.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the brush filter and range.
    ///
    /// No-op (no revision bump, no notification) if both already match.
    pub fn set_brush(&mut self, filter: HashSet<u32>, range: Option<(f64, f64)>) {
        if self.state.brush_filter == filter && self.state.brush_range == range {
            return;
        }
        self.state.brush_filter = filter;
        self.state.brush_range = range;
        self.commit();
    }

    /// Clears the brush filter and range.
    ///
    /// Called whenever the discrete level or the active axis pair changes: an
    /// old pixel-space selection is meaningless against a different cluster
    /// geometry.
    pub fn clear_brush(&mut self) {
        if self.state.brush_filter.is_empty() && self.state.brush_range.is_none() {
            return;
        }
        self.state.brush_filter.clear();
        self.state.brush_range = None;
        self.commit();
    }

    /// Replaces the search filter.
    pub fn set_search(&mut self, filter: HashSet<u32>) {
        if self.state.search_filter == filter {
            return;
        }
        self.state.search_filter = filter;
        self.commit();
    }

    /// Registers a callback invoked after every genuine state change.
    pub fn subscribe(&mut self, callback: impl FnMut(&FilterState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.subscribers.len());
        self.subscribers.push(Some(Box::new(callback)));
        id
    }

    /// Removes a previously registered callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        if let Some(slot) = self.subscribers.get_mut(id.0) {
            *slot = None;
        }
    }

    fn commit(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        // State is fully updated before any subscriber observes it.
        let state = &self.state;
        for slot in &mut self.subscribers {
            if let Some(callback) = slot {
                callback(state);
            }
        }
    }
}

impl core::fmt::Debug for FilterStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.subscribers.iter().filter(|s| s.is_some()).count();
        f.debug_struct("FilterStore")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("subscribers", &alive)
            .finish_non_exhaustive()
    }
}

//! Arena owning render regions.

use std::collections::HashMap;

use crate::error::{IvisError, Result};
use crate::region::{Region, RegionId, WindowMode};

/// Arena of regions addressed by stable ids.
///
/// Ids are issued monotonically and never reused, so a stale handle can only
/// miss, never alias a newer region.
#[derive(Debug, Default)]
pub struct RegionArena {
    regions: HashMap<RegionId, Region>,
    next_id: u64,
}

impl RegionArena {
    /// Creates a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_id(&mut self) -> RegionId {
        self.next_id += 1;
        RegionId(self.next_id)
    }

    /// Creates a 3D region and returns its handle.
    pub fn create_3d(&mut self) -> RegionId {
        let id = self.issue_id();
        self.regions.insert(id, Region::new_3d(id));
        id
    }

    /// Creates a slice region at the given depth and returns its handle.
    pub fn create_2d(&mut self, mode: WindowMode, slice_depth: u64) -> RegionId {
        let id = self.issue_id();
        self.regions.insert(id, Region::new_2d(id, mode, slice_depth));
        id
    }

    /// Gets a region by handle.
    pub fn get(&self, id: RegionId) -> Result<&Region> {
        self.regions.get(&id).ok_or(IvisError::RegionNotFound(id))
    }

    /// Gets a mutable region by handle.
    pub fn get_mut(&mut self, id: RegionId) -> Result<&mut Region> {
        self.regions.get_mut(&id).ok_or(IvisError::RegionNotFound(id))
    }

    /// Checks if a region exists.
    pub fn contains(&self, id: RegionId) -> bool {
        self.regions.contains_key(&id)
    }

    /// Removes a region.
    pub fn remove(&mut self, id: RegionId) -> Option<Region> {
        self.regions.remove(&id)
    }

    /// Removes all regions. Issued ids stay retired.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Returns an iterator over all regions.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    /// Returns the number of live regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if the arena holds no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

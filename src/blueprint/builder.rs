//! Append-only building list.
//!
//! Screens emit one primary building per pixel in raster order. Boundary
//! belts are created mid-pass but must land after every primary, so they
//! are numbered from a fixed base and held back until the primaries are
//! complete. Any building can be patched by index until the list is
//! sealed.

use crate::error::{BeltscreenError, Result};

use super::building::Building;

#[derive(Debug)]
pub struct BuildingList {
    buildings: Vec<Building>,
    deferred: Vec<Building>,
    deferred_base: usize,
}

impl BuildingList {
    /// Start a list that will hold `primaries` primary buildings. Deferred
    /// buildings are numbered from `primaries` onwards.
    pub fn new(primaries: usize) -> Self {
        Self {
            buildings: Vec::with_capacity(primaries),
            deferred: Vec::new(),
            deferred_base: primaries,
        }
    }

    /// Index the next [`push`](Self::push) will receive.
    pub fn next_index(&self) -> usize {
        self.buildings.len()
    }

    /// Index the next [`push_deferred`](Self::push_deferred) will receive.
    pub fn next_deferred_index(&self) -> usize {
        self.deferred_base + self.deferred.len()
    }

    /// Append a building, constructed with its final index.
    pub fn push(&mut self, make: impl FnOnce(usize) -> Building) -> usize {
        let index = self.next_index();
        self.buildings.push(make(index));
        index
    }

    /// Queue a building to follow the primaries.
    pub fn push_deferred(&mut self, make: impl FnOnce(usize) -> Building) -> usize {
        let index = self.next_deferred_index();
        self.deferred.push(make(index));
        index
    }

    /// Number of deferred buildings still queued.
    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }

    /// Mutable access to any building pushed so far, queued or not.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Building> {
        if index < self.buildings.len() {
            return self.buildings.get_mut(index);
        }
        index
            .checked_sub(self.deferred_base)
            .and_then(|offset| self.deferred.get_mut(offset))
    }

    /// Move queued buildings onto the end of the list.
    ///
    /// Fails if the primaries do not fill exactly the indices the queued
    /// buildings were numbered after, since their links would then dangle.
    pub fn flush_deferred(&mut self) -> Result<()> {
        if self.deferred.is_empty() {
            return Ok(());
        }
        if self.buildings.len() != self.deferred_base {
            return Err(BeltscreenError::Build {
                message: format!(
                    "deferred buildings start at index {} but {} primaries were emitted",
                    self.deferred_base,
                    self.buildings.len()
                ),
                help: None,
            });
        }

        self.buildings.append(&mut self.deferred);
        self.deferred_base = self.buildings.len();
        Ok(())
    }

    /// Flush and freeze the list.
    pub fn seal(mut self) -> Result<Vec<Building>> {
        self.flush_deferred()?;
        Ok(self.buildings)
    }
}

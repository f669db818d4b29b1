//! Deterministic image selection for picture placeholders.

use crate::model::ImageAsset;

/// Hands out template images in insertion order.
///
/// Each call to [`ImagePool::take`] returns the first image not yet used in
/// this deck. Once every image has been placed the pool starts over from the
/// first one, so reuse only happens after exhaustion. Selection depends only
/// on the pool order and the number of previous calls.
#[derive(Debug, Clone)]
pub struct ImagePool<'a> {
    images: &'a [ImageAsset],
    used: Vec<bool>,
    rounds: usize,
}

impl<'a> ImagePool<'a> {
    /// Create a pool over the template's images.
    pub fn new(images: &'a [ImageAsset]) -> Self {
        Self {
            images,
            used: vec![false; images.len()],
            rounds: 0,
        }
    }

    /// Number of images in the pool.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the pool has no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Images not yet placed in the current round.
    pub fn remaining(&self) -> usize {
        self.used.iter().filter(|used| !**used).count()
    }

    /// Select the next image, or `None` when the pool is empty.
    pub fn take(&mut self) -> Option<&'a ImageAsset> {
        if self.images.is_empty() {
            return None;
        }
        if self.remaining() == 0 {
            self.rounds += 1;
            log::debug!("image pool exhausted, reusing images (round {})", self.rounds + 1);
            self.used.iter_mut().for_each(|used| *used = false);
        }

        let index = self.used.iter().position(|used| !*used)?;
        self.used[index] = true;
        Some(&self.images[index])
    }
}

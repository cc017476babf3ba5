// Bounded FIFO history of previously occupied positions, oldest first.
// Insertion order is rendering order (renderers fade opacity old to new).

use std::collections::VecDeque;

use ultraviolet::DVec2;

use crate::config;

#[derive(Clone, Debug)]
pub struct Trail {
    points: VecDeque<DVec2>,
    capacity: usize,
}

impl Trail {
    pub fn new() -> Self {
        Self::with_capacity(config::TRAIL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a point, evicting the single oldest entry once the capacity is
    /// exceeded. Strict FIFO: `len() <= capacity` always holds afterwards.
    pub fn push(&mut self, point: DVec2) {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest retained point, if any.
    pub fn oldest(&self) -> Option<DVec2> {
        self.points.front().copied()
    }

    /// Most recent point: the position immediately prior to the latest move.
    pub fn latest(&self) -> Option<DVec2> {
        self.points.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DVec2> {
        self.points.iter()
    }

    pub fn to_vec(&self) -> Vec<DVec2> {
        self.points.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_below_capacity_keeps_everything() {
        let mut trail = Trail::with_capacity(4);
        for i in 0..4 {
            trail.push(DVec2::new(i as f64, 0.0));
        }
        assert_eq!(trail.len(), 4);
        assert_eq!(trail.oldest(), Some(DVec2::new(0.0, 0.0)));
        assert_eq!(trail.latest(), Some(DVec2::new(3.0, 0.0)));
    }

    #[test]
    fn push_past_capacity_evicts_oldest_only() {
        let mut trail = Trail::with_capacity(3);
        for i in 0..5 {
            trail.push(DVec2::new(i as f64, 0.0));
        }
        assert_eq!(trail.len(), 3);
        let xs: Vec<f64> = trail.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn default_capacity_is_255() {
        let trail = Trail::new();
        assert_eq!(trail.capacity(), 255);
    }

    #[test]
    fn capacity_invariant_after_many_pushes() {
        let mut trail = Trail::new();
        for i in 0..300 {
            trail.push(DVec2::new(i as f64, 0.0));
        }
        assert_eq!(trail.len(), 255);
        // entry 255 pushes ago, not 256
        assert_eq!(trail.oldest(), Some(DVec2::new(45.0, 0.0)));
    }
}

use crate::simulation::PopulationSample;
use std::collections::VecDeque;

/// Bounded, left-evicting window of population samples feeding the plot.
///
/// Capacity is `2 * size - 2` (never below 2), one column per visible tick.
#[derive(Debug, Clone)]
pub struct SeriesWindow {
    samples: VecDeque<PopulationSample>,
    capacity: usize,
}

/// Window capacity for a grid of the given size
pub fn window_capacity(size: usize) -> usize {
    (2 * size).saturating_sub(2).max(2)
}

impl SeriesWindow {
    pub fn new(size: usize) -> Self {
        let capacity = window_capacity(size);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, dropping the oldest one when full.
    ///
    /// Samples stamped at time 0 come from before the first tick and are ignored.
    pub fn push(&mut self, sample: PopulationSample) {
        if sample.time == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Samples in chronological order
    pub fn iter(&self) -> impl Iterator<Item = &PopulationSample> + Clone + '_ {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True once the plot has filled and started scrolling
    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    pub fn latest(&self) -> Option<&PopulationSample> {
        self.samples.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: u64, count: usize) -> PopulationSample {
        PopulationSample { time, count }
    }

    #[test]
    fn test_capacity_from_size() {
        assert_eq!(window_capacity(5), 8);
        assert_eq!(window_capacity(20), 38);
        assert_eq!(window_capacity(1), 2);
        assert_eq!(window_capacity(0), 2);
        assert_eq!(SeriesWindow::new(4).capacity(), 6);
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut window = SeriesWindow::new(5);
        for tick in 1..=10u64 {
            window.push(sample(tick * 100, tick as usize));
        }
        assert_eq!(window.len(), 8);
        assert!(window.is_full());
        let times: Vec<u64> = window.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![300, 400, 500, 600, 700, 800, 900, 1000]);
        assert_eq!(window.latest(), Some(&sample(1000, 10)));
    }

    #[test]
    fn test_ignores_time_zero() {
        let mut window = SeriesWindow::new(5);
        window.push(sample(0, 3));
        assert!(window.is_empty());

        window.push(sample(100, 1));
        window.push(sample(200, 2));
        let before: Vec<_> = window.iter().copied().collect();
        window.push(sample(0, 9));
        let after: Vec<_> = window.iter().copied().collect();
        assert_eq!(before, after);

        for tick in 3..=8u64 {
            window.push(sample(tick * 100, 1));
        }
        assert!(window.is_full());
        let full: Vec<_> = window.iter().copied().collect();
        window.push(sample(0, 0));
        assert_eq!(window.iter().copied().collect::<Vec<_>>(), full);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let mut window = SeriesWindow::new(4);
        window.push(sample(100, 1));
        window.push(sample(200, 3));
        let iter = window.iter();
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
        assert_eq!(window.iter().count(), 2);
    }

    #[test]
    fn test_clear_empties_window() {
        let mut window = SeriesWindow::new(6);
        window.push(sample(100, 1));
        window.push(sample(200, 5));
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.latest(), None);
        assert_eq!(window.capacity(), 10);
    }
}

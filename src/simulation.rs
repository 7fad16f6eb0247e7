use std::error::Error;
use std::fmt;

pub const MIN_SIZE: usize = 4;
pub const MAX_SIZE: usize = 20;
pub const MIN_INTERVAL: u64 = 100;
pub const MAX_INTERVAL: u64 = 10_000;

/// Orthogonal neighbors a colony divides into
const DIVISION_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// Errors surfaced by the simulator's fallible entry points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A configuration value fell outside its allowed range
    InvalidConfig {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
    /// A toggle targeted a cell outside the grid
    IndexOutOfBounds { row: usize, col: usize, size: usize },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidConfig {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} must be between {min} and {max} (got {value})"),
            SimError::IndexOutOfBounds { row, col, size } => {
                write!(f, "cell ({row}, {col}) is outside the {size}x{size} grid")
            }
        }
    }
}

impl Error for SimError {}

/// One population reading, taken after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationSample {
    /// Elapsed simulated time in milliseconds
    pub time: u64,
    /// Number of occupied cells
    pub count: usize,
}

/// Check that a (size, interval) pair is usable for a new grid
pub fn validate_config(size: usize, interval: u64) -> Result<(), SimError> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(SimError::InvalidConfig {
            field: "size",
            value: size as u64,
            min: MIN_SIZE as u64,
            max: MAX_SIZE as u64,
        });
    }
    if !(MIN_INTERVAL..=MAX_INTERVAL).contains(&interval) {
        return Err(SimError::InvalidConfig {
            field: "interval",
            value: interval,
            min: MIN_INTERVAL,
            max: MAX_INTERVAL,
        });
    }
    Ok(())
}

/// Bacterial growth on a square grid.
///
/// Cells hold `true` while empty and `false` once occupied. Each tick every
/// occupied cell divides into its four orthogonal neighbors, so the occupied
/// set only ever grows.
#[derive(Debug, Clone)]
pub struct GrowthSimulator {
    size: usize,
    interval: u64,
    /// Row-major occupancy (true = empty)
    grid: Vec<bool>,
    elapsed: u64,
    paused: bool,
}

impl GrowthSimulator {
    pub fn new(size: usize, interval: u64) -> Result<Self, SimError> {
        validate_config(size, interval)?;
        Ok(Self {
            size,
            interval,
            grid: vec![true; size * size],
            elapsed: 0,
            paused: true,
        })
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, SimError> {
        if row < self.size && col < self.size {
            Ok(row * self.size + col)
        } else {
            Err(SimError::IndexOutOfBounds {
                row,
                col,
                size: self.size,
            })
        }
    }

    /// Flip a single cell between empty and occupied
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<(), SimError> {
        let idx = self.index(row, col)?;
        self.grid[idx] = !self.grid[idx];
        Ok(())
    }

    /// Occupy a cell regardless of its current state
    pub fn occupy(&mut self, row: usize, col: usize) -> Result<(), SimError> {
        let idx = self.index(row, col)?;
        self.grid[idx] = false;
        Ok(())
    }

    /// Advance one tick: divide every colony, move the clock, report population.
    ///
    /// Reads come from a snapshot of the grid taken before any writes, so the
    /// outcome does not depend on visiting order.
    pub fn step(&mut self) -> PopulationSample {
        let snapshot = self.grid.clone();
        let n = self.size as isize;

        for (idx, _) in snapshot.iter().enumerate().filter(|(_, empty)| !**empty) {
            let row = (idx / self.size) as isize;
            let col = (idx % self.size) as isize;
            for &(dr, dc) in &DIVISION_OFFSETS {
                let (nr, nc) = (row + dr, col + dc);
                if nr >= 0 && nr < n && nc >= 0 && nc < n {
                    self.grid[(nr * n + nc) as usize] = false;
                }
            }
        }

        self.elapsed += self.interval;
        PopulationSample {
            time: self.elapsed,
            count: self.population(),
        }
    }

    /// Number of occupied cells
    pub fn population(&self) -> usize {
        self.grid.iter().filter(|&&empty| !empty).count()
    }

    /// Theoretical maximum population (N²)
    pub fn capacity(&self) -> usize {
        self.size * self.size
    }

    /// True once every cell is occupied
    pub fn is_saturated(&self) -> bool {
        self.population() == self.capacity()
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Empty the grid and rewind the clock, keeping size and interval
    pub fn reset(&mut self) {
        self.grid.fill(true);
        self.elapsed = 0;
        self.paused = true;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether (row, col) is empty; cells outside the grid read as empty
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.index(row, col).map_or(true, |idx| self.grid[idx])
    }

    /// Row-major view of the occupancy grid
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.grid.chunks(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn occupied(sim: &GrowthSimulator) -> HashSet<(usize, usize)> {
        let mut cells = HashSet::new();
        for row in 0..sim.size() {
            for col in 0..sim.size() {
                if !sim.is_empty(row, col) {
                    cells.insert((row, col));
                }
            }
        }
        cells
    }

    #[test]
    fn test_new_grid_is_empty() {
        for size in MIN_SIZE..=MAX_SIZE {
            let sim = GrowthSimulator::new(size, 1000).unwrap();
            assert_eq!(sim.rows().count(), size);
            assert!(sim.rows().all(|row| row.len() == size && row.iter().all(|&c| c)));
            assert_eq!(sim.population(), 0);
            assert_eq!(sim.elapsed(), 0);
            assert!(sim.is_paused());
        }
    }

    #[test]
    fn test_rejects_out_of_range_config() {
        assert!(matches!(
            GrowthSimulator::new(3, 1000),
            Err(SimError::InvalidConfig { field: "size", .. })
        ));
        assert!(matches!(
            GrowthSimulator::new(21, 1000),
            Err(SimError::InvalidConfig { field: "size", .. })
        ));
        assert!(matches!(
            GrowthSimulator::new(10, 99),
            Err(SimError::InvalidConfig { field: "interval", .. })
        ));
        assert!(matches!(
            GrowthSimulator::new(10, 10_001),
            Err(SimError::InvalidConfig { field: "interval", .. })
        ));
        assert!(GrowthSimulator::new(4, 100).is_ok());
        assert!(GrowthSimulator::new(20, 10_000).is_ok());
    }

    #[test]
    fn test_toggle_flips_and_rejects_out_of_bounds() {
        let mut sim = GrowthSimulator::new(5, 1000).unwrap();
        sim.toggle(1, 3).unwrap();
        assert!(!sim.is_empty(1, 3));
        sim.toggle(1, 3).unwrap();
        assert!(sim.is_empty(1, 3));

        let err = sim.toggle(5, 0).unwrap_err();
        assert_eq!(err, SimError::IndexOutOfBounds { row: 5, col: 0, size: 5 });
        assert!(sim.toggle(0, 5).is_err());
        assert_eq!(sim.population(), 0);
        assert_eq!(sim.elapsed(), 0);
    }

    #[test]
    fn test_single_seed_spreads_to_plus() {
        let mut sim = GrowthSimulator::new(5, 1000).unwrap();
        sim.toggle(2, 2).unwrap();
        let sample = sim.step();

        let expected: HashSet<_> = [(2, 2), (1, 2), (3, 2), (2, 1), (2, 3)].into_iter().collect();
        assert_eq!(occupied(&sim), expected);
        assert_eq!(sample, PopulationSample { time: 1000, count: 5 });
    }

    #[test]
    fn test_corner_seed_stays_in_bounds() {
        let mut sim = GrowthSimulator::new(4, 200).unwrap();
        sim.toggle(0, 0).unwrap();
        let sample = sim.step();

        let expected: HashSet<_> = [(0, 0), (1, 0), (0, 1)].into_iter().collect();
        assert_eq!(occupied(&sim), expected);
        assert_eq!(sample.count, 3);
        assert_eq!(sample.time, 200);
    }

    #[test]
    fn test_growth_is_monotonic() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..25 {
            let size = rng.gen_range(MIN_SIZE..=MAX_SIZE);
            let mut sim = GrowthSimulator::new(size, 100).unwrap();
            for _ in 0..rng.gen_range(0..6) {
                sim.toggle(rng.gen_range(0..size), rng.gen_range(0..size)).unwrap();
            }
            let mut before = occupied(&sim);
            for _ in 0..rng.gen_range(1..12) {
                sim.step();
                let after = occupied(&sim);
                assert!(after.is_superset(&before));
                before = after;
            }
        }
    }

    #[test]
    fn test_saturation_is_reached_and_stable() {
        let mut sim = GrowthSimulator::new(4, 500).unwrap();
        sim.toggle(3, 0).unwrap();
        let mut sample = sim.step();
        while sample.count < 16 {
            sample = sim.step();
        }
        assert!(sim.is_saturated());
        assert_eq!(sample.count, sim.capacity());

        let time = sample.time;
        let after = sim.step();
        assert_eq!(after.count, 16);
        assert_eq!(after.time, time + 500);
        assert!(sim.is_saturated());
    }

    #[test]
    fn test_clock_advances_by_interval() {
        let mut sim = GrowthSimulator::new(6, 250).unwrap();
        assert_eq!(sim.step().time, 250);
        assert_eq!(sim.step().time, 500);
        assert_eq!(sim.elapsed(), 500);
        // an empty grid stays empty
        assert_eq!(sim.population(), 0);
    }

    #[test]
    fn test_toggle_between_ticks_is_seen_by_next_step() {
        let mut sim = GrowthSimulator::new(8, 1000).unwrap();
        sim.resume();
        sim.step();
        sim.toggle(4, 4).unwrap();
        let sample = sim.step();
        assert_eq!(sample.count, 5);
        assert!(!sim.is_empty(3, 4));
    }

    #[test]
    fn test_pause_and_toggle_do_not_touch_clock() {
        let mut sim = GrowthSimulator::new(5, 1000).unwrap();
        sim.resume();
        assert!(!sim.is_paused());
        sim.step();
        sim.pause();
        sim.toggle(0, 0).unwrap();
        assert!(sim.is_paused());
        assert_eq!(sim.elapsed(), 1000);
        sim.resume();
        assert!(!sim.is_paused());
    }

    #[test]
    fn test_reset_keeps_configuration() {
        let mut sim = GrowthSimulator::new(7, 300).unwrap();
        sim.toggle(3, 3).unwrap();
        sim.resume();
        sim.step();
        sim.reset();
        assert_eq!(sim.population(), 0);
        assert_eq!(sim.elapsed(), 0);
        assert!(sim.is_paused());
        assert_eq!(sim.size(), 7);
        assert_eq!(sim.interval(), 300);
    }

    #[test]
    fn test_error_messages() {
        let err = GrowthSimulator::new(2, 1000).unwrap_err();
        assert_eq!(err.to_string(), "size must be between 4 and 20 (got 2)");
        let err = SimError::IndexOutOfBounds { row: 9, col: 1, size: 4 };
        assert_eq!(err.to_string(), "cell (9, 1) is outside the 4x4 grid");
    }
}

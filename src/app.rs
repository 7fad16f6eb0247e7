use crate::config::AppConfig;
use crate::inoculum::Inoculum;
use crate::series::SeriesWindow;
use crate::simulation::{
    GrowthSimulator, PopulationSample, SimError, MAX_INTERVAL, MAX_SIZE, MIN_INTERVAL, MIN_SIZE,
};
use crate::timer::TickTimer;
use log::{debug, info, trace, warn};
use std::time::{Duration, Instant};

/// Longest the event loop waits for input when no tick is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Interval change per +/- press on the settings form
const INTERVAL_STEP: u64 = 100;

/// Which panel receives arrow and +/- keys
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Focus {
    #[default]
    Grid,
    Size,
    Interval,
}

impl Focus {
    /// Tab cycles grid -> size -> interval
    pub fn next(&self) -> Focus {
        match self {
            Focus::Grid => Focus::Size,
            Focus::Size => Focus::Interval,
            Focus::Interval => Focus::Grid,
        }
    }

    pub fn prev(&self) -> Focus {
        match self {
            Focus::Grid => Focus::Interval,
            Focus::Size => Focus::Grid,
            Focus::Interval => Focus::Size,
        }
    }
}

/// Main application state: one simulator, its plot window, and its timer
pub struct App {
    pub simulation: GrowthSimulator,
    pub series: SeriesWindow,
    timer: TickTimer,
    pub inoculum: Inoculum,
    /// Cell under the keyboard cursor (row, col)
    pub cursor: (usize, usize),
    pub focus: Focus,
    /// Settings form values, applied with `apply_pending`
    pub pending_size: usize,
    pub pending_interval: u64,
    /// Last user-facing message (rejected input, saturation)
    pub status: Option<String>,
    pub show_help: bool,
    pub help_scroll: u16,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self, SimError> {
        let mut simulation = GrowthSimulator::new(config.size, config.interval_ms)?;
        config.inoculum.apply(&mut simulation)?;
        info!(
            "Created {}x{} grid, interval {} ms, inoculum {}",
            config.size,
            config.size,
            config.interval_ms,
            config.inoculum.name()
        );
        Ok(Self {
            series: SeriesWindow::new(config.size),
            timer: TickTimer::new(Duration::from_millis(config.interval_ms)),
            inoculum: config.inoculum,
            cursor: (config.size / 2, config.size / 2),
            focus: Focus::Grid,
            pending_size: config.size,
            pending_interval: config.interval_ms,
            status: None,
            show_help: false,
            help_scroll: 0,
            simulation,
        })
    }

    /// Replace the simulator with a fresh one.
    ///
    /// The old timer is cancelled first; on invalid input the current grid is
    /// left untouched.
    pub fn create_grid(&mut self, size: usize, interval: u64) -> Result<(), SimError> {
        self.rebuild(size, interval, self.inoculum)
    }

    /// Build a grid seeded with `inoculum`; `self.inoculum` only changes on success
    fn rebuild(&mut self, size: usize, interval: u64, inoculum: Inoculum) -> Result<(), SimError> {
        let built = GrowthSimulator::new(size, interval).and_then(|mut sim| {
            inoculum.apply(&mut sim)?;
            Ok(sim)
        });
        let simulation = match built {
            Ok(sim) => sim,
            Err(e) => {
                warn!("Rejected grid configuration: {}", e);
                self.status = Some(e.to_string());
                return Err(e);
            }
        };
        self.timer.cancel();

        self.simulation = simulation;
        self.series = SeriesWindow::new(size);
        self.timer = TickTimer::new(Duration::from_millis(interval));
        self.inoculum = inoculum;
        self.cursor = (self.cursor.0.min(size - 1), self.cursor.1.min(size - 1));
        self.pending_size = size;
        self.pending_interval = interval;
        self.status = None;
        info!(
            "Created {}x{} grid, interval {} ms, inoculum {}",
            size,
            size,
            interval,
            inoculum.name()
        );
        Ok(())
    }

    /// Create a grid from the settings form
    pub fn apply_pending(&mut self) -> Result<(), SimError> {
        self.create_grid(self.pending_size, self.pending_interval)
    }

    /// Flip one cell; allowed whether paused or running
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<(), SimError> {
        match self.simulation.toggle(row, col) {
            Ok(()) => {
                let state = if self.simulation.is_empty(row, col) { "empty" } else { "occupied" };
                debug!("Toggled ({}, {}) to {}", row, col, state);
                Ok(())
            }
            Err(e) => {
                debug!("Rejected toggle: {}", e);
                Err(e)
            }
        }
    }

    pub fn toggle_cursor_cell(&mut self) -> Result<(), SimError> {
        let (row, col) = self.cursor;
        self.toggle_cell(row, col)
    }

    /// Pause or resume; resuming arms the timer one interval from `now`
    pub fn pause_toggle(&mut self, now: Instant) {
        if self.simulation.is_paused() {
            self.simulation.resume();
            self.timer.start(now);
            self.status = None;
            info!("Resumed at t={} ms", self.simulation.elapsed());
        } else {
            self.simulation.pause();
            self.timer.cancel();
            info!("Paused at t={} ms", self.simulation.elapsed());
        }
    }

    /// Empty the grid, rewind the clock and clear the plot
    pub fn reset_grid(&mut self) {
        self.timer.cancel();
        self.simulation.reset();
        self.series.clear();
        self.status = None;
        if let Err(e) = self.inoculum.apply(&mut self.simulation) {
            warn!("Failed to re-apply inoculum: {}", e);
        }
        info!("Reset {}x{} grid", self.simulation.size(), self.simulation.size());
    }

    /// Step through inoculation patterns and recreate the grid with the new one
    pub fn cycle_inoculum(&mut self, forward: bool) -> Result<(), SimError> {
        let inoculum = if forward {
            self.inoculum.next()
        } else {
            self.inoculum.prev()
        };
        self.rebuild(self.simulation.size(), self.simulation.interval(), inoculum)
    }

    /// Run at most one simulation step if the timer is due.
    ///
    /// Saturation observed here pauses the run; nothing else does.
    pub fn tick(&mut self, now: Instant) -> Option<PopulationSample> {
        if self.simulation.is_paused() || !self.timer.poll(now) {
            return None;
        }

        let sample = self.simulation.step();
        self.series.push(sample);
        trace!("t={} ms population={}", sample.time, sample.count);

        if sample.count == self.simulation.capacity() {
            self.simulation.pause();
            self.timer.cancel();
            self.status = Some(format!("Saturated at t={} ms", sample.time));
            info!("Grid saturated at t={} ms, pausing", sample.time);
        }
        Some(sample)
    }

    /// How long the event loop may block waiting for input
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.timer
            .time_until_due(now)
            .map_or(IDLE_POLL, |left| left.min(IDLE_POLL))
    }

    pub fn is_running(&self) -> bool {
        !self.simulation.is_paused()
    }

    /// Move the cell cursor, clamped to the grid
    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let max = self.simulation.size() as isize - 1;
        let row = (self.cursor.0 as isize + d_row).clamp(0, max);
        let col = (self.cursor.1 as isize + d_col).clamp(0, max);
        self.cursor = (row as usize, col as usize);
    }

    /// Adjust the focused settings field by `delta` steps
    pub fn adjust_pending(&mut self, delta: i64) {
        match self.focus {
            Focus::Grid => {}
            Focus::Size => {
                self.pending_size = (self.pending_size as i64 + delta)
                    .clamp(MIN_SIZE as i64, MAX_SIZE as i64) as usize;
            }
            Focus::Interval => {
                self.pending_interval = (self.pending_interval as i64
                    + delta * INTERVAL_STEP as i64)
                    .clamp(MIN_INTERVAL as i64, MAX_INTERVAL as i64)
                    as u64;
            }
        }
    }

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0;
        }
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    pub fn scroll_help_down(&mut self, max_scroll: u16) {
        self.help_scroll = (self.help_scroll + 1).min(max_scroll);
    }
}

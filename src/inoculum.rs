use crate::simulation::{GrowthSimulator, SimError};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Initial colony placement for a freshly created grid
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Inoculum {
    /// Start empty; colonies are placed by hand
    #[default]
    None,
    Center,
    Corners,
    Cross,
    /// A handful of random colonies
    Scatter,
}

impl Inoculum {
    pub fn name(&self) -> &str {
        match self {
            Inoculum::None => "None",
            Inoculum::Center => "Center",
            Inoculum::Corners => "Corners",
            Inoculum::Cross => "Cross",
            Inoculum::Scatter => "Scatter",
        }
    }

    pub fn next(&self) -> Inoculum {
        match self {
            Inoculum::None => Inoculum::Center,
            Inoculum::Center => Inoculum::Corners,
            Inoculum::Corners => Inoculum::Cross,
            Inoculum::Cross => Inoculum::Scatter,
            Inoculum::Scatter => Inoculum::None,
        }
    }

    pub fn prev(&self) -> Inoculum {
        match self {
            Inoculum::None => Inoculum::Scatter,
            Inoculum::Center => Inoculum::None,
            Inoculum::Corners => Inoculum::Center,
            Inoculum::Cross => Inoculum::Corners,
            Inoculum::Scatter => Inoculum::Cross,
        }
    }

    pub fn parse(s: &str) -> Option<Inoculum> {
        match s.to_lowercase().as_str() {
            "none" | "empty" => Some(Inoculum::None),
            "center" | "centre" | "point" => Some(Inoculum::Center),
            "corners" | "corner" => Some(Inoculum::Corners),
            "cross" | "plus" => Some(Inoculum::Cross),
            "scatter" | "random" => Some(Inoculum::Scatter),
            _ => None,
        }
    }

    /// Occupy the pattern's cells. Never empties a cell or touches the clock.
    pub fn apply(&self, sim: &mut GrowthSimulator) -> Result<(), SimError> {
        let n = sim.size();
        let mid = n / 2;
        match self {
            Inoculum::None => {}
            Inoculum::Center => sim.occupy(mid, mid)?,
            Inoculum::Corners => {
                for (row, col) in [(0, 0), (0, n - 1), (n - 1, 0), (n - 1, n - 1)] {
                    sim.occupy(row, col)?;
                }
            }
            Inoculum::Cross => {
                for i in 0..n {
                    sim.occupy(mid, i)?;
                    sim.occupy(i, mid)?;
                }
            }
            Inoculum::Scatter => {
                let mut rng = rand::thread_rng();
                let colonies = (n / 2).max(2);
                for _ in 0..colonies {
                    sim.occupy(rng.gen_range(0..n), rng.gen_range(0..n))?;
                }
            }
        }
        Ok(())
    }
}

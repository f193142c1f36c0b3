use serde::{Deserialize, Serialize};

use crate::oversight::domain::{ExposureLevel, RiskIndicatorLevel};

/// Surveillance-cycle lookup table, in months, keyed by (exposure level,
/// risk indicator level).
///
/// Rows are exposure A..E, columns indicator 1..5. Storing a fixed-size
/// array indexed by the two closed enums makes the table total over all 25
/// combinations by construction; a lookup can neither miss nor silently
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleMatrix {
    rows: [[u8; 5]; 5],
}

impl CycleMatrix {
    pub const fn new(rows: [[u8; 5]; 5]) -> Self {
        Self { rows }
    }

    /// Reference table of the oversight program. A1 (least exposed, best
    /// performing) gets the longest 18-month cycle; anything at indicator 5
    /// is inspected every 6 months regardless of exposure.
    pub const fn reference() -> Self {
        Self::new([
            [18, 18, 12, 12, 6], // exposure A
            [18, 12, 12, 6, 6],  // exposure B
            [12, 12, 6, 6, 6],   // exposure C
            [12, 6, 6, 6, 6],    // exposure D
            [12, 6, 6, 6, 6],    // exposure E
        ])
    }

    pub fn months(&self, exposure: ExposureLevel, indicator: RiskIndicatorLevel) -> u8 {
        self.rows[exposure.index()][indicator.index()]
    }
}

impl Default for CycleMatrix {
    fn default() -> Self {
        Self::reference()
    }
}

//! Market conventions for Colombian fixed income instruments.
//!
//! The original "bag of strings" parameters (periodicity, day-count basis,
//! rate mode) are closed enumerations here: invalid values fail when parsed,
//! never deep inside a formula.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RentaError;

/// Coupon payment periodicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Periodicity {
    /// Monthly payments (12 per year)
    Monthly,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Semiannual payments (2 per year)
    Semiannual,
    /// Annual payments (1 per year)
    Annual,
}

impl Periodicity {
    /// Returns the number of coupon periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Periodicity::Monthly => 12,
            Periodicity::Quarterly => 4,
            Periodicity::Semiannual => 2,
            Periodicity::Annual => 1,
        }
    }

    /// Returns the number of calendar months per period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        match self {
            Periodicity::Monthly => 1,
            Periodicity::Quarterly => 3,
            Periodicity::Semiannual => 6,
            Periodicity::Annual => 12,
        }
    }

    /// Returns the fixed day step per period under the 30/360 schedule
    /// grid (30/90/180/360 days).
    #[must_use]
    pub fn fixed_step_days(&self) -> i64 {
        match self {
            Periodicity::Monthly => 30,
            Periodicity::Quarterly => 90,
            Periodicity::Semiannual => 180,
            Periodicity::Annual => 360,
        }
    }

    /// Conventional days per period for the convexity denominator.
    ///
    /// This is a fixed lookup per periodicity and basis, not derived from
    /// the actual schedule (e.g. Semiannual is 180 days under 30/360 but
    /// 182 under Actual/365).
    #[must_use]
    pub fn conventional_period_days(&self, basis: DayCountBasis) -> i64 {
        match basis {
            DayCountBasis::Thirty360 => self.fixed_step_days(),
            DayCountBasis::Actual365 => 365 / i64::from(self.periods_per_year()),
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Periodicity::Monthly => "Mensual",
            Periodicity::Quarterly => "Trimestral",
            Periodicity::Semiannual => "Semestral",
            Periodicity::Annual => "Anual",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Periodicity {
    type Err = RentaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mensual" | "Monthly" => Ok(Periodicity::Monthly),
            "Trimestral" | "Quarterly" => Ok(Periodicity::Quarterly),
            "Semestral" | "Semiannual" => Ok(Periodicity::Semiannual),
            "Anual" | "Annual" => Ok(Periodicity::Annual),
            other => Err(RentaError::config(format!(
                "unrecognized periodicity '{other}'; use Mensual, Trimestral, Semestral or Anual"
            ))),
        }
    }
}

/// Day-count basis for coupon accrual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountBasis {
    /// 30/360 US bond basis; schedules advance on a fixed day grid.
    Thirty360,
    /// Actual/365 with calendar-month schedule stepping.
    Actual365,
}

impl DayCountBasis {
    /// Days per year under this basis (the denominator of accrual
    /// fractions).
    #[must_use]
    pub fn days_per_year(&self) -> i64 {
        match self {
            DayCountBasis::Thirty360 => 360,
            DayCountBasis::Actual365 => 365,
        }
    }
}

impl fmt::Display for DayCountBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayCountBasis::Thirty360 => "30/360",
            DayCountBasis::Actual365 => "365/365",
        };
        write!(f, "{name}")
    }
}

impl FromStr for DayCountBasis {
    type Err = RentaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "30/360" => Ok(DayCountBasis::Thirty360),
            "365/365" | "Actual/365" => Ok(DayCountBasis::Actual365),
            other => Err(RentaError::config(format!(
                "unrecognized day-count basis '{other}'; use 30/360 or 365/365"
            ))),
        }
    }
}

/// How an annual rate is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateMode {
    /// Effective annual rate (EA): compounded once per year.
    EffectiveAnnual,
    /// Nominal annual rate: stated per period without intra-year
    /// compounding.
    NominalAnnual,
}

impl fmt::Display for RateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RateMode::EffectiveAnnual => "EA",
            RateMode::NominalAnnual => "Nominal",
        };
        write!(f, "{name}")
    }
}

impl FromStr for RateMode {
    type Err = RentaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EA" | "Efectiva" => Ok(RateMode::EffectiveAnnual),
            "Nominal" => Ok(RateMode::NominalAnnual),
            other => Err(RentaError::config(format!(
                "unrecognized rate mode '{other}'; use EA or Nominal"
            ))),
        }
    }
}

/// Accrual mode for IPC inflation-indexed coupons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IpcMode {
    /// Rate fixed at the start of each coupon period (per-period prints,
    /// first period shifted to the pre-issue print).
    Inicio,
    /// Single rate fixed as of the trade date, applied to every period.
    Final,
}

impl fmt::Display for IpcMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IpcMode::Inicio => "Inicio",
            IpcMode::Final => "Final",
        };
        write!(f, "{name}")
    }
}

impl FromStr for IpcMode {
    type Err = RentaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Inicio" => Ok(IpcMode::Inicio),
            "Final" => Ok(IpcMode::Final),
            other => Err(RentaError::config(format!(
                "unrecognized IPC mode '{other}'; use Inicio or Final"
            ))),
        }
    }
}

//! Capture step sequencing
//!
//! A fixed linear sequence of seven stages with forward/back navigation.
//! Steps never gate on completeness: an incomplete step can be advanced past.

/// The seven wizard stages, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    VehicleDetails,
    Exterior,
    Engine,
    AdditionalChecks,
    Photos,
    Review,
    Summary,
}

impl Step {
    pub const COUNT: usize = 7;

    pub fn first() -> Self {
        Step::VehicleDetails
    }

    /// 1-based position, for "step N of 7" displays
    pub fn number(self) -> usize {
        match self {
            Step::VehicleDetails => 1,
            Step::Exterior => 2,
            Step::Engine => 3,
            Step::AdditionalChecks => 4,
            Step::Photos => 5,
            Step::Review => 6,
            Step::Summary => 7,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::VehicleDetails => "Vehicle Details",
            Step::Exterior => "Exterior",
            Step::Engine => "Engine",
            Step::AdditionalChecks => "Additional Checks",
            Step::Photos => "Photos",
            Step::Review => "Review",
            Step::Summary => "Summary",
        }
    }

    /// The following step; the last step stays put
    pub fn next(self) -> Self {
        match self {
            Step::VehicleDetails => Step::Exterior,
            Step::Exterior => Step::Engine,
            Step::Engine => Step::AdditionalChecks,
            Step::AdditionalChecks => Step::Photos,
            Step::Photos => Step::Review,
            Step::Review => Step::Summary,
            Step::Summary => Step::Summary,
        }
    }

    /// The preceding step; the first step stays put
    pub fn prev(self) -> Self {
        match self {
            Step::VehicleDetails => Step::VehicleDetails,
            Step::Exterior => Step::VehicleDetails,
            Step::Engine => Step::Exterior,
            Step::AdditionalChecks => Step::Engine,
            Step::Photos => Step::AdditionalChecks,
            Step::Review => Step::Photos,
            Step::Summary => Step::Review,
        }
    }
}

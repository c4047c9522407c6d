//! Check resolution against a DC

mod degree;

pub use degree::{
    calculate_degree_of_success, AdjustmentDirection, AdjustmentScope, AppliedAdjustment,
    CheckOutcome, DegreeAdjustment, DegreeOfSuccess, DieRoll,
};

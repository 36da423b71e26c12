//! Supporting utilities used by the psychrometric models.
//!
//! These modules are public because they're useful on their own, but their
//! APIs are not as stable as the model-facing surface. Breaking changes may
//! occur as needed.

pub mod constraint;
pub mod units;

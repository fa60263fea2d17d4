//! Browser-side half of the lead pipeline: turns a submitted form into a flat submission,
//! sends it to the relay and reports the outcome back on the form.
//!
//! The DOM is reached only through [`form::FormElement`], so everything here runs without a browser.

pub mod controller;
pub mod feedback;
pub mod form;
pub mod registry;
pub mod transport;
pub mod validate;

// Use cases layer: the consent-gated submit workflow.

pub mod consent;
pub mod submit;
#[cfg(test)]
pub(crate) mod test_support;

pub use consent::ConsentGate;
pub use submit::{FormSubmission, SubmitFlow, SubmitSettings};

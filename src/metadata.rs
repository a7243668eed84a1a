//! Track metadata model, per-field inference, and sibling consensus.

mod consensus;
mod extract;
mod model;

pub use consensus::common_artist;
pub use extract::{Extraction, Extractor};
pub use model::{Field, TrackMetadata};

#[cfg(test)]
pub use extract::ExtractContext;
#[cfg(test)]
pub use model::Provenance;

#[cfg(test)]
mod tests;

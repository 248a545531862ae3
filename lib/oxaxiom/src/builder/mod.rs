//! One builder per declared construct.
//!
//! Builders are configured with `with_*` setters and written into an [`OntologyGraph`] with
//! `build`. Every check happens before the first triple is written: a failing `build` leaves
//! the graph untouched.
//!
//! [`OntologyGraph`]: crate::store::OntologyGraph

mod class;
mod concept;
mod defined;
pub(crate) mod enumeration;
mod individual;
mod ontology;
mod property;

pub use crate::annotation::Annotate;
pub use class::ClassBuilder;
pub use concept::ConceptBuilder;
pub use defined::DefinedClassBuilder;
pub use enumeration::EnumeratedClassBuilder;
pub use individual::IndividualBuilder;
pub use ontology::OntologyHeaderBuilder;
pub use property::{PropertyBuilder, PropertyCharacteristic, PropertyKind, PropertyRange};

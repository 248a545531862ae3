//! Builders synthesizing [OWL 2](https://www.w3.org/TR/owl2-mapping-to-rdf/) axioms as RDF
//! triples, and a bridge to external reasoners.
//!
//! Every declaration is written into an explicit [`OntologyGraph`](store::OntologyGraph)
//! passed by mutable reference:
//! - [`builder`] has one builder per construct: classes, enumerated classes, classes defined
//!   by a property, properties, individuals, controlled terms and the ontology header;
//! - [`restriction`] writes property restrictions, boolean class expressions and datatype
//!   restrictions;
//! - [`axiom`] writes disjointness, property chains and inverses, [`rule`] writes SWRL rules;
//! - [`reasoner`] runs an external reasoner or classifier on a graph.
//!
//! # Example
//! ```
//! use oxaxiom::annotation::Annotate;
//! use oxaxiom::builder::{ClassBuilder, PropertyBuilder};
//! use oxaxiom::store::OntologyGraph;
//! use oxaxiom::term::Namespace;
//! use oxaxiom::vocab::xsd;
//! use oxrdfio::RdfFormat;
//!
//! let dwc = Namespace::new("http://rs.tdwg.org/dwc/terms/")?;
//! let mut graph = OntologyGraph::new();
//! graph.bind("dwc", dwc.as_str())?;
//!
//! let event = ClassBuilder::new(&dwc, "Event", "Event")
//!     .with_definition("An action that occurs at some location during some time.")
//!     .with_exactly_one([dwc.term("eventID")?])
//!     .build(&mut graph)?;
//! PropertyBuilder::datatype(&dwc, "eventID", "Event ID")
//!     .with_domain(event)
//!     .with_range(xsd::STRING)
//!     .build(&mut graph)?;
//!
//! let turtle = String::from_utf8(graph.serialize(Vec::new(), RdfFormat::Turtle)?)?;
//! assert!(turtle.contains("dwc:eventID"));
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

pub mod annotation;
pub mod axiom;
pub mod builder;
pub mod collection;
pub mod error;
pub mod reasoner;
pub mod restriction;
pub mod rule;
pub mod store;
pub mod term;
pub mod vocab;

pub use error::{BuildError, ReasonerError};
pub use store::OntologyGraph;
pub use term::{Namespace, OneOrMany};

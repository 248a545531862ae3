use crate::annotation::{Annotate, Annotations};
use crate::error::BuildError;
use crate::store::OntologyGraph;
use crate::vocab::rdf;
use oxrdf::{Literal, NamedNode};
use tracing::debug;

/// Declares an individual of a class.
///
/// Individuals are not vocabulary terms: they get no `rdfs:isDefinedBy`.
#[derive(Debug, Clone)]
#[must_use]
pub struct IndividualBuilder {
    iri: NamedNode,
    classes: Vec<NamedNode>,
    annotations: Annotations,
}

impl IndividualBuilder {
    pub fn new(
        iri: impl Into<NamedNode>,
        class: impl Into<NamedNode>,
        label: impl Into<Literal>,
    ) -> Self {
        Self {
            iri: iri.into(),
            classes: vec![class.into()],
            annotations: Annotations::new(label),
        }
    }

    /// Adds another `rdf:type`.
    pub fn with_class(mut self, class: impl Into<NamedNode>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn build(&self, graph: &mut OntologyGraph) -> Result<NamedNode, BuildError> {
        self.annotations
            .write(graph, "individual", self.iri.as_ref(), None)?;
        for class in &self.classes {
            graph.add(&self.iri, rdf::TYPE, class);
        }
        debug!(individual = %self.iri, "declared individual");
        Ok(self.iri.clone())
    }
}

impl Annotate for IndividualBuilder {
    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}

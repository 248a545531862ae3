use crate::annotation::{Annotate, Annotations};
use crate::error::BuildError;
use crate::store::OntologyGraph;
use crate::term::Namespace;
use crate::vocab::{rdf, skos};
use oxrdf::{Literal, NamedNode};
use tracing::debug;

/// Declares a SKOS controlled term or, without links, a concept scheme.
///
/// No `rdf:type` is written unless [`ConceptBuilder::with_type`] is used.
///
/// ```
/// use oxaxiom::annotation::Annotate;
/// use oxaxiom::builder::ConceptBuilder;
/// use oxaxiom::store::OntologyGraph;
/// use oxaxiom::term::Namespace;
///
/// let ns = Namespace::new("http://example.com/vocab/")?;
/// let mut graph = OntologyGraph::new();
/// let scheme = ConceptBuilder::new(&ns, "lifeStages", "Life Stages").build(&mut graph)?;
/// ConceptBuilder::new(&ns, "larva", "Larva")
///     .with_definition("A juvenile form.")
///     .with_in_scheme(scheme)
///     .build(&mut graph)?;
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct ConceptBuilder {
    namespace: Namespace,
    name: String,
    annotations: Annotations,
    broader: Vec<NamedNode>,
    in_scheme: Vec<NamedNode>,
    types: Vec<NamedNode>,
}

impl ConceptBuilder {
    pub fn new(namespace: &Namespace, name: impl Into<String>, label: impl Into<Literal>) -> Self {
        Self {
            namespace: namespace.clone(),
            name: name.into(),
            annotations: Annotations::new(label),
            broader: Vec::new(),
            in_scheme: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Adds a `skos:broader` link.
    pub fn with_broader(mut self, concept: impl Into<NamedNode>) -> Self {
        self.broader.push(concept.into());
        self
    }

    /// Adds a `skos:inScheme` link.
    pub fn with_in_scheme(mut self, scheme: impl Into<NamedNode>) -> Self {
        self.in_scheme.push(scheme.into());
        self
    }

    /// Adds an explicit `rdf:type`, like `skos:Concept` or `skos:ConceptScheme`.
    pub fn with_type(mut self, rdf_type: impl Into<NamedNode>) -> Self {
        self.types.push(rdf_type.into());
        self
    }

    pub fn build(&self, graph: &mut OntologyGraph) -> Result<NamedNode, BuildError> {
        let concept = self.namespace.declare("concept", &self.name)?;
        self.annotations.write(
            graph,
            "concept",
            concept.as_ref(),
            Some(self.namespace.iri()),
        )?;
        for rdf_type in &self.types {
            graph.add(&concept, rdf::TYPE, rdf_type);
        }
        for broader in &self.broader {
            graph.add(&concept, skos::BROADER, broader);
        }
        for scheme in &self.in_scheme {
            graph.add(&concept, skos::IN_SCHEME, scheme);
        }
        debug!(%concept, "declared concept");
        Ok(concept)
    }
}

impl Annotate for ConceptBuilder {
    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}

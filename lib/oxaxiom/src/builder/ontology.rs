use crate::error::BuildError;
use crate::store::{OntologyGraph, is_prefix_name};
use crate::term::Namespace;
use crate::vocab::{dc, dcterms, owl, rdf, vann, xsd};
use oxrdf::{Literal, NamedNode};
use oxsdatatypes::Date;
use tracing::debug;

/// Declares the `owl:Ontology` resource describing a vocabulary.
///
/// When both a preferred prefix and a preferred namespace are given, the prefix is also
/// bound in the graph.
///
/// ```
/// use oxaxiom::builder::OntologyHeaderBuilder;
/// use oxaxiom::store::OntologyGraph;
/// use oxaxiom::term::Namespace;
///
/// let dwc = Namespace::new("http://rs.tdwg.org/dwc/terms/")?;
/// let mut graph = OntologyGraph::new();
/// OntologyHeaderBuilder::new(dwc.iri())
///     .with_version_info("2023-09-18")
///     .with_preferred_prefix("dwc")
///     .with_preferred_namespace(&dwc)
///     .with_title("Darwin Core")
///     .with_created("2009-10-09".parse()?)
///     .build(&mut graph)?;
/// assert_eq!(graph.namespace("dwc"), Some("http://rs.tdwg.org/dwc/terms/"));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct OntologyHeaderBuilder {
    iri: NamedNode,
    version_info: Option<Literal>,
    preferred_prefix: Option<String>,
    preferred_namespace: Option<Namespace>,
    title: Option<Literal>,
    description: Option<Literal>,
    created: Option<Date>,
}

impl OntologyHeaderBuilder {
    pub fn new(iri: impl Into<NamedNode>) -> Self {
        Self {
            iri: iri.into(),
            version_info: None,
            preferred_prefix: None,
            preferred_namespace: None,
            title: None,
            description: None,
            created: None,
        }
    }

    pub fn with_version_info(mut self, version_info: impl Into<Literal>) -> Self {
        self.version_info = Some(version_info.into());
        self
    }

    /// Sets `vann:preferredNamespacePrefix`.
    pub fn with_preferred_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.preferred_prefix = Some(prefix.into());
        self
    }

    /// Sets `vann:preferredNamespaceUri`.
    pub fn with_preferred_namespace(mut self, namespace: &Namespace) -> Self {
        self.preferred_namespace = Some(namespace.clone());
        self
    }

    /// Sets `dc:title`.
    pub fn with_title(mut self, title: impl Into<Literal>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets `dc:description`.
    pub fn with_description(mut self, description: impl Into<Literal>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets `dcterms:created`.
    pub fn with_created(mut self, created: Date) -> Self {
        self.created = Some(created);
        self
    }

    pub fn build(&self, graph: &mut OntologyGraph) -> Result<NamedNode, BuildError> {
        if let Some(prefix) = &self.preferred_prefix {
            if !is_prefix_name(prefix) {
                return Err(BuildError::InvalidPrefix(prefix.clone()));
            }
        }
        let ontology = &self.iri;
        graph.add(ontology, rdf::TYPE, owl::ONTOLOGY);
        if let Some(version_info) = &self.version_info {
            graph.add(ontology, owl::VERSION_INFO, version_info);
        }
        if let Some(prefix) = &self.preferred_prefix {
            graph.add(
                ontology,
                vann::PREFERRED_NAMESPACE_PREFIX,
                &Literal::new_simple_literal(prefix),
            );
        }
        if let Some(namespace) = &self.preferred_namespace {
            graph.add(
                ontology,
                vann::PREFERRED_NAMESPACE_URI,
                &Literal::new_typed_literal(namespace.as_str(), xsd::ANY_URI),
            );
        }
        if let Some(title) = &self.title {
            graph.add(ontology, dc::TITLE, title);
        }
        if let Some(description) = &self.description {
            graph.add(ontology, dc::DESCRIPTION, description);
        }
        if let Some(created) = self.created {
            graph.add(
                ontology,
                dcterms::CREATED,
                &Literal::new_typed_literal(created.to_string(), xsd::DATE),
            );
        }
        if let (Some(prefix), Some(namespace)) = (&self.preferred_prefix, &self.preferred_namespace)
        {
            graph.bind(prefix.as_str(), namespace.as_str())?;
        }
        debug!(%ontology, "declared ontology header");
        Ok(self.iri.clone())
    }
}

//! The in-memory graph the builders write into.

use crate::error::BuildError;
use oxiri::Iri;
use oxrdf::{
    Graph, NamedNodeRef, NamedOrBlankNodeRef, Quad, TermRef, Triple, TripleRef,
};
use oxrdfio::{RdfFormat, RdfParseError, RdfParser, RdfSerializer};
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// An RDF graph together with the prefixes used to display it.
///
/// The graph is a set: inserting a triple twice keeps a single copy.
/// Builders only ever add triples to it.
///
/// Usage example:
/// ```
/// use oxaxiom::store::OntologyGraph;
/// use oxaxiom::vocab::{owl, rdf};
/// use oxrdf::{NamedNodeRef, TripleRef};
/// use oxrdfio::RdfFormat;
///
/// let ex = NamedNodeRef::new("http://example.com/Agent")?;
/// let mut graph = OntologyGraph::new();
/// graph.bind("ex", "http://example.com/")?;
/// assert!(graph.insert(TripleRef::new(ex, rdf::TYPE, owl::CLASS)));
/// assert!(!graph.insert(TripleRef::new(ex, rdf::TYPE, owl::CLASS)));
///
/// let turtle = graph.serialize(Vec::new(), RdfFormat::Turtle)?;
/// assert!(String::from_utf8(turtle)?.contains("ex:Agent a owl:Class"));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OntologyGraph {
    graph: Graph,
    prefixes: BTreeMap<String, String>,
}

impl OntologyGraph {
    /// Creates a new empty graph with the `owl`, `rdf`, `rdfs` and `xsd` prefixes bound.
    pub fn new() -> Self {
        let mut graph = Self::default();
        for (prefix, namespace) in [
            ("owl", "http://www.w3.org/2002/07/owl#"),
            ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
            ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
            ("xsd", "http://www.w3.org/2001/XMLSchema#"),
        ] {
            graph.prefixes.insert(prefix.into(), namespace.into());
        }
        graph
    }

    /// Adds a triple. Returns `false` if it was already there.
    pub fn insert<'a>(&mut self, triple: impl Into<TripleRef<'a>>) -> bool {
        self.graph.insert(triple)
    }

    pub(crate) fn add<'a>(
        &mut self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: impl Into<NamedNodeRef<'a>>,
        object: impl Into<TermRef<'a>>,
    ) {
        let subject: NamedOrBlankNodeRef<'a> = subject.into();
        self.graph.insert(TripleRef::new(subject, predicate, object));
    }

    /// Binds `prefix` to `namespace` for serialization.
    ///
    /// Binding the same prefix again replaces the previous namespace.
    pub fn bind(
        &mut self,
        prefix: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Result<(), BuildError> {
        let prefix = prefix.into();
        if !is_prefix_name(&prefix) {
            return Err(BuildError::InvalidPrefix(prefix));
        }
        let namespace = Iri::parse(namespace.into())?.into_inner();
        debug!(%prefix, %namespace, "binding prefix");
        self.prefixes.insert(prefix, namespace);
        Ok(())
    }

    /// The bound prefixes, sorted by prefix name.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(prefix, namespace)| (prefix.as_str(), namespace.as_str()))
    }

    /// The namespace bound to `prefix`, if any.
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Returns all the triples contained by the graph, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = TripleRef<'_>> {
        self.graph.iter()
    }

    pub fn contains<'a>(&self, triple: impl Into<TripleRef<'a>>) -> bool {
        self.graph.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn triples_for_subject<'a, 'b>(
        &'a self,
        subject: impl Into<NamedOrBlankNodeRef<'b>>,
    ) -> impl Iterator<Item = TripleRef<'a>> + 'a {
        let subject: NamedOrBlankNodeRef<'b> = subject.into();
        self.graph.triples_for_subject(subject)
    }

    pub fn objects_for_subject_predicate<'a, 'b>(
        &'a self,
        subject: impl Into<NamedOrBlankNodeRef<'b>>,
        predicate: impl Into<NamedNodeRef<'b>>,
    ) -> impl Iterator<Item = TermRef<'a>> + 'a {
        let subject: NamedOrBlankNodeRef<'b> = subject.into();
        self.graph.objects_for_subject_predicate(subject, predicate)
    }

    pub fn object_for_subject_predicate<'a, 'b>(
        &'a self,
        subject: impl Into<NamedOrBlankNodeRef<'b>>,
        predicate: impl Into<NamedNodeRef<'b>>,
    ) -> Option<TermRef<'a>> {
        let subject: NamedOrBlankNodeRef<'b> = subject.into();
        self.graph.object_for_subject_predicate(subject, predicate)
    }

    pub fn triples_for_predicate<'a, 'b>(
        &'a self,
        predicate: impl Into<NamedNodeRef<'b>>,
    ) -> impl Iterator<Item = TripleRef<'a>> + 'a {
        self.graph.triples_for_predicate(predicate)
    }

    /// Every IRI used as subject or object of a triple.
    pub fn named_nodes(&self) -> FxHashSet<NamedNodeRef<'_>> {
        let mut nodes = FxHashSet::default();
        for triple in self.graph.iter() {
            if let TermRef::NamedNode(subject) = TermRef::from(triple.subject) {
                nodes.insert(subject);
            }
            if let TermRef::NamedNode(object) = triple.object {
                nodes.insert(object);
            }
        }
        nodes
    }

    /// Adds every triple of `other` to this graph.
    ///
    /// Prefixes of `other` are only added if they are not already bound here.
    pub fn extend(&mut self, other: &Self) {
        for triple in other.graph.iter() {
            self.graph.insert(triple);
        }
        for (prefix, namespace) in &other.prefixes {
            self.prefixes
                .entry(prefix.clone())
                .or_insert_with(|| namespace.clone());
        }
    }

    /// Writes the graph into `writer` using `format` and returns the writer.
    ///
    /// Formats supporting prefixes use the bound ones.
    pub fn serialize<W: Write>(&self, writer: W, format: RdfFormat) -> io::Result<W> {
        let mut serializer = RdfSerializer::from_format(format);
        for (prefix, namespace) in &self.prefixes {
            serializer = serializer
                .with_prefix(prefix, namespace)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        }
        let mut serializer = serializer.for_writer(writer);
        for triple in self.graph.iter() {
            serializer.serialize_triple(triple)?;
        }
        serializer.finish()
    }

    /// Reads a graph from `reader`.
    ///
    /// Quads in named graphs are merged into the default graph.
    /// The prefixes declared in the document are bound on the returned graph.
    pub fn parse(reader: impl Read, format: RdfFormat) -> Result<Self, RdfParseError> {
        let mut graph = Self::new();
        let mut parser = RdfParser::from_format(format).for_reader(reader);
        for quad in parser.by_ref() {
            let quad: Quad = quad?;
            graph.graph.insert(&Triple::from(quad));
        }
        for (prefix, namespace) in parser.prefixes() {
            graph.prefixes.insert(prefix.into(), namespace.into());
        }
        Ok(graph)
    }

    /// Reads the file at `path`. Its format is guessed from its extension.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RdfParseError> {
        let path = path.as_ref();
        let format = format_from_path(path)?;
        debug!(path = %path.display(), ?format, "loading graph");
        Self::parse(BufReader::new(File::open(path)?), format)
    }

    /// Writes the graph to the file at `path`. Its format is guessed from its extension.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        let format = format_from_path(path)?;
        debug!(path = %path.display(), ?format, triples = self.len(), "saving graph");
        self.serialize(BufWriter::new(File::create(path)?), format)?
            .flush()
    }

    /// The underlying [`Graph`].
    #[inline]
    pub fn inner(&self) -> &Graph {
        &self.graph
    }

    #[inline]
    pub fn into_inner(self) -> Graph {
        self.graph
    }

    /// An empty graph with the same prefix bindings.
    pub(crate) fn with_same_prefixes(&self) -> Self {
        Self {
            graph: Graph::new(),
            prefixes: self.prefixes.clone(),
        }
    }
}

impl From<Graph> for OntologyGraph {
    fn from(graph: Graph) -> Self {
        Self {
            graph,
            ..Self::new()
        }
    }
}

impl<'a> IntoIterator for &'a OntologyGraph {
    type Item = TripleRef<'a>;
    type IntoIter = oxrdf::graph::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.graph.iter()
    }
}

impl PartialEq for OntologyGraph {
    /// Two graphs are equal if they hold the same triples, blank node labels included.
    fn eq(&self, other: &Self) -> bool {
        self.graph == other.graph
    }
}

impl Eq for OntologyGraph {}

/// Checks the ASCII subset of the Turtle `PN_PREFIX` production. The empty prefix is allowed.
pub(crate) fn is_prefix_name(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    let Some(first) = chars.next() else {
        return true;
    };
    first.is_ascii_alphabetic()
        && !prefix.ends_with('.')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

pub(crate) fn format_from_path(path: &Path) -> io::Result<RdfFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(RdfFormat::from_extension)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "The file {} does not have a known RDF extension",
                    path.display()
                ),
            )
        })
}

/// Returns the term as a subject if it is an IRI or a blank node.
pub(crate) fn term_as_subject(term: TermRef<'_>) -> Option<NamedOrBlankNodeRef<'_>> {
    match term {
        TermRef::NamedNode(node) => Some(node.into()),
        TermRef::BlankNode(node) => Some(node.into()),
        _ => None,
    }
}

use crate::annotation::{Annotate, Annotations};
use crate::collection::encode_non_empty_list;
use crate::error::BuildError;
use crate::store::OntologyGraph;
use crate::term::Namespace;
use crate::vocab::{owl, rdf, rdfs};
use oxrdf::{Literal, NamedNode, NamedOrBlankNode};
use rustc_hash::FxHashSet;
use tracing::debug;

/// Declares a class closed over an explicit list of individuals with `owl:oneOf`.
///
/// Members are also typed with the class itself so that tools ignoring `owl:oneOf` still see
/// them. A member listed twice is kept once, at its first position.
///
/// No superclass is implied. Controlled vocabularies usually make the class a subclass of
/// `skos:Concept`, which has to be added with [`with_super_class`](Self::with_super_class):
/// ```
/// use oxaxiom::builder::EnumeratedClassBuilder;
/// use oxaxiom::store::OntologyGraph;
/// use oxaxiom::term::Namespace;
/// use oxaxiom::vocab::{rdfs, skos};
/// use oxrdf::TripleRef;
///
/// let ns = Namespace::new("http://example.com/ns#")?;
/// let mut graph = OntologyGraph::new();
/// let members = [ns.term("female")?, ns.term("male")?];
/// let sex = EnumeratedClassBuilder::new(&ns, "Sex", "Sex", members)
///     .with_super_class(skos::CONCEPT.into_owned())
///     .build(&mut graph)?;
/// assert!(graph.contains(TripleRef::new(&sex, rdfs::SUB_CLASS_OF, skos::CONCEPT)));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct EnumeratedClassBuilder {
    namespace: Namespace,
    name: String,
    annotations: Annotations,
    members: Vec<NamedNode>,
    super_classes: Vec<NamedOrBlankNode>,
}

impl EnumeratedClassBuilder {
    pub fn new(
        namespace: &Namespace,
        name: impl Into<String>,
        label: impl Into<Literal>,
        members: impl IntoIterator<Item = NamedNode>,
    ) -> Self {
        Self {
            namespace: namespace.clone(),
            name: name.into(),
            annotations: Annotations::new(label),
            members: members.into_iter().collect(),
            super_classes: Vec::new(),
        }
    }

    pub fn with_super_class(mut self, class: impl Into<NamedOrBlankNode>) -> Self {
        self.super_classes.push(class.into());
        self
    }

    pub fn build(&self, graph: &mut OntologyGraph) -> Result<NamedNode, BuildError> {
        let class = self.namespace.declare("enumerated class", &self.name)?;
        let members = distinct(&self.members);
        if members.is_empty() {
            return Err(BuildError::EmptyList {
                construct: "enumerated class",
            });
        }
        self.annotations.write(
            graph,
            "enumerated class",
            class.as_ref(),
            Some(self.namespace.iri()),
        )?;
        graph.add(&class, rdf::TYPE, owl::CLASS);
        for super_class in &self.super_classes {
            graph.add(&class, rdfs::SUB_CLASS_OF, super_class);
        }
        let list = encode_non_empty_list(graph, "enumerated class", members.iter().copied().cloned())?;
        graph.add(&class, owl::ONE_OF, &list);
        for member in &members {
            graph.add(*member, rdf::TYPE, &class);
        }
        debug!(%class, members = members.len(), "declared enumerated class");
        Ok(class)
    }
}

impl Annotate for EnumeratedClassBuilder {
    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}

/// The elements of `values` without repetition, in first occurrence order.
pub(crate) fn distinct<T: Eq + std::hash::Hash>(values: &[T]) -> Vec<&T> {
    let mut seen = FxHashSet::default();
    values.iter().filter(|value| seen.insert(*value)).collect()
}

use crate::annotation::{Annotate, Annotations};
use crate::error::BuildError;
use crate::restriction::{Combination, Restriction, RestrictionSet, add_subclass_restrictions};
use crate::store::OntologyGraph;
use crate::term::Namespace;
use crate::vocab::{owl, rdf, rdfs};
use oxrdf::{Literal, NamedNode, NamedOrBlankNode};
use tracing::debug;

/// Declares a plain `owl:Class`.
///
/// Value and cardinality restrictions share one [`RestrictionSet`], attached according to the
/// chosen [`Combination`].
///
/// ```
/// use oxaxiom::builder::ClassBuilder;
/// use oxaxiom::store::OntologyGraph;
/// use oxaxiom::term::Namespace;
///
/// let dwc = Namespace::new("http://rs.tdwg.org/dwc/terms/")?;
/// let mut graph = OntologyGraph::new();
/// let assertion = ClassBuilder::new(&dwc, "Assertion", "Assertion")
///     .with_at_most_one([dwc.term("assertedBy")?])
///     .build(&mut graph)?;
/// assert_eq!(assertion.as_str(), "http://rs.tdwg.org/dwc/terms/Assertion");
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct ClassBuilder {
    namespace: Namespace,
    name: String,
    annotations: Annotations,
    super_classes: Vec<NamedOrBlankNode>,
    equivalent_classes: Vec<NamedOrBlankNode>,
    restrictions: RestrictionSet,
    combination: Combination,
}

impl ClassBuilder {
    pub fn new(namespace: &Namespace, name: impl Into<String>, label: impl Into<Literal>) -> Self {
        Self {
            namespace: namespace.clone(),
            name: name.into(),
            annotations: Annotations::new(label),
            super_classes: Vec::new(),
            equivalent_classes: Vec::new(),
            restrictions: RestrictionSet::new(),
            combination: Combination::default(),
        }
    }

    /// Adds a `rdfs:subClassOf` parent.
    pub fn with_super_class(mut self, class: impl Into<NamedOrBlankNode>) -> Self {
        self.super_classes.push(class.into());
        self
    }

    pub fn with_super_classes<C: Into<NamedOrBlankNode>>(
        mut self,
        classes: impl IntoIterator<Item = C>,
    ) -> Self {
        self.super_classes.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Adds an `owl:equivalentClass`.
    pub fn with_equivalent_class(mut self, class: impl Into<NamedOrBlankNode>) -> Self {
        self.equivalent_classes.push(class.into());
        self
    }

    /// Adds an existential restriction.
    pub fn with_some_values_from(
        mut self,
        property: impl Into<NamedNode>,
        filler: impl Into<NamedOrBlankNode>,
    ) -> Self {
        self.restrictions
            .push(property, Restriction::SomeValuesFrom(filler.into()));
        self
    }

    /// Adds a universal restriction.
    pub fn with_all_values_from(
        mut self,
        property: impl Into<NamedNode>,
        filler: impl Into<NamedOrBlankNode>,
    ) -> Self {
        self.restrictions
            .push(property, Restriction::AllValuesFrom(filler.into()));
        self
    }

    pub fn with_exactly_one(mut self, properties: impl IntoIterator<Item = NamedNode>) -> Self {
        self.restrictions = self.restrictions.with_exactly_one(properties);
        self
    }

    pub fn with_at_most_one(mut self, properties: impl IntoIterator<Item = NamedNode>) -> Self {
        self.restrictions = self.restrictions.with_at_most_one(properties);
        self
    }

    /// Appends all the restrictions of `restrictions`.
    pub fn with_restrictions(mut self, restrictions: &RestrictionSet) -> Self {
        for (property, restriction) in restrictions.iter() {
            self.restrictions.push(property.clone(), restriction.clone());
        }
        self
    }

    pub fn with_combination(mut self, combination: Combination) -> Self {
        self.combination = combination;
        self
    }

    /// Writes the class into `graph` and returns its IRI.
    pub fn build(&self, graph: &mut OntologyGraph) -> Result<NamedNode, BuildError> {
        let class = self.namespace.declare("class", &self.name)?;
        self.annotations
            .write(graph, "class", class.as_ref(), Some(self.namespace.iri()))?;
        graph.add(&class, rdf::TYPE, owl::CLASS);
        for super_class in &self.super_classes {
            graph.add(&class, rdfs::SUB_CLASS_OF, super_class);
        }
        for equivalent_class in &self.equivalent_classes {
            graph.add(&class, owl::EQUIVALENT_CLASS, equivalent_class);
        }
        add_subclass_restrictions(graph, &class, &self.restrictions, self.combination)?;
        debug!(
            %class,
            restrictions = self.restrictions.len(),
            combination = ?self.combination,
            "declared class"
        );
        Ok(class)
    }
}

impl Annotate for ClassBuilder {
    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::decode_list;
    use oxrdf::{TermRef, TripleRef};

    fn ns() -> Namespace {
        Namespace::new("http://example.com/ns#").unwrap()
    }

    #[test]
    fn restrictions_are_combined_in_one_intersection() {
        let ns = ns();
        let mut graph = OntologyGraph::new();
        let class = ClassBuilder::new(&ns, "Event", "Event")
            .with_super_class(ns.term("Thing").unwrap())
            .with_exactly_one([ns.term("eventID").unwrap()])
            .with_at_most_one([ns.term("eventDate").unwrap(), ns.term("eventTime").unwrap()])
            .build(&mut graph)
            .unwrap();
        let supers = graph
            .objects_for_subject_predicate(&class, rdfs::SUB_CLASS_OF)
            .collect::<Vec<_>>();
        assert_eq!(supers.len(), 2);
        assert!(supers.contains(&ns.term("Thing").unwrap().as_ref().into()));
        let intersection = supers
            .iter()
            .find_map(|s| match s {
                TermRef::BlankNode(b) => Some(*b),
                _ => None,
            })
            .unwrap();
        let list = graph
            .object_for_subject_predicate(intersection, owl::INTERSECTION_OF)
            .unwrap();
        assert_eq!(decode_list(&graph, list).unwrap().len(), 3);
    }

    #[test]
    fn separate_combination() {
        let ns = ns();
        let mut graph = OntologyGraph::new();
        let class = ClassBuilder::new(&ns, "Event", "Event")
            .with_some_values_from(ns.term("p").unwrap(), ns.term("D").unwrap())
            .with_all_values_from(ns.term("q").unwrap(), ns.term("E").unwrap())
            .with_combination(Combination::Separate)
            .build(&mut graph)
            .unwrap();
        assert_eq!(
            graph
                .objects_for_subject_predicate(&class, rdfs::SUB_CLASS_OF)
                .count(),
            2
        );
        assert_eq!(graph.triples_for_predicate(owl::INTERSECTION_OF).count(), 0);
    }

    #[test]
    fn metadata_and_declaration() {
        let ns = ns();
        let mut graph = OntologyGraph::new();
        let class = ClassBuilder::new(&ns, "Agent", "Agent")
            .with_definition("A person, group, or organization.")
            .with_equivalent_class(NamedNode::new_unchecked("http://purl.org/dc/terms/Agent"))
            .build(&mut graph)
            .unwrap();
        assert!(graph.contains(TripleRef::new(&class, rdf::TYPE, owl::CLASS)));
        assert!(graph.contains(TripleRef::new(&class, rdfs::IS_DEFINED_BY, ns.iri())));
        assert_eq!(graph.len(), 5);
    }

    #[test]
    fn missing_name_or_label_writes_nothing() {
        let ns = ns();
        let mut graph = OntologyGraph::new();
        assert!(matches!(
            ClassBuilder::new(&ns, "", "Agent").build(&mut graph),
            Err(BuildError::MissingName { construct: "class" })
        ));
        assert!(matches!(
            ClassBuilder::new(&ns, "Agent", "").build(&mut graph),
            Err(BuildError::MissingLabel { .. })
        ));
        assert!(graph.is_empty());
    }
}

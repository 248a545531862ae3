use crate::annotation::{Annotate, Annotations};
use crate::builder::enumeration::distinct;
use crate::error::BuildError;
use crate::restriction::{
    DatatypeRestriction, OperandKind, add_datatype_restriction, add_one_of, single_or_union,
};
use crate::store::OntologyGraph;
use crate::term::{Namespace, OneOrMany};
use crate::vocab::{owl, rdf, rdfs};
use oxrdf::{Literal, NamedNode, NamedNodeRef, NamedOrBlankNode, Term};
use std::fmt;
use tracing::debug;

/// The two kinds of OWL properties the builder declares.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum PropertyKind {
    /// `owl:DatatypeProperty`, its values are literals.
    Datatype,
    /// `owl:ObjectProperty`, its values are individuals.
    Object,
}

impl PropertyKind {
    fn rdf_type(self) -> NamedNodeRef<'static> {
        match self {
            Self::Datatype => owl::DATATYPE_PROPERTY,
            Self::Object => owl::OBJECT_PROPERTY,
        }
    }

    fn operands(self) -> OperandKind {
        match self {
            Self::Datatype => OperandKind::Datatype,
            Self::Object => OperandKind::Class,
        }
    }

    fn plural(self) -> &'static str {
        match self {
            Self::Datatype => "datatype properties",
            Self::Object => "object properties",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// The `rdfs:range` of a property.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum PropertyRange {
    /// A class or a datatype, or the union of several of them.
    Nodes(OneOrMany),
    /// A closed set of literals or individuals.
    OneOf(Vec<Term>),
    /// A datatype restricted by facets. Only valid on datatype properties.
    Restricted(DatatypeRestriction),
}

impl From<NamedNode> for PropertyRange {
    fn from(node: NamedNode) -> Self {
        Self::Nodes(node.into())
    }
}

impl From<NamedNodeRef<'_>> for PropertyRange {
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self::Nodes(node.into())
    }
}

impl From<Vec<NamedNode>> for PropertyRange {
    fn from(nodes: Vec<NamedNode>) -> Self {
        Self::Nodes(nodes.into())
    }
}

impl From<OneOrMany> for PropertyRange {
    fn from(nodes: OneOrMany) -> Self {
        Self::Nodes(nodes)
    }
}

impl From<DatatypeRestriction> for PropertyRange {
    fn from(restriction: DatatypeRestriction) -> Self {
        Self::Restricted(restriction)
    }
}

/// The property characteristics expressed as extra `rdf:type`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum PropertyCharacteristic {
    Functional,
    InverseFunctional,
    Transitive,
    Symmetric,
    Asymmetric,
    Reflexive,
    Irreflexive,
}

impl PropertyCharacteristic {
    pub fn iri(self) -> NamedNodeRef<'static> {
        match self {
            Self::Functional => owl::FUNCTIONAL_PROPERTY,
            Self::InverseFunctional => owl::INVERSE_FUNCTIONAL_PROPERTY,
            Self::Transitive => owl::TRANSITIVE_PROPERTY,
            Self::Symmetric => owl::SYMMETRIC_PROPERTY,
            Self::Asymmetric => owl::ASYMMETRIC_PROPERTY,
            Self::Reflexive => owl::REFLEXIVE_PROPERTY,
            Self::Irreflexive => owl::IRREFLEXIVE_PROPERTY,
        }
    }
}

/// Declares an `owl:DatatypeProperty` or an `owl:ObjectProperty`.
///
/// ```
/// use oxaxiom::builder::PropertyBuilder;
/// use oxaxiom::restriction::DatatypeRestriction;
/// use oxaxiom::store::OntologyGraph;
/// use oxaxiom::term::Namespace;
/// use oxaxiom::vocab::xsd;
///
/// let dwc = Namespace::new("http://rs.tdwg.org/dwc/terms/")?;
/// let mut graph = OntologyGraph::new();
/// PropertyBuilder::datatype(&dwc, "maximumDepthInMeters", "Maximum Depth In Meters")
///     .with_domain(dwc.term("Event")?)
///     .with_range(DatatypeRestriction::inclusive_range(xsd::DECIMAL, "0", "11000"))
///     .build(&mut graph)?;
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct PropertyBuilder {
    kind: PropertyKind,
    namespace: Namespace,
    name: String,
    annotations: Annotations,
    domain: Option<OneOrMany>,
    range: Option<PropertyRange>,
    super_properties: Vec<NamedNode>,
    equivalent_properties: Vec<NamedNode>,
    inverse: Option<NamedNode>,
    characteristics: Vec<PropertyCharacteristic>,
    additional_types: Vec<NamedNode>,
}

impl PropertyBuilder {
    pub fn new(
        kind: PropertyKind,
        namespace: &Namespace,
        name: impl Into<String>,
        label: impl Into<Literal>,
    ) -> Self {
        Self {
            kind,
            namespace: namespace.clone(),
            name: name.into(),
            annotations: Annotations::new(label),
            domain: None,
            range: None,
            super_properties: Vec::new(),
            equivalent_properties: Vec::new(),
            inverse: None,
            characteristics: Vec::new(),
            additional_types: Vec::new(),
        }
    }

    /// Shortcut for [`PropertyBuilder::new`] with [`PropertyKind::Datatype`].
    pub fn datatype(namespace: &Namespace, name: impl Into<String>, label: impl Into<Literal>) -> Self {
        Self::new(PropertyKind::Datatype, namespace, name, label)
    }

    /// Shortcut for [`PropertyBuilder::new`] with [`PropertyKind::Object`].
    pub fn object(namespace: &Namespace, name: impl Into<String>, label: impl Into<Literal>) -> Self {
        Self::new(PropertyKind::Object, namespace, name, label)
    }

    /// Sets the `rdfs:domain`. Several classes are combined in an `owl:unionOf`.
    pub fn with_domain(mut self, domain: impl Into<OneOrMany>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Sets the `rdfs:range`.
    pub fn with_range(mut self, range: impl Into<PropertyRange>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// Sets the range to a closed set of values with `owl:oneOf`.
    ///
    /// A value listed twice is kept once, at its first position.
    pub fn with_range_one_of<T: Into<Term>>(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.range = Some(PropertyRange::OneOf(
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn with_super_property(mut self, property: impl Into<NamedNode>) -> Self {
        self.super_properties.push(property.into());
        self
    }

    pub fn with_equivalent_property(mut self, property: impl Into<NamedNode>) -> Self {
        self.equivalent_properties.push(property.into());
        self
    }

    /// Sets the `owl:inverseOf`. Only valid on object properties.
    pub fn with_inverse(mut self, property: impl Into<NamedNode>) -> Self {
        self.inverse = Some(property.into());
        self
    }

    pub fn with_characteristic(mut self, characteristic: PropertyCharacteristic) -> Self {
        self.characteristics.push(characteristic);
        self
    }

    /// Adds an arbitrary `rdf:type`, like `owl:AnnotationProperty`.
    pub fn with_type(mut self, rdf_type: impl Into<NamedNode>) -> Self {
        self.additional_types.push(rdf_type.into());
        self
    }

    /// Checks the options that only apply to one kind of property.
    fn validate(&self) -> Result<(), BuildError> {
        let not_applicable = |construct: &'static str| BuildError::NotApplicable {
            construct,
            kind: self.kind.plural(),
        };
        if self.kind == PropertyKind::Datatype {
            if self.inverse.is_some() {
                return Err(not_applicable("owl:inverseOf"));
            }
            if let Some(characteristic) = self
                .characteristics
                .iter()
                .find(|c| **c != PropertyCharacteristic::Functional)
            {
                return Err(not_applicable(characteristic.iri().as_str()));
            }
        }
        if self.domain.as_ref().is_some_and(OneOrMany::is_empty) {
            return Err(BuildError::EmptyList {
                construct: "property domain",
            });
        }
        match &self.range {
            Some(PropertyRange::Nodes(nodes)) if nodes.is_empty() => Err(BuildError::EmptyList {
                construct: "property range",
            }),
            Some(PropertyRange::OneOf(values)) if values.is_empty() => {
                Err(BuildError::EmptyList {
                    construct: "enumerated range",
                })
            }
            Some(PropertyRange::Restricted(restriction)) => {
                if self.kind == PropertyKind::Object {
                    return Err(not_applicable("A datatype restriction range"));
                }
                restriction.validate()
            }
            _ => Ok(()),
        }
    }

    /// Writes the property into `graph` and returns its IRI.
    pub fn build(&self, graph: &mut OntologyGraph) -> Result<NamedNode, BuildError> {
        let property = self.namespace.declare("property", &self.name)?;
        self.validate()?;
        self.annotations.write(
            graph,
            "property",
            property.as_ref(),
            Some(self.namespace.iri()),
        )?;
        graph.add(&property, rdf::TYPE, self.kind.rdf_type());
        if let Some(domain) = &self.domain {
            let domain = single_or_union(graph, OperandKind::Class, domain.as_slice())?;
            graph.add(&property, rdfs::DOMAIN, &domain);
        }
        if let Some(range) = &self.range {
            let range: NamedOrBlankNode = match range {
                PropertyRange::Nodes(nodes) => {
                    single_or_union(graph, self.kind.operands(), nodes.as_slice())?
                }
                PropertyRange::OneOf(values) => {
                    add_one_of(graph, self.kind.operands(), distinct(values).into_iter().cloned())?
                        .into()
                }
                PropertyRange::Restricted(restriction) => {
                    add_datatype_restriction(graph, restriction)?.into()
                }
            };
            graph.add(&property, rdfs::RANGE, &range);
        }
        for super_property in &self.super_properties {
            graph.add(&property, rdfs::SUB_PROPERTY_OF, super_property);
        }
        for equivalent_property in &self.equivalent_properties {
            graph.add(&property, owl::EQUIVALENT_PROPERTY, equivalent_property);
        }
        if let Some(inverse) = &self.inverse {
            graph.add(&property, owl::INVERSE_OF, inverse);
        }
        for characteristic in &self.characteristics {
            graph.add(&property, rdf::TYPE, characteristic.iri());
        }
        for additional_type in &self.additional_types {
            graph.add(&property, rdf::TYPE, additional_type);
        }
        debug!(%property, kind = %self.kind, "declared property");
        Ok(property)
    }
}

impl Annotate for PropertyBuilder {
    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::decode_list;
    use crate::vocab::xsd;
    use oxrdf::{TermRef, TripleRef};

    fn ns() -> Namespace {
        Namespace::new("http://example.com/ns#").unwrap()
    }

    fn range_node<'a>(graph: &'a OntologyGraph, property: &NamedNode) -> TermRef<'a> {
        graph
            .object_for_subject_predicate(property, rdfs::RANGE)
            .unwrap()
    }

    #[test]
    fn datatype_union_range() {
        let ns = ns();
        let mut graph = OntologyGraph::new();
        let property = PropertyBuilder::datatype(&ns, "eventDate", "Event Date")
            .with_domain([ns.term("Event").unwrap(), ns.term("Occurrence").unwrap()])
            .with_range(OneOrMany::from([xsd::DATE.into_owned(), xsd::DATE_TIME.into_owned()]))
            .build(&mut graph)
            .unwrap();
        let TermRef::BlankNode(range) = range_node(&graph, &property) else {
            panic!("expected a union node")
        };
        assert!(graph.contains(TripleRef::new(range, rdf::TYPE, rdfs::DATATYPE)));
        let TermRef::BlankNode(domain) = graph
            .object_for_subject_predicate(&property, rdfs::DOMAIN)
            .unwrap()
        else {
            panic!("expected a union node")
        };
        assert!(graph.contains(TripleRef::new(domain, rdf::TYPE, owl::CLASS)));
    }

    #[test]
    fn object_union_range_is_a_class() {
        let ns = ns();
        let mut graph = OntologyGraph::new();
        let property = PropertyBuilder::object(&ns, "about", "About")
            .with_range([ns.term("Agent").unwrap(), ns.term("Event").unwrap()].to_vec())
            .build(&mut graph)
            .unwrap();
        let TermRef::BlankNode(range) = range_node(&graph, &property) else {
            panic!("expected a union node")
        };
        assert!(graph.contains(TripleRef::new(range, rdf::TYPE, owl::CLASS)));
    }

    #[test]
    fn single_range_is_used_directly() {
        let ns = ns();
        let mut graph = OntologyGraph::new();
        let property = PropertyBuilder::datatype(&ns, "eventID", "Event ID")
            .with_range(xsd::STRING)
            .with_characteristic(PropertyCharacteristic::Functional)
            .build(&mut graph)
            .unwrap();
        assert_eq!(range_node(&graph, &property), xsd::STRING.into());
        assert!(graph.contains(TripleRef::new(&property, rdf::TYPE, owl::FUNCTIONAL_PROPERTY)));
    }

    #[test]
    fn enumerated_literal_range() {
        let ns = ns();
        let mut graph = OntologyGraph::new();
        let property = PropertyBuilder::datatype(&ns, "sex", "Sex")
            .with_range_one_of(["female", "male", "female", "hermaphrodite"].map(Literal::from))
            .build(&mut graph)
            .unwrap();
        let TermRef::BlankNode(range) = range_node(&graph, &property) else {
            panic!("expected an enumeration node")
        };
        assert!(graph.contains(TripleRef::new(range, rdf::TYPE, rdfs::DATATYPE)));
        let list = graph.object_for_subject_predicate(range, owl::ONE_OF).unwrap();
        assert_eq!(
            decode_list(&graph, list).unwrap(),
            ["female", "male", "hermaphrodite"].map(|v| Term::from(Literal::from(v)))
        );
    }

    #[test]
    fn restricted_range() {
        let ns = ns();
        let mut graph = OntologyGraph::new();
        let property = PropertyBuilder::datatype(&ns, "depth", "Depth")
            .with_range(DatatypeRestriction::inclusive_range(xsd::DECIMAL, "0", "11000"))
            .build(&mut graph)
            .unwrap();
        let TermRef::BlankNode(range) = range_node(&graph, &property) else {
            panic!("expected a datatype node")
        };
        assert_eq!(
            graph.object_for_subject_predicate(range, owl::ON_DATATYPE),
            Some(xsd::DECIMAL.into())
        );
    }

    #[test]
    fn object_only_options_are_rejected_on_datatype_properties() {
        let ns = ns();
        let mut graph = OntologyGraph::new();
        assert!(matches!(
            PropertyBuilder::datatype(&ns, "p", "p")
                .with_inverse(ns.term("q").unwrap())
                .build(&mut graph),
            Err(BuildError::NotApplicable { .. })
        ));
        assert!(matches!(
            PropertyBuilder::datatype(&ns, "p", "p")
                .with_characteristic(PropertyCharacteristic::Transitive)
                .build(&mut graph),
            Err(BuildError::NotApplicable { .. })
        ));
        assert!(matches!(
            PropertyBuilder::object(&ns, "p", "p")
                .with_range(DatatypeRestriction::inclusive_range(xsd::DECIMAL, "0", "1"))
                .build(&mut graph),
            Err(BuildError::NotApplicable { .. })
        ));
        assert!(matches!(
            PropertyBuilder::datatype(&ns, "p", "p")
                .with_range(DatatypeRestriction::inclusive_range(xsd::DECIMAL, "zero", "1"))
                .build(&mut graph),
            Err(BuildError::InvalidFacetValue { .. })
        ));
        assert!(matches!(
            PropertyBuilder::datatype(&ns, "p", "p")
                .with_range_one_of(Vec::<Literal>::new())
                .build(&mut graph),
            Err(BuildError::EmptyList { .. })
        ));
        assert!(graph.is_empty());
    }

    #[test]
    fn object_property_extras() {
        let ns = ns();
        let mut graph = OntologyGraph::new();
        let property = PropertyBuilder::object(&ns, "isPartOf", "Is Part Of")
            .with_inverse(ns.term("hasPart").unwrap())
            .with_super_property(ns.term("relatedTo").unwrap())
            .with_equivalent_property(NamedNode::new_unchecked("http://purl.org/dc/terms/isPartOf"))
            .with_characteristic(PropertyCharacteristic::Transitive)
            .with_type(NamedNode::new_unchecked("http://example.com/Custom"))
            .build(&mut graph)
            .unwrap();
        assert_eq!(
            graph
                .objects_for_subject_predicate(&property, rdf::TYPE)
                .count(),
            3
        );
        assert!(graph.contains(TripleRef::new(&property, owl::INVERSE_OF, &ns.term("hasPart").unwrap())));
    }
}

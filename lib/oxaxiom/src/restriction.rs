//! Property restrictions and the boolean class expressions combining them.
//!
//! Every compound expression is written with a fresh blank node and never reused.

use crate::collection::encode_non_empty_list;
use crate::error::BuildError;
use crate::store::OntologyGraph;
use crate::vocab::{facet, owl, rdf, rdfs, xsd};
use oxrdf::{BlankNode, Literal, NamedNode, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Term};
use oxsdatatypes::{Date, DateTime, Decimal, Double, Float, Integer};
use regex::Regex;
use std::str::FromStr;

/// A single [property restriction](https://www.w3.org/TR/owl2-mapping-to-rdf/#Class_Expressions).
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Restriction {
    /// `owl:someValuesFrom`
    SomeValuesFrom(NamedOrBlankNode),
    /// `owl:allValuesFrom`
    AllValuesFrom(NamedOrBlankNode),
    /// `owl:cardinality`
    ExactCardinality(u32),
    /// `owl:maxCardinality`
    MaxCardinality(u32),
    /// `owl:minCardinality`
    MinCardinality(u32),
}

impl Restriction {
    fn constraint(&self) -> (NamedNodeRef<'static>, Term) {
        match self {
            Self::SomeValuesFrom(filler) => (owl::SOME_VALUES_FROM, filler.clone().into()),
            Self::AllValuesFrom(filler) => (owl::ALL_VALUES_FROM, filler.clone().into()),
            Self::ExactCardinality(n) => (owl::CARDINALITY, cardinality(*n).into()),
            Self::MaxCardinality(n) => (owl::MAX_CARDINALITY, cardinality(*n).into()),
            Self::MinCardinality(n) => (owl::MIN_CARDINALITY, cardinality(*n).into()),
        }
    }
}

fn cardinality(n: u32) -> Literal {
    Literal::new_typed_literal(n.to_string(), xsd::NON_NEGATIVE_INTEGER)
}

/// Writes a restriction node and returns it.
///
/// The node always gets exactly three triples: its `owl:Restriction` type, its `owl:onProperty`
/// and the constraint itself.
pub fn add_restriction<'a>(
    graph: &mut OntologyGraph,
    property: impl Into<NamedOrBlankNodeRef<'a>>,
    restriction: &Restriction,
) -> BlankNode {
    let property: NamedOrBlankNodeRef<'a> = property.into();
    let node = BlankNode::default();
    let (predicate, value) = restriction.constraint();
    graph.add(&node, rdf::TYPE, owl::RESTRICTION);
    graph.add(&node, owl::ON_PROPERTY, property);
    graph.add(&node, predicate, &value);
    node
}

/// An ordered list of restrictions, each on its own property.
///
/// ```
/// use oxaxiom::restriction::{Restriction, RestrictionSet};
/// use oxrdf::NamedNode;
///
/// let title = NamedNode::new("http://example.com/title")?;
/// let note = NamedNode::new("http://example.com/note")?;
/// let set = RestrictionSet::from_cardinalities([note.clone()], [title.clone()]);
/// assert_eq!(
///     set.iter().collect::<Vec<_>>(),
///     [
///         (&note, &Restriction::ExactCardinality(1)),
///         (&title, &Restriction::MaxCardinality(1))
///     ]
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Default, Hash)]
pub struct RestrictionSet {
    entries: Vec<(NamedNode, Restriction)>,
}

impl RestrictionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set of an "exactly one" list followed by an "at most one" list.
    pub fn from_cardinalities(
        exactly_one: impl IntoIterator<Item = NamedNode>,
        at_most_one: impl IntoIterator<Item = NamedNode>,
    ) -> Self {
        Self::new()
            .with_exactly_one(exactly_one)
            .with_at_most_one(at_most_one)
    }

    /// Appends a restriction.
    #[must_use]
    pub fn with(mut self, property: impl Into<NamedNode>, restriction: Restriction) -> Self {
        self.push(property, restriction);
        self
    }

    /// Appends an `owl:cardinality 1` restriction for each property.
    #[must_use]
    pub fn with_exactly_one(mut self, properties: impl IntoIterator<Item = NamedNode>) -> Self {
        for property in properties {
            self.push(property, Restriction::ExactCardinality(1));
        }
        self
    }

    /// Appends an `owl:maxCardinality 1` restriction for each property.
    #[must_use]
    pub fn with_at_most_one(mut self, properties: impl IntoIterator<Item = NamedNode>) -> Self {
        for property in properties {
            self.push(property, Restriction::MaxCardinality(1));
        }
        self
    }

    pub fn push(&mut self, property: impl Into<NamedNode>, restriction: Restriction) {
        self.entries.push((property.into(), restriction));
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&NamedNode, &Restriction)> {
        self.entries.iter().map(|(p, r)| (p, r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn write(&self, graph: &mut OntologyGraph) -> Vec<BlankNode> {
        self.entries
            .iter()
            .map(|(property, restriction)| add_restriction(graph, property, restriction))
            .collect()
    }
}

impl FromIterator<(NamedNode, Restriction)> for RestrictionSet {
    fn from_iter<I: IntoIterator<Item = (NamedNode, Restriction)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// How a [`RestrictionSet`] is attached to a class as necessary conditions.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default, Hash)]
pub enum Combination {
    /// A single `rdfs:subClassOf` to one `owl:intersectionOf` of all the restrictions.
    ///
    /// Used even if there is a single restriction.
    #[default]
    Intersection,
    /// One `rdfs:subClassOf` per restriction.
    Separate,
}

/// Attaches `restrictions` to `class` with `rdfs:subClassOf` triples.
///
/// An empty set writes nothing.
pub fn add_subclass_restrictions<'a>(
    graph: &mut OntologyGraph,
    class: impl Into<NamedOrBlankNodeRef<'a>>,
    restrictions: &RestrictionSet,
    combination: Combination,
) -> Result<(), BuildError> {
    if restrictions.is_empty() {
        return Ok(());
    }
    let class: NamedOrBlankNodeRef<'a> = class.into();
    let nodes = restrictions.write(graph);
    match combination {
        Combination::Intersection => {
            let intersection = add_intersection(graph, nodes)?;
            graph.add(class, rdfs::SUB_CLASS_OF, &intersection);
        }
        Combination::Separate => {
            for node in &nodes {
                graph.add(class, rdfs::SUB_CLASS_OF, node);
            }
        }
    }
    Ok(())
}

/// Writes the single class expression equivalent to the conjunction of `restrictions`.
///
/// It is the restriction itself if there is only one and an `owl:intersectionOf` otherwise.
pub fn add_restriction_conjunction(
    graph: &mut OntologyGraph,
    restrictions: &RestrictionSet,
) -> Result<BlankNode, BuildError> {
    let mut nodes = restrictions.write(graph);
    match nodes.len() {
        0 => Err(BuildError::EmptyList {
            construct: "restriction set",
        }),
        1 => Ok(nodes.remove(0)),
        _ => add_intersection(graph, nodes),
    }
}

/// Asserts `class owl:equivalentClass` the conjunction of `restrictions`.
///
/// A single `owl:equivalentClass` triple is written whatever the size of the set.
pub fn add_equivalent_restrictions<'a>(
    graph: &mut OntologyGraph,
    class: impl Into<NamedOrBlankNodeRef<'a>>,
    restrictions: &RestrictionSet,
) -> Result<BlankNode, BuildError> {
    let class: NamedOrBlankNodeRef<'a> = class.into();
    let expression = add_restriction_conjunction(graph, restrictions)?;
    graph.add(class, owl::EQUIVALENT_CLASS, &expression);
    Ok(expression)
}

/// Writes an `owl:Class` node with `owl:intersectionOf` the given operands.
pub fn add_intersection<T: Into<Term>>(
    graph: &mut OntologyGraph,
    operands: impl IntoIterator<Item = T>,
) -> Result<BlankNode, BuildError> {
    let list = encode_non_empty_list(graph, "intersection", operands)?;
    let node = BlankNode::default();
    graph.add(&node, rdf::TYPE, owl::CLASS);
    graph.add(&node, owl::INTERSECTION_OF, &list);
    Ok(node)
}

/// What the operands of a boolean expression or an enumeration are.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum OperandKind {
    /// Classes or individuals, the node is typed `owl:Class`.
    Class,
    /// Datatypes or literals, the node is typed `rdfs:Datatype`.
    Datatype,
}

impl OperandKind {
    fn node_type(self) -> NamedNodeRef<'static> {
        match self {
            Self::Class => owl::CLASS,
            Self::Datatype => rdfs::DATATYPE,
        }
    }
}

/// Writes an `owl:unionOf` node over the given operands.
pub fn add_union<T: Into<Term>>(
    graph: &mut OntologyGraph,
    kind: OperandKind,
    operands: impl IntoIterator<Item = T>,
) -> Result<BlankNode, BuildError> {
    let list = encode_non_empty_list(graph, "union", operands)?;
    let node = BlankNode::default();
    graph.add(&node, rdf::TYPE, kind.node_type());
    graph.add(&node, owl::UNION_OF, &list);
    Ok(node)
}

/// Writes an `owl:oneOf` node enumerating the given individuals or literals.
pub fn add_one_of<T: Into<Term>>(
    graph: &mut OntologyGraph,
    kind: OperandKind,
    members: impl IntoIterator<Item = T>,
) -> Result<BlankNode, BuildError> {
    let list = encode_non_empty_list(graph, "enumeration", members)?;
    let node = BlankNode::default();
    graph.add(&node, rdf::TYPE, kind.node_type());
    graph.add(&node, owl::ONE_OF, &list);
    Ok(node)
}

/// Returns the single operand itself or writes an `owl:unionOf` node over all of them.
pub(crate) fn single_or_union(
    graph: &mut OntologyGraph,
    kind: OperandKind,
    operands: &[NamedNode],
) -> Result<NamedOrBlankNode, BuildError> {
    match operands {
        [single] => Ok(single.clone().into()),
        _ => Ok(add_union(graph, kind, operands.iter().cloned())?.into()),
    }
}

/// A [constraining facet](https://www.w3.org/TR/xmlschema11-2/#rf-facets) usable in `owl:withRestrictions`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Facet {
    MinInclusive,
    MaxInclusive,
    MinExclusive,
    MaxExclusive,
    Length,
    MinLength,
    MaxLength,
    Pattern,
    TotalDigits,
    FractionDigits,
}

impl Facet {
    pub fn iri(self) -> NamedNodeRef<'static> {
        match self {
            Self::MinInclusive => facet::MIN_INCLUSIVE,
            Self::MaxInclusive => facet::MAX_INCLUSIVE,
            Self::MinExclusive => facet::MIN_EXCLUSIVE,
            Self::MaxExclusive => facet::MAX_EXCLUSIVE,
            Self::Length => facet::LENGTH,
            Self::MinLength => facet::MIN_LENGTH,
            Self::MaxLength => facet::MAX_LENGTH,
            Self::Pattern => facet::PATTERN,
            Self::TotalDigits => facet::TOTAL_DIGITS,
            Self::FractionDigits => facet::FRACTION_DIGITS,
        }
    }

    /// Builds the facet value literal, checking it against the restricted datatype.
    fn value(self, datatype: NamedNodeRef<'_>, value: &str) -> Result<Literal, BuildError> {
        let invalid = || BuildError::InvalidFacetValue {
            facet: self.iri().into_owned(),
            datatype: datatype.into_owned(),
            value: value.to_owned(),
        };
        let unsupported = || BuildError::UnsupportedFacetDatatype {
            facet: self.iri().into_owned(),
            datatype: datatype.into_owned(),
        };
        match self {
            Self::MinInclusive | Self::MaxInclusive | Self::MinExclusive | Self::MaxExclusive => {
                let valid = match ValueSpace::of(datatype).ok_or_else(unsupported)? {
                    ValueSpace::Decimal => Decimal::from_str(value).is_ok(),
                    ValueSpace::Integer { min, max } => Integer::from_str(value)
                        .is_ok_and(|v| (min..=max).contains(&i64::from(v))),
                    ValueSpace::Double => Double::from_str(value).is_ok(),
                    ValueSpace::Float => Float::from_str(value).is_ok(),
                    ValueSpace::Date => Date::from_str(value).is_ok(),
                    ValueSpace::DateTime => DateTime::from_str(value).is_ok(),
                };
                if !valid {
                    return Err(invalid());
                }
                Ok(Literal::new_typed_literal(value, datatype))
            }
            Self::Length | Self::MinLength | Self::MaxLength | Self::FractionDigits => {
                if !Integer::from_str(value).is_ok_and(|v| i64::from(v) >= 0) {
                    return Err(invalid());
                }
                if self == Self::FractionDigits && !is_decimal_based(datatype) {
                    return Err(unsupported());
                }
                Ok(Literal::new_typed_literal(value, xsd::NON_NEGATIVE_INTEGER))
            }
            Self::TotalDigits => {
                if !Integer::from_str(value).is_ok_and(|v| i64::from(v) > 0) {
                    return Err(invalid());
                }
                if !is_decimal_based(datatype) {
                    return Err(unsupported());
                }
                Ok(Literal::new_typed_literal(value, xsd::POSITIVE_INTEGER))
            }
            Self::Pattern => {
                if Regex::new(value).is_err() {
                    return Err(invalid());
                }
                Ok(Literal::new_simple_literal(value))
            }
        }
    }
}

/// The value spaces that support range facets.
enum ValueSpace {
    Decimal,
    Integer { min: i64, max: i64 },
    Double,
    Float,
    Date,
    DateTime,
}

impl ValueSpace {
    fn of(datatype: NamedNodeRef<'_>) -> Option<Self> {
        Some(match datatype {
            xsd::DECIMAL => Self::Decimal,
            xsd::DOUBLE => Self::Double,
            xsd::FLOAT => Self::Float,
            xsd::DATE => Self::Date,
            xsd::DATE_TIME => Self::DateTime,
            xsd::INTEGER | xsd::LONG => Self::Integer {
                min: i64::MIN,
                max: i64::MAX,
            },
            xsd::INT => Self::Integer {
                min: i32::MIN.into(),
                max: i32::MAX.into(),
            },
            xsd::NON_NEGATIVE_INTEGER => Self::Integer { min: 0, max: i64::MAX },
            xsd::POSITIVE_INTEGER => Self::Integer { min: 1, max: i64::MAX },
            xsd::NON_POSITIVE_INTEGER => Self::Integer { min: i64::MIN, max: 0 },
            xsd::NEGATIVE_INTEGER => Self::Integer { min: i64::MIN, max: -1 },
            _ => return None,
        })
    }
}

fn is_decimal_based(datatype: NamedNodeRef<'_>) -> bool {
    matches!(
        ValueSpace::of(datatype),
        Some(ValueSpace::Decimal | ValueSpace::Integer { .. })
    )
}

/// A datatype restricted by facets, like `xsd:decimal[>= 0, <= 11000]`.
///
/// The facets are kept in insertion order and only checked when the restriction is written.
///
/// ```
/// use oxaxiom::restriction::{DatatypeRestriction, Facet};
/// use oxaxiom::vocab::xsd;
///
/// let elevation = DatatypeRestriction::new(xsd::DECIMAL)
///     .with_facet(Facet::MinInclusive, "0")
///     .with_facet(Facet::MaxInclusive, "11000");
/// assert_eq!(elevation.facets().len(), 2);
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct DatatypeRestriction {
    datatype: NamedNode,
    facets: Vec<(Facet, String)>,
}

impl DatatypeRestriction {
    pub fn new(datatype: impl Into<NamedNode>) -> Self {
        Self {
            datatype: datatype.into(),
            facets: Vec::new(),
        }
    }

    /// Shortcut for a closed range with `xsd:minInclusive` and `xsd:maxInclusive`.
    pub fn inclusive_range(
        datatype: impl Into<NamedNode>,
        min: impl Into<String>,
        max: impl Into<String>,
    ) -> Self {
        Self::new(datatype)
            .with_facet(Facet::MinInclusive, min)
            .with_facet(Facet::MaxInclusive, max)
    }

    #[must_use]
    pub fn with_facet(mut self, facet: Facet, value: impl Into<String>) -> Self {
        self.facets.push((facet, value.into()));
        self
    }

    pub fn datatype(&self) -> NamedNodeRef<'_> {
        self.datatype.as_ref()
    }

    pub fn facets(&self) -> &[(Facet, String)] {
        &self.facets
    }

    /// Checks that there is at least one facet and that every value is valid.
    pub fn validate(&self) -> Result<(), BuildError> {
        self.facet_values().map(|_| ())
    }

    fn facet_values(&self) -> Result<Vec<(NamedNodeRef<'static>, Literal)>, BuildError> {
        if self.facets.is_empty() {
            return Err(BuildError::EmptyList {
                construct: "datatype restriction",
            });
        }
        self.facets
            .iter()
            .map(|(facet, value)| Ok((facet.iri(), facet.value(self.datatype(), value)?)))
            .collect()
    }
}

/// Writes a fresh `rdfs:Datatype` node with `owl:onDatatype` and `owl:withRestrictions`.
///
/// Fails if there is no facet or if a facet value is not valid for the base datatype.
/// Nothing is written in this case.
pub fn add_datatype_restriction(
    graph: &mut OntologyGraph,
    restriction: &DatatypeRestriction,
) -> Result<BlankNode, BuildError> {
    let facet_nodes = restriction
        .facet_values()?
        .into_iter()
        .map(|(facet, value)| {
            let node = BlankNode::default();
            graph.add(&node, facet, &value);
            node
        })
        .collect::<Vec<_>>();
    let list = encode_non_empty_list(graph, "datatype restriction", facet_nodes)?;
    let node = BlankNode::default();
    graph.add(&node, rdf::TYPE, rdfs::DATATYPE);
    graph.add(&node, owl::ON_DATATYPE, &restriction.datatype);
    graph.add(&node, owl::WITH_RESTRICTIONS, &list);
    Ok(node)
}

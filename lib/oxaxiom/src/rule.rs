//! [SWRL](https://www.w3.org/submissions/SWRL/) rules in their RDF encoding.
//!
//! ```
//! use oxaxiom::rule::{add_class_atom, add_property_atom, add_rule, add_variable};
//! use oxaxiom::store::OntologyGraph;
//! use oxaxiom::term::Namespace;
//!
//! // Occurrence(?o) ∧ hasEvent(?o, ?e) → Event(?e)
//! let ns = Namespace::new("http://example.com/ns#")?;
//! let mut graph = OntologyGraph::new();
//! let o = add_variable(&mut graph, ns.term("o")?);
//! let e = add_variable(&mut graph, ns.term("e")?);
//! let body = [
//!     add_class_atom(&mut graph, ns.term("Occurrence")?, &o),
//!     add_property_atom(&mut graph, ns.term("hasEvent")?, &o, &e),
//! ];
//! let head = [add_class_atom(&mut graph, ns.term("Event")?, &e)];
//! add_rule(&mut graph, body, head)?;
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::collection::encode_non_empty_list;
use crate::error::BuildError;
use crate::store::OntologyGraph;
use crate::vocab::{rdf, swrl};
use oxrdf::{BlankNode, NamedNode, NamedOrBlankNode, NamedOrBlankNodeRef, Term};
use tracing::debug;

/// Declares `iri` as a `swrl:Variable` and returns it.
pub fn add_variable(graph: &mut OntologyGraph, iri: NamedNode) -> NamedNode {
    graph.add(&iri, rdf::TYPE, swrl::VARIABLE);
    iri
}

/// Writes a `swrl:ClassAtom`: `argument` is an instance of `class`.
pub fn add_class_atom<'a>(
    graph: &mut OntologyGraph,
    class: impl Into<NamedOrBlankNode>,
    argument: impl Into<NamedOrBlankNodeRef<'a>>,
) -> BlankNode {
    let class = class.into();
    let argument: NamedOrBlankNodeRef<'a> = argument.into();
    let atom = BlankNode::default();
    graph.add(&atom, rdf::TYPE, swrl::CLASS_ATOM);
    graph.add(&atom, swrl::CLASS_PREDICATE, &class);
    graph.add(&atom, swrl::ARGUMENT_1, argument);
    atom
}

/// Writes a `swrl:IndividualPropertyAtom`: `first` is linked to `second` by the object property.
pub fn add_property_atom<'a>(
    graph: &mut OntologyGraph,
    property: NamedNode,
    first: impl Into<NamedOrBlankNodeRef<'a>>,
    second: impl Into<NamedOrBlankNodeRef<'a>>,
) -> BlankNode {
    let first: NamedOrBlankNodeRef<'a> = first.into();
    let second: NamedOrBlankNodeRef<'a> = second.into();
    let atom = BlankNode::default();
    graph.add(&atom, rdf::TYPE, swrl::INDIVIDUAL_PROPERTY_ATOM);
    graph.add(&atom, swrl::PROPERTY_PREDICATE, &property);
    graph.add(&atom, swrl::ARGUMENT_1, first);
    graph.add(&atom, swrl::ARGUMENT_2, second);
    atom
}

/// Writes a `swrl:DatavaluedPropertyAtom`.
///
/// `value` is either a variable or a literal.
pub fn add_data_property_atom<'a>(
    graph: &mut OntologyGraph,
    property: NamedNode,
    subject: impl Into<NamedOrBlankNodeRef<'a>>,
    value: impl Into<Term>,
) -> BlankNode {
    let subject: NamedOrBlankNodeRef<'a> = subject.into();
    let value = value.into();
    let atom = BlankNode::default();
    graph.add(&atom, rdf::TYPE, swrl::DATAVALUED_PROPERTY_ATOM);
    graph.add(&atom, swrl::PROPERTY_PREDICATE, &property);
    graph.add(&atom, swrl::ARGUMENT_1, subject);
    graph.add(&atom, swrl::ARGUMENT_2, &value);
    atom
}

/// Writes a `swrl:Imp` rule: the conjunction of `body` atoms implies the `head` atoms.
///
/// Both lists must be non-empty.
pub fn add_rule(
    graph: &mut OntologyGraph,
    body: impl IntoIterator<Item = BlankNode>,
    head: impl IntoIterator<Item = BlankNode>,
) -> Result<BlankNode, BuildError> {
    let body = body.into_iter().collect::<Vec<_>>();
    let head = head.into_iter().collect::<Vec<_>>();
    if body.is_empty() {
        return Err(BuildError::EmptyList {
            construct: "rule body",
        });
    }
    if head.is_empty() {
        return Err(BuildError::EmptyList {
            construct: "rule head",
        });
    }
    let (body_len, head_len) = (body.len(), head.len());
    let body = atom_list(graph, "rule body", body)?;
    let head = atom_list(graph, "rule head", head)?;
    let rule = BlankNode::default();
    graph.add(&rule, rdf::TYPE, swrl::IMP);
    graph.add(&rule, swrl::BODY, &body);
    graph.add(&rule, swrl::HEAD, &head);
    debug!(body = body_len, head = head_len, "declared rule");
    Ok(rule)
}

fn atom_list(
    graph: &mut OntologyGraph,
    construct: &'static str,
    atoms: Vec<BlankNode>,
) -> Result<BlankNode, BuildError> {
    let list = encode_non_empty_list(graph, construct, atoms)?;
    graph.add(&list, rdf::TYPE, swrl::ATOM_LIST);
    Ok(list)
}

//! [RDF collections](https://www.w3.org/TR/rdf11-mt/#rdf-collections) encoding and decoding.

use crate::error::BuildError;
use crate::store::{OntologyGraph, term_as_subject};
use crate::vocab::rdf;
use oxrdf::{BlankNode, Term, TermRef};
use rustc_hash::FxHashSet;

/// Writes `elements` as an RDF list and returns the list head.
///
/// Each element gets its own fresh blank node, in iteration order.
/// An empty input returns `rdf:nil` without writing anything.
pub fn encode_list<T: Into<Term>>(
    graph: &mut OntologyGraph,
    elements: impl IntoIterator<Item = T>,
) -> Term {
    let elements = elements.into_iter().map(Into::into).collect::<Vec<Term>>();
    let mut current = Term::NamedNode(rdf::NIL.into_owned());
    for element in elements.into_iter().rev() {
        let node = BlankNode::default();
        graph.add(&node, rdf::FIRST, &element);
        graph.add(&node, rdf::REST, &current);
        current = node.into();
    }
    current
}

/// Same as [`encode_list`] but fails with [`BuildError::EmptyList`] if there is no element.
///
/// The returned head is always a blank node.
pub fn encode_non_empty_list<T: Into<Term>>(
    graph: &mut OntologyGraph,
    construct: &'static str,
    elements: impl IntoIterator<Item = T>,
) -> Result<BlankNode, BuildError> {
    match encode_list(graph, elements) {
        Term::BlankNode(head) => Ok(head),
        _ => Err(BuildError::EmptyList { construct }),
    }
}

/// Reads back the elements of the list starting at `head`.
pub fn decode_list(graph: &OntologyGraph, head: TermRef<'_>) -> Result<Vec<Term>, BuildError> {
    let mut elements = Vec::new();
    let mut visited = FxHashSet::default();
    let mut current = head;
    while current != TermRef::NamedNode(rdf::NIL) {
        let node = term_as_subject(current).ok_or_else(|| {
            BuildError::MalformedList(format!("{current} can not be a list node"))
        })?;
        if !visited.insert(node) {
            return Err(BuildError::MalformedList(format!(
                "The list node {node} is part of a cycle"
            )));
        }
        let first = graph
            .object_for_subject_predicate(node, rdf::FIRST)
            .ok_or_else(|| BuildError::MalformedList(format!("{node} has no rdf:first")))?;
        elements.push(first.into_owned());
        current = graph
            .object_for_subject_predicate(node, rdf::REST)
            .ok_or_else(|| BuildError::MalformedList(format!("{node} has no rdf:rest")))?;
    }
    Ok(elements)
}

//! Class and property axioms that do not belong to a single declaration.

use crate::collection::encode_non_empty_list;
use crate::error::BuildError;
use crate::store::OntologyGraph;
use crate::vocab::{owl, rdf};
use oxrdf::{BlankNode, NamedNode, NamedNodeRef};
use tracing::debug;

/// Declares the given classes pairwise disjoint with one `owl:AllDisjointClasses` node.
///
/// At least two classes are required.
///
/// ```
/// use oxaxiom::axiom::declare_disjoint;
/// use oxaxiom::store::OntologyGraph;
/// use oxaxiom::term::Namespace;
///
/// let ns = Namespace::new("http://example.com/ns#")?;
/// let mut graph = OntologyGraph::new();
/// declare_disjoint(&mut graph, [ns.term("Event")?, ns.term("Location")?, ns.term("Taxon")?])?;
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub fn declare_disjoint(
    graph: &mut OntologyGraph,
    classes: impl IntoIterator<Item = NamedNode>,
) -> Result<BlankNode, BuildError> {
    let classes = classes.into_iter().collect::<Vec<_>>();
    at_least_two("disjoint classes axiom", classes.len())?;
    let count = classes.len();
    let members = encode_non_empty_list(graph, "disjoint classes axiom", classes)?;
    let node = BlankNode::default();
    graph.add(&node, rdf::TYPE, owl::ALL_DISJOINT_CLASSES);
    graph.add(&node, owl::MEMBERS, &members);
    debug!(classes = count, "declared disjoint classes");
    Ok(node)
}

/// Declares `target` as implied by the composition of `chain`, in order.
pub fn add_property_chain<'a>(
    graph: &mut OntologyGraph,
    target: impl Into<NamedNodeRef<'a>>,
    chain: impl IntoIterator<Item = NamedNode>,
) -> Result<(), BuildError> {
    let target: NamedNodeRef<'a> = target.into();
    let chain = chain.into_iter().collect::<Vec<_>>();
    at_least_two("property chain", chain.len())?;
    let length = chain.len();
    let list = encode_non_empty_list(graph, "property chain", chain)?;
    graph.add(target, owl::PROPERTY_CHAIN_AXIOM, &list);
    debug!(property = %target, length, "declared property chain");
    Ok(())
}

/// Writes `property owl:inverseOf inverse`.
pub fn declare_inverse<'a>(
    graph: &mut OntologyGraph,
    property: impl Into<NamedNodeRef<'a>>,
    inverse: impl Into<NamedNodeRef<'a>>,
) {
    let property: NamedNodeRef<'a> = property.into();
    let inverse: NamedNodeRef<'a> = inverse.into();
    graph.add(property, owl::INVERSE_OF, inverse);
}

/// Writes one `target owl:equivalentProperty other` triple per other property.
pub fn declare_equivalent_properties<'a>(
    graph: &mut OntologyGraph,
    target: impl Into<NamedNodeRef<'a>>,
    others: impl IntoIterator<Item = NamedNode>,
) {
    let target: NamedNodeRef<'a> = target.into();
    for other in others {
        graph.add(target, owl::EQUIVALENT_PROPERTY, &other);
    }
}

fn at_least_two(construct: &'static str, actual: usize) -> Result<(), BuildError> {
    if actual < 2 {
        return Err(BuildError::TooFewOperands {
            construct,
            expected: 2,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::decode_list;
    use crate::term::Namespace;
    use oxrdf::{Term, TripleRef};

    fn ns() -> Namespace {
        Namespace::new("http://example.com/ns#").unwrap()
    }

    #[test]
    fn disjoint_classes_use_a_single_node() {
        let ns = ns();
        let classes = ["A", "B", "C", "D"].map(|c| ns.term(c).unwrap());
        let mut graph = OntologyGraph::new();
        let node = declare_disjoint(&mut graph, classes.clone()).unwrap();
        assert_eq!(graph.triples_for_predicate(owl::MEMBERS).count(), 1);
        let members = graph.object_for_subject_predicate(&node, owl::MEMBERS).unwrap();
        assert_eq!(
            decode_list(&graph, members).unwrap(),
            classes.map(Term::from)
        );
    }

    #[test]
    fn disjointness_needs_two_classes() {
        let ns = ns();
        let mut graph = OntologyGraph::new();
        assert!(matches!(
            declare_disjoint(&mut graph, [ns.term("A").unwrap()]),
            Err(BuildError::TooFewOperands {
                expected: 2,
                actual: 1,
                ..
            })
        ));
        assert!(graph.is_empty());
    }

    #[test]
    fn chain_order_is_kept() {
        let ns = ns();
        let grandparent = ns.term("hasGrandParent").unwrap();
        let parent = ns.term("hasParent").unwrap();
        let mother = ns.term("hasMother").unwrap();
        let mut graph = OntologyGraph::new();
        add_property_chain(&mut graph, &grandparent, [mother.clone(), parent.clone()]).unwrap();
        let list = graph
            .object_for_subject_predicate(&grandparent, owl::PROPERTY_CHAIN_AXIOM)
            .unwrap();
        assert_eq!(
            decode_list(&graph, list).unwrap(),
            [Term::from(mother), parent.clone().into()]
        );
        assert!(add_property_chain(&mut graph, &grandparent, [parent]).is_err());
    }

    #[test]
    fn inverse_and_equivalences() {
        let ns = ns();
        let [authored_by, author_of, wrote, created] =
            ["authoredBy", "authorOf", "wrote", "created"].map(|p| ns.term(p).unwrap());
        let mut graph = OntologyGraph::new();
        declare_inverse(&mut graph, &author_of, &authored_by);
        declare_equivalent_properties(&mut graph, &author_of, [wrote.clone(), created.clone()]);
        assert!(graph.contains(TripleRef::new(&author_of, owl::INVERSE_OF, &authored_by)));
        assert!(graph.contains(TripleRef::new(&author_of, owl::EQUIVALENT_PROPERTY, &wrote)));
        assert!(graph.contains(TripleRef::new(&author_of, owl::EQUIVALENT_PROPERTY, &created)));
        assert_eq!(graph.len(), 3);
    }
}

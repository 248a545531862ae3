//! End to end declarations of a small Darwin Core like vocabulary.

use oxaxiom::annotation::Annotate;
use oxaxiom::axiom::declare_disjoint;
use oxaxiom::builder::{
    ClassBuilder, DefinedClassBuilder, EnumeratedClassBuilder, IndividualBuilder,
    OntologyHeaderBuilder, PropertyBuilder,
};
use oxaxiom::collection::decode_list;
use oxaxiom::restriction::DatatypeRestriction;
use oxaxiom::vocab::{owl, rdf, rdfs, xsd};
use oxaxiom::{Namespace, OntologyGraph};
use oxrdf::{
    BlankNodeRef, LiteralRef, NamedNode, NamedNodeRef, NamedOrBlankNodeRef, Term, TermRef,
    TripleRef,
};
use oxrdfio::RdfFormat;
use std::error::Error;

fn dwc() -> Namespace {
    Namespace::new("http://rs.tdwg.org/dwc/terms/").unwrap()
}

fn blank_object<'a, 'b>(
    graph: &'a OntologyGraph,
    subject: impl Into<NamedOrBlankNodeRef<'b>>,
    predicate: NamedNodeRef<'b>,
) -> BlankNodeRef<'a> {
    match graph.object_for_subject_predicate(subject, predicate) {
        Some(TermRef::BlankNode(node)) => node,
        other => panic!("expected a blank node, found {other:?}"),
    }
}

fn vocabulary() -> Result<OntologyGraph, Box<dyn Error>> {
    let dwc = dwc();
    let mut graph = OntologyGraph::new();
    graph.bind("dwc", dwc.as_str())?;
    OntologyHeaderBuilder::new(NamedNode::new("http://rs.tdwg.org/dwc/terms")?)
        .with_title("Darwin Core")
        .with_preferred_prefix("dwc")
        .with_created("2009-10-09".parse()?)
        .build(&mut graph)?;
    let agent = ClassBuilder::new(&dwc, "Agent", "Agent").build(&mut graph)?;
    let resource = ClassBuilder::new(&dwc, "BibliographicResource", "Bibliographic Resource")
        .build(&mut graph)?;
    let authored_by = PropertyBuilder::object(&dwc, "authoredBy", "Authored By")
        .with_domain(resource.clone())
        .with_range(agent.clone())
        .build(&mut graph)?;
    DefinedClassBuilder::new(&dwc, "AuthorAgent", "Author Agent", authored_by.clone(), resource)
        .with_super_class(agent.clone())
        .with_inverse_property()
        .build(&mut graph)?;
    DefinedClassBuilder::new(&dwc, "EditorAgent", "Editor Agent", authored_by, dwc.term("Work")?)
        .with_super_class(agent)
        .with_inverse_property()
        .build(&mut graph)?;
    ClassBuilder::new(&dwc, "Assertion", "Assertion")
        .with_definition("A statement made by an agent.")
        .with_at_most_one([dwc.term("assertedBy")?])
        .build(&mut graph)?;
    PropertyBuilder::datatype(&dwc, "maximumDepthInMeters", "Maximum Depth In Meters")
        .with_range(DatatypeRestriction::inclusive_range(xsd::DECIMAL, "0", "11000"))
        .build(&mut graph)?;
    EnumeratedClassBuilder::new(
        &dwc,
        "Sex",
        "Sex",
        [dwc.term("female")?, dwc.term("male")?, dwc.term("hermaphrodite")?],
    )
    .build(&mut graph)?;
    IndividualBuilder::new(
        NamedNode::new("http://example.com/agents/linnaeus")?,
        dwc.term("Agent")?,
        "Carl Linnaeus",
    )
    .build(&mut graph)?;
    Ok(graph)
}

#[test]
fn assertion_has_a_single_max_cardinality_restriction() -> Result<(), Box<dyn Error>> {
    let dwc = dwc();
    let graph = vocabulary()?;
    let assertion = dwc.term("Assertion")?;
    let intersection = blank_object(&graph, &assertion, rdfs::SUB_CLASS_OF);
    assert!(graph.contains(TripleRef::new(intersection, rdf::TYPE, owl::CLASS)));
    let operands = decode_list(
        &graph,
        graph
            .object_for_subject_predicate(intersection, owl::INTERSECTION_OF)
            .unwrap(),
    )?;
    assert_eq!(operands.len(), 1);
    let Term::BlankNode(restriction) = &operands[0] else {
        panic!("expected a restriction")
    };
    assert_eq!(graph.triples_for_subject(restriction).count(), 3);
    assert!(graph.contains(TripleRef::new(
        restriction,
        owl::ON_PROPERTY,
        &dwc.term("assertedBy")?
    )));
    assert!(graph.contains(TripleRef::new(
        restriction,
        owl::MAX_CARDINALITY,
        LiteralRef::new_typed_literal("1", xsd::NON_NEGATIVE_INTEGER)
    )));
    Ok(())
}

#[test]
fn author_agent_is_defined_by_an_inverse_property() -> Result<(), Box<dyn Error>> {
    let dwc = dwc();
    let graph = vocabulary()?;
    let author_agent = dwc.term("AuthorAgent")?;
    assert!(graph.contains(TripleRef::new(
        &author_agent,
        rdfs::SUB_CLASS_OF,
        &dwc.term("Agent")?
    )));
    let restriction = blank_object(&graph, &author_agent, owl::EQUIVALENT_CLASS);
    assert!(graph.contains(TripleRef::new(
        restriction,
        owl::SOME_VALUES_FROM,
        &dwc.term("BibliographicResource")?
    )));
    let inverse = blank_object(&graph, restriction, owl::ON_PROPERTY);
    assert!(graph.contains(TripleRef::new(inverse, rdf::TYPE, owl::OBJECT_PROPERTY)));
    assert!(graph.contains(TripleRef::new(
        inverse,
        owl::INVERSE_OF,
        &dwc.term("authoredBy")?
    )));
    Ok(())
}

#[test]
fn each_inverse_gets_its_own_node() -> Result<(), Box<dyn Error>> {
    let graph = vocabulary()?;
    let inverses = graph
        .triples_for_predicate(owl::INVERSE_OF)
        .map(|t| t.subject)
        .collect::<Vec<_>>();
    assert_eq!(inverses.len(), 2);
    assert_ne!(inverses[0], inverses[1]);
    for inverse in inverses {
        assert_eq!(
            graph
                .objects_for_subject_predicate(inverse, owl::INVERSE_OF)
                .count(),
            1
        );
    }
    Ok(())
}

#[test]
fn decimal_range() -> Result<(), Box<dyn Error>> {
    let dwc = dwc();
    let graph = vocabulary()?;
    let depth = dwc.term("maximumDepthInMeters")?;
    let datatype = blank_object(&graph, &depth, rdfs::RANGE);
    assert!(graph.contains(TripleRef::new(datatype, rdf::TYPE, rdfs::DATATYPE)));
    assert!(graph.contains(TripleRef::new(datatype, owl::ON_DATATYPE, xsd::DECIMAL)));
    let facets = decode_list(
        &graph,
        graph
            .object_for_subject_predicate(datatype, owl::WITH_RESTRICTIONS)
            .unwrap(),
    )?;
    assert_eq!(facets.len(), 2);
    let [Term::BlankNode(min), Term::BlankNode(max)] = facets.as_slice() else {
        panic!("expected two facet nodes")
    };
    assert!(graph.contains(TripleRef::new(
        min,
        oxaxiom::vocab::facet::MIN_INCLUSIVE,
        LiteralRef::new_typed_literal("0", xsd::DECIMAL)
    )));
    assert!(graph.contains(TripleRef::new(
        max,
        oxaxiom::vocab::facet::MAX_INCLUSIVE,
        LiteralRef::new_typed_literal("11000", xsd::DECIMAL)
    )));
    Ok(())
}

#[test]
fn disjointness_over_many_classes() -> Result<(), Box<dyn Error>> {
    let dwc = dwc();
    let mut graph = vocabulary()?;
    let classes = ["Event", "Location", "Occurrence", "Organism", "Taxon"]
        .into_iter()
        .map(|c| dwc.term(c))
        .collect::<Result<Vec<_>, _>>()?;
    let node = declare_disjoint(&mut graph, classes.clone())?;
    assert_eq!(
        graph
            .triples_for_predicate(rdf::TYPE)
            .filter(|t| t.object == TermRef::from(owl::ALL_DISJOINT_CLASSES))
            .count(),
        1
    );
    let members = graph
        .object_for_subject_predicate(&node, owl::MEMBERS)
        .unwrap();
    assert_eq!(
        decode_list(&graph, members)?,
        classes.into_iter().map(Term::from).collect::<Vec<_>>()
    );
    Ok(())
}

#[test]
fn builders_are_idempotent_on_named_triples() -> Result<(), Box<dyn Error>> {
    let dwc = dwc();
    let mut graph = OntologyGraph::new();
    let builder = ClassBuilder::new(&dwc, "Event", "Event").with_comment("Something happening.");
    builder.build(&mut graph)?;
    let len = graph.len();
    builder.build(&mut graph)?;
    assert_eq!(graph.len(), len);
    Ok(())
}

#[test]
fn n_triples_round_trip() -> Result<(), Box<dyn Error>> {
    let graph = vocabulary()?;
    let serialized = graph.serialize(Vec::new(), RdfFormat::NTriples)?;
    let parsed = OntologyGraph::parse(serialized.as_slice(), RdfFormat::NTriples)?;
    assert_eq!(parsed, graph);
    Ok(())
}

#[test]
fn turtle_file_round_trip() -> Result<(), Box<dyn Error>> {
    let graph = vocabulary()?;
    let directory = tempfile::tempdir()?;
    let path = directory.path().join("dwc.ttl");
    graph.save_to_path(&path)?;
    let turtle = std::fs::read_to_string(&path)?;
    assert!(turtle.contains("@prefix dwc: <http://rs.tdwg.org/dwc/terms/>"));
    let loaded = OntologyGraph::load_from_path(&path)?;
    assert_eq!(loaded.namespace("dwc"), Some("http://rs.tdwg.org/dwc/terms/"));
    assert_eq!(loaded, graph);
    Ok(())
}

#[test]
fn unknown_extension_is_rejected() {
    let graph = OntologyGraph::new();
    let directory = tempfile::tempdir().unwrap();
    assert!(graph.save_to_path(directory.path().join("dwc.unknown")).is_err());
}

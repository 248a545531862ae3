//! Declares a fragment of a Darwin Core OWL vocabulary and writes it as Turtle on stdout.
//!
//! Run with `cargo run -p oxaxiom --example darwin_core`.

use oxaxiom::annotation::Annotate;
use oxaxiom::axiom::declare_disjoint;
use oxaxiom::builder::{
    ClassBuilder, ConceptBuilder, DefinedClassBuilder, EnumeratedClassBuilder,
    OntologyHeaderBuilder, PropertyBuilder, PropertyCharacteristic,
};
use oxaxiom::restriction::DatatypeRestriction;
use oxaxiom::rule::{add_class_atom, add_property_atom, add_rule, add_variable};
use oxaxiom::vocab::{skos, xsd};
use oxaxiom::{Namespace, OntologyGraph};
use oxrdf::{Literal, NamedNode};
use oxrdfio::RdfFormat;
use std::error::Error;
use std::io::{self, Write};

fn main() -> Result<(), Box<dyn Error>> {
    let dwc = Namespace::new("http://rs.tdwg.org/dwc/terms/")?;
    let dcterms = Namespace::new("http://purl.org/dc/terms/")?;
    let bb = Namespace::new("http://bioboum.ca/")?;

    let mut graph = OntologyGraph::new();
    graph.bind("dwc", dwc.as_str())?;
    graph.bind("dcterms", dcterms.as_str())?;
    graph.bind("bb", bb.as_str())?;
    graph.bind("skos", skos::NAMESPACE)?;

    OntologyHeaderBuilder::new(NamedNode::new("http://bioboum.ca/dwc-owl.owl")?)
        .with_version_info("0.0.2")
        .with_title("Darwin Core OWL")
        .with_description(Literal::new_language_tagged_literal(
            "Darwin Core terms as OWL classes and properties.",
            "en",
        )?)
        .with_preferred_prefix("dwc")
        .with_preferred_namespace(&dwc)
        .build(&mut graph)?;

    let agent = ClassBuilder::new(&dcterms, "Agent", "Agent")
        .with_definition("A person, group, or organization.")
        .with_version_of(dcterms.term("Agent")?)
        .build(&mut graph)?;
    let resource = ClassBuilder::new(&dcterms, "BibliographicResource", "Bibliographic Resource")
        .build(&mut graph)?;
    let event = ClassBuilder::new(&dwc, "Event", "Event")
        .with_definition("An action that occurs at some location during some time.")
        .with_exactly_one([dwc.term("eventID")?])
        .with_at_most_one([dwc.term("eventDate")?, dwc.term("maximumDepthInMeters")?])
        .build(&mut graph)?;
    let location = ClassBuilder::new(&dcterms, "Location", "Location").build(&mut graph)?;
    let occurrence = ClassBuilder::new(&dwc, "Occurrence", "Occurrence")
        .with_some_values_from(dwc.term("happenedDuring")?, event.clone())
        .build(&mut graph)?;
    ClassBuilder::new(&dwc, "Assertion", "Assertion")
        .with_at_most_one([dwc.term("assertedBy")?])
        .build(&mut graph)?;

    PropertyBuilder::datatype(&dwc, "eventID", "Event ID")
        .with_domain(event.clone())
        .with_range(xsd::STRING)
        .with_characteristic(PropertyCharacteristic::Functional)
        .build(&mut graph)?;
    PropertyBuilder::datatype(&dwc, "maximumDepthInMeters", "Maximum Depth In Meters")
        .with_domain(event.clone())
        .with_range(DatatypeRestriction::inclusive_range(xsd::DECIMAL, "0", "11000"))
        .build(&mut graph)?;
    let happened_during = PropertyBuilder::object(&dwc, "happenedDuring", "Happened During")
        .with_domain(occurrence.clone())
        .with_range(event.clone())
        .build(&mut graph)?;
    let authored_by = PropertyBuilder::object(&bb, "authoredBy", "Authored By")
        .with_domain(resource.clone())
        .with_range(agent.clone())
        .build(&mut graph)?;
    let located_at = PropertyBuilder::object(&bb, "locatedAt", "Located At")
        .with_domain(vec![event.clone(), occurrence.clone()])
        .with_range(location.clone())
        .with_characteristic(PropertyCharacteristic::Transitive)
        .build(&mut graph)?;

    DefinedClassBuilder::new(&bb, "AuthorAgent", "Author Agent", authored_by, resource)
        .with_super_class(agent.clone())
        .with_inverse_property()
        .build(&mut graph)?;
    EnumeratedClassBuilder::new(
        &bb,
        "Sex",
        "Sex",
        [bb.term("female")?, bb.term("male")?, bb.term("hermaphrodite")?],
    )
    .build(&mut graph)?;

    let scheme = ConceptBuilder::new(&bb, "lifeStages", "Life Stages")
        .with_type(skos::CONCEPT_SCHEME)
        .build(&mut graph)?;
    ConceptBuilder::new(&bb, "larva", "Larva")
        .with_type(skos::CONCEPT)
        .with_in_scheme(scheme)
        .build(&mut graph)?;

    declare_disjoint(&mut graph, [agent, event, location, occurrence.clone()])?;

    // Occurrence(?o) ∧ happenedDuring(?o, ?e) ∧ locatedAt(?e, ?l) → locatedAt(?o, ?l)
    let o = add_variable(&mut graph, bb.term("o")?);
    let e = add_variable(&mut graph, bb.term("e")?);
    let l = add_variable(&mut graph, bb.term("l")?);
    let body = [
        add_class_atom(&mut graph, occurrence, &o),
        add_property_atom(&mut graph, happened_during, &o, &e),
        add_property_atom(&mut graph, located_at.clone(), &e, &l),
    ];
    let head = [add_property_atom(&mut graph, located_at, &o, &l)];
    add_rule(&mut graph, body, head)?;

    graph.serialize(io::stdout().lock(), RdfFormat::Turtle)?.flush()?;
    Ok(())
}

//! Provides ready to use [`NamedNodeRef`]s for the vocabularies the builders emit.
//!
//! [RDF](oxrdf::vocab::rdf), [RDFS](oxrdf::vocab::rdfs) and [XSD](oxrdf::vocab::xsd) terms
//! are re-exported from [`oxrdf::vocab`].

pub use oxrdf::vocab::{rdf, rdfs, xsd};

pub mod owl {
    //! [OWL 2](https://www.w3.org/TR/owl2-mapping-to-rdf/) vocabulary.
    use oxrdf::NamedNodeRef;

    /// The OWL namespace: `http://www.w3.org/2002/07/owl#`
    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";

    /// The axiom class for n-ary class disjointness.
    pub const ALL_DISJOINT_CLASSES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#AllDisjointClasses");
    /// The property characteristic `AsymmetricProperty`.
    pub const ASYMMETRIC_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#AsymmetricProperty");
    /// The empty data property, every unsatisfiable data property is equivalent to it.
    pub const BOTTOM_DATA_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#bottomDataProperty");
    /// The empty object property, every unsatisfiable object property is equivalent to it.
    pub const BOTTOM_OBJECT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#bottomObjectProperty");
    /// Exact cardinality constraint of a restriction.
    pub const CARDINALITY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#cardinality");
    /// The class of OWL classes.
    pub const CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Class");
    /// The class of data properties.
    pub const DATATYPE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#DatatypeProperty");
    pub const EQUIVALENT_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#equivalentClass");
    pub const EQUIVALENT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#equivalentProperty");
    pub const FUNCTIONAL_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#FunctionalProperty");
    /// Universal restriction filler.
    pub const ALL_VALUES_FROM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#allValuesFrom");
    /// Operand list of an intersection.
    pub const INTERSECTION_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#intersectionOf");
    pub const INVERSE_FUNCTIONAL_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#InverseFunctionalProperty");
    pub const INVERSE_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#inverseOf");
    pub const IRREFLEXIVE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#IrreflexiveProperty");
    /// Maximal cardinality constraint of a restriction.
    pub const MAX_CARDINALITY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#maxCardinality");
    /// Member list of an `AllDisjointClasses` axiom.
    pub const MEMBERS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#members");
    /// Minimal cardinality constraint of a restriction.
    pub const MIN_CARDINALITY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#minCardinality");
    pub const NAMED_INDIVIDUAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#NamedIndividual");
    /// The empty class, every unsatisfiable class is equivalent to it.
    pub const NOTHING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Nothing");
    pub const OBJECT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#ObjectProperty");
    /// The base datatype of a datatype restriction.
    pub const ON_DATATYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#onDatatype");
    /// Closed enumeration of a class or a datatype.
    pub const ONE_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#oneOf");
    /// The property a restriction is about.
    pub const ON_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#onProperty");
    pub const ONTOLOGY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Ontology");
    /// Left-to-right composition implying the subject property.
    pub const PROPERTY_CHAIN_AXIOM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#propertyChainAxiom");
    pub const REFLEXIVE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#ReflexiveProperty");
    /// The class of property restrictions.
    pub const RESTRICTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Restriction");
    /// Existential restriction filler.
    pub const SOME_VALUES_FROM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#someValuesFrom");
    pub const SYMMETRIC_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#SymmetricProperty");
    pub const THING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Thing");
    pub const TRANSITIVE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#TransitiveProperty");
    /// Operand list of a union.
    pub const UNION_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#unionOf");
    pub const VERSION_INFO: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#versionInfo");
    /// Facet list of a datatype restriction.
    pub const WITH_RESTRICTIONS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#withRestrictions");
}

pub mod skos {
    //! [SKOS](https://www.w3.org/TR/skos-reference/) vocabulary.
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/2004/02/skos/core#";

    pub const BROADER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#broader");
    pub const CONCEPT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#Concept");
    pub const CONCEPT_SCHEME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#ConceptScheme");
    pub const DEFINITION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#definition");
    pub const EXAMPLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#example");
    pub const IN_SCHEME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#inScheme");
    pub const PREF_LABEL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#prefLabel");
}

pub mod dcterms {
    //! [DCMI Metadata Terms](https://www.dublincore.org/specifications/dublin-core/dcmi-terms/).
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://purl.org/dc/terms/";

    pub const CREATED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/created");
    pub const IS_VERSION_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/isVersionOf");
    pub const REFERENCES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/references");
}

pub mod dc {
    //! [Dublin Core elements 1.1](http://purl.org/dc/elements/1.1/).
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

    pub const DESCRIPTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/elements/1.1/description");
    pub const TITLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/elements/1.1/title");
}

pub mod vann {
    //! [VANN](https://vocab.org/vann/) vocabulary annotations.
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://purl.org/vocab/vann/";

    pub const PREFERRED_NAMESPACE_PREFIX: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/vocab/vann/preferredNamespacePrefix");
    pub const PREFERRED_NAMESPACE_URI: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/vocab/vann/preferredNamespaceUri");
}

pub mod swrl {
    //! [SWRL](https://www.w3.org/submissions/SWRL/) rule vocabulary.
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/2003/11/swrl#";

    pub const ARGUMENT_1: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/11/swrl#argument1");
    pub const ARGUMENT_2: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/11/swrl#argument2");
    pub const ATOM_LIST: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/11/swrl#AtomList");
    pub const BODY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/11/swrl#body");
    pub const CLASS_ATOM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/11/swrl#ClassAtom");
    pub const CLASS_PREDICATE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/11/swrl#classPredicate");
    pub const DATAVALUED_PROPERTY_ATOM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/11/swrl#DatavaluedPropertyAtom");
    pub const HEAD: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/11/swrl#head");
    /// A rule: the body implies the head.
    pub const IMP: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/11/swrl#Imp");
    pub const INDIVIDUAL_PROPERTY_ATOM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/11/swrl#IndividualPropertyAtom");
    pub const PROPERTY_PREDICATE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/11/swrl#propertyPredicate");
    pub const VARIABLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/11/swrl#Variable");
}

pub mod facet {
    //! [XSD constraining facets](https://www.w3.org/TR/xmlschema11-2/#rf-facets) usable in
    //! `owl:withRestrictions` lists.
    use oxrdf::NamedNodeRef;

    pub const FRACTION_DIGITS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#fractionDigits");
    pub const LENGTH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#length");
    pub const MAX_EXCLUSIVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#maxExclusive");
    pub const MAX_INCLUSIVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#maxInclusive");
    pub const MAX_LENGTH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#maxLength");
    pub const MIN_EXCLUSIVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#minExclusive");
    pub const MIN_INCLUSIVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#minInclusive");
    pub const MIN_LENGTH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#minLength");
    pub const PATTERN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#pattern");
    pub const TOTAL_DIGITS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#totalDigits");
}

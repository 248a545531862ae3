use crate::annotation::{Annotate, Annotations};
use crate::error::BuildError;
use crate::restriction::{
    Combination, OperandKind, Restriction, RestrictionSet, add_restriction,
    add_subclass_restrictions, single_or_union,
};
use crate::store::OntologyGraph;
use crate::term::{Namespace, OneOrMany};
use crate::vocab::{owl, rdf, rdfs};
use oxrdf::{BlankNode, Literal, NamedNode, NamedOrBlankNode};
use tracing::debug;

/// Declares a class defined as "everything linked by a property to some filler".
///
/// The class gets `owl:equivalentClass` a single `owl:someValuesFrom` restriction. If the
/// property is inverted, a fresh anonymous `owl:inverseOf` node is used as restriction
/// property. Additional restrictions are only necessary conditions: they are attached with
/// `rdfs:subClassOf` to an intersection and never take part in the equivalence.
///
/// ```
/// use oxaxiom::builder::DefinedClassBuilder;
/// use oxaxiom::store::OntologyGraph;
/// use oxaxiom::term::Namespace;
///
/// let ns = Namespace::new("http://example.com/ns#")?;
/// let mut graph = OntologyGraph::new();
/// DefinedClassBuilder::new(
///     &ns,
///     "AuthorAgent",
///     "Author Agent",
///     ns.term("authoredBy")?,
///     ns.term("BibliographicResource")?,
/// )
/// .with_super_class(ns.term("Agent")?)
/// .with_inverse_property()
/// .build(&mut graph)?;
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct DefinedClassBuilder {
    namespace: Namespace,
    name: String,
    annotations: Annotations,
    property: NamedNode,
    filler: OneOrMany,
    inverse: bool,
    super_classes: Vec<NamedOrBlankNode>,
    restrictions: RestrictionSet,
}

impl DefinedClassBuilder {
    pub fn new(
        namespace: &Namespace,
        name: impl Into<String>,
        label: impl Into<Literal>,
        property: impl Into<NamedNode>,
        filler: impl Into<OneOrMany>,
    ) -> Self {
        Self {
            namespace: namespace.clone(),
            name: name.into(),
            annotations: Annotations::new(label),
            property: property.into(),
            filler: filler.into(),
            inverse: false,
            super_classes: Vec::new(),
            restrictions: RestrictionSet::new(),
        }
    }

    /// Uses the inverse of the property: the class is then the set of the property objects.
    pub fn with_inverse_property(mut self) -> Self {
        self.inverse = true;
        self
    }

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

    pub fn with_exactly_one(mut self, properties: impl IntoIterator<Item = NamedNode>) -> Self {
        self.restrictions = self.restrictions.with_exactly_one(properties);
        self
    }

    pub fn with_at_most_one(mut self, properties: impl IntoIterator<Item = NamedNode>) -> Self {
        self.restrictions = self.restrictions.with_at_most_one(properties);
        self
    }

    /// Adds `owl:minCardinality 0` restrictions, documenting the properties as optional.
    pub fn with_optional(mut self, properties: impl IntoIterator<Item = NamedNode>) -> Self {
        for property in properties {
            self.restrictions
                .push(property, Restriction::MinCardinality(0));
        }
        self
    }

    /// Appends all the restrictions of `restrictions`.
    pub fn with_restrictions(mut self, restrictions: &RestrictionSet) -> Self {
        for (property, restriction) in restrictions.iter() {
            self.restrictions.push(property.clone(), restriction.clone());
        }
        self
    }

    pub fn build(&self, graph: &mut OntologyGraph) -> Result<NamedNode, BuildError> {
        let class = self.namespace.declare("defined class", &self.name)?;
        if self.filler.is_empty() {
            return Err(BuildError::EmptyList {
                construct: "defined class filler",
            });
        }
        self.annotations.write(
            graph,
            "defined class",
            class.as_ref(),
            Some(self.namespace.iri()),
        )?;
        graph.add(&class, rdf::TYPE, owl::CLASS);
        for super_class in &self.super_classes {
            graph.add(&class, rdfs::SUB_CLASS_OF, super_class);
        }
        let property = if self.inverse {
            let inverse = BlankNode::default();
            graph.add(&inverse, rdf::TYPE, owl::OBJECT_PROPERTY);
            graph.add(&inverse, owl::INVERSE_OF, &self.property);
            NamedOrBlankNode::from(inverse)
        } else {
            self.property.clone().into()
        };
        let filler = single_or_union(graph, OperandKind::Class, self.filler.as_slice())?;
        let restriction = add_restriction(graph, &property, &Restriction::SomeValuesFrom(filler));
        graph.add(&class, owl::EQUIVALENT_CLASS, &restriction);
        add_subclass_restrictions(graph, &class, &self.restrictions, Combination::Intersection)?;
        debug!(
            %class,
            property = %self.property,
            inverse = self.inverse,
            "declared defined class"
        );
        Ok(class)
    }
}

impl Annotate for DefinedClassBuilder {
    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}

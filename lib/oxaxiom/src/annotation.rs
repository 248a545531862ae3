//! The documentation attached to every declared term.

use crate::error::BuildError;
use crate::store::OntologyGraph;
use crate::vocab::{dcterms, rdfs, skos};
use oxrdf::{Literal, NamedNode, NamedNodeRef, Term};

/// Human oriented metadata of a term.
///
/// Only the `skos:prefLabel` is required.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Annotations {
    label: Literal,
    definition: Option<Literal>,
    comment: Option<Literal>,
    examples: Vec<Term>,
    version_of: Option<NamedNode>,
    references: Vec<NamedNode>,
}

impl Annotations {
    pub fn new(label: impl Into<Literal>) -> Self {
        Self {
            label: label.into(),
            definition: None,
            comment: None,
            examples: Vec::new(),
            version_of: None,
            references: Vec::new(),
        }
    }

    pub fn label(&self) -> &Literal {
        &self.label
    }

    /// Writes the metadata of `subject`.
    ///
    /// `defined_by` is the vocabulary the term belongs to, if any.
    pub(crate) fn write(
        &self,
        graph: &mut OntologyGraph,
        construct: &'static str,
        subject: NamedNodeRef<'_>,
        defined_by: Option<NamedNodeRef<'_>>,
    ) -> Result<(), BuildError> {
        if self.label.value().trim().is_empty() {
            return Err(BuildError::MissingLabel {
                construct,
                name: subject.as_str().into(),
            });
        }
        if let Some(defined_by) = defined_by {
            graph.add(subject, rdfs::IS_DEFINED_BY, defined_by);
        }
        graph.add(subject, skos::PREF_LABEL, &self.label);
        if let Some(definition) = &self.definition {
            graph.add(subject, skos::DEFINITION, definition);
        }
        if let Some(comment) = &self.comment {
            graph.add(subject, rdfs::COMMENT, comment);
        }
        for example in &self.examples {
            graph.add(subject, skos::EXAMPLE, example);
        }
        if let Some(version_of) = &self.version_of {
            graph.add(subject, dcterms::IS_VERSION_OF, version_of);
        }
        for reference in &self.references {
            graph.add(subject, dcterms::REFERENCES, reference);
        }
        Ok(())
    }
}

/// Optional metadata setters shared by all builders.
///
/// ```
/// use oxaxiom::annotation::{Annotate, Annotations};
/// use oxrdf::Literal;
///
/// let annotations = Annotations::new("Agent")
///     .with_definition(Literal::new_language_tagged_literal("A person or a group.", "en")?)
///     .with_example("Carl Linnaeus");
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub trait Annotate: Sized {
    fn annotations_mut(&mut self) -> &mut Annotations;

    /// Sets the `skos:definition`.
    #[must_use]
    fn with_definition(mut self, definition: impl Into<Literal>) -> Self {
        self.annotations_mut().definition = Some(definition.into());
        self
    }

    /// Sets the `rdfs:comment`.
    #[must_use]
    fn with_comment(mut self, comment: impl Into<Literal>) -> Self {
        self.annotations_mut().comment = Some(comment.into());
        self
    }

    /// Adds a literal `skos:example`.
    #[must_use]
    fn with_example(mut self, example: impl Into<Literal>) -> Self {
        let example: Literal = example.into();
        self.annotations_mut().examples.push(example.into());
        self
    }

    /// Adds a `skos:example` pointing to an example resource.
    #[must_use]
    fn with_example_resource(mut self, example: impl Into<NamedNode>) -> Self {
        let example: NamedNode = example.into();
        self.annotations_mut().examples.push(example.into());
        self
    }

    /// Sets the `dcterms:isVersionOf`, usually the term this one is derived from.
    #[must_use]
    fn with_version_of(mut self, version_of: impl Into<NamedNode>) -> Self {
        self.annotations_mut().version_of = Some(version_of.into());
        self
    }

    /// Adds a `dcterms:references`.
    #[must_use]
    fn with_reference(mut self, reference: impl Into<NamedNode>) -> Self {
        self.annotations_mut().references.push(reference.into());
        self
    }
}

impl Annotate for Annotations {
    fn annotations_mut(&mut self) -> &mut Annotations {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_all_metadata() {
        let mut graph = OntologyGraph::new();
        let term = NamedNode::new_unchecked("http://example.com/ns#Agent");
        let ns = NamedNode::new_unchecked("http://example.com/ns#");
        Annotations::new("Agent")
            .with_definition("A person or a group.")
            .with_comment("Also organizations.")
            .with_example("Carl Linnaeus")
            .with_example_resource(NamedNode::new_unchecked("http://example.com/linnaeus"))
            .with_version_of(NamedNode::new_unchecked("http://purl.org/dc/terms/Agent"))
            .with_reference(NamedNode::new_unchecked("http://example.com/ref"))
            .write(&mut graph, "class", term.as_ref(), Some(ns.as_ref()))
            .unwrap();
        assert_eq!(graph.len(), 8);
        let examples = graph
            .objects_for_subject_predicate(&term, skos::EXAMPLE)
            .collect::<Vec<_>>();
        assert_eq!(examples.len(), 2);
        assert!(examples.contains(&Literal::new_simple_literal("Carl Linnaeus").as_ref().into()));
    }

    #[test]
    fn label_is_required() {
        let mut graph = OntologyGraph::new();
        let term = NamedNode::new_unchecked("http://example.com/ns#Agent");
        assert!(matches!(
            Annotations::new(" ").write(&mut graph, "class", term.as_ref(), None),
            Err(BuildError::MissingLabel {
                construct: "class",
                ..
            })
        ));
        assert!(graph.is_empty());
    }
}

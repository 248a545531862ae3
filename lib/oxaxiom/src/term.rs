use crate::error::BuildError;
use oxiri::Iri;
use oxrdf::{IriParseError, NamedNode, NamedNodeRef};
use std::fmt;

/// A vocabulary namespace like `http://purl.org/example/vocab#`.
///
/// Every term declared by a builder is the concatenation of a namespace and a local name and
/// is marked `rdfs:isDefinedBy` the namespace itself.
///
/// ```
/// use oxaxiom::term::Namespace;
///
/// let ex = Namespace::new("http://example.com/vocab#")?;
/// assert_eq!(ex.term("Agent")?.as_str(), "http://example.com/vocab#Agent");
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct Namespace {
    iri: NamedNode,
}

impl Namespace {
    /// Builds a namespace from an absolute IRI.
    pub fn new(iri: impl Into<String>) -> Result<Self, IriParseError> {
        let iri = Iri::parse(iri.into())?;
        Ok(Self {
            iri: NamedNode::new_unchecked(iri.into_inner()),
        })
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.iri.as_str()
    }

    /// The namespace IRI as a node, used as the `rdfs:isDefinedBy` target.
    #[inline]
    pub fn iri(&self) -> NamedNodeRef<'_> {
        self.iri.as_ref()
    }

    /// Builds the IRI of the term `local_name` in this namespace.
    pub fn term(&self, local_name: &str) -> Result<NamedNode, BuildError> {
        self.declare("term", local_name)
    }

    /// Checks that `local_name` is non-empty and builds its IRI, reporting `construct` on error.
    pub(crate) fn declare(
        &self,
        construct: &'static str,
        local_name: &str,
    ) -> Result<NamedNode, BuildError> {
        if local_name.trim().is_empty() {
            return Err(BuildError::MissingName { construct });
        }
        Ok(NamedNode::new(format!("{}{local_name}", self.iri.as_str()))?)
    }
}

impl fmt::Display for Namespace {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iri.fmt(f)
    }
}

impl From<Namespace> for NamedNode {
    #[inline]
    fn from(namespace: Namespace) -> Self {
        namespace.iri
    }
}

/// Either a single IRI or a list of IRIs.
///
/// Builders accept this wherever the OWL mapping allows "one class or a union of classes":
/// a single operand is used directly, several operands are wrapped in an `owl:unionOf` node.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum OneOrMany {
    Single(NamedNode),
    Many(Vec<NamedNode>),
}

impl OneOrMany {
    /// The operands, in order.
    pub fn as_slice(&self) -> &[NamedNode] {
        match self {
            Self::Single(node) => std::slice::from_ref(node),
            Self::Many(nodes) => nodes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl From<NamedNode> for OneOrMany {
    #[inline]
    fn from(node: NamedNode) -> Self {
        Self::Single(node)
    }
}

impl From<NamedNodeRef<'_>> for OneOrMany {
    #[inline]
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self::Single(node.into_owned())
    }
}

impl From<&NamedNode> for OneOrMany {
    #[inline]
    fn from(node: &NamedNode) -> Self {
        Self::Single(node.clone())
    }
}

impl From<Vec<NamedNode>> for OneOrMany {
    #[inline]
    fn from(nodes: Vec<NamedNode>) -> Self {
        Self::Many(nodes)
    }
}

impl<const N: usize> From<[NamedNode; N]> for OneOrMany {
    #[inline]
    fn from(nodes: [NamedNode; N]) -> Self {
        Self::Many(nodes.into())
    }
}

impl From<&[NamedNode]> for OneOrMany {
    #[inline]
    fn from(nodes: &[NamedNode]) -> Self {
        Self::Many(nodes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_terms() -> Result<(), BuildError> {
        let ns = Namespace::new("http://example.com/ns#")?;
        assert_eq!(ns.term("Agent")?.as_str(), "http://example.com/ns#Agent");
        assert_eq!(ns.to_string(), "<http://example.com/ns#>");
        assert!(matches!(
            ns.declare("class", " "),
            Err(BuildError::MissingName { construct: "class" })
        ));
        assert!(matches!(ns.term("a b"), Err(BuildError::InvalidIri(_))));
        Ok(())
    }

    #[test]
    fn relative_namespace_is_rejected() {
        Namespace::new("vocab#").unwrap_err();
    }

    #[test]
    fn one_or_many_operands() {
        let a = NamedNode::new_unchecked("http://example.com/a");
        let b = NamedNode::new_unchecked("http://example.com/b");
        assert_eq!(OneOrMany::from(a.clone()).as_slice(), [a.clone()]);
        let many = OneOrMany::from([a.clone(), b.clone()]);
        assert_eq!(many.len(), 2);
        assert_eq!(many.as_slice(), [a, b]);
        assert!(OneOrMany::Many(Vec::new()).is_empty());
    }
}

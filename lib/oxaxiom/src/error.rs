use oxrdf::{IriParseError, NamedNode};
use oxrdfio::RdfParseError;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

/// An error raised while declaring an entity or an axiom.
///
/// Every variant is fatal: a half-declared entity is not usable and the caller is expected to
/// abort the whole ontology build.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// The local name of the declared entity is empty.
    #[error("The {construct} local name must not be empty")]
    MissingName { construct: &'static str },
    /// The primary label of the declared entity is empty.
    #[error("The {construct} {name} requires a non-empty label")]
    MissingLabel { construct: &'static str, name: String },
    /// A namespace or a generated identifier is not a valid IRI.
    #[error(transparent)]
    InvalidIri(#[from] IriParseError),
    /// A prefix bound to the graph is not a valid prefix name.
    #[error("{0} is not a valid prefix name")]
    InvalidPrefix(String),
    /// A construct requiring at least one element got none.
    #[error("The {construct} requires at least one element")]
    EmptyList { construct: &'static str },
    /// A construct got less operands than the OWL mapping requires.
    #[error("The {construct} requires at least {expected} operands, got {actual}")]
    TooFewOperands {
        construct: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A facet value does not parse under the base datatype of the restriction.
    #[error("{value:?} is not a valid {datatype} value for the facet {facet}")]
    InvalidFacetValue {
        facet: NamedNode,
        datatype: NamedNode,
        value: String,
    },
    /// The base datatype does not support the given facet.
    #[error("The facet {facet} can not restrict the datatype {datatype}")]
    UnsupportedFacetDatatype { facet: NamedNode, datatype: NamedNode },
    /// The option does not apply to this kind of entity.
    #[error("{construct} does not apply to {kind}")]
    NotApplicable {
        construct: &'static str,
        kind: &'static str,
    },
    /// An RDF list is not terminated by `rdf:nil` or has a missing `rdf:first`.
    #[error("Malformed RDF list: {0}")]
    MalformedList(String),
}

/// An error raised by the external reasoner round trip.
///
/// No partial result is ever returned alongside it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ReasonerError {
    /// Error from the OS I/O layer while writing or reading the temporary files.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The input graph could not be written for the external program.
    #[error("Failed to serialize the reasoner input: {0}")]
    Serialize(#[source] io::Error),
    /// The external program could not be started.
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// The external program exited with a failure status.
    #[error("{program} failed with {status}\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}")]
    ToolFailed {
        program: String,
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
    /// The external program did not exit before the configured timeout and has been killed.
    #[error("{program} did not finish within {}s", timeout.as_secs_f64())]
    Timeout { program: String, timeout: Duration },
    /// The external program exited successfully without writing its output file.
    #[error("The reasoner did not write its output file {}", .0.display())]
    MissingOutput(PathBuf),
    /// The output of the external program is not valid RDF.
    #[error("The reasoner output is not valid RDF: {0}")]
    Parse(#[from] RdfParseError),
}

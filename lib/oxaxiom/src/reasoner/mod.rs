//! Round trips through external OWL reasoners.
//!
//! Reasoning and classification are never done in process: the graph is serialized to a
//! temporary directory, an external program is run on it and its output is read back.
//!
//! The defaults match a checkout with `jarfiles/robot.jar` and `jarfiles/HermiT.jar`:
//! ```no_run
//! use oxaxiom::reasoner::{ExternalReasoner, ProjectionScope};
//! use oxaxiom::store::OntologyGraph;
//!
//! let data = OntologyGraph::load_from_path("occurrences.ttl")?;
//! let ontology = OntologyGraph::load_from_path("dwc-owl.ttl")?;
//! let inferred = ExternalReasoner::default().reason_with_ontology(
//!     &data,
//!     &ontology,
//!     ProjectionScope::ExcludeTypes,
//! )?;
//! inferred.graph.save_to_path("inferred.ttl")?;
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

mod process;
mod report;

pub use process::ProcessOutput;
pub use report::{ConsistencyChecker, ConsistencyReport};

use crate::error::ReasonerError;
use crate::store::OntologyGraph;
use crate::vocab::rdf;
use oxrdf::{NamedNodeRef, NamedOrBlankNodeRef, TermRef};
use oxrdfio::RdfFormat;
use rustc_hash::FxHashSet;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// How to invoke a [ROBOT](https://robot.obolibrary.org/reason)-compatible `reason` command.
///
/// The program is called with the leading arguments followed by
/// `--reasoner <name> --axiom-generators "<g1 g2 ...>" --input <in> --output <out>`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReasonerConfig {
    program: String,
    leading_args: Vec<String>,
    reasoner: String,
    axiom_generators: Vec<String>,
    timeout: Option<Duration>,
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            program: "java".into(),
            leading_args: vec!["-jar".into(), "jarfiles/robot.jar".into(), "reason".into()],
            reasoner: "hermit".into(),
            axiom_generators: vec!["ClassAssertion".into(), "PropertyAssertion".into()],
            timeout: None,
        }
    }
}

impl ReasonerConfig {
    /// The executable to run, `java` by default.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// The arguments put before the reasoning options, `-jar jarfiles/robot.jar reason` by default.
    #[must_use]
    pub fn with_leading_args<S: Into<String>>(mut self, args: impl IntoIterator<Item = S>) -> Self {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the `jarfiles/robot.jar` path, keeping `java -jar <path> reason`.
    #[must_use]
    pub fn with_jar(self, jar: impl AsRef<Path>) -> Self {
        let jar = jar.as_ref().to_string_lossy().into_owned();
        self.with_leading_args(["-jar".into(), jar, "reason".into()])
    }

    /// The reasoner name, `hermit` by default.
    #[must_use]
    pub fn with_reasoner(mut self, reasoner: impl Into<String>) -> Self {
        self.reasoner = reasoner.into();
        self
    }

    /// The inferred axiom kinds to output, `ClassAssertion` and `PropertyAssertion` by default.
    #[must_use]
    pub fn with_axiom_generators<S: Into<String>>(
        mut self,
        generators: impl IntoIterator<Item = S>,
    ) -> Self {
        self.axiom_generators = generators.into_iter().map(Into::into).collect();
        self
    }

    /// Kills the reasoner if it runs longer than `timeout`. There is no timeout by default.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args = self
            .leading_args
            .iter()
            .map(OsString::from)
            .collect::<Vec<_>>();
        args.extend([
            "--reasoner".into(),
            OsString::from(&self.reasoner),
            "--axiom-generators".into(),
            self.axiom_generators.join(" ").into(),
            "--input".into(),
            input.into(),
            "--output".into(),
            output.into(),
        ]);
        args
    }
}

/// Which resources of the data graph the inferred triples are kept for.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum ProjectionScope {
    /// Every IRI used in the data graph.
    #[default]
    AllResources,
    /// Every IRI used in the data graph except the ones used as `rdf:type` values.
    ExcludeTypes,
}

/// The result of a successful reasoner run.
#[derive(Debug, Clone)]
pub struct Reasoned {
    /// The parsed reasoner output.
    pub graph: OntologyGraph,
    pub output: ProcessOutput,
}

/// Runs an external reasoner on graphs.
#[derive(Debug, Clone, Default)]
pub struct ExternalReasoner {
    config: ReasonerConfig,
}

impl ExternalReasoner {
    pub fn new(config: ReasonerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReasonerConfig {
        &self.config
    }

    /// Reasons on `graph` and returns everything the reasoner wrote.
    ///
    /// Fails if the reasoner exits with a non-zero status, does not write its output or
    /// writes invalid Turtle. The temporary files are removed in every case.
    pub fn reason(&self, graph: &OntologyGraph) -> Result<Reasoned, ReasonerError> {
        let directory = tempfile::Builder::new().prefix("oxaxiom-").tempdir()?;
        let input = directory.path().join("input.ttl");
        let output = directory.path().join("output.ttl");
        write_turtle(graph, &input)?;
        info!(input = %input.display(), triples = graph.len(), "serialized reasoner input");

        let program = &self.config.program;
        let args = self.config.args(&input, &output);
        info!(%program, reasoner = %self.config.reasoner, "invoking reasoner");
        let process_output = process::run(program, args, self.config.timeout)?;
        if !process_output.status.success() {
            return Err(process_output.into_failure(program));
        }

        let file = match File::open(&output) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ReasonerError::MissingOutput(output));
            }
            Err(e) => return Err(e.into()),
        };
        let inferred = OntologyGraph::parse(BufReader::new(file), RdfFormat::Turtle)?;
        info!(triples = inferred.len(), "parsed reasoner output");
        Ok(Reasoned {
            graph: inferred,
            output: process_output,
        })
    }

    /// Reasons on `data` together with `ontology` and only returns new triples about `data`.
    ///
    /// A triple is kept if its subject is an IRI of `data` within `scope`, its object is not a
    /// blank node and it was not already part of the reasoner input. Blank node labels do not
    /// survive the round trip through the reasoner, so triples pointing to blank nodes can not
    /// be told apart from input triples and are always dropped. The result uses the prefixes
    /// of `data`.
    pub fn reason_with_ontology(
        &self,
        data: &OntologyGraph,
        ontology: &OntologyGraph,
        scope: ProjectionScope,
    ) -> Result<Reasoned, ReasonerError> {
        let mut input = data.clone();
        input.extend(ontology);
        let Reasoned {
            graph: inferred,
            output,
        } = self.reason(&input)?;

        let resources = scope.resources(data);
        let mut projected = data.with_same_prefixes();
        for triple in &inferred {
            let NamedOrBlankNodeRef::NamedNode(subject) = triple.subject else {
                continue;
            };
            if matches!(triple.object, TermRef::BlankNode(_)) {
                continue;
            }
            if resources.contains(&subject) && !input.contains(triple) {
                projected.insert(triple);
            }
        }
        info!(
            resources = resources.len(),
            triples = projected.len(),
            "projected reasoner output"
        );
        Ok(Reasoned {
            graph: projected,
            output,
        })
    }
}

impl ProjectionScope {
    fn resources(self, data: &OntologyGraph) -> FxHashSet<NamedNodeRef<'_>> {
        let mut resources = data.named_nodes();
        if self == Self::ExcludeTypes {
            for triple in data.triples_for_predicate(rdf::TYPE) {
                if let TermRef::NamedNode(class) = triple.object {
                    resources.remove(&class);
                }
            }
        }
        resources
    }
}

pub(crate) fn write_turtle(graph: &OntologyGraph, path: &Path) -> Result<(), ReasonerError> {
    let file = File::create(path)?;
    graph
        .serialize(BufWriter::new(file), RdfFormat::Turtle)
        .and_then(|mut writer| writer.flush())
        .map_err(ReasonerError::Serialize)
}

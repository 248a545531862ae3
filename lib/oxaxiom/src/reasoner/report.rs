use super::process;
use super::write_turtle;
use crate::error::ReasonerError;
use crate::store::OntologyGraph;
use crate::vocab::owl;
use oxrdf::NamedNodeRef;
use std::fmt;
use std::io;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Runs a [HermiT](http://www.hermit-reasoner.com/)-compatible classifier to find
/// inconsistencies and unsatisfiable entities.
///
/// The program is called as `<program> <leading args> -cOD <file URI>`.
/// Exit code 1 means the ontology is globally inconsistent, 0 that it has been classified.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ConsistencyChecker {
    program: String,
    leading_args: Vec<String>,
    timeout: Option<Duration>,
}

impl Default for ConsistencyChecker {
    fn default() -> Self {
        Self {
            program: "java".into(),
            leading_args: vec!["-jar".into(), "jarfiles/HermiT.jar".into()],
            timeout: None,
        }
    }
}

impl ConsistencyChecker {
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    #[must_use]
    pub fn with_leading_args<S: Into<String>>(mut self, args: impl IntoIterator<Item = S>) -> Self {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the `jarfiles/HermiT.jar` path, keeping `java -jar <path>`.
    #[must_use]
    pub fn with_jar(self, jar: impl AsRef<Path>) -> Self {
        let jar = jar.as_ref().to_string_lossy().into_owned();
        self.with_leading_args(["-jar".into(), jar])
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Checks an in-memory graph by writing it to a temporary Turtle file.
    pub fn check(&self, graph: &OntologyGraph) -> Result<ConsistencyReport, ReasonerError> {
        let directory = tempfile::Builder::new().prefix("oxaxiom-").tempdir()?;
        let path = directory.path().join("ontology.ttl");
        write_turtle(graph, &path)?;
        self.check_file(&path)
    }

    /// Checks the ontology stored in the file at `path`.
    pub fn check_file(&self, path: impl AsRef<Path>) -> Result<ConsistencyReport, ReasonerError> {
        let path = path.as_ref().canonicalize()?;
        let uri = Url::from_file_path(&path).map_err(|()| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} can not be converted to a file URI", path.display()),
            )
        })?;
        let mut args = self.leading_args.clone();
        args.extend(["-cOD".into(), uri.to_string()]);
        info!(program = %self.program, %uri, "invoking classifier");
        let output = process::run(&self.program, args, self.timeout)?;
        match output.status.code() {
            Some(0) => {
                let report = ConsistencyReport::from_classification(&output.stdout);
                if report.is_consistent_and_satisfiable() {
                    info!("no unsatisfiable entity found");
                } else {
                    warn!(
                        classes = report.unsatisfiable_classes().len(),
                        object_properties = report.unsatisfiable_object_properties().len(),
                        data_properties = report.unsatisfiable_data_properties().len(),
                        "found unsatisfiable entities"
                    );
                }
                Ok(report)
            }
            Some(1) => {
                warn!("the ontology is globally inconsistent");
                Ok(ConsistencyReport::GloballyInconsistent)
            }
            _ => Err(output.into_failure(&self.program)),
        }
    }
}

/// The outcome of a classifier run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ConsistencyReport {
    /// No model exists at all, usually because of a conflict between the instance data and
    /// the class axioms. No detail is available.
    GloballyInconsistent,
    /// The ontology has been classified.
    ///
    /// Each list holds the IRIs found equivalent to the corresponding bottom entity.
    Classified {
        unsatisfiable_classes: Vec<String>,
        unsatisfiable_object_properties: Vec<String>,
        unsatisfiable_data_properties: Vec<String>,
    },
}

impl ConsistencyReport {
    /// Builds a report from the classifier standard output.
    ///
    /// Every `<...>` IRI on a line mentioning a bottom entity is equivalent to it.
    pub fn from_classification(output: &str) -> Self {
        Self::Classified {
            unsatisfiable_classes: equivalents_of(output, owl::NOTHING),
            unsatisfiable_object_properties: equivalents_of(output, owl::BOTTOM_OBJECT_PROPERTY),
            unsatisfiable_data_properties: equivalents_of(output, owl::BOTTOM_DATA_PROPERTY),
        }
    }

    pub fn is_consistent_and_satisfiable(&self) -> bool {
        match self {
            Self::GloballyInconsistent => false,
            Self::Classified {
                unsatisfiable_classes,
                unsatisfiable_object_properties,
                unsatisfiable_data_properties,
            } => {
                unsatisfiable_classes.is_empty()
                    && unsatisfiable_object_properties.is_empty()
                    && unsatisfiable_data_properties.is_empty()
            }
        }
    }

    pub fn unsatisfiable_classes(&self) -> &[String] {
        match self {
            Self::GloballyInconsistent => &[],
            Self::Classified {
                unsatisfiable_classes,
                ..
            } => unsatisfiable_classes,
        }
    }

    pub fn unsatisfiable_object_properties(&self) -> &[String] {
        match self {
            Self::GloballyInconsistent => &[],
            Self::Classified {
                unsatisfiable_object_properties,
                ..
            } => unsatisfiable_object_properties,
        }
    }

    pub fn unsatisfiable_data_properties(&self) -> &[String] {
        match self {
            Self::GloballyInconsistent => &[],
            Self::Classified {
                unsatisfiable_data_properties,
                ..
            } => unsatisfiable_data_properties,
        }
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GloballyInconsistent => {
                writeln!(f, "+ Ontology is globally inconsistent.")?;
                writeln!(f, "+ Probably an A-Box and T-Box conflict.")
            }
            Self::Classified {
                unsatisfiable_classes,
                unsatisfiable_object_properties,
                unsatisfiable_data_properties,
            } => {
                write_section(f, "owl:Nothing", unsatisfiable_classes)?;
                writeln!(f)?;
                write_section(f, "owl:bottomObjectProperty", unsatisfiable_object_properties)?;
                writeln!(f)?;
                write_section(f, "owl:bottomDataProperty", unsatisfiable_data_properties)
            }
        }
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, marker: &str, iris: &[String]) -> fmt::Result {
    if iris.is_empty() {
        return writeln!(f, "+ No URIs in the ontology are equivalent to {marker}");
    }
    writeln!(
        f,
        "+ Number of URIs equivalent to {marker}: {}",
        iris.len()
    )?;
    for iri in iris {
        writeln!(f, "- <{iri}>")?;
    }
    Ok(())
}

/// The distinct IRIs sharing a line with `marker`, in order of appearance, without `marker`.
fn equivalents_of(output: &str, marker: NamedNodeRef<'_>) -> Vec<String> {
    let mut iris = Vec::new();
    for line in output.lines().filter(|line| line.contains(marker.as_str())) {
        for iri in bracketed_iris(line) {
            if iri != marker.as_str() && !iris.iter().any(|known: &String| known == iri) {
                iris.push(iri.to_owned());
            }
        }
    }
    iris
}

fn bracketed_iris(line: &str) -> impl Iterator<Item = &str> {
    line.split('<').skip(1).filter_map(|chunk| {
        let (iri, _) = chunk.split_once('>')?;
        (!iri.is_empty() && !iri.contains(char::is_whitespace)).then_some(iri)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIFICATION: &str = "\
Classification:
<http://www.w3.org/2002/07/owl#Thing>
    <http://rs.tdwg.org/dwc/terms/Event>
<http://rs.tdwg.org/dwc/terms/Bad> <http://www.w3.org/2002/07/owl#Nothing> <http://rs.tdwg.org/dwc/terms/Worse>
<http://www.w3.org/2002/07/owl#bottomObjectProperty> <http://rs.tdwg.org/dwc/terms/badProperty>
";

    #[test]
    fn markers_are_scanned() {
        let report = ConsistencyReport::from_classification(CLASSIFICATION);
        assert_eq!(
            report.unsatisfiable_classes(),
            [
                "http://rs.tdwg.org/dwc/terms/Bad",
                "http://rs.tdwg.org/dwc/terms/Worse"
            ]
        );
        assert_eq!(
            report.unsatisfiable_object_properties(),
            ["http://rs.tdwg.org/dwc/terms/badProperty"]
        );
        assert!(report.unsatisfiable_data_properties().is_empty());
        assert!(!report.is_consistent_and_satisfiable());
    }

    #[test]
    fn satisfiable_report() {
        let report = ConsistencyReport::from_classification(
            "<http://www.w3.org/2002/07/owl#Thing>\n    <http://example.com/A>\n",
        );
        assert!(report.is_consistent_and_satisfiable());
        assert_eq!(
            report.to_string(),
            "+ No URIs in the ontology are equivalent to owl:Nothing\n\n\
             + No URIs in the ontology are equivalent to owl:bottomObjectProperty\n\n\
             + No URIs in the ontology are equivalent to owl:bottomDataProperty\n"
        );
    }

    #[test]
    fn display_lists_iris() {
        let report = ConsistencyReport::from_classification(CLASSIFICATION);
        let text = report.to_string();
        assert!(text.starts_with(
            "+ Number of URIs equivalent to owl:Nothing: 2\n\
             - <http://rs.tdwg.org/dwc/terms/Bad>\n\
             - <http://rs.tdwg.org/dwc/terms/Worse>\n"
        ));
        assert!(text.contains("+ Number of URIs equivalent to owl:bottomObjectProperty: 1\n"));
    }

    #[test]
    fn global_inconsistency_has_no_detail() {
        let report = ConsistencyReport::GloballyInconsistent;
        assert!(!report.is_consistent_and_satisfiable());
        assert!(report.unsatisfiable_classes().is_empty());
        assert!(report.to_string().contains("globally inconsistent"));
    }
}

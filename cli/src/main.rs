use anyhow::{Context, bail};
use clap::Parser;
use cli::{Args, Command, Scope};
use oxaxiom::OntologyGraph;
use oxaxiom::reasoner::{
    ConsistencyChecker, ConsistencyReport, ExternalReasoner, ProjectionScope, ReasonerConfig,
};
use oxrdfio::RdfFormat;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write, stdin, stdout};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match Args::parse().command {
        Command::Reason {
            input,
            input_format,
            ontology,
            scope,
            output,
            output_format,
            reasoner,
            axiom_generators,
            java,
            robot_jar,
            timeout,
        } => {
            let data = read_graph(input.as_deref(), input_format.as_deref())?;
            let mut config = ReasonerConfig::default()
                .with_program(java)
                .with_jar(robot_jar)
                .with_reasoner(reasoner)
                .with_axiom_generators(axiom_generators);
            if let Some(timeout) = timeout {
                config = config.with_timeout(Duration::from_secs(timeout));
            }
            let reasoner = ExternalReasoner::new(config);
            let reasoned = if let Some(ontology) = ontology {
                let ontology = OntologyGraph::load_from_path(&ontology).with_context(|| {
                    format!("Failed to load the ontology {}", ontology.display())
                })?;
                let scope = match scope {
                    Scope::AllResources => ProjectionScope::AllResources,
                    Scope::ExcludeTypes => ProjectionScope::ExcludeTypes,
                };
                reasoner.reason_with_ontology(&data, &ontology, scope)?
            } else {
                reasoner.reason(&data)?
            };
            info!(triples = reasoned.graph.len(), "reasoning done");
            write_graph(&reasoned.graph, output.as_deref(), output_format.as_deref())
        }
        Command::Check {
            input,
            java,
            hermit_jar,
            timeout,
        } => {
            let mut checker = ConsistencyChecker::default()
                .with_program(java)
                .with_jar(hermit_jar);
            if let Some(timeout) = timeout {
                checker = checker.with_timeout(Duration::from_secs(timeout));
            }
            let report = checker.check_file(&input)?;
            let mut stdout = stdout().lock();
            write!(stdout, "{report}")?;
            stdout.flush()?;
            match report {
                ConsistencyReport::GloballyInconsistent => {
                    bail!("{} is globally inconsistent", input.display())
                }
                report if !report.is_consistent_and_satisfiable() => {
                    bail!("{} has unsatisfiable entities", input.display())
                }
                _ => Ok(()),
            }
        }
        Command::Convert {
            from_file,
            from_format,
            to_file,
            to_format,
        } => {
            let graph = read_graph(from_file.as_deref(), from_format.as_deref())?;
            write_graph(&graph, to_file.as_deref(), to_format.as_deref())
        }
    }
}

fn read_graph(file: Option<&Path>, format: Option<&str>) -> anyhow::Result<OntologyGraph> {
    let format = rdf_format(file, format)?;
    Ok(if let Some(file) = file {
        OntologyGraph::parse(BufReader::new(File::open(file)?), format)
            .with_context(|| format!("Failed to parse {}", file.display()))?
    } else {
        OntologyGraph::parse(stdin().lock(), format).context("Failed to parse stdin")?
    })
}

fn write_graph(
    graph: &OntologyGraph,
    file: Option<&Path>,
    format: Option<&str>,
) -> anyhow::Result<()> {
    let format = rdf_format(file, format)?;
    if let Some(file) = file {
        let mut writer = graph.serialize(BufWriter::new(File::create(file)?), format)?;
        writer.flush()?;
        writer.into_inner().map_err(io::IntoInnerError::into_error)?.sync_all()?;
    } else {
        graph.serialize(stdout().lock(), format)?.flush()?;
    }
    if graph.is_empty() {
        warn!("the written graph is empty");
    }
    Ok(())
}

/// The format named `name`, else the one of the file extension, else Turtle for standard streams.
fn rdf_format(file: Option<&Path>, name: Option<&str>) -> anyhow::Result<RdfFormat> {
    if let Some(name) = name {
        return RdfFormat::from_extension(name)
            .or_else(|| RdfFormat::from_media_type(name))
            .with_context(|| format!("The file format '{name}' is unknown"));
    }
    let Some(file) = file else {
        return Ok(RdfFormat::Turtle);
    };
    let Some(extension) = file.extension().and_then(OsStr::to_str) else {
        bail!(
            "The path {} has no extension to guess a file format from",
            file.display()
        )
    };
    RdfFormat::from_extension(extension)
        .with_context(|| format!("The file extension '{extension}' is unknown"))
}

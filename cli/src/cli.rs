use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "oxaxiom")]
/// Oxaxiom command line toolkit to reason on OWL ontologies with external tools
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a ROBOT compatible reasoner on an RDF file and write the inferred graph
    ///
    /// The reasoner is called as `<java> -jar <robot-jar> reason --reasoner <reasoner>
    /// --axiom-generators "<generators>" --input <file> --output <file>`.
    Reason {
        /// File to reason on
        ///
        /// If no file is given, stdin is used as if it were the input file content.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
        /// The format of the input
        ///
        /// It can be an extension like "nt" or a MIME type like "application/n-triples".
        ///
        /// By default, the format is guessed from the input file extension, Turtle is used for stdin.
        #[arg(long)]
        input_format: Option<String>,
        /// Ontology to reason with
        ///
        /// If set, the ontology is merged with the input before reasoning and only the new
        /// triples about the input resources are written.
        #[arg(long, value_hint = ValueHint::FilePath)]
        ontology: Option<PathBuf>,
        /// Which input resources the new triples are kept for when an ontology is given
        #[arg(long, value_enum, default_value_t = Scope::AllResources)]
        scope: Scope,
        /// File to write the result to
        ///
        /// If no file is given, stdout is used.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// The format of the output
        ///
        /// By default, the format is guessed from the output file extension, Turtle is used for stdout.
        #[arg(long)]
        output_format: Option<String>,
        /// Name of the reasoner used by ROBOT
        #[arg(long, default_value = "hermit")]
        reasoner: String,
        /// Kinds of inferred axioms to output
        #[arg(long, num_args = 1.., default_values = ["ClassAssertion", "PropertyAssertion"])]
        axiom_generators: Vec<String>,
        /// Java executable
        #[arg(long, env = "OXAXIOM_JAVA", default_value = "java", value_hint = ValueHint::CommandName)]
        java: String,
        /// Path to the ROBOT jar file
        #[arg(long, env = "OXAXIOM_ROBOT_JAR", default_value = "jarfiles/robot.jar", value_hint = ValueHint::FilePath)]
        robot_jar: PathBuf,
        /// Number of seconds after which the reasoner is killed
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Classify an ontology with HermiT and report inconsistencies and unsatisfiable entities
    ///
    /// Exits with a failure status if the ontology is globally inconsistent
    /// or if some classes or properties are unsatisfiable.
    Check {
        /// Ontology file to check
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Java executable
        #[arg(long, env = "OXAXIOM_JAVA", default_value = "java", value_hint = ValueHint::CommandName)]
        java: String,
        /// Path to the HermiT jar file
        #[arg(long, env = "OXAXIOM_HERMIT_JAR", default_value = "jarfiles/HermiT.jar", value_hint = ValueHint::FilePath)]
        hermit_jar: PathBuf,
        /// Number of seconds after which the classifier is killed
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Convert an RDF file from one format to another, keeping its prefixes
    ///
    /// Named graphs are merged into the default graph.
    Convert {
        /// File to convert from
        ///
        /// If no file is given, stdin is used as if it were the input file content.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        from_file: Option<PathBuf>,
        /// The format of the file to convert from
        ///
        /// It can be an extension like "nt" or a MIME type like "application/n-triples".
        ///
        /// By default, the format is guessed from the input file extension, Turtle is used for stdin.
        #[arg(long)]
        from_format: Option<String>,
        /// File to convert to
        ///
        /// If no file is given, stdout is used.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        to_file: Option<PathBuf>,
        /// The format of the file to convert to
        ///
        /// By default, the format is guessed from the target file extension, Turtle is used for stdout.
        #[arg(long)]
        to_format: Option<String>,
    },
}

/// Which input resources inferred triples are kept for
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum Scope {
    /// Every IRI of the input
    AllResources,
    /// Every IRI of the input except classes used with rdf:type
    ExcludeTypes,
}

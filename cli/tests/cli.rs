#![cfg(unix)]

use anyhow::Result;
use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::{NamedTempFile, TempDir};
use predicates::prelude::*;
use std::fs::{Permissions, set_permissions};
use std::os::unix::fs::PermissionsExt;

const DATA: &str = "<http://example.com/linnaeus> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.com/ns#Agent> .\n";
const INFERRED: &str = "<http://example.com/linnaeus> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.com/ns#Person> .";

fn cli_command() -> Result<Command> {
    Ok(Command::cargo_bin("oxaxiom")?)
}

/// An executable standing in for `java`, running `body` with the arguments after the jar path.
fn fake_java(directory: &TempDir, body: &str) -> Result<std::path::PathBuf> {
    let script = directory.child("java");
    script.write_str(&format!(
        "#!/bin/sh\nwhile [ $# -gt 0 ]; do\n  case \"$1\" in\n    --input) input=\"$2\"; shift 2 ;;\n    --output) output=\"$2\"; shift 2 ;;\n    *) shift ;;\n  esac\ndone\n{body}\n"
    ))?;
    set_permissions(script.path(), Permissions::from_mode(0o755))?;
    Ok(script.path().to_owned())
}

#[test]
fn cli_help() -> Result<()> {
    cli_command()?
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::starts_with("Oxaxiom"));
    Ok(())
}

#[test]
fn cli_convert_file() -> Result<()> {
    let input_file = NamedTempFile::new("input.ttl")?;
    input_file.write_str("@prefix ex: <http://example.com/> .\nex:s ex:p ex:o .\n")?;
    let output_file = NamedTempFile::new("output.nt")?;
    cli_command()?
        .arg("convert")
        .arg("--from-file")
        .arg(input_file.path())
        .arg("--to-file")
        .arg(output_file.path())
        .assert()
        .success();
    output_file.assert("<http://example.com/s> <http://example.com/p> <http://example.com/o> .\n");
    Ok(())
}

#[test]
fn cli_convert_stdin_keeps_prefixes() -> Result<()> {
    cli_command()?
        .arg("convert")
        .arg("--from-format")
        .arg("ttl")
        .arg("--to-format")
        .arg("ttl")
        .write_stdin("@prefix ex: <http://example.com/> .\nex:s ex:p ex:o .\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("@prefix ex: <http://example.com/> ."))
        .stdout(predicate::str::contains("ex:s ex:p ex:o"));
    Ok(())
}

#[test]
fn cli_convert_unknown_format() -> Result<()> {
    cli_command()?
        .arg("convert")
        .arg("--from-format")
        .arg("foo")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("The file format 'foo' is unknown"));
    Ok(())
}

#[test]
fn cli_reason() -> Result<()> {
    let directory = TempDir::new()?;
    let java = fake_java(
        &directory,
        &format!("cat \"$input\" > \"$output\"\necho '{INFERRED}' >> \"$output\""),
    )?;
    cli_command()?
        .arg("reason")
        .arg("--input-format")
        .arg("nt")
        .arg("--output-format")
        .arg("nt")
        .arg("--java")
        .arg(&java)
        .write_stdin(DATA)
        .assert()
        .success()
        .stdout(predicate::str::contains(INFERRED))
        .stdout(predicate::str::contains(DATA));
    Ok(())
}

#[test]
fn cli_reason_with_ontology_only_writes_new_triples() -> Result<()> {
    let directory = TempDir::new()?;
    let java = fake_java(
        &directory,
        &format!("cat \"$input\" > \"$output\"\necho '{INFERRED}' >> \"$output\""),
    )?;
    let ontology = directory.child("ontology.ttl");
    ontology.write_str(
        "<http://example.com/ns#Agent> <http://www.w3.org/2000/01/rdf-schema#subClassOf> <http://example.com/ns#Person> .\n",
    )?;
    let output = directory.child("output.nt");
    cli_command()?
        .env("OXAXIOM_JAVA", &java)
        .arg("reason")
        .arg("--input-format")
        .arg("nt")
        .arg("--ontology")
        .arg(ontology.path())
        .arg("--scope")
        .arg("exclude-types")
        .arg("--output")
        .arg(output.path())
        .write_stdin(DATA)
        .assert()
        .success();
    output.assert(format!("{INFERRED}\n"));
    Ok(())
}

#[test]
fn cli_reason_failure() -> Result<()> {
    let directory = TempDir::new()?;
    let java = fake_java(&directory, "echo 'unknown reasoner' >&2\nexit 3")?;
    cli_command()?
        .arg("reason")
        .arg("--java")
        .arg(&java)
        .arg("--reasoner")
        .arg("foo")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown reasoner"));
    Ok(())
}

#[test]
fn cli_check_satisfiable() -> Result<()> {
    let directory = TempDir::new()?;
    let java = fake_java(&directory, "echo '<http://www.w3.org/2002/07/owl#Thing>'")?;
    let ontology = directory.child("ontology.nt");
    ontology.write_str(DATA)?;
    cli_command()?
        .arg("check")
        .arg("--input")
        .arg(ontology.path())
        .arg("--java")
        .arg(&java)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "+ No URIs in the ontology are equivalent to owl:Nothing",
        ));
    Ok(())
}

#[test]
fn cli_check_unsatisfiable() -> Result<()> {
    let directory = TempDir::new()?;
    let java = fake_java(
        &directory,
        "echo '<http://www.w3.org/2002/07/owl#Nothing> <http://example.com/ns#Agent>'",
    )?;
    let ontology = directory.child("ontology.nt");
    ontology.write_str(DATA)?;
    cli_command()?
        .env("OXAXIOM_JAVA", &java)
        .arg("check")
        .arg("--input")
        .arg(ontology.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "+ Number of URIs equivalent to owl:Nothing: 1\n- <http://example.com/ns#Agent>",
        ))
        .stderr(predicate::str::contains("has unsatisfiable entities"));
    Ok(())
}

#[test]
fn cli_check_globally_inconsistent() -> Result<()> {
    let directory = TempDir::new()?;
    let java = fake_java(&directory, "exit 1")?;
    let ontology = directory.child("ontology.nt");
    ontology.write_str(DATA)?;
    cli_command()?
        .arg("check")
        .arg("--input")
        .arg(ontology.path())
        .arg("--java")
        .arg(&java)
        .assert()
        .failure()
        .stdout(predicate::str::contains("+ Ontology is globally inconsistent."))
        .stderr(predicate::str::contains("globally inconsistent"));
    Ok(())
}

//! Command execution: load a snapshot, run a session, render JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};
use typeexpand_checker::{MemoryProgram, TypeChecker};
use typeexpand_common::Position;
use typeexpand_core::{ExtractOptions, Session, TypeObject};

use crate::cli::args::{AtArgs, CliArgs, Command, ExtractArgs};

/// A projected declaration with its object properties expanded to a fixed
/// depth.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedDeclaration {
    pub declared_name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeObject,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<ExpandedProp>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedProp {
    pub prop_name: String,
    #[serde(rename = "type")]
    pub ty: TypeObject,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<ExpandedProp>,
}

pub fn load_snapshot(path: &Path) -> Result<MemoryProgram> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    MemoryProgram::from_json(&json)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))
}

/// Run a parsed command and return the text to print.
pub fn run(args: &CliArgs) -> Result<String> {
    match &args.command {
        Command::Extract(extract) => run_extract(extract),
        Command::At(at) => run_at(at),
    }
}

fn run_extract(args: &ExtractArgs) -> Result<String> {
    let program = load_snapshot(&args.snapshot)?;
    let declarations = extract(&program, &args.file, args)?;
    info!(file = %args.file, count = declarations.len(), "extracted declarations");
    render(&declarations, args.pretty)
}

pub fn extract<C: TypeChecker + ?Sized>(
    checker: &C,
    file: &str,
    args: &ExtractArgs,
) -> Result<Vec<ExpandedDeclaration>> {
    let mut session = Session::new(checker);
    let options = ExtractOptions {
        skip_unresolved_generics: !args.keep_unresolved_generics,
    };
    let declarations = session
        .extract_types_with(file, options)
        .with_context(|| format!("failed to extract types from {file}"))?;

    Ok(declarations
        .into_iter()
        .map(|declaration| {
            let props = expand(&mut session, &declaration.ty, args.expand_depth);
            ExpandedDeclaration {
                declared_name: declaration.declared_name,
                ty: declaration.ty,
                props,
            }
        })
        .collect())
}

fn run_at(args: &AtArgs) -> Result<String> {
    let program = load_snapshot(&args.snapshot)?;
    let declaration = at(&program, args)?;
    render(&declaration, args.pretty)
}

pub fn at<C: TypeChecker + ?Sized>(checker: &C, args: &AtArgs) -> Result<ExpandedDeclaration> {
    let mut session = Session::new(checker);
    let position = Position::new(args.line, args.character);
    let (declared_name, ty) = session
        .type_at_position(&args.file, position)
        .with_context(|| format!("no type at {}:{}:{}", args.file, args.line, args.character))?;
    let props = expand(&mut session, &ty, args.expand_depth);
    Ok(ExpandedDeclaration {
        declared_name,
        ty,
        props,
    })
}

/// Walk store keys through `get_object_props`, `depth` levels deep.
/// Arrays and promises are looked through to their element type.
fn expand<C: TypeChecker + ?Sized>(
    session: &mut Session<'_, C>,
    ty: &TypeObject,
    depth: u32,
) -> Vec<ExpandedProp> {
    if depth == 0 {
        return Vec::new();
    }
    let Some(key) = expandable_key(ty) else {
        return Vec::new();
    };
    debug!(key, depth, "expanding object");
    session
        .get_object_props(key)
        .into_iter()
        .map(|prop| {
            let props = expand(session, &prop.ty, depth - 1);
            ExpandedProp {
                prop_name: prop.prop_name,
                ty: prop.ty,
                props,
            }
        })
        .collect()
}

fn expandable_key(ty: &TypeObject) -> Option<&str> {
    match ty {
        TypeObject::Object(object) => Some(&object.store_key),
        TypeObject::Array(array) => expandable_key(&array.child),
        TypeObject::Promise(promise) | TypeObject::PromiseLike(promise) => {
            expandable_key(&promise.child)
        }
        _ => None,
    }
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.context("failed to render output")
}

//! Loader for the DIMACS edge-list convention used by the benchmark corpus
//! this repository draws its test graphs from.
//!
//! Grammar (one directive per line, order otherwise unconstrained):
//! - `c ...` — comment, ignored.
//! - `p edge <n> <m>` — declares a graph on vertices `1..=n` with `m` arcs.
//!   Must appear before any `a` line.
//! - `n <label> s` — declares `label` the source. Exactly one is required.
//! - `a <u> <v>` — an arc `u -> v`.
//!
//! Blank lines are ignored. `n <label> t` (sink) lines are accepted and
//! ignored: this loader has no use for a declared sink.

use core::fmt::{Display, Formatter};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use error_stack::{Context, Report, ResultExt};
use tracing::info;

use crate::flow_graph::{Graph, GraphBuilder, Label};

#[derive(Debug)]
pub enum LoaderError {
    Io,
    MissingHeader,
    EmptyGraph { line_no: usize },
    MalformedLine { line_no: usize },
    LabelOutOfRange { line_no: usize, label: u64 },
    MissingSource,
}

impl Display for LoaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "could not read input file"),
            Self::MissingHeader => write!(f, "missing `p edge <n> <m>` header"),
            Self::EmptyGraph { line_no } => {
                write!(f, "`p edge` header on line {line_no} declares zero vertices")
            }
            Self::MalformedLine { line_no } => write!(f, "malformed line {line_no}"),
            Self::LabelOutOfRange { line_no, label } => {
                write!(f, "label {label} on line {line_no} is out of range")
            }
            Self::MissingSource => write!(f, "no `n <label> s` source declaration"),
        }
    }
}

impl Context for LoaderError {}

/// Preprocessing applied while building the graph, mirroring the CLI's
/// `--reverse`/`--simplify` flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub reverse: bool,
    pub simplify: bool,
}

/// A graph loaded from a DIMACS file, plus its declared source.
pub struct Loaded {
    pub graph: Graph,
    pub source: Label,
}

pub fn load(path: impl AsRef<Path>, opts: LoadOptions) -> Result<Loaded, Report<LoaderError>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .change_context(LoaderError::Io)
        .attach_printable_lazy(|| format!("path: {}", path.display()))?;
    let loaded = parse(BufReader::new(file), opts).attach_printable_lazy(|| format!("path: {}", path.display()))?;
    info!(vertices = loaded.graph.n_vertices(), arcs = loaded.graph.n_arcs(), path = %path.display(), "loaded DIMACS graph");
    Ok(loaded)
}

fn parse(reader: impl BufRead, opts: LoadOptions) -> Result<Loaded, Report<LoaderError>> {
    let mut n: Option<usize> = None;
    let mut source: Option<Label> = None;
    let mut builder: Option<GraphBuilder> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.change_context(LoaderError::Io)?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let tag = fields.next().ok_or(LoaderError::MalformedLine { line_no })?;
        match tag {
            "p" => {
                let kind = fields.next();
                let vertices = fields.next();
                if kind != Some("edge") {
                    return Err(Report::new(LoaderError::MalformedLine { line_no }));
                }
                let vertices: usize = vertices
                    .and_then(|s| s.parse().ok())
                    .ok_or(LoaderError::MalformedLine { line_no })?;
                if vertices == 0 {
                    return Err(Report::new(LoaderError::EmptyGraph { line_no }));
                }
                n = Some(vertices);
            }
            "n" => {
                let label: u64 = fields
                    .next()
                    .and_then(|s| s.parse().ok())
                    .ok_or(LoaderError::MalformedLine { line_no })?;
                let kind = fields.next().ok_or(LoaderError::MalformedLine { line_no })?;
                if kind == "s" {
                    let n = n.ok_or(LoaderError::MissingHeader)?;
                    if label == 0 || label as usize > n {
                        return Err(Report::new(LoaderError::LabelOutOfRange { line_no, label }));
                    }
                    source = Some(label as Label);
                }
                // "t" (sink) declarations, or anything else, are ignored.
            }
            "a" => {
                let n = n.ok_or(LoaderError::MissingHeader)?;
                // `source` may not be known yet if its `n ... s` line comes
                // after this arc; `1` here is a placeholder, fixed up via
                // `set_source` once the whole file has been scanned.
                let builder = builder.get_or_insert_with(|| {
                    GraphBuilder::new(n, source.unwrap_or(1)).simplify(opts.simplify)
                });
                let u: u64 = fields
                    .next()
                    .and_then(|s| s.parse().ok())
                    .ok_or(LoaderError::MalformedLine { line_no })?;
                let v: u64 = fields
                    .next()
                    .and_then(|s| s.parse().ok())
                    .ok_or(LoaderError::MalformedLine { line_no })?;
                if u == 0 || u as usize > n {
                    return Err(Report::new(LoaderError::LabelOutOfRange { line_no, label: u }));
                }
                if v == 0 || v as usize > n {
                    return Err(Report::new(LoaderError::LabelOutOfRange { line_no, label: v }));
                }
                builder.add_arc(u as Label, v as Label);
            }
            _ => return Err(Report::new(LoaderError::MalformedLine { line_no })),
        }
    }

    let n = n.ok_or(LoaderError::MissingHeader)?;
    let source = source.ok_or(LoaderError::MissingSource)?;

    // A builder was never constructed if the file declared zero arcs; build
    // an empty one so `load` still succeeds on a single-vertex graph.
    let mut builder = builder.unwrap_or_else(|| GraphBuilder::new(n, source).simplify(opts.simplify));
    // The grammar allows `n <label> s` after `a` lines, so the builder may
    // have been constructed before `source` was known (with a placeholder).
    // Fix it up now that the file has been fully scanned.
    builder.set_source(source);
    if opts.reverse {
        builder = builder.reverse();
    }
    let graph = builder.build();

    Ok(Loaded { graph, source })
}

/// Serialize `graph` and its `source` back into DIMACS text, in the grammar
/// [`parse`] accepts: a `p edge` header, the `n <source> s` line, then every
/// arc in forward-CSR order.
pub fn write(graph: &Graph, source: Label, mut out: impl Write) -> io::Result<()> {
    writeln!(out, "p edge {} {}", graph.n_vertices(), graph.n_arcs())?;
    writeln!(out, "n {source} s")?;
    for v in 1..=graph.n_vertices() as Label {
        for &w in graph.out_bounds(v) {
            writeln!(out, "a {v} {w}")?;
        }
    }
    Ok(())
}

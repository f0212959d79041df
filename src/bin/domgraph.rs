//! CLI entry point: load a DIMACS graph, run one of the dominator
//! algorithms (or a diagnostic traversal) against it, and print timing and
//! operation-count statistics, or cross-validate every algorithm's output.
//!
//! This binary is the only fallible surface in the repository: the
//! core library itself never returns `Result`.

use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand, ValueEnum};
use error_stack::{Context, Report, ResultExt};
use tracing::debug;

use domgraph::dimacs::{self, LoadOptions, Loaded};
use domgraph::dom::{DominatorGraph, Method};
use domgraph::flow_graph::Label;

#[derive(Parser)]
#[command(name = "domgraph", version, about = "Immediate-dominator algorithm benchmark and cross-validator")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log verbosity (`-v` for debug, `-vv` for trace); respects `RUST_LOG` too.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Run one method on one graph and print timing/operation statistics.
    Run(RunArgs),
    /// Run every dominator algorithm and report the first disagreement, if any.
    Check(CheckArgs),
    /// Time one method across every graph named in a list file.
    Series(SeriesArgs),
}

#[derive(clap::Args)]
struct LoadArgs {
    /// Swap every arc's direction before building the graph (post-dominators).
    #[arg(long)]
    reverse: bool,
    /// Drop parallel arcs while building the CSR adjacency.
    #[arg(long)]
    simplify: bool,
}

#[derive(clap::Args)]
struct RunArgs {
    /// Path to a DIMACS edge-list file.
    file: PathBuf,
    #[command(flatten)]
    load: LoadArgs,
    /// Which algorithm (or diagnostic traversal) to run.
    #[arg(long, value_enum, default_value_t = CliMethod::Idfs)]
    method: CliMethod,
    /// Keep re-running until this many seconds of wall-clock have elapsed.
    #[arg(long, default_value_t = 1.0)]
    min_time: f64,
    /// Write `label idom` pairs to this file after the last run.
    #[arg(long)]
    idom_file: Option<PathBuf>,
}

#[derive(clap::Args)]
struct CheckArgs {
    file: PathBuf,
    #[command(flatten)]
    load: LoadArgs,
    /// Print every method's run, not just the first disagreement.
    #[arg(long)]
    verbose: bool,
    /// Flip one entry of the named method's output before comparing, to
    /// exercise the disagreement path in tests. Not a real tuning
    /// knob: hidden from `--help`.
    #[arg(long, hide = true)]
    corrupt: Option<String>,
}

#[derive(clap::Args)]
struct SeriesArgs {
    /// Path to a text file listing one DIMACS file path per line.
    list_file: PathBuf,
    #[command(flatten)]
    load: LoadArgs,
    #[arg(long, value_enum, default_value_t = CliMethod::Idfs)]
    method: CliMethod,
    #[arg(long, default_value_t = 1.0)]
    min_time: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliMethod {
    Idfs,
    Ibfs,
    Slt,
    Snca,
    Sdom,
    Dfs,
    Bfs,
}

impl CliMethod {
    fn as_dom_method(self) -> Option<Method> {
        match self {
            Self::Idfs => Some(Method::Idfs),
            Self::Ibfs => Some(Method::Ibfs),
            Self::Slt => Some(Method::Slt),
            Self::Snca => Some(Method::Snca),
            Self::Sdom => Some(Method::Sdom),
            Self::Dfs | Self::Bfs => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Idfs => "idfs",
            Self::Ibfs => "ibfs",
            Self::Slt => "slt",
            Self::Snca => "snca",
            Self::Sdom => "sdom",
            Self::Dfs => "dfs",
            Self::Bfs => "bfs",
        }
    }
}

#[derive(Debug)]
enum CliError {
    Load,
    Write,
    EmptyList,
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Load => write!(f, "failed to load a graph"),
            Self::Write => write!(f, "failed to write output"),
            Self::EmptyList => write!(f, "series list file named no graphs"),
        }
    }
}

impl Context for CliError {}

fn main() -> Result<(), Report<CliError>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Run(args) => run(args),
        Command::Check(args) => check(args),
        Command::Series(args) => series(args),
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "domgraph=info",
        1 => "domgraph=debug",
        _ => "domgraph=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn load(path: &PathBuf, load: &LoadArgs) -> Result<Loaded, Report<CliError>> {
    let opts = LoadOptions { reverse: load.reverse, simplify: load.simplify };
    dimacs::load(path, opts).change_context(CliError::Load)
}

/// One timed execution of `method`, returning the counters from its last
/// run and the average wall-clock time per run in seconds.
fn time_method(loaded: &Loaded, method: CliMethod, min_time: f64) -> (domgraph::dom::Counters, f64, usize) {
    let n = loaded.graph.n_vertices();
    let mut dg = DominatorGraph::new(&loaded.graph);
    let mut idom = vec![0u32; n + 1];

    let deadline = Duration::from_secs_f64(min_time.max(0.0));
    let start = Instant::now();
    let mut iters = 0usize;
    let mut counters = domgraph::dom::Counters::default();
    loop {
        match method.as_dom_method() {
            Some(Method::Idfs) => dg.idfs(loaded.source, &mut idom),
            Some(Method::Ibfs) => dg.ibfs(loaded.source, &mut idom),
            Some(Method::Slt) => dg.slt(loaded.source, &mut idom),
            Some(Method::Snca) => dg.snca(loaded.source, &mut idom),
            Some(Method::Sdom) => {
                dg.semi_dominators(loaded.source);
            }
            None if matches!(method, CliMethod::Dfs) => {
                dg.run_dfs(loaded.source);
            }
            None => {
                dg.run_bfs(loaded.source);
            }
        }
        counters = domgraph::dom::Counters {
            icount: dg.icount(),
            ccount: dg.ccount(),
            scount: dg.scount(),
        };
        iters += 1;
        if start.elapsed() >= deadline {
            break;
        }
    }
    let total = start.elapsed().as_secs_f64();
    debug!(method = method.name(), iters, icount = counters.icount, ccount = counters.ccount, scount = counters.scount, "method timed");
    (counters, total / iters as f64, iters)
}

fn print_stat(key: &str, value: impl Display) {
    println!("{key} {value}");
}

fn run(args: RunArgs) -> Result<(), Report<CliError>> {
    let loaded = load(&args.file, &args.load)?;
    print_stat("vertices", loaded.graph.n_vertices());
    print_stat("arcs", loaded.graph.n_arcs());

    let (counters, secs_per_iter, iters) = time_method(&loaded, args.method, args.min_time);
    print_stat("method", args.method.name());
    print_stat("iters", iters);
    print_stat("time_secs", secs_per_iter);
    print_stat("icount", counters.icount);
    print_stat("ccount", counters.ccount);
    print_stat("scount", counters.scount);

    if let Some(path) = args.idom_file {
        if let Some(dom_method) = args.method.as_dom_method().filter(|m| *m != Method::Sdom) {
            let mut idom = vec![0u32; loaded.graph.n_vertices() + 1];
            let mut dg = DominatorGraph::new(&loaded.graph);
            apply(&mut dg, dom_method, loaded.source, &mut idom);
            write_idom_file(&path, &idom).change_context(CliError::Write)?;
        }
    }
    Ok(())
}

fn write_idom_file(path: &PathBuf, idom: &[Label]) -> std::io::Result<()> {
    let mut out = std::io::BufWriter::new(std::fs::File::create(path)?);
    for (label, &d) in idom.iter().enumerate().skip(1) {
        writeln!(out, "{label} {d}")?;
    }
    out.flush()
}

fn apply(dg: &mut DominatorGraph<'_>, method: Method, r: Label, idom: &mut [Label]) {
    match method {
        Method::Idfs => dg.idfs(r, idom),
        Method::Ibfs => dg.ibfs(r, idom),
        Method::Slt => dg.slt(r, idom),
        Method::Snca => dg.snca(r, idom),
        Method::Sdom => unreachable!("semi_dominators has no idom output"),
    }
}

/// Pre-fill `idom` with a sentinel that cannot be mistaken for a real label
/// or `0`, so an unwritten slot is visible as a wrong answer.
fn sentinel_fill(idom: &mut [Label], n: usize, method_code: u32) {
    for (i, slot) in idom.iter_mut().enumerate() {
        *slot = n as u32 + method_code + i as u32;
    }
}

fn check(args: CheckArgs) -> Result<(), Report<CliError>> {
    let loaded = load(&args.file, &args.load)?;
    let n = loaded.graph.n_vertices();
    let mut dg = DominatorGraph::new(&loaded.graph);

    let mut reference = vec![0u32; n + 1];
    sentinel_fill(&mut reference, n, Method::Idfs.code());
    dg.idfs(loaded.source, &mut reference);
    if args.verbose {
        println!("{}: reference computed", Method::Idfs.name());
    }

    let mut mismatches = 0;
    for method in [Method::Ibfs, Method::Slt, Method::Snca] {
        let mut idom = vec![0u32; n + 1];
        sentinel_fill(&mut idom, n, method.code());
        apply(&mut dg, method, loaded.source, &mut idom);

        if args.corrupt.as_deref() == Some(method.name()) {
            if let Some(slot) = idom.iter_mut().skip(1).find(|d| **d != 0) {
                *slot = slot.wrapping_add(1);
            }
        }

        match idom.iter().zip(&reference).position(|(a, b)| a != b) {
            Some(i) => {
                mismatches += 1;
                println!("{}: disagrees with {} at label {i} ({} vs {})", method.name(), Method::Idfs.name(), idom[i], reference[i]);
            }
            None if args.verbose => println!("{}: agrees", method.name()),
            None => {}
        }
    }

    if mismatches == 0 {
        println!("ok");
    }
    Ok(())
}

fn series(args: SeriesArgs) -> Result<(), Report<CliError>> {
    let list_text = std::fs::read_to_string(&args.list_file).change_context(CliError::Load)?;
    let paths: Vec<PathBuf> = list_text.lines().map(str::trim).filter(|l| !l.is_empty()).map(PathBuf::from).collect();
    if paths.is_empty() {
        return Err(Report::new(CliError::EmptyList));
    }

    let mut total_vertices = 0u64;
    let mut total_arcs = 0u64;
    let mut total_icount = 0u64;
    let mut total_ccount = 0u64;
    let mut total_scount = 0u64;
    let mut total_time = 0.0;
    let mut graphs = 0u64;

    for path in &paths {
        let loaded = load(path, &args.load)?;
        let (counters, secs_per_iter, _iters) = time_method(&loaded, args.method, args.min_time);
        total_vertices += loaded.graph.n_vertices() as u64;
        total_arcs += loaded.graph.n_arcs() as u64;
        total_icount += counters.icount;
        total_ccount += counters.ccount;
        total_scount += counters.scount;
        total_time += secs_per_iter;
        graphs += 1;
    }

    print_stat("graphs", graphs);
    print_stat("method", args.method.name());
    print_stat("total_vertices", total_vertices);
    print_stat("total_arcs", total_arcs);
    print_stat("avg_density", total_arcs as f64 / total_vertices.max(1) as f64);
    print_stat("total_time_secs", total_time);
    print_stat("total_icount", total_icount);
    print_stat("total_ccount", total_ccount);
    print_stat("total_scount", total_scount);
    Ok(())
}

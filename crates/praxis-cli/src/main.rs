use praxis::adoption::parse_adopted_ids;
use praxis::{
    AdoptionStats, Catalog, DiagramState, DiagramView, LayoutOptions, SEED_ROOT_ID, TreeNode,
    build_tree_from_catalog, compute_adoption_stats, render_view,
};
use rustc_hash::FxHashSet as HashSet;
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Praxis(praxis::Error),
    Json(serde_json::Error),
    RootNotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Praxis(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::RootNotFound(id) => write!(f, "No practice with id `{id}` in the catalog"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<praxis::Error> for CliError {
    fn from(value: praxis::Error) -> Self {
        Self::Praxis(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Tree,
    #[default]
    Levels,
    Stats,
    FanIn,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    catalog: Option<String>,
    root: Option<String>,
    config: Option<String>,
    max_depth: Option<usize>,
    iterations: Option<usize>,
    adopted: HashSet<String>,
    collapsed: HashSet<String>,
    pretty: bool,
}

#[derive(Serialize)]
struct TreeOut<'a> {
    root_id: &'a str,
    tree: &'a TreeNode,
    cycles_encountered: &'a [String],
    depth_exceeded: &'a [String],
    missing_dependencies: &'a [String],
}

#[derive(Serialize)]
struct StatsOut<'a> {
    root_id: &'a str,
    #[serde(flatten)]
    stats: AdoptionStats,
}

#[derive(Serialize)]
struct FanInOut<'a> {
    id: &'a str,
    name: &'a str,
    fan_in: usize,
    fan_out: usize,
}

fn usage() -> &'static str {
    "praxis-cli\n\
\n\
USAGE:\n\
  praxis-cli [levels] [--catalog <path>|-] [--root <id>] [--config <path>] [--max-depth <n>] [--iterations <n>] [--collapse <id,id,...>] [--pretty]\n\
  praxis-cli tree [--catalog <path>|-] [--root <id>] [--config <path>] [--max-depth <n>] [--pretty]\n\
  praxis-cli stats [--catalog <path>|-] [--root <id>] [--adopted <id,id,...>] [--pretty]\n\
  praxis-cli fan-in [--catalog <path>|-] [--pretty]\n\
\n\
NOTES:\n\
  - Without --catalog the bundled continuous-delivery catalog is used; '-' reads stdin.\n\
  - --root defaults to continuous-delivery.\n\
  - --config reads a JSON object with optional `maxDepth` and `iterations`; flags override it.\n\
  - Set RUST_LOG=debug to see cycle and truncation events on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "tree" => args.command = Command::Tree,
            "levels" => args.command = Command::Levels,
            "stats" => args.command = Command::Stats,
            "fan-in" => args.command = Command::FanIn,
            "--pretty" => args.pretty = true,
            "--catalog" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.catalog = Some(path.clone());
            }
            "--root" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.root = Some(id.clone());
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--max-depth" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.max_depth = Some(n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--iterations" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.iterations = Some(n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--adopted" => {
                let Some(ids) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.adopted.extend(parse_adopted_ids(ids));
            }
            "--collapse" => {
                let Some(ids) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.collapsed.extend(parse_adopted_ids(ids));
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn load_catalog(path: Option<&str>) -> Result<Catalog, CliError> {
    let catalog = match path {
        None => Catalog::seed()?,
        Some(path) => Catalog::from_json(&read_input(path)?)?,
    };
    tracing::info!(
        practices = catalog.node_count(),
        edges = catalog.edge_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

fn layout_options(args: &Args) -> Result<LayoutOptions, CliError> {
    let mut options = match args.config.as_deref() {
        None => LayoutOptions::default(),
        Some(path) => LayoutOptions::from_json(&std::fs::read_to_string(path)?)?,
    };
    if let Some(max_depth) = args.max_depth {
        options.max_depth = max_depth;
    }
    if let Some(iterations) = args.iterations {
        options.iterations = iterations;
    }
    Ok(options)
}

fn run(args: Args) -> Result<(), CliError> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let options = layout_options(&args)?;
    let root_id = args.root.as_deref().unwrap_or(SEED_ROOT_ID);

    match args.command {
        Command::Levels => {
            let state = DiagramState {
                root_id: root_id.to_string(),
                collapsed: args.collapsed.clone(),
            };
            let view: DiagramView = render_view(&catalog, &state, &options)?;
            if !view.found {
                return Err(CliError::RootNotFound(root_id.to_string()));
            }
            write_json(&view, args.pretty)
        }
        Command::Tree => {
            let outcome = build_tree_from_catalog(&catalog, root_id, options.max_depth);
            let Some(tree) = outcome.tree.as_ref() else {
                return Err(CliError::RootNotFound(root_id.to_string()));
            };
            write_json(
                &TreeOut {
                    root_id,
                    tree,
                    cycles_encountered: &outcome.cycles_encountered,
                    depth_exceeded: &outcome.depth_exceeded,
                    missing_dependencies: &outcome.missing_dependencies,
                },
                args.pretty,
            )
        }
        Command::Stats => {
            let outcome = build_tree_from_catalog(&catalog, root_id, options.max_depth);
            let Some(tree) = outcome.tree.as_ref() else {
                return Err(CliError::RootNotFound(root_id.to_string()));
            };
            let stats = compute_adoption_stats(tree, &args.adopted);
            write_json(&StatsOut { root_id, stats }, args.pretty)
        }
        Command::FanIn => {
            let rows: Vec<FanInOut<'_>> = catalog
                .nodes_by_id()
                .values()
                .map(|node| FanInOut {
                    id: &node.id,
                    name: &node.name,
                    fan_in: catalog.fan_in(&node.id),
                    fan_out: catalog.dependencies_of(&node.id).len(),
                })
                .collect();
            write_json(&rows, args.pretty)
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::RootNotFound(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use is_terminal::IsTerminal;

use fn_runtime::invoke::{DockerRuntime, TestExec};
use fn_runtime::prelude::*;
use fn_runtime::{filter, stream};

fn main() {
    use clap::{crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, Command};

    let cmd = Command::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .args([
            Arg::new("function_config")
                .help("path to the function-config document")
                .required(true),
            Arg::new("global_scope")
                .long("global-scope")
                .help("place every input document in scope, ignoring path annotations")
                .action(ArgAction::SetTrue),
            Arg::new("keep_annotations")
                .long("keep-annotations")
                .help("keep the transient index annotation on output")
                .action(ArgAction::SetTrue),
            Arg::new("results_file")
                .long("results-file")
                .help("path to write the function's results sequence to"),
            Arg::new("network")
                .long("network")
                .help("container network to use when the function requests network access"),
            Arg::new("flow_style_config")
                .long("flow-style-config")
                .help("render functionConfig on a single line in the envelope")
                .action(ArgAction::SetTrue),
            Arg::new("exec")
                .long("exec")
                .hide(true)
                .help("test hook: run this program instead of a container runtime")
                .action(ArgAction::Append)
                .num_args(1..),
        ]);

    if let Err(e) = Args::try_from(&cmd.get_matches()).and_then(run) {
        eprintln!("{e}");
        process::exit(1);
    }
}

struct Args {
    function_config: PathBuf,
    options: RunOptions,
    exec_override: Option<Vec<String>>,
}

impl TryFrom<&clap::ArgMatches> for Args {
    type Error = Error;

    fn try_from(m: &clap::ArgMatches) -> Result<Self> {
        let mut options = RunOptions::default()
            .with_global_scope(m.get_flag("global_scope"))
            .with_keep_reader_annotations(m.get_flag("keep_annotations"))
            .with_flow_style_config(m.get_flag("flow_style_config"));
        if let Some(path) = m.get_one::<String>("results_file") {
            options = options.with_results_file(path.as_str());
        }
        if let Some(network) = m.get_one::<String>("network") {
            options = options.with_network(network.as_str());
        }
        let exec_override = m
            .get_many::<String>("exec")
            .map(|values| values.cloned().collect());

        Ok(Self {
            function_config: m.get_one::<String>("function_config").unwrap().into(),
            options,
            exec_override,
        })
    }
}

fn run(args: Args) -> Result<()> {
    init_logging()?;

    let function_config_text = std::fs::read_to_string(&args.function_config)
        .map_err(|e| Error::Spec(format!("reading function config: {e}")))?;
    let function_config = Document::from_str(&function_config_text)?;

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(Error::Io)?;
    let candidates = stream::read_stream(&input)?;

    let outcome = match &args.exec_override {
        Some(argv) => {
            let exec = TestExec(argv.clone());
            filter::run(&function_config, candidates, &args.options, &exec)?
        }
        None => {
            let exec: DockerRuntime = filter::default_exec();
            filter::run(&function_config, candidates, &args.options, &exec)?
        }
    };

    let output = stream::write_stream(&outcome.items)?;
    io::stdout().write_all(output.as_bytes()).map_err(Error::Io)?;
    Ok(())
}

fn init_logging() -> Result<()> {
    use tracing_subscriber::{filter::EnvFilter, prelude::*};

    // Stdout carries the ResourceList envelope read by the next filter in a pipeline, so logs
    // always go to stderr regardless of format; only the format (human vs JSON) follows whether
    // stderr itself is attached to a terminal.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| Error::Other(anyhow::anyhow!(e)))?;
    let collector = tracing_subscriber::Registry::default()
        .with(env_filter)
        .with(if io::stderr().is_terminal() {
            Some(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        } else {
            None
        })
        .with(if io::stderr().is_terminal() {
            None
        } else {
            Some(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
        });
    tracing::subscriber::set_global_default(collector)
        .map_err(|e| Error::Other(anyhow::anyhow!(e)))?;
    Ok(())
}

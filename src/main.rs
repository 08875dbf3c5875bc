mod cli;
mod logging;

use cli::{CliArgs, USAGE};
use logging::Verbosity;
use rbv_frontend::{Visualizer, run_plain, run_plain_lines};
use rbv_tree::RBTree;
use std::env;
use std::io;
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = match CliArgs::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("rbv: {e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rbv: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    logging::init_subscriber(
        Verbosity::from_counts(args.verbose, args.quiet),
        args.log_file.as_deref(),
        !args.plain,
    )?;

    let mut config = Visualizer::load_config(args.config.as_deref())?;
    if args.no_animation {
        config.animation.enabled = false;
    }
    info!(keys = args.keys.len(), plain = args.plain, "starting");

    if args.plain {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let tree = if args.keys.is_empty() {
            run_plain_lines(io::stdin().lock(), &mut out)?
        } else {
            run_plain(&args.keys, &mut out)?
        };
        report(&tree);
        return Ok(());
    }

    let mut visualizer = Visualizer::new(config);
    for &key in &args.keys {
        visualizer.insert(key);
    }
    visualizer.run()?;
    report(visualizer.tree());

    Ok(())
}

fn report(tree: &RBTree<i64>) {
    match tree.validate() {
        Ok(()) => info!(
            len = tree.len(),
            height = tree.height(),
            black_height = tree.black_height(),
            "tree is valid"
        ),
        Err(violation) => error!(%violation, "tree is broken"),
    }
}

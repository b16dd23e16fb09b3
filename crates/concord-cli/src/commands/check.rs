use crate::report::{RunReport, render_group, render_summary};
use crate::support::{EXIT_MISMATCH, EXIT_USAGE, load_config_or_exit, print_json_or_exit};
use concord_kernel::check_tree;
use concord_loader::{FsDocumentLoader, walk_directories};
use std::path::PathBuf;
use tracing::info;

pub struct Args {
    pub path: String,
    pub config: String,
    pub groups: Vec<String>,
    pub strict: bool,
    pub json: bool,
}

pub fn run(args: Args) {
    let config = load_config_or_exit(&args.config);
    let selected = config.select(&args.groups).unwrap_or_else(|err| {
        eprintln!("error: {err}");
        std::process::exit(EXIT_USAGE);
    });

    let root = PathBuf::from(&args.path);
    let directories = walk_directories(&root).unwrap_or_else(|err| {
        eprintln!("error: {err}");
        std::process::exit(EXIT_USAGE);
    });
    let loader = if args.strict {
        FsDocumentLoader::strict()
    } else {
        FsDocumentLoader::lenient()
    };
    info!(
        root = %root.display(),
        directories = directories.len(),
        groups = selected.len(),
        "checking tree"
    );

    let mut reports = Vec::with_capacity(selected.len());
    for group in selected {
        let report = check_tree(&loader, directories.iter().cloned(), group)
            .unwrap_or_else(|err| {
                eprintln!("error: group {:?}: {err}", group.name());
                std::process::exit(EXIT_USAGE);
            });
        if !args.json {
            println!("{}", render_group(&report, |path| config.is_quiet(path)));
            println!();
        }
        reports.push(report);
    }

    let run = RunReport::new(&root, config.path(), reports);
    if args.json {
        print_json_or_exit(&run, "consistency check");
    } else {
        println!("{}", render_summary(run.mismatch()));
    }

    if run.mismatch() {
        std::process::exit(EXIT_MISMATCH);
    }
}

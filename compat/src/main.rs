use clap::Parser;
use colored::Colorize;
use glob::glob;
use scrollbox_common::test_case::TestCase;
use std::path::PathBuf;

mod test_runner;
use test_runner::{TestResult, TestRunner};

/// Runs the markdown compatibility tests against a scrollbox binary

#[derive(Parser, Debug)]
struct Args {
    /// Runtime path
    runtime: PathBuf,

    /// Compatibility tests glob (e.g., "compatibility-tests/*.md")
    compatibility_tests: String,
}

fn main() {
    let args = Args::parse();

    let paths = match get_compatibility_tests(&args.compatibility_tests) {
        Ok(paths) => paths,
        Err(err) => {
            eprintln!("Invalid pattern {}: {}", args.compatibility_tests, err);
            std::process::exit(1);
        }
    };

    let runner = match TestRunner::from_path(args.runtime) {
        Ok(runner) => runner,
        Err(err) => {
            eprintln!("Could not create a scratch directory: {}", err);
            std::process::exit(1);
        }
    };
    let mut passed = 0;
    let mut failed = 0;
    let mut skipped = 0;

    for path in paths {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                println!("{} {}: {}", "FAIL".red(), path.display(), err);
                failed += 1;
                continue;
            }
        };
        let test_case = TestCase::from_string(content, &path);

        if test_case.disabled {
            println!("{} {}", "SKIP".yellow(), test_case.name);
            skipped += 1;
            continue;
        }

        let name = test_case.name.clone();
        match runner.run(test_case) {
            TestResult::Pass => {
                println!("{} {}", "PASS".green(), name);
                passed += 1;
            }
            TestResult::Fail { expected, actual } => {
                println!("{} {}", "FAIL".red(), name);
                if let Some(expected) = expected {
                    println!("{}\n{}", "Expected:".bold(), expected);
                }
                println!("{}\n{}", "Actual:".bold(), actual);
                failed += 1;
            }
        }
    }

    drop(runner);

    println!(
        "\n{} passed, {} failed, {} skipped",
        passed.to_string().green(),
        failed.to_string().red(),
        skipped
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn get_compatibility_tests(pattern: &str) -> Result<Vec<PathBuf>, glob::PatternError> {
    let mut paths: Vec<PathBuf> = glob(pattern)?.filter_map(Result::ok).collect();
    paths.sort();
    Ok(paths)
}

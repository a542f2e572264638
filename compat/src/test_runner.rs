use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

use scrollbox_common::test_case::TestCase;

#[derive(Debug, Clone, PartialEq)]
pub enum TestResult {
    Pass,
    Fail {
        expected: Option<String>,
        actual: String,
    },
}

impl TestResult {
    /// Compares runtime output with the expected result, ignoring trailing
    /// line breaks on both sides.
    pub fn compare(expected: &str, actual: String) -> Self {
        let line_breaks = &['\r', '\n'][..];
        if expected.trim_end_matches(line_breaks) == actual.trim_end_matches(line_breaks) {
            TestResult::Pass
        } else {
            TestResult::Fail {
                expected: Some(expected.to_string()),
                actual,
            }
        }
    }

    fn error(actual: String) -> Self {
        TestResult::Fail {
            expected: None,
            actual,
        }
    }
}

/// Directory holding the markup files of one compatibility run. It goes
/// away with the runner.
struct Scratch {
    root: PathBuf,
}

impl Scratch {
    fn create() -> io::Result<Self> {
        static CREATED: AtomicUsize = AtomicUsize::new(0);
        let root = std::env::temp_dir().join(format!(
            "scrollbox-compat-{}-{}",
            std::process::id(),
            CREATED.fetch_add(1, Ordering::Relaxed)
        ));
        fs::create_dir_all(&root)?;
        Ok(Scratch { root })
    }

    /// Writes `test_case`'s table of contents as `<stem>.html`, replacing
    /// the file a previous case with the same name left behind.
    fn write_toc(&self, test_case: &TestCase) -> io::Result<PathBuf> {
        let stem = test_case
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "toc".to_string());
        let path = self.root.join(format!("{}.html", stem));
        fs::write(&path, format!("{}\n", test_case.toc))?;
        Ok(path)
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

pub struct TestRunner {
    runtime_path: PathBuf,
    scratch: Scratch,
}

impl TestRunner {
    pub fn from_path(path: PathBuf) -> io::Result<Self> {
        Ok(TestRunner {
            runtime_path: path,
            scratch: Scratch::create()?,
        })
    }

    pub fn run(&self, test_case: TestCase) -> TestResult {
        let toc_path = match self.scratch.write_toc(&test_case) {
            Ok(path) => path,
            Err(err) => return TestResult::error(format!("Error writing table of contents: {}", err)),
        };

        match self.execute(&toc_path, &test_case.input_string()) {
            Ok(output) => TestResult::compare(&test_case.result, output),
            Err(err) => TestResult::error(format!(
                "Error running {}: {}",
                self.runtime_path.display(),
                err
            )),
        }
    }

    fn execute(&self, toc_path: &Path, input: &str) -> io::Result<String> {
        let output = Command::new(&self.runtime_path)
            .arg("run")
            .arg(toc_path)
            .arg(input)
            .output()?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

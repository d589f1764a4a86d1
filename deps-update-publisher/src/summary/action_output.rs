//! `GITHUB_OUTPUT` and `GITHUB_STEP_SUMMARY` writers.

use super::Outcome;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Appends the step outputs for `outcome` to the `GITHUB_OUTPUT` file.
///
/// Writes `changes` and `outcome` always, and `pull-request-number` / `pull-request-url`
/// when a pull request was opened.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written.
pub fn write_outputs(path: &Path, outcome: &Outcome) -> std::io::Result<()> {
    let mut lines = vec![
        format!("changes={}", outcome.has_changes()),
        format!("outcome={}", outcome.as_str()),
    ];
    if let Outcome::PullRequestCreated { number, url } = outcome {
        lines.push(format!("pull-request-number={number}"));
        lines.push(format!("pull-request-url={url}"));
    }
    append_lines(path, &lines)
}

/// Appends a markdown line describing `outcome` to the step summary file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written.
pub fn write_step_summary(path: &Path, outcome: &Outcome) -> std::io::Result<()> {
    let line = match outcome {
        Outcome::NoChanges => "Dependencies are up to date; no pull request needed.".to_string(),
        Outcome::PullRequestCreated { number, url } => {
            format!("Opened dependency update pull request [#{number}]({url}).")
        }
        Outcome::ChangesDetected { changed_files } => format!(
            "Dry run: dependency update would change {}.",
            changed_files
                .iter()
                .map(|file| format!("`{file}`"))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };
    append_lines(path, &[line])
}

fn append_lines(path: &Path, lines: &[String]) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn writes_pull_request_outputs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("output");
        fs::write(&path, "existing=1\n").unwrap();

        let outcome = Outcome::PullRequestCreated {
            number: 12,
            url: "https://github.com/o/r/pull/12".to_string(),
        };
        write_outputs(&path, &outcome).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "existing=1\nchanges=true\noutcome=pull_request_created\n\
             pull-request-number=12\npull-request-url=https://github.com/o/r/pull/12\n"
        );
    }

    #[test]
    fn writes_no_change_outputs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("output");

        write_outputs(&path, &Outcome::NoChanges).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "changes=false\noutcome=no_changes\n");
    }

    #[test]
    fn summarises_dry_run() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("summary.md");
        let outcome = Outcome::ChangesDetected {
            changed_files: vec!["package-lock.json".to_string()],
        };

        write_step_summary(&path, &outcome).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("would change `package-lock.json`"));
    }
}

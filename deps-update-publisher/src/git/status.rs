//! Porcelain status parsing.

/// Extracts the paths named by `git status --porcelain` output.
///
/// Renames (`R  old -> new`) report the new path.
#[must_use]
pub fn changed_paths(porcelain: &str) -> Vec<String> {
    porcelain
        .lines()
        .filter_map(|line| line.get(3..))
        .map(|path| {
            let path = path.rsplit(" -> ").next().unwrap_or(path);
            path.trim().trim_matches('"').to_string()
        })
        .filter(|path| !path.is_empty())
        .collect()
}

/// Returns the entries of `tracked` that appear in `changed`.
///
/// Porcelain paths are relative to the repository root, so a tracked name also
/// matches a changed path ending in `/<name>`. Falls back to all of `tracked`
/// when nothing matches.
#[must_use]
pub fn select_tracked<'a>(tracked: &[&'a str], changed: &[String]) -> Vec<&'a str> {
    let selected: Vec<&'a str> = tracked
        .iter()
        .copied()
        .filter(|name| {
            changed.iter().any(|path| {
                path == name
                    || path
                        .strip_suffix(name)
                        .is_some_and(|prefix| prefix.ends_with('/'))
            })
        })
        .collect();

    if selected.is_empty() {
        tracked.to_vec()
    } else {
        selected
    }
}

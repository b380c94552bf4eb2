use std::path::{Path, PathBuf};

/**
 * Depfile
 * A single Make/Ninja dependency rule: one generated target and the files
 * it was generated from. Ninja treats spaces as separators, so they are
 * escaped in every path.
 */
#[derive(Debug, Clone)]
pub struct Depfile {
    target: PathBuf,
    generator_inputs: Vec<PathBuf>,
    data_inputs: Vec<PathBuf>,
}

impl Depfile {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Depfile {
            target: target.into(),
            generator_inputs: Vec::new(),
            data_inputs: Vec::new(),
        }
    }

    /// Adds the files that make up the generator itself: the running
    /// executable and any text it splices into its output. Only existing,
    /// absolute file paths are kept.
    pub fn generator_inputs<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for p in paths {
            let p = p.as_ref();
            let p = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
            if p.is_absolute() && p.is_file() {
                self.generator_inputs.push(p);
            }
        }
        self
    }

    /// Adds data files consumed by the run, e.g. embedded YAML files.
    pub fn inputs<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.data_inputs
            .extend(paths.into_iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    pub fn render(&self, buildroot: &str) -> String {
        let mut generator_inputs: Vec<String> = self.generator_inputs.iter().map(|p| path_str(p)).collect();
        generator_inputs.sort();
        generator_inputs.dedup();

        let mut lines = vec![format!("{}:\\", escape_space(&relative_target(&path_str(&self.target), buildroot)))];
        let mut seen: Vec<&str> = Vec::new();
        let data_inputs: Vec<String> = self.data_inputs.iter().map(|p| path_str(p)).collect();
        for input in generator_inputs.iter().chain(data_inputs.iter()) {
            if seen.contains(&input.as_str()) {
                continue;
            }
            seen.push(input);
            lines.push(format!("\t{} \\", escape_space(input)));
        }
        lines.join("\n")
    }
}

fn path_str(p: &Path) -> String {
    p.to_string_lossy().into_owned()
}

pub fn escape_space(s: &str) -> String {
    s.replace(' ', "\\ ")
}

/// Strips `buildroot` from the front of `target`, then one leading separator.
pub fn relative_target(target: &str, buildroot: &str) -> String {
    let root = buildroot.trim_end_matches(&['/', '\\'][..]);
    let stripped = if !root.is_empty() && normalize(target).starts_with(&normalize(root)) {
        &target[root.len()..]
    } else {
        target
    };
    stripped
        .strip_prefix(&['/', '\\'][..])
        .unwrap_or(stripped)
        .to_string()
}

fn normalize(s: &str) -> String {
    let s = s.replace('\\', "/");
    if cfg!(windows) {
        s.to_lowercase()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_target() {
        assert_eq!(relative_target("/b/out/X.h", "/b"), "out/X.h");
        assert_eq!(relative_target("/b/out/X.h", "/b/"), "out/X.h");
        assert_eq!(relative_target("/other/X.h", "/b"), "other/X.h");
        assert_eq!(relative_target("out/X.h", ""), "out/X.h");
    }

    #[test]
    fn test_render_lists_each_input_once_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("gen tool");
        std::fs::write(&tool, "").unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let target = dir.path().join("out dir").join("A.h");

        let text = Depfile::new(&target)
            .generator_inputs([&tool, &tool])
            .generator_inputs([dir.path().join("missing")])
            .inputs(["/y/a b.yaml", "/y/c.yaml", "/y/c.yaml"])
            .render(&root);

        let tool = escape_space(&path_str(&tool.canonicalize().unwrap()));
        let expected = format!("out\\ dir/A.h:\\\n\t{tool} \\\n\t/y/a\\ b.yaml \\\n\t/y/c.yaml \\");
        assert_eq!(text, expected);
    }
}

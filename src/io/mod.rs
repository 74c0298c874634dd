pub mod instance_reader;
pub mod instance_writer;
pub mod solution_reader;

#[cfg(test)]
pub(crate) mod tests {
    use std::path::{Path, PathBuf};

    pub(crate) fn test_instances_directory(name: impl AsRef<Path>) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("testcases")
            .join(name)
    }

    /// Lists all `*.in` files of a testcase directory together with the matching `*.out`
    /// file, if one exists.
    pub(crate) fn test_instances(name: &str) -> Vec<(PathBuf, Option<PathBuf>)> {
        let pattern = test_instances_directory(name).join("*.in");

        let mut result = Vec::new();

        for entry in glob::glob(pattern.to_str().unwrap()).unwrap() {
            let input_path = entry.unwrap();

            let output_path = {
                let output_path = input_path.with_extension("out");
                output_path.exists().then_some(output_path)
            };

            result.push((input_path, output_path));
        }

        assert!(!result.is_empty());

        result
    }
}

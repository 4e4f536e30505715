pub mod command;
pub mod revision_list;

use crate::error::ExportResult;
use std::future::Future;

pub use command::GitCli;
pub use revision_list::{fetch_changed_files, parse_file_list};

/// The two git queries an export needs. Outputs are treated as opaque text.
pub trait GitClient {
    /// Raw stdout of the name-only tree-diff between two revisions
    fn diff_tree(&self, old: &str, young: &str)
        -> impl Future<Output = ExportResult<Vec<u8>>> + Send;

    /// Raw stdout of the unified diff of a single path between two revisions
    fn diff_file(
        &self,
        old: &str,
        young: &str,
        path: &str,
    ) -> impl Future<Output = ExportResult<Vec<u8>>> + Send;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Answers git queries from canned output and records every call.
    #[derive(Default)]
    pub struct ScriptedGit {
        pub tree: Vec<u8>,
        pub diffs: HashMap<String, Vec<u8>>,
        pub fail_on: Option<String>,
        pub calls: Mutex<Vec<String>>,
    }

    impl ScriptedGit {
        pub fn with_tree(tree: &str) -> Self {
            Self {
                tree: tree.as_bytes().to_vec(),
                ..Self::default()
            }
        }

        pub fn diff(mut self, path: &str, text: &str) -> Self {
            self.diffs.insert(path.to_string(), text.as_bytes().to_vec());
            self
        }

        /// The diff query for `path` fails as if git could not be started.
        pub fn fail_on(mut self, path: &str) -> Self {
            self.fail_on = Some(path.to_string());
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl GitClient for ScriptedGit {
        async fn diff_tree(&self, old: &str, young: &str) -> ExportResult<Vec<u8>> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("diff-tree {old} {young}"));
            Ok(self.tree.clone())
        }

        async fn diff_file(&self, old: &str, young: &str, path: &str) -> ExportResult<Vec<u8>> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("diff {old} {young} -- {path}"));
            if self.fail_on.as_deref() == Some(path) {
                return Err(crate::error::ExportError::GitLaunch {
                    program: "git".to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
                });
            }
            Ok(self.diffs.get(path).cloned().unwrap_or_default())
        }
    }
}

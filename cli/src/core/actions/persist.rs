use serde_json::Value;
use thiserror::Error;

use crate::core::{
    actions::resolve::ResolutionResult,
    resources::artifacts::{ArtifactType, PersistedArtifact, SourceStore},
};

/// Writes a resolved source into a [`SourceStore`], one file per address.
///
/// The file name encodes where the source came from:
/// `<address>.sol`, `<address>-sourcify.html` or `<address>-bytecode.txt`.
/// Persisting the same result twice produces the same bytes.
pub struct Persist<S: SourceStore> {
    /// The store to write to
    store: S,
}

#[derive(Error, Debug)]
pub enum PersistError {
    /// Nothing was resolved, so there is nothing to write
    #[error("No source or bytecode found")]
    NoSourceAvailable,
    /// Error related to the store
    #[error("IoError: {0}")]
    IoError(#[from] std::io::Error),
}

impl<S: SourceStore> Persist<S> {
    pub fn new(store: S) -> Self {
        Persist { store }
    }

    pub fn persist(
        &self,
        result: &ResolutionResult,
        address: &str,
    ) -> Result<PersistedArtifact, PersistError> {
        let (file_name, contents, artifact_type) = match result {
            ResolutionResult::Etherscan(source) => (
                format!("{}.sol", address),
                flatten_sources(&source.source),
                ArtifactType::Sol,
            ),
            ResolutionResult::Sourcify { source, .. } => (
                format!("{}-sourcify.html", address),
                source.clone(),
                ArtifactType::Sourcify,
            ),
            ResolutionResult::Onchain { bytecode } => (
                format!("{}-bytecode.txt", address),
                if bytecode.is_empty() {
                    "0x".to_owned()
                } else {
                    bytecode.clone()
                },
                ArtifactType::Bytecode,
            ),
            ResolutionResult::NotFound => return Err(PersistError::NoSourceAvailable),
        };

        let path = self.store.write(&file_name, &contents)?;
        log::info!("Saved {} source to {}", result.found_on(), path);
        Ok(PersistedArtifact {
            path,
            artifact_type,
        })
    }
}

/// Flattens an Etherscan source into a single Solidity text.
///
/// Sources published as a standard JSON document with a `sources` map are
/// concatenated in map order, each file introduced by a
/// `// ===== <filename> =====` marker. Anything else is returned verbatim.
pub fn flatten_sources(raw: &str) -> String {
    if !raw.trim_start().starts_with('{') {
        return raw.to_owned();
    }

    let parsed: Value = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::debug!("Source is not JSON, keeping it verbatim: {}", e);
            return raw.to_owned();
        }
    };

    match parsed.get("sources").and_then(Value::as_object) {
        Some(sources) => sources
            .iter()
            .map(|(file_name, source)| {
                let content = source
                    .get("content")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                format!("// ===== {} =====\n{}\n\n", file_name, content)
            })
            .collect(),
        None => raw.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap, fs};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::{flatten_sources, Persist, PersistError};
    use crate::core::{
        actions::resolve::ResolutionResult,
        resources::{
            artifacts::{ArtifactType, SourceStore},
            etherscan::{GetSourceCodeResponse, SourceCodeResult},
        },
    };
    use crate::resources::artifacts::LocalSourceStore;

    const ADDRESS: &str = "0x7a250d5630b4cf539739df2c5dacb4c659f2488d";

    /// In-memory store that remembers every write
    #[derive(Default)]
    struct MemoryStore {
        files: RefCell<HashMap<String, String>>,
        writes: RefCell<usize>,
    }

    impl SourceStore for MemoryStore {
        fn write(&self, file_name: &str, contents: &str) -> Result<String, std::io::Error> {
            *self.writes.borrow_mut() += 1;
            self.files
                .borrow_mut()
                .insert(file_name.to_owned(), contents.to_owned());
            Ok(format!("/memory/{}", file_name))
        }
    }

    fn etherscan_result(source_code: &str) -> ResolutionResult {
        ResolutionResult::Etherscan(
            SourceCodeResult {
                source_code: source_code.to_owned(),
                ..Default::default()
            }
            .into(),
        )
    }

    fn fixture_source(name: &str) -> String {
        let contents = fs::read_to_string(test_fixture!("resources", name)).unwrap();
        let response: GetSourceCodeResponse = serde_json::from_str(&contents).unwrap();
        response.result[0].source_code.clone()
    }

    #[test]
    fn flattens_standard_json_sources() {
        let raw = r#"{
            "language": "Solidity",
            "sources": {
                "contracts/Token.sol": {"content": "import \"./Base.sol\";\ncontract Token is Base {}"},
                "contracts/Base.sol": {"content": "contract Base {}"}
            }
        }"#;

        assert_eq!(
            flatten_sources(raw),
            "// ===== contracts/Token.sol =====\nimport \"./Base.sol\";\ncontract Token is Base {}\n\n\
             // ===== contracts/Base.sol =====\ncontract Base {}\n\n"
        );
    }

    #[test]
    fn flattens_fixture_with_one_marker_per_file() {
        let raw = fixture_source("getsourcecode_multifile.json");
        let flat = flatten_sources(&raw);

        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let sources = parsed["sources"].as_object().unwrap();
        assert_eq!(flat.matches("// ===== ").count(), sources.len());
        for (file_name, source) in sources {
            let marker = format!(
                "// ===== {} =====\n{}",
                file_name,
                source["content"].as_str().unwrap()
            );
            assert!(flat.contains(&marker), "missing {}", file_name);
        }
    }

    #[test]
    fn keeps_non_json_and_unwrapped_sources_verbatim() {
        let plain = "// SPDX-License-Identifier: MIT\npragma solidity ^0.8.0;";
        assert_eq!(flatten_sources(plain), plain);

        // Etherscan wraps standard JSON in a second pair of braces
        let double_braced = "{{\"sources\": {\"A.sol\": {\"content\": \"contract A {}\"}}}}";
        assert_eq!(flatten_sources(double_braced), double_braced);

        let without_sources = r#"{"A.sol": {"content": "contract A {}"}}"#;
        assert_eq!(flatten_sources(without_sources), without_sources);

        // Only an object of files is flattened
        let listed_sources = r#"{"sources": [{"content": "contract A {}"}]}"#;
        assert_eq!(flatten_sources(listed_sources), listed_sources);
        let null_sources = r#"{"sources": null}"#;
        assert_eq!(flatten_sources(null_sources), null_sources);
    }

    #[test]
    fn persists_each_variant_under_its_own_name() {
        let persist = Persist::new(MemoryStore::default());

        let artifact = persist
            .persist(&etherscan_result("contract A {}"), ADDRESS)
            .unwrap();
        assert_eq!(artifact.artifact_type, ArtifactType::Sol);
        assert_eq!(artifact.path, format!("/memory/{}.sol", ADDRESS));

        let artifact = persist
            .persist(
                &ResolutionResult::Sourcify {
                    source: "<html></html>".to_owned(),
                    raw: "<html></html>".to_owned(),
                },
                ADDRESS,
            )
            .unwrap();
        assert_eq!(artifact.artifact_type, ArtifactType::Sourcify);
        assert_eq!(artifact.path, format!("/memory/{}-sourcify.html", ADDRESS));

        let artifact = persist
            .persist(
                &ResolutionResult::Onchain {
                    bytecode: String::new(),
                },
                ADDRESS,
            )
            .unwrap();
        assert_eq!(artifact.artifact_type, ArtifactType::Bytecode);

        let files = persist.store.files.borrow();
        assert_eq!(files[&format!("{}.sol", ADDRESS)], "contract A {}");
        assert_eq!(files[&format!("{}-sourcify.html", ADDRESS)], "<html></html>");
        assert_eq!(files[&format!("{}-bytecode.txt", ADDRESS)], "0x");
    }

    #[test]
    fn refuses_to_persist_none() {
        let persist = Persist::new(MemoryStore::default());
        let result = persist.persist(&ResolutionResult::NotFound, ADDRESS);
        assert!(matches!(result, Err(PersistError::NoSourceAvailable)));
        assert_eq!(*persist.store.writes.borrow(), 0);
    }

    #[test]
    fn persisting_twice_is_idempotent() {
        let temp_dir = tempdir().unwrap();
        let base = temp_dir.path().join("tmp-sources");
        let persist = Persist::new(LocalSourceStore::new(base.clone()));
        let result = etherscan_result(&fixture_source("getsourcecode_multifile.json"));

        let first = persist.persist(&result, ADDRESS).unwrap();
        let first_contents = fs::read(&first.path).unwrap();
        let second = persist.persist(&result, ADDRESS).unwrap();
        let second_contents = fs::read(&second.path).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_contents, second_contents);
        assert_eq!(fs::read_dir(&base).unwrap().count(), 1);
    }
}

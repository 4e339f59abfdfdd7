use std::io::Read;
use std::path::Path;

use anyhow::Context;
use gridcfg_models::{Cluster, NearCacheConfiguration};
use serde::de::DeserializeOwned;

fn is_json(text: &str) -> bool {
    text.trim_start().starts_with('{')
}

/// Documents starting with `{` are read as JSON, anything else as YAML.
pub fn parse_cluster(text: &str) -> anyhow::Result<Cluster> {
    let cluster = if is_json(text) {
        Cluster::from_json(text)?
    } else {
        Cluster::from_yaml(text)?
    };
    Ok(cluster)
}

fn parse_document<T: DeserializeOwned>(text: &str) -> anyhow::Result<T> {
    if is_json(text) {
        Ok(serde_json::from_str(text)?)
    } else {
        Ok(serde_yaml::from_str(text)?)
    }
}

pub fn load_cluster(input: &clap_stdin::FileOrStdin) -> anyhow::Result<Cluster> {
    let mut text = String::new();
    input
        .clone()
        .into_reader()
        .context("failed to open cluster description")?
        .read_to_string(&mut text)
        .context("failed to read cluster description")?;
    parse_cluster(&text).context("invalid cluster description")
}

pub fn load_near_configuration(path: &Path) -> anyhow::Result<NearCacheConfiguration> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_document(&text)
        .with_context(|| format!("invalid near cache configuration in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_json_and_yaml() {
        let json = parse_cluster(r#" {"name":"grid","caches":[{"name":"a"}]}"#).unwrap();
        let yaml = parse_cluster("name: grid\ncaches:\n  - name: a\n").unwrap();
        assert_eq!(json, yaml);
    }

    #[test]
    fn rejects_invalid_cluster() {
        assert!(parse_cluster(r#"{"caches":[]}"#).is_err());
        assert!(parse_cluster("name: [").is_err());
    }

    #[test]
    fn reads_near_configuration_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("near.yaml");
        std::fs::write(&path, "nearStartSize: 64\n").unwrap();
        let near = load_near_configuration(&path).unwrap();
        assert_eq!(near.near_start_size, Some(64));
    }
}

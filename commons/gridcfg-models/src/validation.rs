use validator::Validate;

use crate::cluster::Cluster;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validator error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl Cluster {
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let cluster: Cluster = serde_json::from_str(text)?;
        cluster.validate()?;
        Ok(cluster)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ModelError> {
        let cluster: Cluster = serde_yaml::from_str(text)?;
        cluster.validate()?;
        Ok(cluster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_cluster_without_name() {
        let err = Cluster::from_json(r#"{"caches":[]}"#).unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
    }

    #[test]
    fn rejects_cluster_name_with_path_separators() {
        for name in ["../x", "a/b", r"a\b", ".."] {
            let json = serde_json::json!({ "name": name }).to_string();
            let err = Cluster::from_json(&json).unwrap_err();
            assert!(matches!(err, ModelError::Validation(_)), "{}", name);
        }
        assert!(Cluster::from_json(r#"{"name":"grid.v2"}"#).is_ok());
    }

    #[test]
    fn rejects_unnamed_cache() {
        let err =
            Cluster::from_json(r#"{"name":"c","caches":[{"cacheMode":"LOCAL"}]}"#)
                .unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
    }

    #[test]
    fn yaml_and_json_produce_same_model() {
        let json = Cluster::from_json(
            r#"{"name":"c","discovery":{"kind":"Vm","Vm":{"addresses":["a:1"]}}}"#,
        )
        .unwrap();
        let yaml = Cluster::from_yaml(
            "name: c\ndiscovery:\n  kind: Vm\n  Vm:\n    addresses: ['a:1']\n",
        )
        .unwrap();
        assert_eq!(json, yaml);
    }
}

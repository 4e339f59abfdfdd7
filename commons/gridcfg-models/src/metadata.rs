use serde::{Deserialize, Serialize};

use crate::java::is_java_builtin_class;

/// Mapping between a cache's key/value types and database columns and
/// query-indexable fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheTypeMetadata {
    pub name: String,
    pub key_type: Option<String>,
    pub value_type: Option<String>,
    pub database_schema: Option<String>,
    pub database_table: Option<String>,
    pub key_fields: Vec<JdbcFieldMapping>,
    pub value_fields: Vec<JdbcFieldMapping>,
    pub query_fields: Vec<QueryField>,
    pub ascending_fields: Vec<QueryField>,
    pub descending_fields: Vec<QueryField>,
    pub text_fields: Vec<String>,
    pub groups: Vec<FieldGroup>,
}

impl CacheTypeMetadata {
    /// Key columns are only mapped for composite (user class) keys.
    pub fn maps_key_fields(&self) -> bool {
        !self.key_type.as_deref().is_some_and(is_java_builtin_class)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JdbcFieldMapping {
    pub database_name: String,
    /// `java.sql.Types` constant name, e.g. `VARCHAR`.
    pub database_type: String,
    pub java_name: String,
    pub java_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryField {
    pub name: String,
    pub class_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldGroup {
    pub name: String,
    pub fields: Vec<GroupField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupField {
    pub name: String,
    pub class_name: String,
    /// `true` for descending order.
    pub direction: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_keys_skip_key_field_mapping() {
        let mut meta = CacheTypeMetadata {
            key_type: Some("java.lang.Long".into()),
            ..Default::default()
        };
        assert!(!meta.maps_key_fields());

        meta.key_type = Some("com.example.PersonKey".into());
        assert!(meta.maps_key_fields());

        meta.key_type = None;
        assert!(meta.maps_key_fields());
    }
}

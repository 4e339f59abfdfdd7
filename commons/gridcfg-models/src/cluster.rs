use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::cache::Cache;
use crate::enums::*;
use crate::events::EventGroup;

/// Fully populated cluster configuration: caches and their type metadata
/// are embedded, not referenced by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct Cluster {
    #[validate(
        length(min = 1, message = "Cluster name cannot be empty"),
        custom(function = "validate_file_name")
    )]
    pub name: String,
    pub discovery: Option<Discovery>,
    pub atomic_configuration: Option<AtomicConfiguration>,
    pub transaction_configuration: Option<TransactionConfiguration>,
    pub marshaller: Option<Marshaller>,
    pub swap_space_spi: Option<SwapSpaceSpi>,

    pub network_timeout: Option<i64>,
    pub network_send_retry_delay: Option<i64>,
    pub network_send_retry_count: Option<i64>,
    pub segment_check_frequency: Option<i64>,
    pub wait_for_segment_on_start: Option<bool>,
    pub discovery_startup_delay: Option<i64>,

    pub deployment_mode: Option<DeploymentMode>,
    pub include_event_types: Vec<EventGroup>,

    pub marshal_local_jobs: Option<bool>,
    pub marshaller_cache_keep_alive_time: Option<i64>,
    pub marshaller_cache_thread_pool_size: Option<i64>,

    pub metrics_expire_time: Option<i64>,
    pub metrics_history_size: Option<i64>,
    pub metrics_log_frequency: Option<i64>,
    pub metrics_update_frequency: Option<i64>,

    pub peer_class_loading_enabled: Option<bool>,
    pub peer_class_loading_missed_resources_cache_size: Option<i64>,
    pub peer_class_loading_thread_pool_size: Option<i64>,
    #[serde(deserialize_with = "string_or_list")]
    pub peer_class_loading_local_class_path_exclude: Vec<String>,

    pub clock_sync_samples: Option<i64>,
    pub clock_sync_frequency: Option<i64>,
    pub time_server_port_base: Option<i64>,
    pub time_server_port_range: Option<i64>,

    pub public_thread_pool_size: Option<i64>,
    pub system_thread_pool_size: Option<i64>,
    pub management_thread_pool_size: Option<i64>,
    pub igfs_thread_pool_size: Option<i64>,

    #[validate(nested)]
    pub caches: Vec<Cache>,
}

/// `true` when `name` can be used as a single path component. The cluster
/// name ends up in artifact and bundle file names.
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

fn validate_file_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() || is_plain_file_name(name) {
        return Ok(());
    }
    Err(ValidationError::new("file_name")
        .with_message("Cluster name cannot contain path separators".into()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Discovery {
    pub kind: Option<DiscoveryKind>,
    #[serde(rename = "Vm")]
    pub vm: Option<VmIpFinder>,
    #[serde(rename = "Multicast")]
    pub multicast: Option<MulticastIpFinder>,
    #[serde(rename = "S3")]
    pub s3: Option<S3IpFinder>,
    #[serde(rename = "Cloud")]
    pub cloud: Option<CloudIpFinder>,
    #[serde(rename = "GoogleStorage")]
    pub google_storage: Option<GoogleStorageIpFinder>,
    #[serde(rename = "Jdbc")]
    pub jdbc: Option<JdbcIpFinder>,
    #[serde(rename = "SharedFs")]
    pub shared_fs: Option<SharedFsIpFinder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmIpFinder {
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MulticastIpFinder {
    pub multicast_group: Option<String>,
    pub multicast_port: Option<i64>,
    pub response_wait_time: Option<i64>,
    pub address_request_attempts: Option<i64>,
    pub local_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct S3IpFinder {
    pub bucket_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloudIpFinder {
    pub credential: Option<String>,
    pub credential_path: Option<String>,
    pub identity: Option<String>,
    pub provider: Option<String>,
    pub regions: Vec<String>,
    pub zones: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoogleStorageIpFinder {
    pub project_name: Option<String>,
    pub bucket_name: Option<String>,
    pub service_account_p12_file_path: Option<String>,
    pub service_account_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JdbcIpFinder {
    pub init_schema: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedFsIpFinder {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AtomicConfiguration {
    pub backups: Option<i64>,
    pub cache_mode: Option<CacheMode>,
    pub atomic_sequence_reserve_size: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionConfiguration {
    pub default_tx_concurrency: Option<TransactionConcurrency>,
    pub transaction_isolation: Option<TransactionIsolation>,
    pub default_tx_timeout: Option<i64>,
    pub pessimistic_tx_log_linger: Option<i64>,
    pub pessimistic_tx_log_size: Option<i64>,
    pub tx_serializable_enabled: Option<bool>,
    pub tx_manager_lookup_class_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Marshaller {
    pub kind: Option<MarshallerKind>,
    #[serde(rename = "OptimizedMarshaller")]
    pub optimized: Option<OptimizedMarshaller>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptimizedMarshaller {
    pub pool_size: Option<i64>,
    pub require_serializable: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapSpaceSpi {
    pub kind: Option<SwapSpaceKind>,
    #[serde(rename = "FileSwapSpaceSpi")]
    pub file: Option<FileSwapSpaceSpi>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileSwapSpaceSpi {
    pub base_directory: Option<String>,
    pub read_stripes_number: Option<i64>,
    pub maximum_sparsity: Option<f64>,
    pub max_write_queue_size: Option<i64>,
    pub write_buffer_size: Option<i64>,
}

/// Older documents store the exclude list as one comma separated string.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Raw::Many(items)) => items,
        Some(Raw::One(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

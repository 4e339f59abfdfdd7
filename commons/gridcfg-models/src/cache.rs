use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::enums::*;
use crate::metadata::CacheTypeMetadata;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct Cache {
    #[validate(length(min = 1, message = "Cache name cannot be empty"))]
    pub name: String,
    pub cache_mode: Option<CacheMode>,
    pub atomicity_mode: Option<CacheAtomicityMode>,
    pub backups: Option<i64>,
    pub read_from_backup: Option<bool>,
    pub copy_on_read: Option<bool>,
    pub invalidate: Option<bool>,

    pub memory_mode: Option<CacheMemoryMode>,
    pub off_heap_max_memory: Option<i64>,
    pub eviction_policy: Option<EvictionPolicy>,
    pub swap_enabled: Option<bool>,
    pub start_size: Option<i64>,

    pub sql_onheap_row_cache_size: Option<i64>,
    pub long_query_warning_timeout: Option<i64>,
    pub indexed_types: Vec<IndexedType>,
    pub sql_function_classes: Vec<String>,
    pub sql_escape_all: Option<bool>,

    pub cache_store_factory: Option<CacheStoreFactory>,
    pub load_previous_value: Option<bool>,
    pub read_through: Option<bool>,
    pub write_through: Option<bool>,

    pub write_behind_enabled: Option<bool>,
    pub write_behind_batch_size: Option<i64>,
    pub write_behind_flush_size: Option<i64>,
    pub write_behind_flush_frequency: Option<i64>,
    pub write_behind_flush_thread_count: Option<i64>,

    pub max_concurrent_async_operations: Option<i64>,
    pub default_lock_timeout: Option<i64>,
    pub atomic_write_order_mode: Option<CacheAtomicWriteOrderMode>,

    pub rebalance_mode: Option<CacheRebalanceMode>,
    pub rebalance_thread_pool_size: Option<i64>,
    pub rebalance_batch_size: Option<i64>,
    pub rebalance_order: Option<i64>,
    pub rebalance_delay: Option<i64>,
    pub rebalance_timeout: Option<i64>,
    pub rebalance_throttle: Option<i64>,

    pub near_cache_enabled: Option<bool>,
    pub near_configuration: Option<NearCacheConfiguration>,

    pub statistics_enabled: Option<bool>,
    pub management_enabled: Option<bool>,

    pub query_metadata: Vec<CacheTypeMetadata>,
    pub store_metadata: Vec<CacheTypeMetadata>,
}

impl Cache {
    pub fn is_partitioned(&self) -> bool {
        self.cache_mode == Some(CacheMode::Partitioned)
    }

    /// Rebalancing only applies to distributed modes. An unset mode counts
    /// as distributed, the server default being PARTITIONED.
    pub fn is_local(&self) -> bool {
        self.cache_mode == Some(CacheMode::Local)
    }

    pub fn near_cache_active(&self) -> bool {
        self.near_cache_enabled == Some(true) && self.is_partitioned()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndexedType {
    pub key_class: String,
    pub value_class: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvictionPolicy {
    pub kind: Option<EvictionKind>,
    #[serde(rename = "LRU")]
    pub lru: Option<EvictionLimits>,
    #[serde(rename = "RND")]
    pub random: Option<RandomEvictionLimits>,
    #[serde(rename = "FIFO")]
    pub fifo: Option<EvictionLimits>,
    #[serde(rename = "SORTED")]
    pub sorted: Option<EvictionLimits>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvictionLimits {
    pub batch_size: Option<i64>,
    pub max_memory_size: Option<i64>,
    pub max_size: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RandomEvictionLimits {
    pub max_size: Option<i64>,
}

/// Near cache settings. Also used on its own as the client near-cache
/// configuration when rendering client artifacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NearCacheConfiguration {
    pub near_start_size: Option<i64>,
    pub near_eviction_policy: Option<EvictionPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheStoreFactory {
    pub kind: Option<StoreFactoryKind>,
    #[serde(rename = "CacheJdbcPojoStoreFactory")]
    pub jdbc_pojo: Option<JdbcPojoStoreFactory>,
    #[serde(rename = "CacheJdbcBlobStoreFactory")]
    pub jdbc_blob: Option<JdbcBlobStoreFactory>,
    #[serde(rename = "CacheHibernateBlobStoreFactory")]
    pub hibernate_blob: Option<HibernateBlobStoreFactory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JdbcPojoStoreFactory {
    pub data_source_bean: Option<String>,
    pub dialect: Option<JdbcDialect>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JdbcBlobStoreFactory {
    pub user: Option<String>,
    pub data_source_bean: Option<String>,
    pub init_schema: Option<bool>,
    pub create_table_query: Option<String>,
    pub load_query: Option<String>,
    pub insert_query: Option<String>,
    pub update_query: Option<String>,
    pub delete_query: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HibernateBlobStoreFactory {
    /// `key=value` lines.
    pub hibernate_properties: Vec<String>,
}

/// External datasource a store factory points at. Only POJO stores carry a
/// dialect, so only they need a datasource bean declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceRef {
    pub bean_id: String,
    pub dialect: JdbcDialect,
}

impl CacheStoreFactory {
    pub fn data_source(&self) -> Option<DataSourceRef> {
        match self.kind {
            Some(StoreFactoryKind::JdbcPojo) => {
                let pojo = self.jdbc_pojo.as_ref()?;
                let bean_id = pojo
                    .data_source_bean
                    .as_deref()
                    .filter(|s| !s.trim().is_empty())?;
                Some(DataSourceRef {
                    bean_id: bean_id.to_string(),
                    dialect: pojo.dialect?,
                })
            }
            _ => None,
        }
    }
}

use chrono::{DateTime, Utc};
use gridcfg_models::*;

use crate::GenerateError;

pub const BANNER: &str = "This configuration was generated by gridcfg";

/// Banner line shared by every artifact, optionally stamped with the
/// generation time.
pub fn main_comment(generated_at: Option<DateTime<Utc>>) -> String {
    match generated_at {
        Some(at) => format!("{} ({})", BANNER, at.format("%Y-%m-%d %H:%M:%S")),
        None => BANNER.to_string(),
    }
}

/// Builds a Java identifier: `prefix` followed by `name` with runs of
/// illegal characters collapsed to `_` and the first letter capitalized.
pub fn to_java_name(prefix: &str, name: &str) -> String {
    let mut java = String::with_capacity(name.len());
    let mut in_gap = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            java.push(c);
            in_gap = false;
        } else if !in_gap {
            java.push('_');
            in_gap = true;
        }
    }

    let mut chars = java.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", prefix, first.to_ascii_uppercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}

pub fn setter_name(property: &str) -> String {
    to_java_name("set", property)
}

/// A single property value taken from the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Str(&'a str),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Java enum constant, rendered as `Class.CONSTANT` in Java and as the
    /// bare constant in XML.
    Enum {
        class: &'static str,
        constant: &'static str,
    },
    List(&'a [String]),
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Str(s)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value<'_> {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value<'_> {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! java_enum_value {
    ($($ty:ty => $class:literal),+ $(,)?) => {
        $(
            impl From<$ty> for Value<'_> {
                fn from(v: $ty) -> Self {
                    Value::Enum { class: $class, constant: v.as_str() }
                }
            }
        )+
    };
}

java_enum_value! {
    CacheMode => "org.apache.ignite.cache.CacheMode",
    CacheAtomicityMode => "org.apache.ignite.cache.CacheAtomicityMode",
    CacheMemoryMode => "org.apache.ignite.cache.CacheMemoryMode",
    CacheRebalanceMode => "org.apache.ignite.cache.CacheRebalanceMode",
    CacheAtomicWriteOrderMode => "org.apache.ignite.cache.CacheAtomicWriteOrderMode",
    DeploymentMode => "org.apache.ignite.configuration.DeploymentMode",
    TransactionConcurrency => "org.apache.ignite.transactions.TransactionConcurrency",
    TransactionIsolation => "org.apache.ignite.transactions.TransactionIsolation",
}

/// Blank strings are treated like missing ones.
pub fn text(s: &Option<String>) -> Option<Value<'_>> {
    s.as_deref().filter(|s| !s.trim().is_empty()).map(Value::Str)
}

pub fn list(items: &[String]) -> Option<Value<'_>> {
    (!items.is_empty()).then_some(Value::List(items))
}

pub fn value<'a, T: Into<Value<'a>>>(v: Option<T>) -> Option<Value<'a>> {
    v.map(Into::into)
}

/// How a descriptor field is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Scalar. Enum constants and floats carry their Java typing in the
    /// `Value` itself.
    Plain,
    List,
    /// Class literal in Java, fully qualified name in XML.
    ClassName,
    /// `key=value` lines turned into a `java.util.Properties`.
    PropertiesAsList { var: &'static str },
    /// The value is a class name; a no-arg instance of it is assigned.
    Instance,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    /// Property name to use when it differs from the model field.
    pub setter: Option<&'static str>,
    pub format: FieldFormat,
}

impl FieldDescriptor {
    pub fn property(&self) -> &'static str {
        self.setter.unwrap_or(self.name)
    }
}

/// Class and property layout of a nested bean.
#[derive(Debug)]
pub struct BeanDescriptor {
    pub class_name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl BeanDescriptor {
    pub fn has_any(&self, bean: &dyn BeanSource) -> bool {
        self.fields.iter().any(|f| bean.field(f.name).is_some())
    }
}

/// Model object readable by field name.
pub trait BeanSource {
    fn field(&self, name: &str) -> Option<Value<'_>>;
}

const fn plain(name: &'static str) -> FieldDescriptor {
    FieldDescriptor { name, setter: None, format: FieldFormat::Plain }
}

const fn with_format(name: &'static str, format: FieldFormat) -> FieldDescriptor {
    FieldDescriptor { name, setter: None, format }
}

pub const TCP_DISCOVERY_SPI: &str = "org.apache.ignite.spi.discovery.tcp.TcpDiscoverySpi";
pub const IGNITE_CONFIGURATION: &str = "org.apache.ignite.configuration.IgniteConfiguration";
pub const CACHE_CONFIGURATION: &str = "org.apache.ignite.configuration.CacheConfiguration";
pub const NEAR_CACHE_CONFIGURATION: &str =
    "org.apache.ignite.configuration.NearCacheConfiguration";
pub const CACHE_TYPE_METADATA: &str = "org.apache.ignite.cache.CacheTypeMetadata";
pub const CACHE_TYPE_FIELD_METADATA: &str = "org.apache.ignite.cache.CacheTypeFieldMetadata";
pub const IGNITE_BI_TUPLE: &str = "org.apache.ignite.lang.IgniteBiTuple";
pub const EVENT_TYPE: &str = "org.apache.ignite.events.EventType";
pub const PLACEHOLDER_CONFIGURER: &str =
    "org.springframework.beans.factory.config.PropertyPlaceholderConfigurer";

pub static VM_IP_FINDER: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.spi.discovery.tcp.ipfinder.vm.TcpDiscoveryVmIpFinder",
    fields: &[with_format("addresses", FieldFormat::List)],
};

pub static MULTICAST_IP_FINDER: BeanDescriptor = BeanDescriptor {
    class_name:
        "org.apache.ignite.spi.discovery.tcp.ipfinder.multicast.TcpDiscoveryMulticastIpFinder",
    fields: &[
        plain("multicastGroup"),
        plain("multicastPort"),
        plain("responseWaitTime"),
        plain("addressRequestAttempts"),
        plain("localAddress"),
    ],
};

pub static S3_IP_FINDER: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.spi.discovery.tcp.ipfinder.s3.TcpDiscoveryS3IpFinder",
    fields: &[plain("bucketName")],
};

pub static CLOUD_IP_FINDER: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.spi.discovery.tcp.ipfinder.cloud.TcpDiscoveryCloudIpFinder",
    fields: &[
        plain("credential"),
        plain("credentialPath"),
        plain("identity"),
        plain("provider"),
        with_format("regions", FieldFormat::List),
        with_format("zones", FieldFormat::List),
    ],
};

pub static GOOGLE_STORAGE_IP_FINDER: BeanDescriptor = BeanDescriptor {
    class_name:
        "org.apache.ignite.spi.discovery.tcp.ipfinder.gce.TcpDiscoveryGoogleStorageIpFinder",
    fields: &[
        plain("projectName"),
        plain("bucketName"),
        plain("serviceAccountP12FilePath"),
        plain("serviceAccountId"),
    ],
};

pub static JDBC_IP_FINDER: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.spi.discovery.tcp.ipfinder.jdbc.TcpDiscoveryJdbcIpFinder",
    fields: &[plain("initSchema")],
};

pub static SHARED_FS_IP_FINDER: BeanDescriptor = BeanDescriptor {
    class_name:
        "org.apache.ignite.spi.discovery.tcp.ipfinder.sharedfs.TcpDiscoverySharedFsIpFinder",
    fields: &[plain("path")],
};

const EVICTION_LIMITS: &[FieldDescriptor] =
    &[plain("batchSize"), plain("maxMemorySize"), plain("maxSize")];

pub static LRU_EVICTION: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.cache.eviction.lru.LruEvictionPolicy",
    fields: EVICTION_LIMITS,
};

pub static RANDOM_EVICTION: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.cache.eviction.random.RandomEvictionPolicy",
    fields: &[plain("maxSize")],
};

pub static FIFO_EVICTION: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.cache.eviction.fifo.FifoEvictionPolicy",
    fields: EVICTION_LIMITS,
};

pub static SORTED_EVICTION: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.cache.eviction.sorted.SortedEvictionPolicy",
    fields: EVICTION_LIMITS,
};

pub static OPTIMIZED_MARSHALLER: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.marshaller.optimized.OptimizedMarshaller",
    fields: &[plain("poolSize"), plain("requireSerializable")],
};

pub static JDK_MARSHALLER: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.marshaller.jdk.JdkMarshaller",
    fields: &[],
};

pub static JDBC_POJO_STORE: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.cache.store.jdbc.CacheJdbcPojoStoreFactory",
    fields: &[
        plain("dataSourceBean"),
        with_format("dialect", FieldFormat::Instance),
    ],
};

pub static JDBC_BLOB_STORE: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.cache.store.jdbc.CacheJdbcBlobStoreFactory",
    fields: &[
        plain("user"),
        plain("dataSourceBean"),
        plain("initSchema"),
        plain("createTableQuery"),
        plain("loadQuery"),
        plain("insertQuery"),
        plain("updateQuery"),
        plain("deleteQuery"),
    ],
};

pub static HIBERNATE_BLOB_STORE: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.cache.store.hibernate.CacheHibernateBlobStoreFactory",
    fields: &[with_format(
        "hibernateProperties",
        FieldFormat::PropertiesAsList { var: "props" },
    )],
};

pub static ATOMIC_CONFIGURATION: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.configuration.AtomicConfiguration",
    fields: &[
        plain("backups"),
        plain("cacheMode"),
        plain("atomicSequenceReserveSize"),
    ],
};

pub static FILE_SWAP_SPACE_SPI: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.spi.swapspace.file.FileSwapSpaceSpi",
    fields: &[
        plain("baseDirectory"),
        plain("readStripesNumber"),
        plain("maximumSparsity"),
        plain("maxWriteQueueSize"),
        plain("writeBufferSize"),
    ],
};

pub static TRANSACTION_CONFIGURATION: BeanDescriptor = BeanDescriptor {
    class_name: "org.apache.ignite.configuration.TransactionConfiguration",
    fields: &[
        plain("defaultTxConcurrency"),
        FieldDescriptor {
            name: "transactionIsolation",
            setter: Some("defaultTxIsolation"),
            format: FieldFormat::Plain,
        },
        plain("defaultTxTimeout"),
        plain("pessimisticTxLogLinger"),
        plain("pessimisticTxLogSize"),
        plain("txSerializableEnabled"),
        plain("txManagerLookupClassName"),
    ],
};

/// Model object of the selected kind together with its bean layout. The
/// object is `None` when the kind has no settings of its own.
pub type Selected<'a> = (Option<&'a dyn BeanSource>, &'static BeanDescriptor);

/// Source and descriptor of the selected IP finder. `None` when discovery
/// has no kind.
pub fn ip_finder(
    discovery: &Discovery,
) -> Result<Option<Selected<'_>>, GenerateError> {
    let Some(kind) = &discovery.kind else {
        return Ok(None);
    };
    let found: Selected<'_> = match kind {
        DiscoveryKind::Vm => (as_source(&discovery.vm), &VM_IP_FINDER),
        DiscoveryKind::Multicast => (as_source(&discovery.multicast), &MULTICAST_IP_FINDER),
        DiscoveryKind::S3 => (as_source(&discovery.s3), &S3_IP_FINDER),
        DiscoveryKind::Cloud => (as_source(&discovery.cloud), &CLOUD_IP_FINDER),
        DiscoveryKind::GoogleStorage => {
            (as_source(&discovery.google_storage), &GOOGLE_STORAGE_IP_FINDER)
        }
        DiscoveryKind::Jdbc => (as_source(&discovery.jdbc), &JDBC_IP_FINDER),
        DiscoveryKind::SharedFs => (as_source(&discovery.shared_fs), &SHARED_FS_IP_FINDER),
        DiscoveryKind::Unknown(other) => {
            return Err(GenerateError::unknown_kind("discovery", other));
        }
    };
    Ok(Some(found))
}

pub fn eviction(
    policy: &EvictionPolicy,
) -> Result<Option<Selected<'_>>, GenerateError> {
    let Some(kind) = &policy.kind else {
        return Ok(None);
    };
    let found: Selected<'_> = match kind {
        EvictionKind::Lru => (as_source(&policy.lru), &LRU_EVICTION),
        EvictionKind::Random => (as_source(&policy.random), &RANDOM_EVICTION),
        EvictionKind::Fifo => (as_source(&policy.fifo), &FIFO_EVICTION),
        EvictionKind::Sorted => (as_source(&policy.sorted), &SORTED_EVICTION),
        EvictionKind::Unknown(other) => {
            return Err(GenerateError::unknown_kind("eviction policy", other));
        }
    };
    Ok(Some(found))
}

pub fn marshaller(
    marshaller: &Marshaller,
) -> Result<Option<Selected<'_>>, GenerateError> {
    let Some(kind) = &marshaller.kind else {
        return Ok(None);
    };
    match kind {
        MarshallerKind::Optimized => {
            Ok(Some((as_source(&marshaller.optimized), &OPTIMIZED_MARSHALLER)))
        }
        MarshallerKind::Jdk => Ok(Some((None, &JDK_MARSHALLER))),
        MarshallerKind::Unknown(other) => {
            Err(GenerateError::unknown_kind("marshaller", other))
        }
    }
}

pub fn swap_space(
    swap: &SwapSpaceSpi,
) -> Result<Option<Selected<'_>>, GenerateError> {
    let Some(kind) = &swap.kind else {
        return Ok(None);
    };
    match kind {
        SwapSpaceKind::File => Ok(Some((as_source(&swap.file), &FILE_SWAP_SPACE_SPI))),
        SwapSpaceKind::Unknown(other) => {
            Err(GenerateError::unknown_kind("swap space SPI", other))
        }
    }
}

pub fn store_factory(
    factory: &CacheStoreFactory,
) -> Result<Option<Selected<'_>>, GenerateError> {
    let Some(kind) = &factory.kind else {
        return Ok(None);
    };
    let found: Selected<'_> = match kind {
        StoreFactoryKind::JdbcPojo => (as_source(&factory.jdbc_pojo), &JDBC_POJO_STORE),
        StoreFactoryKind::JdbcBlob => (as_source(&factory.jdbc_blob), &JDBC_BLOB_STORE),
        StoreFactoryKind::HibernateBlob => {
            (as_source(&factory.hibernate_blob), &HIBERNATE_BLOB_STORE)
        }
        StoreFactoryKind::Unknown(other) => {
            return Err(GenerateError::unknown_kind("cache store factory", other));
        }
    };
    Ok(Some(found))
}

pub fn as_source<T: BeanSource>(bean: &Option<T>) -> Option<&dyn BeanSource> {
    bean.as_ref().map(|b| b as &dyn BeanSource)
}

/// Distinct datasources referenced by the cluster's caches, in cache order.
pub fn cluster_datasources(cluster: &Cluster) -> Vec<DataSourceRef> {
    let mut found: Vec<DataSourceRef> = Vec::new();
    for ds in cluster
        .caches
        .iter()
        .filter_map(|c| c.cache_store_factory.as_ref())
        .filter_map(CacheStoreFactory::data_source)
    {
        if !found.iter().any(|d| d.bean_id == ds.bean_id) {
            found.push(ds);
        }
    }
    found
}

/// Query metadata first, then store metadata, keeping the first entry of
/// each name.
pub fn distinct_metadata(cache: &Cache) -> Vec<&CacheTypeMetadata> {
    let mut seen: Vec<&str> = Vec::new();
    let mut out = Vec::new();
    for meta in cache.query_metadata.iter().chain(cache.store_metadata.iter()) {
        if !seen.contains(&meta.name.as_str()) {
            seen.push(&meta.name);
            out.push(meta);
        }
    }
    out
}

impl BeanSource for VmIpFinder {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "addresses" => list(&self.addresses),
            _ => None,
        }
    }
}

impl BeanSource for MulticastIpFinder {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "multicastGroup" => text(&self.multicast_group),
            "multicastPort" => value(self.multicast_port),
            "responseWaitTime" => value(self.response_wait_time),
            "addressRequestAttempts" => value(self.address_request_attempts),
            "localAddress" => text(&self.local_address),
            _ => None,
        }
    }
}

impl BeanSource for S3IpFinder {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "bucketName" => text(&self.bucket_name),
            _ => None,
        }
    }
}

impl BeanSource for CloudIpFinder {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "credential" => text(&self.credential),
            "credentialPath" => text(&self.credential_path),
            "identity" => text(&self.identity),
            "provider" => text(&self.provider),
            "regions" => list(&self.regions),
            "zones" => list(&self.zones),
            _ => None,
        }
    }
}

impl BeanSource for GoogleStorageIpFinder {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "projectName" => text(&self.project_name),
            "bucketName" => text(&self.bucket_name),
            "serviceAccountP12FilePath" => text(&self.service_account_p12_file_path),
            "serviceAccountId" => text(&self.service_account_id),
            _ => None,
        }
    }
}

impl BeanSource for JdbcIpFinder {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "initSchema" => value(self.init_schema),
            _ => None,
        }
    }
}

impl BeanSource for SharedFsIpFinder {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "path" => text(&self.path),
            _ => None,
        }
    }
}

impl BeanSource for EvictionLimits {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "batchSize" => value(self.batch_size),
            "maxMemorySize" => value(self.max_memory_size),
            "maxSize" => value(self.max_size),
            _ => None,
        }
    }
}

impl BeanSource for RandomEvictionLimits {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "maxSize" => value(self.max_size),
            _ => None,
        }
    }
}

impl BeanSource for OptimizedMarshaller {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "poolSize" => value(self.pool_size),
            "requireSerializable" => value(self.require_serializable),
            _ => None,
        }
    }
}

impl BeanSource for JdbcPojoStoreFactory {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "dataSourceBean" => text(&self.data_source_bean),
            "dialect" => self.dialect.map(|d| Value::Str(d.dialect_class())),
            _ => None,
        }
    }
}

impl BeanSource for JdbcBlobStoreFactory {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "user" => text(&self.user),
            "dataSourceBean" => text(&self.data_source_bean),
            "initSchema" => value(self.init_schema),
            "createTableQuery" => text(&self.create_table_query),
            "loadQuery" => text(&self.load_query),
            "insertQuery" => text(&self.insert_query),
            "updateQuery" => text(&self.update_query),
            "deleteQuery" => text(&self.delete_query),
            _ => None,
        }
    }
}

impl BeanSource for HibernateBlobStoreFactory {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "hibernateProperties" => list(&self.hibernate_properties),
            _ => None,
        }
    }
}

impl BeanSource for AtomicConfiguration {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "backups" => value(self.backups),
            "cacheMode" => value(self.cache_mode),
            "atomicSequenceReserveSize" => value(self.atomic_sequence_reserve_size),
            _ => None,
        }
    }
}

impl BeanSource for FileSwapSpaceSpi {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "baseDirectory" => text(&self.base_directory),
            "readStripesNumber" => value(self.read_stripes_number),
            "maximumSparsity" => value(self.maximum_sparsity),
            "maxWriteQueueSize" => value(self.max_write_queue_size),
            "writeBufferSize" => value(self.write_buffer_size),
            _ => None,
        }
    }
}

impl BeanSource for TransactionConfiguration {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "defaultTxConcurrency" => value(self.default_tx_concurrency),
            "transactionIsolation" => value(self.transaction_isolation),
            "defaultTxTimeout" => value(self.default_tx_timeout),
            "pessimisticTxLogLinger" => value(self.pessimistic_tx_log_linger),
            "pessimisticTxLogSize" => value(self.pessimistic_tx_log_size),
            "txSerializableEnabled" => value(self.tx_serializable_enabled),
            "txManagerLookupClassName" => text(&self.tx_manager_lookup_class_name),
            _ => None,
        }
    }
}

/// Splits a `key=value` line at the first `=`. Lines without one are
/// dropped by the callers.
pub fn split_property(line: &str) -> Option<(&str, &str)> {
    line.split_once('=')
}

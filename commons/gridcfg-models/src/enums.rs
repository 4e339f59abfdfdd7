use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed enumeration persisted as its upper-case Java constant name.
macro_rules! value_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Open discriminator of a kind-tagged object. Unrecognized tags are kept
/// as `Unknown` so the generator can reject them explicitly.
macro_rules! kind_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal $(| $alias:literal)*),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Unknown(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Unknown(other) => other.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($text $(| $alias)* => Self::$variant,)+
                    _ => Self::Unknown(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(kind: $name) -> Self {
                kind.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

kind_enum!(
    /// Cluster membership mechanism.
    DiscoveryKind {
        Vm => "Vm",
        Multicast => "Multicast",
        S3 => "S3",
        Cloud => "Cloud",
        GoogleStorage => "GoogleStorage",
        Jdbc => "Jdbc",
        SharedFs => "SharedFs",
    }
);

kind_enum!(
    EvictionKind {
        Lru => "LRU",
        Random => "RND",
        Fifo => "FIFO",
        Sorted => "SORTED" | "Sorted",
    }
);

kind_enum!(
    StoreFactoryKind {
        JdbcPojo => "CacheJdbcPojoStoreFactory",
        JdbcBlob => "CacheJdbcBlobStoreFactory",
        HibernateBlob => "CacheHibernateBlobStoreFactory",
    }
);

kind_enum!(
    MarshallerKind {
        Optimized => "OptimizedMarshaller",
        Jdk => "JdkMarshaller",
    }
);

kind_enum!(
    SwapSpaceKind {
        File => "FileSwapSpaceSpi",
    }
);

value_enum!(
    CacheMode {
        Partitioned => "PARTITIONED",
        Replicated => "REPLICATED",
        Local => "LOCAL",
    }
);

value_enum!(
    CacheAtomicityMode {
        Atomic => "ATOMIC",
        Transactional => "TRANSACTIONAL",
    }
);

value_enum!(
    CacheMemoryMode {
        OnheapTiered => "ONHEAP_TIERED",
        OffheapTiered => "OFFHEAP_TIERED",
        OffheapValues => "OFFHEAP_VALUES",
    }
);

value_enum!(
    CacheRebalanceMode {
        Sync => "SYNC",
        Async => "ASYNC",
        None => "NONE",
    }
);

value_enum!(
    CacheAtomicWriteOrderMode {
        Clock => "CLOCK",
        Primary => "PRIMARY",
    }
);

value_enum!(
    DeploymentMode {
        Private => "PRIVATE",
        Isolated => "ISOLATED",
        Shared => "SHARED",
        Continuous => "CONTINUOUS",
    }
);

value_enum!(
    TransactionConcurrency {
        Optimistic => "OPTIMISTIC",
        Pessimistic => "PESSIMISTIC",
    }
);

value_enum!(
    TransactionIsolation {
        ReadCommitted => "READ_COMMITTED",
        RepeatableRead => "REPEATABLE_READ",
        Serializable => "SERIALIZABLE",
    }
);

/// SQL dialect of a JDBC POJO store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JdbcDialect {
    Oracle,
    #[serde(rename = "DB2")]
    Db2,
    #[serde(rename = "SQLServer")]
    SqlServer,
    #[serde(rename = "MySQL")]
    MySql,
    #[serde(rename = "PostgreSQL", alias = "PosgreSQL")]
    PostgreSql,
    H2,
}

impl JdbcDialect {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Oracle => "Oracle",
            Self::Db2 => "DB2",
            Self::SqlServer => "SQLServer",
            Self::MySql => "MySQL",
            Self::PostgreSql => "PostgreSQL",
            Self::H2 => "H2",
        }
    }

    pub const fn dialect_class(&self) -> &'static str {
        match self {
            Self::Oracle => "org.apache.ignite.cache.store.jdbc.dialect.OracleDialect",
            Self::Db2 => "org.apache.ignite.cache.store.jdbc.dialect.DB2Dialect",
            Self::SqlServer => {
                "org.apache.ignite.cache.store.jdbc.dialect.SQLServerDialect"
            }
            Self::MySql => "org.apache.ignite.cache.store.jdbc.dialect.MySQLDialect",
            Self::PostgreSql => {
                "org.apache.ignite.cache.store.jdbc.dialect.BasicJdbcDialect"
            }
            Self::H2 => "org.apache.ignite.cache.store.jdbc.dialect.H2Dialect",
        }
    }

    pub const fn data_source_class(&self) -> &'static str {
        match self {
            Self::Oracle => "oracle.jdbc.pool.OracleDataSource",
            Self::Db2 => "com.ibm.db2.jcc.DB2ConnectionPoolDataSource",
            Self::SqlServer => "com.microsoft.sqlserver.jdbc.SQLServerDataSource",
            Self::MySql => "com.mysql.jdbc.jdbc2.optional.MysqlDataSource",
            Self::PostgreSql => "org.postgresql.ds.PGPoolingDataSource",
            Self::H2 => "org.h2.jdbcx.JdbcDataSource",
        }
    }
}

impl fmt::Display for JdbcDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_known_and_unknown_tags() {
        let kind: DiscoveryKind = serde_json::from_str("\"Vm\"").unwrap();
        assert_eq!(kind, DiscoveryKind::Vm);

        let kind: DiscoveryKind = serde_json::from_str("\"Zookeeper\"").unwrap();
        assert_eq!(kind, DiscoveryKind::Unknown("Zookeeper".into()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"Zookeeper\"");
    }

    #[test]
    fn eviction_kind_accepts_mixed_case_sorted() {
        assert_eq!(EvictionKind::from("Sorted"), EvictionKind::Sorted);
        assert_eq!(EvictionKind::Sorted.as_str(), "SORTED");
    }

    #[test]
    fn dialect_accepts_legacy_postgres_spelling() {
        let d: JdbcDialect = serde_json::from_str("\"PosgreSQL\"").unwrap();
        assert_eq!(d, JdbcDialect::PostgreSql);
        assert_eq!(d.data_source_class(), "org.postgresql.ds.PGPoolingDataSource");
    }

    #[test]
    fn value_enum_uses_constant_names() {
        let m: CacheMode = serde_json::from_str("\"PARTITIONED\"").unwrap();
        assert_eq!(m, CacheMode::Partitioned);
        assert!(serde_json::from_str::<CacheMode>("\"SHARDED\"").is_err());
    }
}

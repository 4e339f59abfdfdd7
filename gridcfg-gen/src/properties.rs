use gridcfg_models::Cluster;
use tracing::debug;

use crate::common::cluster_datasources;

/// `secret.properties` stub with connection placeholders for every
/// distinct datasource. Empty when no store references one.
pub fn datasources_properties(cluster: &Cluster, banner: &str) -> String {
    let datasources = cluster_datasources(cluster);
    debug!(cluster = %cluster.name, datasources = datasources.len(), "rendering properties");

    if datasources.is_empty() {
        return String::new();
    }

    let mut out = format!("# {}\n\n", banner);
    for ds in &datasources {
        out.push_str(&format!("{}.jdbc.url=YOUR_JDBC_URL\n", ds.bean_id));
        out.push_str(&format!("{}.jdbc.username=YOUR_USER_NAME\n", ds.bean_id));
        out.push_str(&format!("{}.jdbc.password=YOUR_PASSWORD\n", ds.bean_id));
        out.push('\n');
    }
    out
}

//! Spring XML rendering of a cluster.

use gridcfg_models::*;
use tracing::debug;

use crate::buffer::OutputBuffer;
use crate::common::*;
use crate::GenerateError;

/// Escapes `s` for an attribute value. Line breaks and tabs become
/// character references, otherwise attribute normalization turns them into
/// spaces.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}

fn scalar(value: Value<'_>) -> Option<String> {
    match value {
        Value::Str(s) => Some(s.to_string()),
        Value::Int(n) => Some(n.to_string()),
        Value::Float(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Enum { constant, .. } => Some(constant.to_string()),
        Value::List(_) => None,
    }
}

fn element(buf: &mut OutputBuffer, tag: &str, attrs: &[(&str, &str)]) {
    let mut elem = format!("<{}", tag);
    for (name, val) in attrs {
        elem.push_str(&format!(" {}=\"{}\"", name, escape(val)));
    }
    elem.push_str("/>");

    buf.empty_line_if_needed();
    buf.line(&elem);
}

pub(crate) fn property(buf: &mut OutputBuffer, name: &str, value: Option<Value<'_>>) -> bool {
    match value.and_then(scalar) {
        Some(text) => {
            element(buf, "property", &[("name", name), ("value", &text)]);
            true
        }
        None => false,
    }
}

fn class_name_property(buf: &mut OutputBuffer, name: &str, class: Option<&str>) {
    if let Some(class) = class.filter(|c| !c.trim().is_empty()) {
        element(
            buf,
            "property",
            &[("name", name), ("value", full_class_name(class))],
        );
    }
}

fn list_property(
    buf: &mut OutputBuffer,
    name: &str,
    value: Option<Value<'_>>,
    list_tag: &str,
) -> bool {
    let Some(Value::List(items)) = value else {
        return false;
    };
    if items.is_empty() {
        return false;
    }

    buf.empty_line_if_needed();
    buf.start_block(&format!("<property name=\"{}\">", name));
    buf.start_block(&format!("<{}>", list_tag));
    for item in items {
        buf.line(&format!("<value>{}</value>", escape(item)));
    }
    buf.end_block(&format!("</{}>", list_tag));
    buf.end_block("</property>");

    buf.request_empty_line();
    true
}

fn properties_property(buf: &mut OutputBuffer, name: &str, value: Option<Value<'_>>) -> bool {
    let Some(Value::List(items)) = value else {
        return false;
    };

    buf.empty_line_if_needed();
    buf.start_block(&format!("<property name=\"{}\">", name));
    buf.start_block("<props>");
    for (key, val) in items.iter().filter_map(|line| split_property(line)) {
        buf.line(&format!("<prop key=\"{}\">{}</prop>", escape(key), escape(val)));
    }
    buf.end_block("</props>");
    buf.end_block("</property>");
    true
}

fn instance_property(buf: &mut OutputBuffer, name: &str, value: Option<Value<'_>>) -> bool {
    let Some(Value::Str(class)) = value else {
        return false;
    };

    buf.empty_line_if_needed();
    buf.start_block(&format!("<property name=\"{}\">", name));
    buf.line(&format!("<bean class=\"{}\"/>", class));
    buf.end_block("</property>");
    true
}

/// Nested bean assigned to `prop`. A bare bean is written when `force` is
/// set and the source has no values.
pub(crate) fn bean_property(
    buf: &mut OutputBuffer,
    bean: Option<&dyn BeanSource>,
    prop: &str,
    desc: &BeanDescriptor,
    force: bool,
) -> bool {
    match bean.filter(|b| desc.has_any(*b)) {
        Some(bean) => {
            buf.empty_line_if_needed();
            buf.start_block(&format!("<property name=\"{}\">", prop));
            buf.start_block(&format!("<bean class=\"{}\">", desc.class_name));

            for field in desc.fields {
                let value = bean.field(field.name);
                match field.format {
                    FieldFormat::Plain => property(buf, field.property(), value),
                    FieldFormat::List => list_property(buf, field.property(), value, "list"),
                    FieldFormat::ClassName => {
                        let class = match value {
                            Some(Value::Str(class)) => Some(class),
                            _ => None,
                        };
                        class_name_property(buf, field.property(), class);
                        class.is_some()
                    }
                    FieldFormat::PropertiesAsList { .. } => {
                        properties_property(buf, field.property(), value)
                    }
                    FieldFormat::Instance => instance_property(buf, field.property(), value),
                };
            }

            buf.end_block("</bean>");
            buf.end_block("</property>");
        }
        None if force => {
            buf.empty_line_if_needed();
            buf.start_block(&format!("<property name=\"{}\">", prop));
            buf.line(&format!("<bean class=\"{}\"/>", desc.class_name));
            buf.end_block("</property>");
        }
        None => return false,
    }

    buf.request_empty_line();
    true
}

fn eviction_policy(
    buf: &mut OutputBuffer,
    policy: Option<&EvictionPolicy>,
    prop: &str,
) -> Result<(), GenerateError> {
    if let Some((source, desc)) = policy.map(eviction).transpose()?.flatten() {
        bean_property(buf, source, prop, desc, true);
    }
    Ok(())
}

fn cluster_discovery(buf: &mut OutputBuffer, cluster: &Cluster) -> Result<(), GenerateError> {
    let Some(discovery) = &cluster.discovery else {
        return Ok(());
    };
    let Some((source, desc)) = ip_finder(discovery)? else {
        return Ok(());
    };

    buf.empty_line_if_needed();
    buf.start_block("<property name=\"discoverySpi\">");
    buf.start_block(&format!("<bean class=\"{}\">", TCP_DISCOVERY_SPI));
    bean_property(buf, source, "ipFinder", desc, true);
    buf.end_block("</bean>");
    buf.end_block("</property>");

    buf.request_empty_line();
    Ok(())
}

fn cluster_atomics(buf: &mut OutputBuffer, cluster: &Cluster) {
    bean_property(
        buf,
        as_source(&cluster.atomic_configuration),
        "atomicConfiguration",
        &ATOMIC_CONFIGURATION,
        false,
    );
    buf.request_empty_line();
}

fn cluster_communication(buf: &mut OutputBuffer, cluster: &Cluster) {
    property(buf, "networkTimeout", value(cluster.network_timeout));
    property(buf, "networkSendRetryDelay", value(cluster.network_send_retry_delay));
    property(buf, "networkSendRetryCount", value(cluster.network_send_retry_count));
    property(buf, "segmentCheckFrequency", value(cluster.segment_check_frequency));
    property(buf, "waitForSegmentOnStart", value(cluster.wait_for_segment_on_start));
    property(buf, "discoveryStartupDelay", value(cluster.discovery_startup_delay));
    buf.request_empty_line();
}

fn cluster_deployment(buf: &mut OutputBuffer, cluster: &Cluster) {
    let mode = cluster.deployment_mode.filter(|m| *m != DeploymentMode::Shared);
    property(buf, "deploymentMode", value(mode));
    buf.request_empty_line();
}

fn cluster_events(buf: &mut OutputBuffer, cluster: &Cluster) {
    let groups = &cluster.include_event_types;
    if groups.is_empty() {
        return;
    }

    buf.empty_line_if_needed();
    buf.start_block("<property name=\"includeEventTypes\">");

    if let [group] = groups.as_slice() {
        buf.line(&format!(
            "<util:constant static-field=\"{}.{}\"/>",
            EVENT_TYPE, group
        ));
    } else {
        buf.start_block("<array>");
        for (i, group) in groups.iter().enumerate() {
            if i > 0 {
                buf.blank_line();
            }
            buf.line(&format!("<!-- EventType.{} -->", group));
            for event in group.events() {
                buf.line(&format!(
                    "<util:constant static-field=\"{}.{}\"/>",
                    EVENT_TYPE, event
                ));
            }
        }
        buf.end_block("</array>");
    }

    buf.end_block("</property>");
    buf.request_empty_line();
}

fn cluster_marshaller(buf: &mut OutputBuffer, cluster: &Cluster) -> Result<(), GenerateError> {
    let bean = cluster
        .marshaller
        .as_ref()
        .map(marshaller)
        .transpose()?
        .flatten();
    if let Some((source, desc)) = bean {
        bean_property(buf, source, "marshaller", desc, true);
    }

    property(buf, "marshalLocalJobs", value(cluster.marshal_local_jobs));
    property(buf, "marshallerCacheKeepAliveTime", value(cluster.marshaller_cache_keep_alive_time));
    property(
        buf,
        "marshallerCacheThreadPoolSize",
        value(cluster.marshaller_cache_thread_pool_size),
    );
    buf.request_empty_line();
    Ok(())
}

fn cluster_metrics(buf: &mut OutputBuffer, cluster: &Cluster) {
    property(buf, "metricsExpireTime", value(cluster.metrics_expire_time));
    property(buf, "metricsHistorySize", value(cluster.metrics_history_size));
    property(buf, "metricsLogFrequency", value(cluster.metrics_log_frequency));
    property(buf, "metricsUpdateFrequency", value(cluster.metrics_update_frequency));
    buf.request_empty_line();
}

fn cluster_p2p(buf: &mut OutputBuffer, cluster: &Cluster) {
    let Some(enabled) = cluster.peer_class_loading_enabled else {
        return;
    };

    property(buf, "peerClassLoadingEnabled", Some(Value::Bool(enabled)));
    if enabled {
        property(
            buf,
            "peerClassLoadingMissedResourcesCacheSize",
            value(cluster.peer_class_loading_missed_resources_cache_size),
        );
        property(
            buf,
            "peerClassLoadingThreadPoolSize",
            value(cluster.peer_class_loading_thread_pool_size),
        );
        list_property(
            buf,
            "peerClassLoadingLocalClassPathExclude",
            list(&cluster.peer_class_loading_local_class_path_exclude),
            "list",
        );
    }
    buf.request_empty_line();
}

fn cluster_swap(buf: &mut OutputBuffer, cluster: &Cluster) -> Result<(), GenerateError> {
    let swap = cluster
        .swap_space_spi
        .as_ref()
        .map(swap_space)
        .transpose()?
        .flatten();
    if let Some((source, desc)) = swap {
        bean_property(buf, source, "swapSpaceSpi", desc, true);
        buf.request_empty_line();
    }
    Ok(())
}

fn cluster_time(buf: &mut OutputBuffer, cluster: &Cluster) {
    property(buf, "clockSyncSamples", value(cluster.clock_sync_samples));
    property(buf, "clockSyncFrequency", value(cluster.clock_sync_frequency));
    property(buf, "timeServerPortBase", value(cluster.time_server_port_base));
    property(buf, "timeServerPortRange", value(cluster.time_server_port_range));
    buf.request_empty_line();
}

fn cluster_pools(buf: &mut OutputBuffer, cluster: &Cluster) {
    property(buf, "publicThreadPoolSize", value(cluster.public_thread_pool_size));
    property(buf, "systemThreadPoolSize", value(cluster.system_thread_pool_size));
    property(buf, "managementThreadPoolSize", value(cluster.management_thread_pool_size));
    property(buf, "igfsThreadPoolSize", value(cluster.igfs_thread_pool_size));
    buf.request_empty_line();
}

fn cluster_transactions(buf: &mut OutputBuffer, cluster: &Cluster) {
    bean_property(
        buf,
        as_source(&cluster.transaction_configuration),
        "transactionConfiguration",
        &TRANSACTION_CONFIGURATION,
        false,
    );
    buf.request_empty_line();
}

fn cache_general(buf: &mut OutputBuffer, cache: &Cache) {
    property(buf, "name", Some(Value::Str(&cache.name)));
    property(buf, "cacheMode", value(cache.cache_mode));
    property(buf, "atomicityMode", value(cache.atomicity_mode));
    if cache.is_partitioned() {
        property(buf, "backups", value(cache.backups));
    }
    property(buf, "readFromBackup", value(cache.read_from_backup));
    property(buf, "copyOnRead", value(cache.copy_on_read));
    property(buf, "invalidate", value(cache.invalidate));
    buf.request_empty_line();
}

fn cache_memory(buf: &mut OutputBuffer, cache: &Cache) -> Result<(), GenerateError> {
    property(buf, "memoryMode", value(cache.memory_mode));
    property(buf, "offHeapMaxMemory", value(cache.off_heap_max_memory));
    eviction_policy(buf, cache.eviction_policy.as_ref(), "evictionPolicy")?;
    property(buf, "swapEnabled", value(cache.swap_enabled));
    property(buf, "startSize", value(cache.start_size));
    buf.request_empty_line();
    Ok(())
}

fn cache_query(buf: &mut OutputBuffer, cache: &Cache) {
    property(buf, "sqlOnheapRowCacheSize", value(cache.sql_onheap_row_cache_size));
    property(buf, "longQueryWarningTimeout", value(cache.long_query_warning_timeout));

    if !cache.indexed_types.is_empty() {
        buf.empty_line_if_needed();
        buf.start_block("<property name=\"indexedTypes\">");
        buf.start_block("<list>");
        for pair in &cache.indexed_types {
            buf.line(&format!("<value>{}</value>", full_class_name(&pair.key_class)));
            buf.line(&format!("<value>{}</value>", full_class_name(&pair.value_class)));
        }
        buf.end_block("</list>");
        buf.end_block("</property>");
        buf.request_empty_line();
    }

    list_property(buf, "sqlFunctionClasses", list(&cache.sql_function_classes), "array");
    property(buf, "sqlEscapeAll", value(cache.sql_escape_all));
    buf.request_empty_line();
}

fn cache_store(buf: &mut OutputBuffer, cache: &Cache) -> Result<(), GenerateError> {
    if let Some(factory) = &cache.cache_store_factory {
        if let Some((source, desc)) = store_factory(factory)? {
            if source.is_some() {
                bean_property(buf, source, "cacheStoreFactory", desc, true);
                if let Some(ds) = factory.data_source() {
                    buf.register_datasource(ds);
                }
                buf.request_empty_line();
            }
        }
    }

    property(buf, "loadPreviousValue", value(cache.load_previous_value));
    property(buf, "readThrough", value(cache.read_through));
    property(buf, "writeThrough", value(cache.write_through));
    buf.request_empty_line();

    property(buf, "writeBehindEnabled", value(cache.write_behind_enabled));
    property(buf, "writeBehindBatchSize", value(cache.write_behind_batch_size));
    property(buf, "writeBehindFlushSize", value(cache.write_behind_flush_size));
    property(buf, "writeBehindFlushFrequency", value(cache.write_behind_flush_frequency));
    property(buf, "writeBehindFlushThreadCount", value(cache.write_behind_flush_thread_count));
    buf.request_empty_line();
    Ok(())
}

fn cache_concurrency(buf: &mut OutputBuffer, cache: &Cache) {
    property(buf, "maxConcurrentAsyncOperations", value(cache.max_concurrent_async_operations));
    property(buf, "defaultLockTimeout", value(cache.default_lock_timeout));
    property(buf, "atomicWriteOrderMode", value(cache.atomic_write_order_mode));
    buf.request_empty_line();
}

fn cache_rebalance(buf: &mut OutputBuffer, cache: &Cache) {
    if cache.is_local() {
        return;
    }
    property(buf, "rebalanceMode", value(cache.rebalance_mode));
    property(buf, "rebalanceThreadPoolSize", value(cache.rebalance_thread_pool_size));
    property(buf, "rebalanceBatchSize", value(cache.rebalance_batch_size));
    property(buf, "rebalanceOrder", value(cache.rebalance_order));
    property(buf, "rebalanceDelay", value(cache.rebalance_delay));
    property(buf, "rebalanceTimeout", value(cache.rebalance_timeout));
    property(buf, "rebalanceThrottle", value(cache.rebalance_throttle));
    buf.request_empty_line();
}

/// Body of a `NearCacheConfiguration` bean.
fn near_configuration(
    buf: &mut OutputBuffer,
    near: Option<&NearCacheConfiguration>,
) -> Result<(), GenerateError> {
    if let Some(near) = near {
        property(buf, "nearStartSize", value(near.near_start_size));
        eviction_policy(buf, near.near_eviction_policy.as_ref(), "nearEvictionPolicy")?;
    }
    Ok(())
}

fn cache_server_near_cache(buf: &mut OutputBuffer, cache: &Cache) -> Result<(), GenerateError> {
    if cache.near_cache_active() {
        buf.empty_line_if_needed();
        buf.start_block("<property name=\"nearConfiguration\">");
        buf.start_block(&format!("<bean class=\"{}\">", NEAR_CACHE_CONFIGURATION));
        near_configuration(buf, cache.near_configuration.as_ref())?;
        buf.end_block("</bean>");
        buf.end_block("</property>");
    }
    buf.request_empty_line();
    Ok(())
}

fn cache_statistics(buf: &mut OutputBuffer, cache: &Cache) {
    property(buf, "statisticsEnabled", value(cache.statistics_enabled));
    property(buf, "managementEnabled", value(cache.management_enabled));
    buf.request_empty_line();
}

fn metadata_query_fields(buf: &mut OutputBuffer, prop: &str, fields: &[QueryField]) {
    if fields.is_empty() {
        return;
    }

    buf.empty_line_if_needed();
    buf.start_block(&format!("<property name=\"{}\">", prop));
    buf.start_block("<map>");
    for field in fields {
        element(
            buf,
            "entry",
            &[
                ("key", &field.name.to_uppercase()),
                ("value", full_class_name(&field.class_name)),
            ],
        );
    }
    buf.end_block("</map>");
    buf.end_block("</property>");
    buf.request_empty_line();
}

fn metadata_groups(buf: &mut OutputBuffer, meta: &CacheTypeMetadata) {
    if meta.groups.is_empty() {
        return;
    }

    buf.empty_line_if_needed();
    buf.start_block("<property name=\"groups\">");
    buf.start_block("<map>");
    for group in meta.groups.iter().filter(|g| !g.fields.is_empty()) {
        buf.start_block(&format!("<entry key=\"{}\">", escape(&group.name)));
        buf.start_block("<map>");
        for field in &group.fields {
            buf.start_block(&format!("<entry key=\"{}\">", escape(&field.name)));
            buf.start_block(&format!("<bean class=\"{}\">", IGNITE_BI_TUPLE));
            buf.line(&format!(
                "<constructor-arg value=\"{}\"/>",
                full_class_name(&field.class_name)
            ));
            buf.line(&format!("<constructor-arg value=\"{}\"/>", field.direction));
            buf.end_block("</bean>");
            buf.end_block("</entry>");
        }
        buf.end_block("</map>");
        buf.end_block("</entry>");
    }
    buf.end_block("</map>");
    buf.end_block("</property>");
    buf.request_empty_line();
}

fn non_empty(s: &str) -> Option<Value<'_>> {
    (!s.trim().is_empty()).then_some(Value::Str(s))
}

fn metadata_database_fields(buf: &mut OutputBuffer, prop: &str, fields: &[JdbcFieldMapping]) {
    if fields.is_empty() {
        return;
    }

    buf.empty_line_if_needed();
    buf.start_block(&format!("<property name=\"{}\">", prop));
    buf.start_block("<list>");
    for field in fields {
        buf.start_block(&format!("<bean class=\"{}\">", CACHE_TYPE_FIELD_METADATA));
        property(buf, "databaseName", non_empty(&field.database_name));
        buf.start_block("<property name=\"databaseType\">");
        buf.line(&format!(
            "<util:constant static-field=\"java.sql.Types.{}\"/>",
            field.database_type
        ));
        buf.end_block("</property>");
        property(buf, "javaName", non_empty(&field.java_name));
        class_name_property(buf, "javaType", Some(&field.java_type));
        buf.end_block("</bean>");
    }
    buf.end_block("</list>");
    buf.end_block("</property>");
    buf.request_empty_line();
}

fn cache_metadata(buf: &mut OutputBuffer, meta: &CacheTypeMetadata) {
    buf.start_block(&format!("<bean class=\"{}\">", CACHE_TYPE_METADATA));

    class_name_property(buf, "keyType", meta.key_type.as_deref());
    class_name_property(buf, "valueType", meta.value_type.as_deref());
    buf.request_empty_line();

    metadata_query_fields(buf, "queryFields", &meta.query_fields);
    metadata_query_fields(buf, "ascendingFields", &meta.ascending_fields);
    metadata_query_fields(buf, "descendingFields", &meta.descending_fields);
    list_property(buf, "textFields", list(&meta.text_fields), "list");
    metadata_groups(buf, meta);
    buf.request_empty_line();

    property(buf, "databaseSchema", text(&meta.database_schema));
    property(buf, "databaseTable", text(&meta.database_table));
    if meta.maps_key_fields() {
        metadata_database_fields(buf, "keyFields", &meta.key_fields);
    }
    metadata_database_fields(buf, "valueFields", &meta.value_fields);

    buf.end_block("</bean>");
    buf.request_empty_line();
}

fn cache_metadatas(buf: &mut OutputBuffer, cache: &Cache) {
    let metas = distinct_metadata(cache);
    if metas.is_empty() {
        return;
    }

    buf.empty_line_if_needed();
    buf.start_block("<property name=\"typeMetadata\">");
    buf.start_block("<list>");
    for meta in metas {
        cache_metadata(buf, meta);
    }
    buf.end_block("</list>");
    buf.end_block("</property>");
    buf.request_empty_line();
}

/// A complete `CacheConfiguration` bean.
pub fn cache(buf: &mut OutputBuffer, cache: &Cache) -> Result<(), GenerateError> {
    buf.start_block(&format!("<bean class=\"{}\">", CACHE_CONFIGURATION));

    cache_general(buf, cache);
    cache_memory(buf, cache)?;
    cache_query(buf, cache);
    cache_store(buf, cache)?;
    cache_concurrency(buf, cache);
    cache_rebalance(buf, cache);
    cache_server_near_cache(buf, cache)?;
    cache_statistics(buf, cache);
    cache_metadatas(buf, cache);

    buf.end_block("</bean>");
    Ok(())
}

fn cluster_caches(buf: &mut OutputBuffer, caches: &[Cache]) -> Result<(), GenerateError> {
    if caches.is_empty() {
        return Ok(());
    }

    buf.empty_line_if_needed();
    buf.start_block("<property name=\"cacheConfiguration\">");
    buf.start_block("<list>");
    for (i, c) in caches.iter().enumerate() {
        if i > 0 {
            buf.blank_line();
        }
        cache(buf, c)?;
    }
    buf.end_block("</list>");
    buf.end_block("</property>");
    buf.request_empty_line();
    Ok(())
}

fn header(xml: &mut OutputBuffer, banner: &str, datasources: &[DataSourceRef]) {
    xml.line("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    xml.blank_line();
    xml.line(&format!("<!-- {} -->", banner));
    xml.line("<beans xmlns=\"http://www.springframework.org/schema/beans\"");
    xml.line("       xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"");
    xml.line("       xmlns:util=\"http://www.springframework.org/schema/util\"");
    xml.line("       xsi:schemaLocation=\"http://www.springframework.org/schema/beans");
    xml.line(
        "                           http://www.springframework.org/schema/beans/spring-beans.xsd",
    );
    xml.line("                           http://www.springframework.org/schema/util");
    xml.start_block(
        "                           http://www.springframework.org/schema/util/spring-util.xsd\">",
    );

    if datasources.is_empty() {
        return;
    }

    xml.line("<!-- Load external properties file. -->");
    xml.start_block(&format!(
        "<bean id=\"placeholderConfig\" class=\"{}\">",
        PLACEHOLDER_CONFIGURER
    ));
    xml.line("<property name=\"location\" value=\"classpath:secret.properties\"/>");
    xml.end_block("</bean>");
    xml.blank_line();

    xml.line("<!-- Data source beans will be initialized from external properties file. -->");
    for ds in datasources {
        let id = escape(&ds.bean_id);
        xml.start_block(&format!(
            "<bean id=\"{}\" class=\"{}\">",
            id,
            ds.dialect.data_source_class()
        ));
        xml.line(&format!("<property name=\"URL\" value=\"${{{}.jdbc.url}}\"/>", id));
        xml.line(&format!("<property name=\"user\" value=\"${{{}.jdbc.username}}\"/>", id));
        xml.line(&format!("<property name=\"password\" value=\"${{{}.jdbc.password}}\"/>", id));
        xml.end_block("</bean>");
        xml.blank_line();
    }
}

/// Full Spring XML document. `client_near` switches to client mode and
/// declares the given near cache as `nearCacheBean`.
pub fn cluster(
    cluster: &Cluster,
    client_near: Option<&NearCacheConfiguration>,
    banner: &str,
) -> Result<String, GenerateError> {
    debug!(
        cluster = %cluster.name,
        caches = cluster.caches.len(),
        client = client_near.is_some(),
        "rendering spring xml"
    );

    let mut body = OutputBuffer::with_depth(1);

    if let Some(near) = client_near {
        body.start_block(&format!(
            "<bean id=\"nearCacheBean\" class=\"{}\">",
            NEAR_CACHE_CONFIGURATION
        ));
        near_configuration(&mut body, Some(near))?;
        body.end_block("</bean>");
        body.blank_line();
    }

    body.start_block(&format!("<bean class=\"{}\">", IGNITE_CONFIGURATION));

    if client_near.is_some() {
        body.line("<property name=\"clientMode\" value=\"true\"/>");
        body.request_empty_line();
    }

    cluster_discovery(&mut body, cluster)?;
    cluster_atomics(&mut body, cluster);
    cluster_communication(&mut body, cluster);
    cluster_deployment(&mut body, cluster);
    cluster_events(&mut body, cluster);
    cluster_marshaller(&mut body, cluster)?;
    cluster_metrics(&mut body, cluster);
    cluster_p2p(&mut body, cluster);
    cluster_swap(&mut body, cluster)?;
    cluster_time(&mut body, cluster);
    cluster_pools(&mut body, cluster);
    cluster_transactions(&mut body, cluster);
    cluster_caches(&mut body, &cluster.caches)?;

    body.end_block("</bean>");

    let mut xml = OutputBuffer::new();
    header(&mut xml, banner, body.datasources());
    xml.push_rendered(body.as_str());
    xml.end_block("</beans>");

    Ok(xml.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster_from(json: &str) -> Cluster {
        serde_json::from_str(json).unwrap()
    }

    fn render(json: &str) -> String {
        cluster(&cluster_from(json), None, BANNER).unwrap()
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape(r#"a<b>&"c""#), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape("create table T (\n\tid int)"), "create table T (&#10;&#9;id int)");
    }

    #[test]
    fn document_has_header_and_footer() {
        let xml = render(r#"{"name":"c"}"#);
        assert!(xml.starts_with(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\n\
             <!-- This configuration was generated by gridcfg -->\n<beans "
        ));
        assert!(xml.contains(
            "\n    <bean class=\"org.apache.ignite.configuration.IgniteConfiguration\">\n"
        ));
        assert!(xml.ends_with("    </bean>\n</beans>\n"));
        assert!(!xml.contains("placeholderConfig"));
    }

    #[test]
    fn absent_values_emit_nothing() {
        let xml = render(r#"{"name":"c","caches":[{"name":"a"}]}"#);
        assert!(xml.contains("<property name=\"name\" value=\"a\"/>"));
        assert!(!xml.contains("cacheMode"));
        assert!(!xml.contains("evictionPolicy"));
        assert!(!xml.contains("typeMetadata"));
    }

    #[test]
    fn vm_discovery_lists_addresses() {
        let xml = render(
            r#"{"name":"c","discovery":{"kind":"Vm","Vm":{"addresses":["127.0.0.1:47500..47510"]}}}"#,
        );
        let expected = [
            "        <property name=\"discoverySpi\">",
            "            <bean class=\"org.apache.ignite.spi.discovery.tcp.TcpDiscoverySpi\">",
            "                <property name=\"ipFinder\">",
            "                    <bean class=\"org.apache.ignite.spi.discovery.tcp.ipfinder.vm.TcpDiscoveryVmIpFinder\">",
            "                        <property name=\"addresses\">",
            "                            <list>",
            "                                <value>127.0.0.1:47500..47510</value>",
            "                            </list>",
            "                        </property>",
            "                    </bean>",
            "                </property>",
            "            </bean>",
            "        </property>",
        ]
        .join("\n");
        assert!(xml.contains(&format!("{}\n", expected)), "{}", xml);
    }

    #[test]
    fn discovery_without_settings_still_creates_ip_finder() {
        let xml = render(r#"{"name":"c","discovery":{"kind":"Multicast"}}"#);
        assert!(xml.contains(
            "<bean class=\"org.apache.ignite.spi.discovery.tcp.ipfinder.multicast.TcpDiscoveryMulticastIpFinder\"/>"
        ));
    }

    #[test]
    fn unknown_discovery_kind_fails() {
        let err = cluster(
            &cluster_from(r#"{"name":"c","discovery":{"kind":"Zookeeper"}}"#),
            None,
            BANNER,
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::UnknownKind { family: "discovery", .. }));
    }

    #[test]
    fn backups_only_for_partitioned_caches() {
        let xml = render(
            r#"{"name":"c","caches":[{"name":"a","cacheMode":"REPLICATED","backups":2},
                                     {"name":"b","cacheMode":"PARTITIONED","backups":3}]}"#,
        );
        assert!(!xml.contains("value=\"2\""));
        assert!(xml.contains("<property name=\"backups\" value=\"3\"/>"));
    }

    #[test]
    fn local_caches_skip_rebalance() {
        let xml = render(
            r#"{"name":"c","caches":[{"name":"a","cacheMode":"LOCAL","rebalanceMode":"ASYNC"}]}"#,
        );
        assert!(!xml.contains("rebalanceMode"));
    }

    #[test]
    fn near_cache_needs_partitioned_mode() {
        let json = r#"{"name":"c","caches":[{"name":"a","cacheMode":"MODE","nearCacheEnabled":true,
            "nearConfiguration":{"nearStartSize":10}}]}"#;
        let replicated = render(&json.replace("MODE", "REPLICATED"));
        assert!(!replicated.contains("nearConfiguration"));

        let partitioned = render(&json.replace("MODE", "PARTITIONED"));
        assert!(partitioned.contains("<property name=\"nearStartSize\" value=\"10\"/>"));
    }

    #[test]
    fn shared_deployment_mode_is_omitted() {
        assert!(!render(r#"{"name":"c","deploymentMode":"SHARED"}"#).contains("deploymentMode"));
        assert!(
            render(r#"{"name":"c","deploymentMode":"PRIVATE"}"#)
                .contains("<property name=\"deploymentMode\" value=\"PRIVATE\"/>")
        );
    }

    #[test]
    fn single_event_group_is_a_constant() {
        let xml = render(r#"{"name":"c","includeEventTypes":["EVTS_CACHE"]}"#);
        assert!(xml.contains(
            "<util:constant static-field=\"org.apache.ignite.events.EventType.EVTS_CACHE\"/>"
        ));
        assert!(!xml.contains("<array>"));
    }

    #[test]
    fn several_event_groups_are_expanded_into_an_array() {
        let xml =
            render(r#"{"name":"c","includeEventTypes":["EVTS_CHECKPOINT","EVTS_SWAPSPACE"]}"#);
        assert!(xml.contains("<array>"));
        assert!(xml.contains("<!-- EventType.EVTS_CHECKPOINT -->"));
        assert!(xml.contains("<!-- EventType.EVTS_SWAPSPACE -->"));
        assert!(xml.contains("EventType.EVT_CHECKPOINT_SAVED\"/>"));
    }

    #[test]
    fn jdk_marshaller_is_emitted_once() {
        let xml = render(r#"{"name":"c","marshaller":{"kind":"JdkMarshaller"}}"#);
        assert_eq!(xml.matches("JdkMarshaller").count(), 1);
    }

    #[test]
    fn peer_class_loading_details_need_it_enabled() {
        let json = r#"{"name":"c","peerClassLoadingEnabled":FLAG,"peerClassLoadingThreadPoolSize":4}"#;
        assert!(!render(&json.replace("FLAG", "false")).contains("peerClassLoadingThreadPoolSize"));
        assert!(render(&json.replace("FLAG", "true")).contains("peerClassLoadingThreadPoolSize"));
    }

    #[test]
    fn pojo_store_declares_datasource_once() {
        let store = r#"{"kind":"CacheJdbcPojoStoreFactory",
            "CacheJdbcPojoStoreFactory":{"dataSourceBean":"ds","dialect":"MySQL"}}"#;
        let json = format!(
            r#"{{"name":"c","caches":[{{"name":"a","cacheStoreFactory":{0}}},{{"name":"b","cacheStoreFactory":{0}}}]}}"#,
            store
        );
        let xml = render(&json);
        assert_eq!(xml.matches("<bean id=\"ds\"").count(), 1);
        assert!(xml.contains("classpath:secret.properties"));
        assert!(xml.contains("<property name=\"URL\" value=\"${ds.jdbc.url}\"/>"));
        assert!(xml.contains(
            "<bean class=\"org.apache.ignite.cache.store.jdbc.dialect.MySQLDialect\"/>"
        ));
    }

    #[test]
    fn pojo_store_without_bean_id_declares_no_datasource() {
        let xml = render(
            r#"{"name":"c","caches":[{"name":"a","cacheStoreFactory":{"kind":"CacheJdbcPojoStoreFactory",
                "CacheJdbcPojoStoreFactory":{"dialect":"H2"}}}]}"#,
        );
        assert!(xml.contains("org.apache.ignite.cache.store.jdbc.dialect.H2Dialect"));
        assert!(!xml.contains("<bean id=\"\""));
        assert!(!xml.contains("${.jdbc.url}"));
        assert!(!xml.contains("placeholderConfig"));
    }

    #[test]
    fn builtin_key_type_skips_key_fields() {
        let json = r#"{"name":"c","caches":[{"name":"a","storeMetadata":[{"name":"P",
            "keyType":"KEY","valueType":"com.example.Person",
            "keyFields":[{"databaseName":"ID","databaseType":"BIGINT","javaName":"id","javaType":"long"}],
            "valueFields":[{"databaseName":"NAME","databaseType":"VARCHAR","javaName":"name","javaType":"String"}]}]}]}"#;

        let builtin = render(&json.replace("KEY", "Long"));
        assert!(!builtin.contains("keyFields"));
        assert!(builtin.contains("<property name=\"keyType\" value=\"java.lang.Long\"/>"));
        assert!(builtin.contains("<util:constant static-field=\"java.sql.Types.VARCHAR\"/>"));

        let composite = render(&json.replace("KEY", "com.example.PersonKey"));
        assert!(composite.contains("<property name=\"keyFields\">"));
    }

    #[test]
    fn client_mode_declares_near_cache_bean_first() {
        let near = NearCacheConfiguration {
            near_start_size: Some(50),
            ..Default::default()
        };
        let xml = cluster(&cluster_from(r#"{"name":"c"}"#), Some(&near), BANNER).unwrap();
        let near_at = xml.find("id=\"nearCacheBean\"").unwrap();
        let cfg_at = xml.find("IgniteConfiguration").unwrap();
        assert!(near_at < cfg_at);
        assert!(xml.contains(
            "IgniteConfiguration\">\n        <property name=\"clientMode\" value=\"true\"/>\n"
        ));
    }
}

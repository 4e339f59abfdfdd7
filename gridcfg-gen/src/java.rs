//! Java rendering of a cluster, either as a bare snippet or wrapped in a
//! `ConfigurationFactory` class.

use gridcfg_models::*;
use tracing::debug;

use crate::buffer::OutputBuffer;
use crate::common::*;
use crate::GenerateError;

const CLIENT_NEAR_VAR: &str = "nearCacheCfg";

/// Java string literal for `s`. Control characters are escaped so that a
/// multi-line value stays on one source line.
pub fn java_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn java_code(buf: &mut OutputBuffer, value: Value<'_>) -> Option<String> {
    match value {
        Value::Str(s) => Some(java_string(s)),
        Value::Int(n) => Some(n.to_string()),
        Value::Float(n) => Some(format!("{}f", n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Enum { class, constant } => {
            Some(format!("{}.{}", buf.import_class(class), constant))
        }
        Value::List(_) => None,
    }
}

fn class_code(buf: &mut OutputBuffer, class: &str) -> String {
    format!("{}.class", buf.import_class(class))
}

fn declare_variable(buf: &mut OutputBuffer, new: bool, var: &str, full_type: &str) {
    buf.empty_line_if_needed();
    let ty = buf.import_class(full_type);
    if new {
        buf.line(&format!("{} {} = new {}();", ty, var, ty));
    } else {
        buf.line(&format!("{} = new {}();", var, ty));
    }
    buf.request_empty_line();
}

/// Declares `var` as `full_type<generics>` initialized with the diamond
/// constructor of `actual_type`.
fn declare_generic(
    buf: &mut OutputBuffer,
    new: bool,
    var: &str,
    full_type: &str,
    actual_type: &str,
    generics: &[&str],
) {
    buf.empty_line_if_needed();
    let ty = buf.import_class(full_type);
    let actual = buf.import_class(actual_type);
    let generics: Vec<String> = generics.iter().map(|g| buf.import_class(g)).collect();
    if new {
        buf.line(&format!("{}<{}> {} = new {}<>();", ty, generics.join(", "), var, actual));
    } else {
        buf.line(&format!("{} = new {}<>();", var, actual));
    }
    buf.request_empty_line();
}

fn property(buf: &mut OutputBuffer, var: &str, name: &str, value: Option<Value<'_>>) -> bool {
    let Some(code) = value.and_then(|v| java_code(buf, v)) else {
        return false;
    };
    buf.empty_line_if_needed();
    buf.line(&format!("{}.{}({});", var, setter_name(name), code));
    true
}

fn class_name_property(buf: &mut OutputBuffer, var: &str, name: &str, class: Option<&str>) {
    if let Some(class) = class.filter(|c| !c.trim().is_empty()) {
        let code = class_code(buf, class);
        buf.empty_line_if_needed();
        buf.line(&format!("{}.{}({});", var, setter_name(name), code));
    }
}

fn list_property(buf: &mut OutputBuffer, var: &str, name: &str, value: Option<Value<'_>>) -> bool {
    let Some(Value::List(items)) = value else {
        return false;
    };
    if items.is_empty() {
        return false;
    }

    let arrays = buf.import_class("java.util.Arrays");
    let args: Vec<String> = items.iter().map(|i| java_string(i)).collect();
    buf.empty_line_if_needed();
    buf.line(&format!(
        "{}.{}({}.asList({}));",
        var,
        setter_name(name),
        arrays,
        args.join(", ")
    ));
    buf.request_empty_line();
    true
}

/// Setter taking the items as separate arguments, as strings or as class
/// literals.
fn multiparam_property(
    buf: &mut OutputBuffer,
    var: &str,
    name: &str,
    items: &[String],
    classes: bool,
) {
    if items.is_empty() {
        return;
    }

    let args: Vec<String> = items
        .iter()
        .map(|i| if classes { class_code(buf, i) } else { java_string(i) })
        .collect();
    buf.empty_line_if_needed();
    buf.line(&format!("{}.{}({});", var, setter_name(name), args.join(", ")));
}

fn properties_property(
    buf: &mut OutputBuffer,
    bean_var: &str,
    name: &str,
    props_var: &str,
    value: Option<Value<'_>>,
) {
    let Some(Value::List(items)) = value else {
        return;
    };

    let props_type = buf.import_class("java.util.Properties");
    buf.empty_line_if_needed();
    if buf.need_new_variable(props_var) {
        buf.line(&format!("{} {} = new {}();", props_type, props_var, props_type));
    } else {
        buf.line(&format!("{} = new {}();", props_var, props_type));
    }
    for (key, val) in items.iter().filter_map(|line| split_property(line)) {
        buf.line(&format!(
            "{}.setProperty({}, {});",
            props_var,
            java_string(key),
            java_string(val)
        ));
    }
    buf.line(&format!("{}.{}({});", bean_var, setter_name(name), props_var));
}

fn instance_property(buf: &mut OutputBuffer, bean_var: &str, name: &str, value: Option<Value<'_>>) {
    if let Some(Value::Str(class)) = value {
        let short = buf.import_class(class);
        buf.empty_line_if_needed();
        buf.line(&format!("{}.{}(new {}());", bean_var, setter_name(name), short));
    }
}

/// Declares `bean_var`, fills it from `bean` and assigns it to
/// `var.prop`. With `force` a default instance is assigned when the
/// source has no values.
fn bean_property(
    buf: &mut OutputBuffer,
    var: &str,
    bean: Option<&dyn BeanSource>,
    prop: &str,
    bean_var: &str,
    desc: &BeanDescriptor,
    force: bool,
) -> bool {
    match bean.filter(|b| desc.has_any(*b)) {
        Some(bean) => {
            let new = buf.need_new_variable(bean_var);
            declare_variable(buf, new, bean_var, desc.class_name);

            for field in desc.fields {
                let value = bean.field(field.name);
                match field.format {
                    FieldFormat::Plain => {
                        property(buf, bean_var, field.property(), value);
                    }
                    FieldFormat::List => {
                        list_property(buf, bean_var, field.property(), value);
                    }
                    FieldFormat::ClassName => {
                        if let Some(Value::Str(class)) = value {
                            class_name_property(buf, bean_var, field.property(), Some(class));
                        }
                    }
                    FieldFormat::PropertiesAsList { var: props_var } => {
                        properties_property(buf, bean_var, field.property(), props_var, value)
                    }
                    FieldFormat::Instance => {
                        instance_property(buf, bean_var, field.property(), value)
                    }
                }
            }

            buf.request_empty_line();
            buf.empty_line_if_needed();
            buf.line(&format!("{}.{}({});", var, setter_name(prop), bean_var));
        }
        None if force => {
            let short = buf.import_class(desc.class_name);
            buf.empty_line_if_needed();
            buf.line(&format!("{}.{}(new {}());", var, setter_name(prop), short));
        }
        None => return false,
    }

    buf.request_empty_line();
    true
}

fn eviction_policy(
    buf: &mut OutputBuffer,
    var: &str,
    policy: Option<&EvictionPolicy>,
    prop: &str,
    bean_var: &str,
) -> Result<(), GenerateError> {
    if let Some((source, desc)) = policy.map(eviction).transpose()?.flatten() {
        bean_property(buf, var, source, prop, bean_var, desc, true);
    }
    Ok(())
}

/// Declares `var` as a `NearCacheConfiguration` filled from `near`.
fn near_configuration(
    buf: &mut OutputBuffer,
    var: &str,
    near: Option<&NearCacheConfiguration>,
    eviction_var: &str,
) -> Result<(), GenerateError> {
    let new = buf.need_new_variable(var);
    declare_variable(buf, new, var, NEAR_CACHE_CONFIGURATION);

    if let Some(near) = near {
        property(buf, var, "nearStartSize", value(near.near_start_size));
        buf.request_empty_line();
        eviction_policy(
            buf,
            var,
            near.near_eviction_policy.as_ref(),
            "nearEvictionPolicy",
            eviction_var,
        )?;
    }
    buf.request_empty_line();
    Ok(())
}

fn cluster_general(
    buf: &mut OutputBuffer,
    cluster: &Cluster,
    client: bool,
) -> Result<(), GenerateError> {
    let new = buf.need_new_variable("cfg");
    declare_variable(buf, new, "cfg", IGNITE_CONFIGURATION);

    if client {
        buf.line("cfg.setClientMode(true);");
        buf.request_empty_line();
    }

    let Some(discovery) = &cluster.discovery else {
        return Ok(());
    };
    let Some((source, desc)) = ip_finder(discovery)? else {
        return Ok(());
    };

    let new = buf.need_new_variable("discovery");
    declare_variable(buf, new, "discovery", TCP_DISCOVERY_SPI);
    bean_property(buf, "discovery", source, "ipFinder", "ipFinder", desc, true);

    buf.empty_line_if_needed();
    buf.line("cfg.setDiscoverySpi(discovery);");
    buf.request_empty_line();
    Ok(())
}

fn cluster_atomics(buf: &mut OutputBuffer, cluster: &Cluster) {
    bean_property(
        buf,
        "cfg",
        as_source(&cluster.atomic_configuration),
        "atomicConfiguration",
        "atomicCfg",
        &ATOMIC_CONFIGURATION,
        false,
    );
    buf.request_empty_line();
}

fn cluster_communication(buf: &mut OutputBuffer, cluster: &Cluster) {
    property(buf, "cfg", "networkTimeout", value(cluster.network_timeout));
    property(buf, "cfg", "networkSendRetryDelay", value(cluster.network_send_retry_delay));
    property(buf, "cfg", "networkSendRetryCount", value(cluster.network_send_retry_count));
    property(buf, "cfg", "segmentCheckFrequency", value(cluster.segment_check_frequency));
    property(buf, "cfg", "waitForSegmentOnStart", value(cluster.wait_for_segment_on_start));
    property(buf, "cfg", "discoveryStartupDelay", value(cluster.discovery_startup_delay));
    buf.request_empty_line();
}

fn cluster_deployment(buf: &mut OutputBuffer, cluster: &Cluster) {
    let mode = cluster.deployment_mode.filter(|m| *m != DeploymentMode::Shared);
    property(buf, "cfg", "deploymentMode", value(mode));
    buf.request_empty_line();
}

fn cluster_events(buf: &mut OutputBuffer, cluster: &Cluster) {
    let groups = &cluster.include_event_types;
    if groups.is_empty() {
        return;
    }

    let event_type = buf.import_class(EVENT_TYPE);
    buf.empty_line_if_needed();

    if let [group] = groups.as_slice() {
        buf.line(&format!("cfg.setIncludeEventTypes({}.{});", event_type, group));
    } else {
        let lengths: Vec<String> = groups
            .iter()
            .map(|g| format!("{}.{}.length", event_type, g))
            .collect();
        buf.line(&format!("int[] events = new int[{}];", lengths.join(" + ")));
        buf.blank_line();
        buf.line("int k = 0;");

        for group in groups {
            buf.blank_line();
            buf.line(&format!(
                "System.arraycopy({0}.{1}, 0, events, k, {0}.{1}.length);",
                event_type, group
            ));
            buf.line(&format!("k += {}.{}.length;", event_type, group));
        }

        buf.blank_line();
        buf.line("cfg.setIncludeEventTypes(events);");
    }

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
        bean_property(buf, "cfg", source, "marshaller", "marshaller", desc, true);
    }

    property(buf, "cfg", "marshalLocalJobs", value(cluster.marshal_local_jobs));
    property(
        buf,
        "cfg",
        "marshallerCacheKeepAliveTime",
        value(cluster.marshaller_cache_keep_alive_time),
    );
    property(
        buf,
        "cfg",
        "marshallerCacheThreadPoolSize",
        value(cluster.marshaller_cache_thread_pool_size),
    );
    buf.request_empty_line();
    Ok(())
}

fn cluster_metrics(buf: &mut OutputBuffer, cluster: &Cluster) {
    property(buf, "cfg", "metricsExpireTime", value(cluster.metrics_expire_time));
    property(buf, "cfg", "metricsHistorySize", value(cluster.metrics_history_size));
    property(buf, "cfg", "metricsLogFrequency", value(cluster.metrics_log_frequency));
    property(buf, "cfg", "metricsUpdateFrequency", value(cluster.metrics_update_frequency));
    buf.request_empty_line();
}

fn cluster_p2p(buf: &mut OutputBuffer, cluster: &Cluster) {
    let Some(enabled) = cluster.peer_class_loading_enabled else {
        return;
    };

    property(buf, "cfg", "peerClassLoadingEnabled", Some(Value::Bool(enabled)));
    if enabled {
        property(
            buf,
            "cfg",
            "peerClassLoadingMissedResourcesCacheSize",
            value(cluster.peer_class_loading_missed_resources_cache_size),
        );
        property(
            buf,
            "cfg",
            "peerClassLoadingThreadPoolSize",
            value(cluster.peer_class_loading_thread_pool_size),
        );
        multiparam_property(
            buf,
            "cfg",
            "peerClassLoadingLocalClassPathExclude",
            &cluster.peer_class_loading_local_class_path_exclude,
            false,
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
        bean_property(buf, "cfg", source, "swapSpaceSpi", "swapSpi", desc, true);
        buf.request_empty_line();
    }
    Ok(())
}

fn cluster_time(buf: &mut OutputBuffer, cluster: &Cluster) {
    property(buf, "cfg", "clockSyncSamples", value(cluster.clock_sync_samples));
    property(buf, "cfg", "clockSyncFrequency", value(cluster.clock_sync_frequency));
    property(buf, "cfg", "timeServerPortBase", value(cluster.time_server_port_base));
    property(buf, "cfg", "timeServerPortRange", value(cluster.time_server_port_range));
    buf.request_empty_line();
}

fn cluster_pools(buf: &mut OutputBuffer, cluster: &Cluster) {
    property(buf, "cfg", "publicThreadPoolSize", value(cluster.public_thread_pool_size));
    property(buf, "cfg", "systemThreadPoolSize", value(cluster.system_thread_pool_size));
    property(buf, "cfg", "managementThreadPoolSize", value(cluster.management_thread_pool_size));
    property(buf, "cfg", "igfsThreadPoolSize", value(cluster.igfs_thread_pool_size));
    buf.request_empty_line();
}

fn cluster_transactions(buf: &mut OutputBuffer, cluster: &Cluster) {
    bean_property(
        buf,
        "cfg",
        as_source(&cluster.transaction_configuration),
        "transactionConfiguration",
        "transactionConfiguration",
        &TRANSACTION_CONFIGURATION,
        false,
    );
    buf.request_empty_line();
}

/// Variable of a per-cache bean. Caches whose names sanitize alike still
/// get distinct variables.
fn cache_bean_variable(buf: &mut OutputBuffer, prefix: &str, cache: &Cache) -> String {
    buf.owned_variable(&to_java_name(prefix, &cache.name), &cache.name)
}

fn cache_general(buf: &mut OutputBuffer, var: &str, cache: &Cache) {
    property(buf, var, "name", Some(Value::Str(&cache.name)));
    property(buf, var, "cacheMode", value(cache.cache_mode));
    property(buf, var, "atomicityMode", value(cache.atomicity_mode));
    if cache.is_partitioned() {
        property(buf, var, "backups", value(cache.backups));
    }
    property(buf, var, "readFromBackup", value(cache.read_from_backup));
    property(buf, var, "copyOnRead", value(cache.copy_on_read));
    property(buf, var, "invalidate", value(cache.invalidate));
    buf.request_empty_line();
}

fn cache_memory(buf: &mut OutputBuffer, var: &str, cache: &Cache) -> Result<(), GenerateError> {
    property(buf, var, "memoryMode", value(cache.memory_mode));
    property(buf, var, "offHeapMaxMemory", value(cache.off_heap_max_memory));
    buf.request_empty_line();

    let eviction_var = cache_bean_variable(buf, "evictionPolicy", cache);
    eviction_policy(
        buf,
        var,
        cache.eviction_policy.as_ref(),
        "evictionPolicy",
        &eviction_var,
    )?;

    property(buf, var, "swapEnabled", value(cache.swap_enabled));
    property(buf, var, "startSize", value(cache.start_size));
    buf.request_empty_line();
    Ok(())
}

fn cache_query(buf: &mut OutputBuffer, var: &str, cache: &Cache) {
    property(buf, var, "sqlOnheapRowCacheSize", value(cache.sql_onheap_row_cache_size));
    property(buf, var, "longQueryWarningTimeout", value(cache.long_query_warning_timeout));

    if !cache.indexed_types.is_empty() {
        let mut args = Vec::with_capacity(cache.indexed_types.len() * 2);
        for pair in &cache.indexed_types {
            args.push(class_code(buf, &pair.key_class));
            args.push(class_code(buf, &pair.value_class));
        }
        buf.empty_line_if_needed();
        buf.line(&format!("{}.setIndexedTypes({});", var, args.join(", ")));
    }

    multiparam_property(buf, var, "sqlFunctionClasses", &cache.sql_function_classes, true);
    property(buf, var, "sqlEscapeAll", value(cache.sql_escape_all));
    buf.request_empty_line();
}

fn cache_store(buf: &mut OutputBuffer, var: &str, cache: &Cache) -> Result<(), GenerateError> {
    if let Some(factory) = &cache.cache_store_factory {
        if let Some((source @ Some(_), desc)) = store_factory(factory)? {
            let sf_var = cache_bean_variable(buf, "storeFactory", cache);
            let mut ds_var = None;

            if let Some(ds) = factory.data_source() {
                let name =
                    buf.owned_variable(&to_java_name("dataSource", &ds.bean_id), &ds.bean_id);
                let class = ds.dialect.data_source_class();

                if buf.register_datasource(ds) {
                    buf.request_empty_line();
                    let new = buf.need_new_variable(&name);
                    declare_variable(buf, new, &name, class);
                    buf.empty_line_if_needed();
                    buf.line(&format!("{}.setURL(\"YOUR_JDBC_URL\");", name));
                    buf.line(&format!("{}.setUser(\"YOUR_USER_NAME\");", name));
                    buf.line(&format!("{}.setPassword(\"YOUR_PASSWORD\");", name));
                    buf.request_empty_line();
                }
                ds_var = Some(name);
            }

            let declared = bean_property(buf, var, source, "cacheStoreFactory", &sf_var, desc, true)
                && source.is_some_and(|s| desc.has_any(s));

            if let (Some(ds_var), true) = (ds_var, declared) {
                buf.line(&format!("{}.setDataSource({});", sf_var, ds_var));
            }
            buf.request_empty_line();
        }
    }

    property(buf, var, "loadPreviousValue", value(cache.load_previous_value));
    property(buf, var, "readThrough", value(cache.read_through));
    property(buf, var, "writeThrough", value(cache.write_through));
    buf.request_empty_line();

    property(buf, var, "writeBehindEnabled", value(cache.write_behind_enabled));
    property(buf, var, "writeBehindBatchSize", value(cache.write_behind_batch_size));
    property(buf, var, "writeBehindFlushSize", value(cache.write_behind_flush_size));
    property(buf, var, "writeBehindFlushFrequency", value(cache.write_behind_flush_frequency));
    property(buf, var, "writeBehindFlushThreadCount", value(cache.write_behind_flush_thread_count));
    buf.request_empty_line();
    Ok(())
}

fn cache_concurrency(buf: &mut OutputBuffer, var: &str, cache: &Cache) {
    property(
        buf,
        var,
        "maxConcurrentAsyncOperations",
        value(cache.max_concurrent_async_operations),
    );
    property(buf, var, "defaultLockTimeout", value(cache.default_lock_timeout));
    property(buf, var, "atomicWriteOrderMode", value(cache.atomic_write_order_mode));
    buf.request_empty_line();
}

fn cache_rebalance(buf: &mut OutputBuffer, var: &str, cache: &Cache) {
    if cache.is_local() {
        return;
    }
    property(buf, var, "rebalanceMode", value(cache.rebalance_mode));
    property(buf, var, "rebalanceThreadPoolSize", value(cache.rebalance_thread_pool_size));
    property(buf, var, "rebalanceBatchSize", value(cache.rebalance_batch_size));
    property(buf, var, "rebalanceOrder", value(cache.rebalance_order));
    property(buf, var, "rebalanceDelay", value(cache.rebalance_delay));
    property(buf, var, "rebalanceTimeout", value(cache.rebalance_timeout));
    property(buf, var, "rebalanceThrottle", value(cache.rebalance_throttle));
    buf.request_empty_line();
}

fn cache_server_near_cache(
    buf: &mut OutputBuffer,
    var: &str,
    cache: &Cache,
) -> Result<(), GenerateError> {
    if !cache.near_cache_active() {
        return Ok(());
    }

    let near_var = cache_bean_variable(buf, "nearConfiguration", cache);
    let eviction_var = cache_bean_variable(buf, "nearEvictionPolicy", cache);
    buf.request_empty_line();
    near_configuration(buf, &near_var, cache.near_configuration.as_ref(), &eviction_var)?;

    buf.empty_line_if_needed();
    buf.line(&format!("{}.setNearConfiguration({});", var, near_var));
    buf.request_empty_line();
    Ok(())
}

fn cache_statistics(buf: &mut OutputBuffer, var: &str, cache: &Cache) {
    property(buf, var, "statisticsEnabled", value(cache.statistics_enabled));
    property(buf, var, "managementEnabled", value(cache.management_enabled));
    buf.request_empty_line();
}

fn metadata_query_fields(buf: &mut OutputBuffer, prop: &str, fields: &[QueryField]) {
    if fields.is_empty() {
        return;
    }

    let new = buf.need_new_variable(prop);
    declare_generic(
        buf,
        new,
        prop,
        "java.util.Map",
        "java.util.LinkedHashMap",
        &["java.lang.String", "java.lang.Class<?>"],
    );

    buf.empty_line_if_needed();
    for field in fields {
        let class = class_code(buf, &field.class_name);
        buf.line(&format!("{}.put({}, {});", prop, java_string(&field.name), class));
    }

    buf.blank_line();
    buf.line(&format!("typeMeta.{}({});", setter_name(prop), prop));
    buf.request_empty_line();
}

fn metadata_groups(buf: &mut OutputBuffer, meta: &CacheTypeMetadata) {
    let groups: Vec<&FieldGroup> = meta.groups.iter().filter(|g| !g.fields.is_empty()).collect();
    if groups.is_empty() {
        return;
    }

    let map = buf.import_class("java.util.Map");
    let linked = buf.import_class("java.util.LinkedHashMap");
    let tuple = buf.import_class(IGNITE_BI_TUPLE);
    let items_type = format!("{}<String, {}<Class<?>, Boolean>>", linked, tuple);

    buf.empty_line_if_needed();
    let decl = if buf.need_new_variable("groups") {
        format!("{}<String, {}> ", map, items_type)
    } else {
        String::new()
    };
    buf.line(&format!("{}groups = new {}<>();", decl, linked));

    for group in groups {
        buf.blank_line();
        let decl = if buf.need_new_variable("groupItems") {
            format!("{} ", items_type)
        } else {
            String::new()
        };
        buf.line(&format!("{}groupItems = new {}<>();", decl, linked));

        for field in &group.fields {
            let class = class_code(buf, &field.class_name);
            buf.line(&format!(
                "groupItems.put({}, new {}<Class<?>, Boolean>({}, {}));",
                java_string(&field.name),
                tuple,
                class,
                field.direction
            ));
        }
        buf.line(&format!("groups.put({}, groupItems);", java_string(&group.name)));
    }

    buf.blank_line();
    buf.line("typeMeta.setGroups(groups);");
    buf.request_empty_line();
}

fn metadata_database_fields(buf: &mut OutputBuffer, prop: &str, fields: &[JdbcFieldMapping]) {
    if fields.is_empty() {
        return;
    }

    let new = buf.need_new_variable(prop);
    declare_generic(
        buf,
        new,
        prop,
        "java.util.Collection",
        "java.util.ArrayList",
        &[CACHE_TYPE_FIELD_METADATA],
    );

    let field_type = buf.import_class(CACHE_TYPE_FIELD_METADATA);
    let types = buf.import_class("java.sql.Types");
    buf.empty_line_if_needed();
    for field in fields {
        let java_type = class_code(buf, &field.java_type);
        buf.line(&format!(
            "{}.add(new {}({}, {}.{}, {}, {}));",
            prop,
            field_type,
            java_string(&field.database_name),
            types,
            field.database_type,
            java_string(&field.java_name),
            java_type
        ));
    }

    buf.blank_line();
    buf.line(&format!("typeMeta.{}({});", setter_name(prop), prop));
    buf.request_empty_line();
}

fn cache_metadata(buf: &mut OutputBuffer, meta: &CacheTypeMetadata) {
    let new = buf.need_new_variable("typeMeta");
    declare_variable(buf, new, "typeMeta", CACHE_TYPE_METADATA);

    class_name_property(buf, "typeMeta", "keyType", meta.key_type.as_deref());
    class_name_property(buf, "typeMeta", "valueType", meta.value_type.as_deref());
    buf.request_empty_line();

    metadata_query_fields(buf, "queryFields", &meta.query_fields);
    metadata_query_fields(buf, "ascendingFields", &meta.ascending_fields);
    metadata_query_fields(buf, "descendingFields", &meta.descending_fields);
    list_property(buf, "typeMeta", "textFields", list(&meta.text_fields));
    metadata_groups(buf, meta);
    buf.request_empty_line();

    property(buf, "typeMeta", "databaseSchema", text(&meta.database_schema));
    property(buf, "typeMeta", "databaseTable", text(&meta.database_table));
    if meta.maps_key_fields() {
        metadata_database_fields(buf, "keyFields", &meta.key_fields);
    }
    metadata_database_fields(buf, "valueFields", &meta.value_fields);

    buf.request_empty_line();
    buf.empty_line_if_needed();
    buf.line("types.add(typeMeta);");
    buf.request_empty_line();
}

fn cache_metadatas(buf: &mut OutputBuffer, var: &str, cache: &Cache) {
    let metas = distinct_metadata(cache);
    if metas.is_empty() {
        return;
    }

    let new = buf.need_new_variable("types");
    declare_generic(
        buf,
        new,
        "types",
        "java.util.Collection",
        "java.util.ArrayList",
        &[CACHE_TYPE_METADATA],
    );

    for meta in metas {
        cache_metadata(buf, meta);
    }

    buf.empty_line_if_needed();
    buf.line(&format!("{}.setTypeMetadata(types);", var));
    buf.request_empty_line();
}

/// Statements configuring the cache held in `var`.
pub fn cache(buf: &mut OutputBuffer, var: &str, cache: &Cache) -> Result<(), GenerateError> {
    cache_general(buf, var, cache);
    cache_memory(buf, var, cache)?;
    cache_query(buf, var, cache);
    cache_store(buf, var, cache)?;
    cache_concurrency(buf, var, cache);
    cache_rebalance(buf, var, cache);
    cache_server_near_cache(buf, var, cache)?;
    cache_statistics(buf, var, cache);
    cache_metadatas(buf, var, cache);
    Ok(())
}

fn cluster_caches(buf: &mut OutputBuffer, caches: &[Cache]) -> Result<(), GenerateError> {
    if caches.is_empty() {
        return Ok(());
    }

    let mut names = Vec::with_capacity(caches.len());
    for c in caches {
        let var = cache_bean_variable(buf, "cache", c);
        let new = buf.need_new_variable(&var);
        declare_variable(buf, new, &var, CACHE_CONFIGURATION);
        cache(buf, &var, c)?;
        names.push(var);
        buf.request_empty_line();
    }

    buf.empty_line_if_needed();
    buf.line(&format!("cfg.setCacheConfiguration({});", names.join(", ")));
    buf.request_empty_line();
    Ok(())
}

/// Java source for `cluster`. With `factory_class` the statements are
/// wrapped in `ConfigurationFactory` and preceded by the import block.
pub fn cluster(
    cluster: &Cluster,
    factory_class: bool,
    client_near: Option<&NearCacheConfiguration>,
    banner: &str,
) -> Result<String, GenerateError> {
    debug!(
        cluster = %cluster.name,
        factory_class,
        client = client_near.is_some(),
        "rendering java"
    );

    let mut buf = OutputBuffer::new();

    if factory_class {
        buf.line("/**");
        buf.line(&format!(" * {}", banner));
        buf.line(" */");
        buf.start_block("public class ConfigurationFactory {");
        buf.line("/**");
        buf.line(" * Configure grid.");
        buf.line(" */");
        let cfg_type = buf.import_class(IGNITE_CONFIGURATION);
        buf.start_block(&format!("public {} createConfiguration() {{", cfg_type));
    } else if let Some(near) = client_near {
        near_configuration(&mut buf, CLIENT_NEAR_VAR, Some(near), "nearEvictionPolicy")?;
    }

    cluster_general(&mut buf, cluster, client_near.is_some())?;
    cluster_atomics(&mut buf, cluster);
    cluster_communication(&mut buf, cluster);
    cluster_deployment(&mut buf, cluster);
    cluster_events(&mut buf, cluster);
    cluster_marshaller(&mut buf, cluster)?;
    cluster_metrics(&mut buf, cluster);
    cluster_p2p(&mut buf, cluster);
    cluster_swap(&mut buf, cluster)?;
    cluster_time(&mut buf, cluster);
    cluster_pools(&mut buf, cluster);
    cluster_transactions(&mut buf, cluster);
    cluster_caches(&mut buf, &cluster.caches)?;

    if !factory_class {
        return Ok(buf.into_string());
    }

    buf.request_empty_line();
    buf.empty_line_if_needed();
    buf.line("return cfg;");
    buf.end_block("}");

    if let Some(near) = client_near {
        let near_type = buf.import_class(NEAR_CACHE_CONFIGURATION);
        buf.blank_line();
        buf.line("/**");
        buf.line(" * Configure client near cache.");
        buf.line(" */");
        buf.start_block(&format!("public {} createNearCacheConfiguration() {{", near_type));
        near_configuration(&mut buf, CLIENT_NEAR_VAR, Some(near), "nearEvictionPolicy")?;
        buf.empty_line_if_needed();
        buf.line(&format!("return {};", CLIENT_NEAR_VAR));
        buf.end_block("}");
    }

    buf.end_block("}");

    Ok(format!("{}\n\n{}", buf.generate_imports(), buf.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster_from(json: &str) -> Cluster {
        serde_json::from_str(json).unwrap()
    }

    fn snippet(json: &str) -> String {
        cluster(&cluster_from(json), false, None, BANNER).unwrap()
    }

    #[test]
    fn strings_are_quoted_and_escaped() {
        assert_eq!(java_string(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(java_string(r"C:\tmp"), r#""C:\\tmp""#);
    }

    #[test]
    fn control_characters_are_escaped() {
        assert_eq!(java_string("a\n b\r\tc"), r#""a\n b\r\tc""#);
        assert_eq!(java_string("x\u{1}"), r#""x\u0001""#);

        let java = snippet(
            r#"{"name":"c","caches":[{"name":"a","cacheStoreFactory":{"kind":"CacheJdbcBlobStoreFactory",
                "CacheJdbcBlobStoreFactory":{"createTableQuery":"create table T (\n id int)"}}}]}"#,
        );
        assert!(java.contains(
            r#"storeFactoryA.setCreateTableQuery("create table T (\n id int)");"#
        ));
    }

    #[test]
    fn values_render_as_java_literals() {
        let mut buf = OutputBuffer::new();
        assert_eq!(java_code(&mut buf, Value::Float(0.5)).unwrap(), "0.5f");
        assert_eq!(java_code(&mut buf, Value::Int(42)).unwrap(), "42");
        assert_eq!(
            java_code(&mut buf, CacheMode::Partitioned.into()).unwrap(),
            "CacheMode.PARTITIONED"
        );
        assert_eq!(buf.generate_imports(), "import org.apache.ignite.cache.CacheMode;");
    }

    #[test]
    fn snippet_starts_with_configuration_declaration() {
        let java = snippet(r#"{"name":"c"}"#);
        assert!(java.starts_with("IgniteConfiguration cfg = new IgniteConfiguration();\n"));
        assert!(!java.contains("import "));
    }

    #[test]
    fn discovery_is_configured_through_ip_finder() {
        let java = snippet(
            r#"{"name":"c","discovery":{"kind":"Vm","Vm":{"addresses":["127.0.0.1:47500..47510"]}}}"#,
        );
        assert!(java.contains("TcpDiscoverySpi discovery = new TcpDiscoverySpi();"));
        assert!(java.contains("TcpDiscoveryVmIpFinder ipFinder = new TcpDiscoveryVmIpFinder();"));
        assert!(java.contains("ipFinder.setAddresses(Arrays.asList(\"127.0.0.1:47500..47510\"));"));
        assert!(java.contains("discovery.setIpFinder(ipFinder);"));
        assert!(java.contains("cfg.setDiscoverySpi(discovery);"));
    }

    #[test]
    fn transaction_isolation_uses_default_tx_setter() {
        let java = snippet(
            r#"{"name":"c","transactionConfiguration":{"transactionIsolation":"SERIALIZABLE"}}"#,
        );
        assert!(java.contains(
            "transactionConfiguration.setDefaultTxIsolation(TransactionIsolation.SERIALIZABLE);"
        ));
        assert!(java.contains("cfg.setTransactionConfiguration(transactionConfiguration);"));
    }

    #[test]
    fn swap_sparsity_is_a_float_literal() {
        let java = snippet(
            r#"{"name":"c","swapSpaceSpi":{"kind":"FileSwapSpaceSpi","FileSwapSpaceSpi":{"maximumSparsity":0.75}}}"#,
        );
        assert!(java.contains("swapSpi.setMaximumSparsity(0.75f);"));
        assert!(java.contains("cfg.setSwapSpaceSpi(swapSpi);"));
    }

    #[test]
    fn jdk_marshaller_is_created_inline_once() {
        let java = snippet(r#"{"name":"c","marshaller":{"kind":"JdkMarshaller"}}"#);
        assert_eq!(java.matches("setMarshaller").count(), 1);
        assert!(java.contains("cfg.setMarshaller(new JdkMarshaller());"));
    }

    #[test]
    fn multiple_event_groups_are_copied_into_one_array() {
        let java =
            snippet(r#"{"name":"c","includeEventTypes":["EVTS_CACHE","EVTS_TASK_EXECUTION"]}"#);
        assert!(java.contains(
            "int[] events = \
             new int[EventType.EVTS_CACHE.length + EventType.EVTS_TASK_EXECUTION.length];"
        ));
        assert!(java.contains(
            "System.arraycopy(EventType.EVTS_CACHE, 0, events, k, EventType.EVTS_CACHE.length);"
        ));
        assert!(java.contains("cfg.setIncludeEventTypes(events);"));
    }

    #[test]
    fn caches_are_registered_together() {
        let java = snippet(r#"{"name":"c","caches":[{"name":"first"},{"name":"second-cache"}]}"#);
        assert!(java.contains("CacheConfiguration cacheFirst = new CacheConfiguration();"));
        assert!(java.contains("cacheSecond_cache.setName(\"second-cache\");"));
        assert!(java.contains("cfg.setCacheConfiguration(cacheFirst, cacheSecond_cache);"));
    }

    #[test]
    fn datasource_is_declared_once_across_caches() {
        let store = r#"{"kind":"CacheJdbcPojoStoreFactory",
            "CacheJdbcPojoStoreFactory":{"dataSourceBean":"ds","dialect":"Oracle"}}"#;
        let json = format!(
            r#"{{"name":"c","caches":[{{"name":"a","cacheStoreFactory":{0}}},{{"name":"b","cacheStoreFactory":{0}}}]}}"#,
            store
        );
        let java = snippet(&json);
        assert_eq!(
            java.matches("OracleDataSource dataSourceDs = new OracleDataSource();")
                .count(),
            1
        );
        assert!(java.contains("storeFactoryA.setDialect(new OracleDialect());"));
        assert!(java.contains("storeFactoryA.setDataSource(dataSourceDs);"));
        assert!(java.contains("storeFactoryB.setDataSource(dataSourceDs);"));
    }

    #[test]
    fn datasources_with_similar_ids_get_distinct_variables() {
        let java = snippet(
            r#"{"name":"c","caches":[
                {"name":"a","cacheStoreFactory":{"kind":"CacheJdbcPojoStoreFactory",
                    "CacheJdbcPojoStoreFactory":{"dataSourceBean":"ds-1","dialect":"H2"}}},
                {"name":"b","cacheStoreFactory":{"kind":"CacheJdbcPojoStoreFactory",
                    "CacheJdbcPojoStoreFactory":{"dataSourceBean":"ds.1","dialect":"MySQL"}}}]}"#,
        );
        assert!(java.contains("JdbcDataSource dataSourceDs_1 = new JdbcDataSource();"));
        assert!(java.contains("MysqlDataSource dataSourceDs_12 = new MysqlDataSource();"));
        assert!(java.contains("storeFactoryA.setDataSource(dataSourceDs_1);"));
        assert!(java.contains("storeFactoryB.setDataSource(dataSourceDs_12);"));
    }

    #[test]
    fn caches_with_similar_names_get_distinct_variables() {
        let java = snippet(r#"{"name":"c","caches":[{"name":"a-b"},{"name":"a.b"}]}"#);
        assert!(java.contains("CacheConfiguration cacheA_b = new CacheConfiguration();"));
        assert!(java.contains("CacheConfiguration cacheA_b2 = new CacheConfiguration();"));
        assert!(java.contains("cacheA_b2.setName(\"a.b\");"));
        assert!(java.contains("cfg.setCacheConfiguration(cacheA_b, cacheA_b2);"));
    }

    #[test]
    fn pojo_store_without_bean_id_has_no_datasource_variable() {
        let java = snippet(
            r#"{"name":"c","caches":[{"name":"a","cacheStoreFactory":{"kind":"CacheJdbcPojoStoreFactory",
                "CacheJdbcPojoStoreFactory":{"dialect":"H2"}}}]}"#,
        );
        assert!(java.contains("storeFactoryA.setDialect(new H2Dialect());"));
        assert!(!java.contains("dataSource"));
    }

    #[test]
    fn hibernate_properties_become_java_properties() {
        let java = snippet(
            r#"{"name":"c","caches":[{"name":"a","cacheStoreFactory":{"kind":"CacheHibernateBlobStoreFactory",
                "CacheHibernateBlobStoreFactory":{"hibernateProperties":["connection.url=jdbc:h2:mem:", "broken"]}}}]}"#,
        );
        assert!(java.contains("Properties props = new Properties();"));
        assert!(java.contains("props.setProperty(\"connection.url\", \"jdbc:h2:mem:\");"));
        assert!(!java.contains("broken"));
        assert!(java.contains("storeFactoryA.setHibernateProperties(props);"));
    }

    #[test]
    fn metadata_variables_are_reused_between_types() {
        let java = snippet(
            r#"{"name":"c","caches":[{"name":"a","queryMetadata":[
                {"name":"P","keyType":"Long","valueType":"com.example.Person","queryFields":[{"name":"age","className":"Integer"}]},
                {"name":"O","keyType":"Long","valueType":"com.example.Org","queryFields":[{"name":"name","className":"String"}]}]}]}"#,
        );
        assert_eq!(
            java.matches("CacheTypeMetadata typeMeta = new CacheTypeMetadata();")
                .count(),
            1
        );
        assert_eq!(java.matches("typeMeta = new CacheTypeMetadata();").count(), 2);
        assert!(java.contains("Map<String, Class<?>> queryFields = new LinkedHashMap<>();"));
        assert!(java.contains("queryFields.put(\"age\", Integer.class);"));
        assert_eq!(java.matches("types.add(typeMeta);").count(), 2);
        assert!(java.contains("cacheA.setTypeMetadata(types);"));
    }

    #[test]
    fn factory_class_wraps_statements() {
        let java = cluster(&cluster_from(r#"{"name":"c"}"#), true, None, BANNER).unwrap();
        assert!(java.starts_with(
            "import org.apache.ignite.configuration.IgniteConfiguration;\n\n\
             /**\n * This configuration was generated by gridcfg\n */\n\
             public class ConfigurationFactory {\n"
        ));
        assert!(java.contains(
            "    public IgniteConfiguration createConfiguration() {\n        \
             IgniteConfiguration cfg = new IgniteConfiguration();\n"
        ));
        assert!(java.ends_with("        return cfg;\n    }\n}\n"));
    }

    #[test]
    fn client_factory_adds_near_cache_method() {
        let near = NearCacheConfiguration {
            near_start_size: Some(100),
            ..Default::default()
        };
        let java = cluster(&cluster_from(r#"{"name":"c"}"#), true, Some(&near), BANNER).unwrap();
        assert!(java.contains("cfg.setClientMode(true);"));
        assert!(java.contains("public NearCacheConfiguration createNearCacheConfiguration() {"));
        assert!(java.contains("nearCacheCfg.setNearStartSize(100);"));
        assert!(java.contains("return nearCacheCfg;"));
    }
}

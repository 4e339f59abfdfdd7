use chrono::{TimeZone, Utc};
use gridcfg_gen::{GenerateError, GenerateOptions, bundle, bundle_name, generate};
use gridcfg_models::{Cluster, EvictionKind, EvictionLimits, EvictionPolicy, NearCacheConfiguration};

fn server_cluster() -> Cluster {
    Cluster::from_json(include_str!("fixtures/server.json")).unwrap()
}

fn client_cluster() -> Cluster {
    Cluster::from_yaml(include_str!("fixtures/client.yaml")).unwrap()
}

fn client_options() -> GenerateOptions {
    GenerateOptions {
        client_near: Some(NearCacheConfiguration {
            near_start_size: Some(128),
            near_eviction_policy: Some(EvictionPolicy {
                kind: Some(EvictionKind::Lru),
                lru: Some(EvictionLimits {
                    max_size: Some(1000),
                    ..Default::default()
                }),
                ..Default::default()
            }),
        }),
        ..Default::default()
    }
}

#[test]
fn local_cache_skips_rebalance_and_backups() {
    let xml = generate(&server_cluster(), "xml", &GenerateOptions::default()).unwrap();

    assert_eq!(xml.matches("<property name=\"backups\" value=\"1\"/>").count(), 1);
    assert_eq!(xml.matches("name=\"backups\"").count(), 1);
    assert_eq!(xml.matches("name=\"rebalanceMode\"").count(), 1);
    assert!(!xml.contains("rebalanceBatchSize"));

    let java = generate(&server_cluster(), "java", &GenerateOptions::default()).unwrap();
    assert!(java.contains("cachePeople.setBackups(1);"));
    assert!(!java.contains("cacheSessions.setBackups"));
    assert!(!java.contains("cacheSessions.setRebalance"));
}

#[test]
fn shared_datasource_is_declared_once() {
    let xml = generate(&server_cluster(), "xml", &GenerateOptions::default()).unwrap();
    assert_eq!(xml.matches("<bean id=\"ds1\"").count(), 1);
    assert!(xml.contains("value=\"${ds1.jdbc.url}\""));
    assert!(xml.contains("classpath:secret.properties"));

    let props = generate(&server_cluster(), "properties", &GenerateOptions::default()).unwrap();
    assert_eq!(props.matches("ds1.jdbc.url=").count(), 1);
}

#[test]
fn metadata_in_both_lists_is_emitted_once() {
    let xml = generate(&server_cluster(), "xml", &GenerateOptions::default()).unwrap();
    assert_eq!(
        xml.matches("<bean class=\"org.apache.ignite.cache.CacheTypeMetadata\">").count(),
        1
    );
    // Long keys are built-in, so only value columns are mapped.
    assert!(!xml.contains("name=\"keyFields\""));
    assert!(xml.contains("name=\"valueFields\""));
}

#[test]
fn lru_with_max_size_only_emits_max_size() {
    let xml = generate(&server_cluster(), "xml", &GenerateOptions::default()).unwrap();
    let expected = [
        "                    <property name=\"evictionPolicy\">",
        "                        <bean class=\"org.apache.ignite.cache.eviction.lru.LruEvictionPolicy\">",
        "                            <property name=\"maxSize\" value=\"1000\"/>",
        "                        </bean>",
        "                    </property>",
    ]
    .join("\n");
    assert!(xml.contains(&expected), "{}", xml);
    assert!(!xml.contains("maxMemorySize"));
    assert!(!xml.contains("batchSize"));
}

#[test]
fn vm_discovery_has_single_address() {
    let xml = generate(&server_cluster(), "xml", &GenerateOptions::default()).unwrap();
    assert_eq!(xml.matches("TcpDiscoveryVmIpFinder").count(), 1);
    assert_eq!(xml.matches("<value>").count(), 1);
    assert!(xml.contains("<value>127.0.0.1:47500..47510</value>"));
}

#[test]
fn shared_deployment_mode_is_not_written() {
    let xml = generate(&server_cluster(), "xml", &GenerateOptions::default()).unwrap();
    assert!(!xml.contains("deploymentMode"));
}

#[test]
fn client_mode_sets_flag_and_near_cache_bean() {
    let cluster = client_cluster();
    let options = client_options();

    let xml = generate(&cluster, "xml", &options).unwrap();
    assert!(xml.contains("<bean id=\"nearCacheBean\""));
    assert!(xml.contains("<property name=\"clientMode\" value=\"true\"/>"));
    assert!(xml.find("nearCacheBean").unwrap() < xml.find("IgniteConfiguration").unwrap());

    let factory = generate(&cluster, "factory", &options).unwrap();
    assert!(factory.contains("cfg.setClientMode(true);"));
    assert!(factory.contains("createNearCacheConfiguration()"));

    let server = generate(&cluster, "xml", &GenerateOptions::default()).unwrap();
    assert!(!server.contains("clientMode"));
    assert!(!server.contains("nearCacheBean"));
}

#[test]
fn output_is_deterministic_without_timestamp() {
    let cluster = server_cluster();
    let options = GenerateOptions::default();
    for format in ["xml", "java-snippet", "java-factory-class", "dockerfile", "properties"] {
        assert_eq!(
            generate(&cluster, format, &options).unwrap(),
            generate(&cluster, format, &options).unwrap(),
            "{}",
            format
        );
    }
}

#[test]
fn timestamp_is_stamped_into_banner() {
    let options = GenerateOptions {
        generated_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()),
        ..Default::default()
    };
    let docker = generate(&server_cluster(), "dockerfile", &options).unwrap();
    assert!(docker.starts_with(
        "# This configuration was generated by gridcfg (2024-05-01 08:30:00)\n"
    ));
}

#[test]
fn unknown_format_is_rejected() {
    let err = generate(&server_cluster(), "toml", &GenerateOptions::default()).unwrap_err();
    assert!(matches!(err, GenerateError::UnknownFormat(f) if f == "toml"));
}

#[test]
fn server_bundle_contains_every_artifact() {
    let cluster = server_cluster();
    let artifacts = bundle(&cluster, &GenerateOptions::default()).unwrap();
    let names: Vec<_> = artifacts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Dockerfile",
            "secret.properties",
            "grid.xml",
            "grid.snippet.java",
            "ConfigurationFactory.java"
        ]
    );
    assert_eq!(bundle_name(&cluster, false), "grid-server-configuration");
}

#[test]
fn server_bundle_skips_empty_properties() {
    let artifacts = bundle(&client_cluster(), &GenerateOptions::default()).unwrap();
    assert!(artifacts.iter().all(|a| a.name != "secret.properties"));
    assert!(artifacts.iter().any(|a| a.name == "Dockerfile"));
}

#[test]
fn client_bundle_has_only_configuration() {
    let cluster = client_cluster();
    let artifacts = bundle(&cluster, &client_options()).unwrap();
    let names: Vec<_> = artifacts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["edge.xml", "edge.snippet.java", "ConfigurationFactory.java"]);
    assert_eq!(bundle_name(&cluster, true), "edge-client-configuration");
}

#[test]
fn bundle_rejects_name_escaping_output_directory() {
    let mut cluster = server_cluster();
    cluster.name = "../x".into();
    let err = bundle(&cluster, &GenerateOptions::default()).unwrap_err();
    assert!(matches!(err, GenerateError::InvalidClusterName(name) if name == "../x"));
}

use gridcfg_models::Cluster;
use tracing::{debug, warn};

pub const DEFAULT_OS: &str = "debian:8";

/// Base images the generated Dockerfile is known to work with.
pub const KNOWN_OS: &[&str] = &["debian:8", "ubuntu:14.10"];

const DISTRIBUTION_URL: &str =
    "http://www.us.apache.org/dist/ignite/1.4.0/apache-ignite-fabric-1.4.0-bin.zip";

/// Dockerfile that starts one server node with `<cluster>.xml`.
///
/// Any base image is accepted, the ones outside [`KNOWN_OS`] only log a
/// warning since the package names may differ there.
pub fn cluster_docker(cluster: &Cluster, os: Option<&str>, banner: &str) -> String {
    let os = os.map(str::trim).filter(|os| !os.is_empty()).unwrap_or(DEFAULT_OS);
    if !KNOWN_OS.contains(&os) {
        warn!(os, "unknown base image, package installation may fail");
    }
    debug!(cluster = %cluster.name, os, "rendering dockerfile");

    let config = format!("{}.xml", cluster.name);
    let archive = DISTRIBUTION_URL.rsplit('/').next().unwrap_or(DISTRIBUTION_URL);

    let mut out = Vec::new();
    out.push(format!("# {}", banner));
    out.push(String::new());
    out.push(format!("FROM {}", os));
    out.push(String::new());
    out.push("# Install required packages.".to_string());
    out.push("RUN apt-get update && \\".to_string());
    out.push("    apt-get install -y wget unzip openjdk-7-jdk && \\".to_string());
    out.push("    rm -rf /var/lib/apt/lists/*".to_string());
    out.push(String::new());
    out.push("ENV JAVA_HOME /usr/lib/jvm/java-7-openjdk-amd64".to_string());
    out.push(String::new());
    out.push("WORKDIR /opt".to_string());
    out.push(String::new());
    out.push("# Download and unpack the distribution.".to_string());
    out.push(format!("RUN wget -q {} && \\", DISTRIBUTION_URL));
    out.push(format!("    unzip -q {} && \\", archive));
    out.push(format!("    rm {} && \\", archive));
    out.push("    mv apache-ignite-* ignite".to_string());
    out.push(String::new());
    out.push("ENV IGNITE_HOME /opt/ignite".to_string());
    out.push(String::new());
    out.push("# Copy the cluster configuration.".to_string());
    out.push(format!("COPY {} $IGNITE_HOME/config/{}", config, config));
    out.push(String::new());
    out.push("# Start a node.".to_string());
    out.push(format!(
        "CMD [\"/bin/sh\", \"-c\", \"$IGNITE_HOME/bin/ignite.sh $IGNITE_HOME/config/{}\"]",
        config
    ));
    out.push(String::new());

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(name: &str) -> Cluster {
        Cluster {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_to_debian() {
        let docker = cluster_docker(&cluster("grid"), None, "banner");
        assert!(docker.starts_with("# banner\n\nFROM debian:8\n"));
    }

    #[test]
    fn blank_os_falls_back_to_default() {
        let docker = cluster_docker(&cluster("grid"), Some("  "), "banner");
        assert!(docker.contains("FROM debian:8\n"));
    }

    #[test]
    fn uses_requested_os() {
        let docker = cluster_docker(&cluster("grid"), Some("ubuntu:14.10"), "banner");
        assert!(docker.contains("FROM ubuntu:14.10\n"));

        let docker = cluster_docker(&cluster("grid"), Some("alpine:3"), "banner");
        assert!(docker.contains("FROM alpine:3\n"));
    }

    #[test]
    fn copies_and_starts_cluster_config() {
        let docker = cluster_docker(&cluster("grid"), None, "banner");
        assert!(docker.contains("COPY grid.xml $IGNITE_HOME/config/grid.xml\n"));
        assert!(docker.contains("ignite.sh $IGNITE_HOME/config/grid.xml\"]\n"));
        assert!(docker.contains("unzip -q apache-ignite-fabric-1.4.0-bin.zip"));
    }
}

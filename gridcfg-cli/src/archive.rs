use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use anyhow::{Context, bail};
use flate2::Compression;
use flate2::write::GzEncoder;
use gridcfg_gen::Artifact;
use tracing::info;
use zip::write::SimpleFileOptions;

/// Archive extensions that look like a bundle request but cannot be written.
const UNSUPPORTED_EXTENSIONS: &[&str] = &[".gz", ".bz2", ".tbz", ".xz", ".txz", ".7z", ".rar"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    Directory,
    Zip,
    Tar,
    TarGz,
}

impl ArchiveFormat {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let name = path.to_string_lossy().to_ascii_lowercase();
        if name.ends_with(".zip") {
            Ok(ArchiveFormat::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Ok(ArchiveFormat::TarGz)
        } else if name.ends_with(".tar") {
            Ok(ArchiveFormat::Tar)
        } else if let Some(ext) = UNSUPPORTED_EXTENSIONS.iter().find(|e| name.ends_with(*e)) {
            bail!(
                "unsupported archive extension '{}' for {}, use .zip, .tar, .tar.gz or a directory",
                ext,
                path.display()
            )
        } else {
            Ok(ArchiveFormat::Directory)
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ArchiveFormat::Directory => "directory",
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::TarGz => "tar.gz",
        }
    }
}

/// Writes `artifacts` to `output`. Archive entries are placed under `root`.
pub fn write_artifacts(
    output: &Path,
    root: &str,
    artifacts: &[Artifact],
) -> anyhow::Result<ArchiveFormat> {
    let format = ArchiveFormat::from_path(output)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    match format {
        ArchiveFormat::Directory => write_directory(output, artifacts)?,
        ArchiveFormat::Zip => {
            let file = File::create(output).context("failed to create archive file")?;
            let file = write_zip(file, root, artifacts)?;
            file.sync_all().context("failed to flush archive file")?;
        }
        ArchiveFormat::Tar => {
            let file = File::create(output).context("failed to create archive file")?;
            let file = append_all(tar::Builder::new(file), root, artifacts)?;
            file.sync_all().context("failed to flush archive file")?;
        }
        ArchiveFormat::TarGz => {
            let file = File::create(output).context("failed to create archive file")?;
            let encoder = GzEncoder::new(file, Compression::default());
            let encoder = append_all(tar::Builder::new(encoder), root, artifacts)?;
            encoder.finish().context("failed to finish gzip compression")?;
        }
    }

    info!(
        output = %output.display(),
        format = format.as_str(),
        artifacts = artifacts.len(),
        "bundle written"
    );
    Ok(format)
}

fn write_directory(dir: &Path, artifacts: &[Artifact]) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    for artifact in artifacts {
        let path = dir.join(&artifact.name);
        let mut file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        file.write_all(artifact.content.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

fn write_zip<W: Write + Seek>(
    writer: W,
    root: &str,
    artifacts: &[Artifact],
) -> anyhow::Result<W> {
    let mut zip = zip::ZipWriter::new(writer);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);
    for artifact in artifacts {
        zip.start_file(format!("{}/{}", root, artifact.name), options)
            .with_context(|| format!("failed to add {} to archive", artifact.name))?;
        zip.write_all(artifact.content.as_bytes())
            .with_context(|| format!("failed to write {} to archive", artifact.name))?;
    }
    zip.finish().context("failed to finish zip archive")
}

fn append_all<W: Write>(
    mut builder: tar::Builder<W>,
    root: &str,
    artifacts: &[Artifact],
) -> anyhow::Result<W> {
    for artifact in artifacts {
        let mut header = tar::Header::new_gnu();
        header.set_size(artifact.content.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(
                &mut header,
                format!("{}/{}", root, artifact.name),
                artifact.content.as_bytes(),
            )
            .with_context(|| format!("failed to add {} to archive", artifact.name))?;
    }
    builder.into_inner().context("failed to finish tar archive")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn artifacts() -> Vec<Artifact> {
        vec![
            Artifact {
                name: "grid.xml".into(),
                content: "<beans/>\n".into(),
            },
            Artifact {
                name: "Dockerfile".into(),
                content: "FROM debian:8\n".into(),
            },
        ]
    }

    fn format_of(path: &str) -> ArchiveFormat {
        ArchiveFormat::from_path(Path::new(path)).unwrap()
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(format_of("out"), ArchiveFormat::Directory);
        assert_eq!(format_of("out.zip"), ArchiveFormat::Zip);
        assert_eq!(format_of("OUT.ZIP"), ArchiveFormat::Zip);
        assert_eq!(format_of("out.tar"), ArchiveFormat::Tar);
        assert_eq!(format_of("out.tar.gz"), ArchiveFormat::TarGz);
        assert_eq!(format_of("out.tgz"), ArchiveFormat::TarGz);
    }

    #[test]
    fn unsupported_archive_extension_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("bundle.7z");
        let err = write_artifacts(&out, "bundle", &artifacts()).unwrap_err();
        assert!(err.to_string().contains("unsupported archive extension '.7z'"));
        assert!(!out.exists());
    }

    #[test]
    fn writes_zip_under_root() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("grid.zip");
        let format = write_artifacts(&out, "grid-server-configuration", &artifacts()).unwrap();
        assert_eq!(format, ArchiveFormat::Zip);
        assert!(out.is_file());

        let mut archive = zip::ZipArchive::new(File::open(&out).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
        let mut xml = archive.by_name("grid-server-configuration/grid.xml").unwrap();
        let mut content = String::new();
        xml.read_to_string(&mut content).unwrap();
        assert_eq!(content, "<beans/>\n");
        drop(xml);
        assert!(archive.by_name("grid-server-configuration/Dockerfile").is_ok());
    }

    #[test]
    fn writes_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("bundle");
        write_artifacts(&out, "bundle", &artifacts()).unwrap();
        assert_eq!(std::fs::read_to_string(out.join("grid.xml")).unwrap(), "<beans/>\n");
        assert!(out.join("Dockerfile").exists());
    }

    #[test]
    fn writes_gzipped_tarball_under_root() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("bundle.tgz");
        write_artifacts(&out, "grid-server-configuration", &artifacts()).unwrap();

        let decoder = flate2::read::GzDecoder::new(File::open(&out).unwrap());
        let mut archive = tar::Archive::new(decoder);
        let mut entries = Vec::new();
        for entry in archive.entries().unwrap() {
            let mut entry = entry.unwrap();
            let path = entry.path().unwrap().to_string_lossy().into_owned();
            let mut content = String::new();
            entry.read_to_string(&mut content).unwrap();
            entries.push((path, content));
        }
        assert_eq!(
            entries,
            [
                ("grid-server-configuration/grid.xml".to_string(), "<beans/>\n".to_string()),
                ("grid-server-configuration/Dockerfile".to_string(), "FROM debian:8\n".to_string()),
            ]
        );
    }
}

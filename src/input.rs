//! Reading SQL text from files (optionally compressed) or stdin.

use anyhow::Context;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Compression format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Bzip2,
    Xz,
    Zstd,
}

impl Compression {
    /// Detect compression format from file extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("gz" | "gzip") => Compression::Gzip,
            Some("bz2" | "bzip2") => Compression::Bzip2,
            Some("xz" | "lzma") => Compression::Xz,
            Some("zst" | "zstd") => Compression::Zstd,
            _ => Compression::None,
        }
    }

    /// Wrap a reader with the appropriate decompressor
    pub fn wrap_reader<'a>(&self, reader: Box<dyn Read + 'a>) -> io::Result<Box<dyn Read + 'a>> {
        Ok(match self {
            Compression::None => reader,
            Compression::Gzip => Box::new(flate2::read::GzDecoder::new(reader)),
            Compression::Bzip2 => Box::new(bzip2::read::BzDecoder::new(reader)),
            Compression::Xz => Box::new(xz2::read::XzDecoder::new(reader)),
            Compression::Zstd => Box::new(zstd::stream::read::Decoder::new(reader)?),
        })
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compression::None => write!(f, "none"),
            Compression::Gzip => write!(f, "gzip"),
            Compression::Bzip2 => write!(f, "bzip2"),
            Compression::Xz => write!(f, "xz"),
            Compression::Zstd => write!(f, "zstd"),
        }
    }
}

/// Read all SQL text from `path`, or from stdin when `path` is `-`
pub fn read_sql(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut sql = String::new();
        io::stdin()
            .read_to_string(&mut sql)
            .context("Failed to read SQL from stdin")?;
        return Ok(sql);
    }

    if !path.exists() {
        anyhow::bail!("input file does not exist: {}", path.display());
    }

    let compression = Compression::from_path(path);
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    let mut reader = compression.wrap_reader(Box::new(file))?;

    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read {} ({})", path.display(), compression))?;

    tracing::debug!(bytes = bytes.len(), %compression, "read input");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_compression_from_path() {
        assert_eq!(Compression::from_path(Path::new("dump.sql")), Compression::None);
        assert_eq!(Compression::from_path(Path::new("dump.sql.GZ")), Compression::Gzip);
        assert_eq!(Compression::from_path(Path::new("dump.sql.bz2")), Compression::Bzip2);
        assert_eq!(Compression::from_path(Path::new("dump.sql.xz")), Compression::Xz);
        assert_eq!(Compression::from_path(Path::new("dump.sql.zst")), Compression::Zstd);
    }

    #[test]
    fn test_read_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.sql");
        std::fs::write(&path, "CREATE TABLE t (id INT);").unwrap();
        assert_eq!(read_sql(&path).unwrap(), "CREATE TABLE t (id INT);");
    }

    #[test]
    fn test_read_gzip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.sql.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(b"CREATE TABLE t (id INT);").unwrap();
        encoder.finish().unwrap();

        assert_eq!(read_sql(&path).unwrap(), "CREATE TABLE t (id INT);");
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_sql(Path::new("/nonexistent/schema.sql")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}

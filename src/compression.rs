//! Artifact compression
//!
//! Optional LZ4/ZSTD layer applied to encoded artifacts before they hit the
//! disk. LZ4 and ZSTD require the `compression` feature.

use crate::Result;

/// Compression algorithm for stored artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Store encoded bytes as-is (default)
    #[default]
    None,
    /// LZ4 - Fast compression
    #[cfg(feature = "compression")]
    Lz4,
    /// ZSTD - Better ratio, slower
    #[cfg(feature = "compression")]
    Zstd,
}

impl Compression {
    /// Get algorithm name as string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            #[cfg(feature = "compression")]
            Self::Lz4 => "lz4",
            #[cfg(feature = "compression")]
            Self::Zstd => "zstd",
        }
    }

    /// Suffix appended to the codec extension (`json` -> `json.lz4`)
    #[must_use]
    pub const fn suffix(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            #[cfg(feature = "compression")]
            Self::Lz4 => Some("lz4"),
            #[cfg(feature = "compression")]
            Self::Zstd => Some("zst"),
        }
    }

    /// Compress data using this algorithm
    ///
    /// # Errors
    /// Returns error if compression fails (e.g., ZSTD internal error)
    #[allow(clippy::unnecessary_wraps)]
    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        match self {
            Self::None => Ok(data.to_vec()),
            #[cfg(feature = "compression")]
            Self::Lz4 => Ok(lz4_flex::compress_prepend_size(data)),
            #[cfg(feature = "compression")]
            Self::Zstd => zstd::encode_all(data, 3)
                .map_err(|e| crate::Error::storage("ZSTD compression failed", e)),
        }
    }

    /// Decompress data using this algorithm
    ///
    /// # Errors
    /// Returns error if decompression fails (e.g., corrupted data)
    #[allow(clippy::unnecessary_wraps)]
    pub fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        match self {
            Self::None => Ok(data.to_vec()),
            #[cfg(feature = "compression")]
            Self::Lz4 => lz4_flex::decompress_size_prepended(data)
                .map_err(|e| crate::Error::storage("LZ4 decompression failed", e)),
            #[cfg(feature = "compression")]
            Self::Zstd => zstd::decode_all(data)
                .map_err(|e| crate::Error::storage("ZSTD decompression failed", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_default() {
        assert_eq!(Compression::default(), Compression::None);
        assert_eq!(Compression::None.as_str(), "none");
        assert_eq!(Compression::None.suffix(), None);
    }

    #[test]
    fn test_none_passes_through() {
        let data = b"{\"w\":[1,2,3]}".to_vec();
        assert_eq!(Compression::None.compress(&data).unwrap(), data);
        assert_eq!(Compression::None.decompress(&data).unwrap(), data);
    }

    #[cfg(feature = "compression")]
    #[test]
    fn test_compression_as_str() {
        assert_eq!(Compression::Lz4.as_str(), "lz4");
        assert_eq!(Compression::Zstd.as_str(), "zstd");
        assert_eq!(Compression::Lz4.suffix(), Some("lz4"));
        assert_eq!(Compression::Zstd.suffix(), Some("zst"));
    }

    #[cfg(feature = "compression")]
    #[test]
    fn test_lz4_compress_decompress() {
        let data = b"hello world hello world hello world".to_vec();
        let compressed = Compression::Lz4.compress(&data).unwrap();
        let decompressed = Compression::Lz4.decompress(&compressed).unwrap();
        assert_eq!(decompressed, data);
    }

    #[cfg(feature = "compression")]
    #[test]
    fn test_zstd_compress_decompress() {
        let data = b"hello world hello world hello world".to_vec();
        let compressed = Compression::Zstd.compress(&data).unwrap();
        let decompressed = Compression::Zstd.decompress(&compressed).unwrap();
        assert_eq!(decompressed, data);
    }

    #[cfg(feature = "compression")]
    #[test]
    fn test_empty_data_compression() {
        for compression in [Compression::Lz4, Compression::Zstd] {
            let compressed = compression.compress(&[]).unwrap();
            assert!(compressed.is_empty());
            assert!(compression.decompress(&compressed).unwrap().is_empty());
        }
    }

    #[cfg(feature = "compression")]
    #[test]
    fn test_corrupted_lz4_is_storage_error() {
        let result = Compression::Lz4.decompress(&[0x10, 0x00, 0x00, 0x00, 0xff]);
        assert!(matches!(result, Err(crate::Error::Storage { .. })));
    }
}

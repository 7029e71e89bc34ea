//! Manifest scanning: find nested manifest and segment references in a playlist body.
//!
//! A reference is a non-comment line whose text ends with a known suffix,
//! optionally followed by a query string. Matches are resolved against the
//! manifest's own URL.

mod scan;

pub use scan::{find_references, ReferencePattern};

/// Scanner for both reference kinds.
#[derive(Debug, Clone)]
pub struct ManifestScanner {
    manifest: ReferencePattern,
    segment: ReferencePattern,
}

/// References found in one manifest body, in line order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub manifests: Vec<String>,
    pub segments: Vec<String>,
}

impl ManifestScanner {
    pub fn new(manifest_suffix: &str, segment_suffix: &str) -> Self {
        Self {
            manifest: ReferencePattern::new(manifest_suffix),
            segment: ReferencePattern::new(segment_suffix),
        }
    }

    /// Scans `content` for both kinds of reference, resolving against `base_url`.
    pub fn scan(&self, content: &str, base_url: &str) -> ScanResult {
        ScanResult {
            manifests: find_references(content, base_url, &self.manifest),
            segments: find_references(content, base_url, &self.segment),
        }
    }
}

impl Default for ManifestScanner {
    fn default() -> Self {
        Self::new(".m3u8", ".ts")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: &str = "#EXTM3U
#EXT-X-STREAM-INF:BANDWIDTH=800000,RESOLUTION=640x360
360p/index.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=1400000,RESOLUTION=1280x720
/abs/720p.m3u8?token=abc
#EXT-X-STREAM-INF:BANDWIDTH=2800000
https://other.test/1080p.m3u8
";

    const MEDIA: &str = "#EXTM3U
#EXT-X-TARGETDURATION:10
#EXT-X-KEY:METHOD=AES-128,URI=\"key.ts\"
#EXTINF:10.0,
seg0.ts
#EXTINF:10.0,
../shared/seg1.ts?sig=xyz
  # commented.ts
#EXTINF:10.0,
https://cdn.test/seg2.ts
#EXT-X-ENDLIST
";

    #[test]
    fn master_yields_resolved_variants() {
        let scanner = ManifestScanner::default();
        let result = scanner.scan(MASTER, "https://x.test/live/master.m3u8");
        assert_eq!(
            result.manifests,
            vec![
                "https://x.test/live/360p/index.m3u8",
                "https://x.test/abs/720p.m3u8?token=abc",
                "https://other.test/1080p.m3u8",
            ]
        );
        assert!(result.segments.is_empty());
    }

    #[test]
    fn media_yields_resolved_segments_and_skips_comments() {
        let scanner = ManifestScanner::default();
        let result = scanner.scan(MEDIA, "https://x.test/live/360p/index.m3u8?token=abc");
        assert!(result.manifests.is_empty());
        assert_eq!(
            result.segments,
            vec![
                "https://x.test/live/360p/seg0.ts",
                "https://x.test/live/shared/seg1.ts?sig=xyz",
                "https://cdn.test/seg2.ts",
            ]
        );
    }

    #[test]
    fn custom_segment_suffix() {
        let scanner = ManifestScanner::new(".m3u8", ".m4s");
        let result = scanner.scan("#EXTINF:4,\nchunk-1.m4s\nold.ts\n", "https://x.test/v.m3u8");
        assert_eq!(result.segments, vec!["https://x.test/chunk-1.m4s"]);
    }
}

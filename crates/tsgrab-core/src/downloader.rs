//! Sequential fragment download into a single output file.
//!
//! Fragments are requested one at a time in manifest order and their bodies
//! appended verbatim. The first failure aborts the run; whatever was written
//! before it stays on disk under the final name.

use crate::error::{GrabError, GrabResult};
use crate::http::{HttpClient, HttpError};
use crate::progress::{ProgressStats, Reporter};
use crate::url_template::UrlTemplate;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Downloads `fragments` of `video_id` in order, appending each body to
/// `output_path` (created or truncated first). Returns bytes written.
///
/// Body chunks arrive at most `chunk_size` bytes each (the client's receive
/// buffer) and empty chunks are skipped. An empty fragment list produces an
/// empty file without any request.
pub fn download_fragments(
    client: &HttpClient,
    template: &UrlTemplate,
    video_id: &str,
    fragments: &[String],
    output_path: &Path,
    reporter: &mut dyn Reporter,
) -> GrabResult<u64> {
    reporter.status(&format!("Found {} fragments...", fragments.len()));
    tracing::info!(
        video_id = %video_id,
        count = fragments.len(),
        path = %output_path.display(),
        "downloading fragments"
    );

    // Closed on every return path when `out` goes out of scope.
    let mut out = File::create(output_path)
        .map_err(|e| GrabError::io(format!("create {}", output_path.display()), e))?;

    let started = Instant::now();
    let mut stats = ProgressStats::new(fragments.len());
    reporter.download_started(fragments.len());

    for fragment in fragments {
        let url = template.fragment_url(video_id, fragment);
        let bytes = client
            .get_streaming(&url, |chunk| out.write_all(chunk))
            .map_err(|e| fragment_error(e, fragment, output_path))?;
        tracing::debug!(fragment = %fragment, bytes, "fragment written");

        stats.fragments_done += 1;
        stats.bytes_done += bytes;
        stats.elapsed_secs = started.elapsed().as_secs_f64();
        reporter.fragment_done(&stats);
    }

    out.flush()
        .map_err(|e| GrabError::io(format!("flush {}", output_path.display()), e))?;
    reporter.download_finished(&stats);
    Ok(stats.bytes_done)
}

fn fragment_error(e: HttpError, fragment: &str, output_path: &Path) -> GrabError {
    tracing::warn!(fragment = %fragment, "fragment failed: {}", e);
    match e {
        HttpError::Status(status) => GrabError::FragmentFetchFailed {
            fragment: fragment.to_string(),
            status,
        },
        HttpError::Curl(source) => GrabError::FragmentTransport {
            fragment: fragment.to_string(),
            source,
        },
        HttpError::Sink(source) => {
            GrabError::io(format!("write {}", output_path.display()), source)
        }
    }
}

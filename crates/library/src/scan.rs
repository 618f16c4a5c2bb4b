use crate::catalog::CatalogEntry;
use crate::loader::Loader;
use async_stream::stream;
use futures::Stream;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Started,
    Loaded(CatalogEntry),
    /// The file couldn't be fetched, or has no title.
    Skipped { file: String, reason: String },
    Complete { loaded: usize, skipped: usize },
}

/// Reads `files` (relative to the loader's base path) one after another and
/// reports an entry for each usable document, in the order given.
///
/// Fetched text goes through the loader's cache, so a later
/// [`load_project`](Loader::load_project) doesn't fetch again. A file that
/// fails is reported and skipped; it never ends the scan.
pub fn scan<'a>(loader: &'a Loader, files: &'a [String]) -> impl Stream<Item = ScanEvent> + 'a {
    stream! {
        yield ScanEvent::Started;
        let (mut loaded, mut skipped) = (0, 0);
        for file in files {
            match loader.scan_file(file).await {
                Ok(entry) => {
                    loaded += 1;
                    tracing::debug!(file = %file, id = %entry.id, "scanned project");
                    yield ScanEvent::Loaded(entry);
                },
                Err(err) => {
                    skipped += 1;
                    tracing::warn!(file = %file, error = %err, "skipping project file");
                    yield ScanEvent::Skipped { file: file.clone(), reason: err.to_string() };
                },
            }
        }
        yield ScanEvent::Complete { loaded, skipped };
    }
}

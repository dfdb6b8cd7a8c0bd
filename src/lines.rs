use anyhow::Error;
use async_std::fs::{self, File};
use async_std::io::prelude::*;
use async_std::io::{BufRead, BufReader, stdin};
use async_walkdir::{DirEntry, WalkDir};
use futures::FutureExt;
use futures::future;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use lines_ext::LinesExt;
use std::io::{ErrorKind, Result};
use std::path::Path;

/// Separates yaml documents within a file
const DOC_SEPARATOR: &str = "---";

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Lines of a reader closed off with a separator so documents never span sources
fn separated_lines<R>(reader: R) -> impl Stream<Item = Result<String>>
where
    R: BufRead + Unpin,
{
    reader
        .lines()
        .chain(stream::once(future::ready(Ok(DOC_SEPARATOR.to_string()))))
}

/// Reads every visible yaml file in a dir tree by line
fn dir_lines(dir: &str) -> impl Stream<Item = Result<String>> + use<> {
    WalkDir::new(dir)
        .try_filter_map(|dir_entry: DirEntry| async move {
            let path = dir_entry.path();
            let hidden = path
                .file_name()
                .ok_or_else(|| std::io::Error::new(ErrorKind::Other, "No file name"))?
                .to_string_lossy()
                .starts_with('.');
            if hidden || path.is_dir() || !is_yaml(&path) {
                return Ok(None);
            };
            File::open(&path).await.map(Option::Some)
        })
        .map_ok(|file| separated_lines(BufReader::new(file)))
        .try_flatten()
}

/// Reads dir or file by line
async fn dir_or_file_lines(pathstr: String) -> Result<impl Stream<Item = Result<String>>> {
    let metadata = fs::metadata(&pathstr).await.map_err(|err| {
        std::io::Error::new(err.kind(), format!("Failed to read {}: {}", pathstr, err))
    })?;
    if metadata.is_file() {
        let file = File::open(&pathstr).await?;
        Ok(separated_lines(BufReader::new(file)).left_stream())
    } else {
        Ok(dir_lines(&pathstr).right_stream())
    }
}

/// Reads lines of given dir or file, or stdin if None
pub fn lines(path: Option<String>) -> impl Stream<Item = Result<String>> {
    if let Some(pathstr) = path {
        dir_or_file_lines(pathstr)
            .into_stream()
            .try_flatten()
            .left_stream()
    } else {
        separated_lines(BufReader::new(stdin())).right_stream()
    }
}

/// Reads the yaml documents of given dir or file, or stdin if None.
///
/// Blank documents are skipped.
pub fn documents(path: Option<String>) -> impl Stream<Item = anyhow::Result<String>> {
    lines(path)
        .chunk_by_line(DOC_SEPARATOR)
        .map_err(|err: std::io::Error| Error::new(err)) // map to anyhow::Error from here on
        .try_filter(|doc: &String| future::ready(!doc.trim().is_empty()))
}

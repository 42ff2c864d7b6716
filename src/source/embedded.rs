//! Embedded-resource source
//!
//! Resources compiled into the binary are addressed by flat, dot-separated
//! names (`App.Skills.demo.sub.b.txt`). This source picks the resources under
//! a name prefix and rebuilds a slash-separated tree from them: every segment
//! but the last two becomes a directory, the last two form `name.ext`.
//! File names containing more than one dot, or directories containing a dot,
//! cannot be told apart from nesting and come out split.

use std::io::Read;
use std::sync::Arc;

use super::types::{FileData, FileIter, FileSource};

/// A namespace of named, readable resources.
pub trait ResourceNamespace: Send + Sync {
    fn resource_names(&self) -> Vec<String>;

    /// Open a resource for reading. `None` if it cannot be opened.
    fn open_resource(&self, name: &str) -> Option<Box<dyn Read + Send + '_>>;
}

/// Resources held in a static table, typically built from `include_bytes!`.
#[derive(Debug, Clone, Copy)]
pub struct StaticResources {
    entries: &'static [(&'static str, &'static [u8])],
}

impl StaticResources {
    pub const fn new(entries: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { entries }
    }
}

impl ResourceNamespace for StaticResources {
    fn resource_names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.to_string()).collect()
    }

    fn open_resource(&self, name: &str) -> Option<Box<dyn Read + Send + '_>> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, bytes)| Box::new(*bytes) as Box<dyn Read + Send>)
    }
}

/// Source over the resources of a namespace whose names start with a prefix.
#[derive(Clone)]
pub struct EmbeddedSource {
    namespace: Arc<dyn ResourceNamespace>,
    prefix: String,
}

impl EmbeddedSource {
    pub fn new(namespace: Arc<dyn ResourceNamespace>, prefix: impl Into<String>) -> Self {
        Self {
            namespace,
            prefix: prefix.into(),
        }
    }

    /// Read one resource. The reader is dropped before returning.
    fn load(&self, name: &str, relative_path: String) -> Option<FileData> {
        let Some(mut reader) = self.namespace.open_resource(name) else {
            tracing::debug!(resource = name, "skipping resource that failed to open");
            return None;
        };
        let mut content = Vec::new();
        if let Err(e) = reader.read_to_end(&mut content) {
            tracing::debug!(resource = name, error = %e, "skipping unreadable resource");
            return None;
        }
        Some(FileData::new(relative_path, content))
    }
}

/// Strip `prefix` from `name`, comparing characters case-insensitively.
///
/// Characters are compared by their lowercase mapping, so the matched part of
/// `name` may differ in byte length from `prefix`.
fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let mut chars = name.chars();
    for p in prefix.chars() {
        let c = chars.next()?;
        if !c.to_lowercase().eq(p.to_lowercase()) {
            return None;
        }
    }
    Some(chars.as_str())
}

/// Turn a dot-separated resource name remainder into a relative path.
pub fn resource_name_to_path(remainder: &str) -> Option<String> {
    let segments: Vec<&str> = remainder.split('.').filter(|s| !s.is_empty()).collect();
    match segments.len() {
        0 => None,
        1 => Some(segments[0].to_string()),
        n => {
            let file = format!("{}.{}", segments[n - 2], segments[n - 1]);
            let mut parts: Vec<&str> = segments[..n - 2].to_vec();
            parts.push(&file);
            Some(parts.join("/"))
        }
    }
}

impl FileSource for EmbeddedSource {
    fn get_files(&self) -> FileIter<'_> {
        let names = self.namespace.resource_names();
        Box::new(names.into_iter().filter_map(move |name| {
            let remainder = strip_prefix_ignore_case(&name, &self.prefix)?;
            let relative = resource_name_to_path(remainder)?;
            self.load(&name, relative).map(Ok)
        }))
    }

    fn describe(&self) -> String {
        format!("embedded resources '{}'", self.prefix)
    }
}

impl std::fmt::Debug for EmbeddedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedSource")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    static RESOURCES: &[(&str, &[u8])] = &[
        ("App.Skills.demo.a.txt", b"hi"),
        ("App.Skills.demo.sub.b.txt", b"yo"),
        ("app.skills.DEMO.README", b"readme"),
        ("App.Other.c.txt", b"nope"),
    ];

    fn collect(source: &EmbeddedSource) -> Vec<FileData> {
        source.get_files().collect::<Result<_, _>>().unwrap()
    }

    #[test]
    fn test_resource_name_to_path() {
        assert_eq!(resource_name_to_path(".a.txt").unwrap(), "a.txt");
        assert_eq!(resource_name_to_path("sub.deeper.b.txt").unwrap(), "sub/deeper/b.txt");
        assert_eq!(resource_name_to_path("README").unwrap(), "README");
        assert_eq!(resource_name_to_path("archive.tar.gz").unwrap(), "archive/tar.gz");
        assert!(resource_name_to_path("").is_none());
        assert!(resource_name_to_path("...").is_none());
    }

    #[test]
    fn test_prefix_match_is_case_insensitive() {
        let source = EmbeddedSource::new(Arc::new(StaticResources::new(RESOURCES)), "App.Skills.demo");
        let files = collect(&source);
        let paths: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["a.txt", "sub/b.txt", "README"]);
        assert_eq!(files[1].content, b"yo");
        assert!(files.iter().all(|f| f.modified.is_none()));
    }

    #[test]
    fn test_strip_prefix_ignore_case() {
        assert_eq!(strip_prefix_ignore_case("Foo.Bar", "foo."), Some("Bar"));
        assert_eq!(strip_prefix_ignore_case("Fo", "foo."), None);
        assert_eq!(strip_prefix_ignore_case("Baz.Bar", "foo."), None);
        assert_eq!(strip_prefix_ignore_case("ÄRGER.Daten.txt", "ärger."), Some("Daten.txt"));
        assert_eq!(strip_prefix_ignore_case("Σκιά.a.txt", "σκιά."), Some("a.txt"));
        assert_eq!(strip_prefix_ignore_case("Ärger.x", "arger."), None);
    }

    #[test]
    fn test_non_ascii_prefix_matches_resources() {
        static UNICODE: &[(&str, &[u8])] = &[
            ("Über.Skills.notes.md", b"n"),
            ("über.skills.sub.todo.txt", b"t"),
        ];
        let source = EmbeddedSource::new(Arc::new(StaticResources::new(UNICODE)), "ÜBER.SKILLS");
        let files = collect(&source);
        let paths: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["notes.md", "sub/todo.txt"]);
    }

    /// Namespace whose odd-numbered resources refuse to open, and which
    /// tracks how many readers are alive.
    struct FlakyResources {
        open: Arc<Mutex<usize>>,
    }

    struct TrackedReader {
        data: &'static [u8],
        open: Arc<Mutex<usize>>,
    }

    impl Read for TrackedReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.data.read(buf)
        }
    }

    impl Drop for TrackedReader {
        fn drop(&mut self) {
            *self.open.lock().unwrap() -= 1;
        }
    }

    impl ResourceNamespace for FlakyResources {
        fn resource_names(&self) -> Vec<String> {
            (0..4).map(|i| format!("Res.f{}.txt", i)).collect()
        }

        fn open_resource(&self, name: &str) -> Option<Box<dyn Read + Send + '_>> {
            if name.ends_with("f1.txt") || name.ends_with("f3.txt") {
                return None;
            }
            *self.open.lock().unwrap() += 1;
            Some(Box::new(TrackedReader { data: b"ok", open: self.open.clone() }))
        }
    }

    #[test]
    fn test_unopenable_resources_are_skipped_and_readers_released() {
        let open = Arc::new(Mutex::new(0));
        let source = EmbeddedSource::new(Arc::new(FlakyResources { open: open.clone() }), "Res.");

        let files = collect(&source);
        let paths: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["f0.txt", "f2.txt"]);
        assert_eq!(*open.lock().unwrap(), 0);

        // abandon after the first item
        let mut iter = source.get_files();
        assert!(iter.next().is_some());
        drop(iter);
        assert_eq!(*open.lock().unwrap(), 0);
    }
}

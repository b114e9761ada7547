// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured identities for tests.
//!
//! Hosts identify tests with opaque node ids such as `tests/test_a.py::TestClass::test_method`.
//! These are split once, at the boundary where events enter easyread, into a [`TestIdentity`].
//! Nothing downstream looks at the raw string again.

use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// The separator between hierarchical segments of a node id.
pub const NODE_ID_SEPARATOR: &str = "::";

/// The word separator within a test name.
const WORD_SEPARATOR: char = '_';

/// The conventional prefix token of test names, dropped from titles.
const TEST_PREFIX: &str = "test";

/// The identity of a single test: the file it lives in, the containers (classes) grouping it, and
/// its name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TestIdentity {
    node_id: String,
    file: Utf8PathBuf,
    containers: Vec<String>,
    name: String,
    segment_count: usize,
}

impl TestIdentity {
    /// Creates a new identity from its parts.
    pub fn new(
        file: impl Into<Utf8PathBuf>,
        containers: impl IntoIterator<Item = impl Into<String>>,
        name: impl Into<String>,
    ) -> Self {
        let file = file.into();
        let containers: Vec<String> = containers.into_iter().map(Into::into).collect();
        let name = name.into();

        let mut node_id = file.as_str().to_owned();
        for segment in containers.iter().chain(std::iter::once(&name)) {
            node_id.push_str(NODE_ID_SEPARATOR);
            node_id.push_str(segment);
        }

        let segment_count = containers.len() + 2;
        Self {
            node_id,
            file,
            containers,
            name,
            segment_count,
        }
    }

    /// Splits a node id into an identity.
    ///
    /// This never fails: a node id without separators is treated as a file whose leaf name is
    /// the file itself, and an empty node id produces an identity with empty parts.
    pub fn parse(node_id: &str) -> Self {
        let segments: Vec<&str> = node_id.split(NODE_ID_SEPARATOR).collect();
        // split always yields at least one segment.
        let file = segments[0];
        let name = segments[segments.len() - 1];
        let containers = if segments.len() > 2 {
            segments[1..segments.len() - 1]
                .iter()
                .map(|s| (*s).to_owned())
                .collect()
        } else {
            Vec::new()
        };

        Self {
            node_id: node_id.to_owned(),
            file: Utf8PathBuf::from(file),
            containers,
            name: name.to_owned(),
            segment_count: segments.len(),
        }
    }

    /// Returns the full node id.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Returns the file this test lives in.
    pub fn file(&self) -> &Utf8Path {
        &self.file
    }

    /// Returns the name of the class directly under the file, if this test lives in one.
    pub fn class_name(&self) -> Option<&str> {
        self.containers.first().map(String::as_str)
    }

    /// Returns all containers between the file and the test name, outermost first.
    pub fn containers(&self) -> &[String] {
        &self.containers
    }

    /// Returns the leaf name of the test.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of hierarchical segments in the node id.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Returns true if this test lives in a class.
    pub fn is_in_class(&self) -> bool {
        self.segment_count >= 3
    }

    /// Returns the human-readable title of this test, e.g. `zero is truthy` for
    /// `test_zero_is_truthy`.
    pub fn title(&self) -> String {
        format_title(&self.name)
    }

    /// Returns the title qualified with its class, e.g. `TestClass: zero is truthy`.
    pub fn qualified_title(&self) -> String {
        match self.class_name() {
            Some(class_name) if self.is_in_class() => {
                format!("{class_name}: {}", self.title())
            }
            _ => self.title(),
        }
    }

    /// Returns the indentation used for this test in a grouped list.
    pub fn list_indent(&self) -> &'static str {
        if self.is_in_class() { "    " } else { "  " }
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.node_id)
    }
}

/// Turns a test name into a title: words are split on `_`, a leading `test` token (in any case)
/// is dropped, and the remaining words are joined with single spaces.
pub fn format_title(name: &str) -> String {
    let mut words: Vec<&str> = name.split(WORD_SEPARATOR).collect();
    if words
        .first()
        .is_some_and(|word| word.eq_ignore_ascii_case(TEST_PREFIX))
    {
        words.remove(0);
    }
    words.join(" ")
}

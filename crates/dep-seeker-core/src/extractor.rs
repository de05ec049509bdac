//! Lightweight import/package extraction for JVM source files.
//!
//! Extraction is line-anchored pattern matching, not parsing. Malformed or
//! missing declarations yield empty results; nothing here can fail.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

// The capture stops at a wildcard, so `import a.b.*` yields `a.b.`.
static KOTLIN_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*import[ \t]+([A-Za-z0-9_.]+)[^\r\n]*\r?$")
        .unwrap_or_else(|e| panic!("kotlin import regex: {e}"))
});

static JAVA_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*import[ \t]+(?:static[ \t]+)?([A-Za-z0-9_.]+)\*?[ \t]*;")
        .unwrap_or_else(|e| panic!("java import regex: {e}"))
});

static KOTLIN_PACKAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*package[ \t]+([A-Za-z0-9_.]+)[ \t]*;?[ \t]*\r?$")
        .unwrap_or_else(|e| panic!("kotlin package regex: {e}"))
});

static JAVA_PACKAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*package[ \t]+([A-Za-z0-9_.]+)[ \t]*;")
        .unwrap_or_else(|e| panic!("java package regex: {e}"))
});

/// Source dialects understood by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    /// Kotlin: statements end at the line break.
    Kotlin,
    /// Java: statements end with `;`.
    Java,
}

impl SourceLanguage {
    /// All supported dialects.
    pub const ALL: [Self; 2] = [Self::Kotlin, Self::Java];

    /// Language identifier.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Kotlin => "kotlin",
            Self::Java => "java",
        }
    }

    /// File extension, including the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Kotlin => ".kt",
            Self::Java => ".java",
        }
    }

    /// Detects the dialect of a file from its name.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|lang| name.ends_with(lang.extension()))
    }

    fn import_pattern(self) -> &'static Regex {
        match self {
            Self::Kotlin => &KOTLIN_IMPORT,
            Self::Java => &JAVA_IMPORT,
        }
    }

    fn package_pattern(self) -> &'static Regex {
        match self {
            Self::Kotlin => &KOTLIN_PACKAGE,
            Self::Java => &JAVA_PACKAGE,
        }
    }
}

/// Symbols extracted from one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSymbols {
    /// Imported names, deduplicated, in order of first occurrence.
    pub imports: Vec<String>,
    /// Declared package, or an empty string when there is none.
    pub package: String,
}

/// Extracts imports and the package declaration from `source`.
#[must_use]
pub fn analyze(language: SourceLanguage, source: &str) -> FileSymbols {
    FileSymbols {
        imports: extract_imports(language, source),
        package: extract_package(language, source),
    }
}

/// Returns the imported names of `source`, first occurrence order.
#[must_use]
pub fn extract_imports(language: SourceLanguage, source: &str) -> Vec<String> {
    let names: IndexSet<String> = language
        .import_pattern()
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect();
    names.into_iter().collect()
}

/// Returns the first package declared in `source`, or `""`.
#[must_use]
pub fn extract_package(language: SourceLanguage, source: &str) -> String {
    language
        .package_pattern()
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map_or_else(String::new, |m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kotlin_imports_in_order() {
        let src = "package ru.example\n\nimport ru.example.Kotlin1\nimport ru.example.Kotlin2\n\nclass Kotlin {}";
        assert_eq!(
            extract_imports(SourceLanguage::Kotlin, src),
            vec!["ru.example.Kotlin1", "ru.example.Kotlin2"]
        );
    }

    #[test]
    fn kotlin_alias_and_wildcard_suffixes_ignored() {
        let src = "import com.a.Foo as Bar\nimport com.b.*\nimport com.c.Baz";
        assert_eq!(
            extract_imports(SourceLanguage::Kotlin, src),
            vec!["com.a.Foo", "com.b.", "com.c.Baz"]
        );
    }

    #[test]
    fn java_imports_require_terminator() {
        let src = "import com.a.Foo;\nimport static com.b.Util.helper;\nimport com.c.*;\nimport com.d.Broken\n";
        assert_eq!(
            extract_imports(SourceLanguage::Java, src),
            vec!["com.a.Foo", "com.b.Util.helper", "com.c."]
        );
    }

    #[test]
    fn crlf_line_endings() {
        let kotlin = "package com.example.app\r\n\r\nimport okio.Buffer\r\nimport com.example.core.Engine as E\r\nimport kotlinx.coroutines.*\r\n\r\nclass App\r\n";
        let symbols = analyze(SourceLanguage::Kotlin, kotlin);
        assert_eq!(symbols.package, "com.example.app");
        assert_eq!(
            symbols.imports,
            vec!["okio.Buffer", "com.example.core.Engine", "kotlinx.coroutines."]
        );

        let java = "package com.example.app;\r\n\r\nimport okio.Buffer;\r\nimport static com.example.core.Engine.start;\r\n\r\nclass App {}\r\n";
        let symbols = analyze(SourceLanguage::Java, java);
        assert_eq!(symbols.package, "com.example.app");
        assert_eq!(
            symbols.imports,
            vec!["okio.Buffer", "com.example.core.Engine.start"]
        );
    }

    #[test]
    fn duplicates_keep_first_position() {
        let src = "import a.B\nimport c.D\nimport a.B\n";
        assert_eq!(
            extract_imports(SourceLanguage::Kotlin, src),
            vec!["a.B", "c.D"]
        );
    }

    #[test]
    fn extraction_is_idempotent() {
        let src = "package p\nimport x.Y\nimport z.W\nimport x.Y\n";
        let first = analyze(SourceLanguage::Kotlin, src);
        let second = analyze(SourceLanguage::Kotlin, src);
        assert_eq!(first, second);
    }

    #[test]
    fn only_first_package_honored() {
        let src = "package com.first;\nclass A {}\npackage com.second;\n";
        assert_eq!(extract_package(SourceLanguage::Java, src), "com.first");
    }

    #[test]
    fn kotlin_package_without_terminator() {
        assert_eq!(
            extract_package(SourceLanguage::Kotlin, "package com.example.feature\n"),
            "com.example.feature"
        );
        assert_eq!(
            extract_package(SourceLanguage::Kotlin, "package com.example.feature"),
            "com.example.feature"
        );
    }

    #[test]
    fn garbage_yields_empty_results() {
        let symbols = analyze(SourceLanguage::Java, "\u{0}\u{1}import;;package\n{{{");
        assert!(symbols.imports.is_empty());
        assert!(symbols.package.is_empty());
    }

    #[test]
    fn language_from_path() {
        assert_eq!(
            SourceLanguage::from_path(Path::new("src/Main.kt")),
            Some(SourceLanguage::Kotlin)
        );
        assert_eq!(
            SourceLanguage::from_path(Path::new("src/Main.java")),
            Some(SourceLanguage::Java)
        );
        assert_eq!(SourceLanguage::from_path(Path::new("res/layout.xml")), None);
        assert_eq!(SourceLanguage::from_path(Path::new("build.gradle.kts")), None);
    }
}

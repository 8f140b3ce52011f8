/// Directive lines that mark dataset partitions. The joiner skips them.
pub const DIRECTIVES: [&str; 2] = ["TEST", "DEV"];

/// One classified line of a MegaM file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record<'a> {
    /// `# <key>` comment naming the document for the following lines
    Header(&'a str),
    Directive,
    Features { label: &'a str, text: &'a str },
    /// Anything else: no tab between label and features (blank lines included)
    Malformed,
}

/// Classify a raw line. Surrounding whitespace is ignored.
pub fn classify(raw: &str) -> Record<'_> {
    let line = raw.trim();

    if line.starts_with('#') {
        return Record::Header(document_key(line));
    }

    if DIRECTIVES.contains(&line) {
        return Record::Directive;
    }

    match line.split_once('\t') {
        Some((label, text)) => Record::Features { label, text },
        None => Record::Malformed,
    }
}

/// Strip every leading `#` and space, so `# # doc 1` names `doc 1`.
fn document_key(line: &str) -> &str {
    line.trim_start_matches(|c: char| c == '#' || c == ' ')
}

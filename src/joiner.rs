use crate::config::JoinConfig;
use crate::input::Input;
use crate::record::{classify, Record};
use crate::summary::{InputSummary, JoinSummary, JoinWarning};
use crate::JoinError;
use fixedbitset::FixedBitSet;
use rustc_hash::FxHashMap;
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};

/// Accumulated state for one document. Label and features always move together.
#[derive(Debug)]
struct DocumentEntry {
    key: String,
    label: String,
    features: String,
    /// Inputs that contributed feature lines, by load index
    sources: FixedBitSet,
}

/// Unique keys with insertion-ordered entries
#[derive(Debug, Default)]
struct MergeStore {
    index: FxHashMap<String, usize>,
    documents: Vec<DocumentEntry>,
}

impl MergeStore {
    fn accumulate(&mut self, key: &str, label: &str, text: &str, source: usize) {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.documents.push(DocumentEntry {
                    key: key.to_string(),
                    label: String::new(),
                    features: String::new(),
                    sources: FixedBitSet::new(),
                });
                let slot = self.documents.len() - 1;
                self.index.insert(key.to_string(), slot);
                slot
            }
        };

        let entry = &mut self.documents[slot];
        // Last label wins, features append
        entry.label.clear();
        entry.label.push_str(label);
        entry.features.push_str(text);
        entry.features.push(' ');
        entry.sources.grow(source + 1);
        entry.sources.insert(source);
    }
}

/// Streaming merge of MegaM inputs keyed by document.
///
/// Inputs are loaded one at a time, in order, into a single store. The
/// current document survives input boundaries unless the config says
/// otherwise.
pub struct Joiner {
    config: JoinConfig,
    store: MergeStore,
    current_key: Option<String>,
    inputs: Vec<InputSummary>,
    warnings: Vec<JoinWarning>,
}

impl Joiner {
    pub fn new(config: JoinConfig) -> Self {
        Self {
            config,
            store: MergeStore::default(),
            current_key: None,
            inputs: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Scan one input stream into the store.
    ///
    /// Fails on a read error or on a feature line that has no document
    /// header before it. Lines without a tab are warned about and skipped.
    pub fn load<R: BufRead>(&mut self, name: &str, reader: R) -> Result<&InputSummary, JoinError> {
        info!("Loading {}...", name);

        let source = self.inputs.len();
        if !self.config.carry_key_across_inputs {
            self.current_key = None;
        }

        let mut summary = InputSummary::new(name);
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| JoinError::Input(name.to_string(), e))?;
            let line_number = idx + 1;
            let record = classify(&line);
            summary.count(&record);

            match record {
                Record::Header(key) => {
                    self.current_key = Some(key.to_string());
                }
                Record::Directive => {}
                Record::Features { label, text } => {
                    let Some(key) = self.current_key.as_deref() else {
                        return Err(JoinError::MissingHeader(name.to_string(), line_number));
                    };
                    self.store.accumulate(key, label, text, source);
                }
                Record::Malformed => {
                    let key = self.current_key.clone();
                    warn!(
                        "No features found for {} in {}",
                        key.as_deref().unwrap_or("<none>"),
                        name
                    );
                    self.warnings.push(JoinWarning {
                        source: name.to_string(),
                        line: line_number,
                        key,
                    });
                }
            }
        }

        self.inputs.push(summary);
        Ok(&self.inputs[source])
    }

    /// Open an input, scan it, and close it before returning.
    pub fn load_input(&mut self, input: &Input) -> Result<&InputSummary, JoinError> {
        let reader = input.open()?;
        self.load(&input.name(), reader)
    }

    pub fn current_key(&self) -> Option<&str> {
        self.current_key.as_deref()
    }

    /// Distinct documents accumulated so far
    pub fn len(&self) -> usize {
        self.store.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.documents.is_empty()
    }

    pub fn warnings(&self) -> &[JoinWarning] {
        &self.warnings
    }

    /// Consume the store and produce the documents to emit, in the order each
    /// document first received features.
    pub fn finish(self) -> JoinedDocuments {
        let input_count = self.inputs.len();
        let documents_joined = self.store.documents.len();
        let mut documents = Vec::with_capacity(documents_joined);
        let mut documents_filtered = 0;

        for mut entry in self.store.documents {
            if self.config.common_only && entry.sources.count_ones(..) < input_count {
                debug!(
                    "Skipping {}: features from {} of {} inputs",
                    entry.key,
                    entry.sources.count_ones(..),
                    input_count
                );
                documents_filtered += 1;
                continue;
            }

            let trimmed = entry.features.trim_end().len();
            entry.features.truncate(trimmed);
            documents.push(JoinedDocument {
                key: entry.key,
                label: entry.label,
                features: entry.features,
            });
        }

        let summary = JoinSummary {
            inputs: self.inputs,
            documents_joined,
            documents_written: documents.len(),
            documents_filtered,
            warnings: self.warnings,
        };

        JoinedDocuments { documents, summary }
    }
}

/// One merged output record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedDocument {
    pub key: String,
    pub label: String,
    /// Feature text with trailing whitespace trimmed
    pub features: String,
}

/// Result of a join run, ready to write
#[derive(Debug)]
pub struct JoinedDocuments {
    documents: Vec<JoinedDocument>,
    summary: JoinSummary,
}

impl JoinedDocuments {
    pub fn documents(&self) -> &[JoinedDocument] {
        &self.documents
    }

    pub fn get(&self, key: &str) -> Option<&JoinedDocument> {
        self.documents.iter().find(|doc| doc.key == key)
    }

    pub fn summary(&self) -> &JoinSummary {
        &self.summary
    }

    pub fn into_summary(self) -> JoinSummary {
        self.summary
    }

    /// Write every document as a `# key` line followed by `label<TAB>features`.
    pub fn write_megam<W: Write>(&self, mut out: W) -> Result<(), JoinError> {
        for doc in &self.documents {
            writeln!(out, "# {}", doc.key)?;
            writeln!(out, "{}\t{}", doc.label, doc.features)?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Join `inputs` in order and write the merged MegaM text to `out`.
///
/// Nothing is written unless every input was read successfully.
#[instrument(level = "debug", skip_all, fields(inputs = inputs.len()))]
pub fn join_inputs<W: Write>(inputs: &[Input], config: JoinConfig, out: W) -> Result<JoinSummary, JoinError> {
    let mut joiner = Joiner::new(config);
    for input in inputs {
        joiner.load_input(input)?;
    }

    let joined = joiner.finish();
    joined.write_megam(out)?;
    Ok(joined.into_summary())
}

//! Part-of-speech lexicon loading with a layered fallback strategy.
//!
//! Load order: bundled file under the model directory, then a one-time
//! download cached back into it, then a pre-existing system installation.
//! Every failed layer logs and moves on; total failure means the caller
//! degrades to word-frequency extraction.

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

/// File name of the lexicon inside the model directory.
pub const LEXICON_FILENAME: &str = "en-pos.tsv";

const LEXICON_URL: &str = "https://raw.githubusercontent.com/textlens/models/main/en-pos.tsv";

const SYSTEM_LEXICON_PATHS: &[&str] = &[
    "/usr/local/share/textlens/en-pos.tsv",
    "/usr/share/textlens/en-pos.tsv",
];

/// Coarse part-of-speech classes used by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Other,
}

impl PosTag {
    /// Map a Penn-style tag to a coarse class. `NN`/`NNS` are common nouns;
    /// proper nouns (`NNP`/`NNPS`) are deliberately excluded.
    fn from_label(label: &str) -> Self {
        match label {
            "NN" | "NNS" => PosTag::Noun,
            l if l.starts_with("VB") => PosTag::Verb,
            l if l.starts_with("JJ") => PosTag::Adjective,
            l if l.starts_with("RB") => PosTag::Adverb,
            _ => PosTag::Other,
        }
    }
}

/// Word → part-of-speech table, read-only after load.
pub struct Lexicon {
    tags: HashMap<String, PosTag>,
}

impl Lexicon {
    /// Parse TSV lexicon data: one `word<TAB>tag` entry per line.
    /// Blank lines and `#` comments are skipped.
    pub fn parse(data: &str) -> Self {
        let mut tags = HashMap::new();
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((word, label)) = line.split_once('\t') {
                tags.insert(word.trim().to_lowercase(), PosTag::from_label(label.trim()));
            }
        }
        Self { tags }
    }

    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(Self::parse(&data))
    }

    /// Look up the tag for a lowercased word.
    pub fn tag(&self, word: &str) -> Option<PosTag> {
        self.tags.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Attempt every load layer in order. Returns `None` when all fail.
pub async fn load_lexicon(model_dir: &Path) -> Option<Lexicon> {
    let bundled = model_dir.join(LEXICON_FILENAME);
    if bundled.exists() {
        match Lexicon::from_file(&bundled) {
            Ok(lex) if !lex.is_empty() => {
                info!("Loaded bundled POS lexicon from {}", bundled.display());
                return Some(lex);
            }
            Ok(_) => warn!("Bundled lexicon at {} is empty", bundled.display()),
            Err(e) => warn!("Bundled lexicon failed to load: {}", e),
        }
    }

    match download_lexicon(&bundled).await {
        Ok(lex) => {
            info!("Downloaded POS lexicon ({} entries)", lex.len());
            return Some(lex);
        }
        Err(e) => warn!("POS lexicon download failed: {}", e),
    }

    for candidate in SYSTEM_LEXICON_PATHS {
        let path = Path::new(candidate);
        if path.exists() {
            match Lexicon::from_file(path) {
                Ok(lex) if !lex.is_empty() => {
                    info!("Loaded system POS lexicon from {}", candidate);
                    return Some(lex);
                }
                Ok(_) => warn!("System lexicon at {} is empty", candidate),
                Err(e) => warn!("System lexicon at {} failed to load: {}", candidate, e),
            }
        }
    }

    None
}

/// Fetch the lexicon and cache it next to the bundled location so later
/// starts hit the first layer.
async fn download_lexicon(target: &Path) -> Result<Lexicon, String> {
    info!("Downloading POS lexicon from {}", LEXICON_URL);
    let body = reqwest::get(LEXICON_URL)
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .text()
        .await
        .map_err(|e| e.to_string())?;

    let lex = Lexicon::parse(&body);
    if lex.is_empty() {
        return Err("downloaded lexicon contains no entries".into());
    }

    if let Some(parent) = target.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = std::fs::write(target, &body) {
        warn!("Could not cache lexicon to {}: {}", target.display(), e);
    }

    Ok(lex)
}

//! Asking a human for what the path could not tell us.
//!
//! Only title and track number are ever requested (plus the artist in a
//! compilation, whose filenames carry it). The caller decides what a
//! cancelled prompt means; here it is just an error value.

use std::io::{self, BufRead, Write};

use crate::error::{Error, Result};
use crate::metadata::{Extraction, Field};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub file_name: String,
    /// Whether an artist should be asked for as well.
    pub compilation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    Provided {
        title: String,
        track: String,
        artist: Option<String>,
    },
    Cancelled,
}

pub trait InteractiveResolver {
    fn resolve(&mut self, request: &PromptRequest) -> PromptResponse;
}

/// Fill an ambiguous extraction through `resolver`.
///
/// Unambiguous extractions pass through untouched. Blank answers leave the
/// field as it was, so an unhelpful answer still ends in
/// `AmbiguousMetadata`.
pub fn resolve_interactively(
    mut extraction: Extraction,
    resolver: &mut dyn InteractiveResolver,
) -> Result<Extraction> {
    if !extraction.is_ambiguous() {
        return Ok(extraction);
    }

    let path = extraction.metadata.source_file.clone();
    let request = PromptRequest {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        compilation: extraction.classification.layout
            == crate::layout::LibraryLayout::LabelCompilation,
    };

    match resolver.resolve(&request) {
        PromptResponse::Cancelled => Err(Error::Cancelled { path }),
        PromptResponse::Provided {
            title,
            track,
            artist,
        } => {
            if !title.trim().is_empty() {
                extraction.supply(Field::Title, &title);
            }
            if let Ok(n) = track.trim().parse::<u32>() {
                extraction.supply(Field::Track, &n.to_string());
            }
            if request.compilation {
                if let Some(artist) = artist.filter(|a| !a.trim().is_empty()) {
                    extraction.supply(Field::Artist, &artist);
                }
            }
            extraction.require_resolved()
        }
    }
}

/// Line-based prompt over any reader/writer pair; stdin/stderr in the binary.
///
/// End of input or an empty title cancels.
pub struct StdinResolver<R, W> {
    input: R,
    output: W,
}

impl StdinResolver<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> StdinResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, label: &str) -> Option<String> {
        write!(self.output, "  {label}: ").ok()?;
        self.output.flush().ok()?;
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl<R: BufRead, W: Write> InteractiveResolver for StdinResolver<R, W> {
    fn resolve(&mut self, request: &PromptRequest) -> PromptResponse {
        let _ = writeln!(
            self.output,
            "{} needs a title and track number (empty title skips)",
            request.file_name
        );
        let Some(title) = self.ask("title").filter(|t| !t.is_empty()) else {
            return PromptResponse::Cancelled;
        };
        let Some(track) = self.ask("track") else {
            return PromptResponse::Cancelled;
        };
        let artist = if request.compilation {
            match self.ask("artist") {
                Some(a) => Some(a),
                None => return PromptResponse::Cancelled,
            }
        } else {
            None
        };
        PromptResponse::Provided {
            title,
            track,
            artist,
        }
    }
}

//! Path classification: which directory grammar a file lives under, and
//! whether it sits in a multi-disc subfolder.
//!
//! Classification only looks at the path string. Anything that needs the
//! disk (counting sibling disc folders) is a separate, explicit step.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::grammar::{self, LabelSegment};
use crate::library::Filesystem;

/// The directory-naming grammar that applies to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LibraryLayout {
    /// `AlbumArtist/[Year] Album/NN Title.ext`
    Plain,
    /// `Label/Singles/Genre/[Year] Artist - Album/NN Title.ext`
    LabelSingle,
    /// `Label/Compilations/[Year] Album/NN Artist - Title.ext`
    LabelCompilation,
    /// `Label/LPs/[Year] Artist - Album/NN Title.ext`
    LabelLP,
    /// `Label/EPs/[Year] Artist - Album/NN Title.ext`
    LabelEP,
}

impl LibraryLayout {
    pub fn from_segment(segment: LabelSegment) -> Self {
        match segment {
            LabelSegment::Singles => LibraryLayout::LabelSingle,
            LabelSegment::Compilations => LibraryLayout::LabelCompilation,
            LabelSegment::LPs => LibraryLayout::LabelLP,
            LabelSegment::EPs => LibraryLayout::LabelEP,
        }
    }

    pub fn label_segment(self) -> Option<LabelSegment> {
        match self {
            LibraryLayout::Plain => None,
            LibraryLayout::LabelSingle => Some(LabelSegment::Singles),
            LibraryLayout::LabelCompilation => Some(LabelSegment::Compilations),
            LibraryLayout::LabelLP => Some(LabelSegment::LPs),
            LibraryLayout::LabelEP => Some(LabelSegment::EPs),
        }
    }

    pub fn is_label(self) -> bool {
        self != LibraryLayout::Plain
    }

    /// Whether the album directory name carries an artist (`[Year] Artist - Album`).
    pub fn album_dir_has_artist(self) -> bool {
        matches!(
            self,
            LibraryLayout::LabelSingle | LibraryLayout::LabelLP | LibraryLayout::LabelEP
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            LibraryLayout::Plain => "plain",
            LibraryLayout::LabelSingle => "label/single",
            LibraryLayout::LabelCompilation => "label/compilation",
            LibraryLayout::LabelLP => "label/lp",
            LibraryLayout::LabelEP => "label/ep",
        }
    }
}

/// A `CDn` folder between the album directory and the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscSegment {
    pub number: u32,
    pub dir: PathBuf,
}

/// Disc position of a file inside a multi-disc album.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscLocation {
    pub disc_number: u32,
    pub total_discs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub layout: LibraryLayout,
    pub disc: Option<DiscSegment>,
    /// The album directory proper, with any disc folder stripped.
    pub album_dir: PathBuf,
    /// Parent of the `Singles`/`Compilations`/`LPs`/`EPs` folder.
    pub label_root: Option<PathBuf>,
}

impl Classification {
    /// Directory that directly holds the file: the disc folder when present.
    pub fn track_dir(&self) -> &Path {
        match &self.disc {
            Some(d) => &d.dir,
            None => &self.album_dir,
        }
    }

    /// The directory whose name is the album artist.
    pub fn album_artist_dir(&self) -> Option<&Path> {
        match &self.label_root {
            Some(root) => Some(root),
            None => self.album_dir.parent(),
        }
    }

    /// Directory containing the album-artist (or label) directory.
    pub fn library_root(&self) -> Option<&Path> {
        self.album_artist_dir().and_then(Path::parent)
    }

    /// Resolve the disc position by counting sibling disc folders.
    pub fn disc_location(&self, fs: &dyn Filesystem) -> Option<DiscLocation> {
        let disc = self.disc.as_ref()?;
        let siblings = fs
            .list_dirs(&self.album_dir)
            .map(|dirs| {
                dirs.iter()
                    .filter_map(|d| d.file_name().and_then(|n| n.to_str()))
                    .filter(|n| grammar::disc_segment(n).is_some())
                    .count() as u32
            })
            .unwrap_or(0);
        Some(DiscLocation {
            disc_number: disc.number,
            total_discs: siblings.max(1),
        })
    }
}

pub(crate) fn dir_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

/// Classify a file path. Never fails: anything unrecognized is `Plain`.
pub fn classify(path: &Path) -> Classification {
    let parent = path.parent().unwrap_or(Path::new(""));

    let (disc, album_dir) = match grammar::disc_segment(dir_name(parent)) {
        Some(number) => (
            Some(DiscSegment {
                number,
                dir: parent.to_path_buf(),
            }),
            parent.parent().unwrap_or(Path::new("")).to_path_buf(),
        ),
        None => (None, parent.to_path_buf()),
    };

    for ancestor in path.ancestors().skip(1) {
        if let Some(segment) = grammar::label_segment(dir_name(ancestor)) {
            return Classification {
                layout: LibraryLayout::from_segment(segment),
                disc,
                album_dir,
                label_root: ancestor.parent().map(Path::to_path_buf),
            };
        }
    }

    trace!(target: "classify", path = %path.display(), "no label segment, treating as plain");
    Classification {
        layout: LibraryLayout::Plain,
        disc,
        album_dir,
        label_root: None,
    }
}

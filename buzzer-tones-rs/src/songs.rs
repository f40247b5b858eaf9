//! Built-in songs.
//!
//! Every table is a `const` slice of [`PackedNote`]s ending in
//! [`PackedNote::END`]. The player keeps its octave between songs, so a song
//! that needs a known starting octave has to begin with
//! [`Pitch::OctaveReset`] itself.

use crate::note::{note, NoteLength, PackedNote, Pitch};

use NoteLength::{Full, Half, Quarter, ThreeEighths};
use Pitch::{End, OctaveDown, OctaveUp, Rest, A, B, C, D, E, F, G};

/// A named, read-only note table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Song<'a> {
    /// Shown in logs.
    pub name: &'static str,
    pub notes: &'a [PackedNote],
}

impl<'a> Song<'a> {
    pub const fn new(name: &'static str, notes: &'a [PackedNote]) -> Self {
        Self { name, notes }
    }

    /// Notes before the end marker, or the whole table if it has none.
    pub fn playable_len(&self) -> usize {
        self.notes
            .iter()
            .position(|n| *n == PackedNote::END)
            .unwrap_or(self.notes.len())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Song<'_> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Song({=str}, {} notes)", self.name, self.notes.len())
    }
}

const fn eighth(pitch: Pitch) -> PackedNote {
    note(pitch, NoteLength::Eighth)
}

/// Three full Cs, each one octave above the last.
pub const OCTAVE_UP_TEST: Song<'static> = Song {
    name: "octave up test",
    notes: &[
        note(C, Full),
        eighth(OctaveUp),
        note(C, Full),
        eighth(OctaveUp),
        note(C, Full),
        eighth(End),
    ],
};

/// Three full Cs, each one octave below the last.
pub const OCTAVE_DOWN_TEST: Song<'static> = Song {
    name: "octave down test",
    notes: &[
        note(C, Full),
        eighth(OctaveDown),
        note(C, Full),
        eighth(OctaveDown),
        note(C, Full),
        eighth(End),
    ],
};

/// Notes alternating with rests of the same length.
pub const REST_TEST: Song<'static> = Song {
    name: "rest test",
    notes: &[
        eighth(C),
        eighth(Rest),
        note(C, Quarter),
        note(Rest, Quarter),
        note(C, Full),
        note(Rest, Full),
        note(C, Full),
        eighth(End),
    ],
};

pub const MARY_HAD_A_LITTLE_LAMB: Song<'static> = Song {
    name: "mary had a little lamb",
    notes: &[
        eighth(B),
        eighth(A),
        eighth(G),
        eighth(A),
        eighth(B),
        eighth(B),
        note(B, Quarter),
        eighth(A),
        eighth(A),
        note(A, Quarter),
        eighth(B),
        eighth(C),
        note(C, Quarter),
        note(Rest, Quarter),
        eighth(B),
        eighth(A),
        eighth(G),
        eighth(A),
        eighth(B),
        eighth(B),
        note(B, Quarter),
        eighth(A),
        eighth(A),
        eighth(B),
        eighth(A),
        note(G, Quarter),
        note(G, Half),
        eighth(End),
    ],
};

/// Drops an octave for the low G and climbs back before the last note.
pub const WESTWORLD_THEME: Song<'static> = Song {
    name: "westworld theme",
    notes: &[
        note(E, Quarter),
        eighth(F),
        note(E, Quarter),
        eighth(F),
        eighth(E),
        eighth(D),
        note(C, ThreeEighths),
        note(D, Full),
        note(D, Quarter),
        eighth(E),
        note(D, Quarter),
        eighth(E),
        eighth(D),
        eighth(C),
        eighth(OctaveDown),
        note(G, Half),
        eighth(OctaveUp),
        note(A, Full),
        eighth(End),
    ],
};

/// The rotation [`Player::new`](crate::Player::new) is usually given.
pub const DEFAULT_PLAYLIST: &[Song<'static>] = &[
    OCTAVE_UP_TEST,
    OCTAVE_DOWN_TEST,
    REST_TEST,
    MARY_HAD_A_LITTLE_LAMB,
    WESTWORLD_THEME,
];

// ── Tests ────────────────────────────────────────────────────────────────
